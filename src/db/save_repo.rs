use crate::models::Save;
use sqlx::{PgPool, Row};

/// Bookmark a post for later
/// The (user_id, post_id) unique constraint rejects duplicates
pub async fn create_save(pool: &PgPool, user_id: i64, post_id: i64) -> Result<Save, sqlx::Error> {
    let save = sqlx::query_as::<_, Save>(
        r#"
        INSERT INTO saves (user_id, post_id)
        VALUES ($1, $2)
        RETURNING id, user_id, post_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(save)
}

/// Delete a save, keyed by post id
/// Returns true if a row was removed
pub async fn delete_save(pool: &PgPool, user_id: i64, post_id: i64) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM saves
        WHERE user_id = $1 AND post_id = $2
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Check if a user has saved a post
pub async fn save_exists(pool: &PgPool, user_id: i64, post_id: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM saves WHERE user_id = $1 AND post_id = $2) as saved",
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<bool, _>("saved"))
}

/// Get all saves by a user, newest first
pub async fn get_user_saves(pool: &PgPool, user_id: i64) -> Result<Vec<Save>, sqlx::Error> {
    let saves = sqlx::query_as::<_, Save>(
        r#"
        SELECT id, user_id, post_id, created_at
        FROM saves
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(saves)
}
