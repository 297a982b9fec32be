use crate::models::Follow;
use sqlx::{PgPool, Row};

/// Create a follow edge
/// The (follower_id, following_id) unique constraint rejects duplicates
pub async fn create_follow(
    pool: &PgPool,
    follower_id: i64,
    following_id: i64,
) -> Result<Follow, sqlx::Error> {
    let follow = sqlx::query_as::<_, Follow>(
        r#"
        INSERT INTO follows (follower_id, following_id)
        VALUES ($1, $2)
        RETURNING id, follower_id, following_id, created_at
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;

    Ok(follow)
}

/// Delete a follow edge, keyed by the followed user's id
/// Returns true if a row was removed
pub async fn delete_follow(
    pool: &PgPool,
    follower_id: i64,
    following_id: i64,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND following_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Check if follower follows subject
pub async fn follow_exists(
    pool: &PgPool,
    follower_id: i64,
    following_id: i64,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2) as following",
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<bool, _>("following"))
}

/// List a user's outgoing follow edges, newest first
pub async fn get_following_edges(pool: &PgPool, follower_id: i64) -> Result<Vec<Follow>, sqlx::Error> {
    let follows = sqlx::query_as::<_, Follow>(
        r#"
        SELECT id, follower_id, following_id, created_at
        FROM follows
        WHERE follower_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(follower_id)
    .fetch_all(pool)
    .await?;

    Ok(follows)
}

/// Ids of everyone a user follows
pub async fn get_following_ids(pool: &PgPool, follower_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i64,)>(
        "SELECT following_id FROM follows WHERE follower_id = $1",
    )
    .bind(follower_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Ids of everyone following a user
pub async fn get_follower_ids(pool: &PgPool, following_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i64,)>(
        "SELECT follower_id FROM follows WHERE following_id = $1",
    )
    .bind(following_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Count users a user follows
pub async fn count_following(pool: &PgPool, follower_id: i64) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM follows WHERE follower_id = $1")
        .bind(follower_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Count a user's followers
pub async fn count_followers(pool: &PgPool, following_id: i64) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM follows WHERE following_id = $1")
        .bind(following_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}
