use crate::models::{User, UserSummary};
use sqlx::PgPool;

/// Create a new user account
/// Returns the created user, or a unique-violation error if the username is taken
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    nickname: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash, nickname)
        VALUES ($1, $2, $3)
        RETURNING id, username, password_hash, nickname, avatar, bio, website,
                  first_name, last_name, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(nickname)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Find a user by ID
pub async fn find_user_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, nickname, avatar, bio, website,
               first_name, last_name, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find a user by username (login lookup)
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, nickname, avatar, bio, website,
               first_name, last_name, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Fetch public summaries for a set of users
pub async fn find_user_summaries(
    pool: &PgPool,
    user_ids: &[i64],
) -> Result<Vec<UserSummary>, sqlx::Error> {
    let users = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, nickname, avatar, bio, website, first_name, last_name
        FROM users
        WHERE id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Optional fields for a profile update
#[derive(Debug, Default)]
pub struct UpdateProfileFields {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Update profile fields, leaving unset fields unchanged
/// Returns the updated user
pub async fn update_profile(
    pool: &PgPool,
    user_id: i64,
    fields: &UpdateProfileFields,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET nickname   = COALESCE($2, nickname),
            avatar     = COALESCE($3, avatar),
            bio        = COALESCE($4, bio),
            website    = COALESCE($5, website),
            first_name = COALESCE($6, first_name),
            last_name  = COALESCE($7, last_name)
        WHERE id = $1
        RETURNING id, username, password_hash, nickname, avatar, bio, website,
                  first_name, last_name, created_at
        "#,
    )
    .bind(user_id)
    .bind(fields.nickname.as_deref())
    .bind(fields.avatar.as_deref())
    .bind(fields.bio.as_deref())
    .bind(fields.website.as_deref())
    .bind(fields.first_name.as_deref())
    .bind(fields.last_name.as_deref())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
