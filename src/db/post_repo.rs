use crate::models::{Post, PostFile};
use sqlx::{PgPool, Postgres, Row, Transaction};

/// Insert a post inside an open transaction
/// Part of the atomic post+files creation unit
pub async fn insert_post(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    caption: &str,
    tags: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, caption, tags)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, caption, tags, created_at
        "#,
    )
    .bind(user_id)
    .bind(caption)
    .bind(tags)
    .fetch_one(&mut **tx)
    .await?;

    Ok(post)
}

/// Insert an attached file inside the same transaction as its post
pub async fn insert_post_file(
    tx: &mut Transaction<'_, Postgres>,
    post_id: i64,
    user_id: i64,
    url: &str,
) -> Result<PostFile, sqlx::Error> {
    let file = sqlx::query_as::<_, PostFile>(
        r#"
        INSERT INTO post_files (post_id, user_id, url)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, user_id, url, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(url)
    .fetch_one(&mut **tx)
    .await?;

    Ok(file)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, caption, tags, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List all posts, newest first
pub async fn list_posts(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, caption, tags, created_at
        FROM posts
        ORDER BY created_at DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Find all posts by a user, newest first
pub async fn find_posts_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, caption, tags, created_at
        FROM posts
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count total posts for a user
pub async fn count_posts_by_user(pool: &PgPool, user_id: i64) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM posts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Fetch posts authored by any of the given users, newest first
/// Backs the viewer's feed (followed users plus the viewer)
pub async fn find_posts_by_authors(
    pool: &PgPool,
    author_ids: &[i64],
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, caption, tags, created_at
        FROM posts
        WHERE user_id = ANY($1)
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(author_ids)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Fetch a set of posts by id, newest first
pub async fn find_posts_by_ids(pool: &PgPool, post_ids: &[i64]) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, caption, tags, created_at
        FROM posts
        WHERE id = ANY($1)
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Case-insensitive substring search over caption and tags, newest first
pub async fn search_posts(
    pool: &PgPool,
    term: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let pattern = format!("%{}%", term);
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, caption, tags, created_at
        FROM posts
        WHERE caption ILIKE $1 OR tags ILIKE $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Delete a post owned by a user
/// Files, comments, likes and saves go with it via FK cascade rules
/// Returns true if a row was removed
pub async fn delete_post(pool: &PgPool, post_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Get all files attached to a post, in assignment order
pub async fn get_post_files(pool: &PgPool, post_id: i64) -> Result<Vec<PostFile>, sqlx::Error> {
    let files = sqlx::query_as::<_, PostFile>(
        r#"
        SELECT id, post_id, user_id, url, created_at
        FROM post_files
        WHERE post_id = $1
        ORDER BY id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(files)
}

/// Get files for multiple posts in one query
pub async fn get_post_files_batch(
    pool: &PgPool,
    post_ids: &[i64],
) -> Result<Vec<PostFile>, sqlx::Error> {
    let files = sqlx::query_as::<_, PostFile>(
        r#"
        SELECT id, post_id, user_id, url, created_at
        FROM post_files
        WHERE post_id = ANY($1)
        ORDER BY post_id, id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(files)
}
