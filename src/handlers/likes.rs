/// Like handlers
///
/// Deletion is keyed by post id, not the like row's own id; existing
/// clients rely on that convention.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct CreateLikeRequest {
    pub post: i64,
}

/// Like a post; duplicate likes are rejected with 409
/// POST /api/v1/like
pub async fn create_like(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreateLikeRequest>,
) -> Result<HttpResponse> {
    if post_repo::find_post_by_id(&pool, req.post).await?.is_none() {
        return Err(AppError::NotFound(format!("post {} not found", req.post)));
    }

    let like = like_repo::create_like(&pool, user_id.0, req.post)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("already liked".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(like))
}

/// List the caller's likes, newest first
/// GET /api/v1/like
pub async fn list_likes(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let likes = like_repo::get_user_likes(&pool, user_id.0).await?;
    Ok(HttpResponse::Ok().json(likes))
}

/// Remove the caller's like from a post
/// DELETE /api/v1/like/{post_id}
pub async fn delete_like(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let deleted = like_repo::delete_like(&pool, user_id.0, *post_id).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
