/// Follow handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct CreateFollowRequest {
    pub following: i64,
}

/// Follow a user; duplicates get 409, self-follow gets 400
/// POST /api/v1/follow
pub async fn create_follow(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreateFollowRequest>,
) -> Result<HttpResponse> {
    if req.following == user_id.0 {
        return Err(AppError::BadRequest("cannot follow yourself".to_string()));
    }

    if user_repo::find_user_by_id(&pool, req.following).await?.is_none() {
        return Err(AppError::NotFound(format!("user {} not found", req.following)));
    }

    let follow = follow_repo::create_follow(&pool, user_id.0, req.following)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("already following".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(follow))
}

/// List the caller's outgoing follow edges, newest first
/// GET /api/v1/follow
pub async fn list_follows(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let follows = follow_repo::get_following_edges(&pool, user_id.0).await?;
    Ok(HttpResponse::Ok().json(follows))
}

/// Unfollow, keyed by the followed user's id
/// DELETE /api/v1/follow/{following_id}
pub async fn delete_follow(
    pool: web::Data<PgPool>,
    user_id: UserId,
    following_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let deleted = follow_repo::delete_follow(&pool, user_id.0, *following_id).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
