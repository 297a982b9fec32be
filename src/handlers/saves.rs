/// Save (bookmark) handlers
///
/// Same shape and keying convention as likes.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::{post_repo, save_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct CreateSaveRequest {
    pub post: i64,
}

/// Save a post; duplicate saves are rejected with 409
/// POST /api/v1/save
pub async fn create_save(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreateSaveRequest>,
) -> Result<HttpResponse> {
    if post_repo::find_post_by_id(&pool, req.post).await?.is_none() {
        return Err(AppError::NotFound(format!("post {} not found", req.post)));
    }

    let save = save_repo::create_save(&pool, user_id.0, req.post)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("already saved".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(save))
}

/// List the caller's saves, newest first
/// GET /api/v1/save
pub async fn list_saves(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let saves = save_repo::get_user_saves(&pool, user_id.0).await?;
    Ok(HttpResponse::Ok().json(saves))
}

/// Remove the caller's save from a post
/// DELETE /api/v1/save/{post_id}
pub async fn delete_save(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let deleted = save_repo::delete_save(&pool, user_id.0, *post_id).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
