/// Comment handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::middleware::UserId;
use crate::services::CommentService;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub post: i64,
    #[validate(length(min = 1, max = 140, message = "comment text must be 1-140 characters"))]
    pub text: String,
}

/// Comment on a post
/// POST /api/v1/comment
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service.create_comment(req.post, user_id.0, &req.text).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// List comments newest first
/// GET /api/v1/comment
pub async fn list_comments(
    pool: web::Data<PgPool>,
    _user_id: UserId,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = query.clamped();
    let service = CommentService::new((**pool).clone());
    let views = service.list_comment_views(limit, offset).await?;

    Ok(HttpResponse::Ok().json(views))
}

/// Get a comment by ID
/// GET /api/v1/comment/{id}
pub async fn get_comment(
    pool: web::Data<PgPool>,
    _user_id: UserId,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    match service.get_comment_view(*comment_id).await? {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a comment owned by the caller
/// DELETE /api/v1/comment/{id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let deleted = service.delete_comment(*comment_id, user_id.0).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_is_bounded() {
        let req = CreateCommentRequest {
            post: 1,
            text: "x".repeat(141),
        };
        assert!(req.validate().is_err());

        let req = CreateCommentRequest {
            post: 1,
            text: String::new(),
        };
        assert!(req.validate().is_err());

        let req = CreateCommentRequest {
            post: 1,
            text: "nice shot".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
