/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::{Validate, ValidationError};

use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::middleware::UserId;
use crate::services::PostService;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = 200, message = "caption must be at most 200 characters"))]
    pub caption: String,
    #[validate(length(max = 100, message = "tags must be at most 100 characters"))]
    pub tags: Option<String>,
    /// URLs of already-uploaded media; may be empty
    #[serde(default)]
    #[validate(custom(function = "validate_file_urls"))]
    pub files: Vec<String>,
}

// Bounds match the post_files.url column; a too-long URL must fail
// validation instead of reaching the insert.
fn validate_file_urls(files: &[String]) -> std::result::Result<(), ValidationError> {
    if files.iter().any(|url| url.is_empty() || url.len() > 200) {
        return Err(ValidationError::new("file_url")
            .with_message("file urls must be 1-200 characters".into()));
    }
    Ok(())
}

// Pagination fields are inlined (not flattened) because urlencoded
// deserialization of flattened numeric fields fails at runtime.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
    #[serde(default = "default_search_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_search_limit() -> i64 {
    20
}

/// Create a post with its attached files in one unit
/// POST /api/v1/post
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user_id.0, &req.caption, req.tags.as_deref(), &req.files)
        .await?;

    // Respond with the same camelCase view shape reads return.
    let view = service.build_post_view(post, user_id.0).await?;

    Ok(HttpResponse::Created().json(view))
}

/// List posts as full views, newest first
/// GET /api/v1/post
pub async fn list_posts(
    pool: web::Data<PgPool>,
    user_id: UserId,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = query.clamped();
    let service = PostService::new((**pool).clone());
    let views = service.list_post_views(user_id.0, limit, offset).await?;

    Ok(HttpResponse::Ok().json(views))
}

/// Get a post by ID as a full view
/// GET /api/v1/post/{id}
pub async fn get_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    match service.get_post_view(*post_id, user_id.0).await? {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a post owned by the caller
/// DELETE /api/v1/post/{id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let deleted = service.delete_post(*post_id, user_id.0).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Search captions and tags, returning previews
/// GET /api/v1/postsearch?search=...
pub async fn search_posts(
    pool: web::Data<PgPool>,
    _user_id: UserId,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = (query.limit.clamp(1, 100), query.offset.max(0));
    let service = PostService::new((**pool).clone());
    let previews = service.search_previews(&query.search, limit, offset).await?;

    Ok(HttpResponse::Ok().json(previews))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PostView, UserSummary};

    #[test]
    fn create_post_rejects_oversized_caption() {
        let req = CreatePostRequest {
            caption: "x".repeat(201),
            tags: None,
            files: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_post_accepts_empty_file_list() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"caption": "hello", "tags": "sunset"}"#).unwrap();
        assert!(req.files.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_post_rejects_oversized_file_url() {
        let req = CreatePostRequest {
            caption: "hello".to_string(),
            tags: None,
            files: vec!["https://cdn/a.jpg".to_string(), "x".repeat(201)],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_post_rejects_empty_file_url() {
        let req = CreatePostRequest {
            caption: "hello".to_string(),
            tags: None,
            files: vec![String::new()],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_post_accepts_urls_at_the_column_bound() {
        let req = CreatePostRequest {
            caption: "hello".to_string(),
            tags: None,
            files: vec!["x".repeat(200)],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn post_view_serializes_in_camel_case() {
        let view = PostView {
            id: 1,
            caption: "hello".to_string(),
            tags: None,
            created_at: chrono::Utc::now(),
            user: UserSummary {
                id: 2,
                nickname: "nick".to_string(),
                avatar: String::new(),
                bio: None,
                website: None,
                first_name: String::new(),
                last_name: String::new(),
            },
            files: vec![],
            likes_count: 0,
            comments_count: 0,
            comments: vec![],
            is_liked: false,
            is_saved: false,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("likesCount").is_some());
        assert!(json.get("isLiked").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("likes_count").is_none());
    }
}
