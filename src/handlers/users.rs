/// Profile handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::db::user_repo::{self, UpdateProfileFields};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::UserSummary;
use crate::services::ProfileService;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 50, message = "nickname must be at most 50 characters"))]
    pub nickname: Option<String>,
    #[validate(length(max = 100, message = "avatar must be at most 100 characters"))]
    pub avatar: Option<String>,
    #[validate(length(max = 200, message = "bio must be at most 200 characters"))]
    pub bio: Option<String>,
    #[validate(length(max = 50, message = "website must be at most 50 characters"))]
    pub website: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Profile page for a user as seen by the caller
/// GET /api/v1/users/{id}
pub async fn get_profile(
    pool: web::Data<PgPool>,
    user_id: UserId,
    subject_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = ProfileService::new((**pool).clone());
    match service.get_profile_view(*subject_id, user_id.0).await? {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Update the caller's own profile fields
/// PATCH /api/v1/users/{id}
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user_id: UserId,
    subject_id: web::Path<i64>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    if *subject_id != user_id.0 {
        return Err(AppError::Forbidden(
            "cannot update another user's profile".to_string(),
        ));
    }

    req.validate()?;

    let fields = UpdateProfileFields {
        nickname: req.nickname.clone(),
        avatar: req.avatar.clone(),
        bio: req.bio.clone(),
        website: req.website.clone(),
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
    };

    match user_repo::update_profile(&pool, user_id.0, &fields).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserSummary::from(user))),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_profile_bounds_are_enforced() {
        let req = UpdateProfileRequest {
            nickname: Some("x".repeat(51)),
            avatar: None,
            bio: None,
            website: None,
            first_name: None,
            last_name: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn partial_update_payload_deserializes() {
        let req: UpdateProfileRequest = serde_json::from_str(r#"{"bio": "hello"}"#).unwrap();
        assert_eq!(req.bio.as_deref(), Some("hello"));
        assert!(req.nickname.is_none());
        assert!(req.validate().is_ok());
    }
}
