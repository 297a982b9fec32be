/// Authentication handlers - signup and login
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::{hash_password, jwt, verify_password};

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Username doubles as the account email
    #[validate(email(message = "username must be an email address"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 50, message = "nickname must be 1-50 characters"))]
    pub nickname: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login response: token pair plus the denormalized profile fields the
/// client renders without a second request.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub id: i64,
    pub nickname: String,
    pub avatar: String,
    pub first_name: String,
    pub last_name: String,
    pub website: Option<String>,
    pub bio: Option<String>,
}

impl LoginResponse {
    fn from_user(user: &User, pair: jwt::TokenResponse) -> Self {
        Self {
            access: pair.access_token,
            refresh: pair.refresh_token,
            id: user.id,
            nickname: user.nickname.clone(),
            avatar: user.avatar.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            website: user.website.clone(),
            bio: user.bio.clone(),
        }
    }
}

/// Create a user account
/// POST /api/v1/signup
pub async fn signup(
    pool: web::Data<PgPool>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let password_hash = hash_password(&req.password)?;

    let user = user_repo::create_user(&pool, &req.username, &password_hash, &req.nickname)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("user already exists".to_string())
            }
            other => other.into(),
        })?;

    let pair = jwt::generate_token_pair(user.id, &user.username, &user.nickname)?;

    tracing::info!(user_id = user.id, "user signed up");

    Ok(HttpResponse::Created().json(SignupResponse {
        id: user.id,
        username: user.username,
        nickname: user.nickname,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// Exchange credentials for a token pair
/// POST /api/v1/login
pub async fn login(pool: web::Data<PgPool>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    req.validate()?;

    let user = user_repo::find_user_by_username(&pool, &req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

    verify_password(&req.password, &user.password_hash)?;

    let pair = jwt::generate_token_pair(user.id, &user.username, &user.nickname)?;

    Ok(HttpResponse::Ok().json(LoginResponse::from_user(&user, pair)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_rejects_non_email_username() {
        let req = SignupRequest {
            username: "not-an-email".to_string(),
            password: "longenough1".to_string(),
            nickname: "nick".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn signup_rejects_short_password() {
        let req = SignupRequest {
            username: "a@example.com".to_string(),
            password: "short".to_string(),
            nickname: "nick".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn signup_accepts_valid_payload() {
        let req = SignupRequest {
            username: "a@example.com".to_string(),
            password: "longenough1".to_string(),
            nickname: "nick".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
