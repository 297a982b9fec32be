/// Feed handler
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::middleware::UserId;
use crate::services::FeedService;

/// The caller's timeline: own posts plus posts from followed users
/// GET /api/v1/feed
pub async fn get_feed(
    pool: web::Data<PgPool>,
    user_id: UserId,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = query.clamped();

    tracing::debug!(user_id = user_id.0, limit, offset, "feed request");

    let service = FeedService::new((**pool).clone());
    let feed = service.get_feed(user_id.0, limit, offset).await?;

    Ok(HttpResponse::Ok().json(feed))
}
