/// Feed service - timeline assembly
///
/// The feed is the union of posts authored by the viewer and by everyone
/// the viewer follows, newest first, rendered as full post views.
use sqlx::PgPool;

use crate::db::{follow_repo, post_repo};
use crate::error::Result;
use crate::models::FeedResponse;
use crate::services::PostService;

pub struct FeedService {
    pool: PgPool,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_feed(&self, viewer_id: i64, limit: i64, offset: i64) -> Result<FeedResponse> {
        let mut author_ids = follow_repo::get_following_ids(&self.pool, viewer_id).await?;
        author_ids.push(viewer_id);

        // Fetch one extra row to learn whether another page exists.
        let mut posts =
            post_repo::find_posts_by_authors(&self.pool, &author_ids, limit + 1, offset).await?;
        let has_more = posts.len() as i64 > limit;
        posts.truncate(limit as usize);

        let posts = PostService::new(self.pool.clone())
            .build_post_views(posts, viewer_id)
            .await?;

        Ok(FeedResponse { posts, has_more })
    }
}
