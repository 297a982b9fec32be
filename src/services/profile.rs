/// Profile service - profile view assembly
///
/// Composes the subject's public fields with post previews, saved posts,
/// and the resolved follower/following lists, scoped to a viewer.
use sqlx::PgPool;

use crate::db::{follow_repo, post_repo, save_repo, user_repo};
use crate::error::Result;
use crate::models::ProfileView;

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the profile page for `subject_id` as seen by `viewer_id`.
    /// Returns None when the subject does not exist.
    pub async fn get_profile_view(
        &self,
        subject_id: i64,
        viewer_id: i64,
    ) -> Result<Option<ProfileView>> {
        let subject = match user_repo::find_user_by_id(&self.pool, subject_id).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let post_service = crate::services::PostService::new(self.pool.clone());

        let is_me = subject.id == viewer_id;
        let is_following = follow_repo::follow_exists(&self.pool, viewer_id, subject_id).await?;

        let post_count = post_repo::count_posts_by_user(&self.pool, subject_id).await?;
        let own_posts = post_repo::find_posts_by_user(&self.pool, subject_id).await?;
        let posts = post_service.build_previews(&own_posts).await?;

        // saves -> post ids -> posts, newest first
        let saved_ids: Vec<i64> = save_repo::get_user_saves(&self.pool, subject_id)
            .await?
            .into_iter()
            .map(|s| s.post_id)
            .collect();
        let saved = post_repo::find_posts_by_ids(&self.pool, &saved_ids).await?;
        let saved_posts = post_service.build_previews(&saved).await?;

        let follower_ids = follow_repo::get_follower_ids(&self.pool, subject_id).await?;
        let followers = user_repo::find_user_summaries(&self.pool, &follower_ids).await?;
        let following_ids = follow_repo::get_following_ids(&self.pool, subject_id).await?;
        let following = user_repo::find_user_summaries(&self.pool, &following_ids).await?;

        let followers_count = follow_repo::count_followers(&self.pool, subject_id).await?;
        let following_count = follow_repo::count_following(&self.pool, subject_id).await?;

        Ok(Some(ProfileView {
            id: subject.id,
            nickname: subject.nickname,
            avatar: subject.avatar,
            bio: subject.bio,
            website: subject.website,
            first_name: subject.first_name,
            last_name: subject.last_name,
            is_me,
            is_following,
            post_count,
            posts,
            saved_posts,
            followers,
            following,
            followers_count,
            following_count,
        }))
    }
}
