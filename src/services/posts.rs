/// Post service - post lifecycle and post view assembly
use std::collections::HashMap;

use sqlx::PgPool;

use crate::db::{comment_repo, like_repo, post_repo, save_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Post, PostPreview, PostView, UserSummary};
use crate::services::comments::CommentService;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post with zero or more attached files as one unit of work.
    /// If any file insert fails the whole creation rolls back.
    pub async fn create_post(
        &self,
        user_id: i64,
        caption: &str,
        tags: Option<&str>,
        file_urls: &[String],
    ) -> Result<Post> {
        let mut tx = self.pool.begin().await?;

        let post = post_repo::insert_post(&mut tx, user_id, caption, tags).await?;

        for url in file_urls {
            post_repo::insert_post_file(&mut tx, post.id, user_id, url).await?;
        }

        tx.commit().await?;

        tracing::info!(post_id = post.id, user_id, files = file_urls.len(), "post created");

        Ok(post)
    }

    /// Delete a post owned by the viewer; cascades to files, comments,
    /// likes and saves through the schema.
    pub async fn delete_post(&self, post_id: i64, user_id: i64) -> Result<bool> {
        let deleted = post_repo::delete_post(&self.pool, post_id, user_id).await?;
        if deleted {
            tracing::info!(post_id, user_id, "post deleted");
        }
        Ok(deleted)
    }

    /// Full post payload for a viewer
    pub async fn get_post_view(&self, post_id: i64, viewer_id: i64) -> Result<Option<PostView>> {
        let post = match post_repo::find_post_by_id(&self.pool, post_id).await? {
            Some(post) => post,
            None => return Ok(None),
        };

        Ok(Some(self.build_post_view(post, viewer_id).await?))
    }

    /// List all posts as full views, newest first
    pub async fn list_post_views(
        &self,
        viewer_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostView>> {
        let posts = post_repo::list_posts(&self.pool, limit, offset).await?;
        self.build_post_views(posts, viewer_id).await
    }

    /// Search captions and tags, returning previews newest first
    pub async fn search_previews(
        &self,
        term: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostPreview>> {
        let posts = post_repo::search_posts(&self.pool, term, limit, offset).await?;
        self.build_previews(&posts).await
    }

    /// Compose one post view: author, files, counts, comments, viewer flags
    pub async fn build_post_view(&self, post: Post, viewer_id: i64) -> Result<PostView> {
        let author = user_repo::find_user_by_id(&self.pool, post.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", post.user_id)))?;

        let files = post_repo::get_post_files(&self.pool, post.id).await?;
        let likes_count = like_repo::count_likes_by_post(&self.pool, post.id).await?;
        let comments_count = comment_repo::count_comments_by_post(&self.pool, post.id).await?;
        let comments = CommentService::new(self.pool.clone())
            .get_post_comment_views(post.id)
            .await?;
        let is_liked = like_repo::like_exists(&self.pool, viewer_id, post.id).await?;
        let is_saved = save_repo::save_exists(&self.pool, viewer_id, post.id).await?;

        Ok(PostView {
            id: post.id,
            caption: post.caption,
            tags: post.tags,
            created_at: post.created_at,
            user: UserSummary::from(author),
            files,
            likes_count,
            comments_count,
            comments,
            is_liked,
            is_saved,
        })
    }

    /// Compose full views for a page of posts, preserving input order
    pub async fn build_post_views(&self, posts: Vec<Post>, viewer_id: i64) -> Result<Vec<PostView>> {
        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(self.build_post_view(post, viewer_id).await?);
        }
        Ok(views)
    }

    /// Compose previews for a list of posts with batched count/file queries,
    /// preserving input order
    pub async fn build_previews(&self, posts: &[Post]) -> Result<Vec<PostPreview>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();

        let like_counts: HashMap<i64, i64> = like_repo::count_likes_batch(&self.pool, &post_ids)
            .await?
            .into_iter()
            .collect();
        let comment_counts: HashMap<i64, i64> =
            comment_repo::count_comments_batch(&self.pool, &post_ids)
                .await?
                .into_iter()
                .collect();

        let mut files_by_post: HashMap<i64, Vec<_>> = HashMap::new();
        for file in post_repo::get_post_files_batch(&self.pool, &post_ids).await? {
            files_by_post.entry(file.post_id).or_default().push(file);
        }

        let previews = posts
            .iter()
            .map(|post| PostPreview {
                id: post.id,
                likes_count: like_counts.get(&post.id).copied().unwrap_or(0),
                comments_count: comment_counts.get(&post.id).copied().unwrap_or(0),
                files: files_by_post.remove(&post.id).unwrap_or_default(),
            })
            .collect();

        Ok(previews)
    }
}
