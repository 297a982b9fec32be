/// Comment service - comment lifecycle and comment view assembly
use std::collections::HashMap;

use sqlx::PgPool;

use crate::db::{comment_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentView};

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment on an existing post
    pub async fn create_comment(&self, post_id: i64, user_id: i64, text: &str) -> Result<Comment> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {} not found", post_id)));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, user_id, text).await?;
        Ok(comment)
    }

    /// Get one comment joined with its author
    pub async fn get_comment_view(&self, comment_id: i64) -> Result<Option<CommentView>> {
        let comment = match comment_repo::find_comment_by_id(&self.pool, comment_id).await? {
            Some(comment) => comment,
            None => return Ok(None),
        };

        let views = self.attach_authors(vec![comment]).await?;
        Ok(views.into_iter().next())
    }

    /// List comments newest first, joined with authors
    pub async fn list_comment_views(&self, limit: i64, offset: i64) -> Result<Vec<CommentView>> {
        let comments = comment_repo::list_comments(&self.pool, limit, offset).await?;
        self.attach_authors(comments).await
    }

    /// All comments on a post, newest first, joined with authors
    pub async fn get_post_comment_views(&self, post_id: i64) -> Result<Vec<CommentView>> {
        let comments = comment_repo::get_post_comments(&self.pool, post_id).await?;
        self.attach_authors(comments).await
    }

    /// Delete a comment owned by the viewer
    pub async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<bool> {
        let deleted = comment_repo::delete_comment(&self.pool, comment_id, user_id).await?;
        Ok(deleted)
    }

    /// Join a batch of comments with their authors, preserving order
    async fn attach_authors(&self, comments: Vec<Comment>) -> Result<Vec<CommentView>> {
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<i64> = comments.iter().map(|c| c.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<i64, _> = user_repo::find_user_summaries(&self.pool, &author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let views = comments
            .into_iter()
            .filter_map(|comment| {
                authors.get(&comment.user_id).cloned().map(|user| CommentView {
                    id: comment.id,
                    post_id: comment.post_id,
                    text: comment.text,
                    created_at: comment.created_at,
                    user,
                })
            })
            .collect();

        Ok(views)
    }
}
