/// Data models for picshare-service
///
/// This module defines structures for:
/// - Persisted records: User, Post, PostFile, Comment, Like, Save, Follow
/// - Composed view models: PostView, PostPreview, ProfileView, FeedResponse
///
/// View models serialize in camelCase because the original web client consumes
/// `likesCount` / `isLiked` style fields.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nickname: String,
    pub avatar: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub caption: String,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PostFile {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Save {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Follow {
    pub id: i64,
    pub follower_id: i64,
    pub following_id: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================
// View models (aggregation layer output)
// ============================================

/// Public profile fields embedded in posts, comments, and follower lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub nickname: String,
    pub avatar: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname,
            avatar: user.avatar,
            bio: user.bio,
            website: user.website,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// A comment joined with its author's public fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// Full post payload scoped to a viewer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: i64,
    pub caption: String,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user: UserSummary,
    pub files: Vec<PostFile>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub comments: Vec<CommentView>,
    pub is_liked: bool,
    pub is_saved: bool,
}

/// Lightweight post payload for grids and search results.
///
/// No viewer-specific fields; listings do not need them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostPreview {
    pub id: i64,
    pub likes_count: i64,
    pub comments_count: i64,
    pub files: Vec<PostFile>,
}

/// Profile page payload scoped to a viewer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: i64,
    pub nickname: String,
    pub avatar: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub is_me: bool,
    pub is_following: bool,
    pub post_count: i64,
    pub posts: Vec<PostPreview>,
    pub saved_posts: Vec<PostPreview>,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
    pub followers_count: i64,
    pub following_count: i64,
}

/// Paginated feed payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub posts: Vec<PostView>,
    pub has_more: bool,
}
