/// HTTP handlers for picshare-service endpoints
///
/// Handlers authenticate the caller (via the JWT middleware's `UserId`
/// extractor), validate payloads, and delegate to the services and repos.
pub mod auth;
pub mod comments;
pub mod feed;
pub mod follows;
pub mod likes;
pub mod posts;
pub mod saves;
pub mod users;

pub use auth::{login, signup};
pub use comments::{create_comment, delete_comment, get_comment, list_comments};
pub use feed::get_feed;
pub use follows::{create_follow, delete_follow, list_follows};
pub use likes::{create_like, delete_like, list_likes};
pub use posts::{create_post, delete_post, get_post, list_posts, search_posts};
pub use saves::{create_save, delete_save, list_saves};
pub use users::{get_profile, update_profile};

use serde::Deserialize;

/// Pagination query parameters shared by list endpoints
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl PaginationParams {
    /// Clamp to sane bounds before handing to SQL
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, 100), self.offset.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.clamped(), (20, 0));
    }

    #[test]
    fn pagination_clamps_out_of_range_values() {
        let params = PaginationParams {
            limit: 5000,
            offset: -3,
        };
        assert_eq!(params.clamped(), (100, 0));

        let params = PaginationParams {
            limit: 0,
            offset: 10,
        };
        assert_eq!(params.clamped(), (1, 10));
    }
}
