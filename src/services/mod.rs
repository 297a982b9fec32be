/// Business logic layer
///
/// Services compose repository lookups into the view models the API
/// returns. All viewer-dependent fields (isLiked, isSaved, isMe,
/// isFollowing) are computed here, never stored.
pub mod comments;
pub mod feed;
pub mod posts;
pub mod profile;

pub use comments::CommentService;
pub use feed::FeedService;
pub use posts::PostService;
pub use profile::ProfileService;
