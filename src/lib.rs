/// Picshare Service Library
///
/// Backend for a photo-sharing social application: posts with attached
/// files, comments, likes, saves, follow edges, profile assembly, and a
/// reverse-chronological timeline over followed authors.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and payload types
/// - `models`: Persistence records and API view models
/// - `services`: Business logic and view-model assembly
/// - `db`: Database access layer and repositories
/// - `middleware`: JWT authentication and request timing middleware
/// - `security`: Token issuance/validation and password hashing
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
