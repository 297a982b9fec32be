/// Security module for authentication
/// Provides password hashing and JWT token management.
pub mod jwt;
pub mod password;

pub use jwt::{generate_token_pair, initialize_jwt_keys, validate_token, Claims, TokenResponse};
pub use password::{hash_password, verify_password};
