//! Credential primitives: password hashing, username rules and session tokens.

pub mod password;
pub mod token;
pub mod username;

pub use password::{PasswordHash, hash_password, is_strong_password, verify_password};
pub use token::{IssuedToken, SessionClaims, TokenError, TokenService};
pub use username::{is_valid_username, normalize_username};
