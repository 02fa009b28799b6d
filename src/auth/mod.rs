//! Accounts and request authentication.
//!
//! Split into three pieces: password hashing, signed session tokens,
//! and the axum middleware that checks bearer tokens on the way in.

pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::{optional_auth, require_auth, AuthUser};
pub use token::TokenService;
