//! Authentication: bearer token extraction and JWT verification.

pub mod bearer;
pub mod jwt;
pub mod models;

pub use bearer::extract_bearer_token;
pub use jwt::{JwtService, TokenVerifier};
pub use models::JwtClaims;
