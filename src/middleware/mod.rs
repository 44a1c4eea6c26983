pub mod jwt_auth;

pub use jwt_auth::{AuthClaims, JwtAuthMiddleware, UserId};
