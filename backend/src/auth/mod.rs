//! Authentication module
//!
//! Argon2 password hashing, HS256 access tokens, opaque refresh tokens and
//! the header checks that turn a request into an identity.

mod error;
pub mod gate;
mod jwt;
mod middleware;
mod password;
mod refresh_token;

pub use error::AuthError;
pub use gate::ApiKey;
pub use jwt::{Claims, JwtService, ISSUER};
pub use middleware::{AuthUser, BearerToken, WebhookCaller};
pub use password::PasswordService;
pub use refresh_token::{IssuedRefreshToken, RefreshTokenService};
