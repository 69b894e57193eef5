//! Database repositories
//!
//! Provides the PostgreSQL data access layer used by `store::PgStore`.

pub mod chirp;
pub mod refresh_token;
pub mod user;

pub use chirp::{ChirpRecord, ChirpRepository};
pub use refresh_token::{RefreshTokenRecord, RefreshTokenRepository};
pub use user::{UserRecord, UserRepository};
