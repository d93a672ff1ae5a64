//! Authentication module for Mercurius.
//!
//! Provides credential checks for the admin area, argon2 password hashing,
//! and in-memory admin sessions.

mod credentials;
mod error;
mod password;
mod session;
mod user;

pub use credentials::{Authenticator, Principal, UserDirectory};
pub use error::AuthError;
pub use password::PasswordHasher;
pub use session::{AuthSession, SessionConfig, SessionId, SessionRegistry};
pub use user::{NewUser, Role, User};
