//! Username/password sign-in.

use crate::password::PasswordHasher;
use crate::user::{Role, User};
use crate::AuthError;
use mercurius_catalog::ids::UserId;
use serde::{Deserialize, Serialize};

/// Lookup of stored users by login name.
pub trait UserDirectory {
    fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;
}

/// The identity carried by a session after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Checks credentials against a [`UserDirectory`].
///
/// Every rejection surfaces as [`AuthError::InvalidCredentials`] so callers
/// cannot tell unknown users from wrong passwords; the reason is logged.
pub struct Authenticator<'a, D: UserDirectory + ?Sized> {
    directory: &'a D,
    hasher: PasswordHasher,
}

impl<'a, D: UserDirectory + ?Sized> Authenticator<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self {
            directory,
            hasher: PasswordHasher::default(),
        }
    }

    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn authorize(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        if username.is_empty() || password.is_empty() {
            tracing::warn!("sign-in rejected: empty credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let Some(user) = self.directory.find_by_username(username)? else {
            tracing::warn!(username, "sign-in rejected: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.active {
            tracing::warn!(username, "sign-in rejected: inactive user");
            return Err(AuthError::InvalidCredentials);
        }

        let valid = match self.hasher.verify(password, &user.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(username, error = %e, "stored password hash is unreadable");
                false
            }
        };
        if !valid {
            tracing::warn!(username, "sign-in rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(username, role = user.role.as_str(), "sign-in succeeded");
        Ok(Principal::from_user(&user))
    }
}
