//! User accounts and admin sign-in.

use crate::repository::UserRepository;
use crate::StoreError;
use chrono::Utc;
use mercurius_auth::{
    AuthError, AuthSession, Authenticator, NewUser, PasswordHasher, Role, SessionRegistry, User,
    UserDirectory,
};

/// Lets the authenticator look users up through any [`UserRepository`].
struct Directory<'r, R: UserRepository + ?Sized>(&'r R);

impl<R: UserRepository + ?Sized> UserDirectory for Directory<'_, R> {
    fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        self.0
            .find_by_username(username)
            .map_err(|e| AuthError::Store(e.to_string()))
    }
}

/// Result of [`UserService::setup_admin`].
#[derive(Debug, Clone)]
pub enum AdminSetup {
    /// A new admin account was stored.
    Created(User),
    /// An admin with that username was already there; nothing changed.
    Existing(User),
}

impl AdminSetup {
    pub fn user(&self) -> &User {
        match self {
            AdminSetup::Created(user) | AdminSetup::Existing(user) => user,
        }
    }

    pub fn created(&self) -> bool {
        matches!(self, AdminSetup::Created(_))
    }
}

/// Account management on top of a [`UserRepository`].
pub struct UserService<'r, R: UserRepository + ?Sized> {
    repo: &'r R,
    hasher: PasswordHasher,
}

impl<'r, R: UserRepository + ?Sized> UserService<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self {
            repo,
            hasher: PasswordHasher::default(),
        }
    }

    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Store a new account. Username and email must both be free.
    pub fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        self.hasher.validate_password(&input.password)?;
        if self.repo.find_by_username(&input.username)?.is_some() {
            return Err(AuthError::UserAlreadyExists(input.username).into());
        }
        if self.repo.find_by_email(&input.email)?.is_some() {
            return Err(AuthError::UserAlreadyExists(input.email).into());
        }

        let hash = self.hasher.hash(&input.password)?;
        let user = self.repo.insert_user(input.into_user(hash, Utc::now()))?;
        tracing::info!(username = %user.username, role = user.role.as_str(), "user created");
        Ok(user)
    }

    /// Create the admin account unless an admin with that username exists.
    pub fn setup_admin(&self, mut input: NewUser) -> Result<AdminSetup, StoreError> {
        if let Some(existing) = self.repo.find_by_username(&input.username)? {
            if existing.is_admin() {
                tracing::info!(username = %existing.username, "admin already exists");
                return Ok(AdminSetup::Existing(existing));
            }
        }
        input.role = Role::Admin;
        self.create_user(input).map(AdminSetup::Created)
    }

    pub fn change_password(&self, username: &str, new_password: &str) -> Result<User, StoreError> {
        self.hasher.validate_password(new_password)?;
        let mut user = self.find(username)?;
        user.set_password_hash(self.hasher.hash(new_password)?, Utc::now());
        let user = self.repo.replace_user(user)?;
        tracing::info!(username = %user.username, "password changed");
        Ok(user)
    }

    pub fn deactivate(&self, username: &str) -> Result<User, StoreError> {
        let mut user = self.find(username)?;
        user.deactivate(Utc::now());
        let user = self.repo.replace_user(user)?;
        tracing::info!(username = %user.username, "user deactivated");
        Ok(user)
    }

    /// Check credentials and open a session in `registry`.
    pub fn login(
        &self,
        registry: &SessionRegistry,
        username: &str,
        password: &str,
    ) -> Result<AuthSession, StoreError> {
        let directory = Directory(self.repo);
        let principal = Authenticator::new(&directory)
            .with_hasher(self.hasher.clone())
            .authorize(username, password)?;
        Ok(registry.open(principal)?)
    }

    fn find(&self, username: &str) -> Result<User, StoreError> {
        self.repo
            .find_by_username(username)?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()).into())
    }
}
