//! Admin sessions.

use crate::credentials::Principal;
use crate::user::Role;
use crate::AuthError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new cryptographically secure session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a session stays valid after sign-in.
    pub duration: Duration,
}

impl SessionConfig {
    /// Default session lifetime: 30 days.
    pub const DEFAULT_HOURS: i64 = 30 * 24;

    /// A lifetime of `hours`. Zero, negative and out-of-range values are rejected.
    pub fn hours(hours: i64) -> Result<Self, AuthError> {
        if hours <= 0 {
            return Err(AuthError::Config(format!(
                "session duration must be positive, got {} hours",
                hours
            )));
        }
        let duration = Duration::try_hours(hours).ok_or_else(|| {
            AuthError::Config(format!("session duration of {} hours is out of range", hours))
        })?;
        Ok(Self { duration })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::days(Self::DEFAULT_HOURS / 24),
        }
    }
}

/// An authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub id: SessionId,
    pub principal: Principal,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Start a session for a signed-in principal.
    pub fn start(
        principal: Principal,
        config: &SessionConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, AuthError> {
        let expires_at = now.checked_add_signed(config.duration).ok_or_else(|| {
            AuthError::Config("session expiry is past the supported date range".to_string())
        })?;
        Ok(Self {
            id: SessionId::generate(),
            principal,
            created_at: now,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Validate the session, returning error if expired.
    pub fn validate(&self) -> Result<(), AuthError> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.is_expired_at(now) {
            Err(AuthError::SessionExpired)
        } else {
            Ok(())
        }
    }

    /// Validate the session and check that it carries at least `role`.
    pub fn require_role(&self, role: Role) -> Result<&Principal, AuthError> {
        self.validate()?;
        if self.principal.role.has_permission(role) {
            Ok(&self.principal)
        } else {
            Err(AuthError::InsufficientPermissions)
        }
    }

    /// Time left before expiry, zero once expired.
    pub fn time_to_expiry(&self) -> Duration {
        (self.expires_at - Utc::now()).max(Duration::zero())
    }
}

/// In-memory table of live sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    config: SessionConfig,
    sessions: RwLock<HashMap<SessionId, AuthSession>>,
}

impl SessionRegistry {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Open a session for `principal` and keep it in the registry.
    pub fn open(&self, principal: Principal) -> Result<AuthSession, AuthError> {
        let session = AuthSession::start(principal, &self.config, Utc::now())?;
        self.write()?.insert(session.id.clone(), session.clone());
        tracing::debug!(session = %session.id, user = %session.principal.username, "session opened");
        Ok(session)
    }

    /// Look up a live session. Expired sessions are dropped on access.
    pub fn get(&self, id: &SessionId) -> Result<AuthSession, AuthError> {
        let session = self
            .read()?
            .get(id)
            .cloned()
            .ok_or(AuthError::SessionNotFound)?;
        if session.is_expired() {
            self.write()?.remove(id);
            return Err(AuthError::SessionExpired);
        }
        Ok(session)
    }

    /// Revoke a session. Returns whether it existed.
    pub fn revoke(&self, id: &SessionId) -> Result<bool, AuthError> {
        let removed = self.write()?.remove(id).is_some();
        if removed {
            tracing::debug!(session = %id, "session revoked");
        }
        Ok(removed)
    }

    /// Drop every session expired at `now`. Returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AuthError> {
        let mut sessions = self.write()?;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok(before - sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<SessionId, AuthSession>>, AuthError> {
        self.sessions
            .read()
            .map_err(|_| AuthError::Internal("session table lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<SessionId, AuthSession>>, AuthError> {
        self.sessions
            .write()
            .map_err(|_| AuthError::Internal("session table lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercurius_catalog::ids::UserId;

    fn principal(role: Role) -> Principal {
        Principal {
            id: UserId::new("u1"),
            username: "admin".into(),
            name: "Admin".into(),
            email: "admin@example.com".into(),
            role,
        }
    }

    #[test]
    fn test_session_id_generation() {
        let id1 = SessionId::generate();
        let id2 = SessionId::generate();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("sess_"));
        assert_eq!(id1.as_str().len(), 29);
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let config = SessionConfig::hours(1).unwrap();
        let session = AuthSession::start(principal(Role::Admin), &config, now).unwrap();
        assert!(session.validate_at(now).is_ok());
        assert!(matches!(
            session.validate_at(now + Duration::hours(2)),
            Err(AuthError::SessionExpired)
        ));
    }

    #[test]
    fn test_require_role() {
        let config = SessionConfig::default();
        let admin = AuthSession::start(principal(Role::Admin), &config, Utc::now()).unwrap();
        assert!(admin.require_role(Role::Admin).is_ok());

        let user = AuthSession::start(principal(Role::User), &config, Utc::now()).unwrap();
        assert!(user.require_role(Role::User).is_ok());
        assert!(user.require_role(Role::Admin).unwrap_err().is_permission_error());

        let long_ago = Utc::now() - Duration::days(31);
        let expired = AuthSession::start(principal(Role::Admin), &config, long_ago).unwrap();
        assert!(expired.require_role(Role::Admin).unwrap_err().is_auth_failure());
    }

    #[test]
    fn test_registry_lifecycle() {
        let registry = SessionRegistry::new(SessionConfig::default());
        let session = registry.open(principal(Role::Admin)).unwrap();
        assert_eq!(registry.get(&session.id).unwrap().principal.username, "admin");

        assert!(registry.revoke(&session.id).unwrap());
        assert!(!registry.revoke(&session.id).unwrap());
        assert!(matches!(registry.get(&session.id), Err(AuthError::SessionNotFound)));
    }

    #[test]
    fn test_registry_purge() {
        let registry = SessionRegistry::new(SessionConfig::hours(1).unwrap());
        registry.open(principal(Role::Admin)).unwrap();
        registry.open(principal(Role::User)).unwrap();
        assert_eq!(registry.purge_expired(Utc::now()).unwrap(), 0);
        assert_eq!(registry.purge_expired(Utc::now() + Duration::hours(2)).unwrap(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_session_duration_bounds() {
        assert_eq!(SessionConfig::hours(2).unwrap().duration, Duration::hours(2));
        assert!(matches!(SessionConfig::hours(0), Err(AuthError::Config(_))));
        assert!(matches!(SessionConfig::hours(-5), Err(AuthError::Config(_))));
        assert!(matches!(SessionConfig::hours(i64::MAX), Err(AuthError::Config(_))));
        assert_eq!(
            SessionConfig::default().duration,
            Duration::hours(SessionConfig::DEFAULT_HOURS)
        );
    }

    #[test]
    fn test_expiry_past_date_range_is_an_error() {
        let config = SessionConfig::hours(1_000_000_000_000).unwrap();
        let registry = SessionRegistry::new(config);
        assert!(matches!(
            registry.open(principal(Role::Admin)),
            Err(AuthError::Config(_))
        ));
        assert!(registry.is_empty());
    }
}
