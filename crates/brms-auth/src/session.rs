//! Session management.

use crate::user::{Role, StoredUser, UserProfile};
use crate::AuthError;
use brms_commerce::checkout::BillingDetails;
use brms_commerce::ids::UserId;
use brms_storage::{KvStore, StorageError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Store key holding the logged-in user.
pub const SESSION_KEY: &str = "brms_user";

/// Session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live session: the stored record after it passed the expiry check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    record: StoredUser,
}

impl SessionContext {
    pub fn user_id(&self) -> &UserId {
        &self.record.profile.id
    }

    pub fn role(&self) -> Role {
        self.record.profile.role
    }

    pub fn profile(&self) -> &UserProfile {
        &self.record.profile
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.record.session_id.as_ref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.record.expires_at
    }

    /// Contact to pre-fill the checkout billing step with.
    pub fn billing_details(&self) -> BillingDetails {
        self.record.profile.billing_details()
    }

    /// Fail unless the user has at least `required`.
    pub fn require_role(&self, required: Role) -> Result<(), AuthError> {
        if self.role().has_permission(required) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions {
                required,
                actual: self.role(),
            })
        }
    }

    /// Get time until expiration. `None` for sessions that never expire.
    pub fn time_to_expiry(&self) -> Option<Duration> {
        self.record
            .expires_at
            .map(|at| (at - Utc::now()).max(Duration::zero()))
    }

    /// The record as stored.
    pub fn record(&self) -> &StoredUser {
        &self.record
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a login lasts. `None` never expires.
    pub duration: Option<Duration>,
}

impl SessionConfig {
    /// Default session duration: 7 days.
    pub const DEFAULT_DURATION_HOURS: i64 = 7 * 24;

    /// Build from a duration in hours; `0` disables expiry.
    pub fn from_hours(hours: i64) -> Self {
        Self {
            duration: (hours > 0).then(|| Duration::hours(hours)),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_hours(Self::DEFAULT_DURATION_HOURS)
    }
}

/// Owns the `brms_user` record: creates it on login, removes it on logout,
/// and enforces expiry on every read.
#[derive(Debug)]
pub struct SessionManager<S: KvStore> {
    store: S,
    config: SessionConfig,
}

impl<S: KvStore> SessionManager<S> {
    pub fn new(store: S, config: SessionConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Record a user the backend authenticated, replacing any current session.
    pub fn login(&self, profile: UserProfile) -> Result<SessionContext, AuthError> {
        profile.validate()?;

        let record = StoredUser {
            expires_at: self.config.duration.map(|d| Utc::now() + d),
            session_id: Some(SessionId::generate()),
            profile,
        };
        self.store.set(SESSION_KEY, &record)?;

        tracing::info!(
            user_id = %record.profile.id,
            role = record.profile.role.as_str(),
            "session started"
        );
        Ok(SessionContext { record })
    }

    /// End the current session. Returns `false` if nobody was logged in.
    pub fn logout(&self) -> Result<bool, AuthError> {
        let removed = self.store.delete(SESSION_KEY)?;
        if removed {
            tracing::info!("session ended");
        }
        Ok(removed)
    }

    /// The live session, if any.
    ///
    /// Expired or unreadable records are deleted and reported as absent.
    pub fn current(&self) -> Result<Option<SessionContext>, AuthError> {
        self.current_at(Utc::now())
    }

    /// [`current`](Self::current) evaluated at a given instant.
    pub fn current_at(&self, now: DateTime<Utc>) -> Result<Option<SessionContext>, AuthError> {
        match self.lookup_at(now)? {
            Lookup::Live(ctx) => Ok(Some(ctx)),
            Lookup::Expired | Lookup::Absent => Ok(None),
        }
    }

    /// The live session, or an error saying why there is none.
    pub fn require(&self) -> Result<SessionContext, AuthError> {
        self.require_at(Utc::now())
    }

    /// [`require`](Self::require) evaluated at a given instant.
    ///
    /// A record that expires here is deleted and reported as
    /// [`AuthError::SessionExpired`]; later calls see [`AuthError::NotLoggedIn`].
    pub fn require_at(&self, now: DateTime<Utc>) -> Result<SessionContext, AuthError> {
        match self.lookup_at(now)? {
            Lookup::Live(ctx) => Ok(ctx),
            Lookup::Expired => Err(AuthError::SessionExpired),
            Lookup::Absent => Err(AuthError::NotLoggedIn),
        }
    }

    /// Push the expiry of the current session out by the configured duration.
    pub fn extend(&self) -> Result<SessionContext, AuthError> {
        let mut ctx = self.require()?;
        ctx.record.expires_at = self.config.duration.map(|d| Utc::now() + d);
        self.store.set(SESSION_KEY, &ctx.record)?;
        tracing::debug!(user_id = %ctx.user_id(), "session extended");
        Ok(ctx)
    }

    fn lookup_at(&self, now: DateTime<Utc>) -> Result<Lookup, AuthError> {
        let record = match self.store.get::<StoredUser>(SESSION_KEY) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(Lookup::Absent),
            Err(StorageError::Serialize(e)) => {
                tracing::warn!(error = %e, "discarding malformed session record");
                self.store.delete(SESSION_KEY)?;
                return Ok(Lookup::Absent);
            }
            Err(e) => return Err(e.into()),
        };

        if record.is_expired_at(now) {
            tracing::warn!(user_id = %record.profile.id, "session expired");
            self.store.delete(SESSION_KEY)?;
            return Ok(Lookup::Expired);
        }

        Ok(Lookup::Live(SessionContext { record }))
    }
}

enum Lookup {
    Live(SessionContext),
    Expired,
    Absent,
}
