//! User types.

use crate::session::SessionId;
use crate::AuthError;
use brms_commerce::checkout::BillingDetails;
use brms_commerce::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Orders for themselves.
    #[default]
    Customer,
    /// Takes orders at tables.
    Waiter,
    /// Runs a business.
    Manager,
    /// Platform administrator.
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Customer, Role::Waiter, Role::Manager, Role::Admin];

    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Waiter => "waiter",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Check if this role has at least the given permission level.
    pub fn has_permission(&self, required: Role) -> bool {
        self.level() >= required.level()
    }

    /// Get permission level (higher = more permissions).
    pub fn level(&self) -> u8 {
        match self {
            Role::Customer => 0,
            Role::Waiter => 1,
            Role::Manager => 2,
            Role::Admin => 3,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| AuthError::UnknownRole(s.to_string()))
    }
}

/// What the backend tells us about a user after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub role: Role,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserProfile {
    pub fn new(
        id: impl Into<UserId>,
        role: Role,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    /// Set phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Billing contact for this user. The phone is blank if unknown.
    pub fn billing_details(&self) -> BillingDetails {
        BillingDetails::new(
            self.name.clone(),
            self.email.clone(),
            self.phone.clone().unwrap_or_default(),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), AuthError> {
        if self.id.as_str().trim().is_empty() {
            return Err(AuthError::IncompleteProfile("id"));
        }
        if self.name.trim().is_empty() {
            return Err(AuthError::IncompleteProfile("name"));
        }
        if self.email.trim().is_empty() {
            return Err(AuthError::IncompleteProfile("email"));
        }
        Ok(())
    }
}

/// The `brms_user` record: `{id, role, name, email, phone?, expiresAt?}`.
///
/// Records written by older clients carry only the first four fields and
/// never expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

impl StoredUser {
    /// Check if the record is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.has_permission(Role::Customer));
        assert!(Role::Manager.has_permission(Role::Waiter));
        assert!(!Role::Waiter.has_permission(Role::Manager));
        assert!(!Role::Manager.has_permission(Role::Admin));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("waiter".parse::<Role>().unwrap(), Role::Waiter);
        assert!(matches!(
            "chef".parse::<Role>(),
            Err(AuthError::UnknownRole(role)) if role == "chef"
        ));
    }

    #[test]
    fn test_minimal_record_parses() {
        let record: StoredUser = serde_json::from_value(json!({
            "id": "42",
            "role": "customer",
            "name": "Eric",
            "email": "eric@example.rw"
        }))
        .unwrap();
        assert_eq!(record.profile.role, Role::Customer);
        assert!(record.expires_at.is_none());
        assert!(!record.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_record_wire_shape() {
        let record = StoredUser {
            profile: UserProfile::new("7", Role::Waiter, "Grace", "grace@example.rw")
                .with_phone("+250788111222"),
            expires_at: Some("2026-01-01T00:00:00Z".parse().unwrap()),
            session_id: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["role"], "waiter");
        assert_eq!(value["phone"], "+250788111222");
        assert_eq!(value["expiresAt"], "2026-01-01T00:00:00Z");
        assert!(value.get("sessionId").is_none());
    }

    #[test]
    fn test_billing_details_from_profile() {
        let profile = UserProfile::new("7", Role::Customer, "Grace", "grace@example.rw");
        let billing = profile.billing_details();
        assert_eq!(billing.full_name, "Grace");
        assert_eq!(billing.phone, "");
    }
}
