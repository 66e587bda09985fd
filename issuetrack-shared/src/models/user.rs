//! User model and validation.
//!
//! Users carry one global role which both the permission table and the
//! assignment-eligibility rules key off. Passwords are stored as Argon2id
//! PHC strings, never in plaintext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{Validator, EMAIL_RX};

/// Global user role.
///
/// Hierarchy is not implicit: what a role may do is decided by the
/// permission table and by the explicit eligibility rules in the service
/// layer, never by comparing enum variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Lead,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Lead => "lead",
            Role::Member => "member",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "lead" => Ok(Role::Lead),
            "member" => Ok(Role::Member),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique across all users; matched case-insensitively.
    pub email: String,
    /// Argon2id PHC string.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    /// Set exactly once, by successful activation token redemption.
    pub activated: bool,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
    /// Bumped by one on every successful update.
    #[serde(skip_serializing, default)]
    pub version: i64,
}

impl User {
    /// Builds a fresh, unactivated account candidate.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: String,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash,
            role,
            activated: false,
            created_on: now,
            modified_on: now,
            version: 1,
        }
    }

    /// Runs every field rule against the fully materialized candidate,
    /// collecting all violations into `v`.
    pub fn validate(&self, v: &mut Validator) {
        v.check(!self.name.is_empty(), "name", "must be provided");
        v.check(self.name.len() >= 3, "name", "must not be less than 3 bytes long");
        v.check(self.name.len() <= 500, "name", "must not be more than 500 bytes long");
        validate_email(v, &self.email);
    }
}

pub fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    v.check(EMAIL_RX.is_match(email), "email", "must be a valid email address");
}

pub fn validate_password_plaintext(v: &mut Validator, password: &str) {
    v.check(!password.is_empty(), "password", "must be provided");
    v.check(password.len() >= 8, "password", "must be at least 8 bytes long");
    v.check(password.len() <= 72, "password", "must not be more than 72 bytes long");
}
