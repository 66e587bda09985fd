//! Role-based permission table.
//!
//! The table is a declarative `{role: {action: [resource, ...]}}` document
//! loaded once at startup: load, validate, freeze. Malformed input is a
//! construction error, which callers treat as fatal; after construction the
//! table is immutable, so roles or resources added to the source file become
//! visible only on process restart.
//!
//! Absence at any level is a deny, never an error.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::models::user::Role;

/// Resource names an action may touch.
pub type Resources = Vec<String>;
/// Action name to allowed resources.
pub type Actions = HashMap<String, Resources>;
/// Role name to allowed actions.
pub type Roles = HashMap<String, Actions>;

const KNOWN_ACTIONS: [&str; 4] = ["read", "create", "update", "delete"];

/// Immutable permission table.
#[derive(Debug, Clone)]
pub struct Authorizer {
    roles: Roles,
}

impl Authorizer {
    /// Validates and freezes a role table.
    ///
    /// # Errors
    ///
    /// Fails when a role declares an action outside
    /// read/create/update/delete.
    pub fn new(roles: Roles) -> anyhow::Result<Self> {
        for (role, actions) in &roles {
            for action in actions.keys() {
                if !KNOWN_ACTIONS.contains(&action.as_str()) {
                    anyhow::bail!("role {role:?} declares unknown action {action:?}");
                }
            }
        }
        Ok(Authorizer { roles })
    }

    /// Loads the permission table from a JSON document on disk.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading permission table {}", path.display()))?;
        let roles: Roles = serde_json::from_str(&raw)
            .with_context(|| format!("parsing permission table {}", path.display()))?;
        Self::new(roles)
    }

    /// Maps a transport verb to its canonical action name. Unmapped verbs
    /// yield the empty action, which matches nothing in the table.
    pub fn action_from_method(&self, method: &str) -> &'static str {
        match method {
            "GET" => "read",
            "POST" => "create",
            "PATCH" => "update",
            "DELETE" => "delete",
            _ => "",
        }
    }

    /// True iff `role` exists, `action` exists under it, and `resource` is in
    /// the associated set.
    pub fn has_permission(&self, role: Role, action: &str, resource: &str) -> bool {
        let Some(actions) = self.roles.get(role.as_str()) else {
            return false;
        };
        let Some(resources) = actions.get(action) else {
            return false;
        };
        resources.iter().any(|r| r == resource)
    }
}
