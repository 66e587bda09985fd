//! Project membership pairs.
//!
//! A membership records that a user belongs to a project; the user's role
//! stays global on the account. The `(project_id, user_id)` pair is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMembership {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub added_on: DateTime<Utc>,
}

impl ProjectMembership {
    pub fn new(project_id: Uuid, user_id: Uuid) -> Self {
        ProjectMembership {
            project_id,
            user_id,
            added_on: Utc::now(),
        }
    }
}
