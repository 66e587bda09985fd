//! Issue model, state machine and validation.
//!
//! Issues are created open and reach `closed` exactly when an actual
//! resolution date is supplied on update. There is no reopen transition.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Closed,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::Closed => "closed",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IssuePriority {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl IssuePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuePriority::Low => "low",
            IssuePriority::Medium => "medium",
            IssuePriority::High => "high",
            IssuePriority::Critical => "critical",
        }
    }
}

/// Issue.
///
/// `assigned_to` may only reference a user who is a member of the issue's
/// project and holds the member role; the service layer enforces that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub reporter_id: Uuid,
    pub reported_date: NaiveDate,
    pub project_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub target_resolution_date: NaiveDate,
    pub progress: Option<String>,
    pub actual_resolution_date: Option<NaiveDate>,
    pub resolution_summary: Option<String>,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub version: i64,
}

impl Issue {
    /// Builds a fresh issue; `open` is the only creation state.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        reporter_id: Uuid,
        project_id: Uuid,
        reported_date: NaiveDate,
        target_resolution_date: NaiveDate,
        priority: IssuePriority,
    ) -> Self {
        let now = Utc::now();
        Issue {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            reporter_id,
            reported_date,
            project_id,
            assigned_to: None,
            status: IssueStatus::Open,
            priority,
            target_resolution_date,
            progress: None,
            actual_resolution_date: None,
            resolution_summary: None,
            created_on: now,
            modified_on: now,
            version: 1,
        }
    }

    /// Runs every field rule, collecting all violations into `v`.
    pub fn validate(&self, v: &mut Validator) {
        v.check(!self.title.is_empty(), "title", "must be provided");
        v.check(self.title.len() >= 5, "title", "must not be less than 5 bytes long");
        v.check(self.title.len() <= 500, "title", "must not be more than 500 bytes long");
        v.check(
            self.description.len() >= 5,
            "description",
            "must not be less than 5 bytes long",
        );
        v.check(
            self.description.len() <= 5000,
            "description",
            "must not be more than 5000 bytes long",
        );
        v.check(
            self.target_resolution_date > self.reported_date,
            "target_resolution_date",
            "must not be before reported date",
        );
        if let Some(progress) = &self.progress {
            v.check(progress.len() >= 5, "progress", "must not be less than 5 bytes long");
            v.check(
                progress.len() <= 1000,
                "progress",
                "must not be more than 1000 bytes long",
            );
        }
        if let Some(summary) = &self.resolution_summary {
            v.check(
                summary.len() >= 5,
                "resolution_summary",
                "must not be less than 5 bytes long",
            );
            v.check(
                summary.len() <= 1000,
                "resolution_summary",
                "must not be more than 1000 bytes long",
            );
        }
        if let Some(actual_resolution_date) = self.actual_resolution_date {
            v.check(
                actual_resolution_date > self.reported_date,
                "actual_resolution_date",
                "must not be before reported date",
            );
        }
    }
}
