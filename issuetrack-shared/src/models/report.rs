//! Per-project issue report rows.

use serde::Serialize;
use uuid::Uuid;

use crate::models::issue::{IssuePriority, IssueStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesStatusCount {
    pub status: IssueStatus,
    pub issues_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesPriorityCount {
    pub priority: IssuePriority,
    pub issues_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesAssigneeCount {
    pub assignee_id: Uuid,
    pub assignee_name: String,
    pub issues_assigned: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesReporterCount {
    pub reporter_id: Uuid,
    pub reporter_name: String,
    pub issues_reported: i64,
}
