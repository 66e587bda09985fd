//! Issue operations: CRUD, member assignment and the status state machine.

use chrono::{NaiveDate, Utc};
use issuetrack_notifier::{templates, Notification};
use issuetrack_shared::filters::{Filters, Metadata};
use issuetrack_shared::models::issue::{Issue, IssuePriority, IssueStatus};
use issuetrack_shared::models::user::{Role, User};
use issuetrack_shared::store::IssueFilter;
use issuetrack_shared::validate::Validator;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::service::Service;

/// Sort keys the issue listing accepts.
pub const ISSUE_SORT_SAFELIST: &[&str] = &[
    "id",
    "title",
    "status",
    "priority",
    "reported_date",
    "target_resolution_date",
    "-id",
    "-title",
    "-status",
    "-priority",
    "-reported_date",
    "-target_resolution_date",
];

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIssueInput {
    pub title: String,
    pub description: String,
    pub project_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub priority: Option<IssuePriority>,
    /// Defaults to today when omitted.
    pub reported_date: Option<NaiveDate>,
    pub target_resolution_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIssueInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub priority: Option<IssuePriority>,
    pub target_resolution_date: Option<NaiveDate>,
    pub progress: Option<String>,
    pub actual_resolution_date: Option<NaiveDate>,
    pub resolution_summary: Option<String>,
}

impl Service {
    /// Creates an issue reported by `reporter`. `open` is the only creation
    /// state; priority defaults to low. A requested assignee must be a
    /// member of the project and hold the member role.
    pub async fn create_issue(
        &self,
        input: CreateIssueInput,
        reporter: &User,
    ) -> ServiceResult<Issue> {
        let reported_date = input.reported_date.unwrap_or_else(|| Utc::now().date_naive());
        let mut issue = Issue::new(
            input.title,
            input.description,
            reporter.id,
            input.project_id,
            reported_date,
            input.target_resolution_date,
            input.priority.unwrap_or_default(),
        );
        let mut assignee = None;
        if let Some(assignee_id) = input.assigned_to {
            let member = self.member_candidate(issue.project_id, assignee_id).await?;
            issue.assigned_to = Some(member.id);
            assignee = Some(member);
        }
        let mut v = Validator::new();
        issue.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        let issue = self.run_store(self.repos.issues.create_issue(issue)).await?;
        if let Some(assignee) = assignee {
            self.notify_issue_assignment(&issue, &assignee);
        }
        tracing::info!(issue_id = %issue.id, project_id = %issue.project_id, "issue created");
        Ok(issue)
    }

    /// Fetch-then-check for issue assignment: the candidate must be a
    /// registered member of the project and hold the member role. Nothing
    /// is written when either check fails.
    async fn member_candidate(&self, project_id: Uuid, user_id: Uuid) -> ServiceResult<User> {
        let member = self
            .run_store(self.repos.projects.get_project_user(project_id, user_id))
            .await?;
        if member.role != Role::Member {
            return Err(ServiceError::InvalidRole);
        }
        Ok(member)
    }

    /// Assignment notifications fire only for assignees that passed the
    /// membership and role checks, never unconditionally.
    fn notify_issue_assignment(&self, issue: &Issue, assignee: &User) {
        self.notifier.dispatch(
            Notification::new(&assignee.email, templates::ISSUE_ASSIGN)
                .with("name", &assignee.name)
                .with("issueID", &issue.id.to_string())
                .with("issueTitle", &issue.title)
                .with("issuePriority", issue.priority.as_str()),
        );
    }

    pub async fn get_issue(&self, id: Uuid) -> ServiceResult<Issue> {
        Ok(self.run_store(self.repos.issues.get_issue(id)).await?)
    }

    pub async fn get_all_issues(
        &self,
        filter: IssueFilter,
        filters: Filters,
    ) -> ServiceResult<(Vec<Issue>, Metadata)> {
        let mut v = Validator::new();
        filters.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        Ok(self
            .run_store(self.repos.issues.get_all_issues(filter, &filters))
            .await?)
    }

    /// Updates an issue on behalf of `actor`.
    ///
    /// A member may update only issues they reported or are assigned to;
    /// the check runs before any field is touched. Supplying an actual
    /// resolution date is the single transition to `closed`; there is no
    /// reopen.
    pub async fn update_issue(
        &self,
        id: Uuid,
        input: UpdateIssueInput,
        actor: &User,
    ) -> ServiceResult<Issue> {
        let mut issue = self.run_store(self.repos.issues.get_issue(id)).await?;
        if actor.role == Role::Member
            && issue.reporter_id != actor.id
            && issue.assigned_to != Some(actor.id)
        {
            return Err(ServiceError::NotPermitted);
        }
        if let Some(title) = input.title {
            issue.title = title;
        }
        if let Some(description) = input.description {
            issue.description = description;
        }
        if let Some(priority) = input.priority {
            issue.priority = priority;
        }
        if let Some(target_resolution_date) = input.target_resolution_date {
            issue.target_resolution_date = target_resolution_date;
        }
        if let Some(progress) = input.progress {
            issue.progress = Some(progress);
        }
        if let Some(actual_resolution_date) = input.actual_resolution_date {
            issue.actual_resolution_date = Some(actual_resolution_date);
            issue.status = IssueStatus::Closed;
        }
        if let Some(resolution_summary) = input.resolution_summary {
            issue.resolution_summary = Some(resolution_summary);
        }
        let mut assignee = None;
        if let Some(assignee_id) = input.assigned_to {
            let member = self.member_candidate(issue.project_id, assignee_id).await?;
            issue.assigned_to = Some(member.id);
            assignee = Some(member);
        }
        let mut v = Validator::new();
        issue.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        let issue = self.run_store(self.repos.issues.update_issue(issue)).await?;
        if let Some(assignee) = assignee {
            self.notify_issue_assignment(&issue, &assignee);
        }
        Ok(issue)
    }

    pub async fn delete_issue(&self, id: Uuid) -> ServiceResult<()> {
        self.run_store(self.repos.issues.delete_issue(id)).await?;
        tracing::info!(issue_id = %id, "issue deleted");
        Ok(())
    }
}
