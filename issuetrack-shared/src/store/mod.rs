//! The store contract every entity repository must honor.
//!
//! One trait per aggregate root (`User`, `Project`, `Issue`, `Token`),
//! composed into the domain service by constructor injection. Every
//! implementation must report exactly the error kinds in [`StoreError`]:
//! `update` distinguishes a stale version (`EditConflict`) from an ordinary
//! miss (`NotFound`), `create` distinguishes a uniqueness violation
//! (`DuplicateKey`), and an aborted caller deadline surfaces as `Canceled`
//! rather than a generic failure. Anything else travels through `Other`.
//!
//! The optimistic-concurrency protocol: `update` atomically verifies that
//! the stored version equals the supplied one, writes the new field values,
//! bumps the version by exactly one and refreshes the modification
//! timestamp. A mismatch — or a row that vanished — is an `EditConflict`,
//! never a silent merge.

pub mod memory;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::filters::{Filters, Metadata};
use crate::models::issue::{Issue, IssuePriority, IssueStatus};
use crate::models::membership::ProjectMembership;
use crate::models::project::Project;
use crate::models::report::{
    IssuesAssigneeCount, IssuesPriorityCount, IssuesReporterCount, IssuesStatusCount,
};
use crate::models::token::{Token, TokenScope};
use crate::models::user::{Role, User};

/// Error kinds a repository may report.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint was violated on create or update.
    #[error("duplicate key")]
    DuplicateKey,

    /// The supplied version no longer matches the stored one, or the row
    /// vanished between read and write.
    #[error("edit conflict")]
    EditConflict,

    /// The caller's deadline elapsed and the in-flight call was aborted.
    #[error("operation canceled")]
    Canceled,

    /// Escape hatch for unclassified failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Entity-specific filter fields for user listings.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring match.
    pub name: Option<String>,
    /// Case-insensitive exact match.
    pub email: Option<String>,
    pub role: Option<Role>,
}

/// Entity-specific filter fields for project listings.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive substring match.
    pub name: Option<String>,
    pub assigned_to: Option<Uuid>,
}

/// Entity-specific filter fields for issue listings.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Case-insensitive substring match.
    pub title: Option<String>,
    pub project_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub reported_date: Option<NaiveDate>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, StoreError>;
    async fn get_user(&self, id: Uuid) -> Result<User, StoreError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;
    /// Resolves the user behind an unexpired token with the given scope and
    /// hash. Expired, mismatched or unknown tokens are all a `NotFound`.
    async fn get_user_for_token(
        &self,
        scope: TokenScope,
        token_hash: &[u8],
    ) -> Result<User, StoreError>;
    async fn get_all_users(
        &self,
        filter: UserFilter,
        filters: &Filters,
    ) -> Result<(Vec<User>, Metadata), StoreError>;
    async fn update_user(&self, user: User) -> Result<User, StoreError>;
    /// Deletes a user and cascades: memberships are removed and project and
    /// issue assignments referencing the user are cleared.
    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_project(&self, project: Project) -> Result<Project, StoreError>;
    async fn get_project(&self, id: Uuid) -> Result<Project, StoreError>;
    async fn get_all_projects(
        &self,
        filter: ProjectFilter,
        filters: &Filters,
    ) -> Result<(Vec<Project>, Metadata), StoreError>;
    async fn update_project(&self, project: Project) -> Result<Project, StoreError>;
    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError>;

    /// Records project membership; an existing pair is a `DuplicateKey`.
    async fn assign_user_to_project(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<ProjectMembership, StoreError>;
    /// The user, provided they are a member of the project.
    async fn get_project_user(&self, project_id: Uuid, user_id: Uuid)
        -> Result<User, StoreError>;
    async fn get_project_users(
        &self,
        project_id: Uuid,
        role: Option<Role>,
        filters: &Filters,
    ) -> Result<(Vec<User>, Metadata), StoreError>;
    async fn get_all_projects_for_user(
        &self,
        user_id: Uuid,
        filters: &Filters,
    ) -> Result<(Vec<Project>, Metadata), StoreError>;
}

#[async_trait]
pub trait IssueRepository: Send + Sync {
    async fn create_issue(&self, issue: Issue) -> Result<Issue, StoreError>;
    async fn get_issue(&self, id: Uuid) -> Result<Issue, StoreError>;
    async fn get_all_issues(
        &self,
        filter: IssueFilter,
        filters: &Filters,
    ) -> Result<(Vec<Issue>, Metadata), StoreError>;
    async fn update_issue(&self, issue: Issue) -> Result<Issue, StoreError>;
    async fn delete_issue(&self, id: Uuid) -> Result<(), StoreError>;

    async fn issues_status_report(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<IssuesStatusCount>, StoreError>;
    async fn issues_priority_report(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<IssuesPriorityCount>, StoreError>;
    async fn issues_assignee_report(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<IssuesAssigneeCount>, StoreError>;
    async fn issues_reporter_report(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<IssuesReporterCount>, StoreError>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Generates and persists a token for `user_id`, returning it with the
    /// plaintext still attached. The plaintext is never stored.
    async fn create_token(
        &self,
        user_id: Uuid,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<Token, StoreError>;
    async fn delete_all_tokens_for_user(
        &self,
        scope: TokenScope,
        user_id: Uuid,
    ) -> Result<(), StoreError>;
}
