//! In-memory store adapter.
//!
//! Implements all four repository traits behind a single mutex. Used by the
//! test suites and as a development fixture; it mirrors the semantics the
//! SQL store is expected to have (case-insensitive unique emails, unique
//! project names, version-checked updates, token lookup by hash with scope
//! and expiry, user-deletion cascades).
//!
//! Lock hold time per call is short and nothing is awaited while the lock
//! is held.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{
    IssueFilter, IssueRepository, ProjectFilter, ProjectRepository, StoreError, TokenRepository,
    UserFilter, UserRepository,
};
use crate::filters::{Filters, Metadata, SortDirection};
use crate::models::issue::Issue;
use crate::models::membership::ProjectMembership;
use crate::models::project::Project;
use crate::models::report::{
    IssuesAssigneeCount, IssuesPriorityCount, IssuesReporterCount, IssuesStatusCount,
};
use crate::models::token::{Token, TokenScope};
use crate::models::user::{Role, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    projects: HashMap<Uuid, Project>,
    issues: HashMap<Uuid, Issue>,
    memberships: Vec<ProjectMembership>,
    tokens: Vec<Token>,
}

/// Mutexed in-memory tables implementing every repository trait.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Applies the pagination window and computes metadata from the full count.
fn paginate<T>(items: Vec<T>, filters: &Filters) -> (Vec<T>, Metadata) {
    let total = items.len() as i64;
    let metadata = Metadata::calculate(total, filters.page, filters.page_size);
    let start = filters.offset().min(total) as usize;
    let window = items
        .into_iter()
        .skip(start)
        .take(filters.limit() as usize)
        .collect();
    (window, metadata)
}

fn sort_users(users: &mut Vec<User>, filters: &Filters) {
    match filters.sort_column() {
        "name" => users.sort_by(|a, b| a.name.cmp(&b.name)),
        "email" => users.sort_by(|a, b| a.email.cmp(&b.email)),
        "role" => users.sort_by(|a, b| a.role.as_str().cmp(b.role.as_str())),
        _ => users.sort_by_key(|u| u.id),
    }
    if filters.sort_direction() == SortDirection::Descending {
        users.reverse();
    }
}

fn sort_projects(projects: &mut Vec<Project>, filters: &Filters) {
    match filters.sort_column() {
        "name" => projects.sort_by(|a, b| a.name.cmp(&b.name)),
        "start_date" => projects.sort_by_key(|p| p.start_date),
        "target_end_date" => projects.sort_by_key(|p| p.target_end_date),
        _ => projects.sort_by_key(|p| p.id),
    }
    if filters.sort_direction() == SortDirection::Descending {
        projects.reverse();
    }
}

fn sort_issues(issues: &mut Vec<Issue>, filters: &Filters) {
    match filters.sort_column() {
        "title" => issues.sort_by(|a, b| a.title.cmp(&b.title)),
        "status" => issues.sort_by_key(|i| i.status),
        "priority" => issues.sort_by_key(|i| i.priority),
        "reported_date" => issues.sort_by_key(|i| i.reported_date),
        "target_resolution_date" => issues.sort_by_key(|i| i.target_resolution_date),
        _ => issues.sort_by_key(|i| i.id),
    }
    if filters.sort_direction() == SortDirection::Descending {
        issues.reverse();
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::DuplicateKey);
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_for_token(
        &self,
        scope: TokenScope,
        token_hash: &[u8],
    ) -> Result<User, StoreError> {
        let tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let token = tables
            .tokens
            .iter()
            .find(|t| t.scope == scope && t.hash == token_hash && t.expiry > now)
            .ok_or(StoreError::NotFound)?;
        tables
            .users
            .get(&token.user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_all_users(
        &self,
        filter: UserFilter,
        filters: &Filters,
    ) -> Result<(Vec<User>, Metadata), StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| {
                filter
                    .name
                    .as_ref()
                    .map_or(true, |n| u.name.to_lowercase().contains(&n.to_lowercase()))
                    && filter
                        .email
                        .as_ref()
                        .map_or(true, |e| u.email.eq_ignore_ascii_case(e))
                    && filter.role.map_or(true, |r| u.role == r)
            })
            .cloned()
            .collect();
        drop(tables);
        sort_users(&mut users, filters);
        Ok(paginate(users, filters))
    }

    async fn update_user(&self, user: User) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::DuplicateKey);
        }
        match tables.users.get(&user.id) {
            Some(current) if current.version == user.version => {}
            _ => return Err(StoreError::EditConflict),
        }
        let mut updated = user;
        updated.version += 1;
        updated.modified_on = Utc::now();
        tables.users.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        tables.memberships.retain(|m| m.user_id != id);
        tables.tokens.retain(|t| t.user_id != id);
        for project in tables.projects.values_mut() {
            if project.assigned_to == Some(id) {
                project.assigned_to = None;
            }
        }
        for issue in tables.issues.values_mut() {
            if issue.assigned_to == Some(id) {
                issue.assigned_to = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn create_project(&self, project: Project) -> Result<Project, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.projects.values().any(|p| p.name == project.name) {
            return Err(StoreError::DuplicateKey);
        }
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> Result<Project, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables
            .projects
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_all_projects(
        &self,
        filter: ProjectFilter,
        filters: &Filters,
    ) -> Result<(Vec<Project>, Metadata), StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut projects: Vec<Project> = tables
            .projects
            .values()
            .filter(|p| {
                filter
                    .name
                    .as_ref()
                    .map_or(true, |n| p.name.to_lowercase().contains(&n.to_lowercase()))
                    && filter.assigned_to.map_or(true, |id| p.assigned_to == Some(id))
            })
            .cloned()
            .collect();
        drop(tables);
        sort_projects(&mut projects, filters);
        Ok(paginate(projects, filters))
    }

    async fn update_project(&self, project: Project) -> Result<Project, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .projects
            .values()
            .any(|p| p.id != project.id && p.name == project.name)
        {
            return Err(StoreError::DuplicateKey);
        }
        match tables.projects.get(&project.id) {
            Some(current) if current.version == project.version => {}
            _ => return Err(StoreError::EditConflict),
        }
        let mut updated = project;
        updated.version += 1;
        updated.modified_on = Utc::now();
        tables.projects.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.projects.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        tables.memberships.retain(|m| m.project_id != id);
        tables.issues.retain(|_, issue| issue.project_id != id);
        Ok(())
    }

    async fn assign_user_to_project(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<ProjectMembership, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.projects.contains_key(&project_id) || !tables.users.contains_key(&user_id) {
            return Err(StoreError::NotFound);
        }
        if tables
            .memberships
            .iter()
            .any(|m| m.project_id == project_id && m.user_id == user_id)
        {
            return Err(StoreError::DuplicateKey);
        }
        let membership = ProjectMembership::new(project_id, user_id);
        tables.memberships.push(membership.clone());
        Ok(membership)
    }

    async fn get_project_user(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<User, StoreError> {
        let tables = self.tables.lock().unwrap();
        if !tables
            .memberships
            .iter()
            .any(|m| m.project_id == project_id && m.user_id == user_id)
        {
            return Err(StoreError::NotFound);
        }
        tables
            .users
            .get(&user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_project_users(
        &self,
        project_id: Uuid,
        role: Option<Role>,
        filters: &Filters,
    ) -> Result<(Vec<User>, Metadata), StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut users: Vec<User> = tables
            .memberships
            .iter()
            .filter(|m| m.project_id == project_id)
            .filter_map(|m| tables.users.get(&m.user_id))
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect();
        drop(tables);
        sort_users(&mut users, filters);
        Ok(paginate(users, filters))
    }

    async fn get_all_projects_for_user(
        &self,
        user_id: Uuid,
        filters: &Filters,
    ) -> Result<(Vec<Project>, Metadata), StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut projects: Vec<Project> = tables
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| tables.projects.get(&m.project_id))
            .cloned()
            .collect();
        drop(tables);
        sort_projects(&mut projects, filters);
        Ok(paginate(projects, filters))
    }
}

#[async_trait]
impl IssueRepository for MemoryStore {
    async fn create_issue(&self, issue: Issue) -> Result<Issue, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.projects.contains_key(&issue.project_id) {
            return Err(StoreError::NotFound);
        }
        tables.issues.insert(issue.id, issue.clone());
        Ok(issue)
    }

    async fn get_issue(&self, id: Uuid) -> Result<Issue, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables.issues.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_all_issues(
        &self,
        filter: IssueFilter,
        filters: &Filters,
    ) -> Result<(Vec<Issue>, Metadata), StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut issues: Vec<Issue> = tables
            .issues
            .values()
            .filter(|i| {
                filter
                    .title
                    .as_ref()
                    .map_or(true, |t| i.title.to_lowercase().contains(&t.to_lowercase()))
                    && filter.project_id.map_or(true, |id| i.project_id == id)
                    && filter.assigned_to.map_or(true, |id| i.assigned_to == Some(id))
                    && filter.status.map_or(true, |s| i.status == s)
                    && filter.priority.map_or(true, |p| i.priority == p)
                    && filter.reported_date.map_or(true, |d| i.reported_date == d)
            })
            .cloned()
            .collect();
        drop(tables);
        sort_issues(&mut issues, filters);
        Ok(paginate(issues, filters))
    }

    async fn update_issue(&self, issue: Issue) -> Result<Issue, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.issues.get(&issue.id) {
            Some(current) if current.version == issue.version => {}
            _ => return Err(StoreError::EditConflict),
        }
        let mut updated = issue;
        updated.version += 1;
        updated.modified_on = Utc::now();
        tables.issues.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_issue(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.issues.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn issues_status_report(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<IssuesStatusCount>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut counts = HashMap::new();
        for issue in tables.issues.values().filter(|i| i.project_id == project_id) {
            *counts.entry(issue.status).or_insert(0i64) += 1;
        }
        let mut rows: Vec<IssuesStatusCount> = counts
            .into_iter()
            .map(|(status, issues_count)| IssuesStatusCount { status, issues_count })
            .collect();
        rows.sort_by_key(|r| r.status);
        Ok(rows)
    }

    async fn issues_priority_report(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<IssuesPriorityCount>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut counts = HashMap::new();
        for issue in tables.issues.values().filter(|i| i.project_id == project_id) {
            *counts.entry(issue.priority).or_insert(0i64) += 1;
        }
        let mut rows: Vec<IssuesPriorityCount> = counts
            .into_iter()
            .map(|(priority, issues_count)| IssuesPriorityCount { priority, issues_count })
            .collect();
        rows.sort_by_key(|r| r.priority);
        Ok(rows)
    }

    async fn issues_assignee_report(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<IssuesAssigneeCount>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for issue in tables.issues.values().filter(|i| i.project_id == project_id) {
            if let Some(assignee_id) = issue.assigned_to {
                *counts.entry(assignee_id).or_insert(0) += 1;
            }
        }
        let mut rows: Vec<IssuesAssigneeCount> = counts
            .into_iter()
            .map(|(assignee_id, issues_assigned)| IssuesAssigneeCount {
                assignee_id,
                assignee_name: tables
                    .users
                    .get(&assignee_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default(),
                issues_assigned,
            })
            .collect();
        rows.sort_by(|a, b| a.assignee_name.cmp(&b.assignee_name));
        Ok(rows)
    }

    async fn issues_reporter_report(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<IssuesReporterCount>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for issue in tables.issues.values().filter(|i| i.project_id == project_id) {
            *counts.entry(issue.reporter_id).or_insert(0) += 1;
        }
        let mut rows: Vec<IssuesReporterCount> = counts
            .into_iter()
            .map(|(reporter_id, issues_reported)| IssuesReporterCount {
                reporter_id,
                reporter_name: tables
                    .users
                    .get(&reporter_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default(),
                issues_reported,
            })
            .collect();
        rows.sort_by(|a, b| a.reporter_name.cmp(&b.reporter_name));
        Ok(rows)
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn create_token(
        &self,
        user_id: Uuid,
        ttl: Duration,
        scope: TokenScope,
    ) -> Result<Token, StoreError> {
        let token = Token::generate(user_id, ttl, scope);
        let mut tables = self.tables.lock().unwrap();
        let mut stored = token.clone();
        stored.plaintext = String::new();
        tables.tokens.push(stored);
        Ok(token)
    }

    async fn delete_all_tokens_for_user(
        &self,
        scope: TokenScope,
        user_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .tokens
            .retain(|t| !(t.scope == scope && t.user_id == user_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::issue::{IssuePriority, IssueStatus};
    use chrono::NaiveDate;

    const USER_SORT: &[&str] = &["id", "name", "email", "role", "-id", "-name", "-email", "-role"];

    fn user(name: &str, email: &str, role: Role) -> User {
        User::new(name, email, "$argon2id$stub".to_string(), role)
    }

    fn project(name: &str) -> Project {
        Project::new(
            name,
            "A perfectly ordinary project.",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store
            .create_user(user("Ada", "ada@example.com", Role::Member))
            .await
            .unwrap();
        let err = store
            .create_user(user("Other Ada", "ADA@example.com", Role::Member))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));
    }

    #[tokio::test]
    async fn test_update_stale_version_is_edit_conflict() {
        let store = MemoryStore::new();
        let created = store
            .create_user(user("Ada", "ada@example.com", Role::Member))
            .await
            .unwrap();

        // Two writers read the same version; the first one wins.
        let mut first = created.clone();
        first.name = "Ada L.".to_string();
        let mut second = created.clone();
        second.name = "Ada Lovelace".to_string();

        let winner = store.update_user(first).await.unwrap();
        assert_eq!(winner.version, created.version + 1);

        let err = store.update_user(second).await.unwrap_err();
        assert!(matches!(err, StoreError::EditConflict));

        // Only the winner's change is persisted.
        let stored = store.get_user(created.id).await.unwrap();
        assert_eq!(stored.name, "Ada L.");
        assert_eq!(stored.version, created.version + 1);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_edit_conflict() {
        let store = MemoryStore::new();
        let ghost = user("Ghost", "ghost@example.com", Role::Member);
        assert!(matches!(
            store.update_user(ghost).await.unwrap_err(),
            StoreError::EditConflict
        ));
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let store = MemoryStore::new();
        let lead = store
            .create_user(user("Lena", "lena@example.com", Role::Lead))
            .await
            .unwrap();
        let member = store
            .create_user(user("Miko", "miko@example.com", Role::Member))
            .await
            .unwrap();
        let mut p = project("Cascade check");
        p.assigned_to = Some(lead.id);
        let p = store.create_project(p).await.unwrap();
        store
            .assign_user_to_project(p.id, member.id)
            .await
            .unwrap();
        let mut issue = Issue::new(
            "Dangling reference",
            "Check assignment cleanup.",
            lead.id,
            p.id,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            IssuePriority::Low,
        );
        issue.assigned_to = Some(member.id);
        let issue = store.create_issue(issue).await.unwrap();

        store.delete_user(member.id).await.unwrap();

        assert!(matches!(
            store.get_project_user(p.id, member.id).await.unwrap_err(),
            StoreError::NotFound
        ));
        assert_eq!(store.get_issue(issue.id).await.unwrap().assigned_to, None);

        store.delete_user(lead.id).await.unwrap();
        assert_eq!(store.get_project(p.id).await.unwrap().assigned_to, None);
    }

    #[tokio::test]
    async fn test_token_redemption_requires_scope_hash_and_expiry() {
        let store = MemoryStore::new();
        let u = store
            .create_user(user("Tove", "tove@example.com", Role::Member))
            .await
            .unwrap();
        let token = store
            .create_token(u.id, Duration::days(3), TokenScope::Activation)
            .await
            .unwrap();

        let found = store
            .get_user_for_token(TokenScope::Activation, &Token::hash_plaintext(&token.plaintext))
            .await
            .unwrap();
        assert_eq!(found.id, u.id);

        // Forged plaintext misses.
        assert!(matches!(
            store
                .get_user_for_token(TokenScope::Activation, &Token::hash_plaintext(&"A".repeat(26)))
                .await
                .unwrap_err(),
            StoreError::NotFound
        ));

        // Expired token misses the same way.
        let expired = store
            .create_token(u.id, Duration::seconds(-1), TokenScope::Activation)
            .await
            .unwrap();
        assert!(matches!(
            store
                .get_user_for_token(
                    TokenScope::Activation,
                    &Token::hash_plaintext(&expired.plaintext)
                )
                .await
                .unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_token_plaintext_is_not_persisted() {
        let store = MemoryStore::new();
        let u = store
            .create_user(user("Tove", "tove@example.com", Role::Member))
            .await
            .unwrap();
        store
            .create_token(u.id, Duration::days(3), TokenScope::Activation)
            .await
            .unwrap();
        let tables = store.tables.lock().unwrap();
        assert!(tables.tokens.iter().all(|t| t.plaintext.is_empty()));
    }

    #[tokio::test]
    async fn test_listing_pagination_and_sort() {
        let store = MemoryStore::new();
        for (name, email) in [
            ("Casey", "casey@example.com"),
            ("Alex", "alex@example.com"),
            ("Blair", "blair@example.com"),
        ] {
            store.create_user(user(name, email, Role::Member)).await.unwrap();
        }

        let filters = Filters::new(1, 2, "name", USER_SORT);
        let (page, metadata) = store
            .get_all_users(UserFilter::default(), &filters)
            .await
            .unwrap();
        assert_eq!(
            page.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
            vec!["Alex", "Blair"]
        );
        assert_eq!(metadata.total_records, 3);
        assert_eq!(metadata.last_page, 2);

        let filters = Filters::new(2, 2, "-name", USER_SORT);
        let (page, _) = store
            .get_all_users(UserFilter::default(), &filters)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Alex");
    }

    #[tokio::test]
    async fn test_issue_reports_count_per_project() {
        let store = MemoryStore::new();
        let reporter = store
            .create_user(user("Remy", "remy@example.com", Role::Member))
            .await
            .unwrap();
        let p = store.create_project(project("Reporting")).await.unwrap();
        for (title, priority, resolved) in [
            ("First broken thing", IssuePriority::Low, false),
            ("Second broken thing", IssuePriority::High, false),
            ("Third broken thing", IssuePriority::High, true),
        ] {
            let mut issue = Issue::new(
                title,
                "Something is broken.",
                reporter.id,
                p.id,
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                priority,
            );
            if resolved {
                issue.status = IssueStatus::Closed;
            }
            store.create_issue(issue).await.unwrap();
        }

        let statuses = store.issues_status_report(p.id).await.unwrap();
        assert_eq!(
            statuses,
            vec![
                IssuesStatusCount { status: IssueStatus::Open, issues_count: 2 },
                IssuesStatusCount { status: IssueStatus::Closed, issues_count: 1 },
            ]
        );

        let priorities = store.issues_priority_report(p.id).await.unwrap();
        assert_eq!(
            priorities,
            vec![
                IssuesPriorityCount { priority: IssuePriority::Low, issues_count: 1 },
                IssuesPriorityCount { priority: IssuePriority::High, issues_count: 2 },
            ]
        );

        let reporters = store.issues_reporter_report(p.id).await.unwrap();
        assert_eq!(reporters.len(), 1);
        assert_eq!(reporters[0].issues_reported, 3);
        assert_eq!(reporters[0].reporter_name, "Remy");
    }
}
