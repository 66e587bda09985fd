//! Project operations: CRUD, lead assignment and membership.

use chrono::NaiveDate;
use issuetrack_shared::filters::{Filters, Metadata};
use issuetrack_shared::models::project::Project;
use issuetrack_shared::models::user::{Role, User};
use issuetrack_shared::store::{ProjectFilter, StoreError};
use issuetrack_shared::validate::Validator;
use issuetrack_notifier::{templates, Notification};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::service::Service;

/// Sort keys the project listing accepts.
pub const PROJECT_SORT_SAFELIST: &[&str] = &[
    "id",
    "name",
    "start_date",
    "target_end_date",
    "-id",
    "-name",
    "-start_date",
    "-target_end_date",
];

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: String,
    pub assigned_to: Option<Uuid>,
    pub start_date: NaiveDate,
    pub target_end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub target_end_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
}

impl Service {
    /// Creates a project. A requested assignee is fetched and checked
    /// before anything is written: projects may only be assigned to leads.
    pub async fn create_project(&self, input: CreateProjectInput) -> ServiceResult<Project> {
        let mut project = Project::new(
            input.name,
            input.description,
            input.start_date,
            input.target_end_date,
        );
        let mut assignee = None;
        if let Some(assignee_id) = input.assigned_to {
            let candidate = self.lead_candidate(assignee_id).await?;
            project.assigned_to = Some(candidate.id);
            assignee = Some(candidate);
        }
        let mut v = Validator::new();
        project.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        let project = match self
            .run_store(self.repos.projects.create_project(project))
            .await
        {
            Ok(project) => project,
            Err(StoreError::DuplicateKey) => {
                v.add_error("name", "a project with this name already exists");
                return Err(ServiceError::failed_validation(v));
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(assignee) = assignee {
            self.notify_project_assignment(&project, &assignee);
        }
        tracing::info!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// Fetch-then-check for project assignment: the candidate must exist
    /// and hold the lead role.
    async fn lead_candidate(&self, user_id: Uuid) -> ServiceResult<User> {
        let candidate = self.run_store(self.repos.users.get_user(user_id)).await?;
        if candidate.role != Role::Lead {
            return Err(ServiceError::InvalidRole);
        }
        Ok(candidate)
    }

    fn notify_project_assignment(&self, project: &Project, assignee: &User) {
        self.notifier.dispatch(
            Notification::new(&assignee.email, templates::PROJECT_ASSIGN)
                .with("name", &assignee.name)
                .with("projectID", &project.id.to_string())
                .with("projectName", &project.name),
        );
    }

    pub async fn get_project(&self, id: Uuid) -> ServiceResult<Project> {
        Ok(self.run_store(self.repos.projects.get_project(id)).await?)
    }

    pub async fn get_all_projects(
        &self,
        filter: ProjectFilter,
        filters: Filters,
    ) -> ServiceResult<(Vec<Project>, Metadata)> {
        let mut v = Validator::new();
        filters.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        Ok(self
            .run_store(self.repos.projects.get_all_projects(filter, &filters))
            .await?)
    }

    /// Updates a project on behalf of `actor`.
    ///
    /// Permission is checked before any field is touched: a lead may update
    /// a project only while it is assigned to them, and reassignment is
    /// reserved for managers and admins. A new assignee must hold the lead
    /// role.
    pub async fn update_project(
        &self,
        id: Uuid,
        input: UpdateProjectInput,
        actor: &User,
    ) -> ServiceResult<Project> {
        let mut project = self.run_store(self.repos.projects.get_project(id)).await?;
        if actor.role == Role::Lead && project.assigned_to != Some(actor.id) {
            return Err(ServiceError::NotPermitted);
        }
        let elevated = matches!(actor.role, Role::Manager | Role::Admin);
        if input.assigned_to.is_some() && !elevated {
            return Err(ServiceError::NotPermitted);
        }
        if let Some(name) = input.name {
            project.name = name;
        }
        if let Some(description) = input.description {
            project.description = description;
        }
        if let Some(start_date) = input.start_date {
            project.start_date = start_date;
        }
        if let Some(target_end_date) = input.target_end_date {
            project.target_end_date = target_end_date;
        }
        if let Some(actual_end_date) = input.actual_end_date {
            project.actual_end_date = Some(actual_end_date);
        }
        let mut assignee = None;
        if let Some(assignee_id) = input.assigned_to {
            let candidate = self.lead_candidate(assignee_id).await?;
            project.assigned_to = Some(candidate.id);
            assignee = Some(candidate);
        }
        let mut v = Validator::new();
        project.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        let project = match self
            .run_store(self.repos.projects.update_project(project))
            .await
        {
            Ok(project) => project,
            Err(StoreError::DuplicateKey) => {
                v.add_error("name", "a project with this name already exists");
                return Err(ServiceError::failed_validation(v));
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(assignee) = assignee {
            self.notify_project_assignment(&project, &assignee);
        }
        Ok(project)
    }

    pub async fn delete_project(&self, id: Uuid) -> ServiceResult<()> {
        self.run_store(self.repos.projects.delete_project(id)).await?;
        tracing::info!(project_id = %id, "project deleted");
        Ok(())
    }

    /// Registers a user as a member of a project. Only users with the
    /// member role are eligible.
    pub async fn assign_user_to_project(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> ServiceResult<()> {
        let user = self.run_store(self.repos.users.get_user(user_id)).await?;
        let project = self.run_store(self.repos.projects.get_project(project_id)).await?;
        if user.role != Role::Member {
            return Err(ServiceError::InvalidRole);
        }
        match self
            .run_store(self.repos.projects.assign_user_to_project(project.id, user.id))
            .await
        {
            Ok(_) => Ok(()),
            Err(StoreError::DuplicateKey) => {
                let mut v = Validator::new();
                v.add_error("user", "already assigned to this project");
                Err(ServiceError::failed_validation(v))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_project_user(&self, project_id: Uuid, user_id: Uuid) -> ServiceResult<User> {
        Ok(self
            .run_store(self.repos.projects.get_project_user(project_id, user_id))
            .await?)
    }

    pub async fn get_project_users(
        &self,
        project_id: Uuid,
        role: Option<Role>,
        filters: Filters,
    ) -> ServiceResult<(Vec<User>, Metadata)> {
        let mut v = Validator::new();
        filters.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        Ok(self
            .run_store(self.repos.projects.get_project_users(project_id, role, &filters))
            .await?)
    }

    pub async fn get_all_projects_for_user(
        &self,
        user_id: Uuid,
        filters: Filters,
    ) -> ServiceResult<(Vec<Project>, Metadata)> {
        let mut v = Validator::new();
        filters.validate(&mut v);
        if !v.valid() {
            return Err(ServiceError::failed_validation(v));
        }
        Ok(self
            .run_store(self.repos.projects.get_all_projects_for_user(user_id, &filters))
            .await?)
    }
}
