//! Per-project issue reports.

use issuetrack_shared::models::report::{
    IssuesAssigneeCount, IssuesPriorityCount, IssuesReporterCount, IssuesStatusCount,
};
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::service::Service;

impl Service {
    pub async fn project_issues_status_report(
        &self,
        project_id: Uuid,
    ) -> ServiceResult<Vec<IssuesStatusCount>> {
        let project = self.run_store(self.repos.projects.get_project(project_id)).await?;
        Ok(self
            .run_store(self.repos.issues.issues_status_report(project.id))
            .await?)
    }

    pub async fn project_issues_priority_report(
        &self,
        project_id: Uuid,
    ) -> ServiceResult<Vec<IssuesPriorityCount>> {
        let project = self.run_store(self.repos.projects.get_project(project_id)).await?;
        Ok(self
            .run_store(self.repos.issues.issues_priority_report(project.id))
            .await?)
    }

    pub async fn project_issues_assignee_report(
        &self,
        project_id: Uuid,
    ) -> ServiceResult<Vec<IssuesAssigneeCount>> {
        let project = self.run_store(self.repos.projects.get_project(project_id)).await?;
        Ok(self
            .run_store(self.repos.issues.issues_assignee_report(project.id))
            .await?)
    }

    pub async fn project_issues_reporter_report(
        &self,
        project_id: Uuid,
    ) -> ServiceResult<Vec<IssuesReporterCount>> {
        let project = self.run_store(self.repos.projects.get_project(project_id)).await?;
        Ok(self
            .run_store(self.repos.issues.issues_reporter_report(project.id))
            .await?)
    }
}
