mod common;

use std::time::Duration;

use common::{date, harness, seed_user};
use issuetrack_service::projects::{
    CreateProjectInput, UpdateProjectInput, PROJECT_SORT_SAFELIST,
};
use issuetrack_service::ServiceError;
use issuetrack_shared::filters::Filters;
use issuetrack_shared::models::user::Role;
use issuetrack_shared::store::{ProjectFilter, ProjectRepository, StoreError};
use uuid::Uuid;

fn project_input(name: &str) -> CreateProjectInput {
    CreateProjectInput {
        name: name.to_string(),
        description: "Replace the legacy payment pipeline.".to_string(),
        assigned_to: None,
        start_date: date(2024, 1, 10),
        target_end_date: date(2024, 6, 30),
    }
}

fn default_filters() -> Filters {
    Filters::new(1, 20, "id", PROJECT_SORT_SAFELIST)
}

#[tokio::test]
async fn create_project_assigned_to_a_lead_succeeds_and_notifies() {
    let h = harness();
    let lead = seed_user(&h.store, "Lena Lead", "lena@example.com", Role::Lead).await;

    let mut input = project_input("Payment rework");
    input.assigned_to = Some(lead.id);
    let project = h.service.create_project(input).await.unwrap();
    assert_eq!(project.assigned_to, Some(lead.id));
    assert_eq!(project.version, 1);

    h.notifier.shutdown(Duration::from_secs(1)).await;
    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "lena@example.com");
    assert_eq!(sent[0].template, "project_assign");
    assert_eq!(
        sent[0].data.get("projectName").map(String::as_str),
        Some("Payment rework")
    );
}

#[tokio::test]
async fn create_project_assigned_to_a_member_is_invalid_role_and_persists_nothing() {
    let h = harness();
    let member = seed_user(&h.store, "Miko Member", "miko@example.com", Role::Member).await;

    let mut input = project_input("Payment rework");
    input.assigned_to = Some(member.id);
    assert!(matches!(
        h.service.create_project(input).await.unwrap_err(),
        ServiceError::InvalidRole
    ));

    let (projects, _) = h
        .service
        .get_all_projects(ProjectFilter::default(), default_filters())
        .await
        .unwrap();
    assert!(projects.is_empty());

    h.notifier.shutdown(Duration::from_secs(1)).await;
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn create_project_assigned_to_a_missing_user_is_not_found() {
    let h = harness();
    let mut input = project_input("Payment rework");
    input.assigned_to = Some(Uuid::new_v4());
    assert!(matches!(
        h.service.create_project(input).await.unwrap_err(),
        ServiceError::NotFound
    ));
}

#[tokio::test]
async fn create_project_name_of_four_bytes_cites_the_minimum() {
    let h = harness();
    match h
        .service
        .create_project(project_input("abcd"))
        .await
        .unwrap_err()
    {
        ServiceError::FailedValidation(errors) => {
            assert_eq!(
                errors.get("name"),
                Some("must not be less than 5 bytes long")
            );
        }
        other => panic!("expected FailedValidation, got {other:?}"),
    }
}

#[tokio::test]
async fn create_project_duplicate_name_cites_uniqueness() {
    let h = harness();
    h.service
        .create_project(project_input("Payment rework"))
        .await
        .unwrap();
    match h
        .service
        .create_project(project_input("Payment rework"))
        .await
        .unwrap_err()
    {
        ServiceError::FailedValidation(errors) => {
            assert_eq!(
                errors.get("name"),
                Some("a project with this name already exists")
            );
        }
        other => panic!("expected FailedValidation, got {other:?}"),
    }
}

#[tokio::test]
async fn create_project_target_end_before_start_is_rejected() {
    let h = harness();
    let mut input = project_input("Payment rework");
    input.target_end_date = date(2024, 1, 1);
    match h.service.create_project(input).await.unwrap_err() {
        ServiceError::FailedValidation(errors) => {
            assert_eq!(
                errors.get("target_end_date"),
                Some("must not be before start date")
            );
        }
        other => panic!("expected FailedValidation, got {other:?}"),
    }
}

#[tokio::test]
async fn a_lead_may_update_only_their_own_project() {
    let h = harness();
    let owner = seed_user(&h.store, "Lena Lead", "lena@example.com", Role::Lead).await;
    let other = seed_user(&h.store, "Olin Lead", "olin@example.com", Role::Lead).await;

    let mut input = project_input("Payment rework");
    input.assigned_to = Some(owner.id);
    let project = h.service.create_project(input).await.unwrap();

    // A lead the project is not assigned to is refused before any change.
    let err = h
        .service
        .update_project(
            project.id,
            UpdateProjectInput {
                name: Some("Hijacked".to_string()),
                ..Default::default()
            },
            &other,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotPermitted));
    let stored = h.service.get_project(project.id).await.unwrap();
    assert_eq!(stored.name, "Payment rework");
    assert_eq!(stored.version, project.version);

    // The assigned lead may update.
    let updated = h
        .service
        .update_project(
            project.id,
            UpdateProjectInput {
                description: Some("Now with fewer regressions.".to_string()),
                ..Default::default()
            },
            &owner,
        )
        .await
        .unwrap();
    assert_eq!(updated.description, "Now with fewer regressions.");
    assert_eq!(updated.version, project.version + 1);
}

#[tokio::test]
async fn only_elevated_actors_may_reassign_a_project() {
    let h = harness();
    let owner = seed_user(&h.store, "Lena Lead", "lena@example.com", Role::Lead).await;
    let successor = seed_user(&h.store, "Olin Lead", "olin@example.com", Role::Lead).await;
    let manager = seed_user(&h.store, "Mara Manager", "mara@example.com", Role::Manager).await;
    let member = seed_user(&h.store, "Miko Member", "miko@example.com", Role::Member).await;

    let mut input = project_input("Payment rework");
    input.assigned_to = Some(owner.id);
    let project = h.service.create_project(input).await.unwrap();

    // Even the assigned lead may not reassign.
    assert!(matches!(
        h.service
            .update_project(
                project.id,
                UpdateProjectInput {
                    assigned_to: Some(successor.id),
                    ..Default::default()
                },
                &owner,
            )
            .await
            .unwrap_err(),
        ServiceError::NotPermitted
    ));

    // A manager may, but only to a lead.
    assert!(matches!(
        h.service
            .update_project(
                project.id,
                UpdateProjectInput {
                    assigned_to: Some(member.id),
                    ..Default::default()
                },
                &manager,
            )
            .await
            .unwrap_err(),
        ServiceError::InvalidRole
    ));
    let stored = h.service.get_project(project.id).await.unwrap();
    assert_eq!(stored.assigned_to, Some(owner.id));

    let reassigned = h
        .service
        .update_project(
            project.id,
            UpdateProjectInput {
                assigned_to: Some(successor.id),
                ..Default::default()
            },
            &manager,
        )
        .await
        .unwrap();
    assert_eq!(reassigned.assigned_to, Some(successor.id));

    h.notifier.shutdown(Duration::from_secs(1)).await;
    let templates: Vec<_> = h.mailer.sent().iter().map(|m| m.template.clone()).collect();
    assert_eq!(templates, vec!["project_assign", "project_assign"]);
}

#[tokio::test]
async fn stale_project_versions_lose_the_write_race() {
    let h = harness();
    let project = h
        .service
        .create_project(project_input("Payment rework"))
        .await
        .unwrap();

    let mut first = project.clone();
    first.description = "First writer.".to_string();
    let mut second = project.clone();
    second.description = "Second writer.".to_string();

    let winner = h.store.update_project(first).await.unwrap();
    assert_eq!(winner.version, project.version + 1);
    assert!(matches!(
        h.store.update_project(second).await.unwrap_err(),
        StoreError::EditConflict
    ));

    let stored = h.service.get_project(project.id).await.unwrap();
    assert_eq!(stored.description, "First writer.");
}

#[tokio::test]
async fn membership_requires_the_member_role_and_unique_pairs() {
    let h = harness();
    let member = seed_user(&h.store, "Miko Member", "miko@example.com", Role::Member).await;
    let lead = seed_user(&h.store, "Lena Lead", "lena@example.com", Role::Lead).await;
    let project = h
        .service
        .create_project(project_input("Payment rework"))
        .await
        .unwrap();

    h.service
        .assign_user_to_project(member.id, project.id)
        .await
        .unwrap();

    assert!(matches!(
        h.service
            .assign_user_to_project(lead.id, project.id)
            .await
            .unwrap_err(),
        ServiceError::InvalidRole
    ));

    match h
        .service
        .assign_user_to_project(member.id, project.id)
        .await
        .unwrap_err()
    {
        ServiceError::FailedValidation(errors) => {
            assert_eq!(errors.get("user"), Some("already assigned to this project"));
        }
        other => panic!("expected FailedValidation, got {other:?}"),
    }

    let found = h
        .service
        .get_project_user(project.id, member.id)
        .await
        .unwrap();
    assert_eq!(found.id, member.id);

    let (members, metadata) = h
        .service
        .get_project_users(project.id, Some(Role::Member), default_filters())
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(metadata.total_records, 1);

    let (projects, _) = h
        .service
        .get_all_projects_for_user(member.id, default_filters())
        .await
        .unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, project.id);
}

#[tokio::test]
async fn assigning_a_missing_user_or_project_is_not_found() {
    let h = harness();
    let member = seed_user(&h.store, "Miko Member", "miko@example.com", Role::Member).await;

    assert!(matches!(
        h.service
            .assign_user_to_project(member.id, Uuid::new_v4())
            .await
            .unwrap_err(),
        ServiceError::NotFound
    ));
    assert!(matches!(
        h.service
            .assign_user_to_project(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err(),
        ServiceError::NotFound
    ));
}
