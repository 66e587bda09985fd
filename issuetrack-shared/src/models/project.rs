//! Project model and validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::Validator;

/// Project.
///
/// `assigned_to` may only ever reference a user with the lead role; the
/// service layer enforces that before anything is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    /// Unique across all projects.
    pub name: String,
    pub description: String,
    pub assigned_to: Option<Uuid>,
    pub start_date: NaiveDate,
    pub target_end_date: NaiveDate,
    pub actual_end_date: Option<NaiveDate>,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
    #[serde(skip_serializing, default)]
    pub version: i64,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        target_end_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Project {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            assigned_to: None,
            start_date,
            target_end_date,
            actual_end_date: None,
            created_on: now,
            modified_on: now,
            version: 1,
        }
    }

    /// Runs every field rule, collecting all violations into `v`.
    pub fn validate(&self, v: &mut Validator) {
        v.check(!self.name.is_empty(), "name", "must be provided");
        v.check(self.name.len() >= 5, "name", "must not be less than 5 bytes long");
        v.check(self.name.len() <= 500, "name", "must not be more than 500 bytes long");
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
            self.start_date < self.target_end_date,
            "target_end_date",
            "must not be before start date",
        );
        if let Some(actual_end_date) = self.actual_end_date {
            v.check(
                self.start_date < actual_end_date,
                "actual_end_date",
                "must not be before start date",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project::new(
            "Payment rework",
            "Replace the legacy payment pipeline.",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )
    }

    #[test]
    fn test_validate_accepts_sane_project() {
        let mut v = Validator::new();
        sample_project().validate(&mut v);
        assert!(v.valid());
    }

    #[test]
    fn test_validate_name_minimum_is_five_bytes() {
        let mut project = sample_project();
        project.name = "abcd".to_string();
        let mut v = Validator::new();
        project.validate(&mut v);
        assert_eq!(
            v.into_errors().get("name"),
            Some("must not be less than 5 bytes long")
        );
    }

    #[test]
    fn test_validate_target_end_before_start() {
        let mut project = sample_project();
        project.target_end_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut v = Validator::new();
        project.validate(&mut v);
        assert_eq!(
            v.into_errors().get("target_end_date"),
            Some("must not be before start date")
        );
    }

    #[test]
    fn test_validate_actual_end_before_start() {
        let mut project = sample_project();
        project.actual_end_date = Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let mut v = Validator::new();
        project.validate(&mut v);
        assert_eq!(
            v.into_errors().get("actual_end_date"),
            Some("must not be before start date")
        );
    }
}
