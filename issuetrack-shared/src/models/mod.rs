//! Domain entities and their field-level validation.
//!
//! # Models
//!
//! - `user`: accounts, the global role enum, credential-related validation
//! - `project`: projects with lead assignment and date ordering rules
//! - `issue`: issues with the open/closed state machine
//! - `membership`: project/user membership pairs
//! - `token`: one-shot activation tokens (hash-at-rest)
//! - `report`: per-project issue report rows

pub mod issue;
pub mod membership;
pub mod project;
pub mod report;
pub mod token;
pub mod user;
