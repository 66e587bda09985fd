//! Template identifiers understood by the mail renderer.
//!
//! Rendering itself happens behind the [`crate::mailer::Mailer`] contract;
//! these are just the names the domain service dispatches with.

pub const USER_WELCOME: &str = "user_welcome";
pub const TOKEN_ACTIVATION: &str = "token_activation";
pub const PROJECT_ASSIGN: &str = "project_assign";
pub const ISSUE_ASSIGN: &str = "issue_assign";
