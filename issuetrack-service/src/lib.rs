//! # issuetrack service
//!
//! The domain service layer of the issuetrack backend: per-entity
//! operations orchestrating validation, assignment-eligibility rules,
//! ownership checks, optimistic-concurrency enforcement and side-effect
//! scheduling. Store access goes through the repository traits in
//! `issuetrack-shared`; notifications go through `issuetrack-notifier`.
//!
//! ## Module organization
//!
//! - `service`: the `Service` type and its injected dependencies
//! - `users`, `projects`, `issues`, `tokens`, `reports`: per-entity operations
//! - `error`: the domain error taxonomy
//! - `rate_limit`: per-source request limiter with periodic eviction
//! - `config`: environment-based configuration
//! - `telemetry`: tracing subscriber setup

pub mod config;
pub mod error;
pub mod issues;
pub mod projects;
pub mod rate_limit;
pub mod reports;
pub mod service;
pub mod telemetry;
pub mod tokens;
pub mod users;

pub use error::{ServiceError, ServiceResult};
pub use service::{Repositories, Service};
