//! # issuetrack notifier
//!
//! Fire-and-forget notification delivery. The domain service schedules a
//! delivery and returns immediately; delivery proceeds on its own tokio
//! task with bounded retry. Failures are logged and swallowed, panics are
//! contained, and every task registers with a shared tracker so shutdown
//! can wait (bounded by a deadline) for in-flight deliveries.
//!
//! ## Module organization
//!
//! - `mailer`: the delivery backend contract and a mock implementation
//! - `dispatcher`: the notifier itself
//! - `templates`: template identifiers understood by the renderer

pub mod dispatcher;
pub mod mailer;
pub mod templates;

pub use dispatcher::{Notification, Notifier};
pub use mailer::{Mailer, MailerError, MockMailer, SentMail};
