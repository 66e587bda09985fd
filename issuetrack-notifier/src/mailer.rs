//! Delivery backend contract.
//!
//! A mailer receives a recipient, a template identifier and the string map
//! that fills the template; rendering and transport are entirely its
//! concern. The mock implementation records deliveries and can be told to
//! fail, which is what the dispatcher and service tests run against.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        template: &str,
        data: &HashMap<String, String>,
    ) -> Result<(), MailerError>;
}

/// A delivery recorded by [`MockMailer`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub template: String,
    pub data: HashMap<String, String>,
}

/// Mock backend for tests and demos.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentMail>>,
    fail_attempts: AtomicU32,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that fails the first `attempts` deliveries, then succeeds.
    pub fn failing(attempts: u32) -> Self {
        MockMailer {
            sent: Mutex::new(Vec::new()),
            fail_attempts: AtomicU32::new(attempts),
        }
    }

    /// Everything delivered so far.
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(
        &self,
        recipient: &str,
        template: &str,
        data: &HashMap<String, String>,
    ) -> Result<(), MailerError> {
        let should_fail = self
            .fail_attempts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(MailerError::Delivery("mock failure".to_string()));
        }
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            template: template.to_string(),
            data: data.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_mailer_records_deliveries() {
        let mailer = MockMailer::new();
        let mut data = HashMap::new();
        data.insert("name".to_string(), "Ada".to_string());
        mailer
            .send("ada@example.com", "user_welcome", &data)
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "ada@example.com");
        assert_eq!(sent[0].template, "user_welcome");
        assert_eq!(sent[0].data.get("name").map(String::as_str), Some("Ada"));
    }

    #[tokio::test]
    async fn test_failing_mailer_recovers_after_n_attempts() {
        let mailer = MockMailer::failing(2);
        let data = HashMap::new();
        assert!(mailer.send("a@example.com", "t", &data).await.is_err());
        assert!(mailer.send("a@example.com", "t", &data).await.is_err());
        assert!(mailer.send("a@example.com", "t", &data).await.is_ok());
        assert_eq!(mailer.sent().len(), 1);
    }
}
