//! The notification dispatcher.
//!
//! `dispatch` schedules a delivery onto its own tokio task and returns
//! immediately; the calling operation never waits on, and never learns
//! about, the delivery outcome. Each delivery is attempted up to three
//! times with a fixed pause in between; terminal failure is logged only.
//! Panics inside a delivery are caught and logged, never propagated to the
//! caller's execution context. Every task registers with a shared
//! `TaskTracker` so shutdown can wait for in-flight deliveries, bounded by
//! a deadline.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio_util::task::TaskTracker;

use crate::mailer::Mailer;

/// Delivery attempts before a notification is dropped.
const MAX_ATTEMPTS: u32 = 3;

/// Fixed pause between attempts.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// One notification: recipient, template identifier and template data.
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipient: String,
    pub template: String,
    pub data: HashMap<String, String>,
}

impl Notification {
    pub fn new(recipient: &str, template: &str) -> Self {
        Notification {
            recipient: recipient.to_string(),
            template: template.to_string(),
            data: HashMap::new(),
        }
    }

    /// Adds one template data entry.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }
}

/// Fire-and-forget dispatcher over a [`Mailer`] backend.
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    tracker: TaskTracker,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self::with_retry(mailer, MAX_ATTEMPTS, RETRY_DELAY)
    }

    /// Overrides the retry policy; tests use short delays.
    pub fn with_retry(mailer: Arc<dyn Mailer>, max_attempts: u32, retry_delay: Duration) -> Self {
        Notifier {
            mailer,
            tracker: TaskTracker::new(),
            max_attempts,
            retry_delay,
        }
    }

    /// Schedules a delivery and returns immediately.
    ///
    /// Must be called from within a tokio runtime. Whatever happens inside
    /// the delivery — repeated failures, an unexpected panic — stays inside
    /// the spawned task.
    pub fn dispatch(&self, notification: Notification) {
        let mailer = Arc::clone(&self.mailer);
        let max_attempts = self.max_attempts;
        let retry_delay = self.retry_delay;
        self.tracker.spawn(async move {
            let delivery = deliver(mailer, &notification, max_attempts, retry_delay);
            if AssertUnwindSafe(delivery).catch_unwind().await.is_err() {
                tracing::error!(
                    recipient = %notification.recipient,
                    template = %notification.template,
                    "notification delivery panicked"
                );
            }
        });
    }

    /// Deliveries still in flight.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Waits for in-flight deliveries, bounded by `deadline`, then returns
    /// regardless.
    pub async fn shutdown(&self, deadline: Duration) {
        self.tracker.close();
        if tokio::time::timeout(deadline, self.tracker.wait())
            .await
            .is_err()
        {
            tracing::warn!(
                in_flight = self.tracker.len(),
                "shutdown deadline elapsed with deliveries in flight"
            );
        }
    }
}

async fn deliver(
    mailer: Arc<dyn Mailer>,
    notification: &Notification,
    max_attempts: u32,
    retry_delay: Duration,
) {
    for attempt in 1..=max_attempts {
        match mailer
            .send(&notification.recipient, &notification.template, &notification.data)
            .await
        {
            Ok(()) => {
                tracing::debug!(
                    recipient = %notification.recipient,
                    template = %notification.template,
                    attempt,
                    "notification delivered"
                );
                return;
            }
            Err(err) => {
                tracing::warn!(
                    recipient = %notification.recipient,
                    template = %notification.template,
                    attempt,
                    error = %err,
                    "notification delivery attempt failed"
                );
            }
        }
        if attempt < max_attempts {
            tokio::time::sleep(retry_delay).await;
        }
    }
    tracing::error!(
        recipient = %notification.recipient,
        template = %notification.template,
        attempts = max_attempts,
        "notification dropped"
    );
}
