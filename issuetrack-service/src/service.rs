//! The `Service` type and its injected dependencies.
//!
//! One repository trait object per aggregate root, composed at the
//! assembly point; the notifier handle for side effects; the credential
//! secret; and the per-operation store deadline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use issuetrack_notifier::Notifier;
use issuetrack_shared::store::{
    IssueRepository, ProjectRepository, StoreError, TokenRepository, UserRepository,
};

/// Default deadline applied to each store call of a domain operation.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// The per-aggregate repositories the service depends on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub issues: Arc<dyn IssueRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl Repositories {
    /// Convenience for a store type implementing all four traits (the
    /// in-memory adapter, or a future SQL store).
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + ProjectRepository + IssueRepository + TokenRepository + 'static,
    {
        Repositories {
            users: store.clone(),
            projects: store.clone(),
            issues: store.clone(),
            tokens: store,
        }
    }
}

/// The domain service.
pub struct Service {
    pub(crate) repos: Repositories,
    pub(crate) notifier: Arc<Notifier>,
    pub(crate) jwt_secret: String,
    pub(crate) op_timeout: Duration,
}

impl Service {
    pub fn new(repos: Repositories, notifier: Arc<Notifier>, jwt_secret: impl Into<String>) -> Self {
        Service {
            repos,
            notifier,
            jwt_secret: jwt_secret.into(),
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    /// Overrides the per-operation store deadline.
    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    /// Runs a store call under the operation deadline. An elapsed deadline
    /// drops the in-flight call and reports `Canceled` instead of hanging.
    pub(crate) async fn run_store<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Canceled),
        }
    }
}
