#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use issuetrack_notifier::{MockMailer, Notifier};
use issuetrack_service::{Repositories, Service};
use issuetrack_shared::models::user::{Role, User};
use issuetrack_shared::store::memory::MemoryStore;
use issuetrack_shared::store::UserRepository;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

pub struct TestHarness {
    pub service: Service,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<MockMailer>,
    pub notifier: Arc<Notifier>,
}

/// Service wired against the in-memory store and mock mailer, with a short
/// notifier retry delay so tests stay fast.
pub fn harness() -> TestHarness {
    let store = Arc::new(MemoryStore::new());
    let mailer = Arc::new(MockMailer::new());
    let notifier = Arc::new(Notifier::with_retry(
        Arc::clone(&mailer) as Arc<dyn issuetrack_notifier::Mailer>,
        3,
        Duration::from_millis(5),
    ));
    let service = Service::new(
        Repositories::from_store(Arc::clone(&store)),
        Arc::clone(&notifier),
        TEST_SECRET,
    );
    TestHarness {
        service,
        store,
        mailer,
        notifier,
    }
}

/// Seeds an activated user with the given role directly through the store,
/// bypassing the activation flow.
pub async fn seed_user(store: &MemoryStore, name: &str, email: &str, role: Role) -> User {
    let mut user = User::new(name, email, "$argon2id$stub".to_string(), role);
    user.activated = true;
    store.create_user(user).await.unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
