//! Per-source request limiter.
//!
//! One token bucket per source key, all behind a single exclusive lock; hold
//! time per access is O(1), so contention stays low. A periodic sweeper
//! evicts entries unseen for longer than the idle window so the map cannot
//! grow without bound.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Entries unseen for this long are evicted.
const IDLE_EVICTION: Duration = Duration::from_secs(180);

/// How often the sweeper runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Sustained refill rate, tokens per second.
    pub rps: f64,

    /// Burst capacity.
    pub burst: u32,

    /// Disables limiting entirely when false.
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            rps: 2.0,
            burst: 4,
            enabled: true,
        }
    }
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
}

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_refill: f64,
}

impl TokenBucket {
    fn new(capacity: u32) -> Self {
        TokenBucket {
            tokens: capacity as f64,
            last_refill: now_secs(),
        }
    }

    fn refill(&mut self, rate: f64, capacity: u32) {
        let now = now_secs();
        let elapsed = (now - self.last_refill).max(0.0);
        self.tokens = (self.tokens + elapsed * rate).min(capacity as f64);
        self.last_refill = now;
    }

    fn try_consume(&mut self, count: f64) -> bool {
        if self.tokens >= count {
            self.tokens -= count;
            true
        } else {
            false
        }
    }
}

#[derive(Debug)]
struct Client {
    bucket: TokenBucket,
    last_seen: f64,
}

/// Shared mutable limiter state: source key to bucket plus last-seen time.
#[derive(Debug)]
pub struct RateLimiter {
    clients: Mutex<HashMap<String, Client>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        RateLimiter {
            clients: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Whether a request from `key` may proceed right now.
    pub fn allow(&self, key: &str) -> bool {
        if !self.config.enabled {
            return true;
        }
        let mut clients = self.clients.lock().unwrap();
        let client = clients.entry(key.to_string()).or_insert_with(|| Client {
            bucket: TokenBucket::new(self.config.burst),
            last_seen: now_secs(),
        });
        client.last_seen = now_secs();
        client.bucket.refill(self.config.rps, self.config.burst);
        client.bucket.try_consume(1.0)
    }

    /// Evicts entries unseen for longer than the idle window.
    pub fn sweep(&self) {
        let cutoff = now_secs() - IDLE_EVICTION.as_secs_f64();
        let mut clients = self.clients.lock().unwrap();
        clients.retain(|_, client| client.last_seen > cutoff);
    }

    /// Number of source keys currently tracked.
    pub fn tracked_sources(&self) -> usize {
        self.clients.lock().unwrap().len()
    }

    /// Spawns the periodic sweeper; it runs until `shutdown` is cancelled.
    pub fn start_sweeper(self: &Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                tokio::select! {
                    _ = interval.tick() => limiter.sweep(),
                    _ = shutdown.cancelled() => break,
                }
            }
        })
    }
}
