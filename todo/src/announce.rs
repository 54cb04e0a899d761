//! Screen-reader announcers.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use todo_core::environment::{Announcer, Clock};

/// Announcer that logs every message at `info`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&self, message: &str) {
        tracing::info!(target: "todo::announce", "{message}");
    }
}

/// Announcer that forwards every message to several others, in order
#[derive(Default)]
pub struct FanOut {
    targets: Vec<Arc<dyn Announcer>>,
}

impl FanOut {
    /// Create an announcer with no targets
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target
    #[must_use]
    pub fn with(mut self, target: Arc<dyn Announcer>) -> Self {
        self.targets.push(target);
        self
    }
}

impl Announcer for FanOut {
    fn announce(&self, message: &str) {
        for target in &self.targets {
            target.announce(message);
        }
    }
}

impl std::fmt::Debug for FanOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOut")
            .field("targets", &self.targets.len())
            .finish()
    }
}

/// Polite live region: each message stays active for a fixed time
///
/// Expiry is measured with the injected [`Clock`] and applied lazily, so
/// reading the region is what prunes it.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use todo::announce::LiveRegion;
/// use todo_core::environment::{Announcer, SystemClock};
///
/// let region = LiveRegion::new(Arc::new(SystemClock), Duration::from_secs(1));
/// region.announce("Added task: Run");
/// assert_eq!(region.active(), vec!["Added task: Run".to_string()]);
/// ```
pub struct LiveRegion {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    messages: Mutex<Vec<(DateTime<Utc>, String)>>,
}

impl LiveRegion {
    /// How long a message stays active unless configured otherwise
    pub const DEFAULT_TTL: Duration = Duration::from_millis(1000);

    /// Create an empty region whose messages expire after `ttl`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Messages still active, oldest first
    #[must_use]
    pub fn active(&self) -> Vec<String> {
        let now = self.clock.now();
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        messages.retain(|(at, _)| now.signed_duration_since(*at) < self.ttl);
        messages.iter().map(|(_, text)| text.clone()).collect()
    }
}

impl Announcer for LiveRegion {
    fn announce(&self, message: &str) {
        let now = self.clock.now();
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((now, message.to_string()));
    }
}

impl std::fmt::Debug for LiveRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveRegion")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
