//! Request pacing for the market price endpoint
//!
//! Steam's `priceoverview` endpoint rate-limits aggressively. A pacer hands
//! out one permit per interval and every price request, retries included,
//! takes one. Each aggregation creates its own, so no timing state survives
//! between requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::Clock;

/// Minimum-spacing limiter (a token bucket with capacity 1)
pub struct RequestPacer {
    clock: Arc<dyn Clock>,
    interval: Duration,
    /// Earliest instant the next permit may be handed out
    next_slot: Instant,
}

impl RequestPacer {
    /// The first permit becomes available one `interval` after creation.
    pub fn new(clock: Arc<dyn Clock>, interval: Duration) -> Self {
        let next_slot = clock.now() + interval;
        Self {
            clock,
            interval,
            next_slot,
        }
    }

    /// How long `acquire` would currently wait
    pub fn time_until_available(&self) -> Duration {
        self.next_slot.saturating_duration_since(self.clock.now())
    }

    /// Wait for the next permit.
    pub async fn acquire(&mut self) {
        let wait = self.time_until_available();
        if !wait.is_zero() {
            log::trace!("Pacing price request, waiting {:?}", wait);
            self.clock.sleep(wait).await;
        }
        self.next_slot = self.clock.now() + self.interval;
    }
}
