//! Minimum-interval gate for progress reports
//!
//! Timestamps are the firmware's free-running millisecond counter, so
//! all arithmetic wraps.

/// Rate limiter for idle progress reports
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgressThrottle {
    /// Minimum time between reports (ms)
    interval_ms: u32,
    /// Time of the last report, `None` until the first one
    last_sent_ms: Option<u32>,
}

impl ProgressThrottle {
    /// Create a throttle that is ready immediately
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_sent_ms: None,
        }
    }

    /// Returns true if a report may be sent at `now_ms`
    pub fn is_ready(&self, now_ms: u32) -> bool {
        match self.last_sent_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.interval_ms,
        }
    }

    /// Record that a report was sent at `now_ms`
    pub fn mark_sent(&mut self, now_ms: u32) {
        self.last_sent_ms = Some(now_ms);
    }

    /// Forget the last report so the next check passes
    pub fn reset(&mut self) {
        self.last_sent_ms = None;
    }

    /// Time of the last report
    pub fn last_sent_ms(&self) -> Option<u32> {
        self.last_sent_ms
    }

    /// Configured interval (ms)
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}
