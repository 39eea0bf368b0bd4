use std::time::{Duration, Instant};

/// Default redraw interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Tracks when the running timer display last refreshed.
/// Ticks only trigger redraws; they never touch the store.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// Time to wait for input before the next tick is due
    pub fn timeout(&self) -> Duration {
        self.interval.saturating_sub(self.last.elapsed())
    }

    /// Returns true (and restarts the interval) once a tick is due
    pub fn poll(&mut self) -> bool {
        if self.last.elapsed() >= self.interval {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_never_exceeds_interval() {
        let ticker = Ticker::default();
        assert!(ticker.timeout() <= Duration::from_millis(DEFAULT_TICK_MS));
    }

    #[test]
    fn test_zero_interval_always_due() {
        let mut ticker = Ticker::new(Duration::ZERO);
        assert!(ticker.poll());
        assert!(ticker.poll());
        assert_eq!(ticker.timeout(), Duration::ZERO);
    }
}
