/// Low-time switch between full search and an instant random move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGuard {
    threshold_ms: u64,
}

impl TimeGuard {
    pub const DEFAULT_THRESHOLD_MS: u64 = 50;

    pub fn new(threshold_ms: u64) -> Self {
        Self { threshold_ms }
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    /// True when `remaining_ms` is strictly below the threshold.
    #[inline]
    pub fn should_fallback(&self, remaining_ms: u64) -> bool {
        remaining_ms < self.threshold_ms
    }
}

impl Default for TimeGuard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD_MS)
    }
}
