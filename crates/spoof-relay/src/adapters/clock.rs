use crate::ports::Clock;

/// Production clock backed by `chrono::Utc`.
///
/// ```rust
/// use spoof_relay::adapters::SystemClock;
/// use spoof_relay::Clock;
///
/// let clock = SystemClock::new();
/// assert!(clock.now_millis() > 1_600_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // Pre-epoch system time clamps to zero.
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
    }
}
