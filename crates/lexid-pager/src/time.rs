/// A source of wall-clock timestamps in milliseconds.
///
/// The feed only uses the clock to arm and expire its refresh debounce
/// window, so any monotonically advancing millisecond counter will do.
/// Inject a fixed or stepped source in tests to make the debounce fully
/// deterministic.
pub trait TimeSource {
    /// Returns the current time in milliseconds.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

/// A [`TimeSource`] backed by the system clock.
#[derive(Default, Clone, Copy, Debug)]
pub struct WallClock;

impl TimeSource for WallClock {
    /// Returns `SystemTime::now()` as Unix milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set before the Unix epoch.
    fn current_millis(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as u64
    }
}
