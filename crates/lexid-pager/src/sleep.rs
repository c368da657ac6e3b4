use core::time::Duration;

/// A trait that abstracts over how to sleep for a given [`Duration`] in
/// async contexts.
///
/// The debounce future is generic over this trait, so the feed runs on
/// any runtime — or on none at all, when tests substitute a provider
/// that advances a mock clock instead of sleeping.
pub trait SleepProvider {
    type Sleep: Future<Output = ()>;

    fn sleep_for(dur: Duration) -> Self::Sleep;
}

/// An implementation of [`SleepProvider`] using Tokio's timer.
#[cfg(feature = "async-tokio")]
pub struct TokioSleep;

#[cfg(feature = "async-tokio")]
impl SleepProvider for TokioSleep {
    type Sleep = tokio::time::Sleep;

    fn sleep_for(dur: Duration) -> Self::Sleep {
        tokio::time::sleep(dur)
    }
}
