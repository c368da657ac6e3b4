use crate::{SleepProvider, TimeSource};
use core::time::Duration;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Width of the refresh coalescing window.
///
/// Refresh requests landing within this window of each other collapse
/// into a single refetch.
pub const DEFAULT_REFRESH_WINDOW: Duration = Duration::from_millis(500);

/// Represents the state of a debounced refresh.
///
/// - [`DebounceStatus::Idle`] means no refresh has been requested.
/// - [`DebounceStatus::Pending`] means a refresh is armed but its window
///   has not elapsed; poll again after `yield_for`.
/// - [`DebounceStatus::Ready`] means the window elapsed — the caller
///   should perform the refresh now. Reporting `Ready` disarms the
///   debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceStatus {
    /// No refresh is armed.
    Idle,
    /// A refresh is armed; wait at least `yield_for` before polling
    /// again.
    Pending {
        /// Time remaining until the window elapses.
        yield_for: Duration,
    },
    /// The window elapsed; perform the refresh.
    Ready,
}

/// Coalesces rapid refresh requests into a single deferred trigger.
///
/// Each [`request`](Debouncer::request) arms — or re-arms — a deadline
/// one window into the future (cancel-and-reschedule, not batching), so
/// any burst of requests produces exactly one `Ready` once the burst
/// stops.
///
/// The deadline is owned by the instance: two feeds debounce
/// independently, and a mock [`TimeSource`] makes the whole cycle
/// testable without real timers.
#[derive(Debug)]
pub struct Debouncer<T>
where
    T: TimeSource,
{
    time: T,
    window: Duration,
    deadline_ms: Option<u64>,
}

impl<T> Debouncer<T>
where
    T: TimeSource,
{
    /// Creates a debouncer with the [`DEFAULT_REFRESH_WINDOW`].
    pub const fn new(time: T) -> Self {
        Self::with_window(time, DEFAULT_REFRESH_WINDOW)
    }

    /// Creates a debouncer with a custom window.
    pub const fn with_window(time: T, window: Duration) -> Self {
        Self { time, window, deadline_ms: None }
    }

    /// Arms the debouncer, replacing any pending deadline.
    pub fn request(&mut self) {
        let deadline = self.time.current_millis() + self.window.as_millis() as u64;
        self.deadline_ms = Some(deadline);
    }

    /// Returns `true` while a deadline is armed.
    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Drops any pending deadline without firing it.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Reports whether the armed window has elapsed.
    ///
    /// Returns [`DebounceStatus::Ready`] at most once per armed window:
    /// reporting it clears the deadline.
    pub fn poll(&mut self) -> DebounceStatus {
        let Some(deadline) = self.deadline_ms else {
            return DebounceStatus::Idle;
        };
        let now = self.time.current_millis();
        if now >= deadline {
            self.deadline_ms = None;
            DebounceStatus::Ready
        } else {
            DebounceStatus::Pending { yield_for: Duration::from_millis(deadline - now) }
        }
    }

    /// Returns a future resolving once the armed window elapses.
    ///
    /// Resolves to `true` when a deadline fired, `false` when the
    /// debouncer was idle. Re-arms that happen while the future sleeps
    /// push the resolution out accordingly.
    pub fn wait<S>(&mut self) -> DebounceDelay<'_, T, S>
    where
        S: SleepProvider,
    {
        DebounceDelay { debouncer: self, sleep: None }
    }
}

pin_project! {
    /// A future that polls a [`Debouncer`] until its window elapses.
    ///
    /// Handles `Pending` statuses by sleeping for the remaining window
    /// through the chosen [`SleepProvider`] before polling again.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct DebounceDelay<'a, T, S>
    where
        T: TimeSource,
        S: SleepProvider,
    {
        debouncer: &'a mut Debouncer<T>,
        #[pin]
        sleep: Option<S::Sleep>,
    }
}

impl<'a, T, S> Future for DebounceDelay<'a, T, S>
where
    T: TimeSource,
    S: SleepProvider,
{
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
            match sleep.poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(()) => this.sleep.set(None),
            }
        }

        match this.debouncer.poll() {
            DebounceStatus::Idle => Poll::Ready(false),
            DebounceStatus::Ready => Poll::Ready(true),
            DebounceStatus::Pending { yield_for } => {
                this.sleep.as_mut().set(Some(S::sleep_for(yield_for)));
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct StepTime {
        now: Rc<Cell<u64>>,
    }

    impl StepTime {
        fn advance(&self, ms: u64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl TimeSource for StepTime {
        fn current_millis(&self) -> u64 {
            self.now.get()
        }
    }

    #[test]
    fn idle_until_requested() {
        let mut debouncer = Debouncer::new(StepTime::default());
        assert_eq!(debouncer.poll(), DebounceStatus::Idle);
        assert!(!debouncer.is_armed());
    }

    #[test]
    fn fires_once_after_the_window() {
        let time = StepTime::default();
        let mut debouncer = Debouncer::new(time.clone());

        debouncer.request();
        assert_eq!(
            debouncer.poll(),
            DebounceStatus::Pending { yield_for: Duration::from_millis(500) }
        );

        time.advance(499);
        assert_eq!(
            debouncer.poll(),
            DebounceStatus::Pending { yield_for: Duration::from_millis(1) }
        );

        time.advance(1);
        assert_eq!(debouncer.poll(), DebounceStatus::Ready);
        // Ready disarms: nothing fires twice
        assert_eq!(debouncer.poll(), DebounceStatus::Idle);
    }

    #[test]
    fn rapid_requests_reschedule_the_deadline() {
        let time = StepTime::default();
        let mut debouncer = Debouncer::new(time.clone());

        debouncer.request();
        time.advance(100);
        debouncer.request();

        // 500ms after the first request the window is still open
        time.advance(400);
        assert_eq!(
            debouncer.poll(),
            DebounceStatus::Pending { yield_for: Duration::from_millis(100) }
        );

        time.advance(100);
        assert_eq!(debouncer.poll(), DebounceStatus::Ready);
        assert_eq!(debouncer.poll(), DebounceStatus::Idle);
    }

    #[test]
    fn cancel_disarms_without_firing() {
        let time = StepTime::default();
        let mut debouncer = Debouncer::new(time.clone());

        debouncer.request();
        debouncer.cancel();
        time.advance(10_000);
        assert_eq!(debouncer.poll(), DebounceStatus::Idle);
    }

    #[test]
    fn custom_windows_are_respected() {
        let time = StepTime::default();
        let mut debouncer = Debouncer::with_window(time.clone(), Duration::from_millis(50));

        debouncer.request();
        time.advance(50);
        assert_eq!(debouncer.poll(), DebounceStatus::Ready);
    }

    mod delay {
        use super::*;
        use futures::executor::block_on;
        use std::cell::RefCell;

        thread_local! {
            static NOW: Cell<u64> = const { Cell::new(0) };
            static SLEPT: RefCell<Vec<Duration>> = const { RefCell::new(Vec::new()) };
        }

        struct TestTime;

        impl TimeSource for TestTime {
            fn current_millis(&self) -> u64 {
                NOW.with(Cell::get)
            }
        }

        /// Advances the shared test clock instead of sleeping.
        struct InstantSleep;

        impl SleepProvider for InstantSleep {
            type Sleep = core::future::Ready<()>;

            fn sleep_for(dur: Duration) -> Self::Sleep {
                NOW.with(|now| now.set(now.get() + dur.as_millis() as u64));
                SLEPT.with(|slept| slept.borrow_mut().push(dur));
                core::future::ready(())
            }
        }

        fn reset() {
            NOW.with(|now| now.set(0));
            SLEPT.with(|slept| slept.borrow_mut().clear());
        }

        #[test]
        fn resolves_true_after_an_armed_window() {
            reset();
            let mut debouncer = Debouncer::new(TestTime);
            debouncer.request();

            assert!(block_on(debouncer.wait::<InstantSleep>()));
            assert!(!debouncer.is_armed());
            SLEPT.with(|slept| {
                assert_eq!(slept.borrow().as_slice(), &[Duration::from_millis(500)]);
            });
        }

        #[test]
        fn resolves_false_when_idle() {
            reset();
            let mut debouncer = Debouncer::new(TestTime);
            assert!(!block_on(debouncer.wait::<InstantSleep>()));
            SLEPT.with(|slept| assert!(slept.borrow().is_empty()));
        }
    }
}
