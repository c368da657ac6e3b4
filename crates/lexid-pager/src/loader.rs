use crate::{FeedQuery, Page};

/// The injected capability that actually fetches pages.
///
/// The feed never talks to a backend itself; it drives one of these.
/// Implementations should be idempotent for identical queries modulo
/// backend state changes, and must return a `next` cursor only when
/// more results may exist — the cursor's absence is the feed's sole
/// termination signal.
///
/// The returned future is not required to be `Send`: the feed is a
/// single-owner, event-loop-style state machine, and loaders backed by
/// non-`Send` handles are common in that setting.
///
/// # Example
///
/// ```
/// use lexid_pager::{FeedQuery, Page, PageLoader, Row};
///
/// struct Static;
///
/// impl PageLoader<u32> for Static {
///     type Error = std::convert::Infallible;
///
///     fn load(
///         &self,
///         _query: &FeedQuery,
///     ) -> impl Future<Output = Result<Page<u32>, Self::Error>> {
///         let page = Page::new(vec![Row::new("a", 1)], None);
///         async move { Ok(page) }
///     }
/// }
/// ```
pub trait PageLoader<T> {
    /// Backend failure type, surfaced verbatim in the feed's error
    /// state.
    type Error;

    /// Fetches the page addressed by `query`.
    fn load(&self, query: &FeedQuery) -> impl Future<Output = Result<Page<T>, Self::Error>>;
}
