/// All possible errors a feed can surface.
///
/// The generic parameter is the injected loader's own failure type,
/// passed through verbatim so embedders can render or match on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error<E> {
    /// The page loader rejected. The feed entered its failed phase and
    /// will not retry on its own.
    #[error("page load failed: {0}")]
    Load(E),

    /// `fetch_next_page` was called after the last page returned no
    /// cursor.
    #[error("no further pages: the last page carried no cursor")]
    NoMorePages,

    /// `fetch_next_page` was called while the feed was loading,
    /// already fetching, or failed. A failed feed needs an explicit
    /// reload first.
    #[error("the feed is not ready for another fetch")]
    NotReady,
}
