use crate::{
    Cursor, Debouncer, DebounceStatus, Error, FeedQuery, NavState, Page, PageLoader, Row,
    SleepProvider, SortKey, TimeSource, WallClock,
};
use tracing::{debug, instrument, warn};

/// Lifecycle phase of a [`Feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// No data yet; the first page has not been applied.
    Loading,
    /// At least one page is loaded and interactive.
    Ready,
    /// A next-page request is in flight; prior pages stay visible.
    FetchingNext,
    /// The active fetch rejected. The error message is retained and
    /// nothing retries until an explicit reload.
    Failed,
}

/// Accumulates cursor-addressed pages from an injected [`PageLoader`].
///
/// The feed is a single-owner state machine in the event-loop style:
/// every method takes `&mut self`, so at most one first-page and one
/// next-page fetch can be in flight per instance. Abandoning a fetch is
/// dropping its future; a query-generation check additionally discards
/// any late response that outlived its query.
///
/// Sorting restarts the query identity (accumulated pages are
/// discarded); search text only mirrors into navigation state and
/// reaches the backend on the next reload or debounced refresh.
///
/// # Example
///
/// ```
/// use lexid_pager::{Feed, FeedQuery, Page, PageLoader, Row};
///
/// struct Numbers;
///
/// impl PageLoader<u32> for Numbers {
///     type Error = std::convert::Infallible;
///
///     fn load(
///         &self,
///         _query: &FeedQuery,
///     ) -> impl Future<Output = Result<Page<u32>, Self::Error>> {
///         let page = Page::new(vec![Row::new("a", 1), Row::new("b", 2)], None);
///         async move { Ok(page) }
///     }
/// }
///
/// # futures::executor::block_on(async {
/// let mut feed = Feed::new(Numbers, FeedQuery::new());
/// feed.load_first().await.unwrap();
/// assert_eq!(feed.row_count(), 2);
/// assert!(!feed.has_more());
/// # });
/// ```
pub struct Feed<T, L, C = WallClock>
where
    L: PageLoader<T>,
    C: TimeSource,
{
    loader: L,
    query: FeedQuery,
    pages: Vec<Page<T>>,
    phase: FeedPhase,
    error: Option<String>,
    generation: u64,
    debouncer: Debouncer<C>,
}

impl<T, L> Feed<T, L, WallClock>
where
    L: PageLoader<T>,
    L::Error: core::fmt::Display,
{
    /// Creates a feed over the system clock with the default refresh
    /// window.
    ///
    /// No fetch is issued until [`load_first`](Feed::load_first) runs.
    pub fn new(loader: L, query: FeedQuery) -> Self {
        Self::with_debouncer(loader, query, Debouncer::new(WallClock))
    }
}

impl<T, L, C> Feed<T, L, C>
where
    L: PageLoader<T>,
    L::Error: core::fmt::Display,
    C: TimeSource,
{
    /// Creates a feed with an explicit refresh debouncer, for custom
    /// windows or mock clocks.
    pub fn with_debouncer(loader: L, query: FeedQuery, debouncer: Debouncer<C>) -> Self {
        Self {
            loader,
            query,
            pages: Vec::new(),
            phase: FeedPhase::Loading,
            error: None,
            generation: 0,
            debouncer,
        }
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// `true` while the first page is pending.
    pub fn is_loading(&self) -> bool {
        self.phase == FeedPhase::Loading
    }

    /// `true` while a next-page request is in flight.
    pub fn is_fetching_next(&self) -> bool {
        self.phase == FeedPhase::FetchingNext
    }

    /// The retained message of the last failed fetch, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The active query (its `after` field reflects the last reload,
    /// not the accumulated pages).
    pub fn query(&self) -> &FeedQuery {
        &self.query
    }

    /// Accumulated pages, in arrival order.
    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    /// Flattened view over every accumulated row.
    pub fn rows(&self) -> impl Iterator<Item = &Row<T>> {
        self.pages.iter().flat_map(|page| page.rows.iter())
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// `true` while the last page carried a cursor.
    pub fn has_more(&self) -> bool {
        self.last_cursor().is_some()
    }

    fn last_cursor(&self) -> Option<&Cursor> {
        self.pages.last().and_then(|page| page.next.as_ref())
    }

    /// Loads the first page, discarding anything accumulated.
    ///
    /// This is also the reload primitive behind sort changes and
    /// debounced refreshes: same query identity rules, fresh
    /// `Loading → Ready` cycle.
    ///
    /// # Errors
    ///
    /// A loader rejection moves the feed to [`FeedPhase::Failed`] and is
    /// returned as [`Error::Load`]. The feed never retries by itself.
    #[instrument(level = "debug", skip_all)]
    pub async fn load_first(&mut self) -> Result<(), Error<L::Error>> {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        self.pages.clear();
        self.phase = FeedPhase::Loading;
        self.error = None;

        let mut query = self.query.clone();
        query.after = None;
        let loaded = self.loader.load(&query).await;
        self.apply(generation, loaded)
    }

    /// Fetches the page after the last one, resuming from its cursor.
    ///
    /// Pages are appended as they arrive; no reordering or
    /// deduplication is performed, so a backend that violates its
    /// cursor contract mid-pagination may surface duplicate rows.
    ///
    /// # Errors
    ///
    /// - [`Error::NotReady`] unless the feed is [`FeedPhase::Ready`]
    /// - [`Error::NoMorePages`] when the last page carried no cursor
    /// - [`Error::Load`] on loader rejection; accumulated pages remain
    ///   rendered so the user can keep browsing what already arrived
    #[instrument(level = "debug", skip_all)]
    pub async fn fetch_next_page(&mut self) -> Result<(), Error<L::Error>> {
        if self.phase != FeedPhase::Ready {
            return Err(Error::NotReady);
        }
        let Some(after) = self.last_cursor().cloned() else {
            return Err(Error::NoMorePages);
        };

        let generation = self.generation;
        self.phase = FeedPhase::FetchingNext;

        let mut query = self.query.clone();
        query.after = Some(after);
        let loaded = self.loader.load(&query).await;
        self.apply(generation, loaded)
    }

    /// Applies a loader response unless its query has been superseded.
    fn apply(
        &mut self,
        generation: u64,
        loaded: Result<Page<T>, L::Error>,
    ) -> Result<(), Error<L::Error>> {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale page response");
            return Ok(());
        }
        match loaded {
            Ok(page) => {
                debug!(rows = page.len(), has_more = page.next.is_some(), "page applied");
                self.pages.push(page);
                self.phase = FeedPhase::Ready;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "page load failed");
                self.phase = FeedPhase::Failed;
                self.error = Some(e.to_string());
                Err(Error::Load(e))
            }
        }
    }

    /// Replaces the sort key and restarts the query identity.
    ///
    /// The new token is mirrored into `nav`, accumulated pages are
    /// discarded, and a fresh first page is loaded. Any response still
    /// in flight for the old sort is stale from this point on.
    pub async fn set_sort(
        &mut self,
        sort: Option<SortKey>,
        nav: &mut dyn NavState,
    ) -> Result<(), Error<L::Error>> {
        self.query.sort = sort;
        self.query.write_to(nav);
        self.load_first().await
    }

    /// Replaces the search text and mirrors it into `nav`.
    ///
    /// Deliberately does **not** fetch: typing is decoupled from
    /// querying to avoid request storms. The new text reaches the
    /// backend on the next reload — typically a
    /// [`request_refresh`](Feed::request_refresh) issued right after.
    pub fn set_search(&mut self, search: Option<&str>, nav: &mut dyn NavState) {
        self.query.search = search.filter(|s| !s.is_empty()).map(str::to_owned);
        self.query.write_to(nav);
    }

    /// Requests a debounced refresh.
    ///
    /// Requests arriving within one window of each other collapse into
    /// a single refetch; each request re-arms the window.
    pub fn request_refresh(&mut self) {
        self.debouncer.request();
    }

    /// Reports the pending refresh window without blocking.
    pub fn poll_refresh(&mut self) -> DebounceStatus {
        self.debouncer.poll()
    }

    /// Awaits the pending refresh window, then reloads.
    ///
    /// Resolves to `true` when a refresh actually ran, `false` when no
    /// refresh was armed. This is the only self-initiated reload path;
    /// a failed feed stays failed until the embedder requests one.
    ///
    /// # Errors
    ///
    /// Propagates the reload's [`Error::Load`] like
    /// [`load_first`](Feed::load_first).
    pub async fn flush_refresh<S>(&mut self) -> Result<bool, Error<L::Error>>
    where
        S: SleepProvider,
    {
        if !self.debouncer.wait::<S>().await {
            return Ok(false);
        }
        self.load_first().await?;
        Ok(true)
    }

    /// Runs a row-level action against the row with the given id.
    ///
    /// On success the feed arms a debounced refresh so the mutation
    /// becomes visible; on error nothing changes — the rendered rows
    /// stay available and the error is handed back to the caller.
    ///
    /// Returns `None` when no accumulated row has that id.
    pub async fn run_action<A, Fut, Out, E>(
        &mut self,
        id: &str,
        action: A,
    ) -> Option<Result<Out, E>>
    where
        A: FnOnce(&T, &str) -> Fut,
        Fut: Future<Output = Result<Out, E>>,
    {
        let row = self.rows().find(|row| row.id == id)?;
        let result = action(&row.record, &row.id).await;
        if result.is_ok() {
            self.request_refresh();
        }
        Some(result)
    }
}
