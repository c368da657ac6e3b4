use crate::Cursor;
use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

/// Navigation parameter carrying the sort token.
pub const SORT_PARAM: &str = "sort";
/// Navigation parameter carrying the search text.
pub const SEARCH_PARAM: &str = "search";

/// Ordering direction for sorted queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

/// A sort field plus direction, with a compact string token form.
///
/// The token is `"field"` for ascending and `"field:desc"` for
/// descending, which is what gets mirrored into navigation state so a
/// sorted view stays shareable and bookmarkable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Asc }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Desc }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "{}:desc", self.field),
        }
    }
}

/// Error parsing a sort token out of navigation state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort token {token:?}")]
pub struct SortKeyParseError {
    pub token: String,
}

impl FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let err = || SortKeyParseError { token: token.to_owned() };

        let (field, direction) = match token.split_once(':') {
            None => (token, SortDirection::Asc),
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some(_) => return Err(err()),
        };
        if field.is_empty() {
            return Err(err());
        }
        Ok(Self { field: field.to_owned(), direction })
    }
}

/// The three externally controlled query parameters of a feed.
///
/// `sort` and `search` round-trip through navigation state; `after` is
/// only ever supplied by the loader's own prior response and never
/// leaves the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedQuery {
    pub sort: Option<SortKey>,
    pub search: Option<String>,
    pub after: Option<Cursor>,
}

impl FeedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors `sort` and `search` into navigation state.
    ///
    /// Absent values clear their parameter so stale tokens never
    /// outlive the query they belonged to.
    pub fn write_to(&self, nav: &mut dyn NavState) {
        match &self.sort {
            Some(sort) => nav.set_param(SORT_PARAM, &sort.to_string()),
            None => nav.clear_param(SORT_PARAM),
        }
        match self.search.as_deref().filter(|s| !s.is_empty()) {
            Some(search) => nav.set_param(SEARCH_PARAM, search),
            None => nav.clear_param(SEARCH_PARAM),
        }
    }

    /// Rebuilds a query from navigation state (browser back/forward, a
    /// shared link).
    ///
    /// # Errors
    ///
    /// Returns [`SortKeyParseError`] when the sort parameter holds a
    /// malformed token.
    pub fn read_from(nav: &dyn NavState) -> Result<Self, SortKeyParseError> {
        let sort = nav.param(SORT_PARAM).map(SortKey::from_str).transpose()?;
        let search = nav
            .param(SEARCH_PARAM)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        Ok(Self { sort, search, after: None })
    }
}

/// A key-value view of navigation state (a URL query string, typically).
///
/// Implementations must replace values in place — no history push, no
/// scroll reset — so sort/search updates are shareable without
/// disturbing the page the user is looking at.
pub trait NavState {
    /// Returns the current value for `key`, if any.
    fn param(&self, key: &str) -> Option<&str>;

    /// Sets `key` to `value`, replacing any existing value.
    fn set_param(&mut self, key: &str, value: &str);

    /// Removes `key` entirely.
    fn clear_param(&mut self, key: &str);
}

/// Map-backed [`NavState`] for tests and headless embeddings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryNav {
    params: BTreeMap<String, String>,
}

impl MemoryNav {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavState for MemoryNav {
    fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    fn set_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_owned(), value.to_owned());
    }

    fn clear_param(&mut self, key: &str) {
        self.params.remove(key);
    }
}

/// A [`NavState`] that records nothing, for embedders with no
/// navigation surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNav;

impl NavState for NullNav {
    fn param(&self, _key: &str) -> Option<&str> {
        None
    }

    fn set_param(&mut self, _key: &str, _value: &str) {}

    fn clear_param(&mut self, _key: &str) {}
}
