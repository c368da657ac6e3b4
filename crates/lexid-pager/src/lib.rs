//! Cursor-paginated feed core.
//!
//! A [`Feed`] drives a "load more"-style paginated view from an
//! injected [`PageLoader`]: it keeps arrived pages in memory, resumes
//! each fetch from the previous page's cursor, mirrors sort and search
//! parameters into shareable navigation state, and coalesces the
//! refreshes triggered by row-level mutations into at most one refetch
//! per debounce window.
//!
//! The feed owns no I/O and no timers of its own. Fetching goes through
//! the [`PageLoader`] capability, time through a [`TimeSource`], and
//! async sleeping through a [`SleepProvider`] — so the whole state
//! machine runs deterministically under test and on any runtime (the
//! `async-tokio` feature supplies a Tokio-backed [`TokioSleep`]).
//!
//! Failure semantics are deliberate: a rejected fetch parks the feed in
//! a failed phase with its message retained, already-loaded rows stay
//! browsable, and nothing retries until the embedder explicitly reloads
//! or flushes a requested refresh.

mod debounce;
mod error;
mod feed;
mod loader;
mod page;
mod query;
mod sleep;
mod time;

pub use crate::debounce::*;
pub use crate::error::*;
pub use crate::feed::*;
pub use crate::loader::*;
pub use crate::page::*;
pub use crate::query::*;
pub use crate::sleep::*;
pub use crate::time::*;
