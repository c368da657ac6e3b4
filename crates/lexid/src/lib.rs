//! Lexicographically sortable identifiers without a central allocator.
//!
//! The crate builds client-assignable keys out of three ingredients: a
//! millisecond timestamp, a numeral-system radix, and a single random
//! trailing digit. Because every key of a given radix is padded to the
//! same fixed width, string comparison orders keys exactly like their
//! underlying timestamps — ascending for plain keys, descending for keys
//! derived from a far-future ceiling.
//!
//! On top of the sortable keys, the crate carries the small codecs that
//! tend to travel with them: fixed-width transaction ids for
//! reverse-chronological listings, obfuscated order numbers, a base-36
//! rolling hash for deriving stable ids from semantic keys, prefix-range
//! bounds for key scans, and slug/handle normalization for
//! human-readable keys.
//!
//! Time and randomness are injected through the [`TimeSource`] and
//! [`RandSource`] traits so that every operation is deterministic under
//! test. The `std` feature (on by default) provides the [`WallClock`]
//! and [`ThreadRandom`] implementations backed by the system clock and
//! the thread-local RNG.

mod error;
mod hash;
mod ids;
mod order;
mod radix;
mod rand;
mod slug;
#[cfg(feature = "std")]
mod thread_random;
mod time;

pub use crate::error::*;
pub use crate::hash::*;
pub use crate::ids::*;
pub use crate::radix::*;
pub use crate::rand::*;
pub use crate::slug::*;
#[cfg(feature = "std")]
pub use crate::thread_random::*;
pub use crate::time::*;
