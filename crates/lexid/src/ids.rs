#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, MAX_TIME_MS, ORDER_EPOCH_MS, RandSource, Result, TRANSACTION_ID_WIDTH, TimeSource,
    order, radix,
};

/// Default radix for sortable keys: base 36 gives the shortest encoding.
pub const DEFAULT_RADIX: u32 = 36;

/// Generates sortable keys, transaction ids, and order numbers from an
/// injected clock and RNG.
///
/// Every generated key is deterministic in its prefix (the fixed-width
/// encoding of a millisecond seed); only the single trailing digit is
/// random. Two keys minted from distinct seeds therefore always compare
/// in seed order, while keys from the *same* millisecond differ only in
/// their last character.
///
/// ## Collision window
///
/// The trailing digit is the only entropy, so two keys minted within the
/// same millisecond collide with probability `1/radix`. Real callers use
/// the implicit current-time seed, which moves between calls under
/// normal load; callers pinning an explicit seed keep the full collision
/// risk and should prefer [`IdGenerator::transaction_id_at`] when they
/// need a stable anchored key.
///
/// # Example
///
/// ```
/// use lexid::{DEFAULT_RADIX, IdGenerator};
///
/// let ids = IdGenerator::default();
/// let earlier = ids.ascending(DEFAULT_RADIX).unwrap();
/// std::thread::sleep(std::time::Duration::from_millis(2));
/// let later = ids.ascending(DEFAULT_RADIX).unwrap();
/// assert!(earlier < later);
/// ```
pub struct IdGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    time: T,
    rng: R,
}

#[cfg(feature = "std")]
impl Default for IdGenerator<crate::WallClock, crate::ThreadRandom> {
    /// Constructs a generator over the system clock and the thread-local
    /// RNG.
    fn default() -> Self {
        Self::new(crate::WallClock, crate::ThreadRandom)
    }
}

impl<T, R> IdGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a new [`IdGenerator`] with the provided time source and
    /// RNG.
    pub const fn new(time: T, rng: R) -> Self {
        Self { time, rng }
    }

    /// Generates an ascending sortable key seeded from the current time.
    ///
    /// The key is `pad(encode(now, radix), encoded_width(radix))` plus
    /// one random trailing digit. For a fixed radix, keys sort
    /// lexicographically in generation order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRadix`] when `radix` is outside `2..=36`.
    pub fn ascending(&self, radix: u32) -> Result<String> {
        self.ascending_from(radix, self.time.current_millis())
    }

    /// Generates an ascending sortable key from an explicit seed.
    ///
    /// Pinning the same seed twice keeps the full `1/radix` collision
    /// window described on [`IdGenerator`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRadix`] when `radix` is outside `2..=36`.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn ascending_from(&self, radix: u32, seed_ms: u64) -> Result<String> {
        let width = radix::encoded_width(radix)?;
        let body = radix::pad(&radix::encode(seed_ms, radix)?, width);

        let mut key = String::with_capacity(width + 1);
        key.push_str(&body);
        key.push(radix::digit(self.rng.rand() % u64::from(radix)));
        Ok(key)
    }

    /// Generates a descending sortable key: newest keys sort first.
    ///
    /// The seed is `MAX_TIME_MS - now`, which inverts lexicographic
    /// order relative to insertion time while reusing the ascending
    /// codec. The generation time is recoverable via [`original_time`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRadix`] when `radix` is outside `2..=36`.
    pub fn descending(&self, radix: u32) -> Result<String> {
        let now = self.time.current_millis();
        self.ascending_from(radix, MAX_TIME_MS.saturating_sub(now))
    }

    /// Returns a fixed-width transaction id anchored at the current
    /// time.
    ///
    /// Transaction ids sort newest first, which makes them a natural key
    /// for reverse-chronological listings without a separate sort index.
    pub fn transaction_id(&self) -> String {
        self.transaction_id_at(self.time.current_millis())
    }

    /// Returns the transaction id for an explicit anchor, for callers
    /// that need a stable, reproducible key.
    ///
    /// The id is the 14-digit zero-padded decimal form of
    /// `MAX_TIME_MS - anchor_ms`.
    pub fn transaction_id_at(&self, anchor_ms: u64) -> String {
        let seed = MAX_TIME_MS.saturating_sub(anchor_ms);
        radix::pad(&seed.to_string(), TRANSACTION_ID_WIDTH)
    }

    /// Mints a display-facing order number.
    ///
    /// The seed is the milliseconds elapsed since [`ORDER_EPOCH_MS`],
    /// passed through a per-digit substitution cipher and prefixed with
    /// a random non-zero digit. Ordering is deliberately **not**
    /// preserved — the number obscures the sequential timestamp it came
    /// from — and there is no inverse.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn order_number(&self) -> u64 {
        let elapsed = self.time.current_millis().saturating_sub(ORDER_EPOCH_MS);
        let leading = 1 + self.rng.rand() % 9;
        order::obfuscate(elapsed, leading)
    }
}

/// Recovers the generation time of a descending key.
///
/// Decodes the fixed-width prefix and returns `MAX_TIME_MS - prefix` as
/// Unix milliseconds. Only valid for keys produced by
/// [`IdGenerator::descending`] (or transaction ids via radix 10) with
/// the same radix.
///
/// # Errors
///
/// Malformed input is a hard error, never a silent sentinel:
///
/// - [`Error::InvalidRadix`] when `radix` is outside `2..=36`
/// - [`Error::Truncated`] when the key is shorter than the fixed prefix
/// - [`Error::InvalidDigit`] when the prefix holds a foreign character
pub fn original_time(key: &str, radix: u32) -> Result<u64> {
    let width = radix::encoded_width(radix)?;
    let prefix = key.get(..width).ok_or(Error::Truncated {
        len: key.len(),
        expected: width,
    })?;
    let seed = radix::decode(prefix, radix)?;
    Ok(MAX_TIME_MS.saturating_sub(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_RADIX, MIN_RADIX};

    struct MockTime {
        millis: u64,
    }

    impl TimeSource for MockTime {
        fn current_millis(&self) -> u64 {
            self.millis
        }
    }

    struct MockRand {
        rand: u64,
    }

    impl RandSource for MockRand {
        fn rand(&self) -> u64 {
            self.rand
        }
    }

    fn generator(millis: u64, rand: u64) -> IdGenerator<MockTime, MockRand> {
        IdGenerator::new(MockTime { millis }, MockRand { rand })
    }

    #[test]
    fn ascending_keys_sort_by_seed_across_all_radices() {
        let seeds = [(0, 1), (1, 2), (999, 1_000), (1_612_166_400_000, MAX_TIME_MS)];
        for radix in MIN_RADIX..=MAX_RADIX {
            for &(t1, t2) in &seeds {
                // Adversarial suffixes: the earlier key gets the largest
                // trailing digit, the later key the smallest.
                let early = generator(t1, u64::from(radix) - 1);
                let late = generator(t2, 0);
                let id1 = early.ascending(radix).unwrap();
                let id2 = late.ascending(radix).unwrap();
                assert!(id1 < id2, "radix {radix}: {id1} !< {id2}");
            }
        }
    }

    #[test]
    fn same_seed_differs_only_in_the_trailing_digit() {
        let a = generator(42, 0).ascending_from(36, 42).unwrap();
        let b = generator(42, 17).ascending_from(36, 42).unwrap();
        assert_eq!(a[..a.len() - 1], b[..b.len() - 1]);
        assert_ne!(a, b);
    }

    #[test]
    fn ascending_keys_have_fixed_width() {
        for radix in MIN_RADIX..=MAX_RADIX {
            let id = generator(7, 3).ascending(radix).unwrap();
            assert_eq!(id.len(), radix::encoded_width(radix).unwrap() + 1);
        }
    }

    #[test]
    fn descending_inverts_sort_order() {
        let id1 = generator(1_000, 0).descending(36).unwrap();
        let id2 = generator(2_000, 0).descending(36).unwrap();
        assert!(id2 < id1, "{id2} !< {id1}");
    }

    #[test]
    fn original_time_roundtrips_descending_keys() {
        for now in [0, 1, 1_612_166_400_123, 32_503_708_799_999] {
            let id = generator(now, 5).descending(36).unwrap();
            assert_eq!(original_time(&id, 36).unwrap(), now);
        }
    }

    #[test]
    fn original_time_rejects_malformed_keys() {
        assert_eq!(
            original_time("abc", 36).unwrap_err(),
            Error::Truncated { len: 3, expected: 9 }
        );
        assert_eq!(
            original_time("00000!0000", 36).unwrap_err(),
            Error::InvalidDigit { byte: b'!', index: 5 }
        );
        // A multibyte character straddling the prefix boundary
        assert_eq!(
            original_time("00000000đ", 36).unwrap_err(),
            Error::Truncated { len: 10, expected: 9 }
        );
    }

    #[test]
    fn transaction_ids_sort_newest_first() {
        let g = generator(0, 0);
        let older = g.transaction_id_at(1_000);
        let newer = g.transaction_id_at(2_000);
        assert!(newer < older, "{newer} !< {older}");
        assert_eq!(older.len(), TRANSACTION_ID_WIDTH);
        assert_eq!(newer.len(), TRANSACTION_ID_WIDTH);
    }

    #[test]
    fn transaction_id_uses_the_clock_by_default() {
        let g = generator(1_612_166_400_000, 0);
        assert_eq!(g.transaction_id(), g.transaction_id_at(1_612_166_400_000));
    }

    #[test]
    fn transaction_ids_roundtrip_through_original_time() {
        let g = generator(0, 0);
        let id = g.transaction_id_at(1_612_166_400_123);
        assert_eq!(original_time(&id, 10).unwrap(), 1_612_166_400_123);
    }

    #[test]
    fn order_numbers_carry_the_leading_digit() {
        // rand 3 -> leading digit 4; zero elapsed leaves only the lead
        let g = generator(ORDER_EPOCH_MS, 3);
        assert_eq!(g.order_number(), 4);

        // elapsed 123 -> substituted body 748
        let g = generator(ORDER_EPOCH_MS + 123, 0);
        assert_eq!(g.order_number(), 1748);
    }

    #[test]
    fn invalid_radix_is_surfaced() {
        let g = generator(0, 0);
        assert_eq!(g.ascending(1).unwrap_err(), Error::InvalidRadix { radix: 1 });
        assert_eq!(g.descending(37).unwrap_err(), Error::InvalidRadix { radix: 37 });
    }
}
