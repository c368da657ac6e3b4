/// A source of uniformly random bits for identifier suffixes.
///
/// The codecs only ever derive single digits from the returned value
/// (one trailing digit per sortable key, one leading digit per order
/// number), so any uniform 64-bit source is sufficient. Inject a fixed
/// source in tests to make generated keys reproducible.
pub trait RandSource {
    /// Returns uniformly random bits.
    fn rand(&self) -> u64;
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn rand(&self) -> u64 {
        (**self).rand()
    }
}
