/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors the identifier codecs can produce.
///
/// Codec errors are caller bugs by contract: the functions are pure and
/// total over well-formed inputs, so an error here means the input was
/// malformed (wrong radix, foreign digit, truncated prefix), not that a
/// retry could succeed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The radix is outside the supported numeral-system range.
    #[error("radix {radix} is outside the supported range 2..=36")]
    InvalidRadix { radix: u32 },

    /// A byte that is not a digit of the expected radix.
    #[error("invalid digit {byte:#04x} at index {index}")]
    InvalidDigit { byte: u8, index: usize },

    /// The input is shorter than the fixed-width prefix it must carry.
    #[error("input holds {len} bytes, expected at least {expected}")]
    Truncated { len: usize, expected: usize },

    /// The decoded value no longer fits the 64-bit value domain.
    #[error("decoded value overflows u64 at index {index}")]
    Overflow { index: usize },
}
