use crate::radix;

/// Output width of [`semantic_hash`] in base-36 digits.
pub const HASH_WIDTH: usize = 10;

/// Polynomial multiplier (Horner's method).
const P: u128 = 31;

/// Modulus: the value of `"zzzzzzzzzz"` in base 36 (`36^10 - 1`), so the
/// reduced value always fits the fixed output width.
const M: u128 = 3_656_158_440_062_975;

/// Offset subtracted from each code unit so that `'0'` maps to 1.
///
/// Mapping the lowest common digit to 1 rather than 0 keeps keys with
/// leading zero-valued characters from hashing to all zeros.
const OFFSET: u128 = b'0' as u128;

/// Hashes a string into a stable, 10-character, zero-padded base-36
/// token.
///
/// This is a polynomial rolling hash over the UTF-16 code units of the
/// input. It is deterministic — the same input always yields the same
/// token — which makes it suitable for deriving record keys from
/// semantic identifiers (an email address, a vendor SKU) so the same
/// entity always lands on the same key.
///
/// It is **not** cryptographic: collisions are unlikely but possible,
/// and the input is trivially guessable from context. Never use it for
/// authentication or integrity checks.
///
/// # Example
///
/// ```
/// use lexid::semantic_hash;
///
/// let key = semantic_hash("fan@example.com");
/// assert_eq!(key.len(), 10);
/// assert_eq!(key, semantic_hash("fan@example.com"));
/// ```
pub fn semantic_hash(input: &str) -> String {
    let mut value: u128 = 0;
    let mut p_pow: u128 = 1;

    for unit in input.encode_utf16() {
        // Offset in modular arithmetic so code units below '0' cannot
        // underflow.
        let digit = (u128::from(unit) + M + 1 - OFFSET) % M;
        value = (value + digit * p_pow) % M;
        p_pow = (p_pow * P) % M;
    }

    radix::pad(&radix::encode_raw(value as u64, 36), HASH_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let a = semantic_hash("fan@example.com");
        let b = semantic_hash("fan@example.com");
        assert_eq!(a, b);
        assert_eq!(a.len(), HASH_WIDTH);
    }

    #[test]
    fn known_values() {
        assert_eq!(semantic_hash(""), "0000000000");
        // '0' maps to 1
        assert_eq!(semantic_hash("0"), "0000000001");
        // 1 + 1 * 31 = 32 = "w" in base 36
        assert_eq!(semantic_hash("00"), "000000000w");
        // 'a' (97) maps to 50 = "1e" in base 36
        assert_eq!(semantic_hash("a"), "000000001e");
    }

    #[test]
    fn distinct_inputs_rarely_collide() {
        let inputs = [
            "alice@example.com",
            "bob@example.com",
            "carol@example.com",
            "alice@example.org",
            "a",
            "b",
            "aa",
            "ab",
        ];
        let hashes: std::collections::HashSet<_> =
            inputs.iter().map(|s| semantic_hash(s)).collect();
        assert_eq!(hashes.len(), inputs.len());
    }

    #[test]
    fn non_ascii_input_is_hashed_by_code_unit() {
        let a = semantic_hash("đam-mê");
        assert_eq!(a.len(), HASH_WIDTH);
        assert_ne!(a, semantic_hash("dam-me"));
    }
}
