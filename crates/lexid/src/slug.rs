//! Handle and slug normalization for human-readable keys.
//!
//! Generated keys usually live next to a human-readable counterpart (a
//! profile handle, a product slug) derived from a display name. These
//! helpers fold accented Latin letters — including the full Vietnamese
//! alphabet — to their ASCII base, then reduce the text to a safe key
//! charset.

/// Accent folds for lowercase Latin letters, Vietnamese alphabet
/// included.
const FOLDS: &[(char, &str)] = &[
    ('a', "àáảãạăằắẳẵặâầấẩẫậ"),
    ('d', "đ"),
    ('e', "èéẻẽẹêềếểễệ"),
    ('i', "ìíỉĩị"),
    ('o', "òóỏõọôồốổỗộơờớởỡợ"),
    ('u', "ùúủũụưừứửữự"),
    ('y', "ỳýỷỹỵ"),
];

fn fold_char(c: char) -> Option<char> {
    FOLDS
        .iter()
        .find(|(_, accented)| accented.contains(c))
        .map(|(base, _)| *base)
}

/// Lowercases `text` and folds it toward ASCII.
///
/// Accented letters are replaced by their base letter, combining marks
/// and the reserved characters `&`/`%` are dropped. Characters with no
/// fold pass through unchanged.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            '&' | '%' => None,
            // Combining diacritical marks from decomposed input
            '\u{0300}'..='\u{036f}' => None,
            c => Some(fold_char(c).unwrap_or(c)),
        })
        .collect()
}

/// Reduces `text` to a handle: normalized, restricted to
/// `0-9a-z _ -`, with whitespace and apostrophe runs collapsed to a
/// single `-`.
///
/// ```
/// use lexid::to_handle;
///
/// assert_eq!(to_handle("Đàm Vĩnh Hưng"), "dam-vinh-hung");
/// ```
pub fn to_handle(text: &str) -> String {
    reduce(text, "-")
}

/// Reduces `text` to a slug: like [`to_handle`], but whitespace and
/// apostrophes are removed instead of replaced.
///
/// ```
/// use lexid::to_slug;
///
/// assert_eq!(to_slug("Đàm Vĩnh Hưng"), "damvinhhung");
/// ```
pub fn to_slug(text: &str) -> String {
    reduce(text, "")
}

fn reduce(text: &str, separator: &str) -> String {
    let kept: String = normalize(text)
        .chars()
        .filter(|&c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '’') || c.is_whitespace()
        })
        .collect();

    let trimmed = kept.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut in_run = false;
    for c in trimmed.chars() {
        if c.is_whitespace() || c == '’' {
            if !in_run {
                out.push_str(separator);
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
