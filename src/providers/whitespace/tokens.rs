//! Tokenisation, lemmatisation and vector helpers for the whitespace model.
//!
//! Words are runs of word characters; every other non-space character is a
//! token of its own. Text made only of whitespace is a single token.

use std::sync::LazyLock;

use regex::Regex;

#[expect(clippy::expect_used, reason = "literal pattern cannot fail")]
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").expect("valid regex"));

/// Split `text` into `(byte offset, token)` pairs.
///
/// Non-empty text always yields at least one token: whitespace-only text
/// comes back whole.
///
/// # Examples
///
/// ```
/// use nlp_bridge::providers::whitespace::tokens::split_tokens;
///
/// let tokens: Vec<_> = split_tokens("Hi, you").collect();
/// assert_eq!(tokens, vec![(0, "Hi"), (2, ","), (4, "you")]);
/// assert_eq!(split_tokens("  ").collect::<Vec<_>>(), vec![(0, "  ")]);
/// ```
pub fn split_tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut tokens: Vec<_> = TOKEN_PATTERN
        .find_iter(text)
        .map(|m| (m.start(), m.as_str()))
        .collect();
    if tokens.is_empty() && !text.is_empty() {
        tokens.push((0, text));
    }
    tokens.into_iter()
}

/// Naïvely lemmatise an English token: lower-case and strip a plural "s".
///
/// Avoids stripping "s" from short words like "this".
///
/// # Examples
///
/// ```
/// use nlp_bridge::providers::whitespace::tokens::lemmatise;
///
/// assert_eq!(lemmatise("Jaguars"), "jaguar");
/// assert_eq!(lemmatise("this"), "this");
/// ```
#[must_use]
pub fn lemmatise(token: &str) -> String {
    const EXCEPTIONS: &[&str] = &["this", "his", "is", "was", "has", "does"];
    let lower = token.to_lowercase();
    if lower.len() <= 3 || lower.ends_with("ss") || EXCEPTIONS.contains(&lower.as_str()) {
        return lower;
    }
    if let Some(stem) = lower.strip_suffix('s') {
        return stem.to_owned();
    }
    lower
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over `bytes`.
fn fnv1a(bytes: impl IntoIterator<Item = u8>) -> u64 {
    bytes.into_iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Vector for `token` with components in `[-1, 1]`.
///
/// Components come from FNV-1a over the lower-cased token and the dimension
/// index, so vectors are identical across builds and platforms and casing
/// does not change them.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "maps hash bits onto [-1, 1]")]
pub fn hashed_vector(token: &str, width: usize) -> Box<[f32]> {
    let key = token.to_lowercase();
    (0..width)
        .map(|dim| {
            let dim = u64::try_from(dim).unwrap_or(u64::MAX);
            let hash = fnv1a(key.bytes().chain(dim.to_le_bytes()));
            let top = u16::try_from(hash >> 48).unwrap_or(u16::MAX);
            f32::from(top) / f32::from(u16::MAX) * 2.0 - 1.0
        })
        .collect()
}
