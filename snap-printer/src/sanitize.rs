//! Text sanitization for single-byte code page printers
//!
//! Most low-cost thermal printers cannot reliably render accented Latin
//! characters or currency symbols, whatever code page is selected. Every
//! string embedded in a receipt is folded down to a small ASCII subset:
//! - Canonical decomposition (NFD), then combining marks are dropped
//!   (`é` → `e`, `Ñ` → `N`)
//! - Anything outside letters, digits, whitespace and `+ - . , :` is removed
//! - Whitespace is emitted as a plain space
//! - The result is uppercased

use tracing::instrument;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Check whether a character can appear in sanitized output
pub fn is_printable(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '.' | ',' | ':')
}

/// Sanitize a string for printing
///
/// Output only contains characters accepted by [`is_printable`].
/// Applying it twice gives the same result as applying it once.
#[instrument(level = "trace")]
pub fn sanitize(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.' | ',' | ':') {
                Some(c.to_ascii_uppercase())
            } else {
                None
            }
        })
        .collect()
}
