//! Item domain model.
//!
//! An [`Item`] is one input line after ingestion cleanup: surrounding ASCII
//! whitespace removed and the remainder truncated to the configured maximum
//! length without splitting a multi-byte UTF-8 character. Items are created
//! once and never mutated.

use std::fmt;

/// Returns `true` for UTF-8 continuation bytes (`10xxxxxx`).
#[inline]
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Returns the largest position `p <= max_len` that is a codepoint boundary.
///
/// If `text` already fits, its full length is returned. Otherwise the
/// position backs off while it points at a continuation byte. The result is
/// always a valid cut point for `&text[..p]`, worst case `0`.
///
/// # Examples
///
/// ```
/// use sift::domain::find_utf8_boundary;
///
/// let text = "café".as_bytes();
/// assert_eq!(find_utf8_boundary(text, 4), 3);
/// assert_eq!(find_utf8_boundary(text, 5), 5);
/// ```
#[must_use]
pub fn find_utf8_boundary(text: &[u8], max_len: usize) -> usize {
    if text.len() <= max_len {
        return text.len();
    }

    let mut pos = max_len;
    while pos > 0 && is_continuation(text[pos]) {
        pos -= 1;
    }
    pos
}

/// Strips leading and trailing ASCII whitespace.
fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |p| p + 1);
    &bytes[start..end]
}

/// One immutable input line.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Item(Box<[u8]>);

impl Item {
    /// Builds an item from a raw input line.
    ///
    /// Returns `None` for lines that are empty after trimming; those are
    /// dropped during ingestion.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::domain::Item;
    ///
    /// let item = Item::from_line(b"  src/main.rs \r", 64).unwrap();
    /// assert_eq!(item.as_bytes(), b"src/main.rs");
    /// assert!(Item::from_line(b" \t ", 64).is_none());
    /// ```
    #[must_use]
    pub fn from_line(raw: &[u8], max_len: usize) -> Option<Self> {
        let trimmed = trim_ascii_whitespace(raw);
        if trimmed.is_empty() {
            return None;
        }
        let cut = find_utf8_boundary(trimmed, max_len);
        if cut == 0 {
            return None;
        }
        Some(Self(trimmed[..cut].into()))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Item {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({:?})", String::from_utf8_lossy(&self.0))
    }
}
