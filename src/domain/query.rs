//! UTF-8 safe query buffer.
//!
//! [`QueryBuffer`] holds the live search text as raw bytes. Edits never leave
//! a partial multi-byte character behind: deletion walks back over
//! continuation bytes, and appends that would exceed the capacity are
//! rejected whole.

use super::item::is_continuation;

#[inline]
const fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Mutable search text capped at a maximum byte length.
///
/// Every mutating method returns `true` when the contents changed, which the
/// caller uses to decide whether the filter must be recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuffer {
    bytes: Vec<u8>,
    max_len: usize,
}

impl QueryBuffer {
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(max_len),
            max_len,
        }
    }

    /// Appends `text` only if the whole of it fits.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::domain::QueryBuffer;
    ///
    /// let mut query = QueryBuffer::new(4);
    /// assert!(query.append(b"abc"));
    /// assert!(!query.append(b"de"));
    /// assert_eq!(query.as_bytes(), b"abc");
    /// ```
    pub fn append(&mut self, text: &[u8]) -> bool {
        if text.is_empty() || self.bytes.len() + text.len() > self.max_len {
            return false;
        }
        self.bytes.extend_from_slice(text);
        true
    }

    /// Appends a single character, UTF-8 encoded.
    pub fn push_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.append(c.encode_utf8(&mut buf).as_bytes())
    }

    /// Removes the trailing codepoint, however many bytes it spans.
    pub fn delete_last_codepoint(&mut self) -> bool {
        let Some(mut pos) = self.bytes.len().checked_sub(1) else {
            return false;
        };
        while pos > 0 && is_continuation(self.bytes[pos]) {
            pos -= 1;
        }
        self.bytes.truncate(pos);
        true
    }

    /// Removes trailing blanks, then the word before them.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::domain::QueryBuffer;
    ///
    /// let mut query = QueryBuffer::new(64);
    /// query.append(b"src main  ");
    /// query.delete_last_word();
    /// assert_eq!(query.as_bytes(), b"src ");
    /// ```
    pub fn delete_last_word(&mut self) -> bool {
        let before = self.bytes.len();

        while self.bytes.last().copied().is_some_and(is_blank) {
            self.bytes.pop();
        }
        while let Some(&last) = self.bytes.last() {
            if is_blank(last) {
                break;
            }
            self.delete_last_codepoint();
        }

        self.bytes.len() != before
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.bytes.is_empty();
        self.bytes.clear();
        changed
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lossy text view for display.
    #[must_use]
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.max_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_is_all_or_nothing() {
        let mut query = QueryBuffer::new(5);
        assert!(query.append(b"caf"));
        // "é" is two bytes and fits exactly
        assert!(query.append("é".as_bytes()));
        assert_eq!(query.len(), 5);
        assert!(!query.append(b"x"));
        assert_eq!(query.as_bytes(), "café".as_bytes());
    }

    #[test]
    fn append_rejects_multibyte_that_would_overflow() {
        let mut query = QueryBuffer::new(3);
        assert!(query.append(b"ab"));
        assert!(!query.push_char('日'));
        assert_eq!(query.as_bytes(), b"ab");
    }

    #[test]
    fn delete_removes_whole_trailing_codepoint() {
        let mut query = QueryBuffer::new(16);
        query.append("a日".as_bytes());
        assert_eq!(query.len(), 4);

        assert!(query.delete_last_codepoint());
        assert_eq!(query.as_bytes(), b"a");

        assert!(query.delete_last_codepoint());
        assert!(query.is_empty());
        assert!(!query.delete_last_codepoint());
    }

    #[test]
    fn delete_word_stops_at_blank() {
        let mut query = QueryBuffer::new(64);
        query.append("foo\tbär".as_bytes());
        assert!(query.delete_last_word());
        assert_eq!(query.as_bytes(), b"foo\t");

        assert!(query.delete_last_word());
        assert!(query.is_empty());
        assert!(!query.delete_last_word());
    }

    #[test]
    fn delete_word_on_only_blanks_empties_buffer() {
        let mut query = QueryBuffer::new(8);
        query.append(b" \t ");
        assert!(query.delete_last_word());
        assert!(query.is_empty());
    }

    #[test]
    fn clear_reports_change() {
        let mut query = QueryBuffer::new(8);
        assert!(!query.clear());
        query.append(b"x");
        assert!(query.clear());
        assert_eq!(query.as_text(), "");
    }
}
