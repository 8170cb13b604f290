//! Fuzzy subsequence matching.
//!
//! The predicate is a single greedy left-to-right scan: each needle byte is
//! searched for from the current haystack cursor onward, and the cursor never
//! moves back. ASCII bytes compare case-insensitively; every other byte must
//! match exactly. There is no scoring, only "matches or not".

/// Compares one needle byte against one haystack byte.
#[inline]
fn byte_matches(needle: u8, hay: u8) -> bool {
    if needle.is_ascii() {
        needle.to_ascii_lowercase() == hay.to_ascii_lowercase()
    } else {
        needle == hay
    }
}

/// Returns `true` if every byte of `needle` appears in `haystack` in order.
///
/// An empty needle always matches.
///
/// # Examples
///
/// ```
/// use sift::domain::fuzzy_match;
///
/// assert!(fuzzy_match(b"hello world", b"hlo"));
/// assert!(!fuzzy_match(b"hello world", b"dlrow"));
/// assert!(fuzzy_match("CAFÉ".as_bytes(), b"caf"));
/// assert!(!fuzzy_match("café".as_bytes(), b"cafe"));
/// ```
#[must_use]
pub fn fuzzy_match(haystack: &[u8], needle: &[u8]) -> bool {
    let mut cursor = 0;
    for &n in needle {
        match haystack[cursor..].iter().position(|&h| byte_matches(n, h)) {
            Some(offset) => cursor += offset + 1,
            None => return false,
        }
    }
    true
}

/// Byte positions in `haystack` consumed by the same scan as [`fuzzy_match`].
///
/// Returns `None` when the needle does not match. Used for highlighting, so
/// the positions always agree with the filter's decision.
#[must_use]
pub fn match_positions(haystack: &[u8], needle: &[u8]) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(needle.len());
    let mut cursor = 0;
    for &n in needle {
        let offset = haystack[cursor..].iter().position(|&h| byte_matches(n, h))?;
        positions.push(cursor + offset);
        cursor += offset + 1;
    }
    Some(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_needle_matches_anything() {
        assert!(fuzzy_match(b"", b""));
        assert!(fuzzy_match(b"anything", b""));
        assert!(fuzzy_match("日本".as_bytes(), b""));
    }

    #[test]
    fn order_is_preserved() {
        assert!(fuzzy_match(b"hello world", b"hlo"));
        assert!(fuzzy_match(b"hello world", b"hello world"));
        assert!(!fuzzy_match(b"hello world", b"dlrow"));
        assert!(!fuzzy_match(b"abc", b"abcd"));
    }

    #[test]
    fn ascii_is_case_insensitive_both_ways() {
        assert!(fuzzy_match("CAFÉ".as_bytes(), b"caf"));
        assert!(fuzzy_match(b"makefile", b"MF"));
    }

    #[test]
    fn non_ascii_is_byte_exact() {
        assert!(!fuzzy_match("café".as_bytes(), b"cafe"));
        assert!(fuzzy_match("café".as_bytes(), "cé".as_bytes()));
        // No case folding outside ASCII
        assert!(!fuzzy_match("CAFÉ".as_bytes(), "é".as_bytes()));
    }

    #[test]
    fn needle_longer_than_haystack_fails() {
        assert!(!fuzzy_match(b"", b"a"));
    }

    #[test]
    fn positions_follow_greedy_scan() {
        assert_eq!(match_positions(b"hello world", b"hlo"), Some(vec![0, 2, 4]));
        assert_eq!(match_positions(b"Src/Main.rs", b"sm"), Some(vec![0, 4]));
        assert_eq!(match_positions(b"abc", b""), Some(vec![]));
        assert_eq!(match_positions(b"abc", b"cb"), None);
    }

    #[test]
    fn positions_agree_with_predicate() {
        let cases: [(&[u8], &[u8]); 4] = [
            (b"fuzzy finder", b"ffd"),
            (b"fuzzy finder", b"zzz"),
            ("naïve".as_bytes(), "ï".as_bytes()),
            (b"", b"x"),
        ];
        for (hay, needle) in cases {
            assert_eq!(
                fuzzy_match(hay, needle),
                match_positions(hay, needle).is_some()
            );
        }
    }
}
