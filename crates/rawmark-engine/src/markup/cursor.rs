/// A cursor for byte-by-byte markup scanning.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of input.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks `n` bytes ahead of the current position.
    pub fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    /// Case-insensitive [`Cursor::starts_with`], for tag name matching.
    pub fn starts_with_ignore_case(&self, pat: &[u8]) -> bool {
        let rest = &self.s.as_bytes()[self.i..];
        rest.len() >= pat.len() && rest[..pat.len()].eq_ignore_ascii_case(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes bytes while `pred` holds and returns the consumed slice.
    ///
    /// `pred` must stop at an ASCII byte so the slice ends on a character
    /// boundary.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        &self.s[start..self.i]
    }

    /// Consumes any run of ASCII whitespace.
    pub fn skip_whitespace(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.i, 1);
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn starts_with_ignore_case_matches_tags() {
        let cur = Cursor::new("<SCRIPT src=x>");
        assert!(cur.starts_with_ignore_case(b"<script"));
        assert!(!cur.starts_with(b"<script"));
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let cur = Cursor::new("ab");
        assert!(!cur.starts_with(b"abcdef"));
        assert!(!cur.starts_with_ignore_case(b"abcdef"));
    }

    #[test]
    fn peek_ahead_reads_past_cursor() {
        let cur = Cursor::new("abc");
        assert_eq!(cur.peek_ahead(0), Some(b'a'));
        assert_eq!(cur.peek_ahead(2), Some(b'c'));
        assert_eq!(cur.peek_ahead(3), None);
    }

    #[test]
    fn take_while_consumes_matching_run() {
        let mut cur = Cursor::new("abc123");
        let taken = cur.take_while(|b| b.is_ascii_alphabetic());
        assert_eq!(taken, "abc");
        assert_eq!(cur.peek(), Some(b'1'));
    }

    #[test]
    fn skip_whitespace_stops_at_content() {
        let mut cur = Cursor::new("  \t\nx");
        cur.skip_whitespace();
        assert_eq!(cur.peek(), Some(b'x'));
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x");
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None); // idempotent
    }
}
