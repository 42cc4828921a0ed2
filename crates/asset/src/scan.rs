//! Byte cursor over OBJ text: whitespace handling, literal matching and
//! numeric literal scanning.

/// Bytes <= 0x20 count as whitespace (space, tab, CR, LF and any control
/// byte); everything else, including bytes > 127, is an ordinary character.
fn is_whitespace(c: u8) -> bool {
    c <= 0x20
}

fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Forward-only cursor over an immutable byte buffer.
///
/// Every operation is total: an exhausted cursor never reads past the end
/// of the buffer.
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Skip whitespace, newlines included.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !is_whitespace(c) {
                break;
            }
            self.bump();
        }
    }

    /// Skip whitespace but stop at a newline so statement boundaries
    /// stay visible to the caller.
    pub fn skip_whitespace_until_newline(&mut self) {
        while let Some(c) = self.peek() {
            if !is_whitespace(c) || c == b'\n' {
                break;
            }
            self.bump();
        }
    }

    /// Skip everything up to (not past) the next newline.
    pub fn skip_until_newline(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'\n' {
                break;
            }
            self.bump();
        }
    }

    /// Match a literal, advancing past it on success and leaving the
    /// position untouched on failure.
    pub fn match_literal(&mut self, literal: &[u8]) -> bool {
        if self.data[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume a run of non-whitespace bytes and return it. May be empty.
    pub fn take_word(&mut self) -> &'a [u8] {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_whitespace(c) {
                break;
            }
            self.bump();
        }
        &self.data[start..self.pos]
    }

    /// Read a signed decimal float: optional `-`, integer digit run,
    /// optional `.` and fractional digit run. Returns `None` when no digit
    /// was consumed at all, restoring the position so optional fields can
    /// be probed; leading whitespace is consumed either way.
    pub fn read_float(&mut self) -> Option<f32> {
        self.skip_whitespace();
        let start = self.pos;

        let sign = if self.match_literal(b"-") { -1.0f32 } else { 1.0 };

        let mut number = 0.0f32;
        let mut digits = false;
        while let Some(c) = self.peek() {
            if !is_digit(c) {
                break;
            }
            number = number * 10.0 + f32::from(c - b'0');
            digits = true;
            self.bump();
        }

        if self.match_literal(b".") {
            let mut divisor = 1.0f32;
            while let Some(c) = self.peek() {
                if !is_digit(c) {
                    break;
                }
                divisor /= 10.0;
                number += f32::from(c - b'0') * divisor;
                digits = true;
                self.bump();
            }
        }

        if !digits {
            self.pos = start;
            return None;
        }
        Some(sign * number)
    }

    /// Read a signed decimal integer. Same probing contract as
    /// [`Cursor::read_float`].
    pub fn read_int64(&mut self) -> Option<i64> {
        self.skip_whitespace();
        let start = self.pos;

        let sign: i64 = if self.match_literal(b"-") { -1 } else { 1 };

        let mut number: i64 = 0;
        let mut digits = false;
        while let Some(c) = self.peek() {
            if !is_digit(c) {
                break;
            }
            number = number * 10 + i64::from(c - b'0');
            digits = true;
            self.bump();
        }

        if !digits {
            self.pos = start;
            return None;
        }
        Some(sign * number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_float_literals() {
        assert_eq!(Cursor::new(b"3.5").read_float(), Some(3.5));
        assert_eq!(Cursor::new(b"-0.25").read_float(), Some(-0.25));
        assert_eq!(Cursor::new(b"7").read_float(), Some(7.0));
        assert_eq!(Cursor::new(b".5").read_float(), Some(0.5));
        assert_eq!(Cursor::new(b"2.").read_float(), Some(2.0));
    }

    #[test]
    fn read_float_consumes_leading_whitespace_so_reads_chain() {
        let mut cursor = Cursor::new(b"  1.5 -2 \n 3");
        assert_eq!(cursor.read_float(), Some(1.5));
        assert_eq!(cursor.read_float(), Some(-2.0));
        assert_eq!(cursor.read_float(), Some(3.0));
        assert_eq!(cursor.read_float(), None);
        assert!(cursor.at_end());
    }

    #[test]
    fn read_float_without_digits_restores_position() {
        let mut cursor = Cursor::new(b" -x");
        assert_eq!(cursor.read_float(), None);
        // The sign must have been given back.
        assert!(cursor.match_literal(b"-x"));
    }

    #[test]
    fn read_int64_literals() {
        assert_eq!(Cursor::new(b"42").read_int64(), Some(42));
        assert_eq!(Cursor::new(b"-12").read_int64(), Some(-12));
        assert_eq!(Cursor::new(b"abc").read_int64(), None);
    }

    #[test]
    fn match_literal_restores_on_failure() {
        let mut cursor = Cursor::new(b"vn 1");
        assert!(!cursor.match_literal(b"vt"));
        assert!(cursor.match_literal(b"vn"));
        assert!(!cursor.match_literal(b"never at end"));
    }

    #[test]
    fn skip_helpers_respect_newlines() {
        let mut cursor = Cursor::new(b"   \t\nx");
        cursor.skip_whitespace_until_newline();
        assert_eq!(cursor.peek(), Some(b'\n'));

        let mut cursor = Cursor::new(b"junk until eol\nx");
        cursor.skip_until_newline();
        assert!(cursor.match_literal(b"\nx"));
    }

    #[test]
    fn take_word_stops_at_whitespace() {
        let mut cursor = Cursor::new(b"Cube.001 rest");
        assert_eq!(cursor.take_word(), b"Cube.001");
        assert_eq!(cursor.peek(), Some(b' '));
    }

    #[test]
    fn empty_input_is_total() {
        let mut cursor = Cursor::new(b"");
        assert!(cursor.at_end());
        cursor.skip_whitespace();
        cursor.skip_until_newline();
        assert!(!cursor.match_literal(b"v"));
        assert_eq!(cursor.read_float(), None);
        assert_eq!(cursor.take_word(), b"");
    }
}
