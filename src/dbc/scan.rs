//! Low-level scanner for DBC text.
//!
//! Skipping is line-aware: [`Scanner::skip_inline`] consumes spaces, tabs and
//! comments but never a bare newline, so newline-terminated lists (node
//! lists, receiver lists) stop where the line stops. Statement boundaries are
//! consumed explicitly with [`Scanner::end_cmd`], which also swallows blank
//! and comment-only lines.

#[derive(Debug)]
pub(crate) struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a str) -> Scanner<'a> {
        Scanner { src, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        &self.src.as_bytes()[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Skips spaces, tabs, `\r` and comments. Line comments stop before the
    /// newline; block comments may span lines. Never consumes a bare newline.
    pub(crate) fn skip_inline(&mut self) {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\r') => self.pos += 1,
                Some(b'/') if self.bytes().starts_with(b"//") => {
                    let rest = self.bytes();
                    let eol = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
                    self.pos += eol;
                }
                Some(b'/') if self.bytes().starts_with(b"/*") => {
                    let rest = &self.bytes()[2..];
                    let end = rest.windows(2).position(|w| w == b"*/");
                    self.pos += 2 + end.map_or(rest.len(), |e| e + 2);
                }
                _ => return,
            }
        }
    }

    /// Consumes any run of line endings, including blank and comment-only
    /// lines. Never fails; zero endings are fine.
    pub(crate) fn end_cmd(&mut self) {
        loop {
            self.skip_inline();
            if self.peek() == Some(b'\n') {
                self.pos += 1;
            } else {
                return;
            }
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Matches `kw` as a whole word (the next byte must not continue an
    /// identifier). Leaves the position untouched on mismatch.
    pub(crate) fn keyword(&mut self, kw: &str) -> bool {
        self.skip_inline();
        let rest = self.bytes();
        if !rest.starts_with(kw.as_bytes()) {
            return false;
        }
        if rest.get(kw.len()).copied().is_some_and(is_ident_char) {
            return false;
        }
        self.pos += kw.len();
        true
    }

    /// Matches a single punctuation byte.
    pub(crate) fn token(&mut self, c: u8) -> bool {
        self.skip_inline();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`
    pub(crate) fn ident(&mut self) -> Option<&'a str> {
        self.skip_inline();
        let rest = self.bytes();
        if !rest.first().copied().is_some_and(is_ident_start) {
            return None;
        }
        let len = rest.iter().take_while(|&&b| is_ident_char(b)).count();
        let out = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Some(out)
    }

    fn digits(&mut self) -> Option<&'a str> {
        let rest = self.bytes();
        let len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if len == 0 {
            return None;
        }
        let out = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Some(out)
    }

    pub(crate) fn uint(&mut self) -> Option<u32> {
        self.skip_inline();
        self.digits()?.parse().ok()
    }

    pub(crate) fn int(&mut self) -> Option<i32> {
        self.skip_inline();
        let start = self.pos;
        if self.peek() == Some(b'-') || self.peek() == Some(b'+') {
            self.pos += 1;
        }
        match self.digits() {
            Some(_) => self.src[start..self.pos].parse().ok(),
            None => {
                self.pos = start;
                None
            }
        }
    }

    /// Decimal double: optional sign, digits with optional fraction and
    /// exponent, or a bare fraction like `.5`.
    pub(crate) fn double(&mut self) -> Option<f64> {
        self.skip_inline();
        let start = self.pos;
        if self.peek() == Some(b'-') || self.peek() == Some(b'+') {
            self.pos += 1;
        }
        let whole = self.digits().is_some();
        let mut frac = false;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac = self.digits().is_some();
        }
        if !whole && !frac {
            self.pos = start;
            return None;
        }
        if self.peek() == Some(b'e') || self.peek() == Some(b'E') {
            let exp_start = self.pos;
            self.pos += 1;
            if self.peek() == Some(b'-') || self.peek() == Some(b'+') {
                self.pos += 1;
            }
            if self.digits().is_none() {
                self.pos = exp_start;
            }
        }
        self.src[start..self.pos].parse().ok()
    }

    /// Quoted string with `\\` and `\"` escapes; may span lines. Any other
    /// backslash is kept literally.
    pub(crate) fn quoted(&mut self) -> Option<String> {
        self.skip_inline();
        if self.peek() != Some(b'"') {
            return None;
        }
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => {
                    self.pos = start;
                    return None;
                }
                Some(b'"') => {
                    self.pos += 1;
                    return Some(out);
                }
                Some(b'\\') if matches!(self.src.as_bytes().get(self.pos + 1), Some(b'\\') | Some(b'"')) => {
                    out.push(self.src.as_bytes()[self.pos + 1] as char);
                    self.pos += 2;
                }
                Some(_) => {
                    // Advance one full character; the content may be non-ASCII.
                    let ch = self.src[self.pos..].chars().next().expect("peek saw a byte");
                    out.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    /// 1-based line number and text of the line containing the current
    /// position, for diagnostics.
    pub(crate) fn line_info(&self) -> (usize, &'a str) {
        let upto = &self.src[..self.pos.min(self.src.len())];
        let line_no = upto.bytes().filter(|&b| b == b'\n').count() + 1;
        let line_start = upto.rfind('\n').map_or(0, |p| p + 1);
        let rest = &self.src[line_start..];
        let line = rest.split_once('\n').map_or(rest, |(l, _)| l);
        (line_no, line.trim_end_matches('\r'))
    }
}
