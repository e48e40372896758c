/// A byte cursor for scanning declaration text.
///
/// Every parsing routine owns its own cursor; recursive calls construct a
/// fresh cursor over their sub-slice, so sibling invocations can never
/// disturb each other's scan position.
#[derive(Clone)]
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Current byte offset into the underlying string.
    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
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

    /// Checks if the remaining input starts with the given pattern.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat.as_bytes())
    }

    /// Consumes any run of ASCII whitespace, including newlines.
    pub fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.i += 1;
        }
    }

    /// Consumes a run of word bytes (`[A-Za-z0-9_]`), returning it.
    /// Returns `None` without advancing when the cursor is not at a word.
    pub fn take_word(&mut self) -> Option<&'a str> {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !is_word_byte(b) {
                break;
            }
            self.i += 1;
        }
        (self.i > start).then(|| &self.s[start..self.i])
    }

    /// Consumes up to and including the next occurrence of `stop`, returning
    /// the text before it. When `stop` is absent the cursor moves to the end
    /// of input and `None` is returned.
    pub fn take_until(&mut self, stop: u8) -> Option<&'a str> {
        let start = self.i;
        while let Some(b) = self.peek() {
            self.i += 1;
            if b == stop {
                return Some(&self.s[start..self.i - 1]);
            }
        }
        None
    }

    /// Consumes a balanced `{ ... }` group starting at the current position,
    /// returning the inner text between the outermost braces. The body is the
    /// shortest span whose braces balance back to the top nesting level.
    /// Returns `None` without advancing when the cursor is not at `{` or the
    /// group never closes.
    pub fn take_balanced(&mut self) -> Option<&'a str> {
        if self.peek() != Some(b'{') {
            return None;
        }
        let saved = self.i;
        self.i += 1;
        let inner_start = self.i;
        let mut depth = 1usize;
        while let Some(b) = self.peek() {
            self.i += 1;
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&self.s[inner_start..self.i - 1]);
                    }
                }
                _ => {}
            }
        }
        self.i = saved;
        None
    }
}

pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
