/// Opening delimiter of a definition block. Matched anywhere in the text,
/// not only at line starts, per the grammar documents' loose conventions.
const OPEN: &str = "```js";
const CLOSE: &str = "```";

/// Lazy iterator over the bodies of all definition blocks in one fragment.
///
/// Yields the text strictly between each ` ```js ` … ` ``` ` pair in document
/// order. Blocks do not nest; an unterminated opener ends the sequence. The
/// iterator is `Clone`, so a scan can be restarted from any point.
#[derive(Clone)]
pub struct BlockIter<'a> {
    text: &'a str,
    pos: usize,
}

pub fn blocks(text: &str) -> BlockIter<'_> {
    BlockIter { text, pos: 0 }
}

impl<'a> Iterator for BlockIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let open = self.text[self.pos..].find(OPEN)?;
        let body_start = self.pos + open + OPEN.len();
        let Some(close) = self.text[body_start..].find(CLOSE) else {
            self.pos = self.text.len();
            return None;
        };
        let body_end = body_start + close;
        self.pos = body_end + CLOSE.len();
        Some(&self.text[body_start..body_end])
    }
}
