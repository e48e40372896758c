use super::cursor::{Cursor, is_word_byte};

/// Keyword prefixing a declaration that reopens an earlier definition.
const REOPEN: &str = "extend";

const MAX_ANCESTORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Enum,
    Interface,
}

impl DeclKind {
    fn keyword(self) -> &'static str {
        match self {
            DeclKind::Enum => "enum",
            DeclKind::Interface => "interface",
        }
    }
}

/// One declaration split out of a block, body still unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDecl<'a> {
    pub reopened: bool,
    pub kind: DeclKind,
    pub name: &'a str,
    pub ancestors: Vec<&'a str>,
    pub body: &'a str,
}

/// Lazy iterator over the declarations of one block body.
///
/// Scans left to right, non-overlapping, advancing past each consumed
/// declaration. Text that superficially resembles a declaration but fails
/// the full header grammar is skipped as prose commentary.
pub struct DeclIter<'a> {
    text: &'a str,
    pos: usize,
}

pub fn declarations(block: &str) -> DeclIter<'_> {
    DeclIter { text: block, pos: 0 }
}

impl<'a> Iterator for DeclIter<'a> {
    type Item = RawDecl<'a>;

    fn next(&mut self) -> Option<RawDecl<'a>> {
        while let Some((kw_start, kind)) = next_keyword(self.text, self.pos) {
            let after = kw_start + kind.keyword().len();
            match parse_header(&self.text[after..]) {
                Some(header) => {
                    let reopened = has_reopen_marker(&self.text[..kw_start]);
                    self.pos = after + header.consumed;
                    return Some(RawDecl {
                        reopened,
                        kind,
                        name: header.name,
                        ancestors: header.ancestors,
                        body: header.body,
                    });
                }
                None => {
                    tracing::debug!(
                        keyword = kind.keyword(),
                        offset = kw_start,
                        "skipping declaration candidate with malformed header"
                    );
                    self.pos = after;
                }
            }
        }
        None
    }
}

struct Header<'a> {
    name: &'a str,
    ancestors: Vec<&'a str>,
    body: &'a str,
    consumed: usize,
}

/// Parses `Name [<: A[, B[, C]]] { body }` after a declaration keyword.
fn parse_header(s: &str) -> Option<Header<'_>> {
    let mut cur = Cursor::new(s);
    cur.skip_ws();
    let name = cur.take_word()?;
    cur.skip_ws();

    let mut ancestors = Vec::new();
    if cur.starts_with("<:") {
        cur.bump_n(2);
        loop {
            cur.skip_ws();
            ancestors.push(cur.take_word()?);
            cur.skip_ws();
            if cur.peek() != Some(b',') {
                break;
            }
            // a fourth ancestor makes the whole header unmatchable
            if ancestors.len() == MAX_ANCESTORS {
                return None;
            }
            cur.bump();
        }
    }

    cur.skip_ws();
    let body = cur.take_balanced()?;
    Some(Header {
        name,
        ancestors,
        body,
        consumed: cur.pos(),
    })
}

/// Finds the next word-bounded `interface` or `enum` keyword at or after
/// `from`, whichever comes first.
fn next_keyword(text: &str, from: usize) -> Option<(usize, DeclKind)> {
    let mut search = from;
    while search < text.len() {
        let hay = &text[search..];
        let candidate = [DeclKind::Interface, DeclKind::Enum]
            .into_iter()
            .filter_map(|kind| hay.find(kind.keyword()).map(|i| (search + i, kind)))
            .min_by_key(|(idx, _)| *idx)?;
        let (idx, kind) = candidate;
        if word_bounded(text, idx, kind.keyword().len()) {
            return Some((idx, kind));
        }
        search = idx + 1;
    }
    None
}

fn word_bounded(text: &str, idx: usize, len: usize) -> bool {
    let bytes = text.as_bytes();
    let before_ok = idx == 0 || !is_word_byte(bytes[idx - 1]);
    let after_ok = !bytes.get(idx + len).copied().is_some_and(is_word_byte);
    before_ok && after_ok
}

/// The reopening marker is the word `extend` appearing earlier on the same
/// line as the declaration keyword.
fn has_reopen_marker(prefix: &str) -> bool {
    let line = prefix.rsplit('\n').next().unwrap_or(prefix);
    line.split_whitespace().any(|token| token == REOPEN)
}
