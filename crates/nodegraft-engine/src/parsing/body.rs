use super::cursor::Cursor;
use super::value;
use crate::model::{PropMap, PropValue};

/// Parses a raw interface body into an ordered property map.
///
/// Each property has the form `name: value;`. Value forms, in priority
/// order: a scalar token (no `[` or `{`), a nested `{ ... }` object body
/// (parsed recursively), or a `[ ... ]` list delegated to the classifier
/// with the list flag set. Unclassifiable values drop their property; a
/// later property with the same name overwrites an earlier one.
///
/// Each call owns its own cursor and recursion happens on the inner slice,
/// so sibling object bodies can never corrupt each other's scan position.
pub fn parse_interface_body(raw: &str) -> PropMap {
    let mut props = PropMap::new();
    let mut cur = Cursor::new(raw);

    loop {
        cur.skip_ws();
        if cur.eof() {
            break;
        }
        let Some(name) = cur.take_word() else {
            cur.bump();
            continue;
        };
        cur.skip_ws();
        if cur.peek() != Some(b':') {
            continue;
        }
        cur.bump();
        cur.skip_ws();

        match cur.peek() {
            Some(b'{') => {
                let Some(inner) = cur.take_balanced() else {
                    break;
                };
                if eat_terminator(&mut cur) {
                    props.insert(name.to_string(), PropValue::Object(parse_interface_body(inner)));
                }
            }
            Some(b'[') => {
                cur.bump();
                let Some(inner) = cur.take_until(b']') else {
                    break;
                };
                if eat_terminator(&mut cur) {
                    record(&mut props, name, inner.trim(), true);
                }
            }
            _ => {
                let Some(text) = cur.take_until(b';') else {
                    break;
                };
                record(&mut props, name, text.trim(), false);
            }
        }
    }

    props
}

fn eat_terminator(cur: &mut Cursor<'_>) -> bool {
    cur.skip_ws();
    if cur.peek() == Some(b';') {
        cur.bump();
        true
    } else {
        false
    }
}

fn record(props: &mut PropMap, name: &str, token: &str, list: bool) {
    match value::classify(token, list) {
        Some(expr) => {
            props.insert(name.to_string(), PropValue::Expr(expr));
        }
        None => {
            tracing::warn!(property = name, value = token, "unclassifiable value, dropping property");
        }
    }
}
