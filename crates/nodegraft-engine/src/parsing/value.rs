use std::sync::LazyLock;

use regex::Regex;

use crate::model::{TypeExpr, ValueShape};

static IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").unwrap());
static IDENT_UNION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+(?:\s*\|\s*\w+)+$").unwrap());
static LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"[^"]*"$"#).unwrap());
static LITERAL_UNION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"[^"]*"(?:\s*\|\s*"[^"]*")+$"#).unwrap());

/// Classifies one trimmed scalar value token.
///
/// Exactly one of four mutually exclusive whole-token forms can match; a
/// token matching none of them is unclassifiable and the caller drops the
/// property. With `list` set the rendered text is wrapped in the `Array<...>`
/// container and the expression carries the list form of its shape.
pub fn classify(token: &str, list: bool) -> Option<TypeExpr> {
    let shape = if IDENT_UNION.is_match(token) {
        ValueShape::IdentifierUnion
    } else if LITERAL_UNION.is_match(token) {
        ValueShape::LiteralUnion
    } else if LITERAL.is_match(token) {
        ValueShape::Literal
    } else if IDENT.is_match(token) {
        ValueShape::Identifier
    } else {
        return None;
    };

    let text = if list {
        format!("Array<{token}>")
    } else {
        token.to_string()
    };
    Some(TypeExpr { shape, list, text })
}
