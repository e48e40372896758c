use indexmap::IndexMap;

/// Ordered property map of an interface body. Iteration order is textual
/// declaration order; re-inserting an existing name keeps its position.
pub type PropMap = IndexMap<String, PropValue>;

/// Scalar shape of a classified property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A single bare identifier, e.g. `Expression`.
    Identifier,
    /// A single quoted string, e.g. `"Identifier"`; the discriminant form.
    Literal,
    /// Two or more identifiers joined by `|`.
    IdentifierUnion,
    /// Two or more quoted strings joined by `|`.
    LiteralUnion,
}

/// A classified type expression.
///
/// `text` is the rendered form the emitter prints verbatim; for list values
/// it is already wrapped in the `Array<...>` container, so `shape` + `list`
/// fully determine how `text` was produced and how it reads back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    pub shape: ValueShape,
    pub list: bool,
    pub text: String,
}

/// One property's declared value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Nested object body, e.g. `regex: { pattern: string; flags: string; };`.
    /// Objects have no list form in this grammar.
    Object(PropMap),
    Expr(TypeExpr),
}

/// Body of a definition. The enum/interface kind tag and the kind-specific
/// payload are one tagged union.
#[derive(Debug, Clone, PartialEq)]
pub enum DefBody {
    /// Enum definition: a raw union-type expression.
    Union(String),
    /// Interface definition: ordered property map.
    Props(PropMap),
}

impl DefBody {
    pub fn props(&self) -> Option<&PropMap> {
        match self {
            DefBody::Props(map) => Some(map),
            DefBody::Union(_) => None,
        }
    }
}

/// One named declaration as accumulated in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    /// 0–3 ancestor names, in declaration order, not deduplicated. These are
    /// name lookups into the registry, never ownership.
    pub ancestors: Vec<String>,
    pub body: DefBody,
    /// Whether this occurrence was declared with the reopening marker.
    pub reopened: bool,
}
