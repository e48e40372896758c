pub mod blocks;
pub mod body;
pub mod cursor;
pub mod decl;
pub mod value;

use crate::model::{DefBody, Definition, Registry};
use decl::DeclKind;

/// Parses one fragment document and installs every declaration it contains
/// into the registry, in document order.
pub fn parse_fragment(text: &str, registry: &mut Registry) {
    for block in blocks::blocks(text) {
        for raw in decl::declarations(block) {
            let body = match raw.kind {
                DeclKind::Enum => DefBody::Union(raw.body.trim().to_string()),
                DeclKind::Interface => DefBody::Props(body::parse_interface_body(raw.body)),
            };
            registry.install(Definition {
                name: raw.name.to_string(),
                ancestors: raw.ancestors.iter().map(|a| a.to_string()).collect(),
                body,
                reopened: raw.reopened,
            });
        }
    }
}
