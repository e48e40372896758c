//! Literal-override resolution.
//!
//! Under structural typing, an ancestor that commits a property to one fixed
//! string literal cannot be shared by descendants that need a different
//! literal for the same property. When a descendant redeclares such a
//! property, the committed ancestor is split: its non-discriminant
//! properties move to a new synthetic `Abstract<name>` base, the ancestor
//! keeps only the discriminant, and the descendant inherits the generic
//! shape directly.

use crate::model::{DefBody, Definition, PropMap, PropValue, Registry, ValueShape};

/// Name prefix of synthetic abstract bases.
pub const ABSTRACT_PREFIX: &str = "Abstract";

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("definition `{child}` extends `{ancestor}`, which is never declared")]
    UnknownAncestor { child: String, ancestor: String },
    #[error("abstract base name `{0}` collides with an existing definition")]
    SyntheticNameCollision(String),
}

/// Runs the literal-override rewrite once over the registry.
///
/// A single forward pass over the definitions present when the pass starts;
/// synthetic bases are appended past the end and never revisited. Mutation
/// is in place. Any error aborts the run before anything is emitted.
pub fn extract_abstract_bases(registry: &mut Registry) -> Result<(), ResolveError> {
    let initial = registry.len();
    for index in 0..initial {
        let Some(child) = registry.name_at(index).map(str::to_owned) else {
            continue;
        };
        for prop in literal_prop_names(registry, &child) {
            rewrite_property(registry, &child, &prop)?;
        }
    }
    Ok(())
}

/// Names of the definition's scalar-literal properties, when it is an
/// interface with at least one ancestor.
fn literal_prop_names(registry: &Registry, name: &str) -> Vec<String> {
    match registry.get(name) {
        Some(def) if !def.ancestors.is_empty() => match &def.body {
            DefBody::Props(map) => map
                .iter()
                .filter(|(_, value)| is_scalar_literal(value))
                .map(|(prop, _)| prop.clone())
                .collect(),
            DefBody::Union(_) => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn is_scalar_literal(value: &PropValue) -> bool {
    matches!(
        value,
        PropValue::Expr(expr) if expr.shape == ValueShape::Literal && !expr.list
    )
}

fn has_scalar_literal(def: &Definition, prop: &str) -> bool {
    def.body
        .props()
        .and_then(|map| map.get(prop))
        .is_some_and(is_scalar_literal)
}

/// Performs the one-shot rewrite for a single (child, property) pair.
fn rewrite_property(registry: &mut Registry, child: &str, prop: &str) -> Result<(), ResolveError> {
    // an earlier rewrite for this child may have stripped the property
    let ancestors = match registry.get(child) {
        Some(def) if has_scalar_literal(def, prop) => def.ancestors.clone(),
        _ => return Ok(()),
    };

    // first ancestor that also commits `prop` to a literal wins
    let mut committed = None;
    for ancestor in &ancestors {
        let Some(def) = registry.get(ancestor) else {
            return Err(ResolveError::UnknownAncestor {
                child: child.to_owned(),
                ancestor: ancestor.clone(),
            });
        };
        if has_scalar_literal(def, prop) {
            committed = Some(ancestor.clone());
            break;
        }
    }
    let Some(target) = committed else {
        return Ok(());
    };

    let abstract_name = format!("{ABSTRACT_PREFIX}{target}");
    if registry.contains(&abstract_name) {
        return Err(ResolveError::SyntheticNameCollision(abstract_name));
    }

    // partition the committed ancestor's body into discriminant and rest
    let Some((discriminant, rest, target_ancestors)) = partition(registry, &target, prop) else {
        return Ok(());
    };
    tracing::debug!(
        child,
        ancestor = %target,
        property = prop,
        base = %abstract_name,
        "extracting abstract base for literal override"
    );

    registry.insert(Definition {
        name: abstract_name.clone(),
        ancestors: target_ancestors,
        body: DefBody::Props(rest.clone()),
        reopened: false,
    });

    if let Some(def) = registry.get_mut(&target) {
        def.body = DefBody::Props(discriminant);
        def.ancestors = vec![abstract_name.clone()];
    }

    if let Some(def) = registry.get_mut(child) {
        if let DefBody::Props(map) = &mut def.body {
            for inherited in rest.keys() {
                map.shift_remove(inherited);
            }
        }
        match def.ancestors.iter_mut().find(|a| **a == target) {
            Some(slot) => *slot = abstract_name,
            None => def.ancestors.push(abstract_name),
        }
    }
    Ok(())
}

fn partition(
    registry: &Registry,
    name: &str,
    prop: &str,
) -> Option<(PropMap, PropMap, Vec<String>)> {
    let def = registry.get(name)?;
    let map = def.body.props()?;
    let mut discriminant = PropMap::new();
    let mut rest = PropMap::new();
    for (key, value) in map {
        if key == prop {
            discriminant.insert(key.clone(), value.clone());
        } else {
            rest.insert(key.clone(), value.clone());
        }
    }
    Some((discriminant, rest, def.ancestors.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeExpr;
    use pretty_assertions::assert_eq;

    fn literal(text: &str) -> PropValue {
        PropValue::Expr(TypeExpr {
            shape: ValueShape::Literal,
            list: false,
            text: text.to_string(),
        })
    }

    fn ident(text: &str) -> PropValue {
        PropValue::Expr(TypeExpr {
            shape: ValueShape::Identifier,
            list: false,
            text: text.to_string(),
        })
    }

    fn interface(name: &str, ancestors: &[&str], body: &[(&str, PropValue)]) -> Definition {
        Definition {
            name: name.to_string(),
            ancestors: ancestors.iter().map(|a| a.to_string()).collect(),
            body: DefBody::Props(
                body.iter()
                    .map(|(prop, value)| (prop.to_string(), value.clone()))
                    .collect(),
            ),
            reopened: false,
        }
    }

    fn registry_of(defs: Vec<Definition>) -> Registry {
        let mut registry = Registry::new();
        for def in defs {
            registry.install(def);
        }
        registry
    }

    #[test]
    fn splits_a_committed_ancestor() {
        let mut registry = registry_of(vec![
            interface("A", &[], &[("type", literal("\"A\"")), ("x", ident("Foo"))]),
            interface("C", &["A"], &[("type", literal("\"C\""))]),
        ]);

        extract_abstract_bases(&mut registry).unwrap();

        let base = registry.get("AbstractA").unwrap();
        assert!(base.ancestors.is_empty());
        let base_props: Vec<_> = base.body.props().unwrap().keys().cloned().collect();
        assert_eq!(base_props, vec!["x"]);

        let a = registry.get("A").unwrap();
        assert_eq!(a.ancestors, vec!["AbstractA"]);
        let a_props: Vec<_> = a.body.props().unwrap().keys().cloned().collect();
        assert_eq!(a_props, vec!["type"]);
        assert_eq!(a.body.props().unwrap().get("type"), Some(&literal("\"A\"")));

        let c = registry.get("C").unwrap();
        assert_eq!(c.ancestors, vec!["AbstractA"]);
        let c_props: Vec<_> = c.body.props().unwrap().keys().cloned().collect();
        assert_eq!(c_props, vec!["type"]);

        let names: Vec<_> = registry.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "AbstractA"]);
    }

    #[test]
    fn strips_properties_the_child_shared_with_the_base() {
        let mut registry = registry_of(vec![
            interface("A", &[], &[("type", literal("\"A\"")), ("x", ident("Foo"))]),
            interface(
                "C",
                &["A"],
                &[("type", literal("\"C\"")), ("x", ident("Foo")), ("y", ident("Bar"))],
            ),
        ]);

        extract_abstract_bases(&mut registry).unwrap();

        let c_props: Vec<_> = registry
            .get("C")
            .unwrap()
            .body
            .props()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(c_props, vec!["type", "y"]);
    }

    #[test]
    fn first_colliding_ancestor_wins() {
        let mut registry = registry_of(vec![
            interface("A", &[], &[("type", literal("\"A\""))]),
            interface("B", &[], &[("type", literal("\"B\"")), ("z", ident("Baz"))]),
            interface("C", &["A", "B"], &[("type", literal("\"C\""))]),
        ]);

        extract_abstract_bases(&mut registry).unwrap();

        assert!(registry.contains("AbstractA"));
        assert!(!registry.contains("AbstractB"));
        let c = registry.get("C").unwrap();
        assert_eq!(c.ancestors, vec!["AbstractA", "B"]);
    }

    #[test]
    fn ancestor_without_the_literal_is_left_alone() {
        let mut registry = registry_of(vec![
            interface("Node", &[], &[("type", ident("string"))]),
            interface("Identifier", &["Node"], &[("type", literal("\"Identifier\""))]),
        ]);

        extract_abstract_bases(&mut registry).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Identifier").unwrap().ancestors, vec!["Node"]);
    }

    #[test]
    fn enum_ancestors_never_collide() {
        let mut registry = registry_of(vec![
            Definition {
                name: "E".to_string(),
                ancestors: vec![],
                body: DefBody::Union("\"a\" | \"b\"".to_string()),
                reopened: false,
            },
            interface("C", &["E"], &[("type", literal("\"C\""))]),
        ]);

        extract_abstract_bases(&mut registry).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_ancestor_is_fatal() {
        let mut registry = registry_of(vec![interface(
            "C",
            &["Ghost"],
            &[("type", literal("\"C\""))],
        )]);

        let err = extract_abstract_bases(&mut registry).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownAncestor { .. }));
    }

    #[test]
    fn synthetic_name_collision_is_fatal() {
        let mut registry = registry_of(vec![
            interface("AbstractA", &[], &[("w", ident("Qux"))]),
            interface("A", &[], &[("type", literal("\"A\"")), ("x", ident("Foo"))]),
            interface("C", &["A"], &[("type", literal("\"C\""))]),
        ]);

        let err = extract_abstract_bases(&mut registry).unwrap_err();
        assert!(matches!(err, ResolveError::SyntheticNameCollision(name) if name == "AbstractA"));
    }

    #[test]
    fn definitions_without_ancestors_are_untouched() {
        let mut registry = registry_of(vec![interface(
            "A",
            &[],
            &[("type", literal("\"A\""))],
        )]);

        extract_abstract_bases(&mut registry).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn split_ancestors_visited_later_do_not_split_again() {
        // R is rewritten while processing A (index 0) and still holds its
        // literal discriminant when its own index comes up; its only
        // remaining ancestor no longer carries the property, so the pass
        // must leave it alone instead of stacking Abstract prefixes
        let mut registry = registry_of(vec![
            interface("A", &["R"], &[("type", literal("\"A\"")), ("x", ident("Foo"))]),
            interface("R", &[], &[("type", literal("\"R\"")), ("y", ident("Bar"))]),
        ]);

        extract_abstract_bases(&mut registry).unwrap();

        // A split R; AbstractR got R's ancestors (none) and `y`
        assert!(registry.contains("AbstractR"));
        assert!(!registry.contains("AbstractAbstractR"));
    }
}
