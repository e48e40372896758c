use indexmap::IndexMap;

use super::definition::{DefBody, Definition};

/// Insertion-ordered store of all definitions seen across fragments.
///
/// A name's position is fixed the first time it is seen; reopening or
/// replacing an entry later never moves it. The registry is the sole owner of
/// all definitions; ancestor lists refer to entries by name only.
#[derive(Debug, Default)]
pub struct Registry {
    defs: IndexMap<String, Definition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a freshly parsed definition, applying reopen-merge semantics.
    ///
    /// A definition marked as reopening an existing entry of the same kind
    /// inherits that entry's ancestry and merges bodies: enum bodies
    /// concatenate with `" | "`, interface bodies shallow-merge with the new
    /// properties winning on collision (prior order kept, new names
    /// appended). Anything else replaces the prior entry outright.
    pub fn install(&mut self, mut def: Definition) {
        if def.reopened
            && let Some(prev) = self.defs.get(&def.name)
        {
            match merge_bodies(&prev.body, &def.body) {
                Some(merged) => {
                    def.ancestors = prev.ancestors.clone();
                    def.body = merged;
                    tracing::debug!(name = %def.name, "merged reopened definition");
                }
                None => {
                    tracing::warn!(
                        name = %def.name,
                        "reopening changes the definition kind, replacing instead of merging"
                    );
                }
            }
        }
        self.insert(def);
    }

    /// Raw insert. An existing name keeps its position; a new name appends.
    pub fn insert(&mut self, def: Definition) {
        self.defs.insert(def.name.clone(), def);
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.defs.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Definition> {
        self.defs.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.defs.get_index(index).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definitions in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.defs.values()
    }
}

fn merge_bodies(prev: &DefBody, new: &DefBody) -> Option<DefBody> {
    match (prev, new) {
        (DefBody::Union(p), DefBody::Union(n)) => Some(DefBody::Union(format!("{p} | {n}"))),
        (DefBody::Props(p), DefBody::Props(n)) => {
            let mut merged = p.clone();
            for (name, value) in n {
                merged.insert(name.clone(), value.clone());
            }
            Some(DefBody::Props(merged))
        }
        _ => None,
    }
}
