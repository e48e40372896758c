pub mod emit;
pub mod io;
pub mod model;
pub mod parsing;
pub mod resolve;

// Re-export key types for easier usage
pub use emit::render_module;
pub use model::{DefBody, Definition, PropMap, PropValue, Registry, TypeExpr, ValueShape};
pub use parsing::parse_fragment;
pub use resolve::{ResolveError, extract_abstract_bases};

/// Runs the whole pipeline: parse every fragment, in order, into one
/// registry; resolve literal overrides; render the consolidated module.
///
/// Fatal resolution errors abort before any output is produced.
pub fn consolidate<I, S>(fragments: I, module_name: &str) -> Result<String, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut registry = Registry::new();
    for fragment in fragments {
        parse_fragment(fragment.as_ref(), &mut registry);
    }
    extract_abstract_bases(&mut registry)?;
    Ok(render_module(&registry, module_name))
}
