pub mod definition;
pub mod registry;

pub use definition::{DefBody, Definition, PropMap, PropValue, TypeExpr, ValueShape};
pub use registry::Registry;
