use crate::model::{DefBody, Definition, PropMap, PropValue, Registry};

/// Renders the whole registry, in registry order, inside one wrapping
/// module declaration. The output is stable byte-for-byte across runs on
/// identical input and carries no trailing newline.
pub fn render_module(registry: &Registry, module_name: &str) -> String {
    let rendered: Vec<String> = registry.iter().map(render_definition).collect();
    format!(
        "declare module \"{module_name}\" {{\n{}\n}}",
        rendered.join("\n")
    )
}

/// Renders one definition at module depth.
pub fn render_definition(def: &Definition) -> String {
    let extends = if def.ancestors.is_empty() {
        String::new()
    } else {
        format!(" extends {}", def.ancestors.join(", "))
    };
    match &def.body {
        DefBody::Union(body) => {
            format!("\texport type {}{extends} =\n\t\t{body};", def.name)
        }
        DefBody::Props(map) => {
            let mut lines = Vec::new();
            render_props(map, 2, &mut lines);
            format!(
                "\texport interface {}{extends} {{\n{}\n\t}}",
                def.name,
                lines.join("\n")
            )
        }
    }
}

fn render_props(map: &PropMap, depth: usize, out: &mut Vec<String>) {
    let indent = "\t".repeat(depth);
    for (name, value) in map {
        match value {
            PropValue::Expr(expr) => out.push(format!("{indent}{name}: {};", expr.text)),
            PropValue::Object(inner) => {
                out.push(format!("{indent}{name}: {{"));
                render_props(inner, depth + 1, out);
                out.push(format!("{indent}}};"));
            }
        }
    }
}
