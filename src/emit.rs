//! Module serialization
//!
//! One canonical layout: preamble verbatim, two-space indent, a blank line
//! between declarations. Bodies are emitted exactly as captured, so an
//! unchanged declaration round-trips byte for byte.

use crate::model::Module;

pub fn module_text(module: &Module) -> String {
    let mut out = String::new();
    out.push_str(&module.preamble);

    if module.is_empty() {
        out.push_str(&format!("declare namespace {} {{}}\n", module.namespace));
        return out;
    }

    out.push_str(&format!("declare namespace {} {{\n", module.namespace));
    for (i, decl) in module.declarations().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("  type {} = {};\n", decl.name, decl.body.text));
    }
    out.push_str("}\n");
    out
}
