//! Module rebuilding
//!
//! Retained declarations (old entries nobody references) plus the
//! increment (fresh declarations for every live name), sorted by name.
//! The result is computed fully in memory; callers decide when to write.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{TypesyncError, TypesyncResult};
use crate::model::{Declaration, LiveSet, Module};

/// Case-insensitive name order with a byte-order tiebreak, so mixed-case
/// names sort the way a locale-aware directory listing would while staying
/// deterministic across environments.
fn declaration_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Rebuilds the persisted module against a live set and fresh typings.
///
/// Every live name must resolve in `fresh`; the first one that does not
/// aborts the rebuild, so a failed run never produces a partial module.
/// Namespace label and preamble carry over from `old`.
pub fn rebuild(old: &Module, live: &LiveSet, fresh: &Module) -> TypesyncResult<Module> {
    let mut increment = Vec::with_capacity(live.len());
    for name in live.iter() {
        let decl = fresh
            .get(name)
            .ok_or_else(|| TypesyncError::MissingDeclaration {
                name: name.to_string(),
            })?;
        increment.push(decl.clone());
    }

    let mut declarations: Vec<Declaration> = old
        .declarations()
        .iter()
        .filter(|d| !live.contains(&d.name))
        .cloned()
        .collect();
    let retained = declarations.len();
    declarations.extend(increment);
    declarations.sort_by(|a, b| declaration_order(&a.name, &b.name));

    debug!(
        retained,
        increment = live.len(),
        total = declarations.len(),
        "rebuilt module"
    );
    Ok(Module::new(old.namespace.clone(), old.preamble.clone()).with_declarations(declarations))
}
