//! Content comparison between an old module and candidate declarations
//!
//! Comparison is normalized: layout characters never count as a change.
//! The two sides are normalized asymmetrically; only the candidate side
//! drops quote characters.

use crate::error::{TypesyncError, TypesyncResult};
use crate::model::{Declaration, Module};

fn normalize_old(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ';')
        .collect()
}

fn normalize_candidate(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != ';' && *c != '\'' && *c != '"')
        .collect()
}

/// Overwrites old declaration bodies whose content differs from the
/// matching candidate, returning the candidates that were applied.
///
/// Every candidate must name a declaration already present in `old`;
/// candidates are processed in order and the first unknown name aborts.
pub fn replace_changed(
    old: &mut Module,
    candidates: &[Declaration],
) -> TypesyncResult<Vec<Declaration>> {
    let mut changed = Vec::new();
    for candidate in candidates {
        let existing = old.get_mut(&candidate.name).ok_or_else(|| {
            TypesyncError::DeclarationNotFound {
                name: candidate.name.clone(),
            }
        })?;
        if normalize_old(&existing.body.text) != normalize_candidate(&candidate.body.text) {
            existing.body = candidate.body.clone();
            changed.push(candidate.clone());
        }
    }
    Ok(changed)
}
