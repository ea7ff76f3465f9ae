//! Reference extraction
//!
//! Turns parsed signature shapes into declaration names. Recognition is
//! deliberately narrow: one level of array wrapping, one level of
//! qualification, nothing else. Unrecognized shapes contribute nothing.

use tracing::trace;

use crate::model::{EntrySignature, ServiceFunction, ServiceSource, TypeBody, TypeExpr};

/// Resolves a type expression on the service side.
///
/// Only a qualified reference counts (`API.Foo` reads as `Foo`), either
/// directly or inside one array level (`API.Foo[]`). Bare names in service
/// signatures point at local types, not the namespace.
pub fn resolve_entry_ref(expr: &TypeExpr) -> Option<String> {
    match expr {
        TypeExpr::Qualified { name, .. } => Some(name.clone()),
        TypeExpr::Array(element) => match element.as_ref() {
            TypeExpr::Qualified { name, .. } => Some(name.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Resolves a type expression inside a declaration body.
///
/// Bodies live inside the namespace, so references are bare names, again
/// with at most one array level.
pub fn resolve_body_ref(expr: &TypeExpr) -> Option<String> {
    match expr {
        TypeExpr::Named(name) => Some(name.clone()),
        TypeExpr::Array(element) => match element.as_ref() {
            TypeExpr::Named(name) => Some(name.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Declaration names referenced by one function: parameters in order, then
/// the return payload.
pub fn entry_signature(func: &ServiceFunction) -> EntrySignature {
    let parameter_refs = func
        .param_types
        .iter()
        .filter_map(resolve_entry_ref)
        .collect();
    let return_ref = func.return_call_type.as_ref().and_then(resolve_entry_ref);
    EntrySignature {
        name: func.name.clone(),
        parameter_refs,
        return_ref,
    }
}

/// Entry signatures for every function of a service source.
pub fn scan_entry_signatures(source: &ServiceSource) -> Vec<EntrySignature> {
    source.functions.iter().map(entry_signature).collect()
}

/// All names referenced by a service source, deduped preserving
/// first-occurrence order.
pub fn scan_service_refs(source: &ServiceSource) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for func in &source.functions {
        let sig = entry_signature(func);
        for name in sig.parameter_refs.into_iter().chain(sig.return_ref) {
            if !refs.contains(&name) {
                refs.push(name);
            }
        }
    }
    trace!(origin = %source.origin, refs = refs.len(), "scanned service refs");
    refs
}

/// Names referenced by a declaration body's properties, in order, with
/// duplicates kept (the live set dedups on insert).
pub fn body_refs(body: &TypeBody) -> Vec<String> {
    body.property_types.iter().filter_map(resolve_body_ref).collect()
}
