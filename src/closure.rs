//! Transitive closure of referenced declarations
//!
//! A session owns the fresh typings module and a live set, and grows the
//! set as service sources are fed in. The fresh module is never mutated.

use tracing::debug;

use crate::model::{LiveSet, Module, ServiceSource};
use crate::scanner;

/// Accumulates the union of per-source closures over one sync run.
pub struct SyncSession<'a> {
    fresh: &'a Module,
    live: LiveSet,
}

impl<'a> SyncSession<'a> {
    pub fn new(fresh: &'a Module) -> Self {
        SyncSession {
            fresh,
            live: LiveSet::new(),
        }
    }

    /// Folds one service source into the live set.
    ///
    /// Every scanned name enters the set, resolvable in the fresh module or
    /// not. Names that do resolve have their body references expanded
    /// transitively; the set's insert check caps each name at one
    /// expansion, which is what makes cycles terminate.
    pub fn collect(&mut self, source: &ServiceSource) {
        let seeds = scanner::scan_service_refs(source);
        for name in &seeds {
            self.live.insert(name);
        }
        for name in &seeds {
            self.expand_deps(name);
        }
        debug!(origin = %source.origin, live = self.live.len(), "collected closure");
    }

    fn expand_deps(&mut self, name: &str) {
        let Some(decl) = self.fresh.get(name) else {
            return;
        };
        for dep in scanner::body_refs(&decl.body) {
            if self.live.insert(&dep) {
                self.expand_deps(&dep);
            }
        }
    }

    pub fn fresh(&self) -> &'a Module {
        self.fresh
    }

    pub fn live(&self) -> &LiveSet {
        &self.live
    }

    pub fn into_live(self) -> LiveSet {
        self.live
    }
}
