//! typesync - incremental synchronization for hand-maintained API typings
//!
//! typesync keeps a single hand-maintained `declare namespace` typings
//! module in sync with the type references made by service function
//! signatures: it scans services, expands references to their transitive
//! closure against freshly generated typings, and rebuilds the persisted
//! module in place, retaining everything nobody references.

pub mod cli;
pub mod closure;
pub mod config;
pub mod differ;
pub mod emit;
pub mod error;
pub mod fs;
pub mod index;
pub mod merge;
pub mod model;
pub mod parse;
pub mod pipeline;
pub mod rebuild;
pub mod scanner;

// Re-exports for convenience
pub use closure::SyncSession;
pub use config::Config;
pub use error::{TypesyncError, TypesyncResult};
pub use merge::merge_ordered;
pub use model::{Declaration, EntrySignature, LiveSet, Module, TypeBody, TypeExpr};
pub use pipeline::{SyncEngine, SyncOptions, SyncPlan, SyncReport, SyncStatus};
