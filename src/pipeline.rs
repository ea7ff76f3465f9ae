//! Sync engine
//!
//! Plans a sync fully in memory, then applies it with a single atomic
//! write. Planning never touches the destination; a failed plan leaves the
//! persisted module exactly as it was.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use tracing::info;

use crate::closure::SyncSession;
use crate::differ;
use crate::emit;
use crate::error::TypesyncResult;
use crate::fs::{hash_content, FileSystem, LocalFs};
use crate::model::{Module, ServiceSource};
use crate::parse;
use crate::rebuild;

/// Reserved subdirectory name for increment payloads. In-memory payloads
/// are labeled under it for diagnostics, and generators conventionally
/// drop fresh typings into a real directory of the same name.
pub const INCREMENT_DIR: &str = ".typesync-increment";

/// Diagnostic label for an in-memory payload.
pub fn virtual_path(name: &str) -> String {
    format!("{INCREMENT_DIR}/{name}")
}

/// Conventional location of fresh typings under a service root.
pub fn default_fresh_path(services_root: &Path) -> PathBuf {
    services_root.join(INCREMENT_DIR).join("typings.d.ts")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    /// Rebuilt text differs from the persisted text
    Write,
    /// Rebuilt text is identical, nothing to do
    Skip,
}

/// Everything a sync run decided, before any write.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub path: PathBuf,
    pub old_text: String,
    pub new_text: String,
    pub action: PlanAction,
    /// Referenced names, closure order
    pub live: Vec<String>,
    /// Live names not present in the old module
    pub added: Vec<String>,
    /// Live names whose body content changed
    pub changed: Vec<String>,
    /// Live names present with equal content
    pub unchanged: Vec<String>,
    /// Old names nobody references, carried as-is
    pub retained: Vec<String>,
}

impl SyncPlan {
    /// Line-level unified diff between the persisted and rebuilt text.
    pub fn unified_diff(&self) -> String {
        let diff = TextDiff::from_lines(&self.old_text, &self.new_text);
        let mut out = String::new();
        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            out.push_str(&format!("{sign}{change}"));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// The rebuilt module was written out
    Written,
    /// Persisted text already matched
    Skipped,
    /// Dry run; a write was planned but not performed
    Planned,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Written => write!(f, "written"),
            SyncStatus::Skipped => write!(f, "skipped"),
            SyncStatus::Planned => write!(f, "planned"),
        }
    }
}

/// Outcome of one sync run, serializable for `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub path: PathBuf,
    pub status: SyncStatus,
    pub added: Vec<String>,
    pub changed: Vec<String>,
    pub unchanged: Vec<String>,
    pub retained: Vec<String>,
    pub total: usize,
}

impl SyncReport {
    fn from_plan(plan: &SyncPlan, status: SyncStatus) -> Self {
        SyncReport {
            path: plan.path.clone(),
            status,
            added: plan.added.clone(),
            changed: plan.changed.clone(),
            unchanged: plan.unchanged.clone(),
            retained: plan.retained.clone(),
            total: plan.retained.len() + plan.live.len(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub dry_run: bool,
}

/// Plans and applies the rebuild of one persisted typings module.
pub struct SyncEngine<'a, FS: FileSystem = LocalFs> {
    fresh: &'a Module,
    services: &'a [ServiceSource],
    module_path: &'a Path,
    options: SyncOptions,
    fs: FS,
}

impl<'a> SyncEngine<'a, LocalFs> {
    pub fn new(
        fresh: &'a Module,
        services: &'a [ServiceSource],
        module_path: &'a Path,
        options: SyncOptions,
    ) -> Self {
        Self::with_fs(fresh, services, module_path, options, LocalFs::new())
    }
}

impl<'a, FS: FileSystem> SyncEngine<'a, FS> {
    pub fn with_fs(
        fresh: &'a Module,
        services: &'a [ServiceSource],
        module_path: &'a Path,
        options: SyncOptions,
        fs: FS,
    ) -> Self {
        SyncEngine {
            fresh,
            services,
            module_path,
            options,
            fs,
        }
    }

    /// Computes the full sync decision without writing anything.
    pub fn plan(&self) -> TypesyncResult<SyncPlan> {
        let old_text = self.fs.read_to_string(self.module_path)?;
        let origin = self.module_path.display().to_string();
        let old = parse::parse_module(&old_text, &origin)?;

        let mut session = SyncSession::new(self.fresh);
        for source in self.services {
            session.collect(source);
        }
        let live = session.into_live();

        let rebuilt = rebuild::rebuild(&old, &live, self.fresh)?;
        let new_text = emit::module_text(&rebuilt);

        let mut added = Vec::new();
        let mut candidates = Vec::new();
        for name in live.iter() {
            if old.contains(name) {
                if let Some(decl) = self.fresh.get(name) {
                    candidates.push(decl.clone());
                }
            } else {
                added.push(name.to_string());
            }
        }
        // The shadow copy absorbs the differ's in-place overwrites; only
        // the changed-name list is kept.
        let mut shadow = old.clone();
        let changed: Vec<String> = differ::replace_changed(&mut shadow, &candidates)?
            .into_iter()
            .map(|d| d.name)
            .collect();
        let unchanged: Vec<String> = candidates
            .iter()
            .filter(|d| !changed.contains(&d.name))
            .map(|d| d.name.clone())
            .collect();
        let retained: Vec<String> = old
            .declarations()
            .iter()
            .filter(|d| !live.contains(&d.name))
            .map(|d| d.name.clone())
            .collect();

        let action = if hash_content(new_text.as_bytes()) == hash_content(old_text.as_bytes()) {
            PlanAction::Skip
        } else {
            PlanAction::Write
        };

        info!(
            path = %self.module_path.display(),
            live = live.len(),
            added = added.len(),
            changed = changed.len(),
            retained = retained.len(),
            action = ?action,
            "planned sync"
        );

        Ok(SyncPlan {
            path: self.module_path.to_path_buf(),
            old_text,
            new_text,
            action,
            live: live.names().to_vec(),
            added,
            changed,
            unchanged,
            retained,
        })
    }

    /// Applies a plan: at most one atomic write, none under `--dry-run`.
    pub fn apply(&self, plan: &SyncPlan) -> TypesyncResult<SyncReport> {
        let status = match plan.action {
            PlanAction::Skip => SyncStatus::Skipped,
            PlanAction::Write if self.options.dry_run => SyncStatus::Planned,
            PlanAction::Write => {
                self.fs.write_atomic(&plan.path, &plan.new_text)?;
                SyncStatus::Written
            }
        };
        info!(path = %plan.path.display(), status = %status, "sync complete");
        Ok(SyncReport::from_plan(plan, status))
    }

    pub fn sync(&self) -> TypesyncResult<SyncReport> {
        let plan = self.plan()?;
        self.apply(&plan)
    }
}
