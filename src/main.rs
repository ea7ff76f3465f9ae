//! typesync CLI
//!
//! Usage: typesync <COMMAND>
//!
//! Commands:
//!   sync  Rebuild the typings module from service references
//!   diff  Preview the rebuild as a unified diff
//!   scan  Show entry signatures and the reference closure

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use typesync::cli::{Cli, Commands};
use typesync::closure::SyncSession;
use typesync::config::Config;
use typesync::error::TypesyncError;
use typesync::model::{Module, ServiceSource};
use typesync::pipeline::{PlanAction, SyncEngine, SyncOptions, SyncStatus};
use typesync::{parse, scanner};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new("."))?,
    };

    match cli.command {
        Commands::Sync {
            types,
            services,
            fresh,
            dry_run,
        } => {
            let resolved = resolve(config, types, services, fresh);
            cmd_sync(&resolved, dry_run, cli.json)
        }
        Commands::Diff {
            types,
            services,
            fresh,
        } => {
            let resolved = resolve(config, types, services, fresh);
            cmd_diff(&resolved, cli.json)
        }
        Commands::Scan { services, fresh } => {
            let resolved = resolve(config, None, services, fresh);
            cmd_scan(&resolved, cli.json)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "typesync=warn",
        1 => "typesync=info",
        2 => "typesync=debug",
        _ => "typesync=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Paths for one run: config values with CLI overrides applied.
struct Resolved {
    types: PathBuf,
    services: Vec<PathBuf>,
    fresh: PathBuf,
}

fn resolve(
    mut config: Config,
    types: Option<PathBuf>,
    services: Option<Vec<PathBuf>>,
    fresh: Option<PathBuf>,
) -> Resolved {
    if let Some(types) = types {
        config.types = types;
    }
    if let Some(services) = services {
        if !services.is_empty() {
            config.services = services;
        }
    }
    if let Some(fresh) = fresh {
        config.fresh = Some(fresh);
    }
    Resolved {
        fresh: config.fresh_path(),
        types: config.types,
        services: config.services,
    }
}

struct Inputs {
    fresh: Module,
    services: Vec<ServiceSource>,
}

fn load_inputs(resolved: &Resolved) -> Result<Inputs> {
    let fresh_label = resolved.fresh.display().to_string();
    let fresh_text = std::fs::read_to_string(&resolved.fresh)
        .with_context(|| format!("reading fresh typings {fresh_label}"))?;
    let fresh = parse::parse_module(&fresh_text, &fresh_label)?;

    let files = collect_service_files(&resolved.services)?;
    let mut services = Vec::with_capacity(files.len());
    for file in files {
        let label = file.display().to_string();
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("reading service source {label}"))?;
        services.push(parse::parse_service(&text, &label)?);
    }
    Ok(Inputs { fresh, services })
}

fn collect_service_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_recursive(path, &mut files)?;
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(TypesyncError::ServicePathNotFound { path: path.clone() }.into());
        }
    }
    // Deterministic scan order
    files.sort();
    Ok(files)
}

fn collect_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            // Skip hidden directories; the increment dir lives in one
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false);
            if !hidden {
                collect_recursive(&path, files)?;
            }
        } else if is_service_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_service_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}

fn cmd_sync(resolved: &Resolved, dry_run: bool, json: bool) -> Result<()> {
    let inputs = load_inputs(resolved)?;
    let engine = SyncEngine::new(
        &inputs.fresh,
        &inputs.services,
        &resolved.types,
        SyncOptions { dry_run },
    );
    let report = engine.sync()?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    match report.status {
        SyncStatus::Written => println!("✓ {} updated", report.path.display()),
        SyncStatus::Skipped => println!("✓ {} already up to date", report.path.display()),
        SyncStatus::Planned => {
            println!("⚠ dry run: {} would be updated", report.path.display())
        }
    }
    if !report.added.is_empty() {
        println!("  + added: {}", report.added.join(", "));
    }
    if !report.changed.is_empty() {
        println!("  ~ changed: {}", report.changed.join(", "));
    }
    if !report.unchanged.is_empty() {
        println!("  = unchanged: {}", report.unchanged.len());
    }
    if !report.retained.is_empty() {
        println!("  · retained: {}", report.retained.len());
    }
    println!("  {} declarations total", report.total);
    Ok(())
}

fn cmd_diff(resolved: &Resolved, json: bool) -> Result<()> {
    let inputs = load_inputs(resolved)?;
    let engine = SyncEngine::new(
        &inputs.fresh,
        &inputs.services,
        &resolved.types,
        SyncOptions { dry_run: true },
    );
    let plan = engine.plan()?;

    if json {
        let output = serde_json::json!({
            "path": plan.path,
            "up_to_date": plan.action == PlanAction::Skip,
            "added": plan.added,
            "changed": plan.changed,
            "diff": plan.unified_diff(),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if plan.action == PlanAction::Skip {
        println!("✓ {} already up to date", plan.path.display());
    } else {
        print!("{}", plan.unified_diff());
    }
    Ok(())
}

fn cmd_scan(resolved: &Resolved, json: bool) -> Result<()> {
    let inputs = load_inputs(resolved)?;
    let mut session = SyncSession::new(&inputs.fresh);
    for source in &inputs.services {
        session.collect(source);
    }

    if json {
        let sources: Vec<_> = inputs
            .services
            .iter()
            .map(|s| {
                serde_json::json!({
                    "source": s.origin,
                    "functions": scanner::scan_entry_signatures(s),
                })
            })
            .collect();
        let output = serde_json::json!({
            "sources": sources,
            "live": session.live().names(),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    for source in &inputs.services {
        println!("{}:", source.origin);
        for sig in scanner::scan_entry_signatures(source) {
            let params = if sig.parameter_refs.is_empty() {
                "-".to_string()
            } else {
                sig.parameter_refs.join(", ")
            };
            let ret = sig.return_ref.unwrap_or_else(|| "-".to_string());
            println!("  {} (params: {params}) -> {ret}", sig.name);
        }
    }
    println!();
    println!("live set ({}):", session.live().len());
    for name in session.live().iter() {
        println!("  {name}");
    }
    Ok(())
}
