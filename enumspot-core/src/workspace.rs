//! Workspace-level analysis for multi-crate Rust projects.
//!
//! Supports:
//! - Automatic workspace detection via `[workspace]` in Cargo.toml
//! - Crate discovery via `cargo metadata` or fallback directory scan
//! - Per-crate analysis with fault tolerance, each crate reading its own
//!   `enumspot.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use crate::builder::{AnalysisResult, Enumspot};
use crate::error::{EnumspotError, IoResultExt};

/// Minimal subset of `cargo metadata` output we need.
#[derive(Debug, Deserialize)]
struct CargoMetadata {
    packages: Vec<CargoPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    manifest_path: String,
}

/// Result of analyzing a single crate.
#[derive(Debug, Clone)]
pub struct CrateAnalysis {
    pub name: String,
    pub root: PathBuf,
    pub result: AnalysisResult,
}

/// Try using `cargo metadata` for workspace discovery.
fn try_cargo_metadata(path: &Path) -> Option<CargoMetadata> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--no-deps", "--format-version", "1"])
        .current_dir(path)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    serde_json::from_slice(&output.stdout).ok()
}

/// Detect if a root is a Cargo workspace.
pub fn is_workspace_root(root: &Path) -> bool {
    let cargo_toml = root.join("Cargo.toml");
    if !cargo_toml.exists() {
        return false;
    }

    match fs::read_to_string(&cargo_toml) {
        Ok(text) => text.contains("[workspace]"),
        Err(e) => {
            warn!(path = %cargo_toml.display(), error = %e, "cannot read manifest, assuming not a workspace");
            false
        }
    }
}

/// Find the crate root containing `path`.
///
/// Walks up from `path` (or its directory) to the nearest directory holding
/// both `Cargo.toml` and `src/`. Returns `None` when there is none.
pub fn find_crate_root(path: &Path) -> Option<PathBuf> {
    let canonical = path.canonicalize().ok()?;
    let start = if canonical.is_file() {
        canonical.parent()?.to_path_buf()
    } else {
        canonical
    };

    start
        .ancestors()
        .find(|dir| dir.join("Cargo.toml").exists() && dir.join("src").is_dir())
        .map(Path::to_path_buf)
}

/// Find all crate roots in a workspace.
/// Prefers `cargo metadata` when available, falls back to directory scan.
pub fn find_all_crates(root: &Path) -> Result<Vec<PathBuf>> {
    if let Some(meta) = try_cargo_metadata(root) {
        let mut crates: Vec<PathBuf> = meta
            .packages
            .iter()
            .filter_map(|pkg| Path::new(&pkg.manifest_path).parent().map(Path::to_path_buf))
            .collect();
        if !crates.is_empty() {
            crates.sort();
            return Ok(crates);
        }
    }

    let mut crates = Vec::new();

    if root.join("src").exists() && root.join("Cargo.toml").exists() {
        crates.push(root.to_path_buf());
    }

    let entries =
        fs::read_dir(root).map_err(|e| EnumspotError::workspace(root, e.to_string()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        let name = path.file_name().unwrap_or_default().to_string_lossy();

        if name == "target" || name == ".git" || name == "node_modules" {
            continue;
        }

        if path.is_dir() && path.join("Cargo.toml").exists() {
            crates.push(path);
        }
    }

    crates.sort();
    Ok(crates)
}

/// Extract crate name from Cargo.toml content.
fn parse_crate_name(cargo_toml: &str) -> String {
    for line in cargo_toml.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("name") {
            if let Some((_, value)) = trimmed.split_once('=') {
                return value.trim().trim_matches('"').trim_matches('\'').to_string();
            }
        }
    }
    "unknown".to_string()
}

/// Analyze a single crate with its own `enumspot.toml`.
pub fn analyze_crate(crate_root: &Path) -> Result<CrateAnalysis> {
    analyze_crate_with(crate_root, |builder| builder)
}

/// Analyze a single crate, letting `configure` adjust the builder after
/// the crate's `enumspot.toml` has been applied.
pub fn analyze_crate_with<F>(crate_root: &Path, configure: F) -> Result<CrateAnalysis>
where
    F: FnOnce(Enumspot) -> Enumspot,
{
    let manifest = crate_root.join("Cargo.toml");
    let cargo_toml = fs::read_to_string(&manifest).with_path(&manifest)?;
    let name = parse_crate_name(&cargo_toml);

    let result = Enumspot::load(crate_root)
        .and_then(|builder| configure(builder).analyze())
        .with_context(|| format!("Failed to analyze crate {}", name))?;

    Ok(CrateAnalysis {
        name,
        root: crate_root.to_path_buf(),
        result,
    })
}

/// Analyze an entire workspace, returning results for each crate.
///
/// A crate that fails to analyze is logged and left out; the others still
/// run. Crates are analyzed in parallel and returned in path order.
pub fn analyze_workspace(root: &Path) -> Result<Vec<CrateAnalysis>> {
    analyze_workspace_with(root, |builder| builder)
}

/// Analyze an entire workspace, applying `configure` to every member's
/// builder.
pub fn analyze_workspace_with<F>(root: &Path, configure: F) -> Result<Vec<CrateAnalysis>>
where
    F: Fn(Enumspot) -> Enumspot + Sync,
{
    let crates = match find_all_crates(root) {
        Ok(c) => c,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "cannot scan workspace");
            return Ok(vec![]);
        }
    };

    if crates.is_empty() {
        warn!(root = %root.display(), "no crates found in workspace");
        return Ok(vec![]);
    }

    info!(crates = crates.len(), "analyzing workspace");

    let results: Vec<CrateAnalysis> = crates
        .into_par_iter()
        .filter_map(|crate_root| match analyze_crate_with(&crate_root, &configure) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(crate_root = %crate_root.display(), error = %e, "crate failed");
                None
            }
        })
        .collect();

    Ok(results)
}
