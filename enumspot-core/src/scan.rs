//! Parallel, deterministic file discovery with directory pruning, and
//! module path derivation from file locations.
//!
//! Performance notes:
//! - Early directory pruning via `WalkDir::filter_entry` (O(1) subtree skip)
//! - Parallel file processing via Rayon's `par_bridge`
//! - Results are sorted, so every run sees files in the same order

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Directories to exclude by default (standard Rust project conventions).
const EXCLUDED_DIRS: &[&str] = &["target", ".git", "node_modules", ".cargo"];

/// File stems that name their directory's module rather than a child.
const MODULE_ROOT_STEMS: &[&str] = &["lib", "main", "mod"];

/// Directories whose files are crate roots of their own.
const TARGET_DIRS: &[&str] = &["bin", "tests", "benches", "examples"];

/// Target key of the crate's library (and `src/main.rs`) sources.
pub const LIB_TARGET: &str = "lib";

#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// A directory below the root with its own manifest is another package.
#[inline]
fn is_nested_package(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.path().join("Cargo.toml").is_file()
}

/// Gathers all .rs files recursively starting from the root path.
///
/// Automatically excludes `target/`, `.git/`, `node_modules/`, and `.cargo/`,
/// and never descends into nested packages (directories holding their own
/// `Cargo.toml`).
pub fn gather_rs_files(root: &Path) -> Result<Vec<PathBuf>> {
    gather_rs_files_with_excludes(root, &[])
}

/// Gathers all .rs files, pruning default and custom directory names.
pub fn gather_rs_files_with_excludes(root: &Path, excludes: &[&str]) -> Result<Vec<PathBuf>> {
    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();

    let mut files = WalkDir::new(root)
        .into_iter()
        // filter_entry prunes whole subtrees before iteration
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes) && !is_nested_package(e))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .context(format!("Failed to gather .rs files from {}", root.display()))?;

    files.sort();
    Ok(files)
}

/// Normalize a path string to forward slashes.
#[inline]
pub fn normalize_path_string(path: &str) -> String {
    path.replace('\\', "/")
}

/// Path of `file` relative to `root` with forward slashes, or the full path
/// when `file` lies outside `root`.
pub fn relative_display(root: &Path, file: &Path) -> String {
    let shown = file.strip_prefix(root).unwrap_or(file);
    normalize_path_string(&shown.display().to_string())
}

/// Module path of a source file from its location in the crate.
///
/// - `src/model/billing.rs` → `["model", "billing"]`
/// - `src/model/mod.rs`, `src/lib.rs`, `src/main.rs` → their directory's path
/// - `src/bin/tool.rs`, `src/bin/tool/main.rs`, `tests/it.rs` → `[]`
///   (crate roots of their own); `src/bin/tool/util.rs` → `["util"]`
pub fn module_path_for_file(crate_root: &Path, file: &Path) -> Vec<String> {
    let src = crate_root.join("src");
    let (rel, target_root) = match file.strip_prefix(&src) {
        Ok(rel) => (rel, false),
        Err(_) => match file.strip_prefix(crate_root) {
            Ok(rel) => (rel, true),
            Err(_) => return Vec::new(),
        },
    };

    let mut parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(os) => Some(os.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if let Some(file_name) = parts.pop() {
        let stem = file_name.strip_suffix(".rs").unwrap_or(&file_name);
        if !MODULE_ROOT_STEMS.contains(&stem) {
            parts.push(stem.to_string());
        }
    }

    // `bin/<name>` under src, or `<tests|benches|examples>/<name>` beside it,
    // is a separate crate root: drop the directory and the target name.
    let is_target = parts
        .first()
        .is_some_and(|first| TARGET_DIRS.contains(&first.as_str()));
    if is_target && (target_root || parts[0] == "bin") {
        let skip = parts.len().min(2);
        parts.drain(..skip);
    }

    parts
}

/// Compilation target a source file belongs to.
///
/// Everything under `src/` except `src/bin` is [`LIB_TARGET`];
/// `src/bin/tool.rs` and `src/bin/tool/util.rs` are `bin/tool`;
/// `tests/it.rs` is `tests/it`, likewise for `benches` and `examples`.
/// Other files (`build.rs`) are their own target, keyed by relative path.
pub fn target_for_file(crate_root: &Path, file: &Path) -> String {
    let Ok(rel) = file.strip_prefix(crate_root) else {
        return String::new();
    };
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(os) => Some(os.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    let name = |part: &str| part.strip_suffix(".rs").unwrap_or(part).to_string();

    match parts.as_slice() {
        [src, bin, target, ..] if src == "src" && bin == "bin" => format!("bin/{}", name(target)),
        [src, ..] if src == "src" => LIB_TARGET.to_string(),
        [dir, target, ..] if TARGET_DIRS.contains(&dir.as_str()) => {
            format!("{}/{}", dir, name(target))
        }
        _ => normalize_path_string(&rel.display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("enumspot_scan_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn module_path(file: &str) -> Vec<String> {
        let root = Path::new("/work/shop");
        module_path_for_file(root, &root.join(file))
    }

    #[test]
    fn test_gather_skips_target_and_sorts() {
        let dir = create_temp_dir("gather");
        fs::create_dir_all(dir.join("src/model")).unwrap();
        fs::create_dir_all(dir.join("target/debug")).unwrap();
        fs::write(dir.join("src/model/b.rs"), "").unwrap();
        fs::write(dir.join("src/a.rs"), "").unwrap();
        fs::write(dir.join("src/notes.txt"), "").unwrap();
        fs::write(dir.join("target/debug/gen.rs"), "").unwrap();

        let files = gather_rs_files(&dir).unwrap();
        assert_eq!(files, vec![dir.join("src/a.rs"), dir.join("src/model/b.rs")]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_gather_custom_excludes() {
        let dir = create_temp_dir("gather_excludes");
        fs::create_dir_all(dir.join("src/generated")).unwrap();
        fs::write(dir.join("src/lib.rs"), "").unwrap();
        fs::write(dir.join("src/generated/out.rs"), "").unwrap();

        let files = gather_rs_files_with_excludes(&dir, &["generated"]).unwrap();
        assert_eq!(files, vec![dir.join("src/lib.rs")]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_gather_skips_nested_packages() {
        let dir = create_temp_dir("gather_nested");
        fs::write(dir.join("Cargo.toml"), "[package]\nname = \"app\"").unwrap();
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::create_dir_all(dir.join("crates/helper/src")).unwrap();
        fs::write(dir.join("src/lib.rs"), "").unwrap();
        fs::write(dir.join("crates/helper/Cargo.toml"), "[package]\nname = \"helper\"").unwrap();
        fs::write(dir.join("crates/helper/src/lib.rs"), "").unwrap();

        let files = gather_rs_files(&dir).unwrap();
        assert_eq!(files, vec![dir.join("src/lib.rs")]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_target_for_file() {
        let root = Path::new("/work/shop");
        let target = |file: &str| target_for_file(root, &root.join(file));
        assert_eq!(target("src/lib.rs"), "lib");
        assert_eq!(target("src/model/billing.rs"), "lib");
        assert_eq!(target("src/bin/tool.rs"), "bin/tool");
        assert_eq!(target("src/bin/tool/util.rs"), "bin/tool");
        assert_eq!(target("tests/it.rs"), "tests/it");
        assert_eq!(target("benches/speed/main.rs"), "benches/speed");
        assert_eq!(target("build.rs"), "build.rs");
        assert_eq!(target_for_file(root, Path::new("/elsewhere/x.rs")), "");
    }

    #[test]
    fn test_module_path_plain_files() {
        assert!(module_path("src/lib.rs").is_empty());
        assert!(module_path("src/main.rs").is_empty());
        assert_eq!(module_path("src/model.rs"), vec!["model"]);
        assert_eq!(module_path("src/model/billing.rs"), vec!["model", "billing"]);
        assert_eq!(module_path("src/model/mod.rs"), vec!["model"]);
    }

    #[test]
    fn test_module_path_separate_targets() {
        assert!(module_path("src/bin/tool.rs").is_empty());
        assert!(module_path("src/bin/tool/main.rs").is_empty());
        assert_eq!(module_path("src/bin/tool/util.rs"), vec!["util"]);
        assert!(module_path("tests/it.rs").is_empty());
        assert_eq!(module_path("tests/common/helpers.rs"), vec!["helpers"]);
    }

    #[test]
    fn test_module_path_outside_crate() {
        let root = Path::new("/work/shop");
        assert!(module_path_for_file(root, Path::new("/elsewhere/x.rs")).is_empty());
    }

    #[test]
    fn test_relative_display() {
        let root = Path::new("/work/shop");
        assert_eq!(
            relative_display(root, &root.join("src").join("lib.rs")),
            "src/lib.rs"
        );
    }
}
