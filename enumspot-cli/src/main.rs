//! enumspot CLI - finds enum-like constant families embedded in Rust types.
//!
//! Features:
//! - Automatic crate root detection
//! - Workspace-aware scanning
//! - `enumspot.toml` configuration, overridable from the command line
//! - Rayon-powered parallel parsing
//! - CI-friendly exit codes (0 clean, 1 findings)

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use enumspot_core::{
    analyze_workspace_with, find_crate_root, format_json, format_plain, init_structured_logging,
    is_workspace_root, load_config, CrateAnalysis, EnumspotConfig, EnumspotError, Enumspot,
    RuleDefinition,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Finds enum-like constant families embedded in Rust types"
)]
pub struct Cli {
    /// Path to the root of the Rust project
    #[arg(default_value = ".")]
    path: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Trait whose implementors are checked (repeatable)
    #[arg(long = "parent-type", value_name = "TRAIT")]
    parent_types: Vec<String>,

    /// Constant prefix never reported (repeatable)
    #[arg(long = "non-enum-prefix", value_name = "PREFIX")]
    non_enum_prefixes: Vec<String>,

    /// Use only the given --non-enum-prefix values, dropping the built-in list
    #[arg(long)]
    replace_default_prefixes: bool,

    /// Module path marking enum code ("" disables the exemption)
    #[arg(long, value_name = "PATH")]
    enum_namespace: Option<String>,

    /// Module path checked even inside the enum namespace ("" disables it)
    #[arg(long, value_name = "PATH")]
    exempt_namespace: Option<String>,

    /// Prefix separator character
    #[arg(long)]
    separator: Option<char>,

    /// Module path patterns to ignore (`prefix*`, `*suffix`, or substring)
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Directory names to skip while scanning
    #[arg(long = "exclude-dir", value_name = "DIR")]
    exclude_dirs: Vec<String>,

    /// Analyze entire workspace (all member crates)
    #[arg(long)]
    workspace: bool,

    /// Describe the rule with the effective configuration and exit
    #[arg(long)]
    explain: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<String>,
}

/// Prints a hint when running on a workspace root without `--workspace`.
fn print_workspace_info(path: &Path) {
    if !is_workspace_root(path) {
        return;
    }

    if let Ok(entries) = fs::read_dir(path) {
        let members: Vec<_> = entries
            .flatten()
            .filter(|e| {
                let p = e.path();
                p.is_dir() && p.join("Cargo.toml").exists()
            })
            .collect();

        if !members.is_empty() {
            eprintln!("INFO: Detected Cargo workspace with {} member(s):", members.len());
            for m in &members {
                eprintln!("  - {}", m.file_name().to_string_lossy());
            }
            eprintln!("TIP: Pass --workspace to analyze every member.");
            eprintln!();
        }
    }
}

/// Applies command-line rule options on top of the file configuration.
fn apply_overrides(cli: &Cli, builder: Enumspot) -> Enumspot {
    let mut builder = builder.parent_types(cli.parent_types.iter().cloned());

    builder = if cli.replace_default_prefixes {
        builder.replace_non_enum_prefixes(cli.non_enum_prefixes.iter().cloned())
    } else {
        builder.non_enum_prefixes(cli.non_enum_prefixes.iter().cloned())
    };

    if let Some(ns) = &cli.enum_namespace {
        builder = builder.enum_namespace(ns.clone());
    }
    if let Some(ns) = &cli.exempt_namespace {
        builder = builder.exempt_namespace(Some(ns.clone()).filter(|s| !s.is_empty()));
    }
    if let Some(sep) = cli.separator {
        builder = builder.separator(sep);
    }

    builder
        .ignore_patterns(cli.ignore.iter().cloned())
        .exclude_dirs(cli.exclude_dirs.iter().cloned())
}

/// Security: Validates output file paths to prevent path traversal.
///
/// Rejects absolute paths, `..` components and null bytes.
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }

    if p
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(anyhow!(
            "Path traversal (..) not allowed in output paths: {}",
            path
        ));
    }

    Ok(p)
}

/// Writes the report to `--output` or stdout.
fn emit(cli: &Cli, text: &str) -> Result<()> {
    match &cli.output {
        Some(file) => {
            let safe_path = validate_output_path(file)?;
            fs::write(&safe_path, text)
                .with_context(|| format!("Failed to write {}", safe_path.display()))?;
            eprintln!("Report saved to: {}", safe_path.display());
        }
        None if text.ends_with('\n') => print!("{}", text),
        None => println!("{}", text),
    }
    Ok(())
}

/// Renders workspace results, one section per crate.
fn render_workspace(results: &[CrateAnalysis], json: bool) -> Result<String> {
    if json {
        let crates: Vec<_> = results
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "root": c.root.display().to_string(),
                    "count": c.result.diagnostics.len(),
                    "diagnostics": c.result.diagnostics,
                })
            })
            .collect();
        let total: usize = results.iter().map(|c| c.result.diagnostics.len()).sum();
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "workspace": true,
            "total": total,
            "crates": crates,
        }))?);
    }

    let mut out = String::from("=== Workspace Analysis ===\n\n");
    for c in results {
        out.push_str(&format!("--- {} ({}) ---\n", c.name, c.root.display()));
        out.push_str(&format_plain(&c.result.diagnostics));
        out.push('\n');
    }
    Ok(out)
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] enumspot internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
        std::process::exit(2);
    }));

    // JSON to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();
    let input_path = Path::new(&cli.path);

    // Workspace mode: every member with its own enumspot.toml
    if cli.workspace {
        let file_cfg = load_config(input_path)?;
        let json = cli.json || file_cfg.as_ref().is_some_and(EnumspotConfig::wants_json);

        let results = analyze_workspace_with(input_path, |builder| apply_overrides(&cli, builder))?;
        if results.is_empty() {
            eprintln!("No crates found in workspace.");
            std::process::exit(0);
        }

        emit(&cli, &render_workspace(&results, json)?)?;
        let has_findings = results.iter().any(|c| c.result.has_findings());
        std::process::exit(if has_findings { 1 } else { 0 });
    }

    // Single crate mode
    let root = match find_crate_root(input_path) {
        Some(root) => root,
        None if cli.explain => input_path.to_path_buf(),
        None => {
            print_workspace_info(input_path);
            return Err(EnumspotError::workspace(
                input_path,
                "no Cargo.toml with a src/ directory at or above this path",
            )
            .into());
        }
    };

    let file_cfg = load_config(&root)?;
    let builder = match &file_cfg {
        Some(cfg) => Enumspot::from_config(&root, cfg)?,
        None => Enumspot::new(&root),
    };
    let builder = apply_overrides(&cli, builder);
    let json = cli.json || file_cfg.as_ref().is_some_and(EnumspotConfig::wants_json);

    if cli.explain {
        let definition = RuleDefinition::embedded_enum(builder.config());
        let text = if json {
            serde_json::to_string_pretty(&definition)?
        } else {
            definition.to_text()
        };
        emit(&cli, &text)?;
        return Ok(());
    }

    if builder.config().parent_types.is_empty() {
        eprintln!("[WARN] No parent types configured; nothing will be checked.");
        eprintln!("TIP: Pass --parent-type <TRAIT> or set parent_types in enumspot.toml.");
    }

    let result = builder.analyze()?;
    let text = if json {
        format_json(&result.diagnostics)?
    } else {
        format_plain(&result.diagnostics)
    };
    emit(&cli, &text)?;

    // CI-friendly exit code
    std::process::exit(if result.has_findings() { 1 } else { 0 });
}

#[cfg(test)]
mod tests {
    use super::*;
    use enumspot_core::{AnalysisResult, EmbeddedEnumConfig};
    use std::io::Write;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::File::create(path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
    }

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir()
            .join("enumspot_cli_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).ok();
        }
        fs::create_dir_all(&temp_dir).unwrap();
        temp_dir
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("enumspot").chain(args.iter().copied())).unwrap()
    }

    fn overridden(args: &[&str]) -> EmbeddedEnumConfig {
        let cli = parse(args);
        apply_overrides(&cli, Enumspot::new(".")).config().clone()
    }

    // --- argument parsing ---

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.path, ".");
        assert!(!cli.json);
        assert!(cli.parent_types.is_empty());
        assert_eq!(overridden(&[]), EmbeddedEnumConfig::default());
    }

    #[test]
    fn test_repeatable_parent_types() {
        let config = overridden(&["--parent-type", "Entity", "--parent-type", "Record"]);
        assert_eq!(config.parent_types, vec!["Entity", "Record"]);
    }

    #[test]
    fn test_non_enum_prefix_extends_defaults() {
        let config = overridden(&["--non-enum-prefix", "LEGACY"]);
        assert!(config.non_enum_prefixes.is_non_enum_prefix("LEGACY"));
        assert!(config.non_enum_prefixes.is_non_enum_prefix("MAX"));
    }

    #[test]
    fn test_replace_default_prefixes() {
        let config = overridden(&[
            "--non-enum-prefix",
            "LEGACY",
            "--replace-default-prefixes",
        ]);
        assert!(config.non_enum_prefixes.is_non_enum_prefix("LEGACY"));
        assert!(!config.non_enum_prefixes.is_non_enum_prefix("MAX"));
    }

    #[test]
    fn test_namespace_and_separator_overrides() {
        let config = overridden(&[
            "--enum-namespace",
            "kinds",
            "--exempt-namespace",
            "",
            "--separator",
            ".",
        ]);
        assert_eq!(config.enum_namespace, "kinds");
        assert_eq!(config.exempt_namespace, None);
        assert_eq!(config.separator, '.');
    }

    #[test]
    fn test_multi_char_separator_rejected() {
        assert!(Cli::try_parse_from(["enumspot", "--separator", "__"]).is_err());
    }

    // --- validate_output_path ---

    #[test]
    fn test_validate_output_path_relative() {
        assert_eq!(
            validate_output_path("report.json").unwrap(),
            PathBuf::from("report.json")
        );
    }

    #[test]
    fn test_validate_output_path_rejects_traversal() {
        assert!(validate_output_path("../report.json").is_err());
        assert!(validate_output_path("out/../../x").is_err());
        assert!(validate_output_path("bad\0name").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_output_path_rejects_absolute() {
        assert!(validate_output_path("/tmp/report.json").is_err());
    }

    // --- workspace rendering ---

    #[test]
    fn test_render_workspace_json() {
        let results = vec![CrateAnalysis {
            name: "orders".into(),
            root: PathBuf::from("orders"),
            result: AnalysisResult {
                root: PathBuf::from("orders"),
                files_scanned: 1,
                units_scanned: 0,
                skipped_files: vec![],
                diagnostics: vec![],
            },
        }];

        let text = render_workspace(&results, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["workspace"], true);
        assert_eq!(value["total"], 0);
        assert_eq!(value["crates"][0]["name"], "orders");

        let plain = render_workspace(&results, false).unwrap();
        assert!(plain.contains("--- orders (orders) ---"));
        assert!(plain.contains("No embedded enum constants found."));
    }

    // --- end to end through the overrides ---

    #[test]
    fn test_cli_overrides_file_config() {
        let dir = create_temp_dir("overrides");
        create_file(&dir.join("Cargo.toml"), "[package]\nname = \"shop\"");
        create_file(&dir.join("enumspot.toml"), "parent_types = [\"Entity\"]");
        create_file(
            &dir.join("src/lib.rs"),
            r#"pub trait Entity {}
pub struct Order;
impl Entity for Order {}
impl Order {
    const STATE_NEW: u8 = 0;
    const STATE_PAID: u8 = 1;
}
"#,
        );

        let file_cfg = load_config(&dir).unwrap().unwrap();
        let builder = Enumspot::from_config(&dir, &file_cfg).unwrap();

        let cli = parse(&["--non-enum-prefix", "STATE"]);
        let result = apply_overrides(&cli, builder.clone()).analyze().unwrap();
        assert!(!result.has_findings());

        let result = apply_overrides(&parse(&[]), builder).analyze().unwrap();
        assert_eq!(result.diagnostics.len(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_print_workspace_info_on_plain_crate_is_silent() {
        let dir = create_temp_dir("ws_info");
        create_file(&dir.join("Cargo.toml"), "[package]\nname = \"test\"");
        print_workspace_info(&dir);
        assert!(!is_workspace_root(&dir));
        fs::remove_dir_all(&dir).ok();
    }
}
