//! Enumspot LSP Server - real-time embedded enum diagnostics for Rust.
//!
//! Provides IDE integration with:
//! - Live diagnostics on file open/save
//! - Warning markers on types carrying an enum-like constant family
//! - Rule options through `initializationOptions`, on top of `enumspot.toml`

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use enumspot_core::{find_crate_root, AnalysisResult, EnumClusterDiagnostic, Enumspot, RULE_NAME};

const SOURCE: &str = "enumspot";

/// Options a client may pass in `initializationOptions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InitializationOptions {
    /// Added to the crate's `parent_types`.
    parent_types: Vec<String>,
    /// Added to the crate's deny-list.
    non_enum_prefixes: Vec<String>,
    /// Module path patterns to ignore.
    ignore: Vec<String>,
}

impl InitializationOptions {
    fn from_value(value: Option<serde_json::Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    fn apply(&self, builder: Enumspot) -> Enumspot {
        builder
            .parent_types(self.parent_types.iter().cloned())
            .non_enum_prefixes(self.non_enum_prefixes.iter().cloned())
            .ignore_patterns(self.ignore.iter().cloned())
    }
}

/// Enumspot Language Server state.
struct EnumspotLsp {
    client: Client,
    options: Arc<RwLock<InitializationOptions>>,
    /// Files that received diagnostics in the last run, per crate root.
    published: Arc<RwLock<HashMap<PathBuf, HashSet<Url>>>>,
}

impl EnumspotLsp {
    fn new(client: Client) -> Self {
        Self {
            client,
            options: Arc::new(RwLock::new(InitializationOptions::default())),
            published: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Run the analysis for the crate containing `uri` and publish
    /// diagnostics.
    async fn run_analysis(&self, uri: Url) {
        let file_path = match uri.to_file_path() {
            Ok(p) => p,
            Err(_) => {
                self.log_error("Invalid file URI").await;
                return;
            }
        };

        let crate_root = match find_crate_root(&file_path) {
            Some(r) => r,
            None => {
                self.log_info("No Cargo.toml found, skipping analysis").await;
                return;
            }
        };

        let options = self.options.read().await.clone();
        let root = crate_root.clone();
        // Parsing is CPU-bound and uses rayon; keep it off the async workers
        let analysis = tokio::task::spawn_blocking(move || analyze(&root, &options)).await;

        let result = match analysis {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                self.log_error(&format!("Analysis failed: {:#}", e)).await;
                return;
            }
            Err(e) => {
                self.log_error(&format!("Analysis task failed: {}", e)).await;
                return;
            }
        };

        let root = client_root(&file_path, &crate_root);
        let file_diagnostics = diagnostics_by_file(&result, &root);
        let current: HashSet<Url> = file_diagnostics.keys().cloned().collect();

        // Files that were flagged last time but are clean now
        let stale: Vec<Url> = {
            let mut published = self.published.write().await;
            let previous = published.insert(crate_root, current.clone()).unwrap_or_default();
            previous.difference(&current).cloned().collect()
        };
        for uri in stale {
            self.client.publish_diagnostics(uri, vec![], None).await;
        }

        for (file_uri, diagnostics) in file_diagnostics {
            self.client
                .publish_diagnostics(file_uri, diagnostics, None)
                .await;
        }

        self.log_info(&format!(
            "Analysis complete: {} files, {} units, {} findings",
            result.files_scanned,
            result.units_scanned,
            result.diagnostics.len()
        ))
        .await;
    }

    async fn log_info(&self, message: &str) {
        self.client.log_message(MessageType::INFO, message).await;
    }

    async fn log_error(&self, message: &str) {
        self.client.log_message(MessageType::ERROR, message).await;
    }
}

/// Analyze one crate with its `enumspot.toml` plus the client options.
fn analyze(crate_root: &Path, options: &InitializationOptions) -> Result<AnalysisResult> {
    let builder = Enumspot::load(crate_root)?;
    options.apply(builder).analyze()
}

/// The crate root as the client spells it.
///
/// `crate_root` is canonical; walking up from the client's own `file_path`
/// by the file's depth below that root keeps symlinked prefixes intact.
fn client_root(file_path: &Path, crate_root: &Path) -> PathBuf {
    let depth = file_path.canonicalize().ok().and_then(|canonical| {
        canonical
            .strip_prefix(crate_root)
            .ok()
            .map(|rel| rel.components().count())
    });
    depth
        .and_then(|n| file_path.ancestors().nth(n))
        .map(Path::to_path_buf)
        .unwrap_or_else(|| crate_root.to_path_buf())
}

/// LSP diagnostics grouped by file URI, with paths under `root`.
fn diagnostics_by_file(result: &AnalysisResult, root: &Path) -> HashMap<Url, Vec<Diagnostic>> {
    let mut by_file: HashMap<Url, Vec<Diagnostic>> = HashMap::new();
    for d in &result.diagnostics {
        if let Ok(uri) = Url::from_file_path(root.join(&d.file)) {
            by_file.entry(uri).or_default().push(to_lsp_diagnostic(d));
        }
    }
    by_file
}

fn to_lsp_diagnostic(d: &EnumClusterDiagnostic) -> Diagnostic {
    // Reported lines are 1-based
    let line = d.line.saturating_sub(1) as u32;
    Diagnostic {
        range: Range {
            start: Position { line, character: 0 },
            end: Position {
                line,
                character: 100,
            },
        },
        severity: Some(DiagnosticSeverity::WARNING),
        code: Some(NumberOrString::String(RULE_NAME.to_string())),
        code_description: None,
        source: Some(SOURCE.to_string()),
        message: d.message.clone(),
        related_information: None,
        tags: None,
        data: Some(serde_json::json!({
            "unit": d.unit,
            "prefix": d.prefix,
            "constants": d.constants,
        })),
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for EnumspotLsp {
    async fn initialize(&self, params: InitializeParams) -> LspResult<InitializeResult> {
        {
            let mut options = self.options.write().await;
            *options = InitializationOptions::from_value(params.initialization_options);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(false),
                        })),
                        ..Default::default()
                    },
                )),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: "enumspot-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Enumspot LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> LspResult<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        if uri.path().ends_with(".rs") {
            self.run_analysis(uri).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        if uri.path().ends_with(".rs") {
            self.run_analysis(uri).await;
        }
    }

    async fn did_change(&self, _params: DidChangeTextDocumentParams) {
        // Analysis reads files from disk, so it only runs on save.
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] enumspot-lsp internal error: {}", info);
    }));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(EnumspotLsp::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
