//! Output formatting - plaintext and JSON.

use serde_json::json;

use crate::builder::EnumClusterDiagnostic;

/// Formats diagnostics as `file:line: message` lines.
pub fn format_plain(diagnostics: &[EnumClusterDiagnostic]) -> String {
    if diagnostics.is_empty() {
        return "No embedded enum constants found.\n".to_string();
    }

    let mut out = format!("EMBEDDED ENUM CONSTANTS ({}):\n", diagnostics.len());
    for d in diagnostics {
        out.push_str(&format!("{}:{}: [{}] {}\n", d.file, d.line, d.unit, d.message));
    }
    out
}

/// Formats diagnostics as a pretty JSON document.
pub fn format_json(diagnostics: &[EnumClusterDiagnostic]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "count": diagnostics.len(),
        "diagnostics": diagnostics,
    }))
}

/// Prints diagnostics in plain text format.
pub fn print_plain(diagnostics: &[EnumClusterDiagnostic]) {
    print!("{}", format_plain(diagnostics));
}

/// Prints diagnostics in JSON format.
///
/// Falls back to one message per line if serialization fails.
pub fn print_json(diagnostics: &[EnumClusterDiagnostic]) {
    match format_json(diagnostics) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            for d in diagnostics {
                println!("{:?}", d.message);
            }
        }
    }
}
