//! Message rendering for enum-candidate clusters.

use super::prefix_matcher::Cluster;

/// Template of every embedded-enum diagnostic; `{}` receives the quoted names.
pub const ERROR_MESSAGE: &str = "Constants \"{}\" should be extracted to standalone enum class";

/// Render one message for a group of constant names.
///
/// `["A", "B"]` becomes `Constants "A", "B" should be extracted to standalone enum class`.
pub fn render_message<S: AsRef<str>>(names: &[S]) -> String {
    let joined = names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\", \"");
    ERROR_MESSAGE.replacen("{}", &joined, 1)
}

/// Render one message per cluster, keeping cluster order.
pub fn render_messages(clusters: &[Cluster]) -> Vec<String> {
    clusters.iter().map(|c| render_message(&c.members)).collect()
}
