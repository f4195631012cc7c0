//! Common utilities shared across the extraction and host modules.

mod graph_trait;
mod path_builder;

pub use graph_trait::GraphTraversal;
pub use path_builder::{
    last_segment, paths_match, qualified_name, syn_path_string, ModulePathBuilder,
};
