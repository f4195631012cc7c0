//! Typed error handling for enumspot.
//!
//! The classification core is total and never fails; these errors belong to
//! the host side: reading and parsing source files, loading `enumspot.toml`,
//! and locating crates.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnumspotError {
    /// A source or manifest file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        message: String,
        /// 1-indexed
        line: usize,
        /// 1-indexed
        column: usize,
    },

    /// `enumspot.toml` holds a value the rule cannot use
    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// No crate could be located, or a workspace could not be listed
    #[error("workspace problem at {path}: {message}")]
    Workspace { path: PathBuf, message: String },
}

impl EnumspotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Parse error located at the start of the `syn` error span.
    pub fn from_syn(path: impl Into<PathBuf>, err: &syn::Error) -> Self {
        let start = err.span().start();
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
            line: start.line,
            column: start.column + 1,
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn workspace(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Workspace {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Per-file failures: the file is skipped and the analysis goes on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Io { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Config { path, .. }
            | Self::Workspace { path, .. } => path,
        }
    }
}

pub type EnumspotResult<T> = Result<T, EnumspotError>;

/// Attach the offending path to an I/O error.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> EnumspotResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> EnumspotResult<T> {
        self.map_err(|e| EnumspotError::io(path, e))
    }
}
