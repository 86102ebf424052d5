//! Error types for the rewrite pipeline

use miette::Diagnostic;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of one of the filesystem steps of a rewrite
#[derive(Debug, Error, Diagnostic)]
pub enum FixError {
    /// The target file does not exist
    #[error("target file not found: {}", .path.display())]
    #[diagnostic(
        code(lice_fixer::not_found),
        help("run lice-fixer from the directory that contains the SnM/ sources")
    )]
    NotFound { path: PathBuf },

    /// The target exists but could not be read as text
    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(lice_fixer::read), help("check permissions and that the file is UTF-8"))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backup or the rewritten target could not be written
    #[error("failed to write {}", .path.display())]
    #[diagnostic(code(lice_fixer::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FixError {
    /// Classify a read failure, separating a missing file from everything else
    pub(crate) fn from_read(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FixError::NotFound { path }
        } else {
            FixError::Read { path, source }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FixError::NotFound { path }
            | FixError::Read { path, .. }
            | FixError::Write { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixError>;
