//! Failure taxonomy for a validation run.

use std::io;
use std::path::{Path, PathBuf};

use fixcheck_schema::DecodeError;
use thiserror::Error;

/// Why a directory or fixture could not be validated.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The fixture directory could not be listed. Nothing was validated.
    #[error("cannot list directory {}: {source}", .path.display())]
    DirectoryRead { path: PathBuf, source: io::Error },

    /// A candidate file's bytes could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    FileRead { path: PathBuf, source: io::Error },

    /// A file's contents do not conform to the fixture schema.
    #[error("{} is not a valid fixture: {source}", .path.display())]
    Deserialization { path: PathBuf, source: DecodeError },
}

impl ValidationError {
    /// The directory or file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryRead { path, .. } | Self::FileRead { path, .. } | Self::Deserialization { path, .. } => path,
        }
    }

    /// Short stable name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DirectoryRead { .. } => "directory_read",
            Self::FileRead { .. } => "file_read",
            Self::Deserialization { .. } => "deserialization",
        }
    }
}
