use std::path::PathBuf;

use thiserror::Error;

use crate::object::{self, Id, Kind, ParseIdError};

/// Describes the potential error conditions that might arise from `Repository` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    ObjectError(#[from] object::Error),

    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    #[error("object {0} not found")]
    ObjectNotFound(Id),

    #[error("object {id} is a {kind}, not a commit")]
    NotACommit { id: Id, kind: Kind },

    #[error("reference {0} has no data")]
    DatalessRef(String),

    /// A chain of `ref:` redirects leads back to a reference already visited.
    #[error("reference cycle detected at {0}")]
    ReferenceCycle(String),

    #[error("reference {0} is not valid UTF-8")]
    NonUtf8Ref(String),

    #[error("unknown revision or reference `{0}`")]
    UnknownName(String),

    #[error("not a git repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    #[error("git dir doesn't exist: {0}")]
    GitDirDoesntExist(PathBuf),

    #[error("git dir shouldn't exist: {0}")]
    GitDirShouldntExist(PathBuf),

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("configuration file missing: {0}")]
    MissingConfig(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedFormatVersion(String),
}

/// A specialized `Result` type for `Repository` operations.
pub type Result<T> = std::result::Result<T, Error>;
