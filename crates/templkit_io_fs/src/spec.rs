//! Copy option models and top-level error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::ignore::SpecIgnorePatterns;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Symlink handling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCopySymlinkStrategy {
    /// Follow the link and copy the target bytes/entries.
    Dereference,
    /// Ignore symlink entries (recorded as skipped).
    SkipSymlinks,
}

/// Result of [`crate::ensure_placeholder_doc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPlaceholderOutcome {
    /// The document did not exist and was written.
    Created,
    /// A file with the placeholder name was already there and was left alone.
    AlreadyPresent,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `copy_tree`.
#[derive(Debug, Clone)]
pub struct SpecCopyOptions {
    /// Ordered ignore patterns matched against the `/`-separated relative path.
    pub patterns_ignore: SpecIgnorePatterns,
    /// Symlink handling behavior.
    pub rule_symlink: EnumCopySymlinkStrategy,
    /// Do not mutate filesystem; record what would happen.
    pub if_dry_run: bool,
}

impl Default for SpecCopyOptions {
    fn default() -> Self {
        Self {
            patterns_ignore: SpecIgnorePatterns::default(),
            rule_symlink: EnumCopySymlinkStrategy::Dereference,
            if_dry_run: false,
        }
    }
}

/// One copy failure item with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyError {
    /// Failed path, relative to the source root when known.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// "Top-level call failed" errors (input validation / setup stage).
#[derive(Debug, Error)]
pub enum CopyTreeError {
    /// Invalid ignore pattern (glob compilation failed).
    #[error("{0}")]
    InvalidPattern(String),
    /// Source path is not a directory.
    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    /// Source and destination overlap (`src` contains `dst` or vice versa).
    #[error(
        "Source and destination directories overlap: {} <-> {}",
        path_src.display(),
        path_dst.display()
    )]
    SourceDestinationOverlap {
        /// Source directory as given.
        path_src: PathBuf,
        /// Destination directory as given.
        path_dst: PathBuf,
    },
    /// Destination directory initialization failed.
    #[error("Failed to initialize destination {}: {message}", path.display())]
    DestinationInitFailed {
        /// Destination path that failed initialization.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

/// Errors that end a whole template run before or after the copy pass.
#[derive(Debug, Error)]
pub enum RunError {
    /// Target directory does not exist.
    #[error("Target directory '{}' does not exist", .0.display())]
    TargetMissing(PathBuf),
    /// Target path exists but is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    TargetNotDirectory(PathBuf),
    /// Copy setup failed.
    #[error(transparent)]
    Copy(#[from] CopyTreeError),
    /// Writing the placeholder document failed.
    #[error("Failed to write placeholder {}: {source}", path.display())]
    Placeholder {
        /// Placeholder path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
