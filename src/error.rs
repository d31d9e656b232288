//! Error types for the `local_storage` crate.

use std::path::PathBuf;

/// All errors that can occur while configuring or using a storage adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A required configuration option is missing or empty.
    #[error("Config error: required option `{option}` is missing or empty")]
    Config { option: &'static str },

    /// The target exists but cannot be written.
    #[error("not writable: {}", path.display())]
    NotWritable { path: PathBuf },

    /// The target exists but cannot be read.
    #[error("not readable: {}", path.display())]
    NotReadable { path: PathBuf },

    /// The file handed to `upload` did not prove it came from an upload channel.
    #[error("upload failed: not a valid uploaded file")]
    UploadNotVerified,

    /// Relocating a verified upload failed.
    #[error("upload failed")]
    Upload {
        #[source]
        source: std::io::Error,
    },

    #[error("copy failed")]
    Copy {
        #[source]
        source: std::io::Error,
    },

    #[error("move failed")]
    Move {
        #[source]
        source: std::io::Error,
    },

    /// `delete` was pointed at the storage root itself.
    #[error("refusing to delete the storage root")]
    StorageRoot,

    /// A relative path tried to climb out of its root with `..`.
    #[error("path escapes the storage root: {0}")]
    PathTraversal(String),

    /// Any other file-system failure, tagged with the operation that hit it.
    #[error("{op} failed for {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The URL builder could not produce a URL.
    #[error("Url error: {0}")]
    Url(String),
}

impl StorageError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns the low-level message behind a wrapped failure, if any.
    ///
    /// `copy`, `move_file` and `upload` keep a coarse Display text; the
    /// original OS error is still available here for logging.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Upload { source } | Self::Copy { source } | Self::Move { source } => {
                Some(source.to_string())
            }
            Self::Io { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }

    /// `true` for failures raised by the file system itself.
    pub fn is_file_system(&self) -> bool {
        matches!(
            self,
            Self::NotWritable { .. }
                | Self::NotReadable { .. }
                | Self::UploadNotVerified
                | Self::Upload { .. }
                | Self::Copy { .. }
                | Self::Move { .. }
                | Self::Io { .. }
        )
    }

    /// `true` if the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Upload { source } | Self::Copy { source } | Self::Move { source } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// A type alias for `Result<T, StorageError>`.
pub type Result<T> = std::result::Result<T, StorageError>;
