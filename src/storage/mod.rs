//! The storage contract and its local-disk implementation.
//!
//! Callers program against [`Storage`] so that local disk, object stores and
//! remote file servers are interchangeable. This crate ships
//! [`LocalStorage`]; other backends implement the same trait elsewhere.

mod fs;

pub use fs::LocalStorage;

use std::time::{Duration, SystemTime};

use crate::error::Result;
use crate::upload::UploadedFile;

/// Operations every storage backend provides.
///
/// Write-class operations (`write`, `append`, `copy`, `move_file`, `upload`)
/// return the relative path the content was stored under. Hand that value to
/// [`read`](Storage::read) or [`pre_signed_url`](Storage::pre_signed_url) to
/// reach the file again.
///
/// All calls block until the underlying file system is done. Nothing here
/// locks: concurrent writers to the same path get whatever the file system
/// does (usually last-writer-wins), so callers that need exclusion must
/// provide it themselves.
///
/// # Implementing a custom backend
///
/// ```rust,no_run
/// use std::time::{Duration, SystemTime};
/// use local_storage::{Result, Storage, StorageError, UploadedFile};
///
/// struct NullStorage;
///
/// impl Storage for NullStorage {
///     fn write(&self, path: &str, _content: &[u8]) -> Result<String> { Ok(path.into()) }
///     fn append(&self, path: &str, _content: &[u8]) -> Result<String> { Ok(path.into()) }
///     fn copy(&self, _src: &str, dst: &str) -> Result<String> { Ok(dst.into()) }
///     fn move_file(&self, _src: &str, dst: &str) -> Result<String> { Ok(dst.into()) }
///     fn upload(&self, _file: &dyn UploadedFile, _dst: &str) -> Result<String> {
///         Err(StorageError::UploadNotVerified)
///     }
///     fn exists(&self, _path: &str) -> bool { false }
///     fn read(&self, _path: &str) -> Result<Vec<u8>> { Ok(Vec::new()) }
///     fn delete(&self, _path: &str) -> Result<bool> { Ok(false) }
///     fn mkdir(&self, _path: &str) -> Result<()> { Ok(()) }
///     fn last_modified(&self, _path: &str) -> Result<SystemTime> { Ok(SystemTime::UNIX_EPOCH) }
///     fn file_size(&self, _path: &str) -> Result<u64> { Ok(0) }
///     fn read_dir(&self, _path: &str) -> Result<Vec<String>> { Ok(Vec::new()) }
///     fn pre_signed_url(&self, path: &str, _expires: Option<Duration>) -> Result<String> {
///         Ok(format!("null://{path}"))
///     }
/// }
/// ```
pub trait Storage: Send + Sync {
    /// Create or overwrite `path` with `content`.
    fn write(&self, path: &str, content: &[u8]) -> Result<String>;

    /// Append `content` to `path`, creating the file if needed.
    fn append(&self, path: &str, content: &[u8]) -> Result<String>;

    /// Duplicate `source` to `destination`.
    fn copy(&self, source: &str, destination: &str) -> Result<String>;

    /// Relocate `source` to `destination`.
    fn move_file(&self, source: &str, destination: &str) -> Result<String>;

    /// Move a verified upload into storage at `destination`.
    fn upload(&self, file: &dyn UploadedFile, destination: &str) -> Result<String>;

    /// Whether anything exists at `path`. Never fails.
    fn exists(&self, path: &str) -> bool;

    /// Full content of `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Remove a file, link or whole directory tree. Returns `false` if
    /// nothing was there. An empty path (or `/`) names the storage root and
    /// is refused.
    fn delete(&self, path: &str) -> Result<bool>;

    /// Create a directory and any missing parents.
    fn mkdir(&self, path: &str) -> Result<()>;

    fn last_modified(&self, path: &str) -> Result<SystemTime>;

    /// Size in bytes.
    fn file_size(&self, path: &str) -> Result<u64>;

    /// Entry names of a directory.
    fn read_dir(&self, path: &str) -> Result<Vec<String>>;

    /// A URL under which `path` can be fetched, optionally time-limited.
    fn pre_signed_url(&self, path: &str, expires: Option<Duration>) -> Result<String>;
}
