//! Local filesystem storage backend.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::config::LocalConfig;
use crate::error::{Result, StorageError};
use crate::path::{self, ResolvedPath};
use crate::storage::Storage;
use crate::upload::UploadedFile;
use crate::url::{PublicUrlBuilder, UrlBuilder};

/// Storage backend that keeps files under a directory on the local disk.
///
/// Read-class operations resolve against `base_path`; write-class operations
/// resolve against `base_path/sub_path` and return the stored relative path.
/// Parent directories are created on demand.
///
/// # Example
///
/// ```rust,no_run
/// use local_storage::{LocalConfig, LocalStorage, Storage};
///
/// let config = LocalConfig::builder()
///     .base_path("/data")
///     .sub_path("public")
///     .base_url("https://cdn.example.com")
///     .build()?;
/// let storage = LocalStorage::new(config);
///
/// let stored = storage.write("img/a.png", b"...")?;
/// assert_eq!(stored, "public/img/a.png");
/// assert_eq!(storage.read(&stored)?, b"...");
/// # Ok::<(), local_storage::StorageError>(())
/// ```
pub struct LocalStorage {
    config: LocalConfig,
    urls: Box<dyn UrlBuilder>,
}

impl LocalStorage {
    /// Create a backend that hands out plain public URLs.
    pub fn new(config: LocalConfig) -> Self {
        Self::with_url_builder(config, PublicUrlBuilder)
    }

    /// Create a backend that delegates URL building to `urls`.
    pub fn with_url_builder(config: LocalConfig, urls: impl UrlBuilder + 'static) -> Self {
        Self {
            config,
            urls: Box::new(urls),
        }
    }

    pub fn config(&self) -> &LocalConfig {
        &self.config
    }

    /// Absolute location of `relative` for read-class operations.
    pub fn resolve_read(&self, relative: &str) -> Result<PathBuf> {
        path::resolve_read(&self.config, relative)
    }

    /// Absolute location and stored relative path for write-class operations.
    pub fn resolve_write(&self, relative: &str) -> Result<ResolvedPath> {
        path::resolve_write(&self.config, relative)
    }
}

/// Existing targets must be writable; missing ones get their parent created.
fn prepare_target(target: &Path) -> Result<()> {
    match fs::metadata(target) {
        Ok(meta) if meta.permissions().readonly() => Err(StorageError::NotWritable {
            path: target.to_path_buf(),
        }),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            create_parent(target).map_err(|e| StorageError::io("create parent directory", target, e))
        }
        Err(e) => Err(StorageError::io("stat", target, e)),
    }
}

fn create_parent(target: &Path) -> io::Result<()> {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Rename, falling back to copy + remove across filesystems.
fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        other => other,
    }
}

/// `true` if both paths exist and name the same file, so copying would
/// truncate the source before reading it.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    create_parent(to)?;
    if same_file(from, to) {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "source and destination are the same file",
        ));
    }
    fs::copy(from, to).map(|_| ())
}

/// Depth-first removal. `Ok(false)` if nothing was at `target`.
fn remove_tree(target: &Path) -> io::Result<bool> {
    let meta = match fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    // symlink_metadata does not follow links, so a link to a directory
    // is removed as a link.
    if !meta.is_dir() {
        fs::remove_file(target)?;
        return Ok(true);
    }

    for entry in fs::read_dir(target)? {
        remove_tree(&entry?.path())?;
    }
    fs::remove_dir(target)?;
    Ok(true)
}

impl Storage for LocalStorage {
    fn write(&self, path: &str, content: &[u8]) -> Result<String> {
        let ResolvedPath { relative, absolute } = self.resolve_write(path)?;
        prepare_target(&absolute)?;

        fs::write(&absolute, content).map_err(|e| StorageError::io("write", &absolute, e))?;

        tracing::debug!("Wrote {} bytes to {}", content.len(), absolute.display());
        Ok(relative)
    }

    fn append(&self, path: &str, content: &[u8]) -> Result<String> {
        let ResolvedPath { relative, absolute } = self.resolve_write(path)?;
        prepare_target(&absolute)?;

        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&absolute)
            .and_then(|mut file| file.write_all(content))
            .map_err(|e| StorageError::io("append", &absolute, e))?;

        tracing::debug!("Appended {} bytes to {}", content.len(), absolute.display());
        Ok(relative)
    }

    fn copy(&self, source: &str, destination: &str) -> Result<String> {
        let from = self.resolve_read(source)?;
        let ResolvedPath { relative, absolute } = self.resolve_write(destination)?;

        if let Err(e) = copy_file(&from, &absolute) {
            tracing::warn!("Copy {} -> {} failed: {e}", from.display(), absolute.display());
            return Err(StorageError::Copy { source: e });
        }

        tracing::debug!("Copied {} to {}", from.display(), absolute.display());
        Ok(relative)
    }

    fn move_file(&self, source: &str, destination: &str) -> Result<String> {
        let from = self.resolve_read(source)?;
        let ResolvedPath { relative, absolute } = self.resolve_write(destination)?;

        if let Err(e) = create_parent(&absolute).and_then(|()| relocate(&from, &absolute)) {
            tracing::warn!("Move {} -> {} failed: {e}", from.display(), absolute.display());
            return Err(StorageError::Move { source: e });
        }

        tracing::debug!("Moved {} to {}", from.display(), absolute.display());
        Ok(relative)
    }

    fn upload(&self, file: &dyn UploadedFile, destination: &str) -> Result<String> {
        let local = file.local_path();
        if !file.is_genuine() {
            tracing::warn!("Rejected upload of unverified file {}", local.display());
            return Err(StorageError::UploadNotVerified);
        }

        let ResolvedPath { relative, absolute } = self.resolve_write(destination)?;

        if let Err(e) = create_parent(&absolute).and_then(|()| relocate(local, &absolute)) {
            tracing::warn!("Upload {} -> {} failed: {e}", local.display(), absolute.display());
            return Err(StorageError::Upload { source: e });
        }

        tracing::debug!("Stored upload {} at {}", local.display(), absolute.display());
        Ok(relative)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_read(path).is_ok_and(|p| p.exists())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let target = self.resolve_read(path)?;
        fs::read(&target).map_err(|e| {
            // Only a file that is actually there counts as unreadable.
            if e.kind() == ErrorKind::PermissionDenied && fs::symlink_metadata(&target).is_ok() {
                StorageError::NotReadable {
                    path: target.clone(),
                }
            } else {
                StorageError::io("read", &target, e)
            }
        })
    }

    fn delete(&self, path: &str) -> Result<bool> {
        let normalized = path::normalize(path)?;
        if !Path::new(&normalized)
            .components()
            .any(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::StorageRoot);
        }
        let target = self.resolve_read(path)?;
        let removed = remove_tree(&target).map_err(|e| StorageError::io("delete", &target, e))?;

        if removed {
            tracing::debug!("Deleted {}", target.display());
        }
        Ok(removed)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        let target = self.resolve_read(path)?;
        if target.exists() {
            return Ok(());
        }
        fs::create_dir_all(&target).map_err(|e| StorageError::io("mkdir", &target, e))
    }

    fn last_modified(&self, path: &str) -> Result<SystemTime> {
        let target = self.resolve_read(path)?;
        fs::metadata(&target)
            .and_then(|meta| meta.modified())
            .map_err(|e| StorageError::io("last_modified", &target, e))
    }

    fn file_size(&self, path: &str) -> Result<u64> {
        let target = self.resolve_read(path)?;
        fs::metadata(&target)
            .map(|meta| meta.len())
            .map_err(|e| StorageError::io("file_size", &target, e))
    }

    /// Sorted entry names, led by `.` and `..` like a classic directory scan.
    ///
    /// Entries whose names are not valid UTF-8 cannot be addressed through a
    /// relative `&str` path, so they are skipped with a warning.
    fn read_dir(&self, path: &str) -> Result<Vec<String>> {
        let target = self.resolve_read(path)?;
        let entries = fs::read_dir(&target)
            .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
            .map_err(|e| StorageError::io("read_dir", &target, e))?;

        let mut names: Vec<String> = entries
            .into_iter()
            .filter_map(|entry| match entry.file_name().into_string() {
                Ok(name) => Some(name),
                Err(raw) => {
                    tracing::warn!("Skipping non UTF-8 entry {:?} in {}", raw, target.display());
                    None
                }
            })
            .collect();
        names.sort();

        let mut listing = Vec::with_capacity(names.len() + 2);
        listing.push(".".to_string());
        listing.push("..".to_string());
        listing.extend(names);
        Ok(listing)
    }

    fn pre_signed_url(&self, path: &str, expires: Option<Duration>) -> Result<String> {
        path::normalize(path)?;
        self.urls.build_url(self.config.base_url(), path, expires)
    }
}
