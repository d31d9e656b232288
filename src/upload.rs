//! Provenance capability for files handed to [`Storage::upload`](crate::Storage::upload).
//!
//! The layer that receives uploads (an HTTP handler, a multipart parser, ...)
//! knows which temporary files it created itself. It hands the adapter an
//! [`UploadedFile`] rather than a bare path, so the adapter never has to guess
//! whether an arbitrary local file is a legitimate upload.

use std::path::Path;

/// A just-received upload sitting somewhere on the local disk.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use local_storage::UploadedFile;
///
/// struct MultipartTemp {
///     path: PathBuf,
///     issued_by_us: bool,
/// }
///
/// impl UploadedFile for MultipartTemp {
///     fn local_path(&self) -> &Path {
///         &self.path
///     }
///
///     fn is_genuine(&self) -> bool {
///         self.issued_by_us && self.path.is_file()
///     }
/// }
/// ```
pub trait UploadedFile {
    /// Absolute path of the received file.
    fn local_path(&self) -> &Path;

    /// Returns `true` only if [`local_path`](UploadedFile::local_path) was
    /// produced by the upload channel for this request.
    fn is_genuine(&self) -> bool;
}
