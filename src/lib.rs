//! # local_storage
//!
//! A local-disk storage backend behind an interchangeable [`Storage`] trait.
//!
//! ## Overview
//!
//! [`LocalStorage`] maps caller-supplied relative paths (always written with
//! `/`) onto a configured directory and runs a fixed set of file operations
//! on them: write, append, copy, move, upload, delete, read, existence check,
//! metadata and directory listing.
//!
//! Two roots are in play:
//!
//! - read-class operations (`read`, `exists`, `delete`, `mkdir`, metadata,
//!   listing and the source side of copy/move) resolve against `base_path`;
//! - write-class operations (`write`, `append`, `upload` and the destination
//!   side of copy/move) resolve against `base_path/sub_path` and return the
//!   relative path they stored to, e.g. `public/img/a.png`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use local_storage::{LocalConfig, LocalStorage, Storage};
//!
//! let config = LocalConfig::builder()
//!     .base_path("/data")
//!     .sub_path("public")
//!     .base_url("https://cdn.example.com")
//!     .build()?;
//! let storage = LocalStorage::new(config);
//!
//! let uri = storage.write("img/a.png", b"\x89PNG")?;
//! assert_eq!(uri, "public/img/a.png");
//! let url = storage.pre_signed_url(&uri, None)?;
//! assert_eq!(url, "https://cdn.example.com/public/img/a.png");
//! # Ok::<(), local_storage::StorageError>(())
//! ```
//!
//! ## Concurrency
//!
//! Every operation is a blocking call with no internal locking. Serialize
//! access yourself if several writers may touch the same path.

pub mod config;
pub mod error;
pub mod path;
pub mod storage;
pub mod upload;
pub mod url;

pub use config::{ConfigOptions, LocalConfig, LocalConfigBuilder, OptionTemplate};
pub use error::{Result, StorageError};
pub use path::ResolvedPath;
pub use storage::{LocalStorage, Storage};
pub use upload::UploadedFile;
pub use url::{PublicUrlBuilder, UrlBuilder};
