//! Mapping caller-supplied relative paths onto the disk.
//!
//! Relative paths always use `/`. Read-class operations resolve against the
//! base directory; write-class operations also insert the configured
//! sub-directory and report the resulting relative path back to the caller.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::config::LocalConfig;
use crate::error::{Result, StorageError};

/// Outcome of resolving a write-class path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// `sub_path` + relative path, host separators. This is what write-class
    /// operations return to the caller.
    pub relative: String,
    /// The full on-disk location.
    pub absolute: PathBuf,
}

pub(crate) fn to_host_separators(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace('/', &MAIN_SEPARATOR.to_string())
    }
}

/// Convert `/` to the host separator and strip one leading separator.
///
/// Any `..` component is rejected.
pub fn normalize(relative: &str) -> Result<String> {
    let host = to_host_separators(relative);
    let stripped = host.strip_prefix(MAIN_SEPARATOR).unwrap_or(&host);

    if Path::new(stripped)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(StorageError::PathTraversal(relative.to_string()));
    }

    Ok(stripped.to_string())
}

fn join(base: &Path, tail: &str) -> PathBuf {
    let mut joined = base.as_os_str().to_owned();
    if !base.as_os_str().to_string_lossy().ends_with(MAIN_SEPARATOR) {
        joined.push(MAIN_SEPARATOR.to_string());
    }
    joined.push(tail);
    PathBuf::from(joined)
}

/// `base_path` + relative path.
pub fn resolve_read(config: &LocalConfig, relative: &str) -> Result<PathBuf> {
    Ok(join(config.base_path(), &normalize(relative)?))
}

/// `base_path` + `sub_path` + relative path, plus the relative part that
/// ends up on disk.
pub fn resolve_write(config: &LocalConfig, relative: &str) -> Result<ResolvedPath> {
    let relative = format!("{}{}{}", config.sub_path(), MAIN_SEPARATOR, normalize(relative)?);
    let absolute = join(config.base_path(), &relative);
    Ok(ResolvedPath { relative, absolute })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LocalConfig {
        LocalConfig::builder()
            .base_path("/data")
            .sub_path("public")
            .base_url("https://example.com")
            .build()
            .unwrap()
    }

    fn host(path: &str) -> String {
        to_host_separators(path)
    }

    #[test]
    fn normalize_strips_exactly_one_leading_separator() {
        assert_eq!(normalize("/img/a.png").unwrap(), host("img/a.png"));
        assert_eq!(normalize("img/a.png").unwrap(), host("img/a.png"));
        assert_eq!(normalize("//img").unwrap(), host("/img"));
    }

    #[test]
    fn normalize_rejects_parent_components() {
        assert!(matches!(
            normalize("../etc/passwd"),
            Err(StorageError::PathTraversal(_))
        ));
        assert!(matches!(
            normalize("img/../../secret"),
            Err(StorageError::PathTraversal(_))
        ));
    }

    #[test]
    fn normalize_allows_dots_inside_names() {
        assert_eq!(normalize("a..b/c.txt").unwrap(), host("a..b/c.txt"));
    }

    #[test]
    fn read_resolution_skips_sub_path() {
        let path = resolve_read(&config(), "img/a.png").unwrap();
        assert_eq!(path, PathBuf::from(host("/data/img/a.png")));
        assert!(path.starts_with("/data"));
    }

    #[test]
    fn write_resolution_inserts_sub_path() {
        let resolved = resolve_write(&config(), "/img/a.png").unwrap();
        assert_eq!(resolved.relative, host("public/img/a.png"));
        assert_eq!(resolved.absolute, PathBuf::from(host("/data/public/img/a.png")));
        assert!(resolved.absolute.starts_with(host("/data/public")));
    }

    #[test]
    fn root_base_does_not_double_separator() {
        let config = LocalConfig::builder()
            .base_path("/")
            .sub_path("public")
            .base_url("https://example.com")
            .build()
            .unwrap();

        let path = resolve_read(&config, "a.txt").unwrap();
        assert_eq!(path, PathBuf::from(host("/a.txt")));
    }
}
