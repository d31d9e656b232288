//! Configuration for the local storage adapter.
//!
//! A [`LocalConfig`] is built once, validated, and never changes afterwards.
//! It can come from the fluent [`LocalConfigBuilder`], from a plain string
//! map, or from any serde source via [`ConfigOptions`].

use std::collections::HashMap;
use std::path::{MAIN_SEPARATOR, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StorageError};
use crate::path::to_host_separators;

/// One entry of the declared option schema, used to validate input and to
/// render a setup form for an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub example: &'static str,
    pub required: bool,
}

const TEMPLATE: [OptionTemplate; 3] = [
    OptionTemplate {
        key: "base_path",
        label: "Disk directory",
        example: "e.g. D:/a/b",
        required: true,
    },
    OptionTemplate {
        key: "sub_path",
        label: "Sub directory",
        example: "e.g. a/b/c",
        required: true,
    },
    OptionTemplate {
        key: "base_url",
        label: "Base URL",
        example: "e.g. https://example.com",
        required: true,
    },
];

/// Raw, unvalidated option values as they arrive from a config file or form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOptions {
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub sub_path: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Validated adapter settings.
///
/// # Example
///
/// ```
/// use local_storage::LocalConfig;
///
/// let config = LocalConfig::builder()
///     .base_path("/data/")
///     .sub_path("/public/")
///     .base_url("https://cdn.example.com/")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.sub_path(), "public");
/// assert_eq!(config.base_url(), "https://cdn.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    base_path: PathBuf,
    sub_path: String,
    base_url: String,
}

impl LocalConfig {
    /// Start a [`LocalConfigBuilder`].
    pub fn builder() -> LocalConfigBuilder {
        LocalConfigBuilder::default()
    }

    /// The declared schema of accepted options.
    pub fn template() -> &'static [OptionTemplate] {
        &TEMPLATE
    }

    /// Build from a `key -> value` map using the keys listed in [`template`](Self::template).
    /// Unknown keys are ignored.
    pub fn from_map(options: &HashMap<String, String>) -> Result<Self> {
        Self::try_from(ConfigOptions {
            base_path: options.get("base_path").cloned(),
            sub_path: options.get("sub_path").cloned(),
            base_url: options.get("base_url").cloned(),
        })
    }

    /// Disk directory every path resolves under, without a trailing separator.
    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }

    /// Directory segment inserted for write-class operations, using host
    /// separators and no leading or trailing separator.
    pub fn sub_path(&self) -> &str {
        &self.sub_path
    }

    /// URL prefix for public links, without a trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl TryFrom<ConfigOptions> for LocalConfig {
    type Error = StorageError;

    fn try_from(options: ConfigOptions) -> Result<Self> {
        let base_path = required("base_path", options.base_path)?;
        let sub_path = required("sub_path", options.sub_path)?;
        let base_url = required("base_url", options.base_url)?;

        let base_path = normalize_base(&base_path);
        let sub_path = to_host_separators(&sub_path)
            .trim_matches(MAIN_SEPARATOR)
            .to_string();
        if sub_path.is_empty() {
            return Err(StorageError::Config { option: "sub_path" });
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        tracing::debug!(
            "Configured local storage: base={} sub={} url={}",
            base_path.display(),
            sub_path,
            base_url
        );

        Ok(Self {
            base_path,
            sub_path,
            base_url,
        })
    }
}

fn required(option: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(StorageError::Config { option }),
    }
}

fn normalize_base(raw: &str) -> PathBuf {
    let host = to_host_separators(raw);
    let trimmed = host.trim_end_matches(MAIN_SEPARATOR);
    if trimmed.is_empty() {
        // "/" trims to nothing; keep the filesystem root.
        PathBuf::from(MAIN_SEPARATOR.to_string())
    } else {
        PathBuf::from(trimmed)
    }
}

/// Fluent builder for [`LocalConfig`].
#[derive(Debug, Clone, Default)]
pub struct LocalConfigBuilder {
    options: ConfigOptions,
}

impl LocalConfigBuilder {
    /// Disk directory, e.g. `/var/data`.
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.options.base_path = Some(path.into());
        self
    }

    /// Directory segment for written files, e.g. `uploads/2024`.
    pub fn sub_path(mut self, path: impl Into<String>) -> Self {
        self.options.sub_path = Some(path.into());
        self
    }

    /// URL prefix, e.g. `https://cdn.example.com`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.options.base_url = Some(url.into());
        self
    }

    /// Validate and produce the [`LocalConfig`].
    pub fn build(self) -> Result<LocalConfig> {
        LocalConfig::try_from(self.options)
    }
}
