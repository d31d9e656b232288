//! Building public or pre-signed URLs for stored files.

use std::time::Duration;

use crate::error::Result;

/// Collaborator that turns a relative path into a URL.
///
/// Signing schemes live outside this crate; implement this trait to plug one
/// in. [`PublicUrlBuilder`] covers the unsigned case.
pub trait UrlBuilder: Send + Sync {
    /// Build a URL for `path` under `base_url`, optionally valid for `expires`.
    fn build_url(&self, base_url: &str, path: &str, expires: Option<Duration>) -> Result<String>;
}

/// Joins the base URL and the relative path. Expiry is ignored because the
/// resulting link is public.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicUrlBuilder;

impl UrlBuilder for PublicUrlBuilder {
    fn build_url(&self, base_url: &str, path: &str, _expires: Option<Duration>) -> Result<String> {
        let path = path.replace('\\', "/");
        Ok(format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_slash() {
        let url = PublicUrlBuilder
            .build_url("https://cdn.example.com/", "/public/a.png", None)
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/public/a.png");
    }

    #[test]
    fn expiry_does_not_change_public_url() {
        let b = PublicUrlBuilder;
        let plain = b.build_url("https://x.io", "a/b.txt", None).unwrap();
        let timed = b
            .build_url("https://x.io", "a/b.txt", Some(Duration::from_secs(60)))
            .unwrap();
        assert_eq!(plain, timed);
    }

    #[test]
    fn backslashes_become_url_separators() {
        let url = PublicUrlBuilder
            .build_url("https://x.io", r"public\img\a.png", None)
            .unwrap();
        assert_eq!(url, "https://x.io/public/img/a.png");
    }
}
