//! URL handling module for Catalog-Ripple
//!
//! This module decides which discovered links the crawler follows and turns
//! raw `href` values into absolute URLs.

mod normalize;
mod policy;

// Re-export main functions
pub use normalize::{is_absolute_url, normalize, remove_fragment};
pub use policy::should_follow;

use url::Url;

/// Returns the network location of a URL: the lowercase host plus the port
/// when it is not the scheme's default
///
/// # Examples
///
/// ```
/// use url::Url;
/// use catalog_ripple::url::authority;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Turns an `href` found on `base` into the absolute URL the frontier sees
///
/// Relative links are resolved through [`normalize`]; absolute links are
/// parsed as-is. The fragment is dropped either way, so in-page anchors
/// collapse onto the page itself.
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut resolved = match normalize(base, href) {
        Some(url) => url,
        None => match Url::parse(href) {
            Ok(url) => url,
            // Scheme-relative links ("//host/path") inherit the page's scheme
            Err(_) => base.join(href).ok()?,
        },
    };

    resolved.set_fragment(None);
    Some(resolved)
}
