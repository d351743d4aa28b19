use super::authority;
use url::Url;

/// Decides whether a discovered link should be followed
///
/// # Rules
///
/// **Reject:**
/// - Anything that is not an `http`/`https` URL
/// - URLs whose `host[:port]` is not exactly `domain`
/// - URLs containing `@` or a `mailto:` marker anywhere
///
/// **Accept** (once the checks above pass):
/// - Paths ending in `/` or `.html`
/// - Paths whose final segment has no `.` (extension-less pages)
///
/// Every other path is treated as a static asset and rejected.
///
/// # Examples
///
/// ```
/// use catalog_ripple::url::should_follow;
///
/// assert!(should_follow("https://example.com/courses/", "example.com"));
/// assert!(!should_follow("https://example.com/logo.png", "example.com"));
/// assert!(!should_follow("https://other.com/courses/", "example.com"));
/// ```
pub fn should_follow(url: &str, domain: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    match authority(&parsed) {
        Some(found) if found == domain.to_lowercase() => {}
        _ => return false,
    }

    if url.contains('@') || url.contains("mailto:") {
        return false;
    }

    let path = parsed.path();
    if path.ends_with('/') || path.ends_with(".html") {
        return true;
    }

    let last_segment = path.rsplit('/').next().unwrap_or("");
    !last_segment.contains('.')
}
