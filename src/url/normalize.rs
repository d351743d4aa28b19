use url::Url;

/// Checks whether a link already names its host
///
/// A link is absolute when it carries a network location, either through a
/// full `scheme://host` prefix or a scheme-relative `//host` prefix.
/// `mailto:` and other host-less schemes are not absolute in this sense.
pub fn is_absolute_url(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.starts_with("//") {
        return true;
    }

    Url::parse(candidate)
        .map(|url| url.has_host())
        .unwrap_or(false)
}

/// Resolves a possibly relative link against the page it was found on
///
/// # Returns
///
/// * `None` - The link is already absolute; the caller decides via
///   [`should_follow`](super::should_follow) whether to enqueue it
/// * `Some(Url)` - The resolved absolute URL. The domain is not re-checked here.
///
/// # Examples
///
/// ```
/// use catalog_ripple::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/a/b").unwrap();
/// assert_eq!(normalize(&base, "c").unwrap().as_str(), "https://example.com/a/c");
/// assert!(normalize(&base, "https://example.com/x").is_none());
/// ```
pub fn normalize(base: &Url, candidate: &str) -> Option<Url> {
    if is_absolute_url(candidate) {
        return None;
    }

    base.join(candidate.trim()).ok()
}

/// Removes the fragment part (everything after `#`) from a URL string
pub fn remove_fragment(url: &str) -> &str {
    match url.split_once('#') {
        Some((before, _)) => before,
        None => url,
    }
}
