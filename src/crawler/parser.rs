//! Link and title extraction from fetched pages
//!
//! The crawler only needs two things from a page besides its course cards:
//! the `href` values it may follow and, for logging, the page title.

use crate::url::remove_fragment;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));

/// Collects candidate `href` values from every `<a>` element, in document order
///
/// # Link Extraction Rules
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `tel:` and `data:` links
/// - Fragment-only links (same page anchors)
/// - Empty hrefs
///
/// Fragments are stripped from what remains. `mailto:` links are left in;
/// the follow policy rejects them.
///
/// # Example
///
/// ```
/// use catalog_ripple::crawler::extract_hrefs;
/// use scraper::Html;
///
/// let html = Html::parse_document(r##"<a href="/page">Go</a><a href="#top">Up</a>"##);
/// assert_eq!(extract_hrefs(&html), vec!["/page".to_string()]);
/// ```
pub fn extract_hrefs(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .map(|href| remove_fragment(href.trim()))
        .filter(|href| is_followable_href(href))
        .map(str::to_string)
        .collect()
}

fn is_followable_href(href: &str) -> bool {
    if href.is_empty() {
        return false;
    }

    let lowered = href.to_ascii_lowercase();
    !(lowered.starts_with("javascript:") || lowered.starts_with("tel:") || lowered.starts_with("data:"))
}

/// Extracts the page title from the HTML document
pub fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_relative_and_absolute() {
        let html = Html::parse_document(
            r#"<html><body>
                <a href="/programas">Programas</a>
                <a href="https://catalog.example.com/cursos/">Cursos</a>
            </body></html>"#,
        );

        assert_eq!(
            extract_hrefs(&html),
            vec![
                "/programas".to_string(),
                "https://catalog.example.com/cursos/".to_string()
            ]
        );
    }

    #[test]
    fn test_skips_special_schemes() {
        let html = Html::parse_document(
            r#"<html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="tel:+571234">Call</a>
                <a href="data:text/html,hi">Data</a>
                <a href="mailto:info@example.com">Mail</a>
            </body></html>"#,
        );

        assert_eq!(
            extract_hrefs(&html),
            vec!["mailto:info@example.com".to_string()]
        );
    }

    #[test]
    fn test_skips_download_and_fragments() {
        let html = Html::parse_document(
            r##"<html><body>
                <a href="/brochure.pdf" download>PDF</a>
                <a href="#section">Jump</a>
                <a href="  ">Blank</a>
                <a href=" /kept ">Kept</a>
                <a href="/cursos/#detalle">Anchor</a>
            </body></html>"##,
        );

        assert_eq!(
            extract_hrefs(&html),
            vec!["/kept".to_string(), "/cursos/".to_string()]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = Html::parse_document(r#"<a name="top">Top</a>"#);
        assert!(extract_hrefs(&html).is_empty());
    }

    #[test]
    fn test_extract_title() {
        let html = Html::parse_document(
            "<html><head><title>  Nuestros programas </title></head></html>",
        );
        assert_eq!(extract_title(&html), Some("Nuestros programas".to_string()));
    }

    #[test]
    fn test_missing_or_blank_title() {
        assert_eq!(extract_title(&Html::parse_document("<p>No title</p>")), None);
        assert_eq!(
            extract_title(&Html::parse_document("<title>   </title>")),
            None
        );
    }
}
