use serde::Deserialize;
use url::Url;

/// Catalog landing page the crawl starts from
pub const DEFAULT_START_URL: &str =
    "https://educacionvirtual.javeriana.edu.co/nuestros-programas-nuevo";

/// Main configuration structure for Catalog-Ripple
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Returns the authority (`host[:port]`) links must match to be followed
    ///
    /// Uses the explicit `domain` when configured, otherwise the authority of
    /// the start URL.
    pub fn crawl_domain(&self) -> Option<String> {
        if let Some(domain) = &self.crawler.domain {
            return Some(domain.to_lowercase());
        }

        Url::parse(&self.crawler.start_url)
            .ok()
            .and_then(|url| crate::url::authority(&url))
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL the frontier is seeded with
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Authority links must match exactly; derived from the start URL when absent
    pub domain: Option<String>,

    /// Maximum number of distinct URLs to visit
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Per-page frequency at which a word is treated as common
    #[serde(rename = "common-word-threshold")]
    pub common_word_threshold: usize,

    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            domain: None,
            max_pages: 5,
            common_word_threshold: 10,
            request_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "CatalogRipple".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/catalog-ripple/catalog-ripple".to_string(),
            contact_email: "crawler@catalog-ripple.dev".to_string(),
        }
    }
}

/// CSS selectors describing the catalog's card markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One course card
    pub card: String,

    /// Title node inside a card or nested block
    pub title: String,

    /// Description paragraphs inside a card or nested block
    pub description: String,

    /// Sub-listing containers inside a card
    pub nested: String,

    /// Anchor pointing at the course page
    pub link: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: "div.card-body".to_string(),
            title: "b.card-title".to_string(),
            description: "p.card-text".to_string(),
            nested: "div".to_string(),
            link: "a[href]".to_string(),
        }
    }
}

/// Input and output file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON object mapping course titles to course identifiers
    #[serde(rename = "dictionary-path")]
    pub dictionary_path: String,

    /// Pipe-delimited course → word index
    #[serde(rename = "index-path")]
    pub index_path: String,

    /// Comma-delimited course → URL map
    #[serde(rename = "urls-path")]
    pub urls_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dictionary_path: "./data/course_dictionary.json".to_string(),
            index_path: "./data/course_index.csv".to_string(),
            urls_path: "./data/course_urls.csv".to_string(),
        }
    }
}
