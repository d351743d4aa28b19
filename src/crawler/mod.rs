//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - Link and title extraction
//! - The breadth-first frontier and visited set
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod state;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, user_agent_string, FetchResult, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use parser::{extract_hrefs, extract_title};
pub use state::CrawlState;

use crate::config::Config;
use crate::index::{CourseDictionary, CourseIndex, CourseUrlMap};
use crate::output::CrawlReport;
use crate::CatalogError;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Course identifier → significant words
    pub index: CourseIndex,

    /// Course identifier → first URL it was seen at
    pub urls: CourseUrlMap,

    pub report: CrawlReport,
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Seed the frontier with the start URL
/// 3. Fetch pages breadth-first until the frontier empties or the page
///    budget is spent
/// 4. Index every page's course cards through `dictionary`
///
/// Nothing is written to disk; see [`crate::output::save_outcome`].
///
/// # Example
///
/// ```no_run
/// use catalog_ripple::{crawl, Config, CourseDictionary};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dictionary = CourseDictionary::load(std::path::Path::new("course_dictionary.json"))?;
/// let outcome = crawl(Config::default(), &dictionary).await?;
/// println!("{} courses indexed", outcome.index.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config, dictionary: &CourseDictionary) -> Result<CrawlOutcome, CatalogError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run(dictionary).await
}
