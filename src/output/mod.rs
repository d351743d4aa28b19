//! Output module for crawl results and reports
//!
//! This module handles:
//! - Writing the index and URL map files after a crawl
//! - Recording crawl statistics
//! - Summarizing a saved index

pub mod stats;

pub use stats::{
    print_crawl_report, print_index_statistics, CrawlReport, CrawlStatistics, IndexStatistics,
};

use crate::crawler::CrawlOutcome;
use crate::index::{write_index, write_urls};
use crate::PersistError;
use std::path::Path;

/// Writes a crawl's index and URL map
///
/// Parent directories are created as needed. Both files are written even
/// when the index is empty, so a later search sees a well-formed (empty)
/// index rather than a missing file.
///
/// # Arguments
///
/// * `outcome` - The finished crawl
/// * `index_path` - Destination of the pipe-delimited index
/// * `urls_path` - Destination of the comma-delimited URL map
pub fn save_outcome(
    outcome: &CrawlOutcome,
    index_path: &Path,
    urls_path: &Path,
) -> Result<(), PersistError> {
    write_index(index_path, &outcome.index)?;
    tracing::info!(
        "Wrote {} (course, word) pairs to {}",
        outcome.index.pair_count(),
        index_path.display()
    );

    write_urls(urls_path, &outcome.urls)?;
    tracing::info!(
        "Wrote {} course URLs to {}",
        outcome.urls.len(),
        urls_path.display()
    );

    Ok(())
}
