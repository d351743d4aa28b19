//! Crawl and index statistics
//!
//! This module provides the counters the crawl loop keeps, the report a
//! finished crawl returns, and summaries computed from a saved index.

use crate::index::{CourseIndex, CourseUrlMap, PageSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters maintained while the crawl loop runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStatistics {
    /// Distinct URLs taken from the frontier and fetched
    pub pages_visited: usize,

    /// Pages fetched successfully and run through the indexer
    pub pages_indexed: usize,

    /// Pages whose fetch failed (HTTP error or network error)
    pub pages_failed: usize,

    /// Links accepted into the frontier
    pub links_enqueued: usize,

    /// Cards plus nested blocks seen across all pages
    pub blocks_seen: usize,

    /// Blocks skipped because their title was empty
    pub blocks_untitled: usize,

    /// Blocks whose title had no dictionary entry
    pub blocks_unresolved: usize,

    /// Blocks folded into the index
    pub blocks_indexed: usize,
}

impl CrawlStatistics {
    /// Adds one page's indexing results to the running totals
    pub fn absorb(&mut self, page: PageSummary) {
        self.pages_indexed += 1;
        self.blocks_seen += page.blocks;
        self.blocks_untitled += page.untitled;
        self.blocks_unresolved += page.unresolved;
        self.blocks_indexed += page.indexed;
    }
}

/// Summary of one finished crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// SHA-256 of the configuration file, when one was used
    pub config_hash: Option<String>,

    pub statistics: CrawlStatistics,

    /// Distinct course identifiers in the index
    pub courses_indexed: usize,

    /// Total (course, word) pairs in the index
    pub words_indexed: usize,
}

impl CrawlReport {
    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Summary of a saved index and URL map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStatistics {
    pub courses: usize,
    pub urls: usize,
    pub pairs: usize,
    pub distinct_words: usize,

    /// Courses present in the index with no URL entry
    pub courses_without_url: Vec<String>,

    /// Most frequent words by number of courses containing them
    pub top_words: Vec<(String, usize)>,
}

/// Number of entries kept in [`IndexStatistics::top_words`]
const TOP_WORDS: usize = 10;

impl IndexStatistics {
    /// Computes statistics over an index and its URL map
    pub fn from_index(index: &CourseIndex, urls: &CourseUrlMap) -> Self {
        let mut document_frequency: std::collections::HashMap<&str, usize> =
            std::collections::HashMap::new();
        let mut courses_without_url = Vec::new();

        for (course_id, words) in index.iter() {
            if urls.get(course_id).is_none() {
                courses_without_url.push(course_id.to_string());
            }
            for word in words {
                *document_frequency.entry(word.as_str()).or_insert(0) += 1;
            }
        }

        let distinct_words = document_frequency.len();
        let mut top_words: Vec<(String, usize)> = document_frequency
            .into_iter()
            .map(|(word, count)| (word.to_string(), count))
            .collect();
        top_words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_words.truncate(TOP_WORDS);

        Self {
            courses: index.len(),
            urls: urls.len(),
            pairs: index.pair_count(),
            distinct_words,
            courses_without_url,
            top_words,
        }
    }
}

/// Prints a crawl report to stdout in a formatted manner
pub fn print_crawl_report(report: &CrawlReport) {
    let stats = &report.statistics;

    println!("=== Crawl Statistics ===\n");

    println!("Run:");
    println!("  Started:  {}", report.started_at.to_rfc3339());
    println!("  Finished: {}", report.finished_at.to_rfc3339());
    println!("  Duration: {}s", report.duration_seconds());
    if let Some(hash) = &report.config_hash {
        println!("  Config hash: {}", hash);
    }
    println!();

    println!("Pages:");
    println!("  Visited: {}", stats.pages_visited);
    println!("  Indexed: {}", stats.pages_indexed);
    println!("  Failed: {}", stats.pages_failed);
    println!("  Links enqueued: {}", stats.links_enqueued);
    println!();

    println!("Blocks:");
    println!("  Seen: {}", stats.blocks_seen);
    println!("  Indexed: {}", stats.blocks_indexed);
    println!("  Untitled: {}", stats.blocks_untitled);
    println!("  No dictionary match: {}", stats.blocks_unresolved);
    println!();

    println!(
        "Index: {} courses, {} (course, word) pairs",
        report.courses_indexed, report.words_indexed
    );
}

/// Prints index statistics to stdout
pub fn print_index_statistics(stats: &IndexStatistics) {
    println!("=== Index Statistics ===\n");

    println!("Overview:");
    println!("  Courses: {}", stats.courses);
    println!("  URLs: {}", stats.urls);
    println!("  (course, word) pairs: {}", stats.pairs);
    println!("  Distinct words: {}", stats.distinct_words);
    println!();

    if !stats.top_words.is_empty() {
        println!("Most Shared Words:");
        for (word, count) in &stats.top_words {
            println!("  {}: {} courses", word, count);
        }
        println!();
    }

    if !stats.courses_without_url.is_empty() {
        println!(
            "Courses Without URL ({}):",
            stats.courses_without_url.len()
        );
        for course_id in &stats.courses_without_url {
            println!("  - {}", course_id);
        }
    }
}
