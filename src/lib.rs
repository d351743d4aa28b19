//! Catalog-Ripple: a course catalog crawler and keyword index
//!
//! This crate crawls a bounded set of pages on a single course-catalog site,
//! decomposes each page into course cards, and builds a course → vocabulary
//! index that can be searched by keyword overlap.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod index;
pub mod output;
pub mod search;
pub mod url;
pub mod vocabulary;

use thiserror::Error;

/// Main error type for Catalog-Ripple operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid crawl state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crawler::CrawlState,
        to: crawler::CrawlState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Errors raised while loading the course dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse dictionary JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while reading or writing the delimited index files
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected header in {path}: expected '{expected}', found '{found}'")]
    Header {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Malformed row {line} in {path}: {message}")]
    Malformed {
        path: String,
        line: usize,
        message: String,
    },
}

/// Errors surfaced by keyword search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Course {course_id} is indexed but has no URL")]
    MissingUrl { course_id: String },
}

/// Result type alias for Catalog-Ripple operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOutcome, CrawlState};
pub use index::{CourseDictionary, CourseIndex, CourseUrlMap};
pub use search::{compare_courses, search};
