//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Managing the frontier queue and the page budget
//! - Coordinating fetching, parsing, and link extraction
//! - Feeding each page's course blocks to the indexer
//! - Producing the final crawl report

use crate::config::{validate, Config};
use crate::crawler::fetcher::{FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{extract_hrefs, extract_title};
use crate::crawler::{CrawlOutcome, CrawlState};
use crate::extract::{extract_blocks, CardSelectors, HtmlCards};
use crate::index::{CourseDictionary, Indexer};
use crate::output::{CrawlReport, CrawlStatistics};
use crate::url::{authority, resolve_link, should_follow};
use crate::{CatalogError, ConfigError};
use chrono::Utc;
use url::Url;

/// Main crawler coordinator structure
///
/// A coordinator drives exactly one crawl. It starts `Idle` with the
/// frontier holding the start URL, and [`Coordinator::run`] takes it
/// through `Running` to `Done`.
pub struct Coordinator<F: PageFetcher = HttpFetcher> {
    config: Config,
    fetcher: F,
    frontier: Frontier,
    selectors: CardSelectors,
    domain: String,
    state: CrawlState,
    statistics: CrawlStatistics,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CatalogError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config) -> Result<Self, CatalogError> {
        validate(&config)?;
        let domain = crawl_domain(&config)?;
        let fetcher = HttpFetcher::new(&config.user_agent, &config.crawler, &domain)?;
        Self::with_fetcher(config, fetcher)
    }
}

fn crawl_domain(config: &Config) -> Result<String, ConfigError> {
    config.crawl_domain().ok_or_else(|| {
        ConfigError::Validation(format!(
            "Cannot derive a crawl domain from start-url '{}'",
            config.crawler.start_url
        ))
    })
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator around any page source
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self, CatalogError> {
        validate(&config)?;

        let start_url = Url::parse(&config.crawler.start_url)?;
        let domain = crawl_domain(&config)?;
        let selectors = CardSelectors::from_config(&config.selectors)?;

        if !should_follow(start_url.as_str(), &domain) {
            tracing::warn!(
                "Start URL {} is outside the followable set for domain {}; it is fetched anyway",
                start_url,
                domain
            );
        }

        Ok(Self {
            config,
            fetcher,
            frontier: Frontier::new(start_url),
            selectors,
            domain,
            state: CrawlState::Idle,
            statistics: CrawlStatistics::default(),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Authority every followed link must match
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Counters accumulated so far
    pub fn statistics(&self) -> &CrawlStatistics {
        &self.statistics
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), CatalogError> {
        if !self.state.can_transition_to(next) {
            return Err(CatalogError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::debug!("Crawl state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Runs the main crawl loop
    ///
    /// This is the core crawling logic that:
    /// 1. Takes the oldest URL from the frontier
    /// 2. Skips it if already visited, otherwise marks it visited
    /// 3. Fetches the page; failures are logged and skipped
    /// 4. After a redirect, drops pages that left the domain or whose target
    ///    was already visited, and marks the target visited otherwise
    /// 5. Enqueues every followable link found on the page
    /// 6. Extracts course blocks and folds them into the index
    ///
    /// The loop ends when the frontier is empty or `max-pages` distinct
    /// URLs have been visited.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The index, URL map and report
    /// * `Err(CatalogError::InvalidTransition)` - The coordinator already ran
    pub async fn run(&mut self, dictionary: &CourseDictionary) -> Result<CrawlOutcome, CatalogError> {
        self.transition(CrawlState::Running)?;

        let started_at = Utc::now();
        let max_pages = self.config.crawler.max_pages;
        let mut indexer = Indexer::new(dictionary, self.config.crawler.common_word_threshold);

        tracing::info!(
            "Starting crawl of {} (budget {} pages)",
            self.domain,
            max_pages
        );

        while self.frontier.visited_count() < max_pages {
            let url = match self.frontier.dequeue() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    break;
                }
            };

            if !self.frontier.mark_visited(&url) {
                tracing::debug!("Skipping already visited {}", url);
                continue;
            }

            self.statistics.pages_visited += 1;
            tracing::debug!("Fetching {}", url);

            match self.fetcher.fetch(&url).await {
                FetchResult::Success {
                    final_url, body, ..
                } => {
                    if final_url == url {
                        self.process_page(&final_url, &body, &mut indexer);
                    } else if authority(&final_url).as_deref() != Some(self.domain.as_str()) {
                        tracing::warn!("Skipping {}: redirected off-domain to {}", url, final_url);
                        self.statistics.pages_failed += 1;
                    } else if !self.frontier.mark_redirect_target(&final_url) {
                        tracing::debug!(
                            "Skipping {}: redirect target {} already visited",
                            url,
                            final_url
                        );
                    } else {
                        tracing::debug!("{} redirected to {}", url, final_url);
                        self.process_page(&final_url, &body, &mut indexer);
                    }
                }
                FetchResult::HttpError { status_code } => {
                    tracing::warn!("Skipping {}: HTTP {}", url, status_code);
                    self.statistics.pages_failed += 1;
                }
                FetchResult::NetworkError { error } => {
                    tracing::warn!("Skipping {}: {}", url, error);
                    self.statistics.pages_failed += 1;
                }
            }

            tracing::info!(
                "Progress: {}/{} pages visited, {} in frontier, {} courses indexed",
                self.frontier.visited_count(),
                max_pages,
                self.frontier.pending(),
                indexer.index().len()
            );
        }

        if self.frontier.visited_count() >= max_pages {
            tracing::info!("Page budget of {} reached", max_pages);
        }

        self.transition(CrawlState::Done)?;

        let (index, urls) = indexer.into_parts();
        let report = CrawlReport {
            started_at,
            finished_at: Utc::now(),
            config_hash: None,
            statistics: self.statistics,
            courses_indexed: index.len(),
            words_indexed: index.pair_count(),
        };

        tracing::info!(
            "Crawl completed: {} pages visited, {} courses indexed",
            report.statistics.pages_visited,
            report.courses_indexed
        );

        Ok(CrawlOutcome {
            index,
            urls,
            report,
        })
    }

    /// Handles one fetched page: discovers links, then indexes its cards
    ///
    /// Links and block URLs resolve against `page_url`, the URL the fetch
    /// ended on after redirects.
    fn process_page(&mut self, page_url: &Url, body: &str, indexer: &mut Indexer<'_>) {
        let cards = HtmlCards::parse(body, &self.selectors);

        if let Some(title) = extract_title(cards.document()) {
            tracing::debug!("Parsed '{}' at {}", title, page_url);
        }

        for href in extract_hrefs(cards.document()) {
            let Some(link) = resolve_link(page_url, &href) else {
                tracing::trace!("Unresolvable link '{}' on {}", href, page_url);
                continue;
            };

            if !should_follow(link.as_str(), &self.domain) {
                tracing::trace!("Not following {}", link);
                continue;
            }

            if self.frontier.enqueue(link) {
                self.statistics.links_enqueued += 1;
            }
        }

        let blocks = extract_blocks(&cards);
        let summary = indexer.index_page(&blocks, page_url);
        tracing::debug!(
            "{}: {} blocks, {} indexed, {} without dictionary match, {} common words",
            page_url,
            summary.blocks,
            summary.indexed,
            summary.unresolved,
            summary.common_words
        );

        self.statistics.absorb(summary);
    }
}
