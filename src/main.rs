//! Catalog-Ripple main entry point
//!
//! This is the command-line interface for the Catalog-Ripple course crawler.

use anyhow::Context;
use catalog_ripple::config::{load_config_with_hash, validate, Config};
use catalog_ripple::crawler::{user_agent_string, Coordinator};
use catalog_ripple::index::{load_index, load_urls, CourseDictionary};
use catalog_ripple::output::{
    print_crawl_report, print_index_statistics, save_outcome, IndexStatistics,
};
use catalog_ripple::search::{compare_courses, rank_courses, search};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Catalog-Ripple: a course catalog crawler and keyword index
///
/// Catalog-Ripple crawls a course catalog site, resolves each course card
/// to its identifier, and builds a keyword index that can be searched and
/// compared offline.
#[derive(Parser, Debug)]
#[command(name = "catalog-ripple")]
#[command(version)]
#[command(about = "A course catalog crawler and keyword index", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the catalog and write the index and URL map
    Crawl {
        /// Maximum number of distinct pages to visit
        #[arg(long, value_name = "N")]
        pages: Option<usize>,

        /// Course dictionary (JSON object of title → identifier)
        #[arg(long, value_name = "PATH")]
        dictionary: Option<PathBuf>,

        /// Destination of the pipe-delimited index
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Destination of the comma-delimited URL map
        #[arg(long, value_name = "PATH")]
        urls: Option<PathBuf>,

        /// Validate config and show what would be crawled without crawling
        #[arg(long)]
        dry_run: bool,

        /// Print the crawl report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank courses by keyword overlap and print their URLs
    Search {
        /// Index file written by `crawl`
        #[arg(long, value_name = "PATH")]
        index: Option<PathBuf>,

        /// URL map written by `crawl`
        #[arg(long, value_name = "PATH")]
        urls: Option<PathBuf>,

        /// Show the score and course identifier next to each URL
        #[arg(long)]
        scores: bool,

        /// Keywords to look for
        #[arg(required = true, value_name = "KEYWORD")]
        keywords: Vec<String>,
    },

    /// Print the word-set similarity of two courses
    Compare {
        /// Index file written by `crawl`
        #[arg(long, value_name = "PATH")]
        index: Option<PathBuf>,

        first: String,
        second: String,
    },

    /// Show statistics for a saved index
    Stats {
        /// Index file written by `crawl`
        #[arg(long, value_name = "PATH")]
        index: Option<PathBuf>,

        /// URL map written by `crawl`
        #[arg(long, value_name = "PATH")]
        urls: Option<PathBuf>,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_configuration(cli.config.as_deref())?;

    match cli.command {
        Command::Crawl {
            pages,
            dictionary,
            output,
            urls,
            dry_run,
            json,
        } => {
            let mut config = config;
            if let Some(pages) = pages {
                config.crawler.max_pages = pages;
            }
            if let Some(path) = dictionary {
                config.output.dictionary_path = path.display().to_string();
            }
            if let Some(path) = output {
                config.output.index_path = path.display().to_string();
            }
            if let Some(path) = urls {
                config.output.urls_path = path.display().to_string();
            }
            validate(&config).context("Invalid configuration after command-line overrides")?;

            if dry_run {
                handle_dry_run(&config)
            } else {
                handle_crawl(config, config_hash, json).await
            }
        }
        Command::Search {
            index,
            urls,
            scores,
            keywords,
        } => {
            let index_path = index.unwrap_or_else(|| PathBuf::from(&config.output.index_path));
            let urls_path = urls.unwrap_or_else(|| PathBuf::from(&config.output.urls_path));
            handle_search(&index_path, &urls_path, &keywords, scores)
        }
        Command::Compare {
            index,
            first,
            second,
        } => {
            let index_path = index.unwrap_or_else(|| PathBuf::from(&config.output.index_path));
            handle_compare(&index_path, &first, &second)
        }
        Command::Stats { index, urls, json } => {
            let index_path = index.unwrap_or_else(|| PathBuf::from(&config.output.index_path));
            let urls_path = urls.unwrap_or_else(|| PathBuf::from(&config.output.urls_path));
            handle_stats(&index_path, &urls_path, json)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_ripple=info,warn"),
            1 => EnvFilter::new("catalog_ripple=debug,info"),
            2 => EnvFilter::new("catalog_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load_configuration(path: Option<&Path>) -> anyhow::Result<(Config, Option<String>)> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok((config, Some(hash)))
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Ok((Config::default(), None))
        }
    }
}

/// Handles `crawl --dry-run`: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let dictionary = load_dictionary(config)?;

    println!("=== Catalog-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Start URL: {}", config.crawler.start_url);
    println!(
        "  Domain: {}",
        config.crawl_domain().unwrap_or_else(|| "<none>".to_string())
    );
    println!("  Max pages: {}", config.crawler.max_pages);
    println!(
        "  Common word threshold: {}",
        config.crawler.common_word_threshold
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nUser Agent:");
    println!("  {}", user_agent_string(&config.user_agent));

    println!("\nSelectors:");
    println!("  Card: {}", config.selectors.card);
    println!("  Title: {}", config.selectors.title);
    println!("  Description: {}", config.selectors.description);
    println!("  Nested: {}", config.selectors.nested);
    println!("  Link: {}", config.selectors.link);

    println!("\nFiles:");
    println!(
        "  Dictionary: {} ({} titles)",
        config.output.dictionary_path,
        dictionary.len()
    );
    println!("  Index: {}", config.output.index_path);
    println!("  URL map: {}", config.output.urls_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl up to {} pages starting at {}",
        config.crawler.max_pages, config.crawler.start_url
    );

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, config_hash: Option<String>, json: bool) -> anyhow::Result<()> {
    let dictionary = load_dictionary(&config)?;
    tracing::info!("Loaded {} course titles", dictionary.len());

    let index_path = PathBuf::from(&config.output.index_path);
    let urls_path = PathBuf::from(&config.output.urls_path);

    let mut coordinator = Coordinator::new(config)?;
    let mut outcome = match coordinator.run(&dictionary).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };
    outcome.report.config_hash = config_hash;

    save_outcome(&outcome, &index_path, &urls_path).context("Failed to write crawl results")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print_crawl_report(&outcome.report);
    }

    Ok(())
}

/// Handles `search`: prints matching course URLs, best match first
fn handle_search(
    index_path: &Path,
    urls_path: &Path,
    keywords: &[String],
    scores: bool,
) -> anyhow::Result<()> {
    let index = load_index(index_path)
        .with_context(|| format!("Failed to load index {}", index_path.display()))?;
    let urls = load_urls(urls_path)
        .with_context(|| format!("Failed to load URL map {}", urls_path.display()))?;

    if scores {
        let ranked = rank_courses(keywords, &index);
        if ranked.is_empty() {
            println!("No courses match: {}", keywords.join(" "));
        }
        for course in ranked {
            let url = urls.get(&course.course_id).with_context(|| {
                format!("Course {} is indexed but has no URL", course.course_id)
            })?;
            println!("{:>3}  {:<12} {}", course.score, course.course_id, url);
        }
        return Ok(());
    }

    let results = search(keywords, &index, &urls)?;
    if results.is_empty() {
        println!("No courses match: {}", keywords.join(" "));
    }
    for url in results {
        println!("{}", url);
    }

    Ok(())
}

/// Handles `compare`: prints the Jaccard similarity of two courses
fn handle_compare(index_path: &Path, first: &str, second: &str) -> anyhow::Result<()> {
    let index = load_index(index_path)
        .with_context(|| format!("Failed to load index {}", index_path.display()))?;

    for course_id in [first, second] {
        if !index.contains(course_id) {
            tracing::warn!("Course {} is not in the index", course_id);
        }
    }

    println!("{:.4}", compare_courses(first, second, &index));
    Ok(())
}

/// Handles `stats`: summarizes a saved index and URL map
fn handle_stats(index_path: &Path, urls_path: &Path, json: bool) -> anyhow::Result<()> {
    let index = load_index(index_path)
        .with_context(|| format!("Failed to load index {}", index_path.display()))?;
    let urls = load_urls(urls_path)
        .with_context(|| format!("Failed to load URL map {}", urls_path.display()))?;

    let stats = IndexStatistics::from_index(&index, &urls);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Index: {}", index_path.display());
        println!("URL map: {}\n", urls_path.display());
        print_index_statistics(&stats);
    }

    Ok(())
}

/// Loads the course dictionary; the crawl cannot start without it
fn load_dictionary(config: &Config) -> anyhow::Result<CourseDictionary> {
    let path = Path::new(&config.output.dictionary_path);
    let dictionary = CourseDictionary::load(path)
        .with_context(|| format!("Failed to load course dictionary {}", path.display()))?;

    if dictionary.is_empty() {
        tracing::warn!(
            "Course dictionary {} has no entries; nothing will be indexed",
            path.display()
        );
    }

    Ok(dictionary)
}
