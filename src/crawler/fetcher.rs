//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - Keeping redirects on the crawl domain
//! - GET requests to fetch page content
//! - Error classification
//!
//! Failures are reported as values, never retried: a page that fails once
//! is skipped for the rest of the run.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::url::authority;
use reqwest::{redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed for one fetch
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Source of page markup for the crawl loop
pub trait PageFetcher {
    /// Performs a GET for `url`
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchResult> + Send;
}

/// Formats the user agent string: `Name/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawler settings; supplies the per-request timeout
/// * `domain` - Authority (`host[:port]`) redirects may lead to
///
/// A redirect to any other authority is not followed: the 3xx response is
/// returned as-is and classified as an HTTP error.
///
/// # Example
///
/// ```no_run
/// use catalog_ripple::config::{CrawlerConfig, UserAgentConfig};
/// use catalog_ripple::crawler::build_http_client;
///
/// let client = build_http_client(
///     &UserAgentConfig::default(),
///     &CrawlerConfig::default(),
///     "catalog.example.com",
/// )
/// .unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
    domain: &str,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(crawler.request_timeout_secs);

    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(same_domain_policy(domain.to_lowercase()))
        .gzip(true)
        .brotli(true)
        .build()
}

fn same_domain_policy(domain: String) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if authority(attempt.url()).as_deref() != Some(domain.as_str()) {
            tracing::debug!("Not following redirect off {} to {}", domain, attempt.url());
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx with readable body | `Success` |
/// | Any other status, including a redirect left unfollowed | `HttpError` |
/// | Timeout, refused connection, TLS failure | `NetworkError` |
/// | Body cannot be decoded | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchResult::NetworkError { error }
        }
    }
}

/// [`PageFetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose redirects stay on `domain`
    pub fn new(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
        domain: &str,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, crawler, domain)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(
            &create_test_config(),
            &CrawlerConfig::default(),
            "catalog.example.com",
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_format() {
        assert_eq!(
            user_agent_string(&create_test_config()),
            "TestCrawler/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    fn fetcher_for(server: &MockServer) -> HttpFetcher {
        let base = Url::parse(&server.uri()).unwrap();
        let domain = authority(&base).unwrap();
        HttpFetcher::new(&create_test_config(), &CrawlerConfig::default(), &domain).unwrap()
    }

    #[tokio::test]
    async fn test_same_domain_redirect_followed() {
        let server = MockServer::start().await;
        let location = format!("{}/nuevo", server.uri());
        Mock::given(method("GET"))
            .and(path("/viejo"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", location.as_str()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/nuevo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/viejo", server.uri())).unwrap();
        match fetcher_for(&server).fetch(&url).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                assert_eq!(final_url.as_str(), location);
                assert_eq!(body, "moved");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_off_domain_redirect_not_followed() {
        let server = MockServer::start().await;
        let elsewhere = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("offsite"))
            .expect(0)
            .mount(&elsewhere)
            .await;

        let location = format!("{}/evil", elsewhere.uri());
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", location.as_str()))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/", server.uri())).unwrap();
        let result = fetcher_for(&server).fetch(&url).await;
        assert!(matches!(result, FetchResult::HttpError { status_code: 302 }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let fetcher = HttpFetcher::new(
            &create_test_config(),
            &CrawlerConfig::default(),
            "127.0.0.1:9",
        )
        .unwrap();
        // Port 9 (discard) on localhost is almost never listening
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let result = fetcher.fetch(&url).await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }
}
