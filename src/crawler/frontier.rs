//! URL frontier and visited set
//!
//! The frontier is a FIFO queue, so pages are crawled breadth-first. It is
//! only reachable through enqueue/dequeue/contains-style operations, which
//! keeps the "fetched at most once" guarantee in one place.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Queue of URLs awaiting fetch plus the set of URLs already taken from it
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, oldest first
    queue: VecDeque<Url>,

    /// Mirror of `queue` for duplicate checks
    queued: HashSet<String>,

    /// URLs already dequeued and processed; never shrinks
    visited: HashSet<String>,

    /// Pages reached only as the target of a redirect
    redirect_targets: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding exactly `seed`
    pub fn new(seed: Url) -> Self {
        let mut frontier = Self::default();
        frontier.enqueue(seed);
        frontier
    }

    /// Adds a URL to the back of the queue
    ///
    /// Returns false, leaving the frontier untouched, if the URL was already
    /// visited or is already waiting.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.contains(&url) || self.queued.contains(url.as_str()) {
            return false;
        }

        self.queued.insert(url.as_str().to_string());
        self.queue.push_back(url);
        true
    }

    /// Takes the oldest waiting URL
    pub fn dequeue(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.queued.remove(url.as_str());
        Some(url)
    }

    /// Records a URL as visited
    ///
    /// Returns false if it had already been visited, in which case the
    /// caller must not fetch it again.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        if self.redirect_targets.contains(url.as_str()) {
            return false;
        }
        self.visited.insert(url.as_str().to_string())
    }

    /// Records the page a fetch landed on after redirects
    ///
    /// The target is never fetched again, but it does not count against the
    /// page budget. Returns false if the page was already visited either way.
    pub fn mark_redirect_target(&mut self, url: &Url) -> bool {
        if self.visited.contains(url.as_str()) {
            return false;
        }
        self.redirect_targets.insert(url.as_str().to_string())
    }

    /// Returns true if the URL has been visited, directly or through a redirect
    pub fn contains(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str()) || self.redirect_targets.contains(url.as_str())
    }

    /// Number of distinct URLs fetched
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether no URL is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
