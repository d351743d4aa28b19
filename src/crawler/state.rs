//! Crawl lifecycle states
//!
//! A crawl moves `Idle → Running → Done` exactly once.

use std::fmt;

/// Represents the lifecycle state of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Frontier holds only the start URL; nothing fetched yet
    Idle,

    /// The crawl loop is processing the frontier
    Running,

    /// The frontier is exhausted or the page budget is spent
    Done,
}

impl CrawlState {
    /// Checks whether moving to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running) | (Self::Running, Self::Done)
        )
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}
