use crate::extract::CourseBlock;
use crate::index::{CourseDictionary, CourseIndex, CourseUrlMap};
use crate::vocabulary::{compute_common_words, significant_words};
use std::collections::HashSet;
use url::Url;

/// What indexing one page did with its blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSummary {
    /// Cards plus nested blocks seen
    pub blocks: usize,

    /// Blocks skipped because their title was empty
    pub untitled: usize,

    /// Blocks whose title had no dictionary entry
    pub unresolved: usize,

    /// Blocks folded into the index
    pub indexed: usize,

    /// Size of the page's common-word set
    pub common_words: usize,
}

/// Builds the course index and URL map over the course of one crawl
pub struct Indexer<'d> {
    dictionary: &'d CourseDictionary,
    threshold: usize,
    index: CourseIndex,
    urls: CourseUrlMap,
}

impl<'d> Indexer<'d> {
    /// Creates an indexer with an empty index
    ///
    /// # Arguments
    ///
    /// * `dictionary` - Title → identifier lookup
    /// * `threshold` - Per-page frequency at which a word becomes common
    pub fn new(dictionary: &'d CourseDictionary, threshold: usize) -> Self {
        Self {
            dictionary,
            threshold,
            index: CourseIndex::new(),
            urls: CourseUrlMap::new(),
        }
    }

    /// Folds one block's words into the index
    ///
    /// The title is resolved through the dictionary; a miss discards the
    /// block silently. On a hit the course gets an entry (empty on first
    /// sighting), every word is added with set semantics, and `url` is
    /// recorded unless the course already has one.
    ///
    /// # Returns
    ///
    /// The resolved course identifier, or `None` on a dictionary miss
    pub fn fold(&mut self, course_title: &str, words: &[String], url: &str) -> Option<String> {
        let course_id = self.dictionary.lookup(course_title)?.to_string();

        self.index.ensure_course(&course_id);
        for word in words {
            self.index.insert_word(&course_id, word);
        }

        if self.urls.record(&course_id, url) {
            tracing::debug!("First sighting of {} at {}", course_id, url);
        }

        Some(course_id)
    }

    /// Indexes every block extracted from one page
    ///
    /// # Rules
    ///
    /// - Common words are computed for this page alone
    /// - A card with nested blocks contributes only its title; each nested
    ///   block contributes its own title and description
    /// - A card without nested blocks contributes its title and description
    /// - Blocks with an empty title are skipped
    /// - A block's URL is its own link, else its card's link, else the page
    pub fn index_page(&mut self, blocks: &[CourseBlock], page_url: &Url) -> PageSummary {
        let common = compute_common_words(blocks, self.threshold);
        let mut summary = PageSummary {
            common_words: common.len(),
            ..PageSummary::default()
        };

        for card in blocks {
            let card_url = resolve_block_url(card, page_url, page_url);

            let text = if card.is_sequence() {
                card.title.clone()
            } else {
                card.text()
            };
            self.index_block(card, &text, &card_url, &common, &mut summary);

            for nested in &card.nested {
                let nested_url = resolve_block_url(nested, page_url, &card_url);
                self.index_block(nested, &nested.text(), &nested_url, &common, &mut summary);
            }
        }

        summary
    }

    fn index_block(
        &mut self,
        block: &CourseBlock,
        text: &str,
        url: &Url,
        common: &HashSet<String>,
        summary: &mut PageSummary,
    ) {
        summary.blocks += 1;

        if !block.has_title() {
            summary.untitled += 1;
            return;
        }

        let words = significant_words(text, common);
        match self.fold(&block.title, &words, url.as_str()) {
            Some(course_id) => {
                tracing::trace!("Indexed '{}' as {}", block.title, course_id);
                summary.indexed += 1;
            }
            None => {
                tracing::debug!("No course identifier for title '{}'", block.title);
                summary.unresolved += 1;
            }
        }
    }

    /// The index built so far
    pub fn index(&self) -> &CourseIndex {
        &self.index
    }

    /// The URL map built so far
    pub fn urls(&self) -> &CourseUrlMap {
        &self.urls
    }

    /// Consumes the indexer and returns the finished index and URL map
    pub fn into_parts(self) -> (CourseIndex, CourseUrlMap) {
        (self.index, self.urls)
    }
}

fn resolve_block_url(block: &CourseBlock, page_url: &Url, fallback: &Url) -> Url {
    block
        .link
        .as_deref()
        .and_then(|href| page_url.join(href).ok())
        .unwrap_or_else(|| fallback.clone())
}
