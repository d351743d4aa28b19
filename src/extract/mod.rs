//! Course card extraction
//!
//! This module decomposes a catalog page into [`CourseBlock`]s:
//! - one block per card container
//! - nested "sequence" blocks for sub-listings that share a card
//!
//! The markup is reached only through the [`CardMarkup`] trait, so the
//! indexing logic does not depend on a particular HTML parser.

mod html;
mod markup;

pub use html::{CardSelectors, HtmlCards};
pub use markup::CardMarkup;

/// One course listing extracted from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseBlock {
    /// Trimmed title text; empty when the block has no title node
    pub title: String,

    /// Trimmed description fragments joined with single spaces
    pub description: String,

    /// First link inside the block, exactly as written in the markup
    pub link: Option<String>,

    /// Sub-listings sharing this block's container
    pub nested: Vec<CourseBlock>,
}

impl CourseBlock {
    /// Returns true if the block carries nested sub-listings
    pub fn is_sequence(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Returns true if the block has a title that can be resolved to a course
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Title and description joined with a space
    pub fn text(&self) -> String {
        if self.description.is_empty() {
            return self.title.clone();
        }
        format!("{} {}", self.title, self.description)
    }
}

/// Extracts every card block on a page, in document order
///
/// Cards whose title is empty are kept here; deciding to skip them is the
/// indexer's job, and their text still counts toward the page vocabulary.
pub fn extract_blocks<M: CardMarkup>(markup: &M) -> Vec<CourseBlock> {
    markup
        .find_card_blocks()
        .into_iter()
        .map(|card| {
            let nested = markup
                .find_nested_blocks(card)
                .into_iter()
                .map(|node| read_block(markup, node, Vec::new()))
                .collect();
            read_block(markup, card, nested)
        })
        .collect()
}

fn read_block<'a, M: CardMarkup>(
    markup: &'a M,
    node: M::Node<'a>,
    nested: Vec<CourseBlock>,
) -> CourseBlock {
    let title = markup.find_title(node).unwrap_or_default();

    let description = markup
        .find_descriptions(node)
        .iter()
        .map(|fragment| fragment.trim())
        .collect::<Vec<_>>()
        .join(" ");

    CourseBlock {
        title: title.trim().to_string(),
        description,
        link: markup.find_link(node),
        nested,
    }
}
