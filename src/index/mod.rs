//! Course index module
//!
//! This module owns the data the crawl produces:
//! - `CourseDictionary`: title → course identifier lookup, loaded once
//! - `CourseIndex`: course identifier → significant words
//! - `CourseUrlMap`: course identifier → first URL it was seen at
//! - `Indexer`: folds extracted blocks into the index and URL map
//! - Delimited-file persistence for both outputs

mod course_index;
mod dictionary;
mod indexer;
mod persist;

pub use course_index::{CourseIndex, CourseUrlMap};
pub use dictionary::CourseDictionary;
pub use indexer::{Indexer, PageSummary};
pub use persist::{load_index, load_urls, write_index, write_urls};
