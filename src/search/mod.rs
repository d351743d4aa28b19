//! Keyword search over a course index
//!
//! Courses are ranked by how many of the query keywords appear in their
//! word set. Ties are broken by course identifier, ascending.

mod rank;
mod similarity;

pub use rank::{rank_courses, search, RankedCourse};
pub use similarity::compare_courses;
