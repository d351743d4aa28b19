use crate::index::{CourseIndex, CourseUrlMap};
use crate::SearchError;
use std::collections::BTreeSet;

/// A course with its keyword overlap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCourse {
    pub course_id: String,
    pub score: usize,
}

/// Ranks courses by the number of keywords in their word set
///
/// Keywords are lowercased and deduplicated. Courses with no overlap are
/// left out. Higher scores come first; equal scores are ordered by course
/// identifier.
pub fn rank_courses<S: AsRef<str>>(keywords: &[S], index: &CourseIndex) -> Vec<RankedCourse> {
    let keywords: BTreeSet<String> = keywords
        .iter()
        .map(|keyword| keyword.as_ref().trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();

    if keywords.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedCourse> = index
        .iter()
        .filter_map(|(course_id, words)| {
            let score = keywords.iter().filter(|k| words.contains(*k)).count();
            (score > 0).then(|| RankedCourse {
                course_id: course_id.to_string(),
                score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.course_id.cmp(&b.course_id))
    });

    ranked
}

/// Returns the URLs of the courses matching `keywords`, most relevant first
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Ranked URLs, possibly empty
/// * `Err(SearchError::MissingUrl)` - A matching course has no URL, which
///   means the index and URL map are out of step
///
/// # Example
///
/// ```
/// use catalog_ripple::index::{CourseIndex, CourseUrlMap};
/// use catalog_ripple::search;
///
/// let mut index = CourseIndex::new();
/// index.insert_word("C1", "luz");
/// let mut urls = CourseUrlMap::new();
/// urls.record("C1", "https://example.com/c1");
///
/// let found = search(&["Luz"], &index, &urls).unwrap();
/// assert_eq!(found, vec!["https://example.com/c1".to_string()]);
/// ```
pub fn search<S: AsRef<str>>(
    keywords: &[S],
    index: &CourseIndex,
    urls: &CourseUrlMap,
) -> Result<Vec<String>, SearchError> {
    rank_courses(keywords, index)
        .into_iter()
        .map(|ranked| {
            urls.get(&ranked.course_id)
                .map(str::to_string)
                .ok_or(SearchError::MissingUrl {
                    course_id: ranked.course_id,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(index: &mut CourseIndex, course_id: &str, words: &[&str]) {
        index.ensure_course(course_id);
        for word in words {
            index.insert_word(course_id, word);
        }
    }

    fn urls_for(ids: &[&str]) -> CourseUrlMap {
        let mut urls = CourseUrlMap::new();
        for id in ids {
            urls.record(id, &format!("https://catalog.example.com/{}", id));
        }
        urls
    }

    #[test]
    fn test_higher_overlap_first() {
        let mut index = CourseIndex::new();
        add(&mut index, "C1", &["x1"]);
        add(&mut index, "C2", &["x1", "y1"]);
        let urls = urls_for(&["C1", "C2"]);

        let found = search(&["x1", "y1"], &index, &urls).unwrap();
        assert_eq!(
            found,
            vec![
                "https://catalog.example.com/C2".to_string(),
                "https://catalog.example.com/C1".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_query() {
        let mut index = CourseIndex::new();
        add(&mut index, "C1", &["x1"]);
        let urls = urls_for(&["C1"]);

        let keywords: [&str; 0] = [];
        assert!(search(&keywords, &index, &urls).unwrap().is_empty());
    }

    #[test]
    fn test_no_overlap_excluded() {
        let mut index = CourseIndex::new();
        add(&mut index, "C1", &["rust"]);
        add(&mut index, "C2", &["python"]);
        let urls = urls_for(&["C1", "C2"]);

        let found = search(&["rust"], &index, &urls).unwrap();
        assert_eq!(found, vec!["https://catalog.example.com/C1".to_string()]);
    }

    #[test]
    fn test_keywords_case_folded_and_deduplicated() {
        let mut index = CourseIndex::new();
        add(&mut index, "C1", &["luz"]);
        add(&mut index, "C2", &["luz", "enfoque"]);

        let ranked = rank_courses(&["LUZ", "luz", "Enfoque"], &index);
        assert_eq!(
            ranked,
            vec![
                RankedCourse {
                    course_id: "C2".to_string(),
                    score: 2
                },
                RankedCourse {
                    course_id: "C1".to_string(),
                    score: 1
                },
            ]
        );
    }

    #[test]
    fn test_ties_broken_by_identifier() {
        let mut index = CourseIndex::new();
        add(&mut index, "B", &["shared"]);
        add(&mut index, "C", &["shared"]);
        add(&mut index, "A", &["shared"]);

        let ids: Vec<String> = rank_courses(&["shared"], &index)
            .into_iter()
            .map(|r| r.course_id)
            .collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_missing_url_is_an_error() {
        let mut index = CourseIndex::new();
        add(&mut index, "C1", &["x1"]);
        add(&mut index, "C2", &["x1"]);
        let urls = urls_for(&["C1"]);

        match search(&["x1"], &index, &urls) {
            Err(SearchError::MissingUrl { course_id }) => assert_eq!(course_id, "C2"),
            other => panic!("expected missing URL error, got {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_course_without_url_is_fine() {
        let mut index = CourseIndex::new();
        add(&mut index, "C1", &["x1"]);
        add(&mut index, "C2", &["y1"]);
        let urls = urls_for(&["C1"]);

        assert_eq!(search(&["x1"], &index, &urls).unwrap().len(), 1);
    }
}
