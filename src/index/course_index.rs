use std::collections::{BTreeMap, BTreeSet};

/// Mapping from course identifier to its significant words
///
/// Word sets only grow: there is no removal API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseIndex {
    courses: BTreeMap<String, BTreeSet<String>>,
}

impl CourseIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `course_id` has an entry, empty on first sighting
    pub fn ensure_course(&mut self, course_id: &str) {
        if !self.courses.contains_key(course_id) {
            self.courses.insert(course_id.to_string(), BTreeSet::new());
        }
    }

    /// Adds a word to a course, creating the course entry if needed
    ///
    /// Returns true if the word was not already present for that course.
    pub fn insert_word(&mut self, course_id: &str, word: &str) -> bool {
        self.ensure_course(course_id);
        match self.courses.get_mut(course_id) {
            Some(words) => words.insert(word.to_string()),
            None => false,
        }
    }

    /// Words recorded for a course
    pub fn words(&self, course_id: &str) -> Option<&BTreeSet<String>> {
        self.courses.get(course_id)
    }

    /// Returns true if the course has an entry
    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.contains_key(course_id)
    }

    /// Iterates courses in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.courses
            .iter()
            .map(|(course_id, words)| (course_id.as_str(), words))
    }

    /// Number of courses
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns true if no course has been indexed
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Number of (course, word) pairs, i.e. rows in the persisted index
    pub fn pair_count(&self) -> usize {
        self.courses.values().map(BTreeSet::len).sum()
    }
}

/// Mapping from course identifier to the first URL it was seen at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseUrlMap {
    urls: BTreeMap<String, String>,
}

impl CourseUrlMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL for a course unless one is already known
    ///
    /// Returns true if this call stored the URL.
    pub fn record(&mut self, course_id: &str, url: &str) -> bool {
        if self.urls.contains_key(course_id) {
            return false;
        }
        self.urls.insert(course_id.to_string(), url.to_string());
        true
    }

    /// URL recorded for a course
    pub fn get(&self, course_id: &str) -> Option<&str> {
        self.urls.get(course_id).map(String::as_str)
    }

    /// Iterates entries in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.urls
            .iter()
            .map(|(course_id, url)| (course_id.as_str(), url.as_str()))
    }

    /// Number of courses with a URL
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if no URL has been recorded
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
