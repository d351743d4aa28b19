use crate::DictionaryError;
use std::collections::HashMap;
use std::path::Path;

/// Immutable mapping from course title to course identifier
///
/// Titles match exactly after surrounding whitespace is trimmed; the match
/// is case sensitive.
#[derive(Debug, Clone, Default)]
pub struct CourseDictionary {
    titles: HashMap<String, String>,
}

impl CourseDictionary {
    /// Loads a dictionary from a JSON object of `"title": "id"` pairs
    ///
    /// # Returns
    ///
    /// * `Ok(CourseDictionary)` - Successfully loaded dictionary
    /// * `Err(DictionaryError)` - The file is missing, unreadable, or not a
    ///   flat object of strings
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parses a dictionary from JSON text
    pub fn from_json(content: &str) -> Result<Self, DictionaryError> {
        let raw: HashMap<String, String> = serde_json::from_str(content)?;
        Ok(raw.into_iter().collect())
    }

    /// Looks up the identifier for a course title
    ///
    /// Returns `None` when the title is not in the dictionary; a miss is an
    /// expected outcome, not an error.
    pub fn lookup(&self, title: &str) -> Option<&str> {
        self.titles.get(title.trim()).map(String::as_str)
    }

    /// Number of titles in the dictionary
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Returns true if the dictionary has no titles
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl<T: Into<String>, I: Into<String>> FromIterator<(T, I)> for CourseDictionary {
    fn from_iter<It: IntoIterator<Item = (T, I)>>(iter: It) -> Self {
        Self {
            titles: iter
                .into_iter()
                .map(|(title, id)| (title.into().trim().to_string(), id.into()))
                .collect(),
        }
    }
}
