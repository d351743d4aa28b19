//! Delimited-file persistence for the index and URL map
//!
//! - Index: `Course ID|Word`, one row per (course, word) pair
//! - URL map: `Course ID,URL`, one row per course
//!
//! Fields holding the delimiter, a quote, or a line break are written in
//! double quotes with inner quotes doubled, and read back the same way. A
//! quoted field may span several physical lines.

use crate::index::{CourseIndex, CourseUrlMap};
use crate::PersistError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const INDEX_DELIMITER: char = '|';
const URLS_DELIMITER: char = ',';
const INDEX_HEADER: [&str; 2] = ["Course ID", "Word"];
const URLS_HEADER: [&str; 2] = ["Course ID", "URL"];

/// Writes the index as a pipe-delimited file
pub fn write_index(path: &Path, index: &CourseIndex) -> Result<(), PersistError> {
    let mut writer = create_writer(path)?;
    write_row(&mut writer, &INDEX_HEADER, INDEX_DELIMITER)?;

    for (course_id, words) in index.iter() {
        for word in words {
            write_row(&mut writer, &[course_id, word.as_str()], INDEX_DELIMITER)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes the URL map as a comma-delimited file
pub fn write_urls(path: &Path, urls: &CourseUrlMap) -> Result<(), PersistError> {
    let mut writer = create_writer(path)?;
    write_row(&mut writer, &URLS_HEADER, URLS_DELIMITER)?;

    for (course_id, url) in urls.iter() {
        write_row(&mut writer, &[course_id, url], URLS_DELIMITER)?;
    }

    writer.flush()?;
    Ok(())
}

/// Loads a pipe-delimited index written by [`write_index`]
pub fn load_index(path: &Path) -> Result<CourseIndex, PersistError> {
    let mut index = CourseIndex::new();
    for (course_id, word) in read_pairs(path, &INDEX_HEADER, INDEX_DELIMITER)? {
        index.insert_word(&course_id, &word);
    }
    Ok(index)
}

/// Loads a comma-delimited URL map written by [`write_urls`]
pub fn load_urls(path: &Path) -> Result<CourseUrlMap, PersistError> {
    let mut urls = CourseUrlMap::new();
    for (course_id, url) in read_pairs(path, &URLS_HEADER, URLS_DELIMITER)? {
        urls.record(&course_id, &url);
    }
    Ok(urls)
}

fn create_writer(path: &Path) -> Result<BufWriter<File>, PersistError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str], delimiter: char) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|field| quote_field(field, delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string());
    writeln!(writer, "{}", line)
}

fn quote_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains(['"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One parsed row and the physical line it starts on
#[derive(Debug, PartialEq)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

impl Record {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Splits delimited content into rows, honoring double-quoted fields
///
/// `\n` and `\r\n` end a row unless they sit inside quotes. On failure the
/// error carries the line the broken row starts on.
fn parse_records(content: &str, delimiter: char) -> Result<Vec<Record>, (usize, String)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => {
                    if c == '\n' {
                        line += 1;
                    }
                    current.push(c);
                }
            }
            continue;
        }

        match c {
            '"' if current.is_empty() => in_quotes = true,
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut current));
                records.push(Record {
                    line: row_start,
                    fields: std::mem::take(&mut fields),
                });
                line += 1;
                row_start = line;
            }
            c if c == delimiter => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err((row_start, "unterminated quoted field".to_string()));
    }

    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push(Record {
            line: row_start,
            fields,
        });
    }

    Ok(records)
}

fn read_pairs(
    path: &Path,
    header: &[&str; 2],
    delimiter: char,
) -> Result<Vec<(String, String)>, PersistError> {
    let content = std::fs::read_to_string(path)?;
    let path_str = path.display().to_string();

    let records = parse_records(content.trim_start_matches('\u{feff}'), delimiter).map_err(
        |(line, message)| PersistError::Malformed {
            path: path_str.clone(),
            line,
            message,
        },
    )?;
    let mut records = records.into_iter();

    let expected = header.join(&delimiter.to_string());
    let found = records
        .next()
        .map(|record| record.fields.join(&delimiter.to_string()))
        .unwrap_or_default();
    if found != expected {
        return Err(PersistError::Header {
            path: path_str,
            expected,
            found,
        });
    }

    let mut pairs = Vec::new();
    for record in records.filter(|record| !record.is_blank()) {
        let Record { line, mut fields } = record;
        if fields.len() != 2 {
            return Err(PersistError::Malformed {
                path: path_str,
                line,
                message: format!("expected 2 fields, found {}", fields.len()),
            });
        }

        let second = fields.pop().unwrap_or_default();
        let first = fields.pop().unwrap_or_default();
        pairs.push((first, second));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_index() -> CourseIndex {
        let mut index = CourseIndex::new();
        for word in ["fotografía", "luz", "composición"] {
            index.insert_word("FD-01", word);
        }
        index.insert_word("PY-02", "python3");
        index
    }

    #[test]
    fn test_index_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");

        let index = sample_index();
        write_index(&path, &index).unwrap();
        let loaded = load_index(&path).unwrap();

        assert_eq!(loaded, index);
    }

    #[test]
    fn test_course_without_words_has_no_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");

        let mut index = sample_index();
        index.ensure_course("EMPTY");
        write_index(&path, &index).unwrap();

        let loaded = load_index(&path).unwrap();
        assert!(!loaded.contains("EMPTY"));
        assert_eq!(loaded.pair_count(), index.pair_count());
    }

    #[test]
    fn test_index_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");

        let mut index = CourseIndex::new();
        index.insert_word("C1", "beta");
        index.insert_word("C1", "alpha");
        write_index(&path, &index).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Course ID|Word\nC1|alpha\nC1|beta\n");
    }

    #[test]
    fn test_urls_round_trip_with_quoting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("urls.csv");

        let mut urls = CourseUrlMap::new();
        urls.record("C1", "https://catalog.example.com/course?a=1,2");
        urls.record("C2", "https://catalog.example.com/plain");
        write_urls(&path, &urls).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Course ID,URL\n"));
        assert!(content.contains("C1,\"https://catalog.example.com/course?a=1,2\"\n"));

        let loaded = load_urls(&path).unwrap();
        assert_eq!(loaded, urls);
    }

    #[test]
    fn test_load_rejects_wrong_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");
        std::fs::write(&path, "Word|Course IDs\nrust|C1\n").unwrap();

        assert!(matches!(
            load_index(&path),
            Err(PersistError::Header { .. })
        ));
    }

    #[test]
    fn test_load_rejects_short_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");
        std::fs::write(&path, "Course ID|Word\nC1|rust\nC2\n").unwrap();

        match load_index(&path) {
            Err(PersistError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn test_load_accepts_crlf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("urls.csv");
        std::fs::write(&path, "Course ID,URL\r\nC1,https://example.com/c1\r\n").unwrap();

        let urls = load_urls(&path).unwrap();
        assert_eq!(urls.get("C1"), Some("https://example.com/c1"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_index(Path::new("/nonexistent/index.csv"));
        assert!(matches!(result, Err(PersistError::Io(_))));
    }

    #[test]
    fn test_parse_records_quotes() {
        let records = parse_records(r#"C1,"say ""hi"", then go""#, ',').unwrap();
        assert_eq!(
            records,
            vec![Record {
                line: 1,
                fields: vec!["C1".to_string(), "say \"hi\", then go".to_string()],
            }]
        );
        assert_eq!(
            parse_records("a,b\nC1,\"open", ',').unwrap_err().0,
            2
        );
    }

    #[test]
    fn test_parse_records_quoted_line_break() {
        let records = parse_records("\"C\n1\"|x\r\nC2|y\n", '|').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields, vec!["C\n1".to_string(), "x".to_string()]);
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn test_line_breaks_in_fields_round_trip() {
        let dir = TempDir::new().unwrap();
        let index_path = dir.path().join("index.csv");
        let urls_path = dir.path().join("urls.csv");

        let mut index = sample_index();
        index.insert_word("MULTI\nLINE", "luz");
        index.insert_word("CR\r\nLF", "sombra");
        write_index(&index_path, &index).unwrap();
        assert_eq!(load_index(&index_path).unwrap(), index);

        let mut urls = CourseUrlMap::new();
        urls.record("MULTI\nLINE", "https://catalog.example.com/multi");
        urls.record("C2", "https://catalog.example.com/c2");
        write_urls(&urls_path, &urls).unwrap();
        assert_eq!(load_urls(&urls_path).unwrap(), urls);
    }

    #[test]
    fn test_malformed_line_counts_quoted_breaks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.csv");
        std::fs::write(&path, "Course ID|Word\n\"C\n1\"|rust\nC2\n").unwrap();

        match load_index(&path) {
            Err(PersistError::Malformed { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected malformed row, got {:?}", other),
        }
    }
}
