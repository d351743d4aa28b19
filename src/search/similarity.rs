use crate::index::CourseIndex;

/// Jaccard similarity of two courses' word sets
///
/// Returns `|A ∩ B| / |A ∪ B|`, or 0.0 when both sets are empty. Unknown
/// courses count as empty.
pub fn compare_courses(first: &str, second: &str, index: &CourseIndex) -> f64 {
    let (a, b) = match (index.words(first), index.words(second)) {
        (Some(a), Some(b)) => (a, b),
        _ => return 0.0,
    };

    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }

    a.intersection(b).count() as f64 / union as f64
}
