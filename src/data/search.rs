use serde::Serialize;

use super::model::CourseTable;

// ---------------------------------------------------------------------------
// Title search: literal, case-insensitive substring match
// ---------------------------------------------------------------------------

/// A search hit as shown to the user: the title and where it links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseLink {
    pub title: String,
    pub url: String,
}

/// Return indices of courses whose title contains `query`, ignoring case.
///
/// * A blank (empty or whitespace-only) query matches nothing.
/// * Any other query is matched literally, surrounding spaces included.
/// * Indices come back in table order.
pub fn matching_indices(table: &CourseTable, query: &str) -> Vec<usize> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    table
        .iter()
        .enumerate()
        .filter(|(_, course)| course.title.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// The matching rows as a table of their own.
pub fn search(table: &CourseTable, query: &str) -> CourseTable {
    let courses = matching_indices(table, query)
        .into_iter()
        .filter_map(|i| table.get(i).cloned())
        .collect();
    CourseTable::from_courses(courses)
}

/// The matching rows as ordered (title, url) pairs.
pub fn search_links(table: &CourseTable, query: &str) -> Vec<CourseLink> {
    let links: Vec<CourseLink> = matching_indices(table, query)
        .into_iter()
        .filter_map(|i| table.get(i))
        .map(|course| CourseLink {
            title: course.title.clone(),
            url: course.url.clone(),
        })
        .collect();
    log::debug!("Search {query:?} matched {} of {} courses", links.len(), table.len());
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Course, CourseTable};

    fn course(title: &str, url: &str) -> Course {
        Course {
            title: title.to_string(),
            url: url.to_string(),
            price: 0.0,
            subscribers: None,
            level: None,
            subject: None,
            published: None,
        }
    }

    fn table() -> CourseTable {
        CourseTable::from_courses(vec![
            course("Excel Basics", "https://x/1"),
            course("Python for Excel", "https://x/2"),
            course("Deep Learning", "https://x/3"),
            course("EXCELLENT Guitar", "https://x/4"),
        ])
    }

    #[test]
    fn matches_case_insensitively_in_table_order() {
        let links = search_links(&table(), "excel");
        let titles: Vec<&str> = links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Excel Basics", "Python for Excel", "EXCELLENT Guitar"]);
        assert_eq!(links[1].url, "https://x/2");
    }

    #[test]
    fn every_row_is_either_matched_or_excluded_correctly() {
        let table = table();
        let hits = matching_indices(&table, "LEARN");
        for (i, course) in table.iter().enumerate() {
            let contains = course.title.to_lowercase().contains("learn");
            assert_eq!(hits.contains(&i), contains, "row {i}");
        }
    }

    #[test]
    fn blank_query_returns_nothing() {
        assert!(matching_indices(&table(), "").is_empty());
        assert!(search_links(&table(), "   ").is_empty());
    }

    #[test]
    fn query_is_literal_not_a_pattern() {
        let table = CourseTable::from_courses(vec![
            course("C++ in 21 days", "u1"),
            course("C in 21 days", "u2"),
        ]);
        assert_eq!(matching_indices(&table, "c++"), vec![0]);
        assert_eq!(matching_indices(&table, ".*"), Vec::<usize>::new());
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_query() {
        assert_eq!(matching_indices(&table(), " excel"), vec![1]);
    }

    #[test]
    fn search_is_idempotent() {
        let once = search(&table(), "excel");
        let twice = search(&once, "excel");
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn non_matching_and_empty_tables_give_empty_results() {
        assert!(search_links(&table(), "kubernetes").is_empty());
        assert!(search_links(&CourseTable::default(), "excel").is_empty());
    }
}
