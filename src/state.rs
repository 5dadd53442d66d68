use std::path::{Path, PathBuf};

use crate::data::model::{Course, CourseTable};
use crate::data::search::matching_indices;
use crate::data::stats::Dashboard;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which of the two read-only views is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Search,
    Dashboard,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<CourseTable>,

    /// Where the dataset came from.
    pub source_path: Option<PathBuf>,

    /// Statistics for the loaded dataset, computed once per load.
    pub dashboard: Option<Dashboard>,

    pub view: View,

    /// Text in the search box.
    pub query: String,

    /// Indices of courses matching `query` (cached).
    pub results: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and compute its dashboard.
    pub fn set_dataset(&mut self, dataset: CourseTable, source: Option<&Path>) {
        self.dashboard = Some(Dashboard::from_table(&dataset));
        self.dataset = Some(dataset);
        self.source_path = source.map(Path::to_path_buf);
        self.status_message = None;
        self.rerun_search();
    }

    /// Load a file into the state.  A failed load drops any previous dataset.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset, Some(path)),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.clear_dataset();
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn clear_dataset(&mut self) {
        self.dataset = None;
        self.dashboard = None;
        self.source_path = None;
        self.results.clear();
    }

    /// Replace the query and recompute matches.
    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.rerun_search();
    }

    fn rerun_search(&mut self) {
        self.results = match &self.dataset {
            Some(ds) => matching_indices(ds, &self.query),
            None => Vec::new(),
        };
    }

    /// Matching courses in table order.
    pub fn result_courses(&self) -> Vec<&Course> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        self.results.iter().filter_map(|&i| ds.get(i)).collect()
    }

    /// A non-blank query was entered and nothing matched.
    pub fn no_matches(&self) -> bool {
        !self.query.trim().is_empty() && self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Course, CourseTable};

    fn table() -> CourseTable {
        let course = |title: &str, subject: &str| Course {
            title: title.to_string(),
            url: format!("https://x/{title}"),
            price: 10.0,
            subscribers: Some(5),
            level: Some("Beginner".to_string()),
            subject: Some(subject.to_string()),
            published: None,
        };
        CourseTable::from_courses(vec![
            course("Excel Basics", "Business"),
            course("Guitar", "Music"),
        ])
    }

    #[test]
    fn set_dataset_computes_dashboard_and_keeps_query() {
        let mut state = AppState::default();
        state.set_query("excel".into());
        assert!(state.results.is_empty());

        state.set_dataset(table(), Some(Path::new("courses.csv")));
        assert_eq!(state.results, vec![0]);
        let dashboard = state.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.courses_by_level.total(), 2);
        assert_eq!(state.source_path.as_deref(), Some(Path::new("courses.csv")));
    }

    #[test]
    fn no_matches_only_for_non_blank_queries() {
        let mut state = AppState::default();
        state.set_dataset(table(), None);
        assert!(!state.no_matches());

        state.set_query("piano".into());
        assert!(state.no_matches());

        state.set_query("guitar".into());
        assert!(!state.no_matches());
        assert_eq!(state.result_courses()[0].title, "Guitar");
    }

    #[test]
    fn failed_load_reports_status_and_keeps_no_dataset() {
        let mut state = AppState::default();
        state.load_path(Path::new("does-not-exist.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn failed_load_after_success_drops_the_old_dataset() {
        let temp = tempfile::tempdir().unwrap();
        let good = temp.path().join("courses.csv");
        std::fs::write(
            &good,
            "course_title,url,price,num_subscribers,level,published_timestamp,subject\n\
             Excel Basics,https://x/1,10,100,Beginner,2015-03-01T00:00:00Z,Business\n",
        )
        .unwrap();

        let mut state = AppState::default();
        state.set_query("excel".into());
        state.load_path(&good);
        assert!(state.dataset.is_some());
        assert_eq!(state.results, vec![0]);

        state.load_path(&temp.path().join("missing.csv"));
        assert!(state.dataset.is_none());
        assert!(state.dashboard.is_none());
        assert!(state.source_path.is_none());
        assert!(state.results.is_empty());
        assert!(state.status_message.is_some());
    }
}
