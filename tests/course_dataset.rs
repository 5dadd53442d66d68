use std::path::PathBuf;

use course_browser::data::loader::load_file;
use course_browser::data::model::CourseTable;
use course_browser::data::search::{search, search_links, CourseLink};
use course_browser::data::stats::{CalendarMonth, Dashboard};
use tempfile::{tempdir, TempDir};

const COURSES_CSV: &str = "\
course_id,course_title,url,price,num_subscribers,level,published_timestamp,subject
1,Excel Basics,https://example.com/excel-basics,10,100,Beginner,2015-03-01T00:00:00Z,Business
2,Python for Excel,https://example.com/python-excel,20,50,Intermediate,2016-03-01T00:00:00Z,Business
3,Deep Learning,https://example.com/deep-learning,100,10,Expert,2016-07-01T00:00:00Z,Science
";

fn write_courses(contents: &str) -> (TempDir, PathBuf) {
    let temp = tempdir().unwrap();
    let path = temp.path().join("courses.csv");
    std::fs::write(&path, contents).unwrap();
    (temp, path)
}

fn load(contents: &str) -> CourseTable {
    let (_temp, path) = write_courses(contents);
    load_file(&path).unwrap()
}

#[test]
fn search_returns_matching_links_in_file_order() {
    let table = load(COURSES_CSV);
    let links = search_links(&table, "excel");
    assert_eq!(
        links,
        vec![
            CourseLink {
                title: "Excel Basics".into(),
                url: "https://example.com/excel-basics".into(),
            },
            CourseLink {
                title: "Python for Excel".into(),
                url: "https://example.com/python-excel".into(),
            },
        ]
    );
    assert_eq!(search(&search(&table, "EXCEL"), "EXCEL"), search(&table, "EXCEL"));
}

#[test]
fn dashboard_matches_hand_computed_totals() {
    let dashboard = Dashboard::from_table(&load(COURSES_CSV));

    let levels: Vec<(&String, &u64)> = dashboard.courses_by_level.iter().collect();
    assert_eq!(levels.len(), 3);
    assert!(levels.iter().all(|(_, n)| **n == 1));

    assert_eq!(dashboard.profit_by_year.labels(), ["2015", "2016"]);
    assert_eq!(dashboard.profit_by_year.values(), [1000.0, 2000.0]);

    assert_eq!(dashboard.subscribers_by_subject.labels(), ["Business", "Science"]);
    assert_eq!(dashboard.subscribers_by_subject.values(), [150.0, 10.0]);

    assert_eq!(dashboard.subscribers_by_year.values(), [100.0, 60.0]);
    let march = CalendarMonth::new(3).unwrap();
    assert_eq!(dashboard.subscribers_by_month.get(&march), Some(&150));
    assert_eq!(dashboard.subjects_per_level.get("Intermediate", "Business"), Some(1));
}

#[test]
fn dirty_fields_degrade_instead_of_failing() {
    let table = load(
        "course_title,url,price,num_subscribers,level,published_timestamp,subject\n\
         Free Piano,https://example.com/piano,Free,500,Beginner Level,2017-02-01T00:00:00Z,Musical Instruments\n\
         Paid Piano,https://example.com/piano2,$20,5,Beginner Level,2017-02-10T00:00:00Z,Musical Instruments\n\
         Undated,https://example.com/undated,30,7,Expert Level,someday,Musical Instruments\n",
    );
    assert_eq!(table.len(), 3);

    let dashboard = Dashboard::from_table(&table);
    assert_eq!(
        dashboard
            .subscribers_by_subject
            .get(&"Musical Instruments".to_string()),
        Some(&512)
    );
    assert_eq!(dashboard.profit_by_year.get(&2017), Some(&100.0));
    assert_eq!(dashboard.subscribers_by_year.get(&2017), Some(&505));
    assert_eq!(dashboard.courses_by_level.total(), 3);
}

#[test]
fn empty_dataset_yields_empty_everything() {
    let table = load("course_title,url,price,num_subscribers,level,published_timestamp,subject\n");
    assert!(table.is_empty());
    assert!(search_links(&table, "excel").is_empty());
    assert_eq!(Dashboard::from_table(&table), Dashboard::default());
}

#[test]
fn missing_column_stops_the_load() {
    let (_temp, path) = write_courses("course_title,url,price\nA,https://example.com/a,1\n");
    let err = load_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("published_timestamp"));
}
