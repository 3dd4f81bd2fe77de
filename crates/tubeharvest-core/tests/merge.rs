//! Directory consolidation end to end

use std::fs;
use std::path::Path;

use tubeharvest_core::{
    CONSOLIDATED_FILE_NAME, HarvestError, VideoRecord, export_records, merge_directory,
    merge_directory_to,
};

fn record(id: &str, title: &str, duration: u32) -> VideoRecord {
    VideoRecord {
        video_id: id.to_string(),
        video_url: format!("https://www.youtube.com/watch?v={}", id),
        hyperlink: format!("=HYPERLINK(\"https://www.youtube.com/watch?v={}\",)", id),
        published_at: "2021-01-01T00:00:00Z".to_string(),
        channel_id: "UCm".to_string(),
        channel_title: "Merge Channel".to_string(),
        title: title.to_string(),
        view_count: 1,
        like_count: 0,
        comment_count: 0,
        duration,
    }
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let text = fs::read_to_string(path).unwrap();
    let text = text.strip_prefix('\u{feff}').expect("consolidated file starts with a BOM");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_cats_and_dogs_share_a_video() {
    let tmp = tempfile::tempdir().unwrap();
    export_records(tmp.path(), "cats", &[record("v1", "Cat", 5), record("v2", "Cat 2", 6)]).unwrap();
    export_records(tmp.path(), "dogs", &[record("v1", "Dog", 7), record("v3", "Dog 3", 8)]).unwrap();

    let summary = merge_directory(tmp.path()).unwrap();

    assert_eq!(summary.input_rows, 4);
    assert_eq!(summary.output_rows, 3);
    assert_eq!(summary.files.len(), 2);
    assert_eq!(summary.output_path, tmp.path().join(CONSOLIDATED_FILE_NAME));

    let rows = read_rows(&summary.output_path);
    let header = &rows[0];
    assert_eq!(header.first().map(String::as_str), Some("video_id"));
    assert_eq!(header.last().map(String::as_str), Some("keyword"));

    let title_col = header.iter().position(|h| h == "title").unwrap();
    let v1_rows: Vec<&Vec<String>> = rows[1..].iter().filter(|r| r[0] == "v1").collect();
    assert_eq!(v1_rows.len(), 1);
    assert_eq!(v1_rows[0][title_col], "Cat");
    assert_eq!(v1_rows[0].last().map(String::as_str), Some("cats"));

    let keywords: Vec<&str> = rows[1..].iter().map(|r| r.last().unwrap().as_str()).collect();
    assert_eq!(keywords, vec!["cats", "cats", "dogs"]);
}

#[test]
fn test_rerun_ignores_previous_output() {
    let tmp = tempfile::tempdir().unwrap();
    export_records(tmp.path(), "cats", &[record("v1", "Cat", 5)]).unwrap();

    let first = merge_directory(tmp.path()).unwrap();
    let second = merge_directory(tmp.path()).unwrap();

    assert_eq!(first.files, second.files);
    assert_eq!(second.input_rows, 1);
    assert_eq!(second.output_rows, 1);
}

#[test]
fn test_custom_output_name() {
    let tmp = tempfile::tempdir().unwrap();
    export_records(tmp.path(), "cats", &[record("v1", "Cat", 5)]).unwrap();

    let summary = merge_directory_to(tmp.path(), "all.csv").unwrap();
    assert_eq!(summary.output_path, tmp.path().join("all.csv"));
    assert!(!tmp.path().join(CONSOLIDATED_FILE_NAME).exists());
}

#[test]
fn test_empty_directory_is_error() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("readme.txt"), "nothing here").unwrap();

    assert!(matches!(
        merge_directory(tmp.path()),
        Err(HarvestError::NoInputFiles(_))
    ));
}

#[test]
fn test_missing_directory_is_error() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");

    assert!(matches!(merge_directory(&missing), Err(HarvestError::Io(_))));
}

#[test]
fn test_bad_file_aborts_without_output() {
    let tmp = tempfile::tempdir().unwrap();
    export_records(tmp.path(), "cats", &[record("v1", "Cat", 5)]).unwrap();
    fs::write(tmp.path().join("zzz.csv"), "id,title\nx,y\n").unwrap();

    assert!(matches!(
        merge_directory(tmp.path()),
        Err(HarvestError::MissingColumn { .. })
    ));
    assert!(!tmp.path().join(CONSOLIDATED_FILE_NAME).exists());
}
