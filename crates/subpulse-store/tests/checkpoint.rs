use std::fs;

use subpulse_core::MetricResult;
use subpulse_store::{load_json_results, BatchSink, Destination, ResultSink};

fn record(url: &str, visitors: Option<&str>, contributors: Option<&str>) -> MetricResult {
    MetricResult {
        url: url.to_owned(),
        weekly_visitors: visitors.map(str::to_owned),
        weekly_contributors: contributors.map(str::to_owned),
    }
}

fn batch() -> Vec<MetricResult> {
    vec![
        record("https://www.reddit.com/r/n8n/", Some("12.5K"), Some("431")),
        record("https://www.reddit.com/r/slow/", None, None),
        record("https://www.reddit.com/r/gambling/", Some("1.2M"), None),
    ]
}

#[test]
fn persist_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reddit_results.json");
    let mut sink = ResultSink::new(vec![Destination::Json(path.clone())]);

    sink.persist(&batch()).unwrap();

    assert_eq!(load_json_results(&path).unwrap(), batch());
}

#[test]
fn each_checkpoint_replaces_the_previous_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    let mut sink = ResultSink::new(vec![Destination::Json(path.clone())]);
    let all = batch();

    for i in 1..=all.len() {
        sink.persist(&all[..i]).unwrap();
        let reloaded = load_json_results(&path).unwrap();
        assert_eq!(reloaded.len(), i);
        assert_eq!(reloaded, all[..i]);
    }
}

#[test]
fn persisting_same_batch_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("out.json");
    let csv_path = dir.path().join("out.csv");
    let mut sink = ResultSink::json_with_optional_csv(json_path.clone(), Some(csv_path.clone()));

    sink.persist(&batch()).unwrap();
    let json_first = fs::read(&json_path).unwrap();
    let csv_first = fs::read(&csv_path).unwrap();

    sink.persist(&batch()).unwrap();
    assert_eq!(fs::read(&json_path).unwrap(), json_first);
    assert_eq!(fs::read(&csv_path).unwrap(), csv_first);
}

#[test]
fn csv_destination_writes_header_and_empty_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut sink = ResultSink::new(vec![Destination::Csv(path.clone())]);

    sink.persist(&batch()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "url,weeklyVisitors,weeklyContributors");
    assert_eq!(lines[2], "https://www.reddit.com/r/slow/,,");
    assert_eq!(lines[3], "https://www.reddit.com/r/gambling/,1.2M,");
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/runs/out.json");
    let mut sink = ResultSink::new(vec![Destination::Json(path.clone())]);

    sink.persist(&batch()).unwrap();
    assert!(path.exists());
}

#[test]
fn no_temp_files_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = ResultSink::json_with_optional_csv(
        dir.path().join("out.json"),
        Some(dir.path().join("out.csv")),
    );
    sink.persist(&batch()).unwrap();

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["out.csv".to_owned(), "out.json".to_owned()]);
}

#[test]
fn failed_write_leaves_previous_checkpoint_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    let mut sink = ResultSink::new(vec![Destination::Json(path.clone())]);
    sink.persist(&batch()[..1]).unwrap();
    let before = fs::read(&path).unwrap();

    // A directory squatting on the temp file name makes the next write fail
    // before the rename.
    fs::create_dir(dir.path().join(".out.json.tmp")).unwrap();
    assert!(sink.persist(&batch()).is_err());

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(load_json_results(&path).unwrap().len(), 1);
}

#[test]
fn one_failing_destination_does_not_skip_the_others() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("out.json");
    let csv_path = dir.path().join("out.csv");
    fs::create_dir(dir.path().join(".out.json.tmp")).unwrap();
    let mut sink = ResultSink::json_with_optional_csv(json_path.clone(), Some(csv_path.clone()));

    assert!(sink.persist(&batch()).is_err());
    assert!(!json_path.exists());
    assert!(csv_path.exists());
}

#[test]
fn loading_a_missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = load_json_results(&path).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}
