//! End-to-end runs over temp directories: delivery counts, error joining, and termination.

use jsongather::{
    CancelToken, FileError, GatherOpts, Record, RunReport, gather_dir, gather_dir_with_cancel,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn run(root: &Path, opts: &GatherOpts) -> (Vec<Record>, RunReport) {
    let mut got = Vec::new();
    let report = gather_dir(root, opts, &mut |r: Record| got.push(r)).unwrap();
    (got, report)
}

fn sorted(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(|r| r.id);
    records
}

fn rec(id: i64, value: &str) -> Record {
    Record {
        id,
        value: value.to_string(),
    }
}

#[test]
fn test_mixed_directory_scenario() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.json", r#"{"id":1,"value":"x"}"#);
    write(dir.path(), "b.json", r#"{"id":2,"value":"y"}"#);
    write(dir.path(), "c.txt", "ignored");
    write(dir.path(), "d.json", "not json");

    let (got, report) = run(dir.path(), &GatherOpts::default());

    assert_eq!(sorted(got), vec![rec(1, "x"), rec(2, "y")]);
    assert_eq!(report.dispatched, 3);
    assert_eq!(report.delivered, 2);
    assert!(report.outcome.enumeration.is_none());
    assert_eq!(report.outcome.file_errors.len(), 1);
    let err = &report.outcome.file_errors[0];
    assert!(err.is_decode());
    assert!(err.path().ends_with("d.json"));
    assert!(!report.outcome.is_success());
    assert!(report.outcome.to_string().contains("d.json"));
}

#[test]
fn test_empty_directory_is_success() {
    let dir = tempdir().unwrap();
    let (got, report) = run(dir.path(), &GatherOpts::default());
    assert!(got.is_empty());
    assert_eq!(report.dispatched, 0);
    assert!(report.outcome.is_success());
    assert!(report.outcome.into_result().is_ok());
}

#[test]
fn test_missing_root_is_single_enumeration_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("json_files");

    let (got, report) = run(&missing, &GatherOpts::default());

    assert!(got.is_empty());
    assert_eq!(report.dispatched, 0);
    assert_eq!(report.outcome.error_count(), 1);
    assert!(report.outcome.file_errors.is_empty());
    assert!(!report.outcome.cancelled);
    let enumeration = report.outcome.enumeration.as_ref().unwrap();
    assert_eq!(enumeration.path, missing);
    assert!(report.outcome.into_result().is_err());
}

#[test]
fn test_n_good_m_bad_counts() {
    let dir = tempdir().unwrap();
    let good = 25;
    let bad = 7;
    for i in 0..good {
        write(
            dir.path(),
            &format!("good/{i}.json"),
            &format!(r#"{{"id":{i},"value":"v{i}","extra":true}}"#),
        );
    }
    for i in 0..bad {
        let content = match i % 3 {
            0 => "{\"id\":1".to_string(),
            1 => r#"{"value":"no id"}"#.to_string(),
            _ => r#"{"id":"1","value":"x"}"#.to_string(),
        };
        write(dir.path(), &format!("bad/{i}.json"), &content);
    }

    let (got, report) = run(dir.path(), &GatherOpts::default());

    assert_eq!(got.len(), good);
    let ids: HashSet<i64> = got.iter().map(|r| r.id).collect();
    assert_eq!(ids, (0..good as i64).collect());
    assert_eq!(report.outcome.file_errors.len(), bad);
    assert!(report.outcome.file_errors.iter().all(FileError::is_decode));
    assert_eq!(report.dispatched, good + bad);
}

#[test]
fn test_more_records_than_capacity_with_slow_sink() {
    let dir = tempdir().unwrap();
    let n = 60;
    for i in 0..n {
        write(
            dir.path(),
            &format!("f{i}.json"),
            &format!(r#"{{"id":{i},"value":"p"}}"#),
        );
    }

    let mut got = Vec::new();
    let report = gather_dir(dir.path(), &GatherOpts::default(), &mut |r: Record| {
        thread::sleep(Duration::from_millis(2));
        got.push(r.id);
    })
    .unwrap();

    assert_eq!(report.delivered, n);
    assert_eq!(got.len(), n);
    assert_eq!(got.iter().collect::<HashSet<_>>().len(), n);
    assert!(report.outcome.is_success());
}

#[test]
fn test_in_flight_cap_still_delivers_everything() {
    let dir = tempdir().unwrap();
    for i in 0..30 {
        write(
            dir.path(),
            &format!("nested/{}/f{i}.json", i % 4),
            &format!(r#"{{"id":{i},"value":"c"}}"#),
        );
    }
    let opts = GatherOpts {
        max_in_flight: Some(2),
        ..Default::default()
    };
    let (got, report) = run(dir.path(), &opts);
    assert_eq!(got.len(), 30);
    assert_eq!(report.dispatched, 30);
    assert!(report.outcome.is_success());
}

#[test]
fn test_parallel_walk_matches_serial() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.json", r#"{"id":1,"value":"x"}"#);
    write(dir.path(), "sub/deeper/b.json", r#"{"id":2,"value":"y"}"#);
    write(dir.path(), "sub/c.txt", "ignored");
    write(dir.path(), ".hidden/e.json", r#"{"id":3,"value":"z"}"#);

    let serial = run(dir.path(), &GatherOpts::default());
    let parallel = run(
        dir.path(),
        &GatherOpts {
            parallel_walk: true,
            ..Default::default()
        },
    );

    assert_eq!(sorted(serial.0), sorted(parallel.0.clone()));
    assert_eq!(
        sorted(parallel.0),
        vec![rec(1, "x"), rec(2, "y"), rec(3, "z")]
    );
    assert!(parallel.1.outcome.is_success());
}

#[test]
fn test_dot_underscore_file_is_delivered() {
    let dir = tempdir().unwrap();
    write(dir.path(), "._notes.json", r#"{"id":1,"value":"x"}"#);
    write(dir.path(), "plain.json", r#"{"id":2,"value":"y"}"#);

    let (got, report) = run(dir.path(), &GatherOpts::default());
    assert_eq!(sorted(got), vec![rec(1, "x"), rec(2, "y")]);
    assert_eq!(report.dispatched, 2);
    assert_eq!(report.delivered, 2);
    assert!(report.outcome.is_success());
}

#[test]
fn test_exclude_and_custom_extension() {
    let dir = tempdir().unwrap();
    write(dir.path(), "keep.rec", r#"{"id":1,"value":"k"}"#);
    write(dir.path(), "skip.json", r#"{"id":2,"value":"s"}"#);
    write(dir.path(), "drafts/draft.rec", r#"{"id":3,"value":"d"}"#);

    let opts = GatherOpts {
        extension: "rec".to_string(),
        exclude: vec!["drafts".to_string()],
        ..Default::default()
    };
    let (got, report) = run(dir.path(), &opts);
    assert_eq!(got, vec![rec(1, "k")]);
    assert_eq!(report.dispatched, 1);
}

#[test]
fn test_size_guard_reports_too_large() {
    let dir = tempdir().unwrap();
    write(dir.path(), "small.json", r#"{"id":1,"value":"s"}"#);
    let big_value = "b".repeat(512);
    write(
        dir.path(),
        "big.json",
        &format!(r#"{{"id":2,"value":"{big_value}"}}"#),
    );

    let opts = GatherOpts {
        max_file_size: Some(128),
        ..Default::default()
    };
    let (got, report) = run(dir.path(), &opts);
    assert_eq!(got, vec![rec(1, "s")]);
    assert_eq!(report.outcome.file_errors.len(), 1);
    assert!(matches!(
        report.outcome.file_errors[0],
        FileError::TooLarge { limit: 128, .. }
    ));
}

#[test]
fn test_root_may_be_a_single_file() {
    let dir = tempdir().unwrap();
    write(dir.path(), "only.json", r#"{"id":9,"value":"solo"}"#);
    let (got, report) = run(&dir.path().join("only.json"), &GatherOpts::default());
    assert_eq!(got, vec![rec(9, "solo")]);
    assert!(report.outcome.is_success());
}

#[test]
fn test_cancelled_before_start_dispatches_nothing() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.json", r#"{"id":1,"value":"x"}"#);
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut got = Vec::new();
    let report = gather_dir_with_cancel(
        dir.path(),
        &GatherOpts::default(),
        &mut |r: Record| got.push(r),
        cancel,
    )
    .unwrap();

    assert!(got.is_empty());
    assert_eq!(report.dispatched, 0);
    assert!(report.outcome.cancelled);
    assert!(report.outcome.enumeration.is_none());
    assert!(!report.outcome.is_success());
}

#[test]
fn test_decoding_same_file_twice_is_identical() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.json", r#"{"id":5,"value":"same"}"#);
    let (first, _) = run(dir.path(), &GatherOpts::default());
    let (second, _) = run(dir.path(), &GatherOpts::default());
    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_io_error() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.json", r#"{"id":1,"value":"x"}"#);
    std::os::unix::fs::symlink(dir.path().join("gone.json"), dir.path().join("link.json")).unwrap();

    let (got, report) = run(dir.path(), &GatherOpts::default());
    assert_eq!(got, vec![rec(1, "x")]);
    assert_eq!(report.outcome.file_errors.len(), 1);
    let err = &report.outcome.file_errors[0];
    assert!(matches!(err, FileError::Io { .. }));
    assert!(err.path().ends_with("link.json"));
}

#[cfg(unix)]
#[test]
fn test_walk_error_with_workers_blocked_on_full_collector() {
    let dir = tempdir().unwrap();
    for i in 0..40 {
        write(
            dir.path(),
            &format!("f{i:02}.json"),
            &format!(r#"{{"id":{i},"value":"w"}}"#),
        );
    }
    fs::create_dir_all(dir.path().join("zz")).unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("zz/loop")).unwrap();

    let opts = GatherOpts {
        follow_links: true,
        ..Default::default()
    };
    let mut got = Vec::new();
    let report = gather_dir(dir.path(), &opts, &mut |r: Record| {
        thread::sleep(Duration::from_millis(2));
        got.push(r.id);
    })
    .unwrap();

    assert!(report.outcome.enumeration.is_some());
    assert!(report.outcome.file_errors.is_empty());
    assert!(!report.outcome.cancelled);
    assert!(!report.outcome.is_success());
    assert!(report.delivered <= report.dispatched);
    assert_eq!(got.len(), report.delivered);
    assert_eq!(got.iter().collect::<HashSet<_>>().len(), got.len());
}
