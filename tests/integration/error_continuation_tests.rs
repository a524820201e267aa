use hashmatch::duplicates::{
    CollectingSink, DirectoryStatus, FinderConfig, FinderError, LengthComparison, MatchFinder,
};
use hashmatch::manifest::{LineError, ManifestError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_malformed_lines_are_skipped() {
    let root = tempdir().unwrap();
    let a = root.path().join("A");
    fs::create_dir(&a).unwrap();
    fs::write(
        a.join(".hashcheck"),
        "h1 10 ./a\nonlyhash\nh1 10\n 10 ./nohash\nh1 10 ./b\n",
    )
    .unwrap();

    let (matches, summary) = MatchFinder::with_defaults().find_matches(&[a]).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(summary.malformed_lines, 3);
    assert_eq!(summary.records_read, 2);

    let reasons: Vec<&LineError> = summary
        .errors
        .iter()
        .filter_map(|e| match e {
            ManifestError::Malformed { reason, .. } => Some(reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        reasons,
        [
            &LineError::MissingLength,
            &LineError::MissingPath,
            &LineError::EmptyField("hash")
        ]
    );
}

#[test]
fn test_strict_mode_aborts_on_malformed_line() {
    let root = tempdir().unwrap();
    let a = root.path().join("A");
    let b = root.path().join("B");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    fs::write(a.join(".hashcheck"), "garbage\n").unwrap();
    fs::write(b.join(".hashcheck"), "h 1 ./b\n").unwrap();

    let finder = MatchFinder::new(FinderConfig::default().with_strict(true));
    let mut sink = CollectingSink::default();
    let result = finder.run(&[a, b], &mut sink);

    assert!(matches!(
        result,
        Err(FinderError::Manifest(ManifestError::Malformed { line: 1, .. }))
    ));
    // B was never reached
    assert_eq!(sink.directories.len(), 1);
}

#[test]
fn test_unreadable_manifest_is_distinguished_from_missing() {
    let root = tempdir().unwrap();
    let a = root.path().join("A");
    let b = root.path().join("B");
    fs::create_dir_all(a.join(".hashcheck")).unwrap();
    fs::create_dir(&b).unwrap();
    fs::write(b.join(".hashcheck"), "h 1 ./b\n").unwrap();

    let mut sink = CollectingSink::default();
    let summary = MatchFinder::with_defaults()
        .run(&[a, b], &mut sink)
        .unwrap();

    // The run always continues to B
    assert_eq!(sink.directories.len(), 2);
    assert_ne!(sink.directories[0].status, DirectoryStatus::Missing);
    assert_eq!(sink.directories[1].status, DirectoryStatus::Processing);
    assert_eq!(summary.directories_missing, 0);
    assert_eq!(summary.directories_failed, 1);
    assert!(summary.has_errors());
}

#[test]
fn test_numeric_length_mode() {
    let root = tempdir().unwrap();
    let a = root.path().join("A");
    let b = root.path().join("B");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();
    fs::write(a.join(".hashcheck"), "h 7 ./a\n").unwrap();
    fs::write(b.join(".hashcheck"), "h 007 ./b\n").unwrap();
    let dirs = vec![a, b];

    let (exact, _) = MatchFinder::with_defaults().find_matches(&dirs).unwrap();
    assert!(exact.is_empty());

    let numeric = MatchFinder::new(
        FinderConfig::default().with_length_comparison(LengthComparison::Numeric),
    );
    let (matches, _) = numeric.find_matches(&dirs).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].len1(), "7");
    assert_eq!(matches[0].len2(), "007");
}

#[test]
fn test_custom_manifest_name() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("SHA256SUMS.idx"), "h 1 ./a\nh 1 ./b\n").unwrap();

    let finder = MatchFinder::new(FinderConfig::default().with_manifest_name("SHA256SUMS.idx"));
    let (matches, summary) = finder
        .find_matches(&[root.path().to_path_buf()])
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(summary.directories_processed, 1);
}
