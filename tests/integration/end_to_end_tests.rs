use hashmatch::duplicates::MatchFinder;
use hashmatch::output::TsvOutput;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn make_dir(root: &TempDir, name: &str, manifest: Option<&str>) -> PathBuf {
    let dir = root.path().join(name);
    fs::create_dir_all(&dir).unwrap();
    if let Some(content) = manifest {
        fs::write(dir.join(".hashcheck"), content).unwrap();
    }
    dir
}

fn run_tsv(dirs: &[PathBuf]) -> String {
    let mut output = TsvOutput::new(Vec::new());
    MatchFinder::with_defaults().run(dirs, &mut output).unwrap();
    String::from_utf8(output.into_inner()).unwrap()
}

fn match_lines(out: &str) -> Vec<&str> {
    out.lines().filter(|l| l.contains('\t')).collect()
}

fn s(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn test_single_cross_directory_match() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h1 100 ./x.bin\n"));
    let b = make_dir(&root, "B", Some("h1 100 ./y.bin\n"));

    let out = run_tsv(&[a.clone(), b.clone()]);

    let expected = format!(
        "h1\t100\t100\t{}\t{}\tx.bin\ty.bin\t{}\t{}",
        s(&a),
        s(&b),
        s(&a.join("x.bin")),
        s(&b.join("y.bin"))
    );
    assert_eq!(match_lines(&out), vec![expected.as_str()]);
}

#[test]
fn test_full_output_interleaves_diagnostics() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h1 100 ./x.bin\n"));
    let b = make_dir(&root, "B", Some("h1 100 ./y.bin\n"));

    let out = run_tsv(&[a.clone(), b.clone()]);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("{}: processing .hashcheck", s(&a)));
    assert_eq!(lines[1], format!("{}: processing .hashcheck", s(&b)));
    assert!(lines[2].starts_with("h1\t"));
}

#[test]
fn test_length_mismatch_reports_nothing() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h1 100 ./x.bin\n"));
    let b = make_dir(&root, "B", Some("h1 200 ./y.bin\n"));

    let mut output = TsvOutput::new(Vec::new());
    let summary = MatchFinder::with_defaults()
        .run(&[a, b], &mut output)
        .unwrap();
    let out = String::from_utf8(output.into_inner()).unwrap();

    assert!(match_lines(&out).is_empty());
    assert_eq!(summary.matches, 0);
    assert!(!summary.has_errors());
}

#[test]
fn test_missing_manifest_does_not_affect_matches() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h1 100 ./x.bin\n"));
    let c = make_dir(&root, "C", None);
    let b = make_dir(&root, "B", Some("h1 100 ./y.bin\n"));

    let out = run_tsv(&[a.clone(), c.clone(), b.clone()]);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[1], format!("{}: no .hashcheck found", s(&c)));
    let matches = match_lines(&out);
    assert_eq!(matches.len(), 1);
    assert!(matches[0].ends_with(&format!("{}\t{}", s(&a.join("x.bin")), s(&b.join("y.bin")))));
}

#[test]
fn test_nonexistent_directory_is_reported_missing() {
    let root = tempdir().unwrap();
    let gone = root.path().join("does-not-exist");

    let out = run_tsv(&[gone.clone()]);
    assert_eq!(out, format!("{}: no .hashcheck found\n", s(&gone)));
}

#[test]
fn test_same_directory_duplicates() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h 9 ./one\nh 9 ./sub/two\n"));

    let out = run_tsv(&[a.clone()]);
    let matches = match_lines(&out);
    assert_eq!(matches.len(), 1);

    let fields: Vec<&str> = matches[0].split('\t').collect();
    assert_eq!(fields[3], s(&a));
    assert_eq!(fields[4], s(&a.join("sub")));
    assert_eq!(fields[5], "one");
    assert_eq!(fields[6], "two");
}

#[test]
fn test_first_match_only_across_directories() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h 5 ./first\nh 5 ./second\nh 7 ./seven\n"));
    let b = make_dir(&root, "B", Some("h 5 ./new\n"));

    let out = run_tsv(&[a.clone(), b.clone()]);
    let matches = match_lines(&out);

    // A/second matches A/first; B/new matches A/first again, never A/second
    assert_eq!(matches.len(), 2);
    let last: Vec<&str> = matches[1].split('\t').collect();
    assert_eq!(last[7], s(&a.join("first")));
    assert_eq!(last[8], s(&b.join("new")));
}

#[test]
fn test_zero_length_files_never_match() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("e 0 ./empty1\ne 0 ./empty2\n"));
    let b = make_dir(&root, "B", Some("e 0 ./empty3\n"));

    let out = run_tsv(&[a, b]);
    assert!(match_lines(&out).is_empty());
}

#[test]
fn test_paths_with_spaces_survive() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h 3 ./My Photos/IMG 001.jpg\n"));
    let b = make_dir(&root, "B", Some("h 3 ./copy  of  IMG 001.jpg\n"));

    let out = run_tsv(&[a.clone(), b.clone()]);
    let matches = match_lines(&out);
    let fields: Vec<&str> = matches[0].split('\t').collect();

    assert_eq!(fields[3], s(&a.join("My Photos")));
    assert_eq!(fields[5], "IMG 001.jpg");
    assert_eq!(fields[6], "copy  of  IMG 001.jpg");
}

#[test]
fn test_processing_is_deterministic() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h1 1 ./a\nh2 2 ./b\nh1 1 ./c\n"));
    let b = make_dir(&root, "B", Some("h2 2 ./d\nh1 1 ./e\nh3 3 ./f\n"));
    let dirs = vec![a, b];

    assert_eq!(run_tsv(&dirs), run_tsv(&dirs));
}

#[test]
fn test_directory_order_changes_pairing() {
    let root = tempdir().unwrap();
    let a = make_dir(&root, "A", Some("h 1 ./a\n"));
    let b = make_dir(&root, "B", Some("h 1 ./b\n"));

    let ab = run_tsv(&[a.clone(), b.clone()]);
    let ba = run_tsv(&[b.clone(), a.clone()]);

    let ab_fields: Vec<&str> = match_lines(&ab)[0].split('\t').collect();
    let ba_fields: Vec<&str> = match_lines(&ba)[0].split('\t').collect();
    assert_eq!(ab_fields[7], s(&a.join("a")));
    assert_eq!(ba_fields[7], s(&b.join("b")));
}
