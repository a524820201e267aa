use hashmatch::duplicates::MatchFinder;
use hashmatch::manifest::ManifestReader;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_trailing_slash_yields_identical_paths() {
    let root = tempdir().unwrap();
    let data = root.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join(".hashcheck"), "abc123 10 ./sub/file.txt\n").unwrap();

    let with_slash = PathBuf::from(format!("{}/", data.display()));

    let plain: Vec<_> = ManifestReader::open(&data).unwrap().map(Result::unwrap).collect();
    let slashed: Vec<_> = ManifestReader::open(&with_slash)
        .unwrap()
        .map(Result::unwrap)
        .collect();

    assert_eq!(plain, slashed);
    assert_eq!(plain[0].path, data.join("sub").join("file.txt"));
    assert_eq!(
        plain[0].path.display().to_string(),
        format!("{}/sub/file.txt", data.display())
    );
}

#[test]
fn test_trailing_slash_in_diagnostics() {
    let root = tempdir().unwrap();
    let data = root.path().join("data");
    fs::create_dir(&data).unwrap();

    let with_slash = PathBuf::from(format!("{}//", data.display()));
    let (_, summary) = MatchFinder::with_defaults()
        .find_matches(&[with_slash])
        .unwrap();
    assert_eq!(summary.directories_missing, 1);

    let mut output = hashmatch::output::TsvOutput::new(Vec::new());
    MatchFinder::with_defaults()
        .run(&[PathBuf::from(format!("{}/", data.display()))], &mut output)
        .unwrap();
    let out = String::from_utf8(output.into_inner()).unwrap();
    assert_eq!(out, format!("{}: no .hashcheck found\n", data.display()));
}

#[test]
fn test_crlf_manifest() {
    let root = tempdir().unwrap();
    fs::write(root.path().join(".hashcheck"), "h 4 ./win.txt\r\n").unwrap();

    let record = ManifestReader::open(root.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(record.path, root.path().join("win.txt"));
}

#[test]
fn test_path_without_dot_slash_prefix() {
    let root = tempdir().unwrap();
    fs::write(root.path().join(".hashcheck"), "h 4 nested/plain.txt\n").unwrap();

    let record = ManifestReader::open(root.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(record.path, root.path().join("nested/plain.txt"));
}

#[test]
fn test_hidden_file_names_are_not_mangled() {
    let root = tempdir().unwrap();
    fs::write(root.path().join(".hashcheck"), "h 4 ./.bashrc\n").unwrap();

    let record = ManifestReader::open(root.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(record.path, root.path().join(".bashrc"));
}

#[test]
fn test_unicode_paths() {
    let root = tempdir().unwrap();
    fs::write(root.path().join(".hashcheck"), "h 4 ./café/日本語 ファイル.txt\n").unwrap();

    let record = ManifestReader::open(root.path())
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(record.path, root.path().join("café/日本語 ファイル.txt"));
}
