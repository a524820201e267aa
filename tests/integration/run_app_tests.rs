use clap::Parser;
use hashmatch::cli::Cli;
use hashmatch::error::ExitCode;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_run_app_completes_with_missing_manifests() {
    let root = tempdir().unwrap();
    let dir = root.path().join("C");
    fs::create_dir(&dir).unwrap();

    let cli = Cli::try_parse_from(["hashmatch", "-q", dir.to_str().unwrap()]).unwrap();
    let code = hashmatch::run_app(cli).unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_run_app_json_output() {
    let root = tempdir().unwrap();
    fs::write(root.path().join(".hashcheck"), "h 1 ./a\nh 1 ./b\n").unwrap();

    let cli = Cli::try_parse_from([
        "hashmatch",
        "-q",
        "--output",
        "json",
        root.path().to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(hashmatch::run_app(cli).unwrap(), ExitCode::Success);
}

#[test]
fn test_run_app_strict_failure_is_general_error() {
    let root = tempdir().unwrap();
    fs::write(root.path().join(".hashcheck"), "notarecord\n").unwrap();

    let cli = Cli::try_parse_from([
        "hashmatch",
        "-q",
        "--strict",
        "-o",
        "csv",
        root.path().to_str().unwrap(),
    ])
    .unwrap();
    let err = hashmatch::run_app(cli).unwrap_err();
    assert_eq!(hashmatch::error::exit_code_for(&err), ExitCode::GeneralError);
}
