use super::*;
use std::fs;

use tempfile::tempdir;

use crate::gateway::OfflineGateway;
use crate::gateway::testing::{ScriptedGateway, assessment};

fn options(max_files: usize) -> ScanOptions {
    ScanOptions {
        extensions: vec![".py".to_string()],
        max_files,
        focus: Vec::new(),
        workers: 2,
    }
}

#[test]
fn missing_root_is_invalid_directory() {
    let dir = tempdir().unwrap();
    let err = scan_directory(&dir.path().join("nope"), &options(50), &OfflineGateway).unwrap_err();
    assert!(matches!(err, error::Error::InvalidDirectory(_)));
    assert!(err.to_string().contains("nope"), "should name the directory, got: {err}");
}

#[test]
fn file_root_is_invalid_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.py");
    fs::write(&file, "x = 1\n").unwrap();
    let err = scan_directory(&file, &options(50), &OfflineGateway).unwrap_err();
    assert!(matches!(err, error::Error::InvalidDirectory(_)));
}

#[test]
fn empty_directory_is_empty_result() {
    let dir = tempdir().unwrap();
    let result = scan_directory(dir.path(), &options(50), &OfflineGateway).unwrap();
    assert_eq!(result.file_count, 0);
    assert!(result.files.is_empty());
}

#[test]
fn auth_referenced_by_two_files_offline() {
    let dir = tempdir().unwrap();
    let auth: String = (0..50).map(|i| format!("line_{i} = {i}\n")).collect();
    fs::write(dir.path().join("auth.py"), auth).unwrap();
    fs::write(dir.path().join("views.py"), "from auth import login\n").unwrap();
    fs::write(dir.path().join("api.py"), "import auth\n").unwrap();

    let result = scan_directory(dir.path(), &options(50), &OfflineGateway).unwrap();
    assert_eq!(result.file_count, 3);

    let auth = &result.files[0];
    assert_eq!(auth.relative_path, "auth.py");
    assert_eq!(auth.reference_weight, 2);
    assert_eq!(auth.line_count, 50);
    assert_eq!(auth.risk_score, 30.0);
    assert_eq!(auth.blast_radius, "Imported by 2 module(s)");
    assert!(auth.path.is_absolute());
}

#[test]
fn file_count_is_capped() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        fs::write(dir.path().join(format!("m{i}.py")), "x\n".repeat(i + 1)).unwrap();
    }
    let result = scan_directory(dir.path(), &options(3), &OfflineGateway).unwrap();
    assert_eq!(result.file_count, 3);
    let mut names: Vec<&str> = result.files.iter().map(|f| f.relative_path.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["m2.py", "m3.py", "m4.py"], "largest files are kept");
}

#[test]
fn scores_stay_in_range() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("core.py"), "x\n".repeat(2000)).unwrap();
    for i in 0..12 {
        fs::write(dir.path().join(format!("user{i}.py")), "import core\n").unwrap();
    }
    let result = scan_directory(dir.path(), &options(50), &OfflineGateway).unwrap();
    assert!(
        result
            .files
            .iter()
            .all(|f| (0.0..=100.0).contains(&f.risk_score))
    );
    assert_eq!(result.files[0].relative_path, "core.py");
    assert_eq!(result.files[0].risk_score, 100.0);
}

#[test]
fn focus_paths_are_flagged() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "x\n").unwrap();
    fs::write(dir.path().join("b.py"), "x\n").unwrap();
    let mut opts = options(50);
    opts.focus = vec![dir.path().join("b.py")];

    let result = scan_directory(dir.path(), &opts, &OfflineGateway).unwrap();
    let b = result.files.iter().find(|f| f.relative_path == "b.py").unwrap();
    assert!(b.is_focus);
    assert_eq!(result.files.iter().filter(|f| f.is_focus).count(), 1);
}

#[test]
fn gateway_scores_are_used() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "x\n").unwrap();
    let gw = ScriptedGateway::new().with_risk(|_| Ok(vec![assessment(0, 81.234, "hidden state")]));
    let result = scan_directory(dir.path(), &options(50), &gw).unwrap();
    assert_eq!(result.files[0].risk_score, 81.23);
    assert_eq!(result.files[0].risk_factors, vec!["hidden state"]);
}

#[test]
fn run_json_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "x\n").unwrap();
    assert!(run(dir.path(), true, 20, &options(50), &OfflineGateway).is_ok());
}

#[test]
fn run_table_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "x\n").unwrap();
    assert!(run(dir.path(), false, 20, &options(50), &OfflineGateway).is_ok());
}
