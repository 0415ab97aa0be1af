//! Exit status and side effects of the `rar_threshold` binary

use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rar_threshold"))
        .current_dir(dir)
        .output()
        .expect("failed to launch rar_threshold")
}

#[test]
fn missing_columns_exit_with_status_1_and_no_figure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("SPARC_summary.csv"),
        "galaxy,radius,f_dm\nNGC 1,3.0,0.5\n",
    )
    .unwrap();

    let output = run_in(dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Expected Sigma columns"), "{stderr}");
    assert!(stderr.contains("\"radius\""), "{stderr}");
    assert!(!dir.path().join("RAR_threshold.pdf").exists());
}

#[test]
fn missing_file_exit_with_status_1_and_no_figure() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SPARC_summary.csv"), "{stderr}");
    assert!(!dir.path().join("RAR_threshold.pdf").exists());
}
