use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn write_text(path: &Path, txt: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, txt).expect("write text");
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_templkit-copy"))
        .args(args)
        .env_remove("TEMPLKIT_SOURCE")
        .env("RUST_LOG", "off")
        .stdin(Stdio::null())
        .output()
        .expect("spawn templkit-copy")
}

fn template(tmp: &TempDir) -> String {
    let src = tmp.path().join("template");
    write_text(&src.join("README.md"), "guide");
    write_text(&src.join("CLAUDE.md"), "rules");
    write_text(&src.join("dist/bundle.js"), "js");
    src.to_string_lossy().into_owned()
}

#[test]
fn missing_target_exits_with_failure() {
    let tmp = TempDir::new().expect("tempdir");
    let src = template(&tmp);
    let dst = tmp.path().join("nope");

    let output = run_cli(&[dst.to_str().expect("utf8"), "--source", &src, "--force"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
    assert!(!dst.exists());
}

#[test]
fn forced_run_copies_and_prints_summary() {
    let tmp = TempDir::new().expect("tempdir");
    let src = template(&tmp);
    let dst = tmp.path().join("project");
    std::fs::create_dir_all(&dst).expect("mkdir");

    let output = run_cli(&[dst.to_str().expect("utf8"), "--source", &src, "--force"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[OK] Copied 2 files"));
    assert!(stdout.contains("[SKIP] Skipped 1 files"));
    assert!(dst.join("README_TEMPLATE.md").exists());
    assert!(dst.join("MIGRATION_ANALYSIS.md").exists());
    assert!(!dst.join("dist").exists());
}

#[test]
fn non_interactive_prompt_declines_and_leaves_target() {
    let tmp = TempDir::new().expect("tempdir");
    let src = template(&tmp);
    let dst = tmp.path().join("empty");
    std::fs::create_dir_all(&dst).expect("mkdir");

    let output = run_cli(&[dst.to_str().expect("utf8"), "--source", &src]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Migration cancelled."));
    assert_eq!(std::fs::read_dir(&dst).expect("read dir").count(), 0);
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = TempDir::new().expect("tempdir");
    let src = template(&tmp);
    let dst = tmp.path().join("project");
    std::fs::create_dir_all(&dst).expect("mkdir");

    let output = run_cli(&[
        dst.to_str().expect("utf8"),
        "--source",
        &src,
        "--force",
        "--dry-run",
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Dry run"));
    assert_eq!(std::fs::read_dir(&dst).expect("read dir").count(), 0);
}
