use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "2023-01-01T12:00:00.000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Initialized repository with one commit on main holding `1.txt` and `a/2.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_sit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two\n".to_string(),
    ));

    run_sit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    sit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_sit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sit").expect("Failed to find sit binary");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("SIT_LOG");
    cmd.env_remove("SIT_EXCLUDE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn sit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_sit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("SIT_AUTHOR_NAME", AUTHOR_NAME),
        ("SIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("SIT_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd
}

/// Stdout of a successful command
pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is not utf-8")
}

/// Current HEAD commit id, following a branch reference
pub fn head_commit_id(dir: &Path) -> Option<String> {
    let head = crate::common::read_head(dir);

    match head.trim().strip_prefix("ref: refs/heads/") {
        Some(branch) => crate::common::read_branch(dir, branch),
        None => Some(head.trim().to_string()),
    }
}
