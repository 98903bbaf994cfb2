use crate::common::command::{
    head_commit_id, init_repository_dir, run_sit_command, sit_commit, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

mod common;

fn commit_change(dir: &std::path::Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    run_sit_command(dir, &["add", file]).assert().success();
    sit_commit(dir, message).assert().success();
}

/// `feature` is one commit ahead of `main`, with HEAD back on main
#[fixture]
fn repository_with_feature(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir;
    run_sit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_sit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_change(dir.path(), "1.txt", "feature\n", "Feature work");
    run_sit_command(dir.path(), &["checkout", "main"])
        .assert()
        .success();
    dir
}

#[rstest]
fn fast_forward_then_already_up_to_date(repository_with_feature: TempDir) {
    let dir = repository_with_feature;
    let from = head_commit_id(dir.path()).unwrap();
    let to = common::read_branch(dir.path(), "feature").unwrap();

    assert_eq!(
        stdout_of(run_sit_command(dir.path(), &["merge", "feature"])),
        format!("Updating {}..{}\nFast-forward\n", &from[..7], &to[..7])
    );
    assert_eq!(common::read_branch(dir.path(), "main"), Some(to));
    assert_eq!(common::read_head(dir.path()), "ref: refs/heads/main\n");
    assert_eq!(read_file(&dir.path().join("1.txt")), "feature\n");
    assert_eq!(
        stdout_of(run_sit_command(dir.path(), &["status", "--porcelain"])),
        ""
    );

    run_sit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout("Already up to date.\n");
}

#[rstest]
fn merging_an_older_tip_is_refused(repository_with_feature: TempDir) {
    let dir = repository_with_feature;
    run_sit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    let before = common::read_branch(dir.path(), "feature");

    run_sit_command(dir.path(), &["merge", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-fast-forward"));

    assert_eq!(common::read_branch(dir.path(), "feature"), before);
}

#[rstest]
fn diverged_branches_are_refused_unchanged(repository_with_feature: TempDir) {
    let dir = repository_with_feature;
    commit_change(dir.path(), "a/2.txt", "main side\n", "Main work");
    let main_before = common::read_branch(dir.path(), "main");
    let feature_before = common::read_branch(dir.path(), "feature");
    let index_before = common::read_index(dir.path());

    run_sit_command(dir.path(), &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-fast-forward merges are not supported"));

    assert_eq!(common::read_branch(dir.path(), "main"), main_before);
    assert_eq!(common::read_branch(dir.path(), "feature"), feature_before);
    assert_eq!(common::read_index(dir.path()), index_before);
    assert_eq!(read_file(&dir.path().join("1.txt")), "one\n");
    assert_eq!(read_file(&dir.path().join("a").join("2.txt")), "main side\n");
}

#[rstest]
fn unknown_branch_is_refused(init_repository_dir: TempDir) {
    run_sit_command(init_repository_dir.path(), &["merge", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch 'ghost' not found"));
}

#[rstest]
fn missing_blob_warns_on_stderr_and_fast_forward_completes(repository_with_feature: TempDir) {
    let dir = repository_with_feature;
    let to = common::read_branch(dir.path(), "feature").unwrap();
    let record = std::fs::read_to_string(dir.path().join(".sit").join("commits").join(&to)).unwrap();
    let (_, digest) = record
        .lines()
        .find(|line| line.starts_with("1.txt:"))
        .and_then(|line| line.rsplit_once(':'))
        .unwrap();
    std::fs::remove_file(dir.path().join(".sit").join("objects").join(digest)).unwrap();

    run_sit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Fast-forward\n"))
        .stderr(predicate::str::contains("warning: could not restore 1.txt"));

    assert_eq!(common::read_branch(dir.path(), "main"), Some(to));
    assert_eq!(read_file(&dir.path().join("1.txt")), "one\n");
}
