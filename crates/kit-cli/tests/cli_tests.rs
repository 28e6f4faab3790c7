//! End-to-end CLI tests driving the `kit` binary

use assert_cmd::Command;
use kit_test_utils::TempTree;
use predicates::prelude::*;

fn kit() -> Command {
    let mut cmd = Command::cargo_bin("kit").unwrap();
    // Keep the ambient environment out of the tests.
    cmd.env_remove("KIT_HOME");
    cmd
}

fn standard_source() -> TempTree {
    let source = TempTree::new();
    source.write_manifest(&["scripts/**"], &["settings/**"]);
    source.write_file("flows/ci.yaml", "flow v1");
    source.write_file("scripts/release.sh", "internal tooling");
    source.write_file("settings/local.json", "{}");
    source
}

#[test]
fn sync_distributes_into_target() {
    let source = standard_source();
    let target = TempTree::new();

    kit()
        .args(["sync", "--source"])
        .arg(source.root())
        .arg(target.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("flows/ci.yaml"))
        .stdout(predicate::str::contains("Sync complete"));

    target.assert_file_exists("flows/ci.yaml");
    target.assert_file_not_exists("scripts/release.sh");
    target.assert_file_not_exists("settings/local.json");
}

#[test]
fn sync_source_comes_from_the_environment() {
    let source = standard_source();
    let target = TempTree::new();

    kit()
        .env("KIT_HOME", source.root())
        .arg("sync")
        .arg(target.root())
        .assert()
        .success();

    target.assert_file_exists("flows/ci.yaml");
}

#[test]
fn sync_without_source_is_an_argument_error() {
    let target = TempTree::new();

    kit().arg("sync").arg(target.root()).assert().failure();
}

#[test]
fn sync_dry_run_writes_nothing() {
    let source = standard_source();
    let target = TempTree::new();

    kit()
        .args(["sync", "--dry-run", "--source"])
        .arg(source.root())
        .arg(target.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write"));

    target.assert_file_not_exists("flows/ci.yaml");
    target.assert_file_not_exists(".kit/ledger.toml");
}

#[test]
fn sync_reports_conflicts_and_keeps_local_edits() {
    let source = standard_source();
    let target = TempTree::new();

    kit()
        .args(["sync", "--source"])
        .arg(source.root())
        .arg(target.root())
        .assert()
        .success();

    target.write_file("flows/ci.yaml", "flow v1 + local tweak");
    source.write_file("flows/ci.yaml", "flow v2");

    kit()
        .args(["sync", "--source"])
        .arg(source.root())
        .arg(target.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Conflict"))
        .stdout(predicate::str::contains("kept local"));

    assert_eq!(
        target.read_to_string("flows/ci.yaml"),
        "flow v1 + local tweak"
    );
}

#[test]
fn sync_strict_fails_on_conflict() {
    let source = standard_source();
    let target = TempTree::new();
    target.write_file("flows/ci.yaml", "hand-rolled flow");

    kit()
        .args(["sync", "--strict", "--source"])
        .arg(source.root())
        .arg(target.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("conflict"));
}

#[test]
fn sync_rejects_missing_target() {
    let source = standard_source();

    kit()
        .args(["sync", "--source"])
        .arg(source.root())
        .arg("/definitely/not/a/real/path")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target directory does not exist"));
}

#[test]
fn sync_rejects_malformed_manifest_pattern() {
    let source = TempTree::new();
    source.write_file(
        ".kit-manifest.json",
        r#"{"internal": ["broken["], "init_only": []}"#,
    );
    let target = TempTree::new();

    kit()
        .args(["sync", "--source"])
        .arg(source.root())
        .arg(target.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern"));
}

#[test]
fn push_dry_run_prints_the_plan_without_git() {
    let upstream = standard_source();
    let consumer = TempTree::new();
    consumer.write_file("flows/ci.yaml", "flow v1 improved");

    kit()
        .current_dir(consumer.root())
        .args(["push", "--dry-run", "--upstream"])
        .arg(upstream.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("flows/ci.yaml"))
        .stdout(predicate::str::contains("modified"))
        .stdout(predicate::str::contains("would be pushed"));
}

#[test]
fn push_dry_run_enumerates_drops() {
    let upstream = standard_source();
    let consumer = TempTree::new();
    consumer.write_file("flows/ci.yaml", "flow v1");
    consumer.write_file("settings/local.json", r#"{"local": true}"#);

    kit()
        .current_dir(consumer.root())
        .args(["push", "--dry-run", "--upstream"])
        .arg(upstream.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"))
        .stdout(predicate::str::contains("init-only"))
        .stdout(predicate::str::contains("Nothing to push"));
}

#[test]
fn push_exclude_drops_candidates() {
    let upstream = standard_source();
    let consumer = TempTree::new();
    consumer.write_file("flows/ci.yaml", "flow v1 improved");

    kit()
        .current_dir(consumer.root())
        .args(["push", "--dry-run", "--exclude", "flows/**", "--upstream"])
        .arg(upstream.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("excluded"))
        .stdout(predicate::str::contains("Nothing to push"));
}

#[test]
fn completions_emit_a_script() {
    kit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kit"));
}
