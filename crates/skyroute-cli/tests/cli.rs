use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const CORRIDOR: &str = r#"{
    "nodes": ["S1", "C1", "T1"],
    "edges": [["S1", "C1", 9.0], ["C1", "T1", 9.0]]
}"#;

fn network_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(CORRIDOR.as_bytes()).expect("write network");
    file
}

#[test]
fn route_prints_the_planned_path() {
    let network = network_file();
    Command::cargo_bin("skyroute-cli")
        .expect("binary")
        .args(["--network"])
        .arg(network.path())
        .args(["route", "--from", "S1", "--to", "T1", "--capacity", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S1 -> C1 -> T1"))
        .stdout(predicate::str::contains("Charging stops: C1"))
        .stdout(predicate::str::contains("recharged"));
}

#[test]
fn route_emits_json_when_requested() {
    let network = network_file();
    Command::cargo_bin("skyroute-cli")
        .expect("binary")
        .args(["--network"])
        .arg(network.path())
        .args([
            "route", "--from", "S1", "--to", "T1", "--capacity", "10", "--format", "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"route_id\": \"R1\""))
        .stdout(predicate::str::contains("\"frequency\": 1"));
}

#[test]
fn unknown_node_fails_with_a_clear_message() {
    let network = network_file();
    Command::cargo_bin("skyroute-cli")
        .expect("binary")
        .args(["--network"])
        .arg(network.path())
        .args(["route", "--from", "X", "--to", "T1", "--capacity", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node: X"));
}

#[test]
fn insufficient_capacity_reports_no_viable_path() {
    let network = network_file();
    Command::cargo_bin("skyroute-cli")
        .expect("binary")
        .args(["--network"])
        .arg(network.path())
        .args(["route", "--from", "S1", "--to", "T1", "--capacity", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no viable path"));
}

#[test]
fn simulate_ranks_repeated_routes() {
    let network = network_file();
    let mut deliveries = NamedTempFile::new().expect("temp file");
    deliveries
        .write_all(br#"[["S1", "T1"], ["S1", "T1"], ["S1", "C1"]]"#)
        .expect("write deliveries");

    Command::cargo_bin("skyroute-cli")
        .expect("binary")
        .args(["--network"])
        .arg(network.path())
        .args(["simulate", "--capacity", "10", "--deliveries"])
        .arg(deliveries.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("freq 2"))
        .stdout(predicate::str::contains("2 unique routes, 3 trips"));
}
