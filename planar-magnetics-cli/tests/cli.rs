//! End-to-end tests driving the `plm` binary.

use assert_cmd::Command;
use assert_fs::prelude::*;

use predicates::prelude::*;

const SPIRAL_DESIGN: &str = r#"{
    "at": {"x": 0.0, "y": 0.0},
    "inner_radius": 0.010,
    "outer_radius": 0.020,
    "num_turns": 2.4,
    "spacing": 0.0005
}"#;

const CFFC_DESIGN: &str = r#"{
    "at": {"x": 0.110, "y": 0.110},
    "inner_radius": 0.010,
    "outer_radius": 0.015,
    "number_turns": 4
}"#;

fn plm() -> Command {
    Command::cargo_bin("plm").expect("binary builds")
}

#[test]
fn spiral_prints_kicad_to_stdout() {
    let dir = assert_fs::TempDir::new().unwrap();
    let design = dir.child("spiral.json");
    design.write_str(SPIRAL_DESIGN).unwrap();

    plm()
        .arg("spiral")
        .arg("--params")
        .arg(design.path())
        .args(["--copper-weight", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated DCR"))
        .stdout(predicate::str::contains("(gr_poly"));
}

#[test]
fn cffc_writes_a_dxf_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    let design = dir.child("winding.json");
    design.write_str(CFFC_DESIGN).unwrap();
    let output = dir.child("winding.dxf");

    plm()
        .arg("cffc")
        .arg("--params")
        .arg(design.path())
        .arg("--output")
        .arg(output.path())
        .args(["--format", "dxf", "--stackup", "2,1,1,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated DCR"));

    let document = std::fs::read_to_string(output.path()).unwrap();
    assert!(document.contains("LWPOLYLINE"));
    assert!(document.ends_with("EOF\n"));
}

#[test]
fn existing_outputs_are_not_overwritten() {
    let dir = assert_fs::TempDir::new().unwrap();
    let design = dir.child("spiral.json");
    design.write_str(SPIRAL_DESIGN).unwrap();
    let output = dir.child("spiral.kicad");
    output.write_str("precious").unwrap();

    plm()
        .arg("spiral")
        .arg("--params")
        .arg(design.path())
        .arg("--output")
        .arg(output.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--overwrite"));

    output.assert("precious");

    plm()
        .arg("spiral")
        .arg("--params")
        .arg(design.path())
        .arg("--output")
        .arg(output.path())
        .arg("--overwrite")
        .assert()
        .success();
}

#[test]
fn invalid_designs_are_reported() {
    let dir = assert_fs::TempDir::new().unwrap();
    let design = dir.child("spiral.json");
    design.write_str(r#"{"at": {"x": 0.0, "y": 0.0}}"#).unwrap();

    plm()
        .arg("spiral")
        .arg("--params")
        .arg(design.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid design parameters"));
}

#[test]
fn check_changelog_accepts_the_project_changelog() {
    plm()
        .arg("check-changelog")
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/../CHANGELOG.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("valid changelog"))
        .stdout(predicate::str::contains("v0.1.0"));
}

#[test]
fn check_changelog_rejects_out_of_order_versions() {
    let dir = assert_fs::TempDir::new().unwrap();
    let changelog = dir.child("CHANGELOG.md");
    changelog
        .write_str("## [v0.1.0]\n\n### Fixed\n\n- a fix\n\n## [v0.2.0]\n")
        .unwrap();

    plm()
        .arg("check-changelog")
        .arg(changelog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("newest first"));
}
