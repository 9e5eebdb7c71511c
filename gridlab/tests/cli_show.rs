//! CLI tests for `gridlab show` and `gridlab score`.
//!
//! Spawns the gridlab binary and verifies stdout and exit codes for valid
//! solutions, out-of-range seeks, and invalid solutions.

use std::process::Command;

use gridlab::exit_codes;
use gridlab::test_support::{Fixture, two_by_two};

fn gridlab() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gridlab"))
}

#[test]
fn show_prints_state_at_requested_time() {
    let fixture = Fixture::new(&two_by_two());
    let solution = fixture.solution("output.txt", "1\n0 0 0\n");

    let output = gridlab()
        .current_dir(fixture.path())
        .arg("show")
        .arg(&fixture.instance_path)
        .arg("--solution")
        .arg(&solution)
        .args(["--time", "0"])
        .output()
        .expect("gridlab show");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.starts_with("time: 0/1\nsse: 64\n"), "{stdout}");
    assert!(stdout.contains("active_op: none\nactive: none\n"));
    assert!(stdout.ends_with("grid:\n1 2\n3 4\n"));
}

#[test]
fn show_past_end_exits_out_of_range() {
    let fixture = Fixture::new(&two_by_two());
    let solution = fixture.solution("output.txt", "1\n0 0 0\n");

    let status = gridlab()
        .current_dir(fixture.path())
        .arg("show")
        .arg(&fixture.instance_path)
        .arg("--solution")
        .arg(&solution)
        .args(["--time", "2"])
        .status()
        .expect("gridlab show");

    assert_eq!(status.code(), Some(exit_codes::OUT_OF_RANGE));
}

#[test]
fn score_prints_score_for_solved_instance() {
    let fixture = Fixture::new(&two_by_two());
    let solution = fixture.solution("output.txt", "1\n0 0 0\n");

    let output = gridlab()
        .current_dir(fixture.path())
        .arg("score")
        .arg(&fixture.instance_path)
        .arg(&solution)
        .output()
        .expect("gridlab score");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        String::from_utf8(output.stdout).expect("utf8"),
        "score: 800000000\nsse: 0\napplied: 1\n"
    );
}

#[test]
fn score_rejects_out_of_bounds_placement() {
    let fixture = Fixture::new(&two_by_two());
    let solution = fixture.solution("output.txt", "1\n0 0 1\n");

    let output = gridlab()
        .current_dir(fixture.path())
        .arg("score")
        .arg(&fixture.instance_path)
        .arg(&solution)
        .output()
        .expect("gridlab score");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(output.stdout.is_empty());
}
