use assert_cmd::Command;
use predicates::prelude::*;

// All of these run against the simulated bank: the default build has no
// `raspi` feature, so no GPIO is touched.

#[test]
fn stop_prints_the_status_string() {
    Command::cargo_bin("rover")
        .unwrap()
        .args(["stop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Motor stopped"));
}

#[test]
fn stop_with_json_prints_a_tagged_outcome() {
    Command::cargo_bin("rover")
        .unwrap()
        .args(["stop", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"stopped\""));
}

#[test]
fn zero_distance_drive_completes_immediately() {
    Command::cargo_bin("rover")
        .unwrap()
        .args(["drive", "forward", "--distance", "0", "--speed", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Moved forward for 0 meters at 100% speed",
        ));
}

#[test]
fn unknown_camera_direction_fails() {
    Command::cargo_bin("rover")
        .unwrap()
        .args(["camera", "up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid camera direction"));
}

#[test]
fn out_of_range_spray_angle_fails() {
    Command::cargo_bin("rover")
        .unwrap()
        .args(["spray", "aim", "--angle", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn overspeed_drive_fails_validation() {
    Command::cargo_bin("rover")
        .unwrap()
        .args(["drive", "forward", "--distance", "1", "--speed", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("speed 101% out of range"));
}
