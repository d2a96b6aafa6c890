use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DAY: &str = "2099-03-14";

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and a test database
fn salon_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("salon").expect("Failed to find salon binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path.to_str().unwrap());
    cmd
}

/// Registers one employee (ID 1) and one 60 minute service (ID 1).
fn seed_catalog(db_path: &Path) {
    salon_cmd(db_path)
        .args(["employee", "add", "Bia", "--phone", "555-0100"])
        .assert()
        .success();
    salon_cmd(db_path)
        .args(["service", "add", "Coloring", "--duration", "60", "--price", "80"])
        .assert()
        .success();
}

fn book(db_path: &Path, start: &str, phone: &str) -> assert_cmd::assert::Assert {
    salon_cmd(db_path)
        .args([
            "appointment",
            "book",
            "1",
            "1",
            DAY,
            start,
            "--client-name",
            "Ana",
            "--client-phone",
            phone,
        ])
        .assert()
}

#[test]
fn test_cli_add_service() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    salon_cmd(&db_path)
        .args(["service", "add", "Haircut", "--duration", "45", "--price", "35.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created service with ID: 1"))
        .stdout(predicate::str::contains("45 min"))
        .stdout(predicate::str::contains("35.50"));
}

#[test]
fn test_cli_rejects_malformed_price() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    salon_cmd(&db_path)
        .args(["service", "add", "Haircut", "--duration", "45", "--price", "35.555"])
        .assert()
        .failure();
}

#[test]
fn test_cli_book_and_show_appointment() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_catalog(&db_path);

    book(&db_path, "14:00", "555-0001")
        .success()
        .stdout(predicate::str::contains("Created appointment with ID: 1"))
        .stdout(predicate::str::contains("14:00-15:00"))
        .stdout(predicate::str::contains("80.00"));

    salon_cmd(&db_path)
        .args(["appointment", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Coloring"));
}

#[test]
fn test_cli_overlapping_booking_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_catalog(&db_path);

    book(&db_path, "14:00", "555-0001").success();
    book(&db_path, "14:30", "555-0002")
        .failure()
        .stderr(predicate::str::contains("Failed to book appointment"))
        .stderr(predicate::str::contains("appointment 1"));

    // Back to back is fine.
    book(&db_path, "15:00", "555-0002").success();
}

#[test]
fn test_cli_available_slots_skip_booked_time() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_catalog(&db_path);
    book(&db_path, "14:00", "555-0001").success();

    salon_cmd(&db_path)
        .args(["appointment", "available", "1", DAY, "--service-id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- 13:00-14:00"))
        .stdout(predicate::str::contains("- 15:00-16:00"))
        .stdout(predicate::str::contains("- 13:30-14:30").not())
        .stdout(predicate::str::contains("- 14:30-15:30").not());
}

#[test]
fn test_cli_available_slots_unknown_employee() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    salon_cmd(&db_path)
        .args(["appointment", "available", "42", DAY])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Employee with ID 42 not found"));
}

#[test]
fn test_cli_slot_generation_is_idempotent() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_catalog(&db_path);

    let generate = |expected: &'static str| {
        salon_cmd(&db_path)
            .args([
                "slot",
                "generate",
                DAY,
                DAY,
                "--employees",
                "1",
                "--day-start",
                "09:00",
                "--day-end",
                "12:00",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    };
    generate("Created 6 of 6 slot(s)");
    generate("Created 0 of 6 slot(s)");

    book(&db_path, "10:00", "555-0001").success();
    salon_cmd(&db_path)
        .args(["slot", "list", "1", DAY])
        .assert()
        .success()
        .stdout(predicate::str::contains("- 10:00-10:30 ● taken"))
        .stdout(predicate::str::contains("- 09:00-09:30 ○ free"));
}

#[test]
fn test_cli_status_transitions_update_client() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_catalog(&db_path);
    book(&db_path, "14:00", "555-0001").success();

    salon_cmd(&db_path)
        .args(["appointment", "status", "1", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Visit recorded for client 1"));

    salon_cmd(&db_path)
        .args(["client", "find", "555-0001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Visits**: 1"))
        .stdout(predicate::str::contains("**Total spent**: 80.00"));
}

#[test]
fn test_cli_find_unknown_client() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    salon_cmd(&db_path)
        .args(["client", "find", "555-9999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No client with phone 555-9999"));
}

#[test]
fn test_cli_list_filters_by_client() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_catalog(&db_path);
    book(&db_path, "09:00", "555-0001").success();
    salon_cmd(&db_path)
        .args([
            "appointment",
            "book",
            "1",
            "1",
            DAY,
            "11:00",
            "--client-name",
            "Carla",
            "--client-phone",
            "555-0002",
        ])
        .assert()
        .success();

    salon_cmd(&db_path)
        .args(["appointment", "list", "--client", "carla"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carla"))
        .stdout(predicate::str::contains("Page 1 of 1 (1 appointment(s)"));
}

#[test]
fn test_cli_delete_frees_time() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_catalog(&db_path);
    book(&db_path, "14:00", "555-0001").success();

    salon_cmd(&db_path)
        .args(["appointment", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted appointment Coloring"));

    book(&db_path, "14:30", "555-0002").success();
}

#[test]
fn test_cli_invalid_business_hours() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    salon_cmd(&db_path)
        .args(["--opening", "18:00", "--closing", "08:00", "service", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid business hours"));
}

#[test]
fn test_cli_default_command_shows_upcoming() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_catalog(&db_path);
    book(&db_path, "14:00", "555-0001").success();

    salon_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Upcoming appointments"))
        .stdout(predicate::str::contains("Coloring"));
}
