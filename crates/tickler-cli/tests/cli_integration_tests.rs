use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn tickler() -> Command {
    Command::cargo_bin("tickler").expect("binary builds")
}

#[test]
fn test_preview_daily_window() {
    tickler()
        .args([
            "preview",
            "2024-01-01T09:00:00Z",
            "--cadence",
            "daily",
            "--timezone",
            "UTC",
            "--from",
            "2024-01-01T00:00:00Z",
            "--until",
            "2024-01-04T00:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01 09:00:00"))
        .stdout(predicate::str::contains("3 occurrence(s)"));
}

#[test]
fn test_preview_rejects_unknown_cadence() {
    tickler()
        .args(["preview", "2024-01-01T09:00:00Z", "--cadence", "fortnightly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid cadence"));
}

#[test]
fn test_preview_monthly_clamps_leap_day() {
    tickler()
        .args([
            "preview",
            "2024-01-31T09:00:00Z",
            "--cadence",
            "monthly",
            "--timezone",
            "UTC",
            "--from",
            "2024-02-01T00:00:00Z",
            "--until",
            "2024-03-01T00:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-29 09:00:00"));
}

#[test]
fn test_tz_info() {
    tickler()
        .args(["tz", "America/New_York"])
        .assert()
        .success()
        .stdout(predicate::str::contains("America/New_York"))
        .stdout(predicate::str::contains("UTC offset"));
}

#[test]
fn test_tz_rejects_unknown_zone() {
    tickler()
        .args(["tz", "Mars/Olympus_Mons"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn test_sweep_schedules_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    let reminders = serde_json::json!([
        {
            "id": "6dfb9a0f-9d4a-4f5e-8c51-818183a24c2a",
            "user_id": "0d3cf8f4-51a3-4d5c-a8a7-0c5f5da11c4e",
            "title": "Hydrate",
            "body": "Drink some water",
            "scheduled_at": "2024-06-01T12:00:00Z",
            "timezone": "UTC",
            "recurrence": { "cadence": "daily", "interval": 1 },
            "is_deleted": false,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }
    ]);
    write!(file, "{}", reminders).expect("write reminders");

    tickler()
        .args([
            "sweep",
            file.path().to_str().unwrap(),
            "--at",
            "2024-06-01T12:00:00Z",
            "--fire",
        ])
        .env("TICKLER_DEFAULT_TIMEZONE", "UTC")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 job(s) scheduled"))
        .stdout(predicate::str::contains("Hydrate"))
        .stdout(predicate::str::contains("Fired 1 job(s)"));
}

#[test]
fn test_sweep_missing_file_errors() {
    tickler()
        .args(["sweep", "/nonexistent/reminders.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read reminder file"));
}
