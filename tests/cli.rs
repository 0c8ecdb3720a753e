use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn schedulo_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("schedulo");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[storage]
path = '{}/data/storage.dat'

[logging]
filter = "warn"
"#,
        root.display()
    );

    let config_path = config_dir.join("schedulo.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_schedulo(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = schedulo_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("SCHEDULO_PASSWORD")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run schedulo binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn storage_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("data/storage.dat")
}

#[test]
fn test_status_without_data() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_schedulo(&config_path, &["status"]);
    assert!(success, "status failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("no data yet"));
}

#[test]
fn test_seed_then_status() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_schedulo(&config_path, &["--password", "password", "seed"]);
    assert!(success, "seed failed: stdout={}, stderr={}", stdout, stderr);
    assert!(storage_path(&config_path).is_file());

    let (stdout, _, success) = run_schedulo(&config_path, &["status"]);
    assert!(success);
    assert!(stdout.contains("present"));
    assert!(stdout.contains("SHA-256"));
}

#[test]
fn test_seed_refuses_to_overwrite() {
    let (_tmp, config_path) = setup_test_env();

    run_schedulo(&config_path, &["--password", "password", "seed"]);
    let (_, stderr, success) = run_schedulo(&config_path, &["--password", "password", "seed"]);
    assert!(!success);
    assert!(stderr.contains("--force"));

    let (_, _, success) =
        run_schedulo(&config_path, &["--password", "password", "seed", "--force"]);
    assert!(success);
}

#[test]
fn test_check_password() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success) = run_schedulo(&config_path, &["--password", "password", "check"]);
    assert!(!success, "check must fail without a storage file");

    run_schedulo(&config_path, &["--password", "password", "seed"]);

    let (stdout, _, success) = run_schedulo(&config_path, &["--password", "password", "check"]);
    assert!(success);
    assert!(stdout.contains("Password OK"));

    let (_, stderr, success) = run_schedulo(&config_path, &["--password", "wrong", "check"]);
    assert!(!success);
    assert!(stderr.contains("wrong password or corrupted file"));
}

#[test]
fn test_password_required() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_schedulo(&config_path, &["summary"]);
    assert!(!success);
    assert!(stderr.contains("SCHEDULO_PASSWORD"));
}

#[test]
fn test_password_from_env() {
    let (_tmp, config_path) = setup_test_env();

    let output = Command::new(schedulo_binary())
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .arg("seed")
        .env("SCHEDULO_PASSWORD", "from-env")
        .output()
        .unwrap();
    assert!(output.status.success());

    let (_, _, success) = run_schedulo(&config_path, &["--password", "from-env", "check"]);
    assert!(success);
}

#[test]
fn test_show_prints_document() {
    let (_tmp, config_path) = setup_test_env();

    run_schedulo(&config_path, &["--password", "password", "seed"]);
    let (stdout, stderr, success) = run_schedulo(&config_path, &["--password", "password", "show"]);
    assert!(success, "show failed: stderr={}", stderr);

    let document: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    for key in ["Semesters", "Catalog", "Courses", "StudentCalendar", "MoodReports"] {
        assert!(document.get(key).is_some(), "missing section {}", key);
    }
    assert_eq!(document["Catalog"][0]["prefix"], "CSE");
    assert_eq!(document["Courses"]["Fall 2024"][0]["crn"], 80471);
}

#[test]
fn test_summary_counts() {
    let (_tmp, config_path) = setup_test_env();

    run_schedulo(&config_path, &["--password", "password", "seed"]);
    let (stdout, stderr, success) =
        run_schedulo(&config_path, &["--password", "password", "summary"]);
    assert!(success, "summary failed: stderr={}", stderr);
    assert!(stdout.contains("Catalog:     1"));
    assert!(stdout.contains("Courses:     1"));
    assert!(stdout.contains("Events:      2"));
    assert!(stdout.contains("Moods:       1"));
    assert!(stdout.contains("Fall 2024"));
}

#[test]
fn test_mood_adds_and_replaces() {
    let (_tmp, config_path) = setup_test_env();

    let args = [
        "--password",
        "password",
        "mood",
        "2024-11-02",
        "--scale",
        "4",
        "--source",
        "social",
        "--entry",
        "Long week.",
    ];
    let (stdout, stderr, success) = run_schedulo(&config_path, &args);
    assert!(success, "mood failed: stderr={}", stderr);
    assert!(stdout.contains("Recorded"));

    let (stdout, _, success) = run_schedulo(&config_path, &args);
    assert!(success);
    assert!(stdout.contains("Replaced"));

    let (stdout, _, _) = run_schedulo(&config_path, &["--password", "password", "show"]);
    let document: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let mood = &document["MoodReports"]["2024-11-02"];
    assert_eq!(mood["feelingScale"], 4);
    assert_eq!(mood["feelingSource"], "SOCIAL");
}

#[test]
fn test_mood_rejects_out_of_range_scale() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success) = run_schedulo(
        &config_path,
        &[
            "--password", "password", "mood", "2024-11-02", "--scale", "11", "--source", "work",
            "--entry", "x",
        ],
    );
    assert!(!success);
    assert!(!storage_path(&config_path).exists());
}

#[test]
fn test_wrong_password_does_not_overwrite() {
    let (_tmp, config_path) = setup_test_env();

    run_schedulo(&config_path, &["--password", "password", "seed"]);
    let before = fs::read(storage_path(&config_path)).unwrap();

    let (_, _, success) = run_schedulo(
        &config_path,
        &[
            "--password", "wrong", "mood", "2024-11-02", "--scale", "5", "--source", "work",
            "--entry", "x",
        ],
    );
    assert!(!success);
    assert_eq!(fs::read(storage_path(&config_path)).unwrap(), before);
}

#[test]
fn test_import_course_file() {
    let (tmp, config_path) = setup_test_env();

    run_schedulo(&config_path, &["--password", "password", "seed"]);

    let file = tmp.path().join("courses.json");
    fs::write(
        &file,
        r#"{
  "descriptions": [
    {"prefix": "MTH", "code": 2201, "creditHours": "4", "title": "Calculus 3", "catalogYear": 2024}
  ],
  "instances": {
    "Spring 2025": [
      {
        "crn": 20310,
        "descriptionID": {"startYear": 2024, "prefix": "MTH", "code": 2201},
        "section": "02",
        "schedule": [
          {"days": ["TUESDAY", "THURSDAY"], "range": {"startTime": "11:00:00", "endTime": "12:15:00"}}
        ],
        "place": {"bldgCode": "215CRF", "roomNumber": 113},
        "instructor": "Staff"
      }
    ],
    "Winter 2025": [
      {
        "crn": 1,
        "descriptionID": {"startYear": 2024, "prefix": "MTH", "code": 2201},
        "section": "01",
        "schedule": null,
        "place": null,
        "instructor": "Staff"
      }
    ]
  }
}"#,
    )
    .unwrap();

    let (stdout, stderr, success) = run_schedulo(
        &config_path,
        &["--password", "password", "import", file.to_str().unwrap()],
    );
    assert!(success, "import failed: stderr={}", stderr);
    assert!(stdout.contains("Imported 1 descriptions and 1 course sections"));
    assert!(stdout.contains("(1 skipped)"));

    let (stdout, _, _) = run_schedulo(&config_path, &["--password", "password", "summary"]);
    assert!(stdout.contains("Catalog:     2"));
    assert!(stdout.contains("Courses:     2"));
    assert!(stdout.contains("Spring 2025"));
}

#[test]
fn test_bad_config_is_an_error() {
    let (_tmp, config_path) = setup_test_env();
    fs::write(&config_path, "[storage\n").unwrap();

    let (_, stderr, success) = run_schedulo(&config_path, &["status"]);
    assert!(!success);
    assert!(stderr.contains("Failed to parse config file"));
}
