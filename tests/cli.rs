use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn codedump() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("codedump"))
}

#[test]
fn default_run_writes_dump_and_report() {
    let temp = tempdir().unwrap();

    write_file(&temp.path().join("main.py"), "print('hello')\n");
    write_file(&temp.path().join("src/lib.rs"), "pub fn add() {}\n");

    codedump().current_dir(temp.path()).assert().success();

    let dump = fs::read_to_string(temp.path().join("code_dumps/code_dump_1.txt")).unwrap();
    assert!(dump.contains("FILE: main.py"));
    assert!(dump.contains("```python\nprint('hello')\n\n```"));
    assert!(dump.contains("FILE: src/lib.rs"));
    assert!(dump.contains("```rust\npub fn add() {}\n\n```"));

    let report = fs::read_to_string(temp.path().join("code_dumps/code_dump_stats.json")).unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["stats"]["included_files"], 2);
    assert_eq!(value["stats"]["dump_files_created"], 1);
}

#[test]
fn output_directory_is_excluded_from_later_runs() {
    let temp = tempdir().unwrap();

    write_file(&temp.path().join("main.py"), "print('hello')\n");

    codedump().current_dir(temp.path()).assert().success();
    codedump().current_dir(temp.path()).assert().success();

    // the second run must not dump the first run's output
    let report = fs::read_to_string(temp.path().join("code_dumps/code_dump_stats.json")).unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["stats"]["total_files"], 1);
    assert_eq!(value["stats"]["included_files"], 1);
}

#[test]
fn write_default_config_creates_template() {
    let temp = tempdir().unwrap();

    codedump()
        .current_dir(temp.path())
        .arg("--write-default-config")
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join("code_dump_config.json")).unwrap();
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["max_tokens_per_file"], 100_000);
    assert_eq!(value["encoding_name"], "cl100k_base");
    assert!(value["ignore_patterns"]
        .as_array()
        .unwrap()
        .contains(&Value::from("node_modules/")));

    // no crawl happened
    assert!(!temp.path().join("code_dumps").exists());
}

#[test]
fn config_file_drives_the_run() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("dumps");

    write_file(&root.join("keep.py"), "x = 1\n");
    write_file(&root.join("skip.rs"), "fn main() {}\n");

    let config = serde_json::json!({
        "root_dir": root.to_string_lossy(),
        "output_directory": out.to_string_lossy(),
        "include_patterns": ["*.py"],
    });
    let config_path = temp.path().join("config.json");
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    codedump()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded configuration from"));

    let dump = fs::read_to_string(out.join("code_dump_1.txt")).unwrap();
    assert!(dump.contains("FILE: keep.py"));
    assert!(!dump.contains("skip.rs"));
}

#[test]
fn token_budget_splits_dump_files() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("dumps");

    write_file(&root.join("a.py"), "a = 1\n");
    write_file(&root.join("b.py"), "b = 2\n");
    write_file(&root.join("c.py"), "c = 3\n");

    // every block exceeds a 1-token budget, so each lands in its own file
    codedump()
        .arg("--directory")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .arg("--tokens")
        .arg("1")
        .assert()
        .success();

    for i in 1..=3 {
        let dump = fs::read_to_string(out.join(format!("code_dump_{}.txt", i))).unwrap();
        assert_eq!(dump.matches("FILE: ").count(), 1);
    }
    assert!(!out.join("code_dump_4.txt").exists());

    let report = fs::read_to_string(out.join("code_dump_stats.json")).unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["stats"]["dump_files_created"], 3);
}

#[test]
fn custom_output_prefix_names_artifacts() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("dumps");

    write_file(&root.join("main.py"), "print('hi')\n");

    codedump()
        .arg("--directory")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .arg("--output")
        .arg("myproj_")
        .assert()
        .success();

    assert!(out.join("myproj_1.txt").exists());
    assert!(out.join("myproj_stats.json").exists());
}

#[test]
fn verbose_logs_skipped_files() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("dumps");

    write_file(&root.join("main.py"), "print('hi')\n");
    write_file(&root.join("logs/run.log"), "noise\n");

    codedump()
        .arg("--directory")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing: main.py"))
        .stderr(predicate::str::contains("Ignoring file: logs/run.log"));
}

#[test]
fn quiet_suppresses_progress() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("dumps");

    write_file(&root.join("main.py"), "print('hi')\n");

    codedump()
        .arg("--directory")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing:").not());

    assert!(out.join("code_dump_1.txt").exists());
}

#[test]
fn cli_flags_override_config_file() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("dumps");

    write_file(&root.join("main.py"), "print('hi')\n");

    let config = serde_json::json!({
        "max_tokens_per_file": 999_999,
        "output_prefix": "fromfile_",
    });
    let config_path = temp.path().join("config.json");
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    codedump()
        .arg("--config")
        .arg(&config_path)
        .arg("--directory")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .arg("--tokens")
        .arg("777")
        .assert()
        .success();

    // the file's prefix beat the default, the flag beat the file's budget
    let report = fs::read_to_string(out.join("fromfile_stats.json")).unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["config"]["max_tokens_per_file"], 777);
    assert!(out.join("fromfile_1.txt").exists());
}

#[test]
fn unusable_pattern_warns_and_is_skipped() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("dumps");

    write_file(&root.join("main.py"), "print('hi')\n");
    write_file(&root.join(".gitignore"), "[z-a].txt\n");

    codedump()
        .arg("--directory")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Skipping unusable pattern: [z-a].txt",
        ));

    let dump = fs::read_to_string(out.join("code_dump_1.txt")).unwrap();
    assert!(dump.contains("FILE: main.py"));
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    let out = temp.path().join("dumps");

    write_file(&root.join("main.py"), "print('hi')\n");
    let config_path = temp.path().join("broken.json");
    fs::write(&config_path, "{not json").unwrap();

    codedump()
        .arg("--config")
        .arg(&config_path)
        .arg("--directory")
        .arg(&root)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Using default configuration"));

    assert!(out.join("code_dump_1.txt").exists());
}

#[test]
fn missing_root_completes_with_empty_report() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("dumps");

    codedump()
        .arg("--directory")
        .arg(temp.path().join("no-such-dir"))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let report = fs::read_to_string(out.join("code_dump_stats.json")).unwrap();
    let value: Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["stats"]["total_files"], 0);
    assert!(!out.join("code_dump_1.txt").exists());
}
