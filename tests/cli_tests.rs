mod common;

use common::{CliEnv, pdv, read};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn init_creates_config_and_record_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pdvcontrol.conf");
    let db = dir.path().join("dados.json");

    pdv()
        .arg("--config")
        .arg(&config)
        .arg("--db")
        .arg(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Record file ready"));

    assert!(config.exists());
    assert_eq!(read(&db).trim(), "[]");
    assert!(read(&config).contains("dados.json"));
}

#[test]
fn add_then_list_as_json() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "João Silva", "Supermercado Central", "50");

    env.cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(contains("2025-01-15_09-00-00_João_Silva"))
        .stdout(contains("\"valor_deslocamento\": 50.0"));

    assert_eq!(env.store().len(), 1);
}

#[test]
fn add_uses_configured_default_travel_cost() {
    let env = CliEnv::new();
    env.cmd()
        .args([
            "add", "--promotor", "Ana Costa", "--pdv", "Farmácia Popular", "--date",
            "2025-01-15", "--time", "10:00",
        ])
        .assert()
        .success()
        .stdout(contains("R$ 50,00"));

    let r = &env.store().get_all()[0];
    assert_eq!(r.valor_deslocamento, 50.0);
}

#[test]
fn add_rejects_invalid_input() {
    let env = CliEnv::new();

    env.cmd()
        .args(["add", "--promotor", "A1", "--pdv", "Farmácia Popular"])
        .assert()
        .failure()
        .stderr(contains("Error:"));

    env.cmd()
        .args([
            "add", "--promotor", "Ana Costa", "--pdv", "Farmácia Popular", "--valor", "5000",
        ])
        .assert()
        .failure()
        .stderr(contains("maximum travel cost"));

    env.cmd()
        .args([
            "add", "--promotor", "Ana Costa", "--pdv", "Farmácia Popular", "--date",
            "2025-02-30",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    assert!(env.store().is_empty());
}

#[test]
fn add_twice_at_same_minute_fails() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");

    env.cmd()
        .args([
            "add", "--promotor", "Ana Costa", "--pdv", "Atacadão Família", "--date",
            "2025-01-15", "--time", "09:00",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn list_is_newest_first_and_filters() {
    let env = CliEnv::new();
    env.add("2025-01-10", "09:00", "Ana Costa", "Farmácia Popular", "10");
    env.add("2025-01-20", "09:00", "Ana Costa", "Atacadão Família", "10");
    env.add("2025-02-01", "09:00", "Pedro Oliveira", "Farmácia Popular", "10");

    let out = env.cmd().args(["list"]).output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout).to_string();
    let first = text.find("01/02/2025").unwrap();
    let last = text.find("10/01/2025").unwrap();
    assert!(first < last);

    env.cmd()
        .args(["list", "--range", "2025-01", "--promotor", "Ana Costa"])
        .assert()
        .success()
        .stdout(contains("Check-ins (2)"))
        .stdout(contains("Pedro Oliveira").not());

    env.cmd()
        .args(["list", "--pdv", "Atacadão Família"])
        .assert()
        .success()
        .stdout(contains("Check-ins (1)"));

    env.cmd()
        .args(["list", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(contains("No check-ins found"));
}

#[test]
fn show_edit_and_delete() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");
    let id = "2025-01-15_09-00-00_Ana_Costa";

    env.cmd()
        .args(["show", id])
        .assert()
        .success()
        .stdout(contains("Farmácia Popular"))
        .stdout(contains("R$ 10,00"));

    env.cmd()
        .args(["edit", id, "--valor", "25.5", "--obs", "sem estoque"])
        .assert()
        .success()
        .stdout(contains("updated"));

    let r = env.store().get_by_id(id).unwrap();
    assert_eq!(r.valor_deslocamento, 25.5);
    assert_eq!(r.observacoes, "sem estoque");
    assert!(r.updated_at.is_some());

    env.cmd()
        .args(["del", id, "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));
    assert!(env.store().is_empty());

    env.cmd()
        .args(["del", id, "--yes"])
        .assert()
        .success()
        .stdout(contains("No check-in with id"));
}

#[test]
fn delete_prompt_can_be_declined() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");

    env.cmd()
        .args(["del", "2025-01-15_09-00-00_Ana_Costa"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    assert_eq!(env.store().len(), 1);
}

#[test]
fn clear_removes_everything() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");
    env.add("2025-01-16", "09:00", "Ana Costa", "Farmácia Popular", "10");

    env.cmd()
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("2 check-ins deleted"));
    assert!(env.store().is_empty());
}

#[test]
fn backup_writes_json_or_zip() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");

    env.cmd().args(["backup"]).assert().success();
    env.cmd().args(["backup", "--compress"]).assert().success();

    let names: Vec<String> = fs::read_dir(env.path("backups"))
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| n.starts_with("backup_")));
    assert_eq!(names.iter().filter(|n| n.ends_with(".json")).count(), 1);
    assert_eq!(names.iter().filter(|n| n.ends_with(".zip")).count(), 1);
}

#[test]
fn export_formats() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");

    let csv = env.path("out.csv");
    env.cmd()
        .args(["export", "--format", "csv", "--file"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(contains("CSV export completed"));
    assert!(read(&csv).starts_with("data,hora,promotor,pdv,"));

    let json = env.path("out.json");
    env.cmd()
        .args(["export", "--format", "json", "--file"])
        .arg(&json)
        .assert()
        .success();
    let parsed: serde_json::Value = serde_json::from_str(&read(&json)).unwrap();
    assert_eq!(parsed[0]["id"], "2025-01-15_09-00-00_Ana_Costa");

    let xlsx = env.path("out.xlsx");
    env.cmd()
        .args(["export", "--format", "xlsx", "--file"])
        .arg(&xlsx)
        .assert()
        .success();
    assert!(fs::metadata(&xlsx).unwrap().len() > 0);

    env.cmd()
        .args(["export", "--format", "csv", "--force", "--file"])
        .arg(&csv)
        .assert()
        .success();
}

#[test]
fn export_requires_absolute_path() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");

    env.cmd()
        .args(["export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn export_with_empty_range_writes_nothing() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");
    let out = env.path("empty.csv");

    env.cmd()
        .args(["export", "--range", "2030", "--file"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("No records found"));
    assert!(!out.exists());
}

#[test]
fn stats_json_reports_totals() {
    let env = CliEnv::new();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "30");
    env.add("2025-01-15", "10:00", "Pedro Oliveira", "Atacadão Família", "70");

    let out = env.cmd().args(["stats", "--json"]).output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["total_registros"], 2);
    assert_eq!(v["total_deslocamento"], 100.0);
    assert_eq!(v["media_deslocamento"], 50.0);
    assert_eq!(v["faixas_valor"][0]["count"], 1);

    env.cmd()
        .args(["stats", "--promotor", "Ana Costa"])
        .assert()
        .success()
        .stdout(contains("Visits           : 1"));
}

#[test]
fn roster_changes_are_saved_in_config() {
    let env = CliEnv::new();

    env.cmd()
        .args(["promotor", "add", "Beatriz Lima"])
        .assert()
        .success();
    env.cmd()
        .args(["promotor", "add", "Beatriz Lima"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
    env.cmd()
        .args(["promotor", "list"])
        .assert()
        .success()
        .stdout(contains("Beatriz Lima"));

    env.cmd()
        .args(["pdv", "remove", "Farmácia Popular"])
        .assert()
        .success();
    env.cmd()
        .args(["pdv", "list"])
        .assert()
        .success()
        .stdout(contains("Farmácia Popular").not());

    assert!(read(&env.config).contains("Beatriz Lima"));
}

#[test]
fn config_print_shows_yaml() {
    let env = CliEnv::new();
    env.cmd()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("duplicate_window_minutes: 30"));
}

#[test]
fn mirror_receives_rows_and_photos() {
    let env = CliEnv::with_mirror();
    let photo = env.path("foto.jpg");
    fs::write(&photo, b"fake-jpeg").unwrap();

    env.cmd()
        .args([
            "add", "--promotor", "Ana Costa", "--pdv", "Farmácia Popular", "--valor", "10",
            "--date", "2025-01-15", "--time", "09:00", "--photo",
        ])
        .arg(&photo)
        .assert()
        .success()
        .stdout(contains("1 photo(s)"));

    let uploaded = env
        .path("mirror")
        .join("fotos")
        .join("Ana_Costa")
        .join("2025-01-15")
        .join("Farm_cia_Popular_001.jpg");
    assert_eq!(fs::read(&uploaded).unwrap(), b"fake-jpeg");

    let record = &env.store().get_all()[0];
    assert_eq!(record.fotos.len(), 1);
    assert!(record.fotos[0].starts_with("file://"));

    let sheet = read(&env.path("mirror").join("registros.csv"));
    assert_eq!(sheet.lines().count(), 2);

    env.cmd()
        .args([
            "add", "--promotor", "Ana Costa", "--pdv", "Farmácia Popular", "--date",
            "2025-01-15", "--time", "10:00", "--no-mirror",
        ])
        .assert()
        .success();
    assert_eq!(read(&env.path("mirror").join("registros.csv")).lines().count(), 2);
}

#[test]
fn dups_finds_and_purges_mirror_duplicates() {
    let env = CliEnv::with_mirror();
    env.add("2025-01-15", "09:00", "Ana Costa", "Farmácia Popular", "10");
    env.add("2025-01-15", "09:05", "Ana Costa", "Farmácia Popular", "10");
    env.add("2025-01-15", "15:00", "Ana Costa", "Farmácia Popular", "10");

    env.cmd()
        .args(["dups"])
        .assert()
        .success()
        .stdout(contains("Duplicates (1)"));

    env.cmd()
        .args(["dups", "--purge", "--yes"])
        .assert()
        .success()
        .stdout(contains("Row 3 deleted"));

    env.cmd()
        .args(["dups"])
        .assert()
        .success()
        .stdout(contains("No duplicates found"));

    assert_eq!(env.store().len(), 3);
}

#[test]
fn dups_without_mirror_is_an_error() {
    let env = CliEnv::new();
    env.cmd()
        .args(["dups"])
        .assert()
        .failure()
        .stderr(contains("no mirror configured"));
}

#[test]
fn database_path_expands_home() {
    let env = CliEnv::new();
    let config = env.path("tilde.conf");
    fs::write(&config, "database: ~/dados/pdv.json\n").unwrap();

    pdv()
        .env("HOME", env.dir.path())
        .current_dir(env.dir.path())
        .arg("--config")
        .arg(&config)
        .args([
            "add", "--promotor", "Ana Costa", "--pdv", "Farmácia Popular", "--valor", "10",
            "--date", "2025-01-15", "--time", "09:00",
        ])
        .assert()
        .success();

    assert!(env.path("dados").join("pdv.json").exists());
    assert!(!env.path("~").exists());
}
