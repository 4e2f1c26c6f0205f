#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use pdv_control::db::Database;
use pdv_control::models::{NewRecord, Record};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn pdv() -> Command {
    cargo_bin_cmd!("pdvcontrol")
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").expect("test time")
}

pub fn new_record(date: &str, time: &str, promotor: &str, pdv: &str) -> NewRecord {
    NewRecord::new(d(date), t(time), promotor, pdv)
}

/// A record as the store would save it, without going through a store.
pub fn stored(date: &str, time: &str, promotor: &str, pdv: &str) -> Record {
    new_record(date, time, promotor, pdv).into_record(d(date).and_time(t(time)))
}

/// Fresh store in its own temp dir. Keep the `TempDir` alive for the test.
pub fn temp_store() -> (TempDir, Database) {
    let dir = TempDir::new().expect("tempdir");
    let db = Database::open(dir.path().join("registros.json")).expect("open store");
    (dir, db)
}

/// Isolated CLI environment: a config file pointing at a record file,
/// backup dir and mirror dir all inside one temp dir.
pub struct CliEnv {
    pub dir: TempDir,
    pub config: PathBuf,
    pub db: PathBuf,
}

impl CliEnv {
    pub fn new() -> Self {
        Self::build(false)
    }

    pub fn with_mirror() -> Self {
        Self::build(true)
    }

    fn build(mirror: bool) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let config = dir.path().join("pdvcontrol.conf");
        let db = dir.path().join("pdvcontrol.json");

        let mut yaml = format!(
            "database: {}\nbackup_dir: {}\n",
            db.display(),
            dir.path().join("backups").display()
        );
        if mirror {
            yaml.push_str(&format!("mirror_dir: {}\n", dir.path().join("mirror").display()));
        }
        fs::write(&config, yaml).expect("write config");

        Self { dir, config, db }
    }

    pub fn cmd(&self) -> Command {
        let mut c = pdv();
        c.arg("--config").arg(&self.config);
        c
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn add(&self, date: &str, time: &str, promotor: &str, pdv: &str, valor: &str) {
        self.cmd()
            .args([
                "add", "--promotor", promotor, "--pdv", pdv, "--valor", valor, "--date", date,
                "--time", time,
            ])
            .assert()
            .success();
    }

    pub fn store(&self) -> Database {
        Database::open(&self.db).expect("open store")
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read file")
}
