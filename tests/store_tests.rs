mod common;

use common::{d, new_record, temp_store};
use pdv_control::core::backup::BackupLogic;
use pdv_control::db::Database;
use pdv_control::errors::AppError;
use pdv_control::models::{Record, RecordPatch};
use std::fs;

#[test]
fn add_assigns_composite_id() {
    let (_dir, mut db) = temp_store();

    let mut rec = new_record("2025-01-15", "09:00:00", "João Silva", "Supermercado Central");
    rec.valor_deslocamento = 50.0;
    let id = db.add(rec).unwrap();

    assert_eq!(id, "2025-01-15_09-00-00_João_Silva");
    assert_eq!(db.get_all().len(), 1);

    let stored = db.get_by_id(&id).unwrap();
    assert_eq!(stored.pdv, "Supermercado Central");
    assert_eq!(stored.valor_deslocamento, 50.0);
    assert_eq!(stored.num_entradas, 1);
    assert!(stored.fotos.is_empty());
    assert!(stored.updated_at.is_none());
}

#[test]
fn add_rejects_existing_id() {
    let (_dir, mut db) = temp_store();
    db.add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();

    let err = db
        .add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Atacadão Família"))
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateId(_)));
    assert_eq!(db.len(), 1);
}

#[test]
fn add_rejects_malformed_input() {
    let (_dir, mut db) = temp_store();

    let mut neg = new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular");
    neg.valor_deslocamento = -1.0;
    assert!(matches!(db.add(neg), Err(AppError::Validation(_))));

    let mut zero = new_record("2025-01-15", "10:00:00", "Ana Costa", "Farmácia Popular");
    zero.num_entradas = 0;
    assert!(matches!(db.add(zero), Err(AppError::Validation(_))));

    let blank = new_record("2025-01-15", "11:00:00", "   ", "Farmácia Popular");
    assert!(matches!(db.add(blank), Err(AppError::Validation(_))));

    assert!(db.is_empty());
}

#[test]
fn records_survive_reopen() {
    let (dir, mut db) = temp_store();

    let mut rec = new_record("2025-03-02", "14:30:00", "Maria Santos", "Mercadinho da Esquina");
    rec.valor_deslocamento = 37.5;
    rec.num_entradas = 3;
    rec.observacoes = "gôndola reabastecida".to_string();
    rec.fotos = vec!["https://example.test/a.jpg".to_string()];
    let id = db.add(rec).unwrap();

    let before = db.get_by_id(&id).unwrap();
    let reopened = Database::open(dir.path().join("registros.json")).unwrap();

    assert_eq!(reopened.get_by_id(&id), Some(before));
}

#[test]
fn backing_file_uses_boundary_formats() {
    let (dir, mut db) = temp_store();
    db.add(new_record("2025-01-15", "09:00:00", "João Silva", "Supermercado Central"))
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("registros.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json[0]["data"], "2025-01-15");
    assert_eq!(json[0]["hora"], "09:00:00");
    assert_eq!(json[0]["promotor"], "João Silva");
}

#[test]
fn missing_optional_fields_get_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registros.json");
    fs::write(
        &path,
        r#"[{"id":"x","data":"2025-01-15","hora":"09:00","promotor":"Ana Costa","pdv":"Farmácia Popular","created_at":"2025-01-15T09:00:00"}]"#,
    )
    .unwrap();

    let db = Database::open(&path).unwrap();
    let r = db.get_by_id("x").unwrap();

    assert_eq!(r.valor_deslocamento, 0.0);
    assert_eq!(r.num_entradas, 1);
    assert_eq!(r.observacoes, "");
    assert!(r.fotos.is_empty());
    assert_eq!(r.time_str(), "09:00:00");
}

#[test]
fn delete_is_idempotent() {
    let (_dir, mut db) = temp_store();
    let id = db
        .add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();

    assert!(db.delete(&id).unwrap());
    assert!(!db.delete(&id).unwrap());
    assert!(db.is_empty());
}

#[test]
fn delete_of_absent_id_does_not_touch_file() {
    let (dir, mut db) = temp_store();
    db.add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();
    let path = dir.path().join("registros.json");
    let before = fs::read(&path).unwrap();

    assert!(!db.delete("nope").unwrap());
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(db.len(), 1);
}

#[test]
fn date_range_is_inclusive() {
    let (_dir, mut db) = temp_store();
    for date in ["2024-12-31", "2025-01-15", "2025-02-01"] {
        db.add(new_record(date, "09:00:00", "Ana Costa", "Farmácia Popular"))
            .unwrap();
    }

    let jan = db.get_by_date_range(d("2025-01-01"), d("2025-01-31"));
    assert_eq!(jan.len(), 1);
    assert_eq!(jan[0].date_str(), "2025-01-15");

    let edges = db.get_by_date_range(d("2024-12-31"), d("2025-02-01"));
    assert_eq!(edges.len(), 3);
}

#[test]
fn filters_return_exact_subsets_in_order() {
    let (_dir, mut db) = temp_store();
    db.add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();
    db.add(new_record("2025-01-15", "10:00:00", "Pedro Oliveira", "Farmácia Popular"))
        .unwrap();
    db.add(new_record("2025-01-16", "08:00:00", "Ana Costa", "Atacadão Família"))
        .unwrap();

    let by_date: Vec<Record> = db.get_by_date(d("2025-01-15"));
    assert_eq!(by_date.len(), 2);
    assert_eq!(by_date[0].promotor, "Ana Costa");
    assert_eq!(by_date[1].promotor, "Pedro Oliveira");

    let ana = db.get_by_promotor("Ana Costa");
    assert_eq!(ana.len(), 2);
    assert!(ana.iter().all(|r| r.promotor == "Ana Costa"));
    assert_eq!(ana[0].date_str(), "2025-01-15");

    let farm = db.get_by_pdv("Farmácia Popular");
    assert_eq!(farm.len(), 2);

    assert!(db.get_by_promotor("Ninguém").is_empty());
}

#[test]
fn update_merges_patch_and_keeps_id() {
    let (_dir, mut db) = temp_store();
    let id = db
        .add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();

    let patch = RecordPatch {
        valor_deslocamento: Some(80.0),
        observacoes: Some("loja fechada".to_string()),
        ..RecordPatch::default()
    };
    assert!(db.update(&id, &patch).unwrap());

    let r = db.get_by_id(&id).unwrap();
    assert_eq!(r.id, id);
    assert_eq!(r.valor_deslocamento, 80.0);
    assert_eq!(r.observacoes, "loja fechada");
    assert_eq!(r.pdv, "Farmácia Popular");
    assert!(r.updated_at.is_some());

    assert!(!db.update("missing", &patch).unwrap());
}

#[test]
fn update_rejects_invalid_patch() {
    let (_dir, mut db) = temp_store();
    let id = db
        .add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();

    let patch = RecordPatch {
        num_entradas: Some(0),
        ..RecordPatch::default()
    };
    assert!(db.update(&id, &patch).is_err());
    assert_eq!(db.get_by_id(&id).unwrap().num_entradas, 1);
}

#[test]
fn clear_all_empties_store_and_stats() {
    let (_dir, mut db) = temp_store();
    db.add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();

    db.clear_all().unwrap();

    assert!(db.get_all().is_empty());
    let s = db.statistics();
    assert_eq!(s.total_registros, 0);
    assert_eq!(s.total_promotores, 0);
    assert_eq!(s.total_pdvs, 0);
    assert_eq!(s.total_deslocamento, 0.0);
    assert_eq!(s.averages.media_deslocamento, 0.0);
}

#[test]
fn backup_holds_full_collection() {
    let (dir, mut db) = temp_store();
    db.add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();
    db.add(new_record("2025-01-16", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();

    let backups = dir.path().join("backups");
    let first = db.backup(&backups).unwrap();
    let second = db.backup(&backups).unwrap();

    assert_ne!(first, second);
    let name = first.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("backup_"));
    assert!(name.ends_with(".json"));

    let restored: Vec<Record> = serde_json::from_str(&fs::read_to_string(&first).unwrap()).unwrap();
    assert_eq!(restored, db.get_all());
}

#[test]
fn corrupt_file_is_moved_aside_and_store_restarts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registros.json");
    fs::write(&path, "{ not json").unwrap();

    let db = Database::open(&path).unwrap();
    assert!(db.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");

    let kept: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with("registros.json.corrupt-"))
        .collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join(&kept[0])).unwrap(),
        "{ not json"
    );
}

#[test]
fn missing_file_is_created_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("registros.json");

    let db = Database::open(&path).unwrap();
    assert!(db.is_empty());
    assert!(path.exists());
}

#[test]
fn failed_write_leaves_memory_unchanged() {
    let (dir, mut db) = temp_store();
    let id = db
        .add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();

    // A non-empty directory where the backing file was cannot be replaced.
    let path = dir.path().join("registros.json");
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), b"x").unwrap();

    let result = db.add(new_record("2025-01-16", "09:00:00", "Ana Costa", "Farmácia Popular"));

    assert!(matches!(result, Err(AppError::StorageWrite { .. })));
    assert_eq!(db.len(), 1);
    assert!(db.get_by_date(d("2025-01-16")).is_empty());

    assert!(matches!(db.delete(&id), Err(AppError::StorageWrite { .. })));
    assert!(db.get_by_id(&id).is_some());
}

#[test]
fn compressed_backups_never_overwrite_each_other() {
    let (dir, mut db) = temp_store();
    db.add(new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular"))
        .unwrap();
    let backups = dir.path().join("backups");

    let first = BackupLogic::backup(&db, &backups, true).unwrap();
    let second = BackupLogic::backup(&db, &backups, true).unwrap();
    let third = BackupLogic::backup(&db, &backups, true).unwrap();

    assert_ne!(first, second);
    assert_ne!(second, third);
    let zips = fs::read_dir(&backups)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".zip"))
        .count();
    assert_eq!(zips, 3);
}

#[test]
fn export_csv_writes_flat_rows() {
    let (dir, mut db) = temp_store();
    let mut rec = new_record("2025-01-15", "09:00:00", "Ana Costa", "Farmácia Popular");
    rec.valor_deslocamento = 12.5;
    rec.fotos = vec!["a".into(), "b".into()];
    db.add(rec).unwrap();

    let out = dir.path().join("out.csv");
    assert!(db.export_csv(&out).unwrap());

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "data,hora,promotor,pdv,valor_deslocamento,num_entradas,observacoes,num_fotos"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2025-01-15,09:00:00,Ana Costa,Farmácia Popular,12.5,1,,2"
    );
    assert!(lines.next().is_none());
}

#[test]
fn export_csv_on_empty_store_writes_nothing() {
    let (dir, db) = temp_store();
    let out = dir.path().join("out.csv");

    assert!(!db.export_csv(&out).unwrap());
    assert!(!out.exists());
}
