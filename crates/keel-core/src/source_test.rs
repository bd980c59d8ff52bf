use super::*;
use std::fs;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

// ── MemorySource ───────────────────────────────────────────────────────

#[test]
fn test_memory_source_orders_by_id_regardless_of_insertion() {
    let source = MemorySource::new()
        .with("003_add_photo.sql", "ALTER TABLE members ADD COLUMN photo VARCHAR;")
        .with("001_create_members.sql", "CREATE TABLE members (id INTEGER);")
        .with("002_add_index.sql", "CREATE INDEX idx_members ON members (id);");

    let ids: Vec<u32> = source.discover().unwrap().iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_memory_source_is_restartable() {
    let source = MemorySource::new()
        .with("001_a.sql", "SELECT 1;")
        .with("002_b.sql", "SELECT 2;");
    assert_eq!(source.discover().unwrap(), source.discover().unwrap());
}

#[test]
fn test_definition_fields() {
    let source = MemorySource::new().with(
        "001_create_members.sql",
        "-- UP\nCREATE TABLE members (id INTEGER);\n-- DOWN\nDROP TABLE members;",
    );
    let defs = source.discover().unwrap();
    let def = &defs[0];
    assert_eq!(def.id, 1);
    assert_eq!(def.name, "create members");
    assert_eq!(def.source_key, "001_create_members.sql");
    assert_eq!(def.up, "CREATE TABLE members (id INTEGER);");
    assert_eq!(def.down, "DROP TABLE members;");
    assert!(def.is_reversible());
}

#[test]
fn test_duplicate_ids_rejected() {
    let source = MemorySource::new()
        .with("002_add_index.sql", "SELECT 1;")
        .with("002_add_other_index.sql", "SELECT 2;");
    match source.discover().unwrap_err() {
        CoreError::DuplicateMigrationId { id, first, second } => {
            assert_eq!(id, 2);
            assert_eq!(first, "002_add_index.sql");
            assert_eq!(second, "002_add_other_index.sql");
        }
        other => panic!("expected DuplicateMigrationId, got {other:?}"),
    }
}

#[test]
fn test_invalid_identifier_fails_discovery() {
    let source = MemorySource::new()
        .with("001_ok.sql", "SELECT 1;")
        .with("create_members.sql", "SELECT 2;");
    assert!(matches!(
        source.discover().unwrap_err(),
        CoreError::InvalidIdentifierFormat { .. }
    ));
}

#[test]
fn test_overflowing_identifier_fails_discovery() {
    let source = MemorySource::new()
        .with("999_last.sql", "SELECT 1;")
        .with("1000_one_too_many.sql", "SELECT 2;");
    assert!(matches!(
        source.discover().unwrap_err(),
        CoreError::IdentifierOverflow { width: 3, .. }
    ));
}

// ── DirectorySource ────────────────────────────────────────────────────

#[test]
fn test_directory_source_discovers_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "010_tenth.sql", "SELECT 10;");
    write(dir.path(), "002_second.sql", "SELECT 2;");
    write(dir.path(), "001_first.sql", "SELECT 1;");

    let source = DirectorySource::new(dir.path(), SourceLayout::default());
    let keys: Vec<String> = source
        .discover()
        .unwrap()
        .into_iter()
        .map(|d| d.source_key)
        .collect();
    assert_eq!(keys, vec!["001_first.sql", "002_second.sql", "010_tenth.sql"]);
}

#[test]
fn test_directory_source_skips_other_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "001_first.sql", "SELECT 1;");
    write(dir.path(), "README.md", "notes");
    write(dir.path(), ".gitkeep", "");
    fs::create_dir(dir.path().join("archive.sql")).unwrap();

    let source = DirectorySource::new(dir.path(), SourceLayout::default());
    assert_eq!(source.discover().unwrap().len(), 1);
    assert_eq!(source.identifiers().unwrap(), vec!["001_first.sql"]);
}

#[test]
fn test_directory_source_missing_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path().join("migrations"), SourceLayout::default());
    assert!(source.discover().unwrap().is_empty());
}

#[test]
fn test_directory_source_rejects_file_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "not_a_dir", "");
    let source = DirectorySource::new(dir.path().join("not_a_dir"), SourceLayout::default());
    assert!(matches!(
        source.discover().unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_directory_source_invalid_name_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "001_first.sql", "SELECT 1;");
    write(dir.path(), "second.sql", "SELECT 2;");

    let source = DirectorySource::new(dir.path(), SourceLayout::default());
    assert!(matches!(
        source.discover().unwrap_err(),
        CoreError::InvalidIdentifierFormat { .. }
    ));
}
