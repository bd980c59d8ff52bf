use super::*;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.migrations_dir, "migrations");
    assert_eq!(config.database.path, "keel.duckdb");
    assert_eq!(config.id_width, 3);
    assert_eq!(config.extension, "sql");
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
migrations_dir: db/migrations
database:
  path: data/members.duckdb
id_width: 4
extension: ddl
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let root = PathBuf::from("/opt/app");
    assert_eq!(
        config.migrations_dir_absolute(&root),
        root.join("db/migrations")
    );
    assert_eq!(
        config.database_path_absolute(&root),
        root.join("data/members.duckdb").display().to_string()
    );
    assert_eq!(config.layout(), SourceLayout::new(4, "ddl").unwrap());
}

#[test]
fn test_memory_database_path_passthrough() {
    let config: Config = serde_yaml::from_str("database:\n  path: \":memory:\"").unwrap();
    assert_eq!(
        config.database_path_absolute(Path::new("/opt/app")),
        MEMORY_DB_PATH
    );
}

#[test]
fn test_unknown_fields_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("migration_dir: oops");
    assert!(result.is_err());
}

#[test]
fn test_load_from_dir_defaults_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "migrations");
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("keel.yml"), "migrations_dir: from_yml").unwrap();
    std::fs::write(dir.path().join("keel.yaml"), "migrations_dir: from_yaml").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "from_yml");
}

#[test]
fn test_load_explicit_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("custom.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_invalid_width_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keel.yml");
    std::fs::write(&path, "id_width: 12").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_empty_migrations_dir_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keel.yml");
    std::fs::write(&path, "migrations_dir: \"\"").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::ConfigInvalid { .. }
    ));
}

#[test]
fn test_malformed_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keel.yml");
    std::fs::write(&path, "id_width: [").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::YamlParse(_)
    ));
}
