use super::*;

fn layout() -> SourceLayout {
    SourceLayout::default()
}

#[test]
fn test_parse_standard_identifier() {
    let parsed = layout().parse("003_add_profile_image.sql").unwrap();
    assert_eq!(parsed.id, 3);
    assert_eq!(parsed.name, "add profile image");
}

#[test]
fn test_parse_dash_separators() {
    let parsed = layout().parse("012_create-check-ins.sql").unwrap();
    assert_eq!(parsed.id, 12);
    assert_eq!(parsed.name, "create check ins");
}

#[test]
fn test_parse_rejects_missing_prefix() {
    let err = layout().parse("create_members.sql").unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifierFormat { .. }));
}

#[test]
fn test_parse_rejects_wrong_extension() {
    let err = layout().parse("001_create_members.txt").unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifierFormat { .. }));
}

#[test]
fn test_parse_rejects_missing_name() {
    let err = layout().parse("001_.sql").unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifierFormat { .. }));

    let err = layout().parse("001___.sql").unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifierFormat { .. }));
}

#[test]
fn test_parse_rejects_zero_id() {
    let err = layout().parse("000_bootstrap.sql").unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifierFormat { .. }));
}

#[test]
fn test_parse_rejects_unpadded_prefix() {
    let err = layout().parse("7_short.sql").unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifierFormat { .. }));
}

#[test]
fn test_parse_overflow_is_loud() {
    let err = layout().parse("1000_too_many.sql").unwrap_err();
    match err {
        CoreError::IdentifierOverflow { identifier, width } => {
            assert_eq!(identifier, "1000_too_many.sql");
            assert_eq!(width, 3);
        }
        other => panic!("expected IdentifierOverflow, got {other:?}"),
    }
}

#[test]
fn test_custom_layout() {
    let layout = SourceLayout::new(4, "ddl").unwrap();
    let parsed = layout.parse("0042_members.ddl").unwrap();
    assert_eq!(parsed.id, 42);
    assert!(layout.has_extension("0042_members.ddl"));
    assert!(!layout.has_extension("0042_members.sql"));
    assert!(!layout.has_extension("ddl"));
}

#[test]
fn test_layout_validation() {
    assert!(SourceLayout::new(0, "sql").is_err());
    assert!(SourceLayout::new(10, "sql").is_err());
    assert!(SourceLayout::new(3, "").is_err());
    assert!(SourceLayout::new(3, ".sql").is_err());
    assert!(SourceLayout::new(9, "sql").is_ok());
}

#[test]
fn test_format_pads_id() {
    assert_eq!(
        layout().format(7, "add_index").unwrap(),
        "007_add_index.sql"
    );
    assert_eq!(layout().max_id(), 999);
}

#[test]
fn test_format_rejects_overflow() {
    let err = layout().format(1000, "too_far").unwrap_err();
    assert!(matches!(err, CoreError::IdentifierOverflow { width: 3, .. }));
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("Add Profile Image"), "add_profile_image");
    assert_eq!(slugify("  create--members  table "), "create_members_table");
    assert_eq!(slugify("WhatsApp opt-in flag!"), "whatsapp_opt_in_flag");
    assert_eq!(slugify(" -- "), "");
}

#[test]
fn test_slugify_keeps_non_ascii_letters() {
    assert_eq!(slugify("新規"), "新規");
    assert_eq!(slugify("新規 会員テーブル"), "新規_会員テーブル");
    assert_eq!(slugify("Ajout Café"), "ajout_café");
}

#[test]
fn test_non_ascii_identifier_round_trips() {
    let identifier = layout().format(4, &slugify("新規 会員")).unwrap();
    assert_eq!(identifier, "004_新規_会員.sql");
    let parsed = layout().parse(&identifier).unwrap();
    assert_eq!(parsed.id, 4);
    assert_eq!(parsed.name, "新規 会員");
}
