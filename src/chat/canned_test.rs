use super::*;

#[test]
fn normalize_trims_and_lowercases() {
    assert_eq!(normalize("  HeLLo \n"), "hello");
    assert_eq!(normalize("   "), "");
}

#[test]
fn default_table_has_seed_triggers() {
    let table = CannedResponses::default();
    assert_eq!(table.len(), 6);
    assert_eq!(table.lookup("hi"), Some("Hey! I'm Abu's bot 🤖. Ask me anything about him!"));
    assert_eq!(table.lookup("projects"), Some("Abu has worked on React, Next.js, and 3D portfolio projects."));
    assert_eq!(
        table.lookup("contact"),
        Some("You can reach Abu via LinkedIn or email. Check the contact section!")
    );
}

#[test]
fn lookup_is_exact_not_substring() {
    let table = CannedResponses::default();
    assert_eq!(table.lookup("hi there"), None);
    assert_eq!(table.lookup("projects?"), None);
    assert_eq!(table.lookup("h"), None);
}

#[test]
fn lookup_empty_is_not_found() {
    let table = CannedResponses::from_pairs([("", "never")]).err();
    assert!(matches!(table, Some(CannedTableError::EmptyTrigger)));
    assert_eq!(CannedResponses::default().lookup(""), None);
}

#[test]
fn lookup_expects_normalized_input() {
    let table = CannedResponses::default();
    assert_eq!(table.lookup("HI"), None);
    assert_eq!(table.lookup(&normalize(" HI ")), table.lookup("hi"));
}

#[test]
fn from_pairs_normalizes_keys() {
    let table = CannedResponses::from_pairs([("  Dogs or Cats? ", "Dogs, obviously.")]).unwrap();
    assert_eq!(table.lookup("dogs or cats?"), Some("Dogs, obviously."));
    assert_eq!(table.lookup("dogs or cats"), None);
}

#[test]
fn from_pairs_rejects_normalized_duplicates() {
    let err = CannedResponses::from_pairs([("Hi", "one"), ("hi ", "two")]).unwrap_err();
    assert!(matches!(err, CannedTableError::DuplicateTrigger(key) if key == "hi"));
}

#[test]
fn from_yaml_str_loads_mapping() {
    let yaml = "hi: Hey from YAML\nResume: Check the resume tab.\n";
    let table = CannedResponses::from_yaml_str(yaml).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup("resume"), Some("Check the resume tab."));
}

#[test]
fn from_yaml_str_rejects_case_collisions() {
    let yaml = "Hi: one\nhi: two\n";
    assert!(matches!(
        CannedResponses::from_yaml_str(yaml),
        Err(CannedTableError::DuplicateTrigger(_))
    ));
}

#[test]
fn from_yaml_str_rejects_non_mapping() {
    assert!(matches!(CannedResponses::from_yaml_str("- hi\n- hello\n"), Err(CannedTableError::Parse(_))));
}

#[test]
fn from_yaml_file_missing_is_io_error() {
    let path = std::env::temp_dir().join("portfolio-bot-surely-missing-table.yaml");
    assert!(matches!(CannedResponses::from_yaml_file(&path), Err(CannedTableError::Io(_))));
}

#[test]
fn from_yaml_file_reads_table() {
    let path = std::env::temp_dir().join(format!("portfolio-bot-table-{}.yaml", uuid::Uuid::new_v4()));
    std::fs::write(&path, "gdg: GDG Kolkata member.\n").unwrap();
    let table = CannedResponses::from_yaml_file(&path).unwrap();
    assert_eq!(table.lookup("gdg"), Some("GDG Kolkata member."));
    std::fs::remove_file(&path).unwrap();
}
