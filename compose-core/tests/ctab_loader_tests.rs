mod common;

use common::*;
use compose_core::{BuildError, CtabError, CtabLoader, LoadLimits, SequenceTable, TableBuilder};
use pretty_assertions::assert_eq;

#[test]
fn test_table_survives_save_and_load() {
    let mut builder = TableBuilder::new();
    builder.metadata_mut().set_name("Latin accents");
    builder.metadata_mut().set_language("fr-FR");
    builder.add_names(&["DeadGrave", "LetterA"], "à").unwrap();
    builder.add_names(&["X", "Y"], "p").unwrap();
    builder.add_names(&["X", "Y", "Z"], "q").unwrap();
    builder.add_names(&["Compose", "Flag", "LetterF", "LetterR"], "🇫🇷").unwrap();
    builder.add_names(&["Compose", "Ligature"], "e\u{0301}x").unwrap();
    let table = builder.build();

    let bytes = table.to_ctab().unwrap();
    let loaded = SequenceTable::from_ctab(&bytes).unwrap();

    let original: Vec<_> = table.entries().collect();
    let reloaded: Vec<_> = loaded.entries().collect();
    assert_eq!(original, reloaded);
    assert_eq!(loaded.node_count(), table.node_count());
    assert_eq!(loaded.metadata(), table.metadata());
    assert_eq!(loaded.metadata().language(), Some("fr-FR"));

    // Deterministic output
    assert_eq!(loaded.to_ctab().unwrap(), bytes);
}

#[test]
fn test_hand_written_file() {
    let data = hex::decode(concat!(
        "43535154", // "CSQT"
        "0100",     // version 1.0
        "0200",     // 2 keys
        "0000",     // 0 info
        "01000000", // 1 entry
        "00",       // flags
        "00",       // padding
        "0200", "5831", // "X1"
        "0200", "5932", // "Y2"
        "02", "0000", "0100", // [X1, Y2]
        "0200", "c3a9", // "é"
    ))
    .unwrap();

    let table = SequenceTable::from_ctab(&data).unwrap();
    assert_eq!(table.lookup(&keys(&["X1", "Y2"])), Some("é"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_conflicting_duplicate_in_file_is_rejected() {
    let mut file = create_basic_ctab();
    let a = add_key_name(&mut file, "DeadGrave");
    let b = add_key_name(&mut file, "LetterA");
    add_entry(&mut file, &[a, b], "à");
    add_entry(&mut file, &[a, b], "á");

    let binary = create_ctab_binary(&file).unwrap();
    let parsed = CtabLoader::load(&binary).unwrap();
    assert_eq!(parsed.entries.len(), 2);

    match SequenceTable::from_ctab(&binary) {
        Err(CtabError::Build(BuildError::ConflictingSequence { existing, incoming, .. })) => {
            assert_eq!(existing, "à");
            assert_eq!(incoming, "á");
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[test]
fn test_identical_duplicate_in_file_is_accepted() {
    let mut file = create_basic_ctab();
    let a = add_key_name(&mut file, "A");
    add_entry(&mut file, &[a], "x");
    add_entry(&mut file, &[a], "x");

    let binary = create_ctab_binary(&file).unwrap();
    let table = SequenceTable::from_ctab(&binary).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_empty_sequence_in_file_is_malformed() {
    let mut file = create_basic_ctab();
    add_key_name(&mut file, "A");
    add_entry(&mut file, &[], "x");

    let binary = create_ctab_binary(&file).unwrap();
    let result = SequenceTable::from_ctab(&binary);
    assert!(matches!(
        result,
        Err(CtabError::Build(BuildError::MalformedSequence { index: 0 }))
    ));
}

#[test]
fn test_key_index_out_of_range() {
    let mut file = create_basic_ctab();
    let a = add_key_name(&mut file, "A");
    add_entry(&mut file, &[a], "ok");
    add_entry(&mut file, &[a, 5], "bad");

    let binary = create_ctab_binary(&file).unwrap();
    let result = CtabLoader::load(&binary);
    assert!(matches!(
        result,
        Err(CtabError::InvalidKeyIndex { entry: 1, key: 5, count: 1 })
    ));
}

#[test]
fn test_duplicate_key_name_is_rejected() {
    let mut file = create_basic_ctab();
    add_key_name(&mut file, "A");
    add_key_name(&mut file, "A");

    let binary = create_ctab_binary(&file).unwrap();
    assert!(matches!(CtabLoader::load(&binary), Err(CtabError::InvalidKeyName(1, _))));
}

#[test]
fn test_empty_key_name_is_rejected() {
    let mut file = create_basic_ctab();
    add_key_name(&mut file, "");

    let binary = create_ctab_binary(&file).unwrap();
    assert!(matches!(CtabLoader::load(&binary), Err(CtabError::InvalidKeyName(0, _))));
}

#[test]
fn test_invalid_utf8_output() {
    let mut binary = {
        let mut file = create_basic_ctab();
        let a = add_key_name(&mut file, "A");
        add_entry(&mut file, &[a], "xy");
        create_ctab_binary(&file).unwrap()
    };
    // Corrupt the last output byte
    let last = binary.len() - 1;
    binary[last] = 0xFF;
    assert!(matches!(CtabLoader::load(&binary), Err(CtabError::InvalidUtf8(_))));
}

#[test]
fn test_sequence_length_limit() {
    let mut file = create_basic_ctab();
    let a = add_key_name(&mut file, "A");
    add_entry(&mut file, &[a, a, a, a], "long");
    let binary = create_ctab_binary(&file).unwrap();

    let limits = LoadLimits {
        max_sequence_len: 3,
        ..LoadLimits::default()
    };
    assert!(matches!(
        CtabLoader::load_with_limits(&binary, &limits),
        Err(CtabError::LimitExceeded(_))
    ));
    assert!(CtabLoader::load(&binary).is_ok());
}

#[test]
fn test_metadata_entries() {
    let mut file = create_basic_ctab();
    add_info_text(&mut file, "name", "Latin accents");
    add_info_text(&mut file, "desc", "Dead keys for Western European languages");
    add_info_text(&mut file, "icon", "raw");

    let binary = create_ctab_binary(&file).unwrap();
    let table = SequenceTable::from_ctab(&binary).unwrap();
    let metadata = table.metadata();
    assert_eq!(metadata.name(), Some("Latin accents"));
    assert_eq!(metadata.description(), Some("Dead keys for Western European languages"));
    assert_eq!(metadata.get(b"icon"), Some(&b"raw"[..]));
    assert!(table.is_empty());
}

#[test]
fn test_save_and_load_file() {
    let table = grave_table();
    let path = std::env::temp_dir().join(format!("compose_core_test_{}.ctab", std::process::id()));

    table.save_file(&path).unwrap();
    let loaded = SequenceTable::load_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.lookup(&keys(&["DeadGrave", "LetterE"])), Some("è"));
}

#[test]
fn test_missing_file() {
    let result = SequenceTable::load_file("/nonexistent/compose/table.ctab");
    assert!(matches!(result, Err(CtabError::Io(_))));
}
