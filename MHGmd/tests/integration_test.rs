use mhgmd::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Assemble a GMD file from its parts, sizes computed from the tables
fn build_gmd(version: u32, name: &str, entries: &[u8], names: &[&str], texts: &[&str]) -> Vec<u8> {
    let table = |strings: &[&str]| -> Vec<u8> {
        strings
            .iter()
            .flat_map(|s| s.bytes().chain(std::iter::once(0)))
            .collect()
    };
    let name_table = table(names);
    let text_table = table(texts);

    let mut data = Vec::new();
    data.extend_from_slice(b"GMD\0");
    data.extend_from_slice(&version.to_le_bytes());
    data.extend_from_slice(&1i32.to_le_bytes());
    data.extend_from_slice(&0x1122_3344_5566_7788u64.to_le_bytes());
    data.extend_from_slice(&(names.len() as u32).to_le_bytes());
    data.extend_from_slice(&(texts.len() as u32).to_le_bytes());
    data.extend_from_slice(&(name_table.len() as u32).to_le_bytes());
    data.extend_from_slice(&(text_table.len() as u32).to_le_bytes());
    data.extend_from_slice(&(name.len() as u32).to_le_bytes());
    data.extend_from_slice(name.as_bytes());
    data.push(0);
    data.extend_from_slice(entries);
    data.extend_from_slice(&name_table);
    data.extend_from_slice(&text_table);
    data
}

fn v1_entries(ids: &[u32]) -> Vec<u8> {
    ids.iter()
        .flat_map(|id| [id.to_le_bytes(), 0u32.to_le_bytes()].concat())
        .collect()
}

fn v2_entries(ids: &[u32]) -> Vec<u8> {
    ids.iter()
        .flat_map(|id| [*id, 7, 8, id * 16, 9].map(u32::to_le_bytes).concat())
        .collect()
}

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Header only, with the given counts and no body
fn bare_header(version: u32, label_count: u32, section_count: u32, label_size: u32) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"GMD\0");
    data.extend_from_slice(&version.to_le_bytes());
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend_from_slice(&0u64.to_le_bytes());
    for value in [label_count, section_count, label_size, 0, 0] {
        data.extend_from_slice(&value.to_le_bytes());
    }
    data.push(0);
    data
}

fn parse(data: &[u8]) -> GmdDocument {
    match parse_gmd_bytes(data).unwrap() {
        GmdLoad::Parsed(doc) => doc,
        GmdLoad::UnrecognizedFormat { magic } => panic!("not recognized: {magic:?}"),
    }
}

#[test]
fn test_minimal_v1_file_reencodes_identically() {
    let data = build_gmd(
        GmdVersion::V1_TAG,
        "q0000101",
        &v1_entries(&[0]),
        &["QUEST_NAME"],
        &["Hunt a Great Jaggi"],
    );

    let mut doc = parse(&data);
    assert_eq!(doc.version(), Some(GmdVersion::V1));
    assert_eq!(doc.language(), Some(Language::English));
    assert_eq!(doc.internal_name(), "q0000101");
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.labels()[0].name(), "QUEST_NAME");
    assert_eq!(doc.labels()[0].text(), "Hunt a Great Jaggi");
    assert_eq!(doc.header().unwrap().unknown, 0x1122_3344_5566_7788);

    assert_eq!(serialize_gmd(&mut doc).unwrap(), data);
}

#[test]
fn test_v2_unknown_block_preserved() {
    let mut entries = v2_entries(&[0, 1]);
    let block: Vec<u8> = [0x10u32, 0xFFFF_FFFF, 0, 0x000F_FFFF]
        .map(u32::to_le_bytes)
        .concat();
    entries.extend_from_slice(&block);

    let data = build_gmd(
        GmdVersion::V2_TAG,
        "armor",
        &entries,
        &["ARMOR_NAME_001", "ARMOR_EXPLAIN_001"],
        &["Leather Helm", "Basic headgear.", "trailing text"],
    );

    let mut doc = parse(&data);
    assert_eq!(doc.version(), Some(GmdVersion::V2));
    assert_eq!(doc.entries().len(), 2);
    assert_eq!(doc.entries().unknown_block(), Some(block.as_slice()));
    assert_eq!(doc.labels()[0].name(), "ARMOR_NAME_001");
    assert_eq!(doc.labels()[1].text(), "Basic headgear.");

    let bytes = serialize_gmd(&mut doc).unwrap();
    assert_eq!(bytes, data);
}

#[test]
fn test_v2_entries_carried_through() {
    let data = build_gmd(GmdVersion::V2_TAG, "w", &v2_entries(&[5]), &["A"], &["a"]);
    let doc = parse(&data);

    let EntryTable::V2 { entries, unknown_block } = doc.entries() else {
        panic!("expected a version 2 entry table");
    };
    assert_eq!(entries[0].id, 5);
    assert_eq!(entries[0].label_offset, 80);
    assert!(unknown_block.is_empty());
}

#[test]
fn test_edit_and_round_trip() {
    let data = build_gmd(
        GmdVersion::V1_TAG,
        "item",
        &v1_entries(&[0, 1]),
        &["ITEM_NAME_01", "ITEM_NAME_02"],
        &["Potion", "Mega Potion", "Unused"],
    );

    let mut doc = parse(&data);
    doc.set_text(1, "Mega Potion\r\nRestores a lot of health").unwrap();
    doc.set_text(2, "Ünused").unwrap();
    let bytes = serialize_gmd(&mut doc).unwrap();

    let reread = parse(&bytes);
    assert_eq!(reread.len(), 3);
    assert_eq!(reread.labels()[1].text(), "Mega Potion\r\nRestores a lot of health");
    assert_eq!(reread.labels()[2].text(), "Ünused");
    assert_eq!(reread.names(), doc.names());

    let header = reread.header().unwrap();
    let expected_sections: u32 = doc.labels().iter().map(|l| l.text().len() as u32 + 1).sum();
    assert_eq!(header.section_size, expected_sections);
    assert_eq!(header.label_size, 26);
}

#[test]
fn test_encoded_length() {
    let data = build_gmd(GmdVersion::V1_TAG, "ab", &v1_entries(&[0]), &["N"], &["t"]);
    let mut doc = parse(&data);
    let bytes = serialize_gmd(&mut doc).unwrap();
    assert_eq!(doc.header().unwrap().name_size, 2);
    assert_eq!(bytes.len(), 0x28 + 2 + 1 + 8 + 2 + 2);
}

#[test]
fn test_unnamed_tail_labels() {
    let data = build_gmd(
        GmdVersion::V1_TAG,
        "q",
        &v1_entries(&[0]),
        &["TITLE"],
        &["Title", "Extra one", "Extra two"],
    );

    let doc = parse(&data);
    assert_eq!(doc.label_count(), 1);
    assert_eq!(doc.labels()[1].name(), "");
    assert_eq!(doc.labels()[1].display_name(), "unnamed_00002");
    assert_eq!(doc.labels()[2].display_name(), "unnamed_00003");
    assert_eq!(doc.find_by_name("unnamed_00003").unwrap().text(), "Extra two");
}

#[test]
fn test_missing_name_table_not_written_back() {
    let mut data = build_gmd(GmdVersion::V1_TAG, "q", &v1_entries(&[0, 1]), &[], &["x", "y"]);
    // two labels, empty name table
    data[0x14..0x18].copy_from_slice(&2u32.to_le_bytes());

    let mut doc = parse(&data);
    assert_eq!(doc.names(), ["unnamed_00000", "unnamed_00001"]);
    assert_eq!(doc.labels()[1].name(), "unnamed_00001");
    assert!(!doc.summary().unwrap().has_name_table);

    let bytes = serialize_gmd(&mut doc).unwrap();
    assert_eq!(bytes, data);
}

#[test]
fn test_not_a_gmd_file() {
    let data = b"MSG\0\x01\x02\x01\x00rest of the file";

    match parse_gmd_bytes(data).unwrap() {
        GmdLoad::UnrecognizedFormat { magic } => assert_eq!(magic, b"MSG\0"),
        GmdLoad::Parsed(_) => panic!("should not parse"),
    }

    let doc = parse_gmd_bytes(data).unwrap().into_document();
    assert!(!doc.is_loaded());
    assert!(doc.is_empty());
}

#[test]
fn test_unloaded_document_is_not_saved() {
    let mut doc = GmdDocument::default();
    let err = serialize_gmd(&mut doc).unwrap_err();
    assert!(matches!(err, Error::DocumentNotLoaded));
}

#[test]
fn test_short_stream_is_not_gmd() {
    match parse_gmd_bytes(b"GM").unwrap() {
        GmdLoad::UnrecognizedFormat { magic } => assert_eq!(magic, b"GM"),
        GmdLoad::Parsed(_) => panic!("should not parse"),
    }
}

#[test]
fn test_truncated_header() {
    let data = build_gmd(GmdVersion::V1_TAG, "q", &v1_entries(&[0]), &["A"], &["a"]);
    let err = parse_gmd_bytes(&data[..0x20]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn test_unsupported_version_reads_texts() {
    let data = build_gmd(0x0001_0401, "q", &[], &["A"], &["a"]);
    let doc = parse(&data);
    assert_eq!(doc.version(), Some(GmdVersion::Unknown(0x0001_0401)));
    assert_eq!(
        doc.entries(),
        &EntryTable::Unsupported {
            version: 0x0001_0401
        }
    );
    assert_eq!(doc.labels()[0].text(), "a");
}

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("skill_eng.gmd");
    let data = build_gmd(
        GmdVersion::V1_TAG,
        "skill",
        &v1_entries(&[0, 1]),
        &["SKILL_01", "SKILL_02"],
        &["Attack Up", "Defense Up"],
    );
    std::fs::write(&path, &data).unwrap();

    let mut doc = read_gmd(&path).unwrap().into_document();
    doc.replace_all("Up", "Boost", true);
    write_gmd(&path, &mut doc).unwrap();

    let reread = read_gmd(&path).unwrap().into_document();
    assert_eq!(reread.labels()[0].text(), "Attack Boost");
    assert_eq!(reread.labels()[1].text(), "Defense Boost");

    let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_export_import_through_files() {
    let dir = tempdir().unwrap();
    let data = build_gmd(
        GmdVersion::V1_TAG,
        "q",
        &v1_entries(&[0, 1]),
        &["NAME_01", "NAME_02"],
        &["First\r\nline", "Second", "Tail"],
    );
    let mut doc = parse(&data);

    let csv = dir.path().join("q.csv");
    let options = ExportOptions {
        include_id: true,
        include_name: true,
    };
    assert_eq!(export_to_path(&doc, &csv, options).unwrap(), 3);
    let exported = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(
        exported,
        "0\tNAME_01\tFirst<br>line\n1\tNAME_02\tSecond\n2\tunnamed_00003\tTail\n"
    );

    std::fs::write(
        &csv,
        "0\tNAME_01\tPremier<br>ligne\n1\tNAME_02\tDeuxième\n2\tunnamed_00003\tFin\n",
    )
    .unwrap();
    let result = import_from_path(&mut doc, &csv, ImportMode::ByName).unwrap();
    assert_eq!(result.updated, 3);
    assert!(result.unmatched.is_empty());
    assert_eq!(doc.labels()[0].text(), "Premier\r\nligne");
    assert_eq!(doc.labels()[2].text(), "Fin");
}

#[test]
fn test_positional_import_count_mismatch_leaves_document() {
    let data = build_gmd(
        GmdVersion::V1_TAG,
        "q",
        &v1_entries(&[0, 1]),
        &["A", "B"],
        &["one", "two"],
    );
    let mut doc = parse(&data);

    let err = import_lines(&mut doc, "uno\ndos\ntres\n", ImportMode::Positional).unwrap_err();
    assert!(matches!(
        err,
        Error::RecordCountMismatch {
            expected: 2,
            found: 3
        }
    ));
    assert_eq!(doc.labels()[0].text(), "one");
    assert_eq!(serialize_gmd(&mut doc).unwrap(), data);
}

#[test]
fn test_merge_translations() {
    let target_data = build_gmd(
        GmdVersion::V1_TAG,
        "q",
        &v1_entries(&[0, 1]),
        &["NAME_01", "NAME_02"],
        &["Rathalos", "Rathian"],
    );
    let source_data = build_gmd(
        GmdVersion::V1_TAG,
        "q",
        &v1_entries(&[0]),
        &["NAME_02"],
        &["Rathian (fr)"],
    );

    let mut target = parse(&target_data);
    let source = parse(&source_data);
    let result = target.merge_texts_from(&source).unwrap();

    assert_eq!(result.updated, 1);
    assert_eq!(result.unmatched, vec!["NAME_01".to_string()]);
    assert_eq!(target.labels()[1].text(), "Rathian (fr)");
}

#[test]
fn test_from_reader_legacy_empty_document() {
    let mut cursor = std::io::Cursor::new(b"not a gmd".to_vec());
    let doc = GmdDocument::from_reader(&mut cursor).unwrap();
    assert!(!doc.is_loaded());
    assert_eq!(doc.len(), 0);
}

#[test]
fn test_huge_section_count_on_empty_body() {
    init_logging();
    let data = bare_header(0x0001_0401, 0, u32::MAX, 0);
    assert_eq!(data.len(), 41);

    let doc = parse(&data);
    assert!(doc.is_loaded());
    assert!(doc.is_empty());
}

#[test]
fn test_huge_label_count_on_empty_body() {
    init_logging();
    for label_size in [0, 1] {
        let data = bare_header(0x0001_0401, u32::MAX, u32::MAX, label_size);
        let doc = parse(&data);
        assert!(doc.is_empty());
    }

    let data = bare_header(GmdVersion::V1_TAG, u32::MAX, u32::MAX, 0);
    let err = parse_gmd_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn test_import_by_name_reports_unknown_names() {
    init_logging();
    let data = build_gmd(
        GmdVersion::V1_TAG,
        "q",
        &v1_entries(&[0, 1]),
        &["NAME_01", "NAME_02"],
        &["Rathalos", "Rathian"],
    );
    let mut doc = parse(&data);

    let result = import_lines(
        &mut doc,
        "NAME_01\tRathalos (de)\nNAME_99\tUnbekannt\n",
        ImportMode::ByName,
    )
    .unwrap();

    assert_eq!(result.updated, 1);
    assert_eq!(result.unmatched, vec!["NAME_99".to_string()]);
    assert_eq!(doc.labels()[0].text(), "Rathalos (de)");
    assert_eq!(doc.labels()[1].text(), "Rathian");
}

#[test]
fn test_import_by_name_needs_name_field() {
    let data = build_gmd(
        GmdVersion::V1_TAG,
        "q",
        &v1_entries(&[0, 1]),
        &["NAME_01", "NAME_02"],
        &["Rathalos", "Rathian"],
    );
    let mut doc = parse(&data);

    let err = import_lines(
        &mut doc,
        "NAME_01\tRathalos (de)\nno name here\n",
        ImportMode::ByName,
    )
    .unwrap_err();

    assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));
    assert_eq!(doc.labels()[0].text(), "Rathalos");
    assert_eq!(serialize_gmd(&mut doc).unwrap(), data);
}
