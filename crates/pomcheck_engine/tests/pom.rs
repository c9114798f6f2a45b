use std::fs;

use pomcheck_engine::{decode_pom, load_pom, PomError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn utf8_pom_decodes_as_is() {
    let decoded = decode_pom("<project><name>Zoë</name></project>".as_bytes()).unwrap();
    assert_eq!(decoded.text, "<project><name>Zoë</name></project>");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn bom_is_stripped() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"<project/>");

    let decoded = decode_pom(&bytes).unwrap();
    assert_eq!(decoded.text, "<project/>");
}

#[test]
fn xml_declaration_selects_encoding() {
    let mut bytes =
        br#"<?xml version="1.0" encoding="ISO-8859-1"?><project><name>"#.to_vec();
    bytes.push(0xE9); // e-acute in Latin-1
    bytes.extend_from_slice(b"</name></project>");

    let decoded = decode_pom(&bytes).unwrap();
    assert_eq!(decoded.encoding_label, "windows-1252");
    assert!(decoded.text.contains("<name>\u{e9}</name>"));
}

#[test]
fn load_keeps_file_name_and_text() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pom.xml");
    fs::write(&path, "<project/>").unwrap();

    let pom = load_pom(&path).unwrap();
    assert_eq!(pom.name, "pom.xml");
    assert_eq!(pom.content, "<project/>");
}

#[test]
fn missing_file_reports_read_error() {
    let temp = TempDir::new().unwrap();
    let err = load_pom(&temp.path().join("absent.pom")).unwrap_err();
    assert!(matches!(err, PomError::Read { .. }));
}
