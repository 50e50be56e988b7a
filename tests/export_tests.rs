//! Sheet export tests against real workbooks

use langsheet::config::ExportConfig;
use langsheet::excel::WorkbookReader;
use langsheet::exporter::SheetExporter;
use langsheet::types::SheetMapping;
use langsheet::LangError;
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

enum Cell<'a> {
    Num(f64),
    Text(&'a str),
    Blank,
}

use Cell::{Blank, Num, Text};

fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Num(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Blank => {}
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

fn header() -> Vec<Cell<'static>> {
    vec![Text("id"), Text("en"), Text("zh")]
}

/// Workbook with the sheets a small game ships, plus its output root
fn fixture() -> (TempDir, ExportConfig) {
    let temp_dir = TempDir::new().unwrap();
    let workbook = temp_dir.path().join("config.xlsx");
    write_workbook(
        &workbook,
        &[
            (
                "loading-language",
                vec![
                    header(),
                    vec![Num(1.0), Text("Loading..."), Text("加载中...")],
                    vec![Num(2.0), Text("Done"), Text("完成")],
                ],
            ),
            (
                "game1-language",
                vec![
                    header(),
                    vec![Text("win"), Text("You win!"), Text("你赢了！")],
                    vec![Text("undo"), Text("Undo"), Text("撤销")],
                    vec![Blank, Blank, Blank],
                    vec![Text("win"), Text("Victory!"), Text("胜利！")],
                ],
            ),
            ("empty-language", vec![header()]),
            ("narrow-language", vec![vec![Text("id"), Text("en")], vec![Num(1.0), Text("x")]]),
        ],
    );

    let output_root = temp_dir.path().join("assets");
    for bundle in ["loading", "game1", "empty"] {
        fs::create_dir_all(output_root.join(bundle).join("language/json")).unwrap();
    }

    let config = ExportConfig {
        workbook,
        output_root,
        ..Default::default()
    };
    (temp_dir, config)
}

fn json_dir(config: &ExportConfig, bundle: &str) -> PathBuf {
    config.output_root.join(bundle).join("language/json")
}

fn read_json(path: &Path) -> Map<String, Value> {
    let content = fs::read_to_string(path).unwrap();
    match serde_json::from_str(&content).unwrap() {
        Value::Object(map) => map,
        other => panic!("Expected JSON object, got {}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_loading_language() {
    let (_temp_dir, config) = fixture();
    let dir = json_dir(&config, "loading");
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let report = exporter
        .export(&mut workbook, &SheetMapping::new("loading-language"))
        .unwrap();

    assert_eq!(report.bundle, "loading");
    assert_eq!(report.entries, 2);
    assert_eq!(report.written, vec![dir.join("en.json"), dir.join("zh.json")]);
    assert_eq!(
        fs::read_to_string(dir.join("en.json")).unwrap(),
        r#"{"1":"Loading...","2":"Done"}"#
    );
    assert_eq!(
        fs::read_to_string(dir.join("zh.json")).unwrap(),
        r#"{"1":"加载中...","2":"完成"}"#
    );
}

#[test]
fn test_export_bundle_is_prefix_of_sheet_name() {
    let (_temp_dir, config) = fixture();
    let root = config.output_root.clone();
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    exporter
        .export(&mut workbook, &SheetMapping::new("game1-language"))
        .unwrap();

    assert!(root.join("game1/language/json/en.json").is_file());
    assert!(!root.join("game1-language").exists());
}

#[test]
fn test_export_key_sets_match_and_follow_rows() {
    let (_temp_dir, config) = fixture();
    let dir = json_dir(&config, "game1");
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let report = exporter
        .export(&mut workbook, &SheetMapping::new("game1-language"))
        .unwrap();

    let en = read_json(&dir.join("en.json"));
    let zh = read_json(&dir.join("zh.json"));
    let en_keys: Vec<_> = en.keys().collect();
    let zh_keys: Vec<_> = zh.keys().collect();
    assert_eq!(en_keys, zh_keys);
    assert_eq!(en_keys, vec!["win", "undo"]);

    // Later row wins for a repeated id
    assert_eq!(en["win"], "Victory!");
    assert_eq!(zh["win"], "胜利！");
    assert_eq!(report.duplicates, vec!["win".to_string()]);
    assert!(!en.contains_key("id"));
}

#[test]
fn test_export_header_only_sheet_writes_empty_objects() {
    let (_temp_dir, config) = fixture();
    let dir = json_dir(&config, "empty");
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    exporter
        .export(&mut workbook, &SheetMapping::new("empty-language"))
        .unwrap();

    assert_eq!(fs::read_to_string(dir.join("en.json")).unwrap(), "{}");
    assert_eq!(fs::read_to_string(dir.join("zh.json")).unwrap(), "{}");
}

#[test]
fn test_export_is_idempotent() {
    let (_temp_dir, config) = fixture();
    let dir = json_dir(&config, "game1");
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);
    let mapping = SheetMapping::new("game1-language");

    exporter.export(&mut workbook, &mapping).unwrap();
    let first = fs::read(dir.join("zh.json")).unwrap();
    exporter.export(&mut workbook, &mapping).unwrap();
    let second = fs::read(dir.join("zh.json")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_export_explicit_bundle() {
    let (_temp_dir, config) = fixture();
    let root = config.output_root.clone();
    let config = ExportConfig {
        create_dirs: true,
        ..config
    };
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let report = exporter
        .export(
            &mut workbook,
            &SheetMapping::with_bundle("loading-language", "boot"),
        )
        .unwrap();

    assert_eq!(report.bundle, "boot");
    assert!(root.join("boot/language/json/zh.json").is_file());
}

#[test]
fn test_export_all_in_order() {
    let (_temp_dir, config) = fixture();
    let config = ExportConfig {
        sheets: vec![
            SheetMapping::new("loading-language"),
            SheetMapping::new("game1-language"),
        ],
        ..config
    };
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let reports = exporter.export_all(&mut workbook).unwrap();
    let bundles: Vec<_> = reports.iter().map(|r| r.bundle.as_str()).collect();
    assert_eq!(bundles, vec!["loading", "game1"]);
}

#[test]
fn test_export_pretty() {
    let (_temp_dir, config) = fixture();
    let dir = json_dir(&config, "loading");
    let config = ExportConfig {
        pretty: true,
        atomic: false,
        ..config
    };
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    exporter
        .export(&mut workbook, &SheetMapping::new("loading-language"))
        .unwrap();

    assert_eq!(
        fs::read_to_string(dir.join("en.json")).unwrap(),
        "{\n  \"1\": \"Loading...\",\n  \"2\": \"Done\"\n}"
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_missing_sheet_writes_nothing() {
    let (_temp_dir, config) = fixture();
    let dir = json_dir(&config, "loading");
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let result = exporter.export(&mut workbook, &SheetMapping::new("loading-lang"));

    match result {
        Err(LangError::SheetNotFound { sheet, available }) => {
            assert_eq!(sheet, "loading-lang");
            assert!(available.contains(&"loading-language".to_string()));
        }
        other => panic!("Expected SheetNotFound, got {:?}", other),
    }
    assert_eq!(fs::read_dir(dir).unwrap().count(), 0);
}

#[test]
fn test_export_missing_output_dir() {
    let (_temp_dir, config) = fixture();
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let result = exporter.export(
        &mut workbook,
        &SheetMapping::with_bundle("loading-language", "nowhere"),
    );
    assert!(matches!(result, Err(LangError::Io(_))));
}

#[test]
fn test_export_narrow_sheet_is_malformed() {
    let (_temp_dir, config) = fixture();
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let result = exporter.export(&mut workbook, &SheetMapping::new("narrow-language"));
    assert!(matches!(result, Err(LangError::MalformedSheet { .. })));
}

#[test]
fn test_export_empty_bundle_rejected() {
    let (_temp_dir, config) = fixture();
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let result = exporter.export(&mut workbook, &SheetMapping::new("-language"));
    assert!(matches!(result, Err(LangError::InvalidBundle(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKBOOK READER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_reader_lists_sheets_in_order() {
    let (_temp_dir, config) = fixture();
    let workbook = WorkbookReader::open(&config.workbook).unwrap();

    assert_eq!(
        workbook.sheet_names(),
        vec![
            "loading-language",
            "game1-language",
            "empty-language",
            "narrow-language"
        ]
    );
    assert!(workbook.has_sheet("game1-language"));
    assert!(!workbook.has_sheet("game2-language"));
}

#[test]
fn test_check_reports_without_writing() {
    let (_temp_dir, config) = fixture();
    let dir = json_dir(&config, "game1");
    let mut workbook = WorkbookReader::open(&config.workbook).unwrap();
    let exporter = SheetExporter::new(config);

    let report = exporter
        .check(&mut workbook, &SheetMapping::new("game1-language"))
        .unwrap();

    assert_eq!(report.entries, 2);
    assert!(report.has_issues());
    assert!(report.written.is_empty());
    assert_eq!(fs::read_dir(dir).unwrap().count(), 0);
}
