// tests/loading.rs
//
// Loading the registry from files on disk: formats, header spellings, fallback.
//
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use zip::write::SimpleFileOptions;

use rusty_avocado::data::loader::{load_bundled, load_file};
use rusty_avocado::{Category, Config, DataSource, Field as RecordField, FilterOptions, Session};

fn write_parquet(path: &Path) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Trade name", DataType::Utf8, true),
        Field::new("Category", DataType::Utf8, true),
        Field::new("MRL Value", DataType::Float64, true),
        Field::new("Registered?", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![Some("Scholar"), Some("Mildew Stop")])),
        Arc::new(StringArray::from(vec![Some("Post-harvest fungicide"), None])),
        Arc::new(Float64Array::from(vec![Some(5.0), None])),
        Arc::new(StringArray::from(vec![Some("Yes"), Some("No")])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_export_is_normalized_like_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.parquet");
    write_parquet(&path);

    let ds = load_file(&path).unwrap();
    assert!(matches!(ds.source, DataSource::Parquet(_)));
    assert_eq!(ds.len(), 2);

    let scholar = &ds.records[0];
    assert_eq!(scholar.trade_name, "Scholar");
    assert_eq!(scholar.mrl_value, "5");
    assert!(scholar.is_registered());

    let mildew = &ds.records[1];
    for field in RecordField::ALL {
        if field != RecordField::TradeName && field != RecordField::Registered {
            assert_eq!(mildew.get(field), "", "{field:?}");
        }
    }
}

const SHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn inline(cell: &str, text: &str) -> String {
    format!(r#"<c r="{cell}" t="inlineStr"><is><t>{text}</t></is></c>"#)
}

/// Smallest workbook a spreadsheet reader accepts: one sheet, inline strings,
/// row 3 left out entirely.
fn write_xlsx(path: &Path) {
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{SHEET_NS}"><sheetData>
<row r="1">{}{}{}{}</row>
<row r="2">{}{}<c r="C2"><v>5</v></c>{}</row>
<row r="4">{}{}</row>
</sheetData></worksheet>"#,
        inline("A1", "Trade name"),
        inline("B1", "Category"),
        inline("C1", "MRL Value"),
        inline("D1", "Registered?"),
        inline("A2", "Scholar"),
        inline("B2", "Post-harvest fungicide"),
        inline("D2", "Yes"),
        inline("A4", "Mildew Stop"),
        inline("D4", "No"),
    );
    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#
                .to_string(),
        ),
        (
            "_rels/.rels",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="{REL_NS}/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#
            ),
        ),
        (
            "xl/workbook.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{SHEET_NS}" xmlns:r="{REL_NS}"><sheets><sheet name="Registry" sheetId="1" r:id="rId1"/></sheets></workbook>"#
            ),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="{REL_NS}/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#
            ),
        ),
        ("xl/worksheets/sheet1.xml", sheet),
    ];

    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    for (name, body) in parts {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn xlsx_first_sheet_is_normalized_like_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.xlsx");
    write_xlsx(&path);

    let ds = load_file(&path).unwrap();
    assert!(matches!(ds.source, DataSource::Workbook(_)));
    // the all-empty row 3 is not a product
    assert_eq!(ds.len(), 2);

    let scholar = &ds.records[0];
    assert_eq!(scholar.trade_name, "Scholar");
    assert_eq!(scholar.category, "Post-harvest fungicide");
    assert_eq!(scholar.mrl_value, "5");
    assert!(scholar.is_registered());

    let mildew = &ds.records[1];
    assert_eq!(mildew.trade_name, "Mildew Stop");
    assert_eq!(mildew.category, "");
    assert_eq!(mildew.mrl_value, "");
    assert!(!mildew.is_registered());

    let mut session = Session::new(ds);
    session.select_category(Category::Postharvest, &FilterOptions::default());
    let names: Vec<&str> = session.last_results().map(|r| r.trade_name.as_str()).collect();
    assert_eq!(names, ["Scholar"]);
}

#[test]
fn unreadable_workbook_is_a_reported_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    fs::write(&path, "not a zip archive").unwrap();
    assert!(load_file(&path).is_err());
}

#[test]
fn csv_fallback_feeds_a_session() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Avocado registred Chemicals.csv"),
        "Trade,Active Ingredient,Category,Target Pest/Disease,Notes,Registered\n\
         Success,Spinosad,Insecticide,Fruit fly,,Yes\n\
         Prodigy,Methoxyfenozide,Growth regulator,Looper,,No\n\
         Mildew Stop,Copper,Fungicide,Anthracnose,Pre-harvest,Yes\n",
    )
    .unwrap();

    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    // chemical.json does not exist, so this must come from the CSV
    let ds = load_bundled(&config.json_path(), &config.csv_path());
    assert!(matches!(ds.source, DataSource::Csv(_)));

    let mut session = Session::new(ds);
    session.select_category(Category::Insecticides, &FilterOptions::default());
    let names: Vec<&str> = session.last_results().map(|r| r.trade_name.as_str()).collect();
    assert_eq!(names, ["Success", "Prodigy"]);

    session.select_category(Category::Insecticides, &FilterOptions::registered_only());
    let names: Vec<&str> = session.last_results().map(|r| r.trade_name.as_str()).collect();
    assert_eq!(names, ["Success"]);
}

#[test]
fn json_wins_over_csv_when_both_exist() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("chemical.json");
    let csv = dir.path().join("data.csv");
    fs::write(&json, r#"[{"trade_name":"FromJson","category":"Adjuvant"}]"#).unwrap();
    fs::write(&csv, "Trade name,Category\nFromCsv,Adjuvant\n").unwrap();

    let ds = load_bundled(&json, &csv);
    assert_eq!(ds.records[0].trade_name, "FromJson");
    // canonical JSON keeps its own keys as the raw row
    assert_eq!(ds.records[0].raw.get("category").map(String::as_str), Some("Adjuvant"));
}

#[test]
fn nothing_loadable_gives_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let ds = load_bundled(&dir.path().join("a.json"), &dir.path().join("b.csv"));
    assert_eq!(ds.source, DataSource::Empty);

    let session = Session::new(ds);
    assert!(session.dataset().is_empty());
    assert!(session.status_message.is_some());
}
