use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{DataSource, Dataset, RawRow};
use super::normalize::Normalizer;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bundled dataset: JSON first, then CSV, then nothing.
///
/// Never fails. Each failed source is logged and the next one is tried; when
/// both fail the result is [`Dataset::empty`].
pub fn load_bundled(json_path: &Path, csv_path: &Path) -> Dataset {
    match load_json(json_path) {
        Ok(ds) => return ds,
        Err(e) => warn!("no usable JSON dataset, trying CSV: {e}"),
    }
    match load_csv(csv_path) {
        Ok(ds) => ds,
        Err(e) => {
            warn!("no data loaded: {e}");
            Dataset::empty()
        }
    }
}

/// Load a user-supplied file. Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – array of objects in the canonical record shape
/// * `.csv`     – header row plus one product per line
/// * `.parquet` – a spreadsheet exported with pandas/polars; every column is
///   stringified and the headers are normalized like CSV headers
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet of a
///   workbook, first row as headers
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// [
///   {
///     "trade_name": "BioKill",
///     "active_ingredient": "Spinosad 480 SC",
///     "category": "Insecticide",
///     "target_pest_disease": "Fruit fly",
///     "registration_notes": "",
///     "mrl_value": 0.5
///   },
///   ...
/// ]
/// ```
///
/// Values that are not strings are stringified; `null` becomes `""`.
pub fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_json_rows(&text).map_err(|e| match e {
        JsonShapeError::Syntax(source) => LoadError::Json {
            path: path.to_path_buf(),
            source,
        },
        JsonShapeError::NotAnArray => LoadError::NotAnArray {
            path: path.to_path_buf(),
        },
    })?;

    let records = Normalizer::canonical().normalize_all(rows);
    info!("loaded {} rows from {}", records.len(), path.display());
    Ok(Dataset::from_records(
        records,
        DataSource::Json(path.display().to_string()),
    ))
}

enum JsonShapeError {
    Syntax(serde_json::Error),
    NotAnArray,
}

fn parse_json_rows(text: &str) -> Result<Vec<RawRow>, JsonShapeError> {
    let root: JsonValue = serde_json::from_str(text).map_err(JsonShapeError::Syntax)?;
    let items = root.as_array().ok_or(JsonShapeError::NotAnArray)?;

    let mut rows = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            warn!("JSON item {i} is not an object, skipping");
            continue;
        };
        let row: RawRow = obj
            .iter()
            .map(|(k, v)| (k.clone(), json_to_string(v)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn json_to_string(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, any spelling the normalizer knows.
/// Short or long rows are tolerated; a record the parser cannot read at all is
/// skipped with a warning.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let rows = read_csv_rows(&mut reader).map_err(csv_err)?;

    let records = Normalizer::headers().normalize_all(rows);
    info!("loaded {} CSV rows from {}", records.len(), path.display());
    Ok(Dataset::from_records(
        records,
        DataSource::Csv(path.display().to_string()),
    ))
}

/// Read header-keyed rows. Truly empty lines are dropped by the csv reader
/// itself; a line of bare separators (`,,,`) is a row of empty cells and stays.
pub fn read_csv_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<RawRow>, csv::Error> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping CSV row {row_no}: {e}");
                continue;
            }
        };
        let mut row = RawRow::new();
        for (col_idx, value) in record.iter().enumerate() {
            // cells past the last header have no name to go under
            let Some(col_name) = headers.get(col_idx) else {
                continue;
            };
            row.insert(col_name.clone(), value.to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// Load the first worksheet of a spreadsheet workbook.
///
/// The first row holds the headers; every later row becomes a raw row with
/// each cell rendered as text (empty cell → `""`). Rows with no cell content
/// at all are skipped, as are cells past the last header.
pub fn load_workbook(path: &Path) -> Result<Dataset, LoadError> {
    let workbook_err = |source| LoadError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_err)?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|cells| {
            cells
                .iter()
                .map(|c| data_to_string(c).trim_matches('\u{feff}').to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut rows = Vec::new();
    for (row_no, cells) in sheet_rows.enumerate() {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            debug!("skipping empty worksheet row {row_no}");
            continue;
        }
        let row: RawRow = headers
            .iter()
            .zip(cells)
            .map(|(h, c)| (h.clone(), data_to_string(c)))
            .collect();
        rows.push(row);
    }

    let records = Normalizer::headers().normalize_all(rows);
    info!("loaded {} worksheet rows from {}", records.len(), path.display());
    Ok(Dataset::from_records(
        records,
        DataSource::Workbook(path.display().to_string()),
    ))
}

fn data_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of the registry spreadsheet.
///
/// Every column becomes a raw-row entry keyed by its header; the values are
/// rendered as text (null → `""`), then normalized with the CSV header aliases.
/// Works with files written by both **pandas** (`df.to_parquet()`) and
/// **polars** (`df.write_parquet()`).
pub fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let parquet_err = |source| LoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(parquet_err)?
        .build()
        .map_err(parquet_err)?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|source| LoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = batch.schema();
        let columns: Vec<(String, &Arc<dyn Array>)> = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(f, col)| (f.name().clone(), col))
            .collect();

        for row_idx in 0..batch.num_rows() {
            let row: RawRow = columns
                .iter()
                .map(|(name, col)| (name.clone(), cell_to_string(col, row_idx)))
                .collect();
            rows.push(row);
        }
    }

    let records = Normalizer::headers().normalize_all(rows);
    info!("loaded {} Parquet rows from {}", records.len(), path.display());
    Ok(Dataset::from_records(
        records,
        DataSource::Parquet(path.display().to_string()),
    ))
}

// -- Parquet / Arrow helpers --

/// Render a single Arrow cell as text.
fn cell_to_string(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|a| a.value(row).to_string())
            .unwrap_or_default(),
        // dates, decimals, dictionaries: let arrow's display do it
        _ => ArrayFormatter::try_new(col.as_ref(), &FormatOptions::default())
            .map(|f| f.value(row).to_string())
            .unwrap_or_default(),
    }
}
