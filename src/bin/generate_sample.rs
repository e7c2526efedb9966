use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use rusty_avocado::config::{DEFAULT_CSV_FILE, DEFAULT_JSON_FILE};
use rusty_avocado::{ChemicalRecord, Field as RecordField};

/// (trade, active, category, target, notes, holder, mrl, unit, registered)
const PRODUCTS: [[&str; 9]; 10] = [
    ["Success Neo", "Spinosad 120 g/L", "Insecticide", "Fruit fly; leafroller", "Permit PER13859", "Corteva", "0.3", "mg/kg", "Yes"],
    ["BioKill", "Azadirachtin 10 g/L", "Insecticide - biological", "Thrips", "", "BioAg", "", "", "Yes"],
    ["Prodigy", "Methoxyfenozide 240 g/L", "Growth regulator", "Looper caterpillar", "Label", "Corteva", "0.5", "mg/kg", "Yes"],
    ["Mildew Stop", "Copper hydroxide", "Fungicide", "Anthracnose", "Pre-harvest only", "Nufarm", "", "", "Yes"],
    ["FungX", "Phosphorous acid 600 g/L", "Fungicide", "Phytophthora root rot", "Trunk injection", "Agri-Fos", "100", "mg/kg", "No"],
    ["Sprayfix", "Nonyl phenol ethylene oxide", "Adjuvant", "", "Wetting agent", "Amgrow", "", "", "Yes"],
    ["Weedout 450", "Glyphosate 450 g/L", "Herbicide", "Annual grasses", "Inter-row only", "Sinochem", "0.1", "mg/kg", "Yes"],
    ["Sporekill PH", "Didecyldimethylammonium chloride", "Post-harvest sanitiser", "Stem end rot", "Packhouse dip", "ICA", "", "", "Yes"],
    ["Scholar", "Fludioxonil 230 g/L", "Post-harvest fungicide", "Anthracnose; stem end rot", "", "Syngenta", "5", "mg/kg", "No"],
    ["InsectaShield", "Paraffinic oil", "Miticide", "Six-spotted mite", "", "Ampol", "", "", ""],
];

/// Alternate header spellings, as seen across registry exports.
const CSV_HEADERS: [&str; 9] = [
    "Trade Name",
    "Active ingredient",
    "Category",
    "Target/Pest",
    "Registration Notes",
    "Registration holder",
    "MRL",
    "MRL unit",
    "Registered",
];

fn records() -> Vec<ChemicalRecord> {
    PRODUCTS
        .iter()
        .map(|row| {
            let mut rec = ChemicalRecord::default();
            for (field, value) in RecordField::ALL.iter().zip(row.iter()) {
                rec.set(*field, value.to_string());
            }
            rec
        })
        .collect()
}

fn write_json(path: &Path) -> Result<()> {
    let items: Vec<serde_json::Value> = records()
        .iter()
        .map(|rec| {
            let obj: serde_json::Map<String, serde_json::Value> = RecordField::ALL
                .iter()
                .map(|f| (f.key().to_string(), serde_json::Value::from(rec.get(*f))))
                .collect();
            serde_json::Value::Object(obj)
        })
        .collect();
    let text = serde_json::to_string_pretty(&items)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn write_csv(path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(CSV_HEADERS)?;
    for row in &PRODUCTS {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(
        CSV_HEADERS
            .iter()
            .map(|h| Field::new(*h, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let columns: Vec<ArrayRef> = (0..CSV_HEADERS.len())
        .map(|col| {
            // blank cells become nulls, like a spreadsheet export would write them
            let values: Vec<Option<&str>> = PRODUCTS
                .iter()
                .map(|row| Some(row[col]).filter(|v| !v.is_empty()))
                .collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    write_json(&out_dir.join(DEFAULT_JSON_FILE))?;
    write_csv(&out_dir.join(DEFAULT_CSV_FILE))?;
    write_parquet(&out_dir.join("registry.parquet"))?;

    println!(
        "Wrote {} products (JSON, CSV, Parquet) to {}",
        PRODUCTS.len(),
        out_dir.display()
    );
    Ok(())
}
