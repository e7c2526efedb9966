use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RawRow – one source row, keyed by whatever headers the source used
// ---------------------------------------------------------------------------

/// A source row before normalization: header → cell text.
pub type RawRow = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Field – the canonical column set
// ---------------------------------------------------------------------------

/// One of the canonical record fields, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TradeName,
    ActiveIngredient,
    Category,
    TargetPestDisease,
    RegistrationNotes,
    RegistrationHolder,
    MrlValue,
    MrlUnit,
    Registered,
}

impl Field {
    /// Every canonical field in canonical order.
    pub const ALL: [Field; 9] = [
        Field::TradeName,
        Field::ActiveIngredient,
        Field::Category,
        Field::TargetPestDisease,
        Field::RegistrationNotes,
        Field::RegistrationHolder,
        Field::MrlValue,
        Field::MrlUnit,
        Field::Registered,
    ];

    /// Columns shown when listing results.
    pub const LIST_COLUMNS: [Field; 4] = [
        Field::TradeName,
        Field::ActiveIngredient,
        Field::Category,
        Field::TargetPestDisease,
    ];

    /// Columns a free-text query is matched against.
    pub const SEARCHABLE: [Field; 7] = [
        Field::TradeName,
        Field::ActiveIngredient,
        Field::Category,
        Field::TargetPestDisease,
        Field::RegistrationNotes,
        Field::RegistrationHolder,
        Field::MrlValue,
    ];

    /// Key used by the canonical JSON shape.
    pub fn key(self) -> &'static str {
        match self {
            Field::TradeName => "trade_name",
            Field::ActiveIngredient => "active_ingredient",
            Field::Category => "category",
            Field::TargetPestDisease => "target_pest_disease",
            Field::RegistrationNotes => "registration_notes",
            Field::RegistrationHolder => "registration_holder",
            Field::MrlValue => "mrl_value",
            Field::MrlUnit => "mrl_unit",
            Field::Registered => "registered",
        }
    }

    /// Human-readable column header.
    pub fn label(self) -> &'static str {
        match self {
            Field::TradeName => "Trade name",
            Field::ActiveIngredient => "Active ingredient",
            Field::Category => "Category",
            Field::TargetPestDisease => "Target / Pest / Disease",
            Field::RegistrationNotes => "Registration notes",
            Field::RegistrationHolder => "Registration holder",
            Field::MrlValue => "MRL value",
            Field::MrlUnit => "MRL unit",
            Field::Registered => "Registered",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ChemicalRecord – one normalized product registration
// ---------------------------------------------------------------------------

/// A single product registration in canonical shape.
///
/// Every field is a plain `String`; anything the source did not provide is
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalRecord {
    pub trade_name: String,
    pub active_ingredient: String,
    pub category: String,
    pub target_pest_disease: String,
    pub registration_notes: String,
    pub registration_holder: String,
    pub mrl_value: String,
    pub mrl_unit: String,
    pub registered: String,
    /// The row exactly as the source delivered it.
    pub raw: RawRow,
}

impl ChemicalRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::TradeName => &self.trade_name,
            Field::ActiveIngredient => &self.active_ingredient,
            Field::Category => &self.category,
            Field::TargetPestDisease => &self.target_pest_disease,
            Field::RegistrationNotes => &self.registration_notes,
            Field::RegistrationHolder => &self.registration_holder,
            Field::MrlValue => &self.mrl_value,
            Field::MrlUnit => &self.mrl_unit,
            Field::Registered => &self.registered,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::TradeName => &mut self.trade_name,
            Field::ActiveIngredient => &mut self.active_ingredient,
            Field::Category => &mut self.category,
            Field::TargetPestDisease => &mut self.target_pest_disease,
            Field::RegistrationNotes => &mut self.registration_notes,
            Field::RegistrationHolder => &mut self.registration_holder,
            Field::MrlValue => &mut self.mrl_value,
            Field::MrlUnit => &mut self.mrl_unit,
            Field::Registered => &mut self.registered,
        };
        *slot = value;
    }

    /// Whether the registration flag reads exactly "yes" (any case).
    pub fn is_registered(&self) -> bool {
        self.registered.to_lowercase() == "yes"
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded collection
// ---------------------------------------------------------------------------

/// Where the current dataset came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Json(String),
    Csv(String),
    Parquet(String),
    /// First worksheet of a spreadsheet workbook.
    Workbook(String),
    /// Nothing could be loaded.
    Empty,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Json(p) => write!(f, "JSON ({p})"),
            DataSource::Csv(p) => write!(f, "CSV ({p})"),
            DataSource::Parquet(p) => write!(f, "Parquet ({p})"),
            DataSource::Workbook(p) => write!(f, "workbook ({p})"),
            DataSource::Empty => write!(f, "<no data>"),
        }
    }
}

/// An ordered collection of records. Position is the only identity a record has.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<ChemicalRecord>,
    pub source: DataSource,
}

impl Dataset {
    pub fn from_records(records: Vec<ChemicalRecord>, source: DataSource) -> Self {
        Dataset { records, source }
    }

    /// The state when every source failed.
    pub fn empty() -> Self {
        Dataset {
            records: Vec::new(),
            source: DataSource::Empty,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_cover_every_field() {
        let mut rec = ChemicalRecord::default();
        for (i, field) in Field::ALL.iter().enumerate() {
            rec.set(*field, format!("v{i}"));
        }
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(rec.get(*field), format!("v{i}"));
        }
    }

    #[test]
    fn registered_flag_is_exact_yes() {
        let mut rec = ChemicalRecord::default();
        for (value, expected) in [("Yes", true), ("YES", true), ("yes ", false), ("y", false), ("", false)] {
            rec.registered = value.to_string();
            assert_eq!(rec.is_registered(), expected, "value {value:?}");
        }
    }

    #[test]
    fn field_keys_match_serde_names() {
        let json = serde_json::to_value(ChemicalRecord::default()).unwrap();
        let obj = json.as_object().unwrap();
        for field in Field::ALL {
            assert!(obj.contains_key(field.key()), "missing {}", field.key());
        }
    }
}
