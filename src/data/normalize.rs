use super::model::{ChemicalRecord, Field, RawRow};

// ---------------------------------------------------------------------------
// Alias table: canonical field → candidate source keys, highest priority first
// ---------------------------------------------------------------------------

/// Header spellings seen in the CSV/spreadsheet exports of the registry.
const HEADER_ALIASES: [(Field, &[&str]); 9] = [
    (Field::TradeName, &["Trade name", "Trade Name", "Trade"]),
    (
        Field::ActiveIngredient,
        &["Active ingredient", "Active Ingredient", "Active"],
    ),
    (Field::Category, &["Category"]),
    (
        Field::TargetPestDisease,
        &["Target", "Target / Pest", "Target/Pest", "Target Pest/Disease"],
    ),
    (
        Field::RegistrationNotes,
        &["Registration notes", "Registration Notes", "Notes"],
    ),
    (
        Field::RegistrationHolder,
        &["Registration holder", "Registration Holder", "Holder"],
    ),
    (Field::MrlValue, &["MRL value", "MRL Value", "MRL"]),
    (Field::MrlUnit, &["MRL unit", "MRL Unit", "Unit"]),
    (Field::Registered, &["Registered", "Registered?"]),
];

/// Maps raw rows onto [`ChemicalRecord`]s using an ordered alias list per field.
///
/// Lookup is first-match-wins: the first candidate key whose value is present
/// and non-empty supplies the field. A field with no match is `""`; the row is
/// never rejected.
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: Vec<(Field, Vec<String>)>,
}

impl Normalizer {
    /// Normalizer for header-keyed rows (CSV, spreadsheets).
    pub fn headers() -> Self {
        let aliases = HEADER_ALIASES
            .iter()
            .map(|(field, keys)| (*field, keys.iter().map(|k| k.to_string()).collect()))
            .collect();
        Normalizer { aliases }
    }

    /// Normalizer for objects already in the canonical JSON shape: every field
    /// is read from its own snake_case key.
    pub fn canonical() -> Self {
        let aliases = Field::ALL
            .iter()
            .map(|field| (*field, vec![field.key().to_string()]))
            .collect();
        Normalizer { aliases }
    }

    /// Append `alias` as the lowest-priority candidate for `field`.
    pub fn with_alias(mut self, field: Field, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        match self.aliases.iter_mut().find(|(f, _)| *f == field) {
            Some((_, keys)) => keys.push(alias),
            None => self.aliases.push((field, vec![alias])),
        }
        self
    }

    /// Candidate keys for `field`, in priority order.
    pub fn candidates(&self, field: Field) -> &[String] {
        self.aliases
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }

    /// Build the canonical record for one raw row. The row is kept as `raw`.
    pub fn normalize(&self, row: RawRow) -> ChemicalRecord {
        let mut record = ChemicalRecord::default();
        for (field, keys) in &self.aliases {
            if let Some(value) = first_non_empty(&row, keys) {
                record.set(*field, value.to_string());
            }
        }
        record.raw = row;
        record
    }

    pub fn normalize_all(&self, rows: impl IntoIterator<Item = RawRow>) -> Vec<ChemicalRecord> {
        rows.into_iter().map(|row| self.normalize(row)).collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::headers()
    }
}

fn first_non_empty<'a>(row: &'a RawRow, keys: &[String]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| row.get(k))
        .map(String::as_str)
        .find(|v| !v.is_empty())
}
