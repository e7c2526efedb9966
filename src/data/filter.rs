use super::model::{ChemicalRecord, Field};
use super::predicates::{DerivedFields, Predicate};

// ---------------------------------------------------------------------------
// Filter options and outcomes
// ---------------------------------------------------------------------------

/// Restrictions applied before any predicate or query test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Only consider records whose `registered` flag is "yes".
    pub registered_only: bool,
}

impl FilterOptions {
    pub fn registered_only() -> Self {
        FilterOptions {
            registered_only: true,
        }
    }

    fn admits(&self, record: &ChemicalRecord) -> bool {
        !self.registered_only || record.is_registered()
    }
}

/// Result of a free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The query was blank and nothing else narrowed the search.
    EmptyQuery,
    /// Indices of matching records in dataset order; may be empty.
    Matches(Vec<usize>),
}

impl QueryOutcome {
    /// Matching indices, or an empty slice for [`QueryOutcome::EmptyQuery`].
    pub fn indices(&self) -> &[usize] {
        match self {
            QueryOutcome::EmptyQuery => &[],
            QueryOutcome::Matches(idx) => idx,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records that pass `predicate`, in input order.
///
/// Each record is judged on its own, so the output is a stable subsequence of
/// the input and re-applying the same predicate to it changes nothing.
pub fn apply_predicate(
    records: &[ChemicalRecord],
    predicate: Predicate,
    options: &FilterOptions,
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| options.admits(rec))
        .filter(|(_, rec)| predicate(&DerivedFields::new(rec)))
        .map(|(i, _)| i)
        .collect()
}

/// Case-insensitive substring search over [`Field::SEARCHABLE`].
///
/// * blank query, `registered_only` off → [`QueryOutcome::EmptyQuery`]
/// * blank query, `registered_only` on → every registered record
/// * otherwise → records where any searchable field contains the query
pub fn apply_query(
    records: &[ChemicalRecord],
    query: &str,
    options: &FilterOptions,
) -> QueryOutcome {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() && !options.registered_only {
        return QueryOutcome::EmptyQuery;
    }

    let matches = records
        .iter()
        .enumerate()
        .filter(|(_, rec)| options.admits(rec))
        .filter(|(_, rec)| needle.is_empty() || matches_text(rec, &needle))
        .map(|(i, _)| i)
        .collect();
    QueryOutcome::Matches(matches)
}

/// `needle` must already be lower-cased.
fn matches_text(record: &ChemicalRecord, needle: &str) -> bool {
    Field::SEARCHABLE
        .iter()
        .any(|f| record.get(*f).to_lowercase().contains(needle))
}
