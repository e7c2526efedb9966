use log::debug;

use crate::data::filter::{apply_predicate, apply_query, FilterOptions, QueryOutcome};
use crate::data::model::{ChemicalRecord, DataSource, Dataset};
use crate::data::predicates::Category;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// What the last filter call produced, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Nothing is loaded at all.
    NoData,
    /// A blank query with no other restriction.
    EnterSearchTerm,
    /// Dataset indices of the matches, in dataset order. May be empty.
    Rows { title: String, indices: Vec<usize> },
}

/// One viewer session: the loaded dataset and the last filtered result.
///
/// Detail lookups are positions in the last result, not in the dataset, so
/// every new filter call invalidates earlier positions.
#[derive(Debug, Default)]
pub struct Session {
    dataset: Dataset,
    last_filtered: Vec<usize>,
    /// Status message for the presentation layer.
    pub status_message: Option<String>,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        let mut session = Session::default();
        session.replace_dataset(dataset);
        session
    }

    /// Swap in a freshly loaded dataset. The previous one is dropped whole.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        debug!("session dataset replaced: {} rows from {}", dataset.len(), dataset.source);
        self.status_message = dataset.is_empty().then(|| empty_message(&dataset.source));
        self.dataset = dataset;
        self.last_filtered.clear();
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Records of the category, optionally registered only.
    pub fn select_category(&mut self, category: Category, options: &FilterOptions) -> SearchResult {
        if self.dataset.is_empty() {
            self.last_filtered.clear();
            return SearchResult::NoData;
        }
        let indices = apply_predicate(&self.dataset.records, category.predicate(), options);
        self.finish(category.title().to_string(), indices)
    }

    /// Free-text keyword search. An empty dataset is searched like any other:
    /// a blank query still asks for a term, anything else finds no rows.
    pub fn search(&mut self, query: &str, options: &FilterOptions) -> SearchResult {
        match apply_query(&self.dataset.records, query, options) {
            QueryOutcome::EmptyQuery => {
                self.last_filtered.clear();
                SearchResult::EnterSearchTerm
            }
            QueryOutcome::Matches(indices) => {
                let title = format!("Search: {}", query.trim());
                self.finish(title, indices)
            }
        }
    }

    fn finish(&mut self, title: String, indices: Vec<usize>) -> SearchResult {
        debug!("{title}: {} of {} rows", indices.len(), self.dataset.len());
        self.last_filtered = indices.clone();
        SearchResult::Rows { title, indices }
    }

    /// Records of the last result, in order.
    pub fn last_results(&self) -> impl Iterator<Item = &ChemicalRecord> + '_ {
        self.last_filtered
            .iter()
            .filter_map(|&i| self.dataset.records.get(i))
    }

    /// The record at `position` within the last result.
    pub fn detail(&self, position: usize) -> Option<&ChemicalRecord> {
        self.last_filtered
            .get(position)
            .and_then(|&i| self.dataset.records.get(i))
    }
}

fn empty_message(source: &DataSource) -> String {
    match source {
        DataSource::Empty => "No data loaded. Provide chemical.json or the registry CSV.".to_string(),
        other => format!("No rows found in {other}."),
    }
}
