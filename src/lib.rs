//! Viewer core for the avocado registered-chemicals list.
//!
//! Loads the registry from JSON, CSV, Parquet or a spreadsheet workbook,
//! normalizes the rows into [`ChemicalRecord`]s and filters them by category
//! or keyword.

pub mod config;
pub mod data;
pub mod error;
pub mod session;
pub mod view;

pub use config::Config;
pub use data::filter::{apply_predicate, apply_query, FilterOptions, QueryOutcome};
pub use data::model::{ChemicalRecord, DataSource, Dataset, Field, RawRow};
pub use data::normalize::Normalizer;
pub use data::predicates::{Category, DerivedFields, Predicate, CATALOG};
pub use error::LoadError;
pub use session::{SearchResult, Session};
