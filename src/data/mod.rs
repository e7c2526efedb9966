/// Data layer: core types, loading, normalization and filtering.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → raw rows (JSON → CSV → empty fallback)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  alias table → ChemicalRecord
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<ChemicalRecord>, source
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐    ┌────────────┐
///   │  filter   │◄───│ predicates │  category rules / keyword query
///   └──────────┘    └────────────┘
///        │
///        ▼
///   ordered indices
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod predicates;
