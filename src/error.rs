use std::path::PathBuf;

/// Why a single source could not be read.
///
/// The bundled-data fallback chain logs and swallows these; loading a file
/// the user named explicitly surfaces them.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: expected a top-level JSON array of objects")]
    NotAnArray { path: PathBuf },

    #[error("reading CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("reading Parquet {path}: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("decoding Parquet batch in {path}: {source}")]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("reading workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("{path}: workbook has no worksheet")]
    NoWorksheet { path: PathBuf },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
