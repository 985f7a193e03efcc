use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("input directory {} does not exist", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("input path {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("no '{extension}' files found in {}", path.display())]
    NoMatchingFiles { path: PathBuf, extension: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file} CSV error: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("{file} line {line}: {message}")]
    DataRow {
        file: String,
        line: u64,
        message: String,
    },

    #[error("{file} line {line}: column {column} value '{value}' is not a number")]
    InvalidNumber {
        file: String,
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("{file} did not contain any data rows")]
    EmptyData { file: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
