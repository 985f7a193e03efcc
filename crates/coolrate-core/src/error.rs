// crates/coolrate-core/src/error.rs

use coolrate_parser::LoaderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Loading input files failed: {0}")]
    Loader(#[from] LoaderError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Workbook export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid setting `{key}`: {message}")]
    InvalidSetting { key: &'static str, message: String },

    #[error("Figure rendering failed: {0}")]
    Render(String),

    #[error("Dataset contains no rows")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, PipelineError>;
