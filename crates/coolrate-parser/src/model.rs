use polars::prelude::DataFrame;

/// Knobs for locating and splitting input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Suffix a directory entry must end with to be loaded (case-sensitive).
    pub extension: String,
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            extension: ".csv".to_string(),
            delimiter: b';',
        }
    }
}

/// One parsed input file: a single sample's time series.
#[derive(Debug, Clone)]
pub struct SampleFile {
    pub file_name: String,
    /// `Time`, `Temperature_1..3` and `File`, one row per record in file order.
    pub df: DataFrame,
}

impl SampleFile {
    /// File name up to the first `.`; `run.2.csv` becomes `run`.
    pub fn stem(&self) -> &str {
        file_stem(&self.file_name)
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }
}

pub fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}
