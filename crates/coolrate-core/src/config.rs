use std::fs;
use std::path::{Path, PathBuf};

use coolrate_parser::LoaderOptions;
use serde::Deserialize;

use crate::error::{PipelineError, Result};

/// Which rows the cooling-rate finite difference runs over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DerivativeScope {
    /// Restart at every file boundary; each file's first row has no rate.
    #[default]
    PerFile,
    /// Run over the concatenated table, carrying the previous file's last row into the next.
    Global,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SheetLayout {
    /// One sheet holding every row plus the `File` column.
    #[default]
    Single,
    /// One sheet per input file, named after the file stem.
    PerFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub width: u32,
    /// Height of a single sample panel; the image grows with the number of files.
    pub panel_height: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("cooling_plot.png"),
            width: 900,
            panel_height: 320,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub extension: String,
    pub delimiter: char,
    pub derivative: DerivativeScope,
    pub layout: SheetLayout,
    pub output: PathBuf,
    pub figure: FigureConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extension: ".csv".to_string(),
            delimiter: ';',
            derivative: DerivativeScope::default(),
            layout: SheetLayout::default(),
            output: PathBuf::from("cooling_data.xlsx"),
            figure: FigureConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// The CSV reader splits on a single byte, so the delimiter must be ASCII.
    pub fn loader_options(&self) -> Result<LoaderOptions> {
        if !self.delimiter.is_ascii() {
            return Err(PipelineError::InvalidSetting {
                key: "delimiter",
                message: format!("'{}' is not a single-byte ASCII character", self.delimiter),
            });
        }
        Ok(LoaderOptions {
            extension: self.extension.clone(),
            delimiter: self.delimiter as u8,
        })
    }
}
