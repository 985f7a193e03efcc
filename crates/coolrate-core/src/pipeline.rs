use std::path::{Path, PathBuf};

use coolrate_parser::load_directory;
use polars::prelude::ChunkAgg;
use serde::Serialize;
use tracing::{debug, info};

use crate::calculator::{AVG_TEMP, COOLING_RATE};
use crate::config::PipelineConfig;
use crate::dataset::{Dataset, SampleSeries};
use crate::error::Result;
use crate::figure::Figure;
use crate::render::render_png;
use crate::workbook::{write_workbook, WorkbookSummary};

#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary {
    pub file: String,
    pub rows: usize,
    pub first_avg_temp: Option<f64>,
    pub last_avg_temp: Option<f64>,
    pub mean_cooling_rate: Option<f64>,
}

impl SampleSummary {
    pub fn from_series(sample: &SampleSeries) -> Result<Self> {
        let avg = sample.frame.column(AVG_TEMP)?.f64()?;
        let rate = sample.frame.column(COOLING_RATE)?.f64()?;
        let first_avg_temp = avg.into_iter().flatten().next();
        let last_avg_temp = avg.into_iter().flatten().last();
        Ok(Self {
            file: sample.file.clone(),
            rows: sample.height(),
            first_avg_temp,
            last_avg_temp,
            mean_cooling_rate: rate.mean(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub row_count: usize,
    pub samples: Vec<SampleSummary>,
    pub workbook: WorkbookSummary,
    pub figure_path: Option<PathBuf>,
}

impl PipelineSummary {
    pub fn file_count(&self) -> usize {
        self.samples.len()
    }
}

/// Loads every sample in `dir`, derives the cooling columns and writes the workbook and figure.
pub fn run(dir: &Path, config: &PipelineConfig) -> Result<PipelineSummary> {
    info!(dir = %dir.display(), "Loading sample files");
    let files = load_directory(dir, &config.loader_options()?)?;
    let dataset = Dataset::from_files(files)?;
    info!(
        files = dataset.file_count(),
        rows = dataset.row_count(),
        "Samples loaded"
    );
    debug!(files = ?dataset.files().collect::<Vec<_>>(), "Sample order");

    let dataset = dataset.enrich(config.derivative)?;
    info!(scope = ?config.derivative, "Average temperature and cooling rate derived");

    let workbook = write_workbook(&dataset, config.layout, &config.output)?;

    let figure_path = if config.figure.enabled {
        let figure = Figure::from_dataset(&dataset, &config.figure)?;
        render_png(&figure, &config.figure.path)?;
        Some(config.figure.path.clone())
    } else {
        debug!("Figure rendering disabled");
        None
    };

    let samples = dataset
        .samples()
        .iter()
        .map(SampleSummary::from_series)
        .collect::<Result<Vec<_>>>()?;

    Ok(PipelineSummary {
        row_count: dataset.row_count(),
        samples,
        workbook,
        figure_path,
    })
}
