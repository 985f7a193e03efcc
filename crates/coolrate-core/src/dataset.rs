use coolrate_parser::schema::TIME;
use coolrate_parser::SampleFile;
use polars::prelude::*;
use tracing::warn;

use crate::calculator;
use crate::config::DerivativeScope;
use crate::error::{PipelineError, Result};

/// One sample's rows, enriched or not.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    pub file: String,
    pub frame: DataFrame,
}

impl SampleSeries {
    pub fn stem(&self) -> &str {
        coolrate_parser::model::file_stem(&self.file)
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// `(Time, column)` pairs in row order; `None` marks a missing value on either side.
    pub fn points(&self, column: &str) -> PolarsResult<Vec<Option<(f64, f64)>>> {
        let time = self.frame.column(TIME)?.f64()?;
        let values = self.frame.column(column)?.f64()?;
        Ok(time
            .into_iter()
            .zip(values)
            .map(|(t, v)| t.zip(v))
            .collect())
    }
}

/// All samples of a run, in load order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    samples: Vec<SampleSeries>,
}

impl Dataset {
    pub fn from_files(files: Vec<SampleFile>) -> Result<Self> {
        let samples: Vec<SampleSeries> = files
            .into_iter()
            .map(|file| SampleSeries {
                file: file.file_name,
                frame: file.df,
            })
            .collect();

        if samples.iter().all(|sample| sample.height() == 0) {
            return Err(PipelineError::EmptyDataset);
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[SampleSeries] {
        &self.samples
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|sample| sample.file.as_str())
    }

    pub fn file_count(&self) -> usize {
        self.samples.len()
    }

    pub fn row_count(&self) -> usize {
        self.samples.iter().map(SampleSeries::height).sum()
    }

    /// Every sample stacked vertically, in load order.
    pub fn combined(&self) -> Result<DataFrame> {
        let mut iter = self.samples.iter();
        let Some(first) = iter.next() else {
            return Err(PipelineError::EmptyDataset);
        };
        let mut combined = first.frame.clone();
        for sample in iter {
            combined.vstack_mut(&sample.frame)?;
        }
        Ok(combined)
    }

    /// Adds `Avg_Temp` and `Cooling_Rate` to every sample.
    pub fn enrich(self, scope: DerivativeScope) -> Result<Self> {
        match scope {
            DerivativeScope::PerFile => {
                let samples = self
                    .samples
                    .into_iter()
                    .map(|sample| {
                        Ok(SampleSeries {
                            frame: calculator::enrich(&sample.frame)?,
                            file: sample.file,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self { samples })
            }
            DerivativeScope::Global => {
                if self.file_count() > 1 {
                    warn!(
                        files = self.file_count(),
                        "Cooling rate computed across file boundaries; the first row of each \
                         later file is differenced against the previous file's last row"
                    );
                }
                let enriched = calculator::enrich(&self.combined()?)?;
                let mut offset = 0i64;
                let samples = self
                    .samples
                    .into_iter()
                    .map(|sample| {
                        let height = sample.height();
                        let frame = enriched.slice(offset, height);
                        offset += height as i64;
                        SampleSeries {
                            file: sample.file,
                            frame,
                        }
                    })
                    .collect();
                Ok(Self { samples })
            }
        }
    }
}
