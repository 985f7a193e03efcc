pub mod calculator;
pub mod config;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod pipeline;
pub mod render;
pub mod workbook;

pub use config::{DerivativeScope, FigureConfig, PipelineConfig, SheetLayout};
pub use dataset::{Dataset, SampleSeries};
pub use error::{PipelineError, Result};
pub use pipeline::{run, PipelineSummary, SampleSummary};
