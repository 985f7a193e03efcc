//! Plot description built from a dataset, independent of any drawing backend.

use plotters::style::RGBColor;

use crate::calculator::{AVG_TEMP, COOLING_RATE};
use crate::config::FigureConfig;
use crate::dataset::Dataset;
use crate::error::Result;

pub const TIME_LABEL: &str = "Time (s)";
pub const TEMPERATURE_LABEL: &str = "Temperature (C)";
pub const COOLING_RATE_LABEL: &str = "Cooling rate (C/s)";
pub const TEMPERATURE_LEGEND: &str = "Temperature over time";
pub const COOLING_RATE_LEGEND: &str = "Cooling rate over time";

pub const TEMPERATURE_COLOR: RGBColor = RGBColor(31, 119, 180);
pub const COOLING_RATE_COLOR: RGBColor = RGBColor(214, 39, 40);

#[derive(Debug, Clone)]
pub struct Series {
    pub axis_label: String,
    pub color: RGBColor,
    /// Draw with values increasing downwards.
    pub inverted: bool,
    pub points: Vec<Option<(f64, f64)>>,
}

impl Series {
    /// Contiguous runs of points; a missing value ends the current run.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point {
                Some(point) => current.push(*point),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().flatten().map(|(x, _)| *x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().flatten().map(|(_, y)| *y)
    }
}

/// One sample: temperature on the left axis, cooling rate on the right.
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub primary: Series,
    pub secondary: Series,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
}

#[derive(Debug, Clone)]
pub struct Figure {
    pub width: u32,
    pub panel_height: u32,
    pub panels: Vec<Panel>,
    /// Shared by every panel, drawn once below them.
    pub legend: Vec<LegendEntry>,
}

impl Figure {
    /// One panel per sample in `dataset`, which must already be enriched.
    pub fn from_dataset(dataset: &Dataset, config: &FigureConfig) -> Result<Self> {
        let panels = dataset
            .samples()
            .iter()
            .map(|sample| {
                Ok(Panel {
                    title: format!("Cooling of Sample: {}", sample.file),
                    x_label: TIME_LABEL.to_string(),
                    primary: Series {
                        axis_label: TEMPERATURE_LABEL.to_string(),
                        color: TEMPERATURE_COLOR,
                        inverted: false,
                        points: sample.points(AVG_TEMP)?,
                    },
                    secondary: Series {
                        axis_label: COOLING_RATE_LABEL.to_string(),
                        color: COOLING_RATE_COLOR,
                        inverted: true,
                        points: sample.points(COOLING_RATE)?,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            width: config.width,
            panel_height: config.panel_height,
            panels,
            legend: vec![
                LegendEntry {
                    label: TEMPERATURE_LEGEND.to_string(),
                    color: TEMPERATURE_COLOR,
                },
                LegendEntry {
                    label: COOLING_RATE_LEGEND.to_string(),
                    color: COOLING_RATE_COLOR,
                },
            ],
        })
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }
}
