use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::figure::{Figure, Panel};

const LEGEND_HEIGHT: u32 = 60;
const RANGE_PADDING: f64 = 0.05;

fn render_err(err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Render(err.to_string())
}

/// Full image size: every panel stacked, plus the legend strip.
pub fn canvas_size(figure: &Figure) -> (u32, u32) {
    let panels = figure.panel_count().max(1) as u32;
    (figure.width, figure.panel_height * panels + LEGEND_HEIGHT)
}

pub fn render_png(figure: &Figure, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, canvas_size(figure)).into_drawing_area();
    draw_figure(figure, &root)?;
    root.present().map_err(render_err)?;
    info!(path = %path.display(), panels = figure.panel_count(), "Figure rendered");
    Ok(())
}

pub fn draw_figure<DB: DrawingBackend>(
    figure: &Figure,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let (_, height) = root.dim_in_pixel();
    let (plots, legend_area) = root.split_vertically(height.saturating_sub(LEGEND_HEIGHT));

    if !figure.panels.is_empty() {
        let areas = plots.split_evenly((figure.panel_count(), 1));
        for (area, panel) in areas.iter().zip(&figure.panels) {
            draw_panel(panel, area)?;
        }
    }

    draw_legend(figure, &legend_area)
}

fn draw_panel<DB: DrawingBackend>(panel: &Panel, area: &DrawingArea<DB, Shift>) -> Result<()> {
    let x_range = padded_range(panel.primary.xs().chain(panel.secondary.xs()));
    let y_range = padded_range(panel.primary.ys());
    // The right axis is inverted by plotting negated rates and negating the tick labels back.
    let sign = if panel.secondary.inverted { -1.0 } else { 1.0 };
    let y2_range = padded_range(panel.secondary.ys().map(|y| sign * y));

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(render_err)?
        .set_secondary_coord(x_range, y2_range);

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.primary.axis_label.as_str())
        .draw()
        .map_err(render_err)?;

    let secondary_label = |value: &f64| tick_label(*value, sign);
    chart
        .configure_secondary_axes()
        .y_desc(panel.secondary.axis_label.as_str())
        .y_label_formatter(&secondary_label)
        .draw()
        .map_err(render_err)?;

    for segment in panel.primary.segments() {
        chart
            .draw_series(LineSeries::new(segment, panel.primary.color.stroke_width(2)))
            .map_err(render_err)?;
    }
    for segment in panel.secondary.segments() {
        chart
            .draw_secondary_series(LineSeries::new(
                segment.into_iter().map(|(x, y)| (x, sign * y)),
                panel.secondary.color.stroke_width(2),
            ))
            .map_err(render_err)?;
    }

    Ok(())
}

fn draw_legend<DB: DrawingBackend>(figure: &Figure, area: &DrawingArea<DB, Shift>) -> Result<()> {
    if figure.legend.is_empty() {
        return Ok(());
    }

    let (width, height) = area.dim_in_pixel();
    let slot = (width / figure.legend.len() as u32) as i32;
    let y = height as i32 / 2;

    for (idx, entry) in figure.legend.iter().enumerate() {
        let x = idx as i32 * slot + 20;
        area.draw(&PathElement::new(
            vec![(x, y), (x + 30, y)],
            entry.color.stroke_width(2),
        ))
        .map_err(render_err)?;
        area.draw(&Text::new(
            entry.label.clone(),
            (x + 38, y - 8),
            ("sans-serif", 15),
        ))
        .map_err(render_err)?;
    }

    Ok(())
}

/// Right-axis tick text; `sign` undoes the negation applied to an inverted series.
pub fn tick_label(value: f64, sign: f64) -> String {
    format!("{:.2}", sign * value)
}

/// Bounds of `values` widened by a small margin; never empty or zero-width.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });

    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * RANGE_PADDING };
        return (min - pad)..(max + pad);
    }
    let pad = (max - min) * RANGE_PADDING;
    (min - pad)..(max + pad)
}
