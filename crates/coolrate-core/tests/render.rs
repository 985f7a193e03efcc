use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use coolrate_core::figure::{
    Figure, COOLING_RATE_COLOR, COOLING_RATE_LABEL, COOLING_RATE_LEGEND, TEMPERATURE_COLOR,
    TEMPERATURE_LEGEND,
};
use coolrate_core::render::{canvas_size, draw_figure};
use coolrate_core::{Dataset, DerivativeScope, FigureConfig};
use coolrate_parser::{parse_sample_file, LoaderOptions};
use plotters::prelude::IntoDrawingArea;
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
};

#[derive(Debug, Default)]
struct Recording {
    texts: Vec<String>,
    paths: Vec<((u8, u8, u8), Vec<BackendCoord>)>,
}

/// Records text and paths; text is measured with a fixed-width estimate so no font is loaded.
struct RecordingBackend {
    size: (u32, u32),
    recording: Rc<RefCell<Recording>>,
}

impl DrawingBackend for RecordingBackend {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        _point: BackendCoord,
        _color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        _upper_left: BackendCoord,
        _bottom_right: BackendCoord,
        _style: &S,
        _fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.recording
            .borrow_mut()
            .paths
            .push((style.color().rgb, path.into_iter().collect()));
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        _style: &TStyle,
        _pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        self.recording.borrow_mut().texts.push(text.to_string());
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        _style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Infallible>> {
        Ok((text.chars().count() as u32 * 7, 14))
    }
}

fn draw(figure: &Figure) -> Recording {
    let recording = Rc::new(RefCell::new(Recording::default()));
    let backend = RecordingBackend {
        size: canvas_size(figure),
        recording: Rc::clone(&recording),
    };
    let root = backend.into_drawing_area();
    draw_figure(figure, &root).expect("figure draws");
    drop(root);
    Rc::try_unwrap(recording)
        .expect("backend released")
        .into_inner()
}

fn figure() -> Figure {
    let options = LoaderOptions::default();
    let dataset = Dataset::from_files(vec![
        parse_sample_file("a.csv", "0;10;10;10\n1;8;8;8\n3;6;6;6\n4;5.5;5.5;5.5\n", &options)
            .unwrap(),
        parse_sample_file("b.csv", "0;20;20;20\n2;18;18;18\n", &options).unwrap(),
    ])
    .unwrap()
    .enrich(DerivativeScope::PerFile)
    .unwrap();
    Figure::from_dataset(&dataset, &FigureConfig::default()).unwrap()
}

fn rgb(color: plotters::style::RGBColor) -> (u8, u8, u8) {
    (color.0, color.1, color.2)
}

#[test]
fn draws_titles_axis_labels_and_shared_legend() {
    let recording = draw(&figure());

    for expected in [
        "Cooling of Sample: a.csv",
        "Cooling of Sample: b.csv",
        COOLING_RATE_LABEL,
        TEMPERATURE_LEGEND,
        COOLING_RATE_LEGEND,
    ] {
        assert!(
            recording.texts.iter().any(|text| text == expected),
            "missing text {expected}"
        );
    }
    let legend_count = recording
        .texts
        .iter()
        .filter(|text| text.as_str() == COOLING_RATE_LEGEND)
        .count();
    assert_eq!(legend_count, 1);
}

#[test]
fn draws_both_series_in_their_colors() {
    let recording = draw(&figure());
    let colored = |color| {
        recording
            .paths
            .iter()
            .filter(|(rgb, points)| *rgb == color && points.len() > 2)
            .count()
    };
    // Sample a has three rates; b has only one, which is not a line.
    assert_eq!(colored(rgb(COOLING_RATE_COLOR)), 1);
    assert!(colored(rgb(TEMPERATURE_COLOR)) >= 1);
}

#[test]
fn inverted_axis_puts_faster_cooling_higher() {
    let recording = draw(&figure());
    let (_, rate_path) = recording
        .paths
        .iter()
        .find(|(rgb_value, points)| *rgb_value == rgb(COOLING_RATE_COLOR) && points.len() == 3)
        .expect("cooling-rate line for a.csv");

    // Rates -2, -1, -0.5: the steepest drop is drawn at the top (smallest pixel y).
    let ys: Vec<i32> = rate_path.iter().map(|(_, y)| *y).collect();
    assert!(ys[0] < ys[1] && ys[1] < ys[2], "unexpected pixel rows {ys:?}");

    let negative_ticks = recording
        .texts
        .iter()
        .filter(|text| text.starts_with('-') && text.split('.').nth(1).map(str::len) == Some(2))
        .count();
    assert!(negative_ticks > 0, "right axis shows the original negative rates");
}
