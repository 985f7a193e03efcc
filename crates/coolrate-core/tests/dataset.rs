use coolrate_core::calculator::{AVG_TEMP, COOLING_RATE};
use coolrate_core::{Dataset, DerivativeScope, PipelineError};
use coolrate_parser::{parse_sample_file, LoaderOptions, SampleFile};
use polars::prelude::*;

fn sample(name: &str, content: &str) -> SampleFile {
    parse_sample_file(name, content, &LoaderOptions::default()).expect("fixture parses")
}

fn two_samples() -> Dataset {
    Dataset::from_files(vec![
        sample("a.csv", "0;10;10;10\n1;8;8;8\n"),
        sample("b.csv", "0;20;20;20\n"),
    ])
    .unwrap()
}

fn combined_column(dataset: &Dataset, column: &str) -> Vec<Option<f64>> {
    let df = dataset.combined().unwrap();
    df.column(column).unwrap().f64().unwrap().into_iter().collect()
}

#[test]
fn per_file_derivative_resets_at_file_boundary() {
    let dataset = two_samples().enrich(DerivativeScope::PerFile).unwrap();

    assert_eq!(dataset.row_count(), 3);
    assert_eq!(
        combined_column(&dataset, AVG_TEMP),
        vec![Some(10.0), Some(8.0), Some(20.0)]
    );
    assert_eq!(
        combined_column(&dataset, COOLING_RATE),
        vec![None, Some(-2.0), None]
    );
}

#[test]
fn global_derivative_runs_across_files() {
    let dataset = two_samples().enrich(DerivativeScope::Global).unwrap();

    assert_eq!(dataset.row_count(), 3);
    assert_eq!(
        combined_column(&dataset, COOLING_RATE),
        vec![None, Some(-2.0), Some(-12.0)]
    );

    let samples = dataset.samples();
    assert_eq!(samples[0].file, "a.csv");
    assert_eq!(samples[0].height(), 2);
    assert_eq!(samples[1].file, "b.csv");
    assert_eq!(samples[1].height(), 1);
}

#[test]
fn first_row_of_every_file_has_no_rate() {
    let dataset = Dataset::from_files(vec![
        sample("a.csv", "0;30;30;30\n5;25;26;24\n10;20;20;20\n"),
        sample("b.csv", "0;40;41;39\n3;37;37;37\n"),
        sample("c.csv", "0;50;50;50\n"),
    ])
    .unwrap()
    .enrich(DerivativeScope::PerFile)
    .unwrap();

    for series in dataset.samples() {
        assert!(series.frame.column(AVG_TEMP).is_ok());
        let rate = series.frame.column(COOLING_RATE).unwrap().f64().unwrap();
        assert_eq!(rate.get(0), None, "{} starts with a rate", series.file);
        assert_eq!(rate.null_count(), 1);
    }
}

#[test]
fn combined_keeps_file_column_and_order() {
    let dataset = two_samples();
    let df = dataset.combined().unwrap();
    let files: Vec<_> = df
        .column("File")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.unwrap().to_string())
        .collect();
    assert_eq!(files, ["a.csv", "a.csv", "b.csv"]);
    assert_eq!(dataset.files().collect::<Vec<_>>(), ["a.csv", "b.csv"]);
}

#[test]
fn enrich_preserves_input_values() {
    let dataset = two_samples().enrich(DerivativeScope::PerFile).unwrap();
    let df = dataset.combined().unwrap();
    let time: Vec<_> = df.column("Time").unwrap().f64().unwrap().into_iter().collect();
    assert_eq!(time, vec![Some(0.0), Some(1.0), Some(0.0)]);
}

#[test]
fn empty_file_list_is_rejected() {
    let err = Dataset::from_files(Vec::new()).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyDataset));
}

#[test]
fn points_pair_time_with_values() -> PolarsResult<()> {
    let dataset = two_samples().enrich(DerivativeScope::PerFile).unwrap();
    let points = dataset.samples()[0].points(COOLING_RATE)?;
    assert_eq!(points, vec![None, Some((1.0, -2.0))]);
    Ok(())
}
