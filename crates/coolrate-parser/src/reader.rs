use csv::{ReaderBuilder, StringRecord, Trim};
use polars::prelude::*;

use crate::errors::LoaderError;
use crate::model::{LoaderOptions, SampleFile};
use crate::schema;

#[derive(Debug, Default)]
struct ProbeColumns {
    time: Vec<Option<f64>>,
    temperature_1: Vec<Option<f64>>,
    temperature_2: Vec<Option<f64>>,
    temperature_3: Vec<Option<f64>>,
}

impl ProbeColumns {
    fn len(&self) -> usize {
        self.time.len()
    }

    fn push(&mut self, values: [Option<f64>; 4]) {
        let [time, t1, t2, t3] = values;
        self.time.push(time);
        self.temperature_1.push(t1);
        self.temperature_2.push(t2);
        self.temperature_3.push(t3);
    }

    fn into_dataframe(self, file_name: &str) -> PolarsResult<DataFrame> {
        let rows = self.len();
        DataFrame::new(vec![
            Series::new(schema::TIME.into(), self.time).into(),
            Series::new(schema::TEMPERATURE_1.into(), self.temperature_1).into(),
            Series::new(schema::TEMPERATURE_2.into(), self.temperature_2).into(),
            Series::new(schema::TEMPERATURE_3.into(), self.temperature_3).into(),
            Series::new(schema::FILE.into(), vec![file_name; rows]).into(),
        ])
    }
}

/// Parses one headerless, delimiter-separated sample file.
///
/// Every record must carry exactly four fields (`Time` and three probe temperatures). Empty
/// fields become nulls; anything else that is not a number is rejected.
pub fn parse_sample_file(
    file_name: &str,
    content: &str,
    options: &LoaderOptions,
) -> Result<SampleFile, LoaderError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(options.delimiter)
        .from_reader(content.as_bytes());

    let mut columns = ProbeColumns::default();

    for result in reader.records() {
        let record = result.map_err(|source| LoaderError::Csv {
            file: file_name.to_string(),
            source,
        })?;
        columns.push(parse_record(file_name, &record)?);
    }

    if columns.len() == 0 {
        return Err(LoaderError::EmptyData {
            file: file_name.to_string(),
        });
    }

    let df = columns.into_dataframe(file_name)?;
    Ok(SampleFile {
        file_name: file_name.to_string(),
        df,
    })
}

fn parse_record(file_name: &str, record: &StringRecord) -> Result<[Option<f64>; 4], LoaderError> {
    let line = record.position().map(|pos| pos.line()).unwrap_or(0);

    if record.len() != schema::INPUT_COLUMNS.len() {
        return Err(LoaderError::DataRow {
            file: file_name.to_string(),
            line,
            message: format!(
                "expected {} fields, found {}",
                schema::INPUT_COLUMNS.len(),
                record.len()
            ),
        });
    }

    let mut values = [None; 4];
    for (idx, (field, column)) in record.iter().zip(schema::INPUT_COLUMNS).enumerate() {
        values[idx] = parse_optional_f64(field).map_err(|_| LoaderError::InvalidNumber {
            file: file_name.to_string(),
            line,
            column,
            value: field.to_string(),
        })?;
    }
    Ok(values)
}

fn parse_optional_f64(field: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if field.is_empty() {
        return Ok(None);
    }
    let value: f64 = field.parse()?;
    Ok((!value.is_nan()).then_some(value))
}
