use coolrate_parser::schema::{TEMPERATURE_COLUMNS, TIME};
use polars::prelude::*;

pub const AVG_TEMP: &str = "Avg_Temp";
pub const COOLING_RATE: &str = "Cooling_Rate";

/// Appends `Avg_Temp`, the mean of the non-null probe readings of each row.
pub fn apply_average_temperature(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let len = df.height();

    let t1 = df.column(TEMPERATURE_COLUMNS[0])?.f64()?;
    let t2 = df.column(TEMPERATURE_COLUMNS[1])?.f64()?;
    let t3 = df.column(TEMPERATURE_COLUMNS[2])?.f64()?;

    let mut avg = Vec::with_capacity(len);
    for idx in 0..len {
        avg.push(mean_of_present([t1.get(idx), t2.get(idx), t3.get(idx)]));
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [Series::new(AVG_TEMP.into(), avg).into()])?;
    Ok(output)
}

/// Appends `Cooling_Rate`, the finite difference of `Avg_Temp` over `Time` between each row and
/// the one before it. The first row, rows next to a null and zero time steps get null.
pub fn apply_cooling_rate(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let len = df.height();

    let time = df.column(TIME)?.f64()?;
    let avg = df.column(AVG_TEMP)?.f64()?;

    let mut rate = Vec::with_capacity(len);
    if len > 0 {
        rate.push(None);
    }
    for idx in 1..len {
        rate.push(finite_difference(
            (time.get(idx - 1), avg.get(idx - 1)),
            (time.get(idx), avg.get(idx)),
        ));
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [Series::new(COOLING_RATE.into(), rate).into()])?;
    Ok(output)
}

/// Both derived columns, in dependency order.
pub fn enrich(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    apply_cooling_rate(&apply_average_temperature(df)?)
}

fn mean_of_present(values: [Option<f64>; 3]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn finite_difference(
    previous: (Option<f64>, Option<f64>),
    current: (Option<f64>, Option<f64>),
) -> Option<f64> {
    let (Some(t0), Some(y0)) = previous else {
        return None;
    };
    let (Some(t1), Some(y1)) = current else {
        return None;
    };
    let slope = (y1 - y0) / (t1 - t0);
    slope.is_finite().then_some(slope)
}
