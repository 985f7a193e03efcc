//! Column names shared by the loader and everything downstream of it.

pub const TIME: &str = "Time";
pub const TEMPERATURE_1: &str = "Temperature_1";
pub const TEMPERATURE_2: &str = "Temperature_2";
pub const TEMPERATURE_3: &str = "Temperature_3";
pub const FILE: &str = "File";

/// Probe columns in file order.
pub const TEMPERATURE_COLUMNS: [&str; 3] = [TEMPERATURE_1, TEMPERATURE_2, TEMPERATURE_3];

/// Fields of one input record, in the order they appear on disk.
pub const INPUT_COLUMNS: [&str; 4] = [TIME, TEMPERATURE_1, TEMPERATURE_2, TEMPERATURE_3];

/// Columns of a loaded [`crate::SampleFile`] frame.
#[cfg(test)]
pub const SAMPLE_COLUMNS: [&str; 5] = [TIME, TEMPERATURE_1, TEMPERATURE_2, TEMPERATURE_3, FILE];
