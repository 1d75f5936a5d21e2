//! File-based assumption loader
//!
//! Two formats are accepted:
//! - CSV with a `parameter,value` header, one override per row
//! - JSON mirroring the [`Assumptions`] structure
//!
//! Anything not mentioned keeps the default robotaxi value.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::Assumptions;
use crate::error::LoadError;

/// Default path to the assumptions file
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions.csv";

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct ParameterRow {
    parameter: String,
    value: String,
}

/// Load assumptions from a CSV or JSON file, picked by extension
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<Assumptions, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    debug!("loading assumptions from {}", path.display());
    let file = File::open(path)?;

    match extension.as_str() {
        "csv" => load_assumptions_csv(file),
        "json" => load_assumptions_json(file),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

/// Load `parameter,value` rows from any reader on top of the defaults
pub fn load_assumptions_csv<R: Read>(reader: R) -> Result<Assumptions, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let mut assumptions = Assumptions::default_robotaxi();

    for result in csv_reader.deserialize() {
        let row: ParameterRow = result?;
        assumptions.set_str(&row.parameter, &row.value)?;
    }

    Ok(assumptions)
}

/// Load a (possibly partial) JSON document from any reader
pub fn load_assumptions_json<R: Read>(reader: R) -> Result<Assumptions, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}
