use crate::constants::STATION_COLUMN_PREFIX;
use crate::error::{CollectorError, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Reads the input table and returns the unique station names in order of
/// first appearance.
///
/// The station column is located by prefix match on its header. This keeps
/// compatibility with inputs whose header is either the short "PAVADIN" or
/// the full "PAVADINIMAS", but any other header starting with the prefix will
/// also be picked up.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_station_names(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|header| header.starts_with(STATION_COLUMN_PREFIX))
        .ok_or_else(|| CollectorError::Schema {
            path: path.display().to_string(),
            prefix: STATION_COLUMN_PREFIX.to_string(),
        })?;
    debug!("Using column '{}' for station names", &headers[column]);

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Empty and missing cells are absent values, not station names
        let Some(name) = record.get(column).filter(|value| !value.is_empty()) else {
            continue;
        };
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }

    info!("Loaded {} unique station names", names.len());
    Ok(names)
}
