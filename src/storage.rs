use crate::constants::MISSING_OUTPUT_MESSAGE;
use crate::error::Result;
use crate::types::{LookupOutcome, ReadOutcome, ResultTable, StationRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Build the result table from lookup outcomes and persist it.
///
/// An existing file at `path` is authoritative: it is loaded and returned
/// as-is unless `force_refresh` is set, in which case it is overwritten.
/// Not-found stations and records without a rating are dropped, and the
/// remaining rows are sorted by rating, highest first. Ties keep lookup order.
#[instrument(skip(outcomes, path), fields(path = %path.display()))]
pub fn build_results(outcomes: Vec<LookupOutcome>, path: &Path, force_refresh: bool) -> Result<ResultTable> {
    if !force_refresh {
        if let ReadOutcome::Loaded(existing) = read_results(path)? {
            info!("{} already exists. Loading from file...", path.display());
            return Ok(existing);
        }
    }

    let total = outcomes.len();
    let mut rows: Vec<StationRecord> = outcomes
        .into_iter()
        .filter_map(LookupOutcome::into_record)
        .filter(StationRecord::is_complete)
        .collect();
    rows.sort_by(|a, b| {
        let (a, b) = (a.rating.unwrap_or_default(), b.rating.unwrap_or_default());
        b.total_cmp(&a)
    });
    debug!("Kept {} of {} lookup outcomes", rows.len(), total);

    let table = ResultTable::new(rows);
    write_results(path, &table)?;
    info!("Saved {} rated stations to {}", table.len(), path.display());
    Ok(table)
}

/// Write the table as CSV, creating parent directories as needed.
pub fn write_results(path: &Path, table: &ResultTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // Header is written explicitly so an empty table still produces one
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(ResultTable::headers())?;
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a persisted table. A missing file is reported as
/// [`ReadOutcome::Missing`] so the caller can decide to run the collection.
pub fn read_results(path: &Path) -> Result<ReadOutcome> {
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(e) if is_not_found(&e) => {
            return Ok(ReadOutcome::Missing {
                message: MISSING_OUTPUT_MESSAGE.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let rows = reader
        .deserialize::<StationRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(ReadOutcome::Loaded(ResultTable::new(rows)))
}

fn is_not_found(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn found(name: &str, rating: Option<f64>, total: Option<u64>) -> LookupOutcome {
        LookupOutcome::Found(StationRecord::new(name, rating, total))
    }

    #[test]
    fn test_builds_sorted_table_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ratings.csv");

        let table = build_results(
            vec![found("B", Some(3.0), Some(10)), found("A", Some(4.5), Some(20))],
            &path,
            false,
        )
        .unwrap();

        let names: Vec<&str> = table.rows().iter().map(|r| r.bus_station.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Bus Station,Rating,Number of Ratings\nA,4.5,20\nB,3.0,10\n");
    }

    #[test]
    fn test_drops_unrated_and_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ratings.csv");

        let table = build_results(
            vec![
                found("A", Some(4.0), Some(2)),
                LookupOutcome::NotFound { name: "Ghost".to_string() },
                found("C", None, Some(5)),
                found("D", None, None),
            ],
            &path,
            false,
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].bus_station, "A");
        assert_eq!(read_results(&path).unwrap(), ReadOutcome::Loaded(table));
    }

    #[test]
    fn test_ties_keep_lookup_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ratings.csv");

        let table = build_results(
            vec![
                found("First", Some(4.0), None),
                found("Top", Some(5.0), None),
                found("Second", Some(4.0), None),
            ],
            &path,
            false,
        )
        .unwrap();

        let names: Vec<&str> = table.rows().iter().map(|r| r.bus_station.as_str()).collect();
        assert_eq!(names, vec!["Top", "First", "Second"]);
    }

    #[test]
    fn test_existing_file_is_reused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ratings.csv");
        let prior = "Bus Station,Rating,Number of Ratings\nOld,2.5,4\n";
        fs::write(&path, prior).unwrap();

        let table = build_results(vec![found("New", Some(5.0), Some(1))], &path, false).unwrap();

        assert_eq!(table.rows(), &[StationRecord::new("Old", Some(2.5), Some(4))]);
        assert_eq!(fs::read_to_string(&path).unwrap(), prior);
    }

    #[test]
    fn test_force_refresh_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ratings.csv");
        fs::write(&path, "Bus Station,Rating,Number of Ratings\nOld,2.5,4\n").unwrap();

        let table = build_results(vec![found("New", Some(5.0), Some(1))], &path, true).unwrap();

        assert_eq!(table.rows()[0].bus_station, "New");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Bus Station,Rating,Number of Ratings\nNew,5.0,1\n"
        );
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("ratings.csv");

        let table = build_results(vec![found("A", None, None)], &path, false).unwrap();

        assert!(table.is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Bus Station,Rating,Number of Ratings\n"
        );
        assert_eq!(read_results(&path).unwrap(), ReadOutcome::Loaded(ResultTable::default()));
    }

    #[test]
    fn test_missing_file_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let outcome = read_results(&dir.path().join("absent.csv")).unwrap();
        assert_eq!(
            outcome,
            ReadOutcome::Missing {
                message: MISSING_OUTPUT_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ratings.csv");
        fs::write(&path, "Bus Station,Rating,Number of Ratings\nA,not-a-number,3\n").unwrap();

        assert!(read_results(&path).is_err());
    }
}
