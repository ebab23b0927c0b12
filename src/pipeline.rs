use crate::app::enrich_use_case::EnrichUseCase;
use crate::app::ports::PlacesPort;
use crate::config::Config;
use crate::error::{CollectorError, Result};
use crate::loader::load_station_names;
use crate::storage::{build_results, read_results};
use crate::types::{LookupOutcome, ReadOutcome, ResultTable};
use serde::Serialize;
use std::io;
use std::time::Instant;
use tracing::{info, instrument};

/// Summary of a complete pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineResult {
    pub unique_stations: usize,
    pub found: usize,
    pub not_found: usize,
    pub rated_stations: usize,
    pub reused_existing: bool,
    pub output_file: String,
}

pub struct Pipeline;

impl Pipeline {
    /// Run load → lookup → build → reload.
    ///
    /// When the output file already exists and no refresh is forced, the file
    /// is read back directly: the input is not loaded and no lookups are made.
    #[instrument(skip_all, fields(output = %config.output_path.display()))]
    pub async fn run(config: &Config, places: Box<dyn PlacesPort>) -> Result<(ResultTable, PipelineResult)> {
        let output_file = config.output_path.display().to_string();

        if !config.force_refresh {
            if let ReadOutcome::Loaded(table) = read_results(&config.output_path)? {
                info!("{} already exists. Loading from file...", output_file);
                let result = PipelineResult {
                    rated_stations: table.len(),
                    reused_existing: true,
                    output_file,
                    ..Default::default()
                };
                return Ok((table, result));
            }
        }

        config.require_api_key()?;
        let t_pipeline = Instant::now();

        info!("Loading station names from {}", config.input_path.display());
        let names = load_station_names(&config.input_path)?;

        info!("Looking up {} stations...", names.len());
        let outcomes = EnrichUseCase::new(places).lookup_all(&names).await?;
        let not_found = outcomes
            .iter()
            .filter(|o| matches!(o, LookupOutcome::NotFound { .. }))
            .count();

        build_results(outcomes, &config.output_path, config.force_refresh)?;

        let table = match read_results(&config.output_path)? {
            ReadOutcome::Loaded(table) => table,
            ReadOutcome::Missing { message } => {
                return Err(CollectorError::Io(io::Error::new(io::ErrorKind::NotFound, message)))
            }
        };

        let result = PipelineResult {
            unique_stations: names.len(),
            found: names.len() - not_found,
            not_found,
            rated_stations: table.len(),
            reused_existing: false,
            output_file,
        };
        info!(
            "Collected {} rated stations ({} not found) in {:.1}s",
            result.rated_stations,
            result.not_found,
            t_pipeline.elapsed().as_secs_f64()
        );
        Ok((table, result))
    }
}
