use bus_station_ratings::config::Config;
use bus_station_ratings::constants::{DEFAULT_CONFIG_PATH, DEFAULT_DISPLAY_LIMIT};
use bus_station_ratings::error::CollectorError;
use bus_station_ratings::infra::places_client::ReqwestPlaces;
use bus_station_ratings::logging;
use bus_station_ratings::pipeline::Pipeline;
use bus_station_ratings::storage::read_results;
use bus_station_ratings::types::{ReadOutcome, ResultTable};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "bus_station_ratings")]
#[command(about = "Collect Google Places ratings for bus stations")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect ratings (or reuse the existing output file) and print the top rows
    Run {
        #[command(flatten)]
        common: CommonArgs,
        /// CSV file listing the stations
        #[arg(long)]
        input: Option<PathBuf>,
        /// Rebuild the output file even if it already exists
        #[arg(long)]
        force_refresh: bool,
    },
    /// Print a previously collected output file
    Show {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Default)]
struct CommonArgs {
    /// TOML configuration file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output CSV file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of rows to print
    #[arg(long, default_value_t = DEFAULT_DISPLAY_LIMIT)]
    limit: usize,
}

impl CommonArgs {
    fn load_config(&self) -> Result<Config, CollectorError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path, true)?,
            None => Config::load(PathBuf::from(DEFAULT_CONFIG_PATH).as_path(), false)?,
        };
        config.apply_env();
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        Ok(config)
    }
}

fn print_table(table: &ResultTable, limit: usize) {
    let [station, rating, count] = ResultTable::headers();
    println!("{:<40} {:>6} {:>18}", station, rating, count);
    for row in table.head(limit) {
        let rating = row.rating.map(|r| format!("{:.1}", r)).unwrap_or_default();
        let count = row.number_of_ratings.map(|c| c.to_string()).unwrap_or_default();
        println!("{:<40} {:>6} {:>18}", row.bus_station, rating, count);
    }
    if table.len() > limit {
        println!("... {} more rows", table.len() - limit);
    }
}

async fn run(command: Commands) -> Result<(), CollectorError> {
    match command {
        Commands::Run { common, input, force_refresh } => {
            let mut config = common.load_config()?;
            if let Some(input) = input {
                config.input_path = input;
            }
            config.force_refresh |= force_refresh;

            let places = ReqwestPlaces::new(config.places_base_url.clone(), config.api_key.clone());
            let (table, result) = Pipeline::run(&config, Box::new(places)).await?;

            if result.reused_existing {
                println!("📂 Reused existing {}", result.output_file);
            } else {
                println!("\n📊 Collection results:");
                println!("   Unique stations: {}", result.unique_stations);
                println!("   Found: {}", result.found);
                println!("   Not found: {}", result.not_found);
                println!("   Rated stations: {}", result.rated_stations);
                println!("   Output file: {}", result.output_file);
            }
            println!();
            print_table(&table, common.limit);
        }
        Commands::Show { common } => {
            let config = common.load_config()?;
            match read_results(&config.output_path)? {
                ReadOutcome::Loaded(table) => print_table(&table, common.limit),
                ReadOutcome::Missing { message } => println!("{}", message),
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    logging::init_logging();

    let command = cli.command.unwrap_or(Commands::Run {
        common: CommonArgs {
            limit: DEFAULT_DISPLAY_LIMIT,
            ..Default::default()
        },
        input: None,
        force_refresh: false,
    });

    run(command).await.map_err(|e| {
        error!("Run failed: {}", e);
        anyhow::Error::new(e)
    })?;
    Ok(())
}
