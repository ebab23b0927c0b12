/// Header prefix identifying the station name column in the input table.
/// Matched with `starts_with`, so both "PAVADIN" and "PAVADINIMAS" qualify.
pub const STATION_COLUMN_PREFIX: &str = "PAVADIN";

// Output table headers
pub const BUS_STATION_HEADER: &str = "Bus Station";
pub const RATING_HEADER: &str = "Rating";
pub const NUMBER_OF_RATINGS_HEADER: &str = "Number of Ratings";

// Default locations used when nothing else is configured
pub const DEFAULT_INPUT_PATH: &str = "vilniaus_stoteles.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "bus_station_ratings.csv";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

/// Environment variable holding the places API credential
pub const API_KEY_ENV: &str = "PLACES_API_KEY";

// Places API request parameters
pub const FIND_PLACE_PATH: &str = "findplacefromtext/json";
pub const PLACE_DETAILS_PATH: &str = "details/json";
pub const FIND_PLACE_FIELDS: &str = "place_id";
pub const PLACE_DETAILS_FIELDS: &str = "rating,user_ratings_total,reviews";

pub const MISSING_OUTPUT_MESSAGE: &str =
    "File not found. Please ensure the file exists or run the data collection process first.";
