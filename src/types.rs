use crate::constants::{BUS_STATION_HEADER, NUMBER_OF_RATINGS_HEADER, RATING_HEADER};
use serde::{Deserialize, Deserializer, Serialize};

/// Rating data collected for a single station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "Bus Station")]
    pub bus_station: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Number of Ratings", deserialize_with = "deserialize_count")]
    pub number_of_ratings: Option<u64>,
}

impl StationRecord {
    pub fn new(bus_station: impl Into<String>, rating: Option<f64>, number_of_ratings: Option<u64>) -> Self {
        Self {
            bus_station: bus_station.into(),
            rating,
            number_of_ratings,
        }
    }

    /// A record without a rating is dropped from the result table.
    pub fn is_complete(&self) -> bool {
        self.rating.is_some()
    }
}

/// Outcome of looking one station up in the places service
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(StationRecord),
    NotFound { name: String },
}

impl LookupOutcome {
    pub fn station_name(&self) -> &str {
        match self {
            LookupOutcome::Found(record) => &record.bus_station,
            LookupOutcome::NotFound { name } => name,
        }
    }

    pub fn into_record(self) -> Option<StationRecord> {
        match self {
            LookupOutcome::Found(record) => Some(record),
            LookupOutcome::NotFound { .. } => None,
        }
    }
}

/// Sorted, persisted collection of station ratings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<StationRecord>,
}

impl ResultTable {
    pub fn new(rows: Vec<StationRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[StationRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn head(&self, limit: usize) -> &[StationRecord] {
        &self.rows[..limit.min(self.rows.len())]
    }

    pub fn headers() -> [&'static str; 3] {
        [BUS_STATION_HEADER, RATING_HEADER, NUMBER_OF_RATINGS_HEADER]
    }
}

/// Result of reading a persisted table
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Loaded(ResultTable),
    Missing { message: String },
}

// Tables written by other tools store counts as floats ("120.0") when the
// column has gaps, so accept any whole number.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) if value >= 0.0 && value.fract() == 0.0 => Ok(Some(value as u64)),
        Some(value) => Err(serde::de::Error::custom(format!(
            "invalid rating count: {}",
            value
        ))),
    }
}
