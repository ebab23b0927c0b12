use crate::app::ports::PlacesPort;
use crate::error::Result;
use crate::types::{LookupOutcome, StationRecord};
use metrics::counter;
use tracing::{debug, info, instrument, warn};

/// Use case for turning station names into rating records via the places service
pub struct EnrichUseCase {
    places: Box<dyn PlacesPort>,
}

impl EnrichUseCase {
    pub fn new(places: Box<dyn PlacesPort>) -> Self {
        Self { places }
    }

    /// Look one station up: a "find place" call, then a "place details" call
    /// for the first candidate. Stops after the first call when nothing matches.
    #[instrument(skip(self))]
    pub async fn lookup_station(&self, name: &str) -> Result<LookupOutcome> {
        counter!("bus_ratings_lookups_total", "endpoint" => "find_place").increment(1);
        let found = self.places.find_place(name).await?;
        log_service_status("find_place", found.status.as_deref(), found.error_message.as_deref());

        let Some(place_id) = found.first_place_id() else {
            counter!("bus_ratings_not_found_total").increment(1);
            info!("Place not found");
            return Ok(LookupOutcome::NotFound { name: name.to_string() });
        };

        counter!("bus_ratings_lookups_total", "endpoint" => "place_details").increment(1);
        let details = self.places.place_details(place_id).await?;
        log_service_status("place_details", details.status.as_deref(), details.error_message.as_deref());

        let record = match details.result {
            Some(place) => {
                debug!(
                    "Fetched rating {:?} from {:?} ratings ({} reviews)",
                    place.rating,
                    place.user_ratings_total,
                    place.reviews.len()
                );
                StationRecord::new(name, place.rating, place.user_ratings_total)
            }
            None => {
                debug!("Details response has no result section");
                StationRecord::new(name, None, None)
            }
        };
        Ok(LookupOutcome::Found(record))
    }

    /// Look every station up in order. The first transport failure aborts the batch.
    pub async fn lookup_all(&self, names: &[String]) -> Result<Vec<LookupOutcome>> {
        let mut outcomes = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            outcomes.push(self.lookup_station(name).await?);
            if (i + 1) % 10 == 0 {
                debug!("Looked up {}/{} stations", i + 1, names.len());
            }
        }
        Ok(outcomes)
    }
}

fn log_service_status(endpoint: &str, status: Option<&str>, error_message: Option<&str>) {
    match status {
        None | Some("OK") | Some("ZERO_RESULTS") => {}
        Some(other) => warn!(
            "{} returned status {}: {}",
            endpoint,
            other,
            error_message.unwrap_or("no error message")
        ),
    }
}
