use crate::app::ports::{FindPlaceResponse, PlaceDetailsResponse, PlacesPort};
use crate::constants::{FIND_PLACE_FIELDS, FIND_PLACE_PATH, PLACE_DETAILS_FIELDS, PLACE_DETAILS_PATH};
use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Places API adapter backed by reqwest. Query values, including the station
/// name, are URL-encoded by reqwest.
pub struct ReqwestPlaces {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ReqwestPlaces {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Send a request and decode its JSON body. The credential travels in the
/// query string, so the URL is stripped from every error before it leaves here.
async fn get_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T> {
    let resp = request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(reqwest::Error::without_url)?;
    Ok(resp.json::<T>().await.map_err(reqwest::Error::without_url)?)
}

#[async_trait]
impl PlacesPort for ReqwestPlaces {
    async fn find_place(&self, query: &str) -> Result<FindPlaceResponse> {
        let url = self.endpoint(FIND_PLACE_PATH);
        debug!("GET {}", url);
        let request = self.client.get(&url).query(&[
            ("input", query),
            ("inputtype", "textquery"),
            ("fields", FIND_PLACE_FIELDS),
            ("key", self.api_key.as_str()),
        ]);
        get_json(request).await
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse> {
        let url = self.endpoint(PLACE_DETAILS_PATH);
        debug!("GET {}", url);
        let request = self.client.get(&url).query(&[
            ("place_id", place_id),
            ("fields", PLACE_DETAILS_FIELDS),
            ("key", self.api_key.as_str()),
        ]);
        get_json(request).await
    }
}
