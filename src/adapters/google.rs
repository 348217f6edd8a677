use crate::domain::model::GeocodeResponse;
use crate::domain::ports::Geocoder;
use crate::utils::error::{GeoError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_GEOCODER_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Google-style reverse geocoding client (`?latlng=<lat>,<lng>&key=<key>`).
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GoogleGeocoder {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn reverse_geocode(&self, lat: &str, lng: &str) -> Result<GeocodeResponse> {
        let latlng = format!("{},{}", lat, lng);
        let mut request = self.client.get(&self.endpoint).query(&[("latlng", latlng.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        tracing::debug!("Reverse geocoding {} via {}", latlng, self.endpoint);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::GeocoderStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<GeocodeResponse>().await?)
    }
}
