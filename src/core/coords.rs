use crate::core::validator::normalize_geo;
use crate::domain::model::{GeoRecord, GeoSource, GeocodeResponse};
use crate::domain::ports::Geocoder;

const STATE_COMPONENT: &str = "administrative_area_level_1";
const COUNTRY_COMPONENT: &str = "country";

/// Pulls the short-form state and country codes out of a geocoding response.
/// When a type appears more than once the last component seen wins.
pub fn extract_address(response: &GeocodeResponse) -> (String, String) {
    let mut state = String::new();
    let mut country = String::new();

    for result in &response.results {
        for component in &result.address_components {
            for kind in &component.types {
                match kind.as_str() {
                    STATE_COMPONENT => state = component.short_name.clone(),
                    COUNTRY_COMPONENT => country = component.short_name.clone(),
                    _ => {}
                }
            }
        }
    }

    (state, country)
}

/// Resolves coordinates to a validated record. Never fails: lookup errors and
/// invalid results come back as `None`.
///
/// `(0, 0)` is treated as "no location supplied", so the real point on the
/// equator at the prime meridian cannot be resolved.
pub async fn resolve_coordinates<G>(
    geocoder: &G,
    latitude: f64,
    longitude: f64,
    timestamp: i64,
) -> Option<GeoRecord>
where
    G: Geocoder + ?Sized,
{
    if latitude == 0.0 && longitude == 0.0 {
        return None;
    }

    let lat = format!("{:.6}", latitude);
    let lng = format!("{:.6}", longitude);

    let response = match geocoder.reverse_geocode(&lat, &lng).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(lat = %lat, lng = %lng, error = %e, "Error extracting geo from coordinates");
            return None;
        }
    };

    if !response.status.is_empty() && response.status != "OK" {
        tracing::debug!(lat = %lat, lng = %lng, status = %response.status, "Geocoder returned non-OK status");
    }

    let (state, country) = extract_address(&response);
    if state.is_empty() && country.is_empty() {
        tracing::debug!(lat = %lat, lng = %lng, "Geocoder returned no state or country");
        return None;
    }

    let candidate = GeoRecord {
        state,
        country,
        timestamp,
        source: Some(GeoSource::Coordinates),
    };

    match normalize_geo(&candidate) {
        Some(record) => Some(record),
        None => {
            tracing::warn!(
                lat = %lat,
                lng = %lng,
                country = %candidate.country,
                state = %candidate.state,
                "Geocoder returned invalid geo"
            );
            None
        }
    }
}
