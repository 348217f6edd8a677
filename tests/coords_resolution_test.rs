use geo_targeting::core::resolve_coordinates;
use geo_targeting::domain::ports::Geocoder;
use geo_targeting::{GeoSource, GoogleGeocoder};
use httpmock::prelude::*;

fn geocode_body(state: &str, country: &str) -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "address_components": [
                {"long_name": "San Francisco", "short_name": "SF", "types": ["locality", "political"]},
                {"long_name": "California", "short_name": state, "types": ["administrative_area_level_1", "political"]},
                {"long_name": "United States", "short_name": country, "types": ["country", "political"]}
            ]
        }],
        "status": "OK"
    })
}

#[tokio::test]
async fn test_resolves_state_and_country_from_geocoder() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/geocode/json")
            .query_param("latlng", "37.774900,-122.419400")
            .query_param("key", "test-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(geocode_body("CA", "US"));
    });

    let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), Some("test-key".to_string()));
    let record = resolve_coordinates(&geocoder, 37.7749, -122.4194, 1_500_000_000)
        .await
        .expect("should resolve");

    api_mock.assert();
    assert_eq!(record.state, "ca");
    assert_eq!(record.country, "us");
    assert_eq!(record.timestamp, 1_500_000_000);
    assert_eq!(record.source, Some(GeoSource::Coordinates));
}

#[tokio::test]
async fn test_http_error_degrades_to_absence() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(500);
    });

    let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), None);
    assert!(geocoder.reverse_geocode("1.000000", "2.000000").await.is_err());
    assert!(resolve_coordinates(&geocoder, 1.0, 2.0, 1).await.is_none());
    api_mock.assert_hits(2);
}

#[tokio::test]
async fn test_malformed_body_degrades_to_absence() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200).body("<html>not json</html>");
    });

    let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), None);
    assert!(resolve_coordinates(&geocoder, 1.0, 2.0, 1).await.is_none());
}

#[tokio::test]
async fn test_zero_results_is_absence() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200)
            .json_body(serde_json::json!({"results": [], "status": "ZERO_RESULTS"}));
    });

    let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), None);
    assert!(resolve_coordinates(&geocoder, 12.5, -40.25, 1).await.is_none());
}

#[tokio::test]
async fn test_zero_coordinates_never_call_geocoder() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200).json_body(geocode_body("CA", "US"));
    });

    let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), None);
    assert!(resolve_coordinates(&geocoder, 0.0, 0.0, 1).await.is_none());
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_invalid_state_from_geocoder_is_absence() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200).json_body(geocode_body("ZZ", "US"));
    });

    let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), None);
    assert!(resolve_coordinates(&geocoder, 37.0, -120.0, 1).await.is_none());
}
