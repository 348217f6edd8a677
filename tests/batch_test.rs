use anyhow::Result;
use geo_targeting::app::{run_batch, Profile};
use geo_targeting::domain::model::IpLocation;
use geo_targeting::domain::ports::IpDatabase;
use geo_targeting::{GeoLocator, GeoRecord, GeoSource, GoogleGeocoder};
use httpmock::prelude::*;
use std::net::IpAddr;
use std::sync::Arc;

struct StaticIpDb;

impl IpDatabase for StaticIpDb {
    fn lookup(&self, ip: IpAddr) -> geo_targeting::Result<Option<IpLocation>> {
        let location = match ip.to_string().as_str() {
            "24.48.0.1" => IpLocation {
                subdivision_codes: vec!["QC".to_string()],
                country_code: Some("CA".to_string()),
                country_name: Some("Canada".to_string()),
            },
            "81.2.69.142" => IpLocation {
                subdivision_codes: vec!["ENG".to_string()],
                country_code: Some("GB".to_string()),
                country_name: Some("United Kingdom".to_string()),
            },
            _ => return Ok(None),
        };
        Ok(Some(location))
    }
}

fn profile(id: &str, coords: Option<(f64, f64)>, ip: Option<&str>) -> Profile {
    Profile {
        id: id.to_string(),
        lat: coords.map(|c| c.0),
        lng: coords.map(|c| c.1),
        ts: Some(1_500_000_000),
        ip: ip.map(str::to_string),
    }
}

fn locator(server: &MockServer) -> Arc<GeoLocator<GoogleGeocoder>> {
    let geocoder = GoogleGeocoder::new(server.url("/geocode/json"), None);
    Arc::new(GeoLocator::new(geocoder).with_ip_database(Arc::new(StaticIpDb)))
}

#[tokio::test]
async fn test_batch_eligibility_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let texas = server.mock(|when, then| {
        when.method(GET)
            .path("/geocode/json")
            .query_param("latlng", "30.267200,-97.743100");
        then.status(200).json_body(serde_json::json!({
            "results": [{"address_components": [
                {"long_name": "Texas", "short_name": "TX", "types": ["administrative_area_level_1", "political"]},
                {"long_name": "United States", "short_name": "US", "types": ["country", "political"]}
            ]}],
            "status": "OK"
        }));
    });
    let failing = server.mock(|when, then| {
        when.method(GET)
            .path("/geocode/json")
            .query_param("latlng", "10.000000,10.000000");
        then.status(500);
    });

    let profiles = vec![
        profile("austin", Some((30.2672, -97.7431)), Some("24.48.0.1")),
        profile("montreal", None, Some("24.48.0.1")),
        profile("fallback", Some((10.0, 10.0)), Some("81.2.69.142")),
        profile("nowhere", Some((0.0, 0.0)), None),
        profile("unknown-ip", None, Some("203.0.113.9")),
    ];
    let targets = vec![
        GeoRecord::state_target("TX", "US"),
        GeoRecord::country_target("GB"),
    ];

    let results = run_batch(locator(&server), profiles, &targets, 2).await?;

    texas.assert();
    failing.assert();

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["austin", "montreal", "fallback", "nowhere", "unknown-ip"]);

    let austin = &results[0];
    assert!(austin.eligible);
    let geo = austin.geo.as_ref().unwrap();
    assert_eq!(geo.state, "tx");
    assert_eq!(geo.source, Some(GeoSource::Coordinates));

    let montreal = &results[1];
    assert!(!montreal.eligible);
    assert_eq!(montreal.geo.as_ref().unwrap().state, "qc");

    let fallback = &results[2];
    assert!(fallback.eligible);
    let geo = fallback.geo.as_ref().unwrap();
    assert_eq!(geo.country, "gb");
    assert!(geo.state.is_empty());
    assert_eq!(geo.source, Some(GeoSource::Ip));

    assert!(results[3].geo.is_none());
    assert!(!results[3].eligible);
    assert!(results[4].geo.is_none());
    assert!(!results[4].eligible);

    Ok(())
}

#[tokio::test]
async fn test_batch_without_targets_everyone_eligible() -> Result<()> {
    let server = MockServer::start();
    let profiles = vec![profile("a", None, None), profile("b", None, Some("24.48.0.1"))];

    let results = run_batch(locator(&server), profiles, &[], 1).await?;
    assert!(results.iter().all(|r| r.eligible));
    assert!(results[0].geo.is_none());
    assert!(results[1].geo.is_some());
    Ok(())
}

#[tokio::test]
async fn test_batch_rejects_invalid_targets() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200);
    });

    let targets = vec![GeoRecord::state_target("idf", "FR")];
    let result = run_batch(
        locator(&server),
        vec![profile("a", Some((48.85, 2.35)), None)],
        &targets,
        4,
    )
    .await;

    assert!(result.is_err());
    api_mock.assert_hits(0);
}

#[test]
fn test_profiles_parse_from_json() {
    let raw = r#"[
        {"id": "inf-1", "lat": 40.7128, "lng": -74.006, "ip": "8.8.8.8"},
        {"id": "inf-2", "ip": "24.48.0.1"}
    ]"#;
    let profiles: Vec<Profile> = serde_json::from_str(raw).unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].signals().len(), 2);
    assert_eq!(profiles[1].signals().len(), 1);

    let outcome = tokio_test::block_on(async {
        let server = MockServer::start_async().await;
        run_batch(locator(&server), vec![profiles[1].clone()], &[], 1).await
    });
    assert_eq!(outcome.unwrap()[0].geo.as_ref().unwrap().country, "ca");
}
