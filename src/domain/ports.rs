use crate::domain::model::{GeocodeResponse, IpLocation};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::IpAddr;

/// Reverse geocoding by coordinate. Latitude and longitude arrive already
/// formatted as fixed 6-decimal strings.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse_geocode(&self, lat: &str, lng: &str) -> Result<GeocodeResponse>;
}

/// Offline IP-to-location database. Implementations must allow concurrent
/// read-only lookups from many tasks.
pub trait IpDatabase: Send + Sync {
    /// `Ok(None)` when the database has no entry for the address.
    fn lookup(&self, ip: IpAddr) -> Result<Option<IpLocation>>;
}

pub trait ConfigProvider: Send + Sync {
    fn geocoder_endpoint(&self) -> &str;
    fn geocoder_api_key(&self) -> Option<&str>;
    fn ip_database_path(&self) -> Option<&str>;
    fn concurrent_requests(&self) -> usize;
}
