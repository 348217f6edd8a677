use crate::core::coords::resolve_coordinates;
use crate::core::ip::resolve_ip;
use crate::domain::model::{GeoRecord, GeoSignal};
use crate::domain::ports::{Geocoder, IpDatabase};
use std::sync::Arc;

/// Resolves raw location signals using one geocoder and an optional shared
/// IP database. Safe to share across tasks.
pub struct GeoLocator<G: Geocoder> {
    geocoder: G,
    ip_db: Option<Arc<dyn IpDatabase>>,
}

impl<G: Geocoder> GeoLocator<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            ip_db: None,
        }
    }

    pub fn with_ip_database(mut self, db: Arc<dyn IpDatabase>) -> Self {
        self.ip_db = Some(db);
        self
    }

    pub fn has_ip_database(&self) -> bool {
        self.ip_db.is_some()
    }

    pub async fn from_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        timestamp: i64,
    ) -> Option<GeoRecord> {
        resolve_coordinates(&self.geocoder, latitude, longitude, timestamp).await
    }

    pub fn from_ip(&self, ip: &str) -> Option<GeoRecord> {
        resolve_ip(self.ip_db.as_deref(), ip)
    }

    pub async fn locate(&self, signal: &GeoSignal) -> Option<GeoRecord> {
        match signal {
            GeoSignal::Coordinates {
                latitude,
                longitude,
                timestamp,
            } => self.from_coordinates(*latitude, *longitude, *timestamp).await,
            // The database read is a short blocking call on a memory-mapped file.
            GeoSignal::Ip(ip) => self.from_ip(ip),
        }
    }

    /// First signal, in the given order, that resolves.
    pub async fn locate_any(&self, signals: &[GeoSignal]) -> Option<GeoRecord> {
        for signal in signals {
            if let Some(record) = self.locate(signal).await {
                return Some(record);
            }
        }
        tracing::debug!(signals = signals.len(), "No signal produced a usable geo");
        None
    }
}
