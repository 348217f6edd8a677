use crate::core::validator::normalize_geo;
use crate::domain::model::{GeoRecord, GeoSource};
use crate::domain::ports::IpDatabase;
use std::net::IpAddr;

/// Resolves an IP address through the offline database. Missing handle, bad
/// address, missing fields and invalid codes all come back as `None`.
pub fn resolve_ip(db: Option<&dyn IpDatabase>, ip: &str) -> Option<GeoRecord> {
    let db = db?;
    if ip.is_empty() {
        return None;
    }

    let addr: IpAddr = match ip.trim().parse() {
        Ok(addr) => addr,
        Err(_) => {
            tracing::debug!(ip, "Unparseable IP address");
            return None;
        }
    };

    let location = match db.lookup(addr) {
        Ok(Some(location)) => location,
        Ok(None) => {
            tracing::debug!(ip, "IP not found in geo database");
            return None;
        }
        Err(e) => {
            tracing::warn!(ip, error = %e, "Geo IP lookup failed");
            return None;
        }
    };

    let state = location
        .subdivision_codes
        .first()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    if state.is_empty() {
        tracing::info!(ip, "Failed geo IP state lookup");
        return None;
    }

    let country = location
        .country_code
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    if country.is_empty() {
        tracing::info!(ip, "Failed geo IP country lookup");
        return None;
    }

    let candidate = GeoRecord {
        state,
        country,
        timestamp: chrono::Utc::now().timestamp(),
        source: Some(GeoSource::Ip),
    };

    match normalize_geo(&candidate) {
        Some(record) => Some(record),
        None => {
            tracing::info!(
                ip,
                country = %candidate.country,
                state = %candidate.state,
                "Invalid geo generated via IP"
            );
            None
        }
    }
}
