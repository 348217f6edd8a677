use crate::domain::model::GeoRecord;
use crate::domain::reference::{CA_PROVINCES, COUNTRIES, US_STATES};
use crate::utils::error::{GeoError, Result};

/// Validates a resolved record and returns its normalized form.
///
/// Country and state come back lowercase. A state outside US/CA is cleared
/// rather than rejected. The input is never modified.
pub fn normalize_geo(record: &GeoRecord) -> Option<GeoRecord> {
    if record.country.is_empty() {
        return None;
    }

    let country = record.country.to_lowercase();
    if !COUNTRIES.contains(country.as_str()) {
        return None;
    }

    let state = record.state.to_lowercase();
    let state = match country.as_str() {
        "us" => {
            if !state.is_empty() && !US_STATES.contains(state.as_str()) {
                return None;
            }
            state
        }
        "ca" => {
            if !state.is_empty() && !CA_PROVINCES.contains(state.as_str()) {
                return None;
            }
            state
        }
        // State is not tracked outside US/CA
        _ => String::new(),
    };

    Some(GeoRecord {
        state,
        country,
        timestamp: record.timestamp,
        source: record.source,
    })
}

pub fn is_valid_geo(record: &GeoRecord) -> bool {
    normalize_geo(record).is_some()
}

/// Stricter check for campaign targeting criteria: a state outside US/CA is
/// a configuration mistake and is rejected instead of cleared.
pub fn validate_geo_target(target: &GeoRecord) -> Result<GeoRecord> {
    let normalized = normalize_geo(target).ok_or_else(|| GeoError::InvalidTarget {
        target: target.to_string(),
        reason: "unknown country or state code".to_string(),
    })?;

    if normalized.country != "us" && normalized.country != "ca" && !target.state.is_empty() {
        return Err(GeoError::InvalidTarget {
            target: target.to_string(),
            reason: "state targeting is only allowed for US and CA".to_string(),
        });
    }

    Ok(normalized)
}

pub fn is_valid_geo_target(target: &GeoRecord) -> bool {
    validate_geo_target(target).is_ok()
}

/// Validates a campaign's whole target list, failing on the first bad entry.
pub fn validate_geo_targets(targets: &[GeoRecord]) -> Result<Vec<GeoRecord>> {
    targets
        .iter()
        .enumerate()
        .map(|(idx, target)| {
            validate_geo_target(target).map_err(|e| match e {
                GeoError::InvalidTarget { target, reason } => GeoError::InvalidTarget {
                    target: format!("#{} {}", idx, target),
                    reason,
                },
                other => other,
            })
        })
        .collect()
}
