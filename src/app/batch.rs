use crate::core::matcher::is_geo_match;
use crate::core::validator::validate_geo_targets;
use crate::core::GeoLocator;
use crate::domain::model::{GeoRecord, GeoSignal};
use crate::domain::ports::Geocoder;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// A profile's raw location signals as supplied to a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub ts: Option<i64>,
    pub ip: Option<String>,
}

impl Profile {
    /// Coordinates first, then IP.
    pub fn signals(&self) -> Vec<GeoSignal> {
        let mut signals = Vec::new();
        if let (Some(latitude), Some(longitude)) = (self.lat, self.lng) {
            signals.push(GeoSignal::Coordinates {
                latitude,
                longitude,
                timestamp: self.ts.unwrap_or_else(|| chrono::Utc::now().timestamp()),
            });
        }
        if let Some(ip) = self.ip.as_ref().filter(|ip| !ip.is_empty()) {
            signals.push(GeoSignal::Ip(ip.clone()));
        }
        signals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    pub id: String,
    pub geo: Option<GeoRecord>,
    pub eligible: bool,
}

/// Resolves every profile concurrently (at most `concurrency` lookups in
/// flight) and checks each against `targets`. Results keep input order.
///
/// Fails only when the target list itself is invalid.
pub async fn run_batch<G>(
    locator: Arc<GeoLocator<G>>,
    profiles: Vec<Profile>,
    targets: &[GeoRecord],
    concurrency: usize,
) -> Result<Vec<Eligibility>>
where
    G: Geocoder + 'static,
{
    let targets = Arc::new(validate_geo_targets(targets)?);
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    tracing::info!(
        "Resolving {} profiles against {} targets (concurrency {})",
        profiles.len(),
        targets.len(),
        concurrency.max(1)
    );

    let mut results: Vec<Option<Eligibility>> = vec![None; profiles.len()];
    let ids: Vec<String> = profiles.iter().map(|p| p.id.clone()).collect();
    let mut tasks = JoinSet::new();

    for (idx, profile) in profiles.into_iter().enumerate() {
        let locator = Arc::clone(&locator);
        let targets = Arc::clone(&targets);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let geo = locator.locate_any(&profile.signals()).await;
            if geo.is_none() {
                tracing::debug!(id = %profile.id, "No geo resolved for profile");
            }
            let eligible = is_geo_match(&targets, geo.as_ref());
            (
                idx,
                Eligibility {
                    id: profile.id,
                    geo,
                    eligible,
                },
            )
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, outcome)) => results[idx] = Some(outcome),
            Err(e) => tracing::error!("Profile resolution task failed: {}", e),
        }
    }

    let eligible_count = results.iter().flatten().filter(|r| r.eligible).count();
    tracing::info!("{} of {} profiles eligible", eligible_count, ids.len());

    Ok(results
        .into_iter()
        .zip(ids)
        .map(|(outcome, id)| {
            outcome.unwrap_or_else(|| Eligibility {
                id,
                geo: None,
                eligible: targets.is_empty(),
            })
        })
        .collect())
}
