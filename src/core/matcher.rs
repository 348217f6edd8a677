use crate::domain::model::GeoRecord;

fn target_matches(target: &GeoRecord, candidate: &GeoRecord) -> bool {
    if target.country.is_empty() {
        // A state without a country matches nothing.
        return false;
    }

    if target.state.is_empty() {
        return candidate.country.eq_ignore_ascii_case(&target.country);
    }

    candidate.state.eq_ignore_ascii_case(&target.state)
        && candidate.country.eq_ignore_ascii_case(&target.country)
}

/// Decides whether `candidate` satisfies any of a campaign's geo targets.
///
/// No targets means no restriction. An unknown location never satisfies a
/// non-empty target list.
pub fn is_geo_match(targets: &[GeoRecord], candidate: Option<&GeoRecord>) -> bool {
    if targets.is_empty() {
        return true;
    }

    match candidate {
        Some(candidate) => targets.iter().any(|t| target_matches(t, candidate)),
        None => false,
    }
}

/// The targets that `candidate` satisfies.
pub fn matching_targets<'a>(targets: &'a [GeoRecord], candidate: &GeoRecord) -> Vec<&'a GeoRecord> {
    targets
        .iter()
        .filter(|t| target_matches(t, candidate))
        .collect()
}
