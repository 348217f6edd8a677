use crate::domain::model::GeoRecord;
use crate::domain::reference::is_eu_country;

/// Geographic reach allowed for a campaign's targets, used by plan rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionScope {
    UsOnly,
    NorthAmericaAndEu,
    Global,
}

impl RegionScope {
    pub fn allows_country(&self, country: &str) -> bool {
        let cy = country.to_lowercase();
        match self {
            RegionScope::UsOnly => cy == "us",
            RegionScope::NorthAmericaAndEu => cy == "us" || cy == "ca" || is_eu_country(&cy),
            RegionScope::Global => true,
        }
    }
}

/// True when every target falls inside `scope`.
pub fn targets_within_scope(targets: &[GeoRecord], scope: RegionScope) -> bool {
    targets.iter().all(|t| scope.allows_country(&t.country))
}
