pub mod coords;
pub mod eligibility;
pub mod ip;
pub mod locator;
pub mod matcher;
pub mod validator;

pub use coords::{extract_address, resolve_coordinates};
pub use eligibility::{targets_within_scope, RegionScope};
pub use ip::resolve_ip;
pub use locator::GeoLocator;
pub use matcher::{is_geo_match, matching_targets};
pub use validator::{
    is_valid_geo, is_valid_geo_target, normalize_geo, validate_geo_target, validate_geo_targets,
};
