// Adapters layer: concrete collaborators behind the domain ports.

pub mod google;
pub mod maxmind;

pub use google::{GoogleGeocoder, DEFAULT_GEOCODER_ENDPOINT};
pub use maxmind::MaxMindDatabase;
