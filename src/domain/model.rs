use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoSource {
    #[serde(rename = "coords")]
    Coordinates,
    #[serde(rename = "ip")]
    Ip,
}

/// A resolved location or a campaign targeting criterion.
///
/// Country and state are ISO codes. Empty strings mean "not known" and are
/// left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,

    #[serde(rename = "ts", default, skip_serializing_if = "is_zero")]
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<GeoSource>,
}

fn is_zero(ts: &i64) -> bool {
    *ts == 0
}

impl GeoRecord {
    /// Country-wide targeting criterion.
    pub fn country_target(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    /// State-level targeting criterion (meaningful for US and CA only).
    pub fn state_target(state: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            country: country.into(),
            ..Self::default()
        }
    }

    /// A record without a country carries no usable location.
    pub fn is_present(&self) -> bool {
        !self.country.is_empty()
    }

    /// Display label such as `"CA, US"` or `"GB"`.
    pub fn label(&self) -> Option<String> {
        if self.country.is_empty() {
            return None;
        }
        let country = self.country.to_uppercase();
        if self.state.is_empty() {
            Some(country)
        } else {
            Some(format!("{}, {}", self.state.to_uppercase(), country))
        }
    }
}

impl fmt::Display for GeoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{state: {:?}, country: {:?}}}", self.state, self.country)
    }
}

/// Most recent usable record among a profile's resolved locations.
pub fn latest_geo<'a, I>(records: I) -> Option<&'a GeoRecord>
where
    I: IntoIterator<Item = &'a GeoRecord>,
{
    records
        .into_iter()
        .filter(|r| r.is_present())
        .fold(None, |best: Option<&GeoRecord>, r| match best {
            Some(b) if b.timestamp >= r.timestamp => Some(b),
            _ => Some(r),
        })
}

/// Reverse-geocoding response as returned by the geocoding service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Fields read from one IP database record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpLocation {
    pub subdivision_codes: Vec<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
}

/// A raw location signal for a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoSignal {
    Coordinates {
        latitude: f64,
        longitude: f64,
        timestamp: i64,
    },
    Ip(String),
}
