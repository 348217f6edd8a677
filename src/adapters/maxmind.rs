use crate::domain::model::IpLocation;
use crate::domain::ports::IpDatabase;
use crate::utils::error::Result;
use maxminddb::{geoip2, Reader};
use std::net::IpAddr;
use std::path::Path;

/// GeoIP2/GeoLite2 City database, opened once and shared for the process
/// lifetime. `Reader` lookups are read-only and safe to run concurrently.
pub struct MaxMindDatabase {
    reader: Reader<Vec<u8>>,
}

impl MaxMindDatabase {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::info!("Loading GeoIP database from: {}", path.as_ref().display());
        let reader = Reader::open_readfile(path)?;
        tracing::info!(
            "GeoIP database loaded (type: {}, build epoch: {})",
            reader.metadata.database_type,
            reader.metadata.build_epoch
        );
        Ok(Self { reader })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Ok(Self {
            reader: Reader::from_source(bytes)?,
        })
    }
}

impl IpDatabase for MaxMindDatabase {
    fn lookup(&self, ip: IpAddr) -> Result<Option<IpLocation>> {
        let result = self.reader.lookup(ip)?;
        if !result.has_data() {
            return Ok(None);
        }

        let city: geoip2::City = match result.decode()? {
            Some(city) => city,
            None => return Ok(None),
        };

        Ok(Some(IpLocation {
            subdivision_codes: city
                .subdivisions
                .iter()
                .map(|s| s.iso_code.unwrap_or_default().to_string())
                .collect(),
            country_code: city.country.iso_code.map(str::to_string),
            country_name: city.country.names.english.map(str::to_string),
        }))
    }
}
