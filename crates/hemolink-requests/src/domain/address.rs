//! Address and geolocation value model.

use chrono::{DateTime, Utc};
use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated coordinate pair. Latitude is within `[-90, 90]` and longitude
/// within `[-180, 180]`, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Constructs a coordinate pair, rejecting out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when either coordinate falls
    /// outside its inclusive bounds.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::Validation(format!(
                "latitude must be within [-90, 90], got {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::Validation(format!(
                "longitude must be within [-180, 180], got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point, in kilometers (haversine).
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat_a = self.latitude.to_radians();
        let lat_b = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
    }
}

/// Result returned by a geocoding provider for a stored address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingResult {
    /// Provider-normalized address text.
    pub normalized_address: String,
    /// Provider place identifier.
    pub place_id: String,
    /// Provider confidence score.
    pub confidence: Option<f64>,
}

/// An immutable, value-like address entity. Constructed only via
/// [`Address::new`] (validating) or [`Address::rehydrate`] (trusted reload);
/// there are no public mutators.
#[derive(Debug, Clone)]
pub struct Address {
    /// Surrogate key.
    pub id: i64,
    /// Street line.
    pub line: String,
    /// District, where the addressing scheme has one.
    pub district: Option<String>,
    /// City.
    pub city: String,
    /// Province or state.
    pub province: Option<String>,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Geocoding provider output, when the address has been geocoded.
    pub geocoding: Option<GeocodingResult>,
    /// Validated coordinates.
    pub location: GeoLocation,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Address {
    /// Constructs a validated address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when line, city, or country is
    /// blank, or the coordinates are out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        line: String,
        district: Option<String>,
        city: String,
        province: Option<String>,
        country: String,
        postal_code: Option<String>,
        geocoding: Option<GeocodingResult>,
        latitude: f64,
        longitude: f64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        for (name, value) in [("line", &line), ("city", &city), ("country", &country)] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "address {name} must not be blank"
                )));
            }
        }
        let location = GeoLocation::new(latitude, longitude)?;
        Ok(Self {
            id,
            line,
            district,
            city,
            province,
            country,
            postal_code,
            geocoding,
            location,
            created_at: clock.now(),
        })
    }

    /// Rebuilds an address from trusted persisted state.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: i64,
        line: String,
        district: Option<String>,
        city: String,
        province: Option<String>,
        country: String,
        postal_code: Option<String>,
        geocoding: Option<GeocodingResult>,
        location: GeoLocation,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            line,
            district,
            city,
            province,
            country,
            postal_code,
            geocoding,
            location,
            created_at,
        }
    }
}
