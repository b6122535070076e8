//! Commands for the Blood Request context.

use hemolink_core::blood::BloodType;
use hemolink_core::command::Command;
use uuid::Uuid;

use super::address::GeocodingResult;

/// Command to open a blood request.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The requesting user.
    pub requester_id: i64,
    /// Requested blood type.
    pub blood_type: BloodType,
    /// Requested quantity in units.
    pub quantity_units: i32,
    /// Latitude of the place of need.
    pub latitude: f64,
    /// Longitude of the place of need.
    pub longitude: f64,
    /// Stored address backing the location, if one exists.
    pub address_id: Option<i64>,
}

impl Command for OpenRequest {
    fn command_type(&self) -> &'static str {
        "requests.open_request"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to store a validated address.
#[derive(Debug, Clone)]
pub struct CreateAddress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
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
    /// Geocoding provider output, if the address was geocoded upstream.
    pub geocoding: Option<GeocodingResult>,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl Command for CreateAddress {
    fn command_type(&self) -> &'static str {
        "requests.create_address"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to mark a request fulfilled.
#[derive(Debug, Clone)]
pub struct FulfillRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The request identifier.
    pub request_id: i64,
}

impl Command for FulfillRequest {
    fn command_type(&self) -> &'static str {
        "requests.fulfill_request"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to cancel a request.
#[derive(Debug, Clone)]
pub struct CancelRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The request identifier.
    pub request_id: i64,
    /// Free-text reason, if one was given.
    pub reason: Option<String>,
}

impl Command for CancelRequest {
    fn command_type(&self) -> &'static str {
        "requests.cancel_request"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
