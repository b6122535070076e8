//! Business rules for the Blood Request context.

use hemolink_core::rule::BusinessRule;

use super::aggregates::RequestStatus;

/// A request must ask for a positive number of units.
#[derive(Debug, Clone, Copy)]
pub struct RequestMustHaveValidQuantity {
    /// Requested quantity in units.
    pub quantity_units: i32,
}

impl BusinessRule for RequestMustHaveValidQuantity {
    fn message(&self) -> String {
        "a blood request must ask for at least one unit".to_string()
    }

    fn is_broken(&self) -> bool {
        self.quantity_units <= 0
    }
}

/// A request must carry a plausible coordinate pair.
#[derive(Debug, Clone, Copy)]
pub struct RequestMustHaveLocation {
    /// Raw latitude input.
    pub latitude: f64,
    /// Raw longitude input.
    pub longitude: f64,
}

impl BusinessRule for RequestMustHaveLocation {
    fn message(&self) -> String {
        "a blood request must carry valid coordinates".to_string()
    }

    fn is_broken(&self) -> bool {
        !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
    }
}

/// Only an open request can be fulfilled or cancelled.
#[derive(Debug, Clone, Copy)]
pub struct RequestIsOpen {
    /// Current request status.
    pub status: RequestStatus,
}

impl BusinessRule for RequestIsOpen {
    fn message(&self) -> String {
        "only an open request can change status".to_string()
    }

    fn is_broken(&self) -> bool {
        self.status != RequestStatus::Open
    }
}
