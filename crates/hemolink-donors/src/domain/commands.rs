//! Commands for the Donor context.

use chrono::NaiveDate;
use hemolink_core::blood::BloodType;
use hemolink_core::command::Command;
use uuid::Uuid;

/// Command to register a donor.
#[derive(Debug, Clone)]
pub struct RegisterDonor {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The backing user account.
    pub user_id: i64,
    /// Full name.
    pub full_name: String,
    /// Blood type.
    pub blood_type: BloodType,
    /// Contact phone number, if given.
    pub phone: Option<String>,
}

impl Command for RegisterDonor {
    fn command_type(&self) -> &'static str {
        "donors.register_donor"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record a completed donation.
#[derive(Debug, Clone)]
pub struct RecordDonation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The donor who donated.
    pub donor_id: i64,
    /// The date of the donation.
    pub donated_on: NaiveDate,
}

impl Command for RecordDonation {
    fn command_type(&self) -> &'static str {
        "donors.record_donation"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
