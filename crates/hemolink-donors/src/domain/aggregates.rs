//! Aggregate roots for the Donor context.

use chrono::{DateTime, Days, NaiveDate, Utc};
use hemolink_core::aggregate::AggregateRoot;
use hemolink_core::blood::BloodType;
use hemolink_core::clock::Clock;
use hemolink_core::error::DomainError;
use hemolink_core::event::{DomainEvent, EventMetadata};
use hemolink_core::rule::{BusinessRule, check_rule};
use uuid::Uuid;

use super::events::{DonationRecorded, DonorEvent, DonorEventKind, DonorRegistered};
use super::rules::DonorIsEligible;

/// Whole-blood deferral interval between donations.
const DEFERRAL_DAYS: u64 = 56;

/// The aggregate root for a registered donor.
#[derive(Debug, Clone)]
pub struct Donor {
    /// Aggregate identifier.
    pub id: i64,
    /// The backing user account.
    pub user_id: i64,
    /// Full name.
    pub full_name: String,
    /// Blood type.
    pub blood_type: BloodType,
    /// Contact phone number, if given.
    pub phone: Option<String>,
    /// Next date the donor may donate, when a deferral is recorded.
    pub(crate) next_eligible_on: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    pending_events: Vec<DonorEvent>,
}

impl Donor {
    /// Registers a donor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the full name is blank.
    pub fn register(
        id: i64,
        user_id: i64,
        full_name: String,
        blood_type: BloodType,
        phone: Option<String>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        if full_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "donor full name must not be blank".to_string(),
            ));
        }

        let mut donor = Self {
            id,
            user_id,
            full_name,
            blood_type,
            phone,
            next_eligible_on: None,
            created_at: clock.now(),
            updated_at: None,
            pending_events: Vec::new(),
        };
        donor.push_event(
            DonorEventKind::Registered(DonorRegistered {
                donor_id: id,
                user_id,
                blood_type,
            }),
            correlation_id,
            clock,
        );
        Ok(donor)
    }

    /// Rebuilds a donor from trusted persisted state.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: i64,
        user_id: i64,
        full_name: String,
        blood_type: BloodType,
        phone: Option<String>,
        next_eligible_on: Option<NaiveDate>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id,
            full_name,
            blood_type,
            phone,
            next_eligible_on,
            created_at,
            updated_at,
            pending_events: Vec::new(),
        }
    }

    /// Returns the donor's next eligible date, if a deferral is recorded.
    #[must_use]
    pub fn next_eligible_on(&self) -> Option<NaiveDate> {
        self.next_eligible_on
    }

    /// Returns true when the donor may donate today (UTC, date-only).
    #[must_use]
    pub fn is_eligible(&self, clock: &dyn Clock) -> bool {
        !DonorIsEligible {
            next_eligible_on: self.next_eligible_on,
            today: clock.now().date_naive(),
        }
        .is_broken()
    }

    /// Records a completed donation and starts a new deferral window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RuleViolation` while the previous deferral
    /// window is still running.
    pub fn record_donation(
        &mut self,
        donated_on: NaiveDate,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        check_rule(&DonorIsEligible {
            next_eligible_on: self.next_eligible_on,
            today: clock.now().date_naive(),
        })?;

        let next_eligible_on = donated_on
            .checked_add_days(Days::new(DEFERRAL_DAYS))
            .ok_or_else(|| {
                DomainError::Validation(format!("donation date out of range: {donated_on}"))
            })?;
        self.next_eligible_on = Some(next_eligible_on);
        self.updated_at = Some(clock.now());
        self.push_event(
            DonorEventKind::DonationRecorded(DonationRecorded {
                donor_id: self.id,
                donated_on,
                next_eligible_on,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    fn push_event(&mut self, kind: DonorEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let mut event = DonorEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: String::new(),
                aggregate_id: self.id,
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        event.metadata.event_type = event.event_type().to_owned();
        self.pending_events.push(event);
    }
}

impl AggregateRoot for Donor {
    type Event = DonorEvent;

    fn aggregate_id(&self) -> i64 {
        self.id
    }

    fn pending_events(&self) -> &[Self::Event] {
        &self.pending_events
    }

    fn take_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.pending_events)
    }

    fn clear_events(&mut self) {
        self.pending_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use hemolink_test_support::FixedClock;

    use super::super::events::DONATION_RECORDED_EVENT_TYPE;
    use super::*;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap())
    }

    fn registered_donor(clock: &FixedClock) -> Donor {
        let mut donor = Donor::register(
            1,
            50,
            "Amara Perera".to_string(),
            BloodType::ONegative,
            None,
            Uuid::new_v4(),
            clock,
        )
        .unwrap();
        donor.clear_events();
        donor
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let clock = clock();
        let result = Donor::register(
            1,
            50,
            "   ".to_string(),
            BloodType::ONegative,
            None,
            Uuid::new_v4(),
            &clock,
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_record_donation_starts_deferral_window() {
        let clock = clock();
        let mut donor = registered_donor(&clock);
        let donated_on = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();

        donor
            .record_donation(donated_on, Uuid::new_v4(), &clock)
            .unwrap();

        assert_eq!(
            donor.next_eligible_on(),
            Some(NaiveDate::from_ymd_opt(2026, 4, 7).unwrap())
        );
        assert!(!donor.is_eligible(&clock));
        let events = donor.pending_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), DONATION_RECORDED_EVENT_TYPE);
    }

    #[test]
    fn test_second_donation_within_window_fails() {
        let clock = clock();
        let mut donor = registered_donor(&clock);
        let donated_on = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        donor
            .record_donation(donated_on, Uuid::new_v4(), &clock)
            .unwrap();
        donor.clear_events();

        let result = donor.record_donation(donated_on, Uuid::new_v4(), &clock);

        assert!(matches!(result, Err(DomainError::RuleViolation(_))));
        assert!(donor.pending_events().is_empty());
    }

    #[test]
    fn test_donation_allowed_once_window_has_passed() {
        let clock = clock();
        let mut donor = Donor::rehydrate(
            1,
            50,
            "Amara Perera".to_string(),
            BloodType::ONegative,
            None,
            Some(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()),
            clock.0,
            None,
        );

        // Window ends exactly today.
        assert!(donor.is_eligible(&clock));
        assert!(
            donor
                .record_donation(
                    NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
                    Uuid::new_v4(),
                    &clock
                )
                .is_ok()
        );
    }
}
