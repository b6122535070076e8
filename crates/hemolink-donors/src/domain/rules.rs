//! Business rules for the Donor context.

use chrono::NaiveDate;
use hemolink_core::rule::BusinessRule;

/// A donor may only donate once their deferral window has passed.
/// Date-only comparison in UTC: a donor whose next eligible date is today
/// is eligible.
#[derive(Debug, Clone, Copy)]
pub struct DonorIsEligible {
    /// The donor's next eligible date, if a deferral is recorded.
    pub next_eligible_on: Option<NaiveDate>,
    /// Today's date in UTC.
    pub today: NaiveDate,
}

impl BusinessRule for DonorIsEligible {
    fn message(&self) -> String {
        match self.next_eligible_on {
            Some(date) => format!("donor is not eligible to donate until {date}"),
            None => "donor is not eligible to donate".to_string(),
        }
    }

    fn is_broken(&self) -> bool {
        self.next_eligible_on
            .is_some_and(|next| next > self.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_deferral_means_eligible() {
        let rule = DonorIsEligible {
            next_eligible_on: None,
            today: date(2026, 2, 10),
        };
        assert!(!rule.is_broken());
    }

    #[test]
    fn test_future_eligibility_date_breaks_the_rule() {
        let rule = DonorIsEligible {
            next_eligible_on: Some(date(2026, 3, 1)),
            today: date(2026, 2, 10),
        };
        assert!(rule.is_broken());
        assert!(rule.message().contains("2026-03-01"));
    }

    #[test]
    fn test_eligibility_date_today_or_past_is_fine() {
        for next in [date(2026, 2, 10), date(2026, 1, 1)] {
            let rule = DonorIsEligible {
                next_eligible_on: Some(next),
                today: date(2026, 2, 10),
            };
            assert!(!rule.is_broken());
        }
    }
}
