//! Hemolink — Donor Matching bounded context.
//!
//! Tracks a proposed donor-to-request pairing through contact and response:
//! PROPOSED → CONTACTED → {ACCEPTED, DECLINED, NO_ANSWER}.

pub mod application;
pub mod domain;
