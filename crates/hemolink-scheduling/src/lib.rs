//! Hemolink — Appointment Scheduling bounded context.
//!
//! Donation appointments between a donor and a blood request:
//! SCHEDULED → {CHECKED_IN, NO_SHOW, CANCELLED}.

pub mod application;
pub mod domain;
