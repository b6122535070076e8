//! Hemolink — Donor bounded context.
//!
//! Donor registration and donation tracking, including the eligibility
//! window between donations.

pub mod application;
pub mod domain;
