//! Route modules organized by bounded context.

pub mod addresses;
pub mod appointments;
pub mod donors;
pub mod health;
pub mod matches;
pub mod posts;
pub mod requests;
