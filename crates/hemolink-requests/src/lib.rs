//! Hemolink — Blood Request bounded context.
//!
//! Blood requests opened by requesters, plus the address/geolocation value
//! model used to place them.

pub mod application;
pub mod domain;
