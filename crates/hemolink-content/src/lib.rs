//! Hemolink — Content bounded context.
//!
//! Editorial posts published on the coordination site:
//! DRAFT → PUBLISHED → ARCHIVED.

pub mod application;
pub mod domain;
