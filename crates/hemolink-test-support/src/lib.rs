//! Shared test doubles for the Hemolink backend.

mod clock;
mod publisher;

pub use clock::FixedClock;
pub use publisher::{FailingPublisher, RecordingPublisher};
