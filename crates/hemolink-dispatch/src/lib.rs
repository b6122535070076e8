//! Hemolink — in-process domain event dispatch.
//!
//! Bridges the event buffer on an aggregate to the rest of the system: after
//! a successful write, the application layer calls
//! [`drain_and_publish`](pipeline::drain_and_publish), which empties the
//! buffer and delivers each event through an [`InProcessPublisher`]
//! sequentially. The flush is an explicit function call, visible to tests,
//! rather than a persistence-framework hook.

pub mod audit;
pub mod pipeline;
pub mod publisher;

pub use audit::AuditLogHandler;
pub use pipeline::drain_and_publish;
pub use publisher::{EventHandler, InProcessPublisher};
