//! Identity-system events and the inclusion filter applied to them.

mod admin_event;
mod domain_event;
mod event_type;
mod filter;

pub use admin_event::{AdminEvent, AuthDetails, OperationType};
pub use domain_event::DomainEvent;
pub use event_type::EventType;
pub use filter::{InclusionFilter, DEFAULT_INCLUDED_EVENTS};
