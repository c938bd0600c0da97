//! Chat dispatch.
//!
//! Incoming text is routed to one of:
//! - the `/start` greeting with the reply keyboard
//! - the help text
//! - the "send my IP" lookup
//! - validation, then a geolocation lookup that edits a "searching…" placeholder
//!
//! Messages are handled one at a time in arrival order.

mod handler;
mod polling;
mod routing;

// Re-export public API
pub use handler::Dispatcher;
pub use routing::{main_keyboard, route, Route};
