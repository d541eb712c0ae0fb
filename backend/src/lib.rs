//! Contact book library modules.
//!
//! The binary in `main.rs` wires these together: settings, the JSON file
//! store, the HTTP adapter and the trace middleware.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
