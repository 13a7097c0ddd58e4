//! Core types and service wiring for the sikdan school meal viewer.

/// Conversions between the user-facing date and the upstream date token.
pub mod date;
/// Domain models shared by providers and front ends.
pub mod model;
/// Bundle tying a school to the port that serves its meals.
pub mod plugin;
/// Traits describing the provider interfaces.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;

pub use date::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
