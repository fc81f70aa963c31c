//! System orchestration, startup, and shutdown logic.

pub mod profile_system;
pub mod telemetry;

pub use profile_system::*;
pub use telemetry::*;
