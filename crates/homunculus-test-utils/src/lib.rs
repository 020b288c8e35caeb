//! Shared test fixtures and utilities for homunculus crates.
//!
//! Provides Bevy test app builders, a calibration fixture and recording or
//! scripted stand-ins for the engine-side seams.

pub mod app;
pub mod fixtures;
pub mod mocks;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use app::{actuator_test_app, minimal_test_app};
pub use fixtures::{CALIBRATION_TOML, calibration, write_calibration, write_robot_config};
pub use mocks::{ActuatorCall, RecordingActuators, ScriptedContacts};
