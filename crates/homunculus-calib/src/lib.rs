//! Joint anchor calibration for the humanoid skeleton.
//!
//! Loads the calibration file that places the leg, head, eye and inertial
//! joints in the robot-local frame. Arm and torso anchors are derived from
//! the kinematic model instead (see `homunculus-kin`).

pub mod error;
pub mod parser;
pub mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::CalibrationError;
pub use parser::{load, parse_str};
pub use types::{Chain, JointAnchor, JointCalibration};
