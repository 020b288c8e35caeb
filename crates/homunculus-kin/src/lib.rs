//! Forward kinematics for the humanoid arm and torso chains.
//!
//! Arm and torso joint anchors are generated from a Denavit–Hartenberg model
//! of each arm so the skeleton follows the model's link lengths. Legs, head
//! and eyes keep the calibration-file values.
//!
//! # Architecture
//!
//! ```text
//! DhChain (per arm) ──► ArmKinematics ──┐
//!                                       ├──► JointLayout ──► skeleton builder
//! JointCalibration ─────────────────────┘
//! ```

pub mod arm;
pub mod chain;
pub mod error;
pub mod layout;

pub use arm::{ARM_ANCHORS, ARM_CHAIN_DOF, ArmKinematics, RootToWorld, TORSO_ANCHORS, arm_chain};
pub use chain::{DhChain, DhLink};
pub use error::KinematicsError;
pub use layout::JointLayout;
