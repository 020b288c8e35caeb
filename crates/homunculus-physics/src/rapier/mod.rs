//! Raw `rapier3d` skeleton.
//!
//! The skeleton lives in a [`SkeletonContext`] resource. The context
//! implements both engine seams of the shell: [`JointActuators`] for the
//! dispatcher and [`ContactProbe`] for the touch sensor.
//!
//! [`JointActuators`]: homunculus_actuator::JointActuators
//! [`ContactProbe`]: homunculus_skin::ContactProbe

pub mod actuators;
pub mod bridge;
pub mod contacts;
pub mod context;
pub mod systems;

pub use context::{JointBinding, MotorLimits, SkeletonContext};
