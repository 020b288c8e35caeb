//! Per-step forwarding of pending commands to the engine's joint actuators.

use homunculus_core::types::BodyRegion;

use crate::command::{ActuatorCommand, CommandBuffer};
use crate::layout::{JointSlot, region_slots};
use crate::mode::{ControlMode, ControlModeSource};

// ---------------------------------------------------------------------------
// JointActuators
// ---------------------------------------------------------------------------

/// Address of one joint slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointRef {
    pub region: BodyRegion,
    pub index: usize,
}

impl JointRef {
    pub const fn new(region: BodyRegion, index: usize) -> Self {
        Self { region, index }
    }
}

/// Engine-side actuator writes.
///
/// Implementations ignore joints the skeleton does not contain (for
/// instance finger hinges of a disabled hand).
pub trait JointActuators {
    /// Add a torque about the hinge axis for the coming step.
    fn add_hinge_torque(&mut self, joint: JointRef, torque: f32);

    /// Set the hinge motor's target velocity.
    fn set_hinge_velocity(&mut self, joint: JointRef, velocity: f32);

    /// Set both target velocities of a universal joint.
    fn set_universal_velocity(&mut self, joint: JointRef, velocity: [f32; 2]);
}

// ---------------------------------------------------------------------------
// ControlModeDispatcher
// ---------------------------------------------------------------------------

/// Applies one step of pending commands.
///
/// Regions are visited in [`BodyRegion::DISPATCH_ORDER`]. Each slot kind has
/// its own handler:
///
/// | slot | call |
/// |---|---|
/// | [`JointSlot::Hinge`] | torque or velocity, per the region's mode table |
/// | [`JointSlot::FingerHinge`] | velocity |
/// | [`JointSlot::Universal`] | both velocities |
/// | [`JointSlot::Vacant`] | none |
///
/// Torque control is not modelled on universal joints or finger hinges.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlModeDispatcher;

impl ControlModeDispatcher {
    /// Apply every region's commands, one region at a time.
    ///
    /// Each arm's hand slots follow that arm's hinges directly, not batched
    /// after both arms. Joint writes are independent of call order.
    pub fn apply_step(
        &self,
        modes: &impl ControlModeSource,
        commands: &CommandBuffer,
        actuators: &mut impl JointActuators,
    ) {
        for region in BodyRegion::DISPATCH_ORDER {
            self.apply_region(region, modes, commands.region(region), actuators);
        }
    }

    /// Apply the commands of a single region.
    pub fn apply_region(
        &self,
        region: BodyRegion,
        modes: &impl ControlModeSource,
        commands: &[ActuatorCommand],
        actuators: &mut impl JointActuators,
    ) {
        let table = modes.modes(region);
        for (index, (slot, command)) in region_slots(region).iter().zip(commands).enumerate() {
            let joint = JointRef::new(region, index);
            match slot {
                JointSlot::Hinge => {
                    let mode = table
                        .and_then(|t| t.get(index).copied())
                        .unwrap_or_default();
                    apply_hinge(joint, mode, command, actuators);
                }
                JointSlot::FingerHinge => actuators.set_hinge_velocity(joint, command.velocity),
                JointSlot::Universal => {
                    actuators.set_universal_velocity(joint, [command.velocity, command.velocity2]);
                }
                JointSlot::Vacant => {}
            }
        }
    }
}

fn apply_hinge(
    joint: JointRef,
    mode: ControlMode,
    command: &ActuatorCommand,
    actuators: &mut impl JointActuators,
) {
    match mode {
        ControlMode::Torque => actuators.add_hinge_torque(joint, command.torque),
        ControlMode::Velocity => actuators.set_hinge_velocity(joint, command.velocity),
    }
}
