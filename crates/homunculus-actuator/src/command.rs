//! Pending per-joint commands, refreshed every step by external controllers.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use homunculus_core::error::HomunculusError;
use homunculus_core::types::BodyRegion;

use crate::layout::region_slots;

// ---------------------------------------------------------------------------
// ActuatorCommand
// ---------------------------------------------------------------------------

/// Pending command of one joint.
///
/// Universal joints use both velocity components; every other joint reads
/// `velocity` or `torque` depending on its control mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Target velocity (rad/s), first axis of a universal joint.
    pub velocity: f32,
    /// Target velocity of the second axis of a universal joint (rad/s).
    pub velocity2: f32,
    /// Torque increment (Nm).
    pub torque: f32,
}

impl ActuatorCommand {
    pub const ZERO: Self = Self {
        velocity: 0.0,
        velocity2: 0.0,
        torque: 0.0,
    };
}

// ---------------------------------------------------------------------------
// CommandBuffer
// ---------------------------------------------------------------------------

/// Pending commands of all six regions, one entry per joint slot.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CommandBuffer {
    regions: [Vec<ActuatorCommand>; 6],
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuffer {
    /// All commands zeroed, sized to each region's slot layout.
    pub fn new() -> Self {
        let sized = |id: u8| match BodyRegion::try_from(id) {
            Ok(region) => vec![ActuatorCommand::ZERO; region_slots(region).len()],
            Err(_) => Vec::new(),
        };
        Self {
            regions: [sized(1), sized(2), sized(3), sized(4), sized(5), sized(6)],
        }
    }

    const fn slot(region: BodyRegion) -> usize {
        region.id() as usize - 1
    }

    pub fn region(&self, region: BodyRegion) -> &[ActuatorCommand] {
        &self.regions[Self::slot(region)]
    }

    pub fn region_mut(&mut self, region: BodyRegion) -> &mut [ActuatorCommand] {
        &mut self.regions[Self::slot(region)]
    }

    /// Command of one joint.
    pub fn joint_mut(
        &mut self,
        region: BodyRegion,
        index: usize,
    ) -> Result<&mut ActuatorCommand, HomunculusError> {
        let commands = &mut self.regions[Self::slot(region)];
        let len = commands.len();
        commands
            .get_mut(index)
            .ok_or(HomunculusError::JointOutOfRange {
                region: region.name(),
                index,
                len,
            })
    }

    pub fn set_velocity(
        &mut self,
        region: BodyRegion,
        index: usize,
        velocity: f32,
    ) -> Result<(), HomunculusError> {
        self.joint_mut(region, index)?.velocity = velocity;
        Ok(())
    }

    /// Both velocity components of a universal joint.
    pub fn set_universal_velocity(
        &mut self,
        region: BodyRegion,
        index: usize,
        velocity: [f32; 2],
    ) -> Result<(), HomunculusError> {
        let command = self.joint_mut(region, index)?;
        command.velocity = velocity[0];
        command.velocity2 = velocity[1];
        Ok(())
    }

    pub fn set_torque(
        &mut self,
        region: BodyRegion,
        index: usize,
        torque: f32,
    ) -> Result<(), HomunculusError> {
        self.joint_mut(region, index)?.torque = torque;
        Ok(())
    }

    /// Zero every velocity and torque of every region.
    pub fn reset(&mut self) {
        for commands in &mut self.regions {
            commands.fill(ActuatorCommand::ZERO);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_sized_per_region() {
        let buffer = CommandBuffer::new();
        for region in BodyRegion::DISPATCH_ORDER {
            assert_eq!(buffer.region(region).len(), region_slots(region).len());
        }
    }

    #[test]
    fn new_buffer_is_zeroed() {
        let buffer = CommandBuffer::default();
        for region in BodyRegion::DISPATCH_ORDER {
            assert!(
                buffer
                    .region(region)
                    .iter()
                    .all(|c| *c == ActuatorCommand::ZERO)
            );
        }
    }

    #[test]
    fn setters_write_the_right_joint() {
        let mut buffer = CommandBuffer::new();
        buffer.set_velocity(BodyRegion::Head, 2, 0.5).unwrap();
        buffer.set_torque(BodyRegion::RightLeg, 5, -2.0).unwrap();
        buffer
            .set_universal_velocity(BodyRegion::LeftArm, 5, [0.1, 0.2])
            .unwrap();

        assert!((buffer.region(BodyRegion::Head)[2].velocity - 0.5).abs() < f32::EPSILON);
        assert!((buffer.region(BodyRegion::RightLeg)[5].torque + 2.0).abs() < f32::EPSILON);
        let wrist = buffer.region(BodyRegion::LeftArm)[5];
        assert!((wrist.velocity - 0.1).abs() < f32::EPSILON);
        assert!((wrist.velocity2 - 0.2).abs() < f32::EPSILON);
        assert_eq!(buffer.region(BodyRegion::RightArm)[5], ActuatorCommand::ZERO);
    }

    #[test]
    fn out_of_range_joint_is_error() {
        let mut buffer = CommandBuffer::new();
        let err = buffer.set_velocity(BodyRegion::Torso, 5, 1.0).unwrap_err();
        assert!(matches!(
            err,
            HomunculusError::JointOutOfRange {
                region: "torso",
                index: 5,
                len: 5
            }
        ));
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut buffer = CommandBuffer::new();
        for region in BodyRegion::DISPATCH_ORDER {
            for command in buffer.region_mut(region) {
                *command = ActuatorCommand {
                    velocity: 1.0,
                    velocity2: 2.0,
                    torque: 3.0,
                };
            }
        }
        buffer.reset();
        assert_eq!(buffer, CommandBuffer::new());
    }
}
