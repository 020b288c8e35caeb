//! [`JointActuators`] over the rapier skeleton.

use bevy::prelude::Vec3;
use rapier3d::prelude::JointAxis;

use homunculus_actuator::{JointActuators, JointRef};

use super::context::SkeletonContext;

impl SkeletonContext {
    /// Drive `axis` of `joint` towards `velocity` with the configured motor
    /// force limit.
    fn set_motor_velocity(&mut self, joint: JointRef, axis: JointAxis, velocity: f32) {
        let Some(binding) = self.joints.get(&joint).copied() else {
            return;
        };
        let limits = self.motor_limits;
        if let Some(j) = self.impulse_joint_set.get_mut(binding.handle, true) {
            j.data
                .set_motor_velocity(axis, velocity, limits.velocity_factor);
            j.data.set_motor_max_force(axis, limits.max_force);
        }
    }
}

impl JointActuators for SkeletonContext {
    /// Adds `torque` about the hinge axis: `+axis * torque` on the child and
    /// the reaction on the parent. The hinge motor is released so it does not
    /// absorb the torque. Torques accumulate until [`SkeletonContext::clear_torques`].
    fn add_hinge_torque(&mut self, joint: JointRef, torque: f32) {
        let Some(binding) = self.joints.get(&joint).copied() else {
            return;
        };
        if let Some(j) = self.impulse_joint_set.get_mut(binding.handle, true) {
            j.data.set_motor_velocity(JointAxis::AngX, 0.0, 0.0);
            j.data.set_motor_max_force(JointAxis::AngX, 0.0);
        }
        let Some(rotation) = self
            .rigid_body_set
            .get(binding.parent)
            .map(|b| b.position().rotation)
        else {
            return;
        };
        let world: Vec3 = rotation * binding.axis * torque;
        if let Some(child) = self.rigid_body_set.get_mut(binding.child) {
            child.add_torque(world, true);
        }
        if let Some(parent) = self.rigid_body_set.get_mut(binding.parent) {
            parent.add_torque(-world, true);
        }
    }

    fn set_hinge_velocity(&mut self, joint: JointRef, velocity: f32) {
        self.set_motor_velocity(joint, JointAxis::AngX, velocity);
    }

    fn set_universal_velocity(&mut self, joint: JointRef, velocity: [f32; 2]) {
        self.set_motor_velocity(joint, JointAxis::AngX, velocity[0]);
        self.set_motor_velocity(joint, JointAxis::AngY, velocity[1]);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
