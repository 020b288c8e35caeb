//! Stand-ins for the engine-side seams.
//!
//! [`RecordingActuators`] records every actuator call the dispatcher makes;
//! [`ScriptedContacts`] answers contact queries from a fixed table.

use std::collections::HashMap;

use homunculus_actuator::{JointActuators, JointRef};
use homunculus_core::types::BodyRegion;
use homunculus_skin::{AttachedJoint, BodyId, ContactProbe, JointKind};
use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// RecordingActuators
// ---------------------------------------------------------------------------

/// One recorded actuator write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    Torque(JointRef, f32),
    Velocity(JointRef, f32),
    Universal(JointRef, [f32; 2]),
}

impl ActuatorCall {
    pub const fn joint(&self) -> JointRef {
        match self {
            Self::Torque(j, _) | Self::Velocity(j, _) | Self::Universal(j, _) => *j,
        }
    }
}

/// Records actuator writes in call order.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuators {
    pub calls: Vec<ActuatorCall>,
}

impl RecordingActuators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls addressed to `region`, in order.
    pub fn region(&self, region: BodyRegion) -> Vec<ActuatorCall> {
        self.calls
            .iter()
            .filter(|c| c.joint().region == region)
            .copied()
            .collect()
    }

    /// Regions in the order they were first addressed.
    pub fn region_order(&self) -> Vec<BodyRegion> {
        let mut order: Vec<BodyRegion> = Vec::new();
        for call in &self.calls {
            let region = call.joint().region;
            if !order.contains(&region) {
                order.push(region);
            }
        }
        order
    }

    pub fn torque_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Torque(..)))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl JointActuators for RecordingActuators {
    fn add_hinge_torque(&mut self, joint: JointRef, torque: f32) {
        self.calls.push(ActuatorCall::Torque(joint, torque));
    }

    fn set_hinge_velocity(&mut self, joint: JointRef, velocity: f32) {
        self.calls.push(ActuatorCall::Velocity(joint, velocity));
    }

    fn set_universal_velocity(&mut self, joint: JointRef, velocity: [f32; 2]) {
        self.calls.push(ActuatorCall::Universal(joint, velocity));
    }
}

// ---------------------------------------------------------------------------
// ScriptedContacts
// ---------------------------------------------------------------------------

/// Contact probe answering from a fixed table of first joints.
#[derive(Debug, Clone, Default)]
pub struct ScriptedContacts {
    joints: HashMap<BodyId, AttachedJoint>,
}

impl ScriptedContacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// `body`'s first joint becomes a contact joint reporting `force`.
    #[must_use]
    pub fn with_contact(mut self, body: BodyId, force: [f64; 3]) -> Self {
        self.joints
            .insert(body, AttachedJoint::contact(Vector3::from(force)));
        self
    }

    /// `body`'s first joint is an articulation joint of `kind`.
    #[must_use]
    pub fn with_joint(mut self, body: BodyId, kind: JointKind) -> Self {
        self.joints.insert(body, AttachedJoint::articulation(kind));
        self
    }
}

impl ContactProbe for ScriptedContacts {
    fn first_joint(&self, body: BodyId) -> Option<AttachedJoint> {
        self.joints.get(&body).copied()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
