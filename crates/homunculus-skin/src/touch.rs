//! Contact-force touch sensing.
//!
//! A touch-sensitive body reports contact through the first joint attached to
//! it. When the engine has turned that joint into a contact joint, its force
//! feedback is mapped to a reading in `[0, 1]` that saturates at
//! [`TOUCH_SENSOR_MAX_FORCE`].

use std::collections::BTreeMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use homunculus_core::types::Side;

/// Force (N) at which a touch reading saturates.
pub const TOUCH_SENSOR_MAX_FORCE: f64 = 100.0;

// ---------------------------------------------------------------------------
// ContactFeedback
// ---------------------------------------------------------------------------

/// Force the engine reports for one contact joint after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactFeedback {
    pub force: Vector3<f64>,
}

impl ContactFeedback {
    pub const fn new(force: Vector3<f64>) -> Self {
        Self { force }
    }
}

/// Normalized touch reading of one contact.
///
/// The force norm is clamped to [`TOUCH_SENSOR_MAX_FORCE`] and divided by it.
pub fn touch_value(feedback: &ContactFeedback) -> f64 {
    feedback.force.norm().min(TOUCH_SENSOR_MAX_FORCE) / TOUCH_SENSOR_MAX_FORCE
}

// ---------------------------------------------------------------------------
// ContactProbe
// ---------------------------------------------------------------------------

/// Engine-side identifier of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Classification of a joint as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    Contact,
    Hinge,
    Universal,
    Other,
}

/// The first joint attached to a body, with its feedback if it has any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachedJoint {
    pub kind: JointKind,
    pub feedback: Option<ContactFeedback>,
}

impl AttachedJoint {
    pub const fn contact(force: Vector3<f64>) -> Self {
        Self {
            kind: JointKind::Contact,
            feedback: Some(ContactFeedback::new(force)),
        }
    }

    pub const fn articulation(kind: JointKind) -> Self {
        Self {
            kind,
            feedback: None,
        }
    }
}

/// Read-only view of the engine's joint state after a step.
pub trait ContactProbe {
    /// First joint slot of `body`, or `None` when the body has no joint or
    /// does not exist.
    fn first_joint(&self, body: BodyId) -> Option<AttachedJoint>;
}

// ---------------------------------------------------------------------------
// TouchSensorMap
// ---------------------------------------------------------------------------

/// Touch-sensor indices whose bodies are fused into one fingertip body when
/// the hand is articulated.
pub const fn fused_fingertip_indices(side: Side) -> [usize; 2] {
    match side {
        Side::Left => [26, 27],
        Side::Right => [45, 46],
    }
}

/// Touch-sensor index to body lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchSensorMap {
    bodies: BTreeMap<usize, BodyId>,
}

impl TouchSensorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, body: BodyId) {
        self.bodies.insert(index, body);
    }

    /// Route both fused fingertip indices of `side` to `body`.
    pub fn fuse_fingertips(&mut self, side: Side, body: BodyId) {
        for index in fused_fingertip_indices(side) {
            self.bodies.insert(index, body);
        }
    }

    pub fn body(&self, index: usize) -> Option<BodyId> {
        self.bodies.get(&index).copied()
    }

    /// Registered indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bodies.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ContactForceSensor
// ---------------------------------------------------------------------------

/// Touch queries over a [`ContactProbe`].
///
/// Only the first joint slot of a body is inspected: contact joints are
/// registered there. A body that gains a second simultaneous contact joint is
/// read through its first slot only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForceSensor {
    map: TouchSensorMap,
}

impl ContactForceSensor {
    pub const fn new(map: TouchSensorMap) -> Self {
        Self { map }
    }

    pub const fn map(&self) -> &TouchSensorMap {
        &self.map
    }

    /// `true` iff the first joint of `body` is a contact joint.
    pub fn has_contact(&self, probe: &impl ContactProbe, body: BodyId) -> bool {
        probe
            .first_joint(body)
            .is_some_and(|j| j.kind == JointKind::Contact)
    }

    /// Touch reading of `body`, `0.0` without contact.
    pub fn body_touch_value(&self, probe: &impl ContactProbe, body: BodyId) -> f64 {
        match probe.first_joint(body) {
            Some(AttachedJoint {
                kind: JointKind::Contact,
                feedback: Some(feedback),
            }) => touch_value(&feedback),
            _ => 0.0,
        }
    }

    /// Touch reading of the sensor at `index`. Unknown indices read `0.0`.
    pub fn touch_value_at(&self, probe: &impl ContactProbe, index: usize) -> f64 {
        self.map
            .body(index)
            .map_or(0.0, |body| self.body_touch_value(probe, body))
    }

    /// Contact state of the sensor at `index`. Unknown indices read `false`.
    pub fn has_contact_at(&self, probe: &impl ContactProbe, index: usize) -> bool {
        self.map
            .body(index)
            .is_some_and(|body| self.has_contact(probe, body))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
