//! Contact queries over the rapier narrow phase.

use nalgebra::Vector3;

use homunculus_skin::{AttachedJoint, BodyId, ContactProbe, ShapeHandle, SpaceHandle};

use super::context::SkeletonContext;

impl SkeletonContext {
    /// Skin shapes currently touching something, one entry per shape and
    /// active contact pair.
    pub fn active_skin_contacts(&self) -> Vec<(SpaceHandle, ShapeHandle)> {
        let mut touched = Vec::new();
        for pair in self.narrow_phase.contact_pairs() {
            if !pair.has_any_active_contact() {
                continue;
            }
            for collider in [pair.collider1, pair.collider2] {
                if let Some(&(space, shape)) = self.shapes.get(&collider) {
                    touched.push((space, shape));
                }
            }
        }
        touched
    }
}

impl ContactProbe for SkeletonContext {
    /// An active contact on any of the body's colliders wins; its force is
    /// the pair's total impulse over the step. Otherwise the first
    /// articulation joint attached to the body is reported.
    fn first_joint(&self, body: BodyId) -> Option<AttachedJoint> {
        let handle = *self.bodies.get(&body)?;
        let rigid_body = self.rigid_body_set.get(handle)?;
        let dt = self.dt();

        for &collider in rigid_body.colliders() {
            let contact = self
                .narrow_phase
                .contact_pairs_with(collider)
                .find(|pair| pair.has_any_active_contact());
            if let Some(pair) = contact {
                let impulse = pair.total_impulse();
                let force = Vector3::new(
                    f64::from(impulse.x / dt),
                    f64::from(impulse.y / dt),
                    f64::from(impulse.z / dt),
                );
                return Some(AttachedJoint::contact(force));
            }
        }

        self.impulse_joint_set
            .attached_joints(handle)
            .find_map(|(_, _, joint_handle, _)| self.joint_kinds.get(&joint_handle).copied())
            .map(AttachedJoint::articulation)
    }
}
