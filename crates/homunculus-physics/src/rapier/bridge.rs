//! Anchor-to-rapier bridge: places bodies and hinges of one calibrated chain.

use bevy::prelude::Vec3;
use rapier3d::prelude::RigidBodyHandle;

use homunculus_actuator::JointRef;
use homunculus_calib::JointAnchor;
use homunculus_core::types::BodyRegion;
use homunculus_skin::BodyId;

use super::context::SkeletonContext;

/// Hinge axis used when an anchor carries none.
pub const DEFAULT_HINGE_AXIS: Vec3 = Vec3::X;

#[allow(clippy::cast_possible_truncation)]
fn to_vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

/// Engine-frame position of `anchor`, raised by `elevation`.
pub fn anchor_position(anchor: &JointAnchor, elevation: f64) -> Vec3 {
    let p = anchor.world_position(elevation);
    to_vec3([p.x, p.y, p.z])
}

/// Engine-frame rotation axis of `anchor`, if it has one.
///
/// Unlike positions, axes are stored in the engine frame already.
pub fn anchor_axis(anchor: &JointAnchor) -> Option<Vec3> {
    anchor.axis.map(|a| to_vec3([a.x, a.y, a.z]))
}

/// Bodies created by [`register_chain`], one per anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisteredChain {
    pub bodies: Vec<RigidBodyHandle>,
}

/// Build a serial chain of dynamic bodies hanging off `root`.
///
/// Body `i` sits at anchor `i` and is hinged to body `i - 1` (or `root`) at
/// that anchor; the hinge becomes joint `i` of `region`. Bodies are
/// registered as `first_body`, `first_body + 1`, and so on.
pub fn register_chain(
    context: &mut SkeletonContext,
    root: RigidBodyHandle,
    region: BodyRegion,
    anchors: &[JointAnchor],
    elevation: f64,
    first_body: BodyId,
) -> RegisteredChain {
    let mut chain = RegisteredChain::default();
    let mut parent = root;
    for (index, anchor) in anchors.iter().enumerate() {
        let position = anchor_position(anchor, elevation);
        let id = u32::try_from(index).map_or(first_body, |i| BodyId(first_body.0 + i));
        let body = context.insert_body(id, position, false);
        let axis = anchor_axis(anchor).unwrap_or(DEFAULT_HINGE_AXIS);
        if context
            .insert_hinge(JointRef::new(region, index), parent, body, position, axis)
            .is_none()
        {
            bevy::log::warn!(region = region.name(), index, "hinge endpoints missing");
        }
        chain.bodies.push(body);
        parent = body;
    }
    chain
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use homunculus_calib::Chain;
    use homunculus_core::types::Side;
    use homunculus_kin::{ArmKinematics, RootToWorld, arm_chain};
    use homunculus_skin::JointKind;
    use nalgebra::Vector3;

    #[test]
    fn anchor_position_swizzles_and_elevates() {
        let anchor = JointAnchor::point(Vector3::new(0.3, 0.1, 0.5));
        let p = anchor_position(&anchor, 0.2);
        assert_relative_eq!(p.x, 0.1);
        assert_relative_eq!(p.y, 0.7);
        assert_relative_eq!(p.z, 0.3);
    }

    #[test]
    fn anchor_axis_is_not_swizzled() {
        let anchor = JointAnchor::with_axis(Vector3::new(0.3, 0.1, 0.5), Vector3::z());
        assert_eq!(anchor_axis(&anchor), Some(Vec3::Z));
        assert_eq!(anchor_axis(&JointAnchor::point(Vector3::zeros())), None);
    }

    #[test]
    fn torso_hinges_turn_about_kinematic_axes() {
        let anchors = ArmKinematics::default().torso_anchors().unwrap();
        let mut context = SkeletonContext::new(Vec3::ZERO, 0.01, 1);
        let root = context.insert_body(BodyId(0), Vec3::ZERO, true);
        register_chain(&mut context, root, BodyRegion::Torso, &anchors, 0.0, BodyId(1));

        let world_to_root = RootToWorld::standard().world_to_root();
        let chain = arm_chain(Side::Left);
        let frames = [
            (world_to_root * chain.h0(), 1.0),
            (world_to_root * chain.h(0).unwrap(), -1.0),
            (world_to_root * chain.h(1).unwrap(), -1.0),
        ];
        for (index, (frame, sign)) in frames.iter().enumerate() {
            let z = frame.rotation * Vector3::z() * *sign;
            let binding = context.joints[&JointRef::new(BodyRegion::Torso, index)];
            assert_relative_eq!(binding.axis.x, z.x as f32, epsilon = 1e-5);
            assert_relative_eq!(binding.axis.y, z.y as f32, epsilon = 1e-5);
            assert_relative_eq!(binding.axis.z, z.z as f32, epsilon = 1e-5);
        }
    }

    #[test]
    fn leg_chain_registers_one_hinge_per_anchor() {
        let calibration = homunculus_test_utils::calibration();
        let anchors = calibration.chain(Chain::LeftLeg);
        let mut context = SkeletonContext::new(Vec3::ZERO, 0.01, 1);
        let root = context.insert_body(BodyId(0), Vec3::ZERO, true);

        let chain = register_chain(
            &mut context,
            root,
            BodyRegion::LeftLeg,
            anchors,
            0.0,
            BodyId(10),
        );

        assert_eq!(chain.bodies.len(), anchors.len());
        assert_eq!(context.impulse_joint_set.len(), anchors.len());
        for index in 0..anchors.len() {
            let binding = context.joints[&JointRef::new(BodyRegion::LeftLeg, index)];
            assert_eq!(binding.kind, JointKind::Hinge);
            assert_eq!(binding.child, chain.bodies[index]);
        }
        assert_eq!(context.bodies[&BodyId(10)], chain.bodies[0]);
    }
}
