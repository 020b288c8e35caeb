//! Bevy resource wrapping the rapier3d state of one skeleton.

use std::collections::HashMap;

use bevy::prelude::{Resource, Vec3};
use rapier3d::prelude::{
    CCDSolver, ColliderBuilder, ColliderHandle, ColliderSet, DefaultBroadPhase, GenericJoint,
    GenericJointBuilder, ImpulseJointHandle, ImpulseJointSet, IntegrationParameters,
    IslandManager, JointAxesMask, JointAxis, MassProperties, MotorModel, MultibodyJointSet,
    NarrowPhase, PhysicsPipeline, RevoluteJointBuilder, RigidBodyBuilder, RigidBodyHandle,
    RigidBodySet,
};

use homunculus_actuator::JointRef;
use homunculus_skin::{BodyId, JointKind, ShapeHandle, SpaceHandle};

// ---------------------------------------------------------------------------
// JointBinding
// ---------------------------------------------------------------------------

/// Rapier side of one actuated joint slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointBinding {
    pub handle: ImpulseJointHandle,
    pub parent: RigidBodyHandle,
    pub child: RigidBodyHandle,
    /// First rotation axis in the parent's local frame.
    pub axis: Vec3,
    pub kind: JointKind,
}

/// Motor limits applied to every actuated axis at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorLimits {
    /// Maximum motor force (Nm) of velocity-controlled axes.
    pub max_force: f32,
    /// Damping factor of the velocity motor.
    pub velocity_factor: f32,
}

impl Default for MotorLimits {
    fn default() -> Self {
        Self {
            max_force: 1000.0,
            velocity_factor: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// SkeletonContext
// ---------------------------------------------------------------------------

/// All rapier state of the simulated skeleton in a single Bevy resource.
///
/// `PhysicsPipeline::step()` requires mutable access to every set
/// simultaneously, so they must all live together. The skeleton builder fills
/// it through the `insert_*` methods; the handle maps tie rapier handles back
/// to joint slots, touch-sensor bodies and skin shapes.
#[derive(Resource)]
pub struct SkeletonContext {
    // -- Rapier sets --
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,

    // -- Pipeline objects --
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub ccd_solver: CCDSolver,

    // -- Parameters --
    pub integration_parameters: IntegrationParameters,
    pub gravity: Vec3,
    /// Number of physics substeps per control frame.
    pub substeps: usize,
    pub motor_limits: MotorLimits,

    // -- Handle mappings --
    pub joints: HashMap<JointRef, JointBinding>,
    pub joint_kinds: HashMap<ImpulseJointHandle, JointKind>,
    pub bodies: HashMap<BodyId, RigidBodyHandle>,
    pub shapes: HashMap<ColliderHandle, (SpaceHandle, ShapeHandle)>,
}

impl SkeletonContext {
    /// Create an empty context with given gravity, timestep, and substep count.
    pub fn new(gravity: Vec3, dt: f32, substeps: usize) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            integration_parameters,
            gravity,
            substeps,
            motor_limits: MotorLimits::default(),
            joints: HashMap::new(),
            joint_kinds: HashMap::new(),
            bodies: HashMap::new(),
            shapes: HashMap::new(),
        }
    }

    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    // -- Skeleton construction --

    /// Mass (kg) every dynamic body carries on top of its colliders.
    pub const LINK_MASS: f32 = 0.1;
    /// Principal inertia (kg m^2) matching [`Self::LINK_MASS`].
    pub const LINK_INERTIA: f32 = 1e-4;

    /// Insert an unrotated body at `position`, registered as `id`.
    pub fn insert_body(&mut self, id: BodyId, position: Vec3, fixed: bool) -> RigidBodyHandle {
        let builder = if fixed {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic().additional_mass_properties(MassProperties::new(
                Vec3::ZERO,
                Self::LINK_MASS,
                Vec3::splat(Self::LINK_INERTIA),
            ))
        };
        let handle = self
            .rigid_body_set
            .insert(builder.translation(position).can_sleep(false).build());
        self.bodies.insert(id, handle);
        handle
    }

    /// Attach a ball collider to `body` and record the skin shape it stands for.
    pub fn insert_ball_shape(
        &mut self,
        body: RigidBodyHandle,
        radius: f32,
        space: SpaceHandle,
        shape: ShapeHandle,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius).build();
        let handle =
            self.collider_set
                .insert_with_parent(collider, body, &mut self.rigid_body_set);
        self.shapes.insert(handle, (space, shape));
        handle
    }

    /// Attach an unregistered cuboid collider, e.g. the ground.
    pub fn insert_cuboid(&mut self, body: RigidBodyHandle, half_extents: Vec3) -> ColliderHandle {
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set)
    }

    /// Hinge between two unrotated bodies, anchored and oriented in world
    /// coordinates.
    pub fn insert_hinge(
        &mut self,
        joint: JointRef,
        parent: RigidBodyHandle,
        child: RigidBodyHandle,
        anchor: Vec3,
        axis: Vec3,
    ) -> Option<ImpulseJointHandle> {
        let (anchor1, anchor2) = self.local_anchors(parent, child, anchor)?;
        let axis = axis.normalize_or_zero();
        let mut data: GenericJoint = RevoluteJointBuilder::new(axis)
            .local_anchor1(anchor1)
            .local_anchor2(anchor2)
            .build()
            .into();
        self.configure_motor(&mut data, JointAxis::AngX);
        let handle = self.impulse_joint_set.insert(parent, child, data, true);
        self.bind(joint, handle, parent, child, axis, JointKind::Hinge);
        Some(handle)
    }

    /// Two-axis joint: rotation about `axis` and the perpendicular axis the
    /// engine derives from it. Translations and twist are locked.
    pub fn insert_universal(
        &mut self,
        joint: JointRef,
        parent: RigidBodyHandle,
        child: RigidBodyHandle,
        anchor: Vec3,
        axis: Vec3,
    ) -> Option<ImpulseJointHandle> {
        let (anchor1, anchor2) = self.local_anchors(parent, child, anchor)?;
        let axis = axis.normalize_or_zero();
        let mut data: GenericJoint =
            GenericJointBuilder::new(JointAxesMask::LIN_AXES | JointAxesMask::ANG_Z)
                .local_axis1(axis)
                .local_axis2(axis)
                .local_anchor1(anchor1)
                .local_anchor2(anchor2)
                .build();
        self.configure_motor(&mut data, JointAxis::AngX);
        self.configure_motor(&mut data, JointAxis::AngY);
        let handle = self.impulse_joint_set.insert(parent, child, data, true);
        self.bind(joint, handle, parent, child, axis, JointKind::Universal);
        Some(handle)
    }

    fn local_anchors(
        &self,
        parent: RigidBodyHandle,
        child: RigidBodyHandle,
        anchor: Vec3,
    ) -> Option<(Vec3, Vec3)> {
        let p = self.rigid_body_set.get(parent)?.position().translation;
        let c = self.rigid_body_set.get(child)?.position().translation;
        Some((anchor - p, anchor - c))
    }

    fn configure_motor(&self, data: &mut GenericJoint, axis: JointAxis) {
        data.set_motor_model(axis, MotorModel::ForceBased);
        data.set_motor_velocity(axis, 0.0, self.motor_limits.velocity_factor);
        data.set_motor_max_force(axis, self.motor_limits.max_force);
    }

    fn bind(
        &mut self,
        joint: JointRef,
        handle: ImpulseJointHandle,
        parent: RigidBodyHandle,
        child: RigidBodyHandle,
        axis: Vec3,
        kind: JointKind,
    ) {
        self.joints.insert(
            joint,
            JointBinding {
                handle,
                parent,
                child,
                axis,
                kind,
            },
        );
        self.joint_kinds.insert(handle, kind);
    }

    // -- Stepping --

    /// Run one physics substep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Run all substeps of one control frame, then drop the torque
    /// increments added for it.
    pub fn step_frame(&mut self) {
        for _ in 0..self.substeps {
            self.step();
        }
        self.clear_torques();
    }

    /// Zero the user torques accumulated on every body.
    pub fn clear_torques(&mut self) {
        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_torques(false);
        }
    }

    /// Rotation rate of `joint`'s child relative to its parent about the
    /// first joint axis, in world coordinates.
    pub fn joint_velocity(&self, joint: JointRef) -> Option<f32> {
        let binding = self.joints.get(&joint)?;
        let parent = self.rigid_body_set.get(binding.parent)?;
        let child = self.rigid_body_set.get(binding.child)?;
        let axis = parent.position().rotation * binding.axis;
        Some((child.angvel() - parent.angvel()).dot(axis))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use homunculus_core::types::BodyRegion;

    fn two_bodies(context: &mut SkeletonContext) -> (RigidBodyHandle, RigidBodyHandle) {
        let parent = context.insert_body(BodyId(0), Vec3::ZERO, true);
        let child = context.insert_body(BodyId(1), Vec3::new(0.0, 0.5, 0.0), false);
        (parent, child)
    }

    #[test]
    fn new_context_is_empty() {
        let context = SkeletonContext::new(Vec3::new(0.0, -9.8, 0.0), 0.01, 2);
        assert_eq!(context.rigid_body_set.len(), 0);
        assert!(context.joints.is_empty());
        assert!((context.dt() - 0.01).abs() < f32::EPSILON);
        assert_eq!(context.substeps, 2);
    }

    #[test]
    fn hinge_is_bound_with_local_anchors() {
        let mut context = SkeletonContext::new(Vec3::ZERO, 0.01, 1);
        let (parent, child) = two_bodies(&mut context);
        let joint = JointRef::new(BodyRegion::Torso, 0);
        let handle = context
            .insert_hinge(joint, parent, child, Vec3::new(0.0, 0.25, 0.0), Vec3::X)
            .unwrap();

        let binding = context.joints[&joint];
        assert_eq!(binding.handle, handle);
        assert_eq!(binding.kind, JointKind::Hinge);
        assert_eq!(context.joint_kinds[&handle], JointKind::Hinge);
        assert_eq!(context.impulse_joint_set.len(), 1);
    }

    #[test]
    fn universal_is_bound() {
        let mut context = SkeletonContext::new(Vec3::ZERO, 0.01, 1);
        let (parent, child) = two_bodies(&mut context);
        let joint = JointRef::new(BodyRegion::LeftArm, 5);
        context
            .insert_universal(joint, parent, child, Vec3::new(0.0, 0.25, 0.0), Vec3::Z)
            .unwrap();
        assert_eq!(context.joints[&joint].kind, JointKind::Universal);
    }

    #[test]
    fn stepping_moves_free_body_under_gravity() {
        let mut context = SkeletonContext::new(Vec3::new(0.0, -9.8, 0.0), 0.01, 5);
        let body = context.insert_body(BodyId(3), Vec3::new(0.0, 1.0, 0.0), false);
        context.insert_ball_shape(body, 0.05, SpaceHandle(0), ShapeHandle(0));
        context.step_frame();
        let y = context.rigid_body_set[body].position().translation.y;
        assert!(y < 1.0, "body should fall: y={y}");
    }
}
