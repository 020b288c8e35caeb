//! Bevy plugin binding the rapier skeleton to the dispatch and sensing seams.

use bevy::prelude::*;

use homunculus_core::HomunculusSet;
use homunculus_core::config::{PartsConfig, SimConfig};
use homunculus_core::error::ConfigError;
use homunculus_skin::classifier_for_parts;

use crate::rapier::SkeletonContext;
use crate::rapier::systems::{
    dispatch_commands_system, rapier_step_system, skin_contacts_system, touch_readings_system,
};
use crate::resources::{SkinClassifier, SkinContacts, TouchReadings, TouchSensors};

/// Wires the rapier skeleton into the app.
///
/// Registers command dispatch in [`HomunculusSet::Act`], stepping in
/// [`HomunculusSet::Simulate`], and touch and skin sensing in
/// [`HomunculusSet::Sense`], all on `Update`.
///
/// Add it after `HomunculusCorePlugin` and `HomunculusActuatorPlugin`: it
/// reads their configuration and command resources. An invalid
/// [`SimConfig`] or [`PartsConfig`] is logged and leaves the app without
/// a skeleton or any physics systems.
pub struct HomunculusPhysicsPlugin;

impl Plugin for HomunculusPhysicsPlugin {
    fn build(&self, app: &mut App) {
        let sim = app.world().resource::<SimConfig>().clone();
        let parts = *app.world().resource::<PartsConfig>();
        if let Err(e) = validate(&sim, &parts) {
            error!(%e, "physics disabled");
            return;
        }

        insert_skeleton_context(app, &sim);
        insert_sensing_resources(app, parts);
        app.add_systems(Update, dispatch_commands_system.in_set(HomunculusSet::Act))
            .add_systems(Update, rapier_step_system.in_set(HomunculusSet::Simulate))
            .add_systems(
                Update,
                (touch_readings_system, skin_contacts_system).in_set(HomunculusSet::Sense),
            );
    }
}

fn validate(sim: &SimConfig, parts: &PartsConfig) -> Result<(), ConfigError> {
    sim.validate()?;
    parts.validate()
}

/// Insert an empty [`SkeletonContext`] built from `sim`, unless the app
/// already carries one.
fn insert_skeleton_context(app: &mut App, sim: &SimConfig) {
    if app.world().contains_resource::<SkeletonContext>() {
        return;
    }
    let gravity = Vec3::from_array(sim.gravity);
    #[allow(clippy::cast_possible_truncation)]
    let dt = sim.physics_dt as f32;
    app.insert_resource(SkeletonContext::new(gravity, dt, sim.substeps));
}

/// Insert the sensing resources. The classifier is bound to `parts`.
fn insert_sensing_resources(app: &mut App, parts: PartsConfig) {
    app.insert_resource(SkinClassifier(classifier_for_parts(parts)))
        .init_resource::<TouchSensors>()
        .init_resource::<TouchReadings>()
        .init_resource::<SkinContacts>();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use homunculus_actuator::HomunculusActuatorPlugin;
    use homunculus_core::HomunculusCorePlugin;

    fn build_with(sim: SimConfig) -> App {
        let mut app = App::new();
        app.insert_resource(sim)
            .add_plugins(HomunculusCorePlugin)
            .add_plugins(HomunculusActuatorPlugin)
            .add_plugins(HomunculusPhysicsPlugin);
        app.finish();
        app.cleanup();
        app
    }

    #[test]
    fn valid_config_builds_skeleton_from_sim() {
        let app = build_with(SimConfig {
            physics_dt: 0.005,
            substeps: 3,
            gravity: [0.0, -1.0, 0.0],
        });
        let context = app.world().resource::<SkeletonContext>();
        assert!((context.dt() - 0.005).abs() < f32::EPSILON);
        assert_eq!(context.substeps, 3);
        assert_eq!(context.gravity, Vec3::new(0.0, -1.0, 0.0));
        assert!(app.world().contains_resource::<SkinClassifier>());
        assert!(app.world().contains_resource::<TouchReadings>());
    }

    #[test]
    fn zero_dt_leaves_app_without_physics() {
        let mut app = build_with(SimConfig {
            physics_dt: 0.0,
            ..SimConfig::default()
        });
        assert!(!app.world().contains_resource::<SkeletonContext>());
        assert!(!app.world().contains_resource::<SkinClassifier>());
        app.update();
    }

    #[test]
    fn zero_substeps_leaves_app_without_physics() {
        let app = build_with(SimConfig {
            substeps: 0,
            ..SimConfig::default()
        });
        assert!(!app.world().contains_resource::<SkeletonContext>());
    }
}
