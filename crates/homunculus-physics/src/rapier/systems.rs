//! Per-step systems of the rapier skeleton.

use bevy::prelude::*;

use homunculus_actuator::{CommandBuffer, ControlModeDispatcher, ControlModeTables};

use crate::resources::{SkinClassifier, SkinContact, SkinContacts, TouchReadings, TouchSensors};

use super::context::SkeletonContext;

/// Forward pending commands to the rapier joint motors.
#[allow(clippy::needless_pass_by_value)]
pub fn dispatch_commands_system(
    mut context: ResMut<SkeletonContext>,
    commands: Res<CommandBuffer>,
    tables: Res<ControlModeTables>,
) {
    ControlModeDispatcher.apply_step(&*tables, &commands, &mut *context);
}

/// Advance all substeps of one frame, then drop this frame's torque
/// increments.
pub fn rapier_step_system(mut context: ResMut<SkeletonContext>) {
    context.step_frame();
}

/// Refresh the reading of every mapped touch sensor.
#[allow(clippy::needless_pass_by_value)]
pub fn touch_readings_system(
    context: Res<SkeletonContext>,
    sensors: Res<TouchSensors>,
    mut readings: ResMut<TouchReadings>,
) {
    let sensor = &sensors.0;
    readings.values = sensor
        .map()
        .indices()
        .map(|index| (index, sensor.touch_value_at(&*context, index)))
        .collect();
}

/// Classify every skin shape in contact during the last step.
#[allow(clippy::needless_pass_by_value)]
pub fn skin_contacts_system(
    context: Res<SkeletonContext>,
    classifier: Res<SkinClassifier>,
    mut contacts: ResMut<SkinContacts>,
) {
    contacts.contacts = context
        .active_skin_contacts()
        .into_iter()
        .map(|(space, shape)| SkinContact {
            space,
            shape,
            classification: classifier.0.classify(space, shape),
        })
        .collect();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
