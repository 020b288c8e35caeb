//! Bevy resources carrying the sensing side of the shell between systems.

use std::collections::BTreeMap;

use bevy::prelude::Resource;

use homunculus_skin::{
    ContactForceSensor, ShapeHandle, SkinClassification, SkinRegionClassifier, SpaceHandle,
    TouchSensorMap,
};

/// Touch sensor of the running skeleton.
#[derive(Resource, Debug, Clone, Default)]
pub struct TouchSensors(pub ContactForceSensor);

impl TouchSensors {
    pub const fn new(map: TouchSensorMap) -> Self {
        Self(ContactForceSensor::new(map))
    }
}

/// Skin classifier bound to the skeleton's parts configuration.
#[derive(Resource, Debug, Clone)]
pub struct SkinClassifier(pub SkinRegionClassifier);

/// Latest touch reading of every mapped sensor index, refreshed each step.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TouchReadings {
    pub values: BTreeMap<usize, f64>,
}

impl TouchReadings {
    /// Reading at `index`, `0.0` when the index is not mapped.
    pub fn get(&self, index: usize) -> f64 {
        self.values.get(&index).copied().unwrap_or(0.0)
    }
}

/// One skin shape in contact during the last step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinContact {
    pub space: SpaceHandle,
    pub shape: ShapeHandle,
    pub classification: SkinClassification,
}

/// Skin contacts classified during the last step. Rebuilt every step.
#[derive(Resource, Debug, Clone, Default)]
pub struct SkinContacts {
    pub contacts: Vec<SkinContact>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
