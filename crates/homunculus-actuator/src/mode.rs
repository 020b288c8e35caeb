//! Per-joint control modes and the external tables that hold them.

use std::collections::HashMap;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use homunculus_core::types::BodyRegion;

// ---------------------------------------------------------------------------
// ControlMode
// ---------------------------------------------------------------------------

/// How the pending command of one joint is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// Set the actuator's target velocity.
    #[default]
    Velocity,
    /// Add the pending torque increment.
    Torque,
}

// ---------------------------------------------------------------------------
// ControlModeSource
// ---------------------------------------------------------------------------

/// Read-only access to externally supplied control-mode tables.
///
/// Returning `None` for a region is a normal state: every joint of that
/// region is then velocity controlled.
pub trait ControlModeSource {
    fn modes(&self, region: BodyRegion) -> Option<&[ControlMode]>;

    /// Mode of one joint. Joints past the end of a short table fall back to
    /// [`ControlMode::Velocity`].
    fn mode(&self, region: BodyRegion, joint: usize) -> ControlMode {
        self.modes(region)
            .and_then(|m| m.get(joint).copied())
            .unwrap_or_default()
    }
}

/// No tables at all.
impl ControlModeSource for () {
    fn modes(&self, _region: BodyRegion) -> Option<&[ControlMode]> {
        None
    }
}

// ---------------------------------------------------------------------------
// ControlModeTables
// ---------------------------------------------------------------------------

/// Control-mode tables keyed by region, as published by an external
/// controller.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlModeTables {
    tables: HashMap<BodyRegion, Vec<ControlMode>>,
}

impl ControlModeTables {
    /// Install or replace the table of `region`.
    pub fn set(&mut self, region: BodyRegion, modes: Vec<ControlMode>) {
        self.tables.insert(region, modes);
    }

    /// Remove the table of `region`, returning it to velocity control.
    pub fn clear(&mut self, region: BodyRegion) -> Option<Vec<ControlMode>> {
        self.tables.remove(&region)
    }

    pub fn has_table(&self, region: BodyRegion) -> bool {
        self.tables.contains_key(&region)
    }
}

impl ControlModeSource for ControlModeTables {
    fn modes(&self, region: BodyRegion) -> Option<&[ControlMode]> {
        self.tables.get(&region).map(Vec::as_slice)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
