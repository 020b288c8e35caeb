// homunculus-core: Shared vocabulary, configuration, errors and step ordering
// for the humanoid actuation and tactile-sensing shell.

pub mod config;
pub mod error;
pub mod types;

use bevy::prelude::*;

use crate::config::{PartsConfig, SimConfig};

// ---------------------------------------------------------------------------
// HomunculusSet
// ---------------------------------------------------------------------------

/// Ordering of the per-step work inside `Update`.
///
/// External controllers write commands in [`Command`](Self::Command), the
/// dispatcher forwards them to the joint actuators in [`Act`](Self::Act), the
/// engine advances in [`Simulate`](Self::Simulate) and touch readings are
/// refreshed in [`Sense`](Self::Sense).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomunculusSet {
    Command,
    Act,
    Simulate,
    Sense,
}

// ---------------------------------------------------------------------------
// HomunculusCorePlugin
// ---------------------------------------------------------------------------

/// Registers [`HomunculusSet`] ordering and the default configuration
/// resources when none were inserted beforehand.
pub struct HomunculusCorePlugin;

impl Plugin for HomunculusCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>()
            .init_resource::<PartsConfig>()
            .configure_sets(
                Update,
                (
                    HomunculusSet::Command,
                    HomunculusSet::Act,
                    HomunculusSet::Simulate,
                    HomunculusSet::Sense,
                )
                    .chain(),
            );
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        HomunculusCorePlugin, HomunculusSet,
        config::{PartsConfig, RobotConfig, SimConfig},
        error::{ConfigError, HomunculusError},
        types::{BodyPart, BodyRegion, HandPart, Side, SkinPart, SubSpace},
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
