// homunculus-physics: Engine binding of the humanoid shell.
//
// The rapier skeleton context owns the engine state and implements the
// actuator and contact seams over it. `HomunculusPhysicsPlugin` registers
// it with dispatch, stepping and sensing systems.

pub mod plugin;
pub mod rapier;
pub mod resources;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        plugin::HomunculusPhysicsPlugin,
        rapier::SkeletonContext,
        resources::{SkinClassifier, SkinContact, SkinContacts, TouchReadings, TouchSensors},
    };
}

pub use plugin::HomunculusPhysicsPlugin;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
