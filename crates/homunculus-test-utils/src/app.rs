//! Bevy test app builders with various plugin combinations.

use bevy::prelude::*;

/// Create a minimal test app with only the core plugin.
///
/// Provides `HomunculusSet` ordering and the default configuration
/// resources, nothing else.
pub fn minimal_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(homunculus_core::HomunculusCorePlugin);
    app.finish();
    app.cleanup();
    app
}

/// Core plus actuator plugin: command buffer and control-mode tables, with
/// no physics plugin consuming them.
pub fn actuator_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(homunculus_core::HomunculusCorePlugin);
    app.add_plugins(homunculus_actuator::HomunculusActuatorPlugin);
    app.finish();
    app.cleanup();
    app
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
