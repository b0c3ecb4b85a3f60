//! User interface module for Sphereview
//!
//! This module contains all UI-related functionality using bevy_egui.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod state;
pub mod systems;

pub use state::ControlPanelState;
pub use systems::*;

/// Main UI plugin that sets up the control panel
pub struct SphereviewUiPlugin;

impl Plugin for SphereviewUiPlugin {
    fn build(&self, app: &mut App) {
        // Add bevy_egui plugin if not already added
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }

        app.add_plugins(state::UiStatePlugin);
        app.add_plugins(systems::UiSystemsPlugin);

        let panel = app.world().resource::<ControlPanelState>();
        info!(
            "Control panel ready - resolution: {}, representation: {}",
            panel.resolution, panel.representation
        );
    }
}
