//! Control panel state
//!
//! The values currently shown by the widgets. The scene itself lives in
//! `ViewerController`; this resource only mirrors what the user picked.

use bevy::prelude::*;

use crate::lib::controls::{Representation, Resolution};
use crate::lib::scene::ViewerController;

#[derive(Resource, Debug, Clone)]
pub struct ControlPanelState {
    /// Slider value
    pub resolution: Resolution,

    /// Selected representation
    pub representation: Representation,

    /// Whether the panel window is visible
    pub visible: bool,
}

impl ControlPanelState {
    pub fn new(resolution: Resolution, representation: Representation) -> Self {
        Self {
            resolution,
            representation,
            visible: true,
        }
    }
}

impl FromWorld for ControlPanelState {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<ViewerController>() {
            Some(controller) => Self::new(
                controller.scene.resolution(),
                controller.scene.representation(),
            ),
            None => Self::new(Resolution::default(), Representation::default()),
        }
    }
}

/// Plugin for UI state management
pub struct UiStatePlugin;

impl Plugin for UiStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlPanelState>();
    }
}
