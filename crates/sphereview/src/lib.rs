//! Sphereview sphere viewer library
//!
//! This library generates a tessellated sphere with a procedural vertex
//! color pattern, draws it next to a few line segments, and lets the user
//! switch representation and resolution from an egui control panel.

pub mod lib {
    pub mod coloring;
    pub mod controls;
    pub mod line;
    pub mod scene;
    pub mod settings;
    pub mod sphere;
}

pub mod app {
    pub mod cli;
    pub mod systems;
    pub mod ui;
}

// Re-export commonly used types from lib modules
pub use app::systems::camera::CameraPlugin;
pub use app::systems::scene::ScenePlugin;
pub use app::ui::SphereviewUiPlugin;
pub use lib::coloring::{assign_vertex_colors, ColorBuffer};
pub use lib::controls::{Representation, Resolution};
pub use lib::line::{make_line, LineSegment};
pub use lib::scene::{SceneConfig, SceneState, ViewerController};
pub use lib::settings::{Settings, SettingsError, ViewerConfig};
pub use lib::sphere::{SphereGeometry, SphereSource};
