//! Orbit camera around the scene origin
//!
//! Controls:
//! - Left drag: Orbit around the focus point
//! - Mouse wheel: Zoom in/out
//! - R: Reset the camera so the whole scene is in view

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::lib::scene::ViewerController;

/// Closest the camera may get to its focus point
const MIN_DISTANCE: f32 = 0.05;
/// Pitch stops just short of straight up/down so `looking_at` stays defined
const MAX_PITCH: f32 = 1.54;
/// Pixels per scroll "line" on touchpads and high resolution wheels
const PIXELS_PER_LINE: f32 = 100.0;

/// Request to frame the whole scene
#[derive(Message)]
pub struct ResetCamera;

#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    /// Rotation around the Y axis, radians
    pub yaw: f32,
    /// Elevation above the XZ plane, radians
    pub pitch: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.3,
            zoom_speed: 0.1,
        }
    }
}

impl OrbitCamera {
    /// Camera transform for the current orbit parameters
    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;
        Transform::from_translation(self.focus + offset).looking_at(self.focus, Vec3::Y)
    }

    /// Rotate by a mouse delta in pixels
    pub fn orbit(&mut self, delta: Vec2) {
        let delta = delta * self.sensitivity * 0.01;
        self.yaw -= delta.x;
        self.pitch = (self.pitch + delta.y).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Zoom by a number of wheel lines; positive moves closer
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - lines * self.zoom_speed).max(0.1);
        self.distance = (self.distance * factor).max(MIN_DISTANCE);
    }

    /// Look at the origin from the default direction with the whole bounding
    /// sphere inside the vertical field of view
    pub fn frame(&mut self, bounds_radius: f32, fov: f32) {
        self.focus = Vec3::ZERO;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.distance = fit_distance(bounds_radius, fov);
    }
}

/// Distance at which a sphere of `bounds_radius` exactly fills a vertical
/// field of view of `fov` radians
pub fn fit_distance(bounds_radius: f32, fov: f32) -> f32 {
    let half = (fov * 0.5).clamp(0.01, std::f32::consts::FRAC_PI_2);
    (bounds_radius / half.sin()).max(MIN_DISTANCE)
}

/// A reset message always frames the scene; the R key only does when egui
/// is not taking keyboard input
fn reset_requested(message: bool, key_pressed: bool, keyboard_free: bool) -> bool {
    message || (key_pressed && keyboard_free)
}

/// Plugin that spawns and drives the orbit camera
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ResetCamera>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (orbit_camera_controller, reset_camera).chain());
    }
}

fn spawn_camera(mut commands: Commands, controller: Res<ViewerController>) {
    let projection = PerspectiveProjection::default();
    let mut orbit = OrbitCamera::default();
    orbit.frame(controller.scene.bounding_radius(), projection.fov);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(projection),
        orbit.transform(),
        orbit,
        Name::new("Orbit Camera"),
    ));
}

/// System that orbits and zooms the camera from mouse input
pub fn orbit_camera_controller(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
    mut egui_contexts: EguiContexts,
) {
    // Leave the pointer to egui while it is over the control panel
    if let Ok(ctx) = egui_contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    let Ok((mut transform, mut camera)) = query.single_mut() else {
        return;
    };

    let mut changed = false;

    if mouse_buttons.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO {
        camera.orbit(motion.delta);
        changed = true;
    }

    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    };
    if lines != 0.0 {
        camera.zoom(lines);
        changed = true;
    }

    if changed {
        *transform = camera.transform();
    }
}

/// System that frames the scene on a `ResetCamera` request or the R key
pub fn reset_camera(
    mut requests: MessageReader<ResetCamera>,
    keys: Res<ButtonInput<KeyCode>>,
    controller: Res<ViewerController>,
    mut query: Query<(&mut Transform, &mut OrbitCamera, &Projection)>,
    mut egui_contexts: EguiContexts,
) {
    let requested = requests.read().count() > 0;
    // The R key belongs to egui while a text field has focus
    let keyboard_free = !egui_contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_keyboard_input());
    if !reset_requested(requested, keys.just_pressed(KeyCode::KeyR), keyboard_free) {
        return;
    }

    let Ok((mut transform, mut camera, projection)) = query.single_mut() else {
        warn!("Camera reset requested but no orbit camera found");
        return;
    };

    let fov = match projection {
        Projection::Perspective(perspective) => perspective.fov,
        _ => PerspectiveProjection::default().fov,
    };
    let radius = controller.scene.bounding_radius();
    camera.frame(radius, fov);
    *transform = camera.transform();
    info!(
        "Camera reset to distance {:.2} (scene radius {:.2})",
        camera.distance, radius
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_distance() {
        let fov = std::f32::consts::FRAC_PI_2;
        let distance = fit_distance(1.0, fov);
        assert!((distance - std::f32::consts::SQRT_2).abs() < 1e-5);
        assert!(fit_distance(0.0, fov) >= MIN_DISTANCE);
    }

    #[test]
    fn test_default_view_looks_down_negative_z() {
        let camera = OrbitCamera {
            distance: 3.0,
            ..Default::default()
        };
        let transform = camera.transform();
        assert!((transform.translation - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
        assert!((*transform.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_orbit_keeps_distance_and_clamps_pitch() {
        let mut camera = OrbitCamera::default();
        camera.orbit(Vec2::new(250.0, 100_000.0));
        assert!(camera.pitch <= MAX_PITCH);
        let transform = camera.transform();
        assert!((transform.translation.length() - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_never_reaches_focus() {
        let mut camera = OrbitCamera::default();
        for _ in 0..1000 {
            camera.zoom(50.0);
        }
        assert!(camera.distance >= MIN_DISTANCE);
        camera.zoom(-5.0);
        assert!(camera.distance > MIN_DISTANCE);
    }

    #[test]
    fn test_frame_resets_orientation() {
        let mut camera = OrbitCamera::default();
        camera.orbit(Vec2::new(40.0, 30.0));
        camera.frame(2.0, std::f32::consts::FRAC_PI_2);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
        assert!((camera.distance - 2.0 * std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_reset_key_ignored_while_egui_has_keyboard() {
        assert!(reset_requested(false, true, true));
        assert!(!reset_requested(false, true, false));
        assert!(reset_requested(true, false, false));
        assert!(!reset_requested(false, false, true));
    }

    fn camera_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<bevy_egui::EguiUserTextures>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(ViewerController::new(
                &crate::lib::settings::ViewerConfig::default(),
            ))
            .add_message::<ResetCamera>()
            .add_systems(Update, reset_camera);
        app
    }

    #[test]
    fn test_reset_key_frames_scene_without_egui() {
        let mut app = camera_app();
        let orbit = OrbitCamera {
            distance: 40.0,
            yaw: 1.0,
            pitch: 0.5,
            ..Default::default()
        };
        let camera = app
            .world_mut()
            .spawn((
                orbit.transform(),
                orbit,
                Projection::Perspective(PerspectiveProjection::default()),
            ))
            .id();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyR);
        app.update();

        let orbit = app.world().get::<OrbitCamera>(camera).unwrap();
        assert_eq!(orbit.yaw, 0.0);
        assert_eq!(orbit.pitch, 0.0);
        assert!(orbit.distance < 40.0);
    }
}
