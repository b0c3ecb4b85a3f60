//! Control panel window
//!
//! A representation selector, a resolution slider and a camera reset button.
//! Widget changes are turned into messages; the scene systems do the rest.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::app::systems::camera::ResetCamera;
use crate::app::systems::scene::{RepresentationChanged, ResolutionChanged};
use crate::app::ui::state::ControlPanelState;
use crate::lib::controls::{Representation, Resolution};
use crate::lib::scene::ViewerController;

/// Compare widget values with the panel state and return the messages to send
pub fn panel_changes(
    panel: &ControlPanelState,
    slider: u32,
    selected: Representation,
) -> (Option<ResolutionChanged>, Option<RepresentationChanged>) {
    let resolution = Resolution::new(slider);
    let resolution_change = (resolution != panel.resolution).then_some(ResolutionChanged(resolution));
    let representation_change =
        (selected != panel.representation).then_some(RepresentationChanged(selected));
    (resolution_change, representation_change)
}

/// System that renders the control panel
pub fn control_panel_system(
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlPanelState>,
    controller: Res<ViewerController>,
    mut resolution_events: MessageWriter<ResolutionChanged>,
    mut representation_events: MessageWriter<RepresentationChanged>,
    mut reset_events: MessageWriter<ResetCamera>,
) -> Result {
    if !panel.visible {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    let mut selected = panel.representation;
    let mut slider = panel.resolution.get();
    let mut reset_clicked = false;

    egui::Window::new("Controls")
        .default_pos([25.0, 25.0])
        .resizable(false)
        .show(ctx, |ui| {
            egui::ComboBox::from_label("Representation")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for mode in Representation::all() {
                        ui.selectable_value(&mut selected, *mode, mode.label());
                    }
                });

            ui.add(
                egui::Slider::new(&mut slider, Resolution::MIN..=Resolution::MAX)
                    .text("Resolution"),
            );

            ui.separator();

            let geometry = controller.scene.geometry();
            ui.label(format!(
                "{} vertices, {} triangles",
                geometry.vertex_count(),
                geometry.triangle_count()
            ));

            if ui.button("Reset Camera").clicked() {
                reset_clicked = true;
            }
        });

    let (resolution_change, representation_change) = panel_changes(&panel, slider, selected);
    if let Some(change) = resolution_change {
        debug!("Resolution slider moved to {}", change.0);
        panel.resolution = change.0;
        resolution_events.write(change);
    }
    if let Some(change) = representation_change {
        debug!("Representation selector set to {}", change.0);
        panel.representation = change.0;
        representation_events.write(change);
    }
    if reset_clicked {
        reset_events.write(ResetCamera);
    }

    Ok(())
}

/// System that shows or hides the panel with F1
pub fn toggle_panel_visibility(
    keys: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<ControlPanelState>,
) {
    if keys.just_pressed(KeyCode::F1) {
        panel.visible = !panel.visible;
        info!(
            "Control panel {}",
            if panel.visible { "shown" } else { "hidden" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::settings::ViewerConfig;
    use bevy::ecs::system::RunSystemOnce;
    use bevy_egui::EguiUserTextures;

    fn panel() -> ControlPanelState {
        ControlPanelState::new(Resolution::new(16), Representation::Surface)
    }

    #[test]
    fn test_no_changes() {
        assert_eq!(panel_changes(&panel(), 16, Representation::Surface), (None, None));
    }

    #[test]
    fn test_slider_change() {
        let (resolution, representation) = panel_changes(&panel(), 40, Representation::Surface);
        assert_eq!(resolution, Some(ResolutionChanged(Resolution::new(40))));
        assert_eq!(representation, None);
    }

    #[test]
    fn test_slider_value_is_clamped() {
        let (resolution, _) = panel_changes(&panel(), 500, Representation::Surface);
        assert_eq!(resolution, Some(ResolutionChanged(Resolution::new(80))));
        let (resolution, _) = panel_changes(&panel(), 2, Representation::Surface);
        assert_eq!(resolution, Some(ResolutionChanged(Resolution::new(8))));
    }

    #[test]
    fn test_selector_change() {
        let (resolution, representation) = panel_changes(&panel(), 16, Representation::Points);
        assert_eq!(resolution, None);
        assert_eq!(
            representation,
            Some(RepresentationChanged(Representation::Points))
        );
    }

    fn headless_app(visible: bool) -> App {
        let config = ViewerConfig::default();
        let mut panel = ControlPanelState::new(config.resolution, config.representation);
        panel.visible = visible;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<EguiUserTextures>()
            .insert_resource(ViewerController::new(&config))
            .insert_resource(panel)
            .add_message::<ResolutionChanged>()
            .add_message::<RepresentationChanged>()
            .add_message::<ResetCamera>();
        app
    }

    #[test]
    fn test_hidden_panel_runs_in_schedule() {
        let mut app = headless_app(false);
        app.add_systems(Update, control_panel_system);
        app.update();
        app.update();
        assert!(!app.world().resource::<ControlPanelState>().visible);
    }

    #[test]
    fn test_visible_panel_without_egui_context_reports_error() {
        let mut app = headless_app(true);
        let output: Result = app
            .world_mut()
            .run_system_once(control_panel_system)
            .expect("system parameters are available");
        assert!(output.is_err());
    }
}
