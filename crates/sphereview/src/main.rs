use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use sphereview::{CameraPlugin, ScenePlugin, SphereviewUiPlugin};

use sphereview::app::cli::Args;
use sphereview::lib::scene::ViewerController;
use sphereview::lib::settings::{Settings, SettingsError, ViewerConfig};

fn main() {
    // Parse command line arguments
    let args = Args::parse_args();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("sphereview: {e}");
            std::process::exit(1);
        }
    };
    let config = args.apply_overrides(
        settings
            .as_ref()
            .map(Settings::to_viewer_config)
            .unwrap_or_default(),
    );

    let log_plugin = if args.verbose {
        LogPlugin {
            level: Level::DEBUG,
            filter: "wgpu=error,naga=warn,sphereview=debug".to_string(),
            ..default()
        }
    } else {
        LogPlugin::default()
    };

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(log_plugin)
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Sphereview".to_string(),
                    ..default()
                }),
                ..default()
            }),
    );

    if args.diagnostics {
        app.add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_plugins(LogDiagnosticsPlugin::default());
    }

    log_startup(&config);

    app.insert_resource(ViewerController::new(&config))
        .add_plugins(ScenePlugin)
        .add_plugins(CameraPlugin)
        .add_plugins(SphereviewUiPlugin)
        .insert_resource(ClearColor(Color::srgb(0.1, 0.1, 0.15)))
        .add_systems(Startup, setup_lights)
        .run();
}

/// Read the explicit config file, or `sphereview.toml` in the working directory if present
fn load_settings(args: &Args) -> Result<Option<Settings>, SettingsError> {
    match &args.config {
        Some(path) => Settings::load(path).map(Some),
        None => {
            let cwd = std::env::current_dir().map_err(|e| SettingsError::Io {
                path: ".".into(),
                source: e,
            })?;
            Settings::load_from_dir(&cwd)
        }
    }
}

fn log_startup(config: &ViewerConfig) {
    info!("Starting Sphereview...");
    info!(
        "Sphere radius {}, resolution {}, {} representation, colors {}",
        config.scene.radius,
        config.resolution,
        config.representation,
        if config.scene.colored { "on" } else { "off" }
    );
    info!("{} line segment(s) configured", config.scene.lines.len());
}

fn setup_lights(mut commands: Commands) {
    // Key light for overall illumination
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill light from the opposite side so the far hemisphere is not black
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            shadows_enabled: false,
            range: 100.0,
            ..default()
        },
        Transform::from_xyz(-4.0, -2.0, -4.0),
    ));
}
