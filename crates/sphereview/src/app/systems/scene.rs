//! Scene systems
//!
//! Spawns the sphere and line entities and reacts to control changes:
//! a resolution change releases the rendered scene and builds a new one, a
//! representation change rewrites the sphere mesh asset in place.

use bevy::prelude::*;

use crate::lib::controls::{Representation, Resolution};
use crate::lib::scene::{RenderedScene, SceneState, ViewerController};

/// Sent when the resolution slider moves
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionChanged(pub Resolution);

/// Sent when a different representation is selected
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepresentationChanged(pub Representation);

/// Marker for the sphere entity
#[derive(Component)]
pub struct SceneSphere;

/// Marker for a line segment entity
#[derive(Component)]
pub struct SceneLine {
    pub index: usize,
}

/// Plugin that owns the scene entities and their update handlers
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ResolutionChanged>()
            .add_message::<RepresentationChanged>()
            .add_systems(Startup, spawn_scene)
            .add_systems(
                Update,
                (apply_resolution_changes, apply_representation_changes).chain(),
            );
    }
}

fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut controller: ResMut<ViewerController>,
) {
    let rendered = spawn_rendered(&mut commands, &mut meshes, &mut materials, &controller.scene);
    info!(
        "Scene ready: resolution {}, {} representation, {} line(s)",
        controller.scene.resolution(),
        controller.scene.representation(),
        rendered.lines.len()
    );
    controller.rendered = Some(rendered);
}

/// System that rebuilds the scene for the latest requested resolution
pub fn apply_resolution_changes(
    mut requests: MessageReader<ResolutionChanged>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut controller: ResMut<ViewerController>,
) {
    // Only the most recent request in a frame matters
    let Some(ResolutionChanged(resolution)) = requests.read().last().copied() else {
        return;
    };
    if resolution == controller.scene.resolution() {
        debug!("Resolution {} unchanged, skipping rebuild", resolution);
        return;
    }

    // Release the old scene before anything new is allocated
    if let Some(previous) = controller.rendered.take() {
        release_rendered(&mut commands, &mut meshes, &mut materials, previous);
    }

    controller.scene.rebuild(resolution);
    let rendered = spawn_rendered(&mut commands, &mut meshes, &mut materials, &controller.scene);
    controller.rendered = Some(rendered);

    info!(
        "Rebuilt sphere at resolution {} ({} vertices)",
        resolution,
        controller.scene.geometry().vertex_count()
    );
}

/// System that restyles the existing sphere for the latest requested representation
pub fn apply_representation_changes(
    mut requests: MessageReader<RepresentationChanged>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut controller: ResMut<ViewerController>,
) {
    let Some(RepresentationChanged(representation)) = requests.read().last().copied() else {
        return;
    };
    if !controller.scene.set_representation(representation) {
        return;
    }

    let Some(rendered) = &controller.rendered else {
        warn!("Representation changed before the scene was spawned");
        return;
    };
    let updated = controller.scene.sphere_mesh();
    match meshes.get_mut(&rendered.sphere_mesh) {
        Some(mesh) => {
            *mesh = updated;
            info!("Sphere representation set to {}", representation);
        }
        None => error!("Sphere mesh asset missing, cannot change representation"),
    }
}

fn spawn_rendered(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    scene: &SceneState,
) -> RenderedScene {
    let sphere_mesh = meshes.add(scene.sphere_mesh());
    let sphere_material = materials.add(sphere_material(scene.config().colored));
    let sphere = commands
        .spawn((
            Mesh3d(sphere_mesh.clone()),
            MeshMaterial3d(sphere_material.clone()),
            Transform::IDENTITY,
            SceneSphere,
            Name::new("Sphere"),
        ))
        .id();

    let line_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.85, 0.2),
        unlit: true,
        ..default()
    });
    let mut lines = Vec::with_capacity(scene.lines().len());
    let mut line_meshes = Vec::with_capacity(scene.lines().len());
    for (index, (segment, mesh)) in scene
        .lines()
        .iter()
        .zip(scene.line_meshes())
        .enumerate()
    {
        let length = segment.length();
        debug!("Line {index}: {:?} -> {:?} (length {length:.2})", segment.point1, segment.point2);
        let handle = meshes.add(mesh);
        let entity = commands
            .spawn((
                Mesh3d(handle.clone()),
                MeshMaterial3d(line_material.clone()),
                Transform::IDENTITY,
                SceneLine { index },
                Name::new(format!("Line {index} ({length:.2})")),
            ))
            .id();
        lines.push(entity);
        line_meshes.push(handle);
    }

    RenderedScene {
        sphere,
        sphere_mesh,
        sphere_material,
        lines,
        line_meshes,
        line_material,
    }
}

fn release_rendered(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rendered: RenderedScene,
) {
    commands.entity(rendered.sphere).despawn();
    for entity in rendered.lines {
        commands.entity(entity).despawn();
    }

    meshes.remove(&rendered.sphere_mesh);
    for handle in &rendered.line_meshes {
        meshes.remove(handle);
    }
    materials.remove(&rendered.sphere_material);
    materials.remove(&rendered.line_material);
}

fn sphere_material(colored: bool) -> StandardMaterial {
    // Vertex colors are multiplied with the base color
    let base_color = if colored {
        Color::WHITE
    } else {
        Color::srgb(0.85, 0.85, 0.85)
    };
    StandardMaterial {
        base_color,
        metallic: 0.0,
        perceptual_roughness: 0.6,
        cull_mode: Some(bevy::render::render_resource::Face::Back),
        ..default()
    }
}
