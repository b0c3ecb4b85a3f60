//! Scene state and the viewer controller
//!
//! `SceneState` is the single "current scene": sphere geometry, its colors,
//! the display mode and the line segments. A resolution change replaces the
//! geometry and colors wholesale. A representation change only swaps how the
//! existing geometry is drawn.
//!
//! `ViewerController` owns the scene state together with the handles of what
//! is currently spawned in the bevy world. Update systems borrow it through
//! `ResMut`; nothing else holds scene data.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use super::coloring::{assign_vertex_colors, ColorBuffer};
use super::controls::{Representation, Resolution};
use super::line::LineSegment;
use super::settings::ViewerConfig;
use super::sphere::{SphereGeometry, SphereSource};

/// What a scene is built from, independent of the runtime controls
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub radius: f32,
    /// Apply the procedural vertex colors to the sphere
    pub colored: bool,
    pub lines: Vec<LineSegment>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            colored: true,
            lines: LineSegment::defaults(),
        }
    }
}

/// The current scene
#[derive(Debug, Clone)]
pub struct SceneState {
    config: SceneConfig,
    resolution: Resolution,
    representation: Representation,
    geometry: SphereGeometry,
    colors: Option<ColorBuffer>,
}

impl SceneState {
    /// Generate geometry (and colors, if enabled) for the given controls
    pub fn build(
        config: SceneConfig,
        resolution: Resolution,
        representation: Representation,
    ) -> Self {
        let (geometry, colors) = generate(&config, resolution);
        Self {
            config,
            resolution,
            representation,
            geometry,
            colors,
        }
    }

    pub fn from_viewer_config(config: &ViewerConfig) -> Self {
        Self::build(
            config.scene.clone(),
            config.resolution,
            config.representation,
        )
    }

    /// Regenerate everything for a new resolution.
    ///
    /// Returns `false` and leaves the scene untouched if the resolution is
    /// unchanged.
    pub fn rebuild(&mut self, resolution: Resolution) -> bool {
        if resolution == self.resolution {
            return false;
        }
        let (geometry, colors) = generate(&self.config, resolution);
        self.resolution = resolution;
        self.geometry = geometry;
        self.colors = colors;
        true
    }

    /// Change the display mode. Geometry and colors are kept as they are.
    pub fn set_representation(&mut self, representation: Representation) -> bool {
        if representation == self.representation {
            return false;
        }
        self.representation = representation;
        true
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn geometry(&self) -> &SphereGeometry {
        &self.geometry
    }

    pub fn colors(&self) -> Option<&ColorBuffer> {
        self.colors.as_ref()
    }

    pub fn lines(&self) -> &[LineSegment] {
        &self.config.lines
    }

    /// Radius of a sphere around the origin enclosing the sphere and all lines
    pub fn bounding_radius(&self) -> f32 {
        self.config
            .lines
            .iter()
            .flat_map(|line| [line.point1, line.point2])
            .map(|p| Vec3::from_array(p).length())
            .fold(self.geometry.bounding_radius(), f32::max)
    }

    /// Sphere mesh in the topology of the current representation
    pub fn sphere_mesh(&self) -> Mesh {
        let (topology, indices): (PrimitiveTopology, Option<Vec<u32>>) = match self.representation {
            Representation::Points => (PrimitiveTopology::PointList, None),
            Representation::Wireframe => (
                PrimitiveTopology::LineList,
                Some(self.geometry.edges().into_iter().flatten().collect()),
            ),
            Representation::Surface => (
                PrimitiveTopology::TriangleList,
                Some(self.geometry.indices.clone()),
            ),
        };

        let mut mesh = Mesh::new(topology, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.geometry.positions.clone())
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.geometry.normals.clone());

        if let Some(colors) = &self.colors {
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors.to_linear_rgba());
        }
        if let Some(indices) = indices {
            mesh.insert_indices(Indices::U32(indices));
        }
        mesh
    }

    /// One `LineList` mesh per configured segment
    pub fn line_meshes(&self) -> Vec<Mesh> {
        self.config.lines.iter().map(LineSegment::to_mesh).collect()
    }
}

fn generate(config: &SceneConfig, resolution: Resolution) -> (SphereGeometry, Option<ColorBuffer>) {
    let source = SphereSource::new(config.radius, resolution.get(), resolution.get());
    let geometry = source.generate();
    let colors = config
        .colored
        .then(|| assign_vertex_colors(geometry.vertex_count(), resolution));

    debug!(
        "Generated sphere at resolution {}: {} vertices, {} triangles",
        resolution,
        geometry.vertex_count(),
        geometry.triangle_count()
    );
    if let Some(colors) = &colors {
        debug!(
            "{} vertices have a wrapped blue channel",
            colors.wrapped_blue_count()
        );
    }

    (geometry, colors)
}

/// Handles of everything spawned for the current scene
#[derive(Debug, Clone)]
pub struct RenderedScene {
    pub sphere: Entity,
    pub sphere_mesh: Handle<Mesh>,
    pub sphere_material: Handle<StandardMaterial>,
    pub lines: Vec<Entity>,
    pub line_meshes: Vec<Handle<Mesh>>,
    pub line_material: Handle<StandardMaterial>,
}

/// Owns the scene state and the handles of its rendered form
#[derive(Resource)]
pub struct ViewerController {
    pub scene: SceneState,
    pub rendered: Option<RenderedScene>,
}

impl ViewerController {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            scene: SceneState::from_viewer_config(config),
            rendered: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn scene(colored: bool, resolution: u32, representation: Representation) -> SceneState {
        SceneState::build(
            SceneConfig {
                colored,
                ..Default::default()
            },
            Resolution::new(resolution),
            representation,
        )
    }

    #[test]
    fn test_color_buffer_aligned_with_vertices() {
        let state = scene(true, 16, Representation::Surface);
        let colors = state.colors().unwrap();
        assert_eq!(state.geometry().vertex_count(), 256);
        assert_eq!(colors.len(), 3 * state.geometry().vertex_count());
        assert_eq!(colors.triplet(20), Some([255, 255, 1]));
    }

    #[test]
    fn test_uncolored_scene_has_no_buffer() {
        let state = scene(false, 16, Representation::Surface);
        assert!(state.colors().is_none());
        assert!(state.sphere_mesh().attribute(Mesh::ATTRIBUTE_COLOR).is_none());
    }

    #[test]
    fn test_rebuild_replaces_geometry_and_colors() {
        let mut state = scene(true, 16, Representation::Wireframe);
        assert!(!state.rebuild(Resolution::new(16)));

        assert!(state.rebuild(Resolution::new(32)));
        assert_eq!(state.resolution().get(), 32);
        assert_eq!(state.geometry().vertex_count(), 32 * 32);
        assert_eq!(state.colors().unwrap().len(), 3 * 32 * 32);
        assert_eq!(state.representation(), Representation::Wireframe);
        assert_eq!(
            state.colors().unwrap(),
            &assign_vertex_colors(32 * 32, Resolution::new(32))
        );
    }

    #[test]
    fn test_representation_change_keeps_geometry() {
        let mut state = scene(true, 20, Representation::Surface);
        let geometry = state.geometry().clone();
        let colors = state.colors().cloned();

        assert!(state.set_representation(Representation::Points));
        assert!(!state.set_representation(Representation::Points));
        assert_eq!(state.geometry(), &geometry);
        assert_eq!(state.colors().cloned(), colors);
    }

    #[test]
    fn test_sphere_mesh_topology_follows_representation() {
        let mut state = scene(true, 8, Representation::Surface);
        let surface = state.sphere_mesh();
        assert_eq!(surface.primitive_topology(), PrimitiveTopology::TriangleList);
        assert_eq!(
            surface.indices().map(|i| i.len()),
            Some(state.geometry().indices.len())
        );

        state.set_representation(Representation::Wireframe);
        let wireframe = state.sphere_mesh();
        assert_eq!(wireframe.primitive_topology(), PrimitiveTopology::LineList);
        assert_eq!(
            wireframe.indices().map(|i| i.len()),
            Some(2 * state.geometry().edges().len())
        );

        state.set_representation(Representation::Points);
        let points = state.sphere_mesh();
        assert_eq!(points.primitive_topology(), PrimitiveTopology::PointList);
        assert!(points.indices().is_none());
        assert_eq!(points.count_vertices(), 64);
    }

    #[test]
    fn test_sphere_mesh_carries_colors() {
        let state = scene(true, 8, Representation::Surface);
        match state.sphere_mesh().attribute(Mesh::ATTRIBUTE_COLOR) {
            Some(VertexAttributeValues::Float32x4(colors)) => assert_eq!(colors.len(), 64),
            other => panic!("unexpected color attribute: {:?}", other),
        }
    }

    #[test]
    fn test_bounding_radius_includes_lines() {
        let state = scene(true, 8, Representation::Surface);
        assert!((state.bounding_radius() - 1.5).abs() < 1e-5);
        assert_eq!(state.line_meshes().len(), 2);
    }
}
