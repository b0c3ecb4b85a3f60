//! Line segments drawn next to the sphere

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A segment between two points in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub point1: [f32; 3],
    pub point2: [f32; 3],
}

/// Build a segment from its endpoint coordinates
pub fn make_line(x1: f32, y1: f32, z1: f32, x2: f32, y2: f32, z2: f32) -> LineSegment {
    LineSegment {
        point1: [x1, y1, z1],
        point2: [x2, y2, z2],
    }
}

impl LineSegment {
    /// The segments shown when nothing else is configured: one along X and one along Y
    pub fn defaults() -> Vec<LineSegment> {
        vec![
            make_line(-1.5, 0.0, 0.0, 1.5, 0.0, 0.0),
            make_line(0.0, -1.5, 0.0, 0.0, 1.5, 0.0),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.point1.iter().chain(&self.point2).all(|c| c.is_finite())
    }

    pub fn length(&self) -> f32 {
        Vec3::from_array(self.point1).distance(Vec3::from_array(self.point2))
    }

    /// Two-vertex `LineList` mesh
    pub fn to_mesh(&self) -> Mesh {
        Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vec![self.point1, self.point2])
    }
}
