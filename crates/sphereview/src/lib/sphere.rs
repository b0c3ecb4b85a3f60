//! UV sphere generation
//!
//! Vertices are laid out on a regular `(phi, theta)` grid. Rings of constant
//! phi run from the north pole (`+Y`) to the south pole, and each ring holds
//! `theta_resolution` vertices. The vertex of ring `j`, step `i` has index
//! `j * theta_resolution + i`, so a sphere always has exactly
//! `theta_resolution * phi_resolution` vertices. The first and last rings
//! collapse onto the poles.

use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

/// Parameters for a generated sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSource {
    pub radius: f32,
    pub theta_resolution: u32,
    pub phi_resolution: u32,
}

impl Default for SphereSource {
    fn default() -> Self {
        Self {
            radius: 1.0,
            theta_resolution: 16,
            phi_resolution: 16,
        }
    }
}

impl SphereSource {
    /// Smallest resolution that still encloses a volume
    pub const MIN_RESOLUTION: u32 = 3;

    pub fn new(radius: f32, theta_resolution: u32, phi_resolution: u32) -> Self {
        Self {
            radius,
            theta_resolution: theta_resolution.max(Self::MIN_RESOLUTION),
            phi_resolution: phi_resolution.max(Self::MIN_RESOLUTION),
        }
    }

    /// Generate the vertex grid and its triangulation
    pub fn generate(&self) -> SphereGeometry {
        let theta_res = self.theta_resolution.max(Self::MIN_RESOLUTION);
        let phi_res = self.phi_resolution.max(Self::MIN_RESOLUTION);
        let vertex_count = (theta_res * phi_res) as usize;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);

        for j in 0..phi_res {
            let phi = PI * j as f32 / (phi_res - 1) as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            for i in 0..theta_res {
                let theta = TAU * i as f32 / theta_res as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();

                let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
                positions.push([
                    self.radius * normal[0],
                    self.radius * normal[1],
                    self.radius * normal[2],
                ]);
                normals.push(normal);
            }
        }

        // Quads between ring j and j + 1, wrapping around theta. Triangles that
        // would have two corners on the same pole are dropped.
        let mut indices = Vec::with_capacity(6 * (theta_res * (phi_res - 2)) as usize);
        for j in 0..phi_res - 1 {
            for i in 0..theta_res {
                let next_i = (i + 1) % theta_res;
                let a = j * theta_res + i;
                let b = j * theta_res + next_i;
                let c = (j + 1) * theta_res + i;
                let d = (j + 1) * theta_res + next_i;

                if j != 0 {
                    indices.extend_from_slice(&[a, b, c]);
                }
                if j + 1 != phi_res - 1 {
                    indices.extend_from_slice(&[b, d, c]);
                }
            }
        }

        SphereGeometry {
            theta_resolution: theta_res,
            phi_resolution: phi_res,
            positions,
            normals,
            indices,
        }
    }
}

/// Vertex grid and triangle list of a generated sphere
#[derive(Debug, Clone, PartialEq)]
pub struct SphereGeometry {
    pub theta_resolution: u32,
    pub phi_resolution: u32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Counter-clockwise triangles, three indices each
    pub indices: Vec<u32>,
}

impl SphereGeometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique triangle edges as index pairs, in the order they are first seen
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut edges = Vec::with_capacity(self.indices.len() / 2);
        for triangle in self.indices.chunks_exact(3) {
            for (from, to) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                let key = (from.min(to), from.max(to));
                if seen.insert(key) {
                    edges.push([from, to]);
                }
            }
        }
        edges
    }

    /// Distance from the origin to the farthest vertex
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
            .fold(0.0, f32::max)
    }
}
