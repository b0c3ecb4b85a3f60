//! Procedural per-vertex coloring
//!
//! Assigns every sphere vertex a color from its position in the vertex
//! enumeration, giving a striped test pattern whose band edges move with the
//! resolution. Vertices are grouped into rings of `R` consecutive indices:
//!
//! - `theta_index = floor((i mod R) / (R / 4))` selects one of four bands
//!   around a ring and drives the red channel,
//! - `phi_index = floor(i / R)` is the ring number and drives the green
//!   channel,
//! - blue is `255 - red - green`.
//!
//! Blue is computed with wrapping `u8` arithmetic, so a vertex where both red
//! and green saturate stores `1` (that is, `-255 mod 256`) rather than a
//! clamped value.

use bevy::color::{Color, ColorToComponents};

use super::controls::Resolution;

/// Flat, component-interleaved RGB buffer aligned with a vertex list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorBuffer(Vec<u8>);

impl ColorBuffer {
    /// Number of components (always `3 * vertex_count`)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.0.len() / 3
    }

    /// Color of vertex `index`, if it exists
    pub fn triplet(&self, index: usize) -> Option<[u8; 3]> {
        let start = index.checked_mul(3)?;
        let rgb = self.0.get(start..start + 3)?;
        Some([rgb[0], rgb[1], rgb[2]])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.0.chunks_exact(3).map(|rgb| [rgb[0], rgb[1], rgb[2]])
    }

    /// Number of vertices whose blue channel wrapped around
    pub fn wrapped_blue_count(&self) -> usize {
        self.iter()
            .filter(|[r, g, _]| *r == u8::MAX && *g == u8::MAX)
            .count()
    }

    /// Convert the sRGB bytes into linear RGBA floats for a vertex color attribute
    pub fn to_linear_rgba(&self) -> Vec<[f32; 4]> {
        self.iter()
            .map(|[r, g, b]| Color::srgb_u8(r, g, b).to_linear().to_f32_array())
            .collect()
    }
}

/// Band indices `(theta_index, phi_index)` of vertex `index`
///
/// `theta_index` is evaluated as `4 * (i mod R) / R` in integers, which is
/// the exact floor of `(i mod R) / (R / 4)` for any `R`.
pub fn band_indices(index: usize, resolution: Resolution) -> (usize, usize) {
    let ring = resolution.get() as usize;
    let theta_index = (4 * (index % ring)) / ring;
    let phi_index = index / ring;
    (theta_index, phi_index)
}

/// Color of a single vertex
pub fn vertex_color(index: usize, resolution: Resolution) -> [u8; 3] {
    let (theta_index, phi_index) = band_indices(index, resolution);
    let red = if theta_index % 2 == 1 { u8::MAX } else { 0 };
    let green = if phi_index % 2 == 1 { u8::MAX } else { 0 };
    let blue = u8::MAX.wrapping_sub(red).wrapping_sub(green);
    [red, green, blue]
}

/// Compute the color buffer for `vertex_count` vertices
///
/// The count is expected to be `R * R` for a sphere generated at resolution
/// `R`, but any count is accepted.
pub fn assign_vertex_colors(vertex_count: usize, resolution: Resolution) -> ColorBuffer {
    let mut buffer = Vec::with_capacity(vertex_count * 3);
    for index in 0..vertex_count {
        buffer.extend_from_slice(&vertex_color(index, resolution));
    }
    ColorBuffer(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_length_is_three_per_vertex() {
        for (count, res) in [(0, 8), (1, 8), (32, 16), (6400, 80), (100, 13)] {
            let buffer = assign_vertex_colors(count, Resolution::new(res));
            assert_eq!(buffer.len(), 3 * count);
            assert_eq!(buffer.vertex_count(), count);
        }
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let resolution = Resolution::new(37);
        let a = assign_vertex_colors(37 * 37, resolution);
        let b = assign_vertex_colors(37 * 37, resolution);
        assert_eq!(a, b);
    }

    #[test]
    fn test_concrete_colors_at_resolution_16() {
        let buffer = assign_vertex_colors(32, Resolution::new(16));

        assert_eq!(buffer.triplet(0), Some([0, 0, 255]));
        assert_eq!(buffer.triplet(5), Some([255, 0, 0]));
        // Both channels saturate: 255 - 255 - 255 wraps to 1
        assert_eq!(buffer.triplet(20), Some([255, 255, 1]));
        assert_eq!(buffer.triplet(16), Some([0, 255, 0]));
        assert_eq!(buffer.triplet(32), None);

        assert_eq!(&buffer.as_slice()[15..18], &[255, 0, 0]);
    }

    #[test]
    fn test_ring_assignment() {
        let resolution = Resolution::new(16);
        for i in 0..16 {
            assert_eq!(band_indices(i, resolution).1, 0);
        }
        for i in 16..32 {
            assert_eq!(band_indices(i, resolution).1, 1);
        }
    }

    #[test]
    fn test_theta_bands_are_quarter_rings() {
        let resolution = Resolution::new(16);
        for ring in 0..3 {
            for band in 0..4 {
                let start = ring * 16 + band * 4;
                for i in start..start + 4 {
                    assert_eq!(band_indices(i, resolution), (band, ring));
                }
            }
        }
    }

    #[test]
    fn test_theta_index_for_non_multiple_of_four() {
        // R = 10: R / 4 = 2.5, so positions 0,1,2 | 3,4 | 5,6,7 | 8,9
        let resolution = Resolution::new(10);
        let bands: Vec<usize> = (0..10).map(|i| band_indices(i, resolution).0).collect();
        assert_eq!(bands, vec![0, 0, 0, 1, 1, 2, 2, 2, 3, 3]);
    }

    #[test]
    fn test_channels_in_range_outside_wrapped_case() {
        let resolution = Resolution::new(24);
        let buffer = assign_vertex_colors(24 * 24, resolution);
        for (i, [r, g, b]) in buffer.iter().enumerate() {
            let (theta, phi) = band_indices(i, resolution);
            if theta % 2 == 1 && phi % 2 == 1 {
                assert_eq!([r, g, b], [255, 255, 1]);
            } else {
                assert_eq!(r as u16 + g as u16 + b as u16, 255);
            }
        }
    }

    #[test]
    fn test_wrapped_blue_count() {
        // One odd ring (16..32) with two odd quarter bands of 4 vertices each
        let buffer = assign_vertex_colors(32, Resolution::new(16));
        assert_eq!(buffer.wrapped_blue_count(), 8);
    }

    #[test]
    fn test_linear_rgba_conversion() {
        let buffer = assign_vertex_colors(6, Resolution::new(8));
        let linear = buffer.to_linear_rgba();
        assert_eq!(linear.len(), 6);
        let close = |a: [f32; 4], b: [f32; 4]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-4);
        assert!(close(linear[0], [0.0, 0.0, 1.0, 1.0]));
        assert!(close(linear[2], [1.0, 0.0, 0.0, 1.0]));
    }
}
