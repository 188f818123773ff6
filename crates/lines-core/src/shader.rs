//! CPU reference of the fragment stage in `shaders/lines.wgsl`.
//!
//! The GPU version is what draws; this one exists so the colour function can
//! be checked on the host. Both follow GLSL conventions: `fract` is
//! `x - floor(x)` and pixel coordinates start at the bottom-left corner.

use crate::constants::*;
use glam::{Vec2, Vec3};

/// GLSL `fract`. Differs from `f32::fract` for negative inputs.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Scalar hash used to jitter the ring phase per mosaic column.
#[inline]
pub fn hash(x: f32) -> f32 {
    fract(x.sin() * HASH_SCALE)
}

/// Map a pixel coordinate to the centred, aspect-corrected space where the
/// shorter axis spans [-1, 1].
#[inline]
pub fn normalize(frag_coord: Vec2, resolution: Vec2) -> Vec2 {
    (frag_coord * 2.0 - resolution) / resolution.x.min(resolution.y)
}

/// Snap a normalized coordinate onto the coarse mosaic grid.
#[inline]
pub fn mosaic(uv: Vec2) -> Vec2 {
    let cells = Vec2::from(MOSAIC_SCREEN) / Vec2::from(MOSAIC_SCALE);
    (uv * cells).floor() / cells
}

/// Colour of one pixel given its normalized coordinate and the time uniform.
///
/// Each channel `j` accumulates three rings whose radius tracks the
/// fractional phase; brightness falls off with the distance to the ring.
pub fn fragment_color(uv: Vec2, time: f32) -> Vec3 {
    let uv = mosaic(uv);
    let t = time * PHASE_SPEED + hash(uv.x) * PHASE_JITTER;
    let radius = uv.length();

    let mut color = [0.0f32; LAYERS];
    for (j, channel) in color.iter_mut().enumerate() {
        for i in 0..RINGS {
            let phase = t - LAYER_OFFSET * j as f32 + i as f32 * RING_OFFSET;
            let dist = (fract(phase) - radius).abs();
            *channel += LINE_WIDTH * (i * i) as f32 / (dist + DIST_EPSILON);
        }
    }

    (Vec3::from(color) * COLOR_GAIN).clamp(Vec3::ZERO, Vec3::ONE)
}

/// Convenience wrapper: colour of the pixel at `frag_coord` on a surface of
/// `resolution` pixels.
pub fn shade_pixel(frag_coord: Vec2, resolution: Vec2, time: f32) -> Vec3 {
    fragment_color(normalize(frag_coord, resolution), time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fract_matches_glsl_for_negatives() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((fract(1.25) - 0.25).abs() < 1e-6);
        assert_eq!(fract(-1.0), 0.0);
    }

    #[test]
    fn hash_stays_in_unit_interval() {
        for k in -200..200 {
            let h = hash(k as f32 * 0.37);
            assert!((0.0..1.0).contains(&h), "hash({}) = {}", k, h);
        }
        assert_eq!(hash(0.0), 0.0);
    }

    #[test]
    fn normalize_centres_and_corrects_aspect() {
        let res = Vec2::new(800.0, 600.0);
        assert_eq!(normalize(Vec2::new(400.0, 300.0), res), Vec2::ZERO);
        let corner = normalize(Vec2::new(800.0, 600.0), res);
        assert!((corner.y - 1.0).abs() < 1e-6);
        assert!((corner.x - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn mosaic_uses_independent_cell_sizes() {
        // 64 columns and 128 rows per unit
        let q = mosaic(Vec2::new(0.0199, 0.0199));
        assert!((q.x - 1.0 / 64.0).abs() < 1e-6);
        assert!((q.y - 2.0 / 128.0).abs() < 1e-6);
        assert_eq!(mosaic(Vec2::new(-0.001, -0.001)), Vec2::new(-1.0 / 64.0, -1.0 / 128.0));
    }

    #[test]
    fn centre_pixel_at_time_zero() {
        let c = fragment_color(Vec2::ZERO, 0.0);
        // red: 0.1 * (0.008 / 0.011 + 0.032 / 0.021)
        assert!((c.x - 0.225_108).abs() < 1e-4, "red = {}", c.x);
        assert_eq!(c.y, 1.0);
        assert_eq!(c.z, 1.0);
    }

    #[test]
    fn output_is_clamped() {
        for step in 0..50 {
            let time = step as f32 * 0.37;
            for &(x, y) in &[(0.1, 0.2), (-0.7, 0.4), (0.9, -0.9), (0.0, 0.5)] {
                let c = fragment_color(Vec2::new(x, y), time);
                for v in c.to_array() {
                    assert!((0.0..=1.0).contains(&v));
                }
            }
        }
    }
}
