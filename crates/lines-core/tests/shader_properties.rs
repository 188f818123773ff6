// Host-side checks of the CPU reference of the fragment stage.

use glam::Vec2;
use lines_core::shader::{fragment_color, normalize, shade_pixel};

#[test]
fn color_is_bit_identical_across_evaluations() {
    let samples = [
        (Vec2::new(0.0, 0.0), 0.0),
        (Vec2::new(0.31, -0.72), 1.25),
        (Vec2::new(-1.2, 0.5), 17.5),
        (Vec2::new(0.999, 0.999), 1234.0),
    ];
    for &(uv, time) in &samples {
        let a = fragment_color(uv, time);
        let b = fragment_color(uv, time);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.z.to_bits(), b.z.to_bits());
    }
}

#[test]
fn pixels_in_one_mosaic_cell_share_a_color() {
    // At 512x512 one normalized unit is 256 px, so a cell is 4 px wide and
    // 2 px tall; pick two pixels strictly inside the same cell.
    let res = Vec2::new(512.0, 512.0);
    let a = shade_pixel(Vec2::new(300.0, 300.0), res, 3.0);
    let b = shade_pixel(Vec2::new(301.5, 301.0), res, 3.0);
    assert_eq!(a, b);
}

#[test]
fn rings_move_with_time() {
    let uv = normalize(Vec2::new(600.0, 420.0), Vec2::new(800.0, 600.0));
    let frames: Vec<_> = (0..40).map(|k| fragment_color(uv, k as f32 * 0.5)).collect();
    assert!(frames.windows(2).any(|w| w[0] != w[1]));
}
