//! Uniform block shared with `shaders/lines.wgsl` and the viewport math that
//! keeps its resolution in step with the drawing surface.

/// Per-frame shader inputs.
///
/// Layout matches the WGSL `Uniforms` struct: `vec2<f32>` resolution followed
/// by the `f32` time and one padding word, 16 bytes total.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

impl Uniforms {
    pub fn new(time: f32) -> Self {
        Self {
            resolution: [0.0, 0.0],
            time,
            _pad: 0.0,
        }
    }

    pub fn set_resolution(&mut self, size: SurfaceSize) {
        self.resolution = [size.width as f32, size.height as f32];
    }
}

/// Drawing-surface size in physical pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Limit each axis to `max_dimension` (a device's largest 2D texture).
    pub fn clamp_to(self, max_dimension: u32) -> SurfaceSize {
        let max = max_dimension.max(1);
        SurfaceSize {
            width: self.width.clamp(1, max),
            height: self.height.clamp(1, max),
        }
    }
}

/// Container bounding box in CSS pixels plus the device pixel ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
        }
    }

    /// Backing-store size for a canvas laid out at this viewport.
    ///
    /// Each axis is `floor(css * dpr)`, never below one pixel so a collapsed
    /// container still yields a configurable surface.
    pub fn surface_size(&self) -> SurfaceSize {
        let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        let px = |css: f64| -> u32 {
            let v = (css.max(0.0) * dpr).floor();
            (v as u32).max(1)
        };
        SurfaceSize {
            width: px(self.css_width),
            height: px(self.css_height),
        }
    }
}
