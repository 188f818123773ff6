/// Web front-end settings that are not per-mount configuration.
pub const LOG_LEVEL: log::Level = log::Level::Info;

// Clear colour behind the quad; the fragment stage writes every pixel, so
// this only shows while the surface is being reconfigured.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
