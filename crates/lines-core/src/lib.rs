pub mod config;
pub mod constants;
pub mod driver;
pub mod lifecycle;
pub mod shader;
pub mod uniforms;

// Shader bundled as a string constant
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

pub use config::*;
pub use driver::*;
pub use lifecycle::*;
pub use uniforms::*;
