// Tuning constants for the shader-lines effect and its frame loop.

// Frame loop
pub const TIME_STEP: f32 = 0.05; // added to the time uniform on every refresh tick
pub const INITIAL_TIME: f32 = 0.0;

// Full-screen quad (two triangles)
pub const QUAD_VERTEX_COUNT: u32 = 6;

// Fragment stage
pub const MOSAIC_SCALE: [f32; 2] = [4.0, 2.0]; // grid cell size in reference pixels
pub const MOSAIC_SCREEN: [f32; 2] = [256.0, 256.0]; // reference resolution
pub const PHASE_SPEED: f32 = 0.06; // time -> ring phase
pub const PHASE_JITTER: f32 = 0.4; // hash(uv.x) contribution to the phase
pub const HASH_SCALE: f32 = 1e4;
pub const LINE_WIDTH: f32 = 0.008;
pub const LAYER_OFFSET: f32 = 0.01; // per colour channel
pub const RING_OFFSET: f32 = 0.01; // per ring
pub const DIST_EPSILON: f32 = 0.001;
pub const COLOR_GAIN: f32 = 0.1;
pub const LAYERS: usize = 3;
pub const RINGS: usize = 3;

// Page
pub const CONTAINER_ID: &str = "shader-container";
