/// Scene, animation and synthesis tuning constants.
///
/// These keep magic numbers out of the animation and audio code. The grouped
/// parameter structs (`AmbientPatch`, `ClickPatch`, `SceneConfig`) take their
/// defaults from here.

// Orb rotation rates (radians per second of elapsed time)
pub const ORB_SPIN_X_PER_SEC: f32 = 0.2;
pub const ORB_SPIN_Y_PER_SEC: f32 = 0.3;

// Orb scale targets and per-frame easing factor
pub const ORB_IDLE_SCALE: f32 = 1.0;
pub const ORB_ACTIVE_SCALE: f32 = 1.5;
pub const SCALE_EASE_FACTOR: f32 = 0.1;

// Orb material mapping
pub const DISTORT_IDLE: f32 = 0.4;
pub const DISTORT_ACTIVE: f32 = 0.9;
pub const DISTORT_SPEED_IDLE: f32 = 1.5;
pub const DISTORT_SPEED_ACTIVE: f32 = 4.0;
pub const HOVER_COLOR: &str = "#ffffff";
pub const DEFAULT_BASE_COLOR: &str = "#8352fd";

// Particle sampling ranges (half-open)
pub const PARTICLE_COUNT: usize = 100;
pub const PARTICLE_FACTOR_MIN: f32 = 20.0;
pub const PARTICLE_FACTOR_MAX: f32 = 120.0;
pub const PARTICLE_SPEED_MIN: f32 = 0.01;
pub const PARTICLE_SPEED_MAX: f32 = 0.015;
pub const PARTICLE_PHASE_MIN: f32 = -50.0;
pub const PARTICLE_PHASE_MAX: f32 = 50.0;
pub const PARTICLE_RADIUS_DIVISOR: f32 = 10.0; // factor / divisor = orbit radius
pub const PARTICLE_SPIN_PER_FRAME: f32 = 0.01;
pub const PARTICLE_SIZE: f32 = 0.08;

// Starfield shell
pub const STAR_COUNT: usize = 5000;
pub const STAR_RADIUS: f32 = 100.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_SIZE_FACTOR: f32 = 4.0;
pub const STAR_TWINKLE_SPEED: f32 = 1.0;

// Ambient patch
pub const CARRIER_HZ: f32 = 440.0;
pub const MODULATOR_HZ: f32 = 0.15;
pub const MODULATION_DEPTH_HZ: f32 = 30.0;
pub const MASTER_GAIN: f32 = 0.15;
pub const ECHO_DELAY_SEC: f32 = 0.6;
pub const ECHO_MAX_DELAY_SEC: f64 = 1.0;
pub const ECHO_FEEDBACK: f32 = 0.5;
pub const DRONE_HZ: f32 = 55.0;
pub const DRONE_GAIN: f32 = 0.2;
pub const BREATH_HZ: f32 = 0.6; // 36 cycles per minute
pub const BREATH_DEPTH: f32 = 0.2;

// Click effect
pub const CLICK_START_HZ: f32 = 800.0;
pub const CLICK_END_HZ: f32 = 100.0;
pub const CLICK_START_GAIN: f32 = 0.3;
pub const CLICK_END_GAIN: f32 = 0.01;
pub const CLICK_DURATION_SEC: f64 = 0.5;

// Camera
pub const CAMERA_Z: f32 = 6.0;
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 400.0;

// Orb geometry and picking
pub const ORB_RADIUS: f32 = 1.0;
pub const ORB_SEGMENTS: u32 = 96;
pub const ORB_RINGS: u32 = 64;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;
