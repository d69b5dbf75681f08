use glam::Vec3;

// Shared navigation and layout tuning constants used by the web and native frontends.

// Galaxy layout
pub const PLANET_ZONE: f32 = 14.0; // every planet orbits inside this radius around its star
pub const IMPACT_RADIUS_RANGE: (f32, f32) = (8.0, 13.0); // orbit band for impact-spawned planets
pub const STAR_SPEED_RANGE: (f32, f32) = (0.01, 0.04);
pub const PHASE_MAX: f32 = 6.0;
pub const INCLINATION_SPREAD: f32 = 0.4; // full width of the random X/Z tilt

// Oort cloud and relic shards
pub const METEOR_COUNT: usize = 200;
pub const METEOR_DISTANCE_RANGE: (f32, f32) = (150.0, 450.0);
pub const METEOR_SPEED_RANGE: (f32, f32) = (0.005, 0.05);
pub const RELIC_DISTANCE_RANGE: (f32, f32) = (200.0, 250.0);

// Free-fly movement
pub const FREE_FLY_SPEED: f32 = 10.0; // units per second of thrust
pub const FREE_FLY_DAMPING: f32 = 0.85; // per-frame velocity retention, 0..1 exclusive
pub const FREE_LOOK_DISTANCE: f32 = 100.0; // how far ahead the look target sits

// Focus/preset smoothing
pub const FOCUS_LERP_FACTOR: f32 = 0.05; // exponential smoothing fraction per frame

// Cinematic warp
pub const WARP_DURATION_SECS: f32 = 2.0;
pub const WARP_FOV_PEAK_DEG: f32 = 120.0;
pub const WARP_COMPLETE_EPSILON: f32 = 1e-4; // absorbs f32 accumulation drift at the end of a warp
pub const WARP_ARRIVAL_OFFSET: Vec3 = Vec3::new(0.0, 150.0, 300.0); // from a universe origin

// Camera defaults
pub const DEFAULT_FOV_DEG: f32 = 60.0;
pub const REST_FOV_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 10_000.0;
pub const START_POSITION: Vec3 = Vec3::new(0.0, 400.0, 800.0);

// Preset slots
pub const PRESET_SLOT_COUNT: usize = 4;

// Reticle picking
pub const PICK_RADIUS_SCALE: f32 = 1.5; // inflate visual size so small bodies stay selectable

// Framing offsets applied around a focused body, closer for smaller bodies
pub const STAR_FRAMING: Vec3 = Vec3::new(0.0, 30.0, 60.0);
pub const PLANET_FRAMING: Vec3 = Vec3::new(0.0, 10.0, 20.0);
pub const SATELLITE_FRAMING: Vec3 = Vec3::new(0.0, 5.0, 10.0);
pub const RELIC_FRAMING: Vec3 = Vec3::new(0.0, 6.0, 12.0);
pub const METEOR_FRAMING: Vec3 = Vec3::new(0.0, 3.0, 6.0);

/// Questions carried by the relic shards drifting around the canon galaxy.
pub const QUESTIONS: [&str; 5] = [
    "What if acoustics had been microtonal from the start?",
    "Is being eroded by an alien of your own design a form of evolution?",
    "Is a taboo running wild the moment the world's truth is exposed?",
    "Is ordered noise an omen of collapse, or a new aesthetic?",
    "Can a big pop song swallow the curse of equal temperament?",
];
