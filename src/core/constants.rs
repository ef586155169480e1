// Play field (pixels, y grows downward)
pub const FIELD_WIDTH: u32 = 800;
pub const FIELD_HEIGHT: u32 = 600;

// Timer intervals
pub const SPAWN_INTERVAL_MS: u64 = 1000;
pub const MOVE_INTERVAL_MS: u64 = 50;
pub const INPUT_POLL_INTERVAL_MS: u64 = 50;

// Cup
pub const CUP_WIDTH: f64 = 100.0;
pub const CUP_HEIGHT: f64 = 20.0;
pub const CUP_SPEED: f64 = 10.0;

// Fall speed (pixels per move tick) and its per-spawn growth factor
pub const INITIAL_DROPLET_SPEED: f64 = 5.0;
pub const DROPLET_ACCELERATION: f64 = 1.01;

// Spawn x is drawn from [SPAWN_MARGIN, width - SPAWN_MARGIN]
pub const SPAWN_MARGIN: u32 = 50;

// Droplet kinds: (size, points, speed multiplier)
pub const RARE_DROPLET_CHANCE: f64 = 0.05;
pub const COMMON_DROPLET_SIZE: f64 = 10.0;
pub const COMMON_DROPLET_POINTS: i64 = 10;
pub const RARE_DROPLET_SIZE: f64 = 20.0;
pub const RARE_DROPLET_POINTS: i64 = 50;
pub const RARE_SPEED_MULTIPLIER: f64 = 1.5;
pub const DANGER_DROPLET_SIZE: f64 = 30.0;
pub const DANGER_SPEED_MULTIPLIER: f64 = 2.0;

// Front end frame pacing
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS
pub const MAX_FRAME_DELTA_MS: u64 = 100;

// Terminals without key release events: a key counts as held this long after its last press
pub const KEY_HOLD_FALLBACK_MS: u64 = 250;
