pub const FLAKE_GLYPHS: [char; 4] = ['.', '.', '.', '*'];
pub const DRIFTS: [f32; 3] = [-0.5, 0.0, 0.5];
pub const DARK_PROBABILITY: f64 = 0.22;

pub const FALL_SPEED: f32 = 0.25;
pub const SLIDE_SPEED: f32 = 0.5;
pub const SLIDE_DRIFT: f32 = 0.6;

pub const SPAWN_SWAY: (i32, i32) = (2, 5);
pub const SCATTER_SWAY: (i32, i32) = (1, 15);
pub const RESWAY: (i32, i32) = (6, 15);
pub const GROUND_LIFE: (u32, u32) = (6, 12);

/// One spawn slot for every this many columns.
pub const SPAWN_COLUMNS_PER_FLAKE: u16 = 25;
pub const MIN_SPAWN: usize = 2;
pub const SCATTER_ATTEMPTS_PER_FLAKE: usize = 10;
