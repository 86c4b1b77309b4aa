pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 20;
pub const DEFAULT_SEED: u64 = 7;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 80;

/// Ground row plus the hint row beneath it.
pub const MIN_HEIGHT: u16 = 2;

pub const MAX_TREE_HEIGHT: usize = 15;
pub const MIN_TREE_HEIGHT: usize = 4;
pub const TRUNK_ALLOWANCE: usize = 4;
pub const MIN_TRUNK_HEIGHT: usize = 2;
pub const MIN_TRUNK_WIDTH: usize = 3;

pub const MIN_ORNAMENTS: usize = 12;
pub const ORNAMENTS_PER_ROW: usize = 2;
pub const ROW_QUOTA_BOOST: f64 = 1.2;
pub const ORNAMENT_MIN_DISTANCE: usize = 2;
pub const ORNAMENT_MIN_ROW_GAP: usize = 3;
