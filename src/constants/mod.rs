pub mod palette;
pub mod scene;
pub mod snow;

pub const CAPTION: &str = "★ MERRY CHRISTMAS & HAPPY NEW YEAR ★";
pub const RUN_HINT: &str = " $ cargo run --release";

/// Blank rows between the bottom of the grid and the caption.
pub const CAPTION_GAP: u16 = 1;
