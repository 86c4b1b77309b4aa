use ratatui::style::{Color, Modifier, Style};

pub const SNOW: Style = Style::new().fg(Color::White);
pub const DIM_SNOW: Style = Style::new().fg(Color::White).add_modifier(Modifier::DIM);
pub const BARE_GROUND: Style = DIM_SNOW;
pub const HINT: Style = DIM_SNOW;
pub const BRANCH: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
pub const TRUNK: Style = Style::new().fg(Color::Rgb(102, 56, 21)).add_modifier(Modifier::BOLD);
pub const STAR: Style = Style::new().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD);

pub const ORNAMENT_COLORS: [Color; 8] = [
    Color::Red,
    Color::Yellow,
    Color::Blue,
    Color::Cyan,
    Color::Magenta,
    Color::LightYellow,
    Color::LightRed,
    Color::White,
];

pub const CAPTION_COLORS: [Color; 12] = [
    Color::Rgb(0xD4, 0xAF, 0x37),
    Color::Rgb(0xE5, 0xC1, 0x58),
    Color::Rgb(0xF1, 0xD2, 0x79),
    Color::Rgb(0xFB, 0xE3, 0x9A),
    Color::Rgb(0xFF, 0xFF, 0xFF),
    Color::Rgb(0xFB, 0xE3, 0x9A),
    Color::Rgb(0xF1, 0xD2, 0x79),
    Color::Rgb(0xE5, 0xC1, 0x58),
    Color::Rgb(0xD4, 0xAF, 0x37),
    Color::Rgb(0xB8, 0x86, 0x0B),
    Color::Rgb(0x8B, 0x65, 0x08),
    Color::Rgb(0xB8, 0x86, 0x0B),
];

/// Frames per ornament twinkle/color step.
pub const TWINKLE_PERIOD: u64 = 8;
/// Frames per star blink half-period.
pub const STAR_BLINK_PERIOD: u64 = 12;
pub const STAR_GLYPHS: [char; 2] = ['*', '+'];
/// Caption wave: palette step per frame divisor and per-character phase lag.
pub const CAPTION_FRAME_DIVISOR: u64 = 2;
pub const CAPTION_CHAR_LAG: f64 = 0.6;
