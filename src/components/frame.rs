use ratatui::style::{Modifier, Style};

use crate::{
    constants::{palette, CAPTION, CAPTION_GAP, RUN_HINT},
    scene::{Point, Scene},
    snow::{GroundSnow, Particle},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StyledGlyph {
    pub glyph: char,
    pub style: Style,
}

impl StyledGlyph {
    pub const fn new(glyph: char, style: Style) -> Self {
        Self { glyph, style }
    }

    const fn blank() -> Self {
        Self::new(' ', Style::new())
    }
}

/// The caption line drawn below the grid, indented by `padding` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub padding: u16,
    pub glyphs: Vec<StyledGlyph>,
}

/// One finished frame: a `width` x `height` grid plus an optional caption line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<StyledGlyph>,
    caption: Option<Caption>,
}

impl FrameBuffer {
    fn blank(width: u16, height: u16) -> Self {
        let cells = vec![StyledGlyph::blank(); usize::from(width) * usize::from(height)];
        Self { width, height, cells, caption: None }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Rows taken on screen, counting the gap and the caption line.
    pub fn display_height(&self) -> u16 {
        self.height.saturating_add(CAPTION_GAP + 1)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&StyledGlyph> {
        (x < self.width && y < self.height).then(|| &self.cells[self.index(x, y)])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[StyledGlyph]> {
        self.cells.chunks(usize::from(self.width.max(1))).take(usize::from(self.height))
    }

    pub fn row_text(&self, y: u16) -> String {
        (0..self.width).filter_map(|x| self.get(x, y)).map(|cell| cell.glyph).collect()
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    fn put(&mut self, point: Point, glyph: char, style: Style) {
        if point.x < self.width && point.y < self.height {
            let index = self.index(point.x, point.y);
            self.cells[index] = StyledGlyph::new(glyph, style);
        }
    }
}

/// Composite the scene, the snow and the frame-phased animations into a frame buffer.
///
/// Later layers win: ground, falling snow, tree, ornaments, star, then the hint on the bottom
/// row. Anything positioned off the canvas is skipped.
pub fn compose(
    width: u16,
    height: u16,
    scene: &Scene,
    particles: &[Particle],
    ground: &GroundSnow,
    frame: u64,
) -> FrameBuffer {
    let mut buffer = FrameBuffer::blank(width, height);

    let ground_y = scene.ground_y();
    if ground_y < height {
        for x in 0..width {
            let style = if ground.is_snowy(usize::from(x)) { palette::SNOW } else { palette::BARE_GROUND };
            buffer.put(Point::new(x, ground_y), '_', style);
        }
    }

    for particle in particles {
        if let Some(cell) = particle.cell() {
            let style = if particle.glyph != '*' && particle.dark { palette::DIM_SNOW } else { palette::SNOW };
            buffer.put(cell, particle.glyph, style);
        }
    }

    for (point, glyph) in scene.glyphs() {
        let style = if glyph.is_trunk() { palette::TRUNK } else { palette::BRANCH };
        buffer.put(*point, glyph.glyph(), style);
    }

    let tick = frame / palette::TWINKLE_PERIOD;
    for (index, ornament) in scene.ornaments().iter().enumerate() {
        let phase = tick + index as u64;
        let bauble = if phase % 2 == 0 { ornament.bauble.twinkle() } else { ornament.bauble };
        let color = palette::ORNAMENT_COLORS[(phase % palette::ORNAMENT_COLORS.len() as u64) as usize];
        buffer.put(ornament.pos, bauble.glyph(), Style::new().fg(color).add_modifier(Modifier::BOLD));
    }

    let blink = (frame / palette::STAR_BLINK_PERIOD % 2) as usize;
    buffer.put(scene.star(), palette::STAR_GLYPHS[blink], palette::STAR);

    if let Some(hint_y) = height.checked_sub(1) {
        for (x, glyph) in (0..width).zip(RUN_HINT.chars()) {
            buffer.put(Point::new(x, hint_y), glyph, palette::HINT);
        }
    }

    buffer.caption = caption(width, frame);
    buffer
}

/// The caption with a color wave rolling across it, or `None` when it cannot be centered.
fn caption(width: u16, frame: u64) -> Option<Caption> {
    let length = CAPTION.chars().count() as i64;
    let padding = (i64::from(width) - length).div_euclid(2);
    if padding <= 0 {
        return None;
    }

    let colors = &palette::CAPTION_COLORS;
    let wave = (frame / palette::CAPTION_FRAME_DIVISOR) as f64;
    let glyphs = CAPTION
        .chars()
        .enumerate()
        .map(|(index, glyph)| {
            let shade = (wave - index as f64 * palette::CAPTION_CHAR_LAG).rem_euclid(colors.len() as f64);
            let color = colors[(shade as usize).min(colors.len() - 1)];
            StyledGlyph::new(glyph, Style::new().fg(color).add_modifier(Modifier::BOLD))
        })
        .collect();

    Some(Caption { padding: padding as u16, glyphs })
}
