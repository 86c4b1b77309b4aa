use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::{
    components::frame::{FrameBuffer, StyledGlyph},
    constants::CAPTION_GAP,
};

/// Paints a composed [`FrameBuffer`] at the top-left of the area, clipping whatever does not fit.
#[derive(Debug)]
pub struct SceneView<'a> {
    frame: &'a FrameBuffer,
}

impl<'a> SceneView<'a> {
    pub fn new(frame: &'a FrameBuffer) -> Self {
        Self { frame }
    }

    fn paint(area: Rect, buf: &mut Buffer, x: u16, y: u16, cell: &StyledGlyph) {
        let (Some(x), Some(y)) = (area.x.checked_add(x), area.y.checked_add(y)) else {
            return;
        };
        if x >= area.right() || y >= area.bottom() {
            return;
        }
        if let Some(target) = buf.cell_mut((x, y)) {
            target.set_char(cell.glyph).set_style(cell.style);
        }
    }
}

impl Widget for SceneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        for (y, row) in (0..self.frame.height()).zip(self.frame.rows()) {
            for (x, cell) in (0..self.frame.width()).zip(row) {
                Self::paint(area, buf, x, y, cell);
            }
        }

        if let Some(caption) = self.frame.caption() {
            let y = self.frame.height().saturating_add(CAPTION_GAP);
            for (offset, cell) in (0..u16::MAX).zip(&caption.glyphs) {
                Self::paint(area, buf, caption.padding.saturating_add(offset), y, cell);
            }
        }
    }
}
