use rand::Rng;

use crate::{constants::snow::*, scene::Point};

/// A single snowflake in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub glyph: char,
    /// Columns moved per frame.
    pub drift: f32,
    /// Frames left until `drift` is re-rolled.
    pub sway: i32,
    /// Set once the flake has hit the tree and started sliding.
    pub swept: bool,
    pub dark: bool,
}

impl Particle {
    pub fn new(x: f32, y: f32, glyph: char, drift: f32, sway: i32) -> Self {
        Self { x, y, glyph, drift, sway, swept: false, dark: false }
    }

    /// A flake at `(x, y)` with random glyph, drift, shade and a sway drawn from `sway`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, x: f32, y: f32, sway: (i32, i32)) -> Self {
        let glyph = FLAKE_GLYPHS[rng.gen_range(0..FLAKE_GLYPHS.len())];
        let drift = random_drift(rng);
        let sway = rng.gen_range(sway.0..=sway.1);
        let dark = glyph != '*' && rng.gen_bool(DARK_PROBABILITY);
        Self { dark, ..Self::new(x, y, glyph, drift, sway) }
    }

    pub fn cell(&self) -> Option<Point> {
        Point::truncate(self.x, self.y)
    }

    /// Switch to sliding along the surface that was just hit.
    pub fn sweep(&mut self) {
        self.glyph = '.';
        self.swept = true;
        self.dark = false;
    }

    /// Count down the sway timer, picking a new drift when it runs out.
    pub fn tick_sway<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.sway -= 1;
        if self.sway <= 0 {
            self.drift = random_drift(rng);
            self.sway = rng.gen_range(RESWAY.0..=RESWAY.1);
        }
    }
}

fn random_drift<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    DRIFTS[rng.gen_range(0..DRIFTS.len())]
}
