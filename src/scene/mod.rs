mod ornament;

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use strum::Display;
use tracing::debug;

pub use crate::scene::ornament::{place_ornaments, Bauble, Ornament};
use crate::constants::scene::*;

/// A cell on the canvas grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    const fn at(x: usize, y: usize) -> Self {
        Self { x: x as u16, y: y as u16 }
    }

    /// The cell a continuous position falls in, or `None` left of or above the canvas.
    pub fn truncate(x: f32, y: f32) -> Option<Self> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        Some(Self { x: x as u16, y: y as u16 })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TreeGlyph {
    #[strum(to_string = "^")]
    Apex,
    #[strum(to_string = "^")]
    Needle,
    #[strum(to_string = "/")]
    LeftBranch,
    #[strum(to_string = "\\")]
    RightBranch,
    #[strum(to_string = "|")]
    Trunk,
}

impl TreeGlyph {
    pub const fn glyph(self) -> char {
        match self {
            TreeGlyph::Apex | TreeGlyph::Needle => '^',
            TreeGlyph::LeftBranch => '/',
            TreeGlyph::RightBranch => '\\',
            TreeGlyph::Trunk => '|',
        }
    }

    pub const fn is_trunk(self) -> bool {
        matches!(self, TreeGlyph::Trunk)
    }
}

/// Static tree geometry for one canvas size. Built once, then shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    width: u16,
    height: u16,
    ground_y: u16,
    center_x: u16,
    tree_height: usize,
    glyphs: BTreeMap<Point, TreeGlyph>,
    ornaments: Vec<Ornament>,
    star: Point,
    solid: BTreeSet<Point>,
}

impl Scene {
    /// Lay out the tree, trunk, ornaments and star for a `width` x `height` canvas.
    ///
    /// Deterministic for a given RNG state. Canvases too small for the full tree get a truncated
    /// tree instead of an error.
    pub fn generate<R: Rng + ?Sized>(width: u16, height: u16, rng: &mut R) -> Self {
        let canvas_width = width as usize;
        let canvas_height = height as usize;
        let ground_y = canvas_height.saturating_sub(2);
        let max_by_width = (canvas_width.saturating_sub(1) / 2).max(1);
        let available = ground_y.max(MIN_TREE_HEIGHT);

        let (tree_height, trunk_height) = fit_tree(max_by_width, available);
        let top_y = ground_y.saturating_sub(tree_height + trunk_height);
        let mut trunk_width = (tree_height / 5).max(MIN_TRUNK_WIDTH);
        if trunk_width % 2 == 0 {
            trunk_width += 1;
        }
        let center_x = canvas_width / 2;

        let mut glyphs = BTreeMap::new();
        let mut leaves = Vec::new();
        for r in 0..tree_height {
            let y = top_y + r;
            if r > center_x || center_x + r >= canvas_width || y >= canvas_height {
                break;
            }
            let (left, right) = (center_x - r, center_x + r);
            if r == 0 {
                glyphs.insert(Point::at(center_x, y), TreeGlyph::Apex);
                continue;
            }
            glyphs.insert(Point::at(left, y), TreeGlyph::LeftBranch);
            glyphs.insert(Point::at(right, y), TreeGlyph::RightBranch);
            for x in left + 1..right {
                glyphs.insert(Point::at(x, y), TreeGlyph::Needle);
                leaves.push(Point::at(x, y));
            }
        }

        let trunk_top = top_y + tree_height;
        let trunk_left = center_x.saturating_sub(trunk_width / 2);
        let trunk_right = center_x + trunk_width / 2;
        for y in trunk_top..(trunk_top + trunk_height).min(ground_y) {
            for x in (trunk_left..=trunk_right).filter(|x| *x < canvas_width) {
                glyphs.insert(Point::at(x, y), TreeGlyph::Trunk);
            }
        }

        let star = Point::at(center_x, top_y.saturating_sub(1));
        let ornaments = place_ornaments(&leaves, tree_height, rng);

        let scene = Self::from_parts(width, height, ground_y as u16, center_x as u16, glyphs, ornaments, star)
            .with_tree_height(tree_height);
        debug!(
            width,
            height,
            tree_height,
            trunk_height,
            trunk_width,
            ornaments = scene.ornaments.len(),
            solid = scene.solid.len(),
            "generated scene"
        );
        scene
    }

    /// Assemble a scene from finished geometry. The collision set is derived here and never
    /// changes afterwards.
    pub fn from_parts(
        width: u16,
        height: u16,
        ground_y: u16,
        center_x: u16,
        glyphs: BTreeMap<Point, TreeGlyph>,
        ornaments: Vec<Ornament>,
        star: Point,
    ) -> Self {
        let solid = glyphs
            .keys()
            .copied()
            .chain(ornaments.iter().map(|ornament| ornament.pos))
            .chain(std::iter::once(star))
            .collect();
        Self { width, height, ground_y, center_x, tree_height: 0, glyphs, ornaments, star, solid }
    }

    fn with_tree_height(self, tree_height: usize) -> Self {
        Self { tree_height, ..self }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn ground_y(&self) -> u16 {
        self.ground_y
    }

    pub fn center_x(&self) -> u16 {
        self.center_x
    }

    pub fn tree_height(&self) -> usize {
        self.tree_height
    }

    pub fn glyphs(&self) -> &BTreeMap<Point, TreeGlyph> {
        &self.glyphs
    }

    pub fn glyph_at(&self, point: Point) -> Option<TreeGlyph> {
        self.glyphs.get(&point).copied()
    }

    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    pub fn star(&self) -> Point {
        self.star
    }

    pub fn solid(&self) -> &BTreeSet<Point> {
        &self.solid
    }

    pub fn is_solid(&self, point: Point) -> bool {
        self.solid.contains(&point)
    }
}

/// Pick tree and trunk heights that fit in `available` rows, shrinking the tree down to
/// `MIN_TREE_HEIGHT` at most.
fn fit_tree(max_by_width: usize, available: usize) -> (usize, usize) {
    let mut tree_height = MAX_TREE_HEIGHT
        .min(max_by_width)
        .min(available.saturating_sub(TRUNK_ALLOWANCE).max(MIN_TREE_HEIGHT));
    loop {
        let trunk_height = (tree_height / 6).max(MIN_TRUNK_HEIGHT);
        if tree_height + trunk_height <= available {
            return (tree_height, trunk_height);
        }
        let shrunk = available.saturating_sub(trunk_height).max(MIN_TREE_HEIGHT);
        if shrunk >= tree_height {
            return (tree_height, trunk_height);
        }
        tree_height = shrunk;
    }
}
