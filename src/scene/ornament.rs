use std::collections::BTreeMap;

use rand::{seq::SliceRandom, Rng};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::{constants::scene::*, scene::Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum Bauble {
    #[strum(to_string = "o")]
    Bead,
    #[strum(to_string = "O")]
    Ball,
    #[strum(to_string = "@")]
    Swirl,
    #[strum(to_string = "*")]
    Spark,
    #[strum(to_string = "+")]
    Cross,
    #[strum(to_string = "x")]
    Saltire,
    #[strum(to_string = "§")]
    Ribbon,
}

impl Bauble {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::iter().nth(rng.gen_range(0..Self::COUNT)).unwrap_or(Bauble::Bead)
    }

    pub const fn glyph(self) -> char {
        match self {
            Bauble::Bead => 'o',
            Bauble::Ball => 'O',
            Bauble::Swirl => '@',
            Bauble::Spark => '*',
            Bauble::Cross => '+',
            Bauble::Saltire => 'x',
            Bauble::Ribbon => '§',
        }
    }

    /// The glyph shown on the other half of a twinkle.
    pub const fn twinkle(self) -> Self {
        match self {
            Bauble::Bead => Bauble::Ball,
            Bauble::Ball => Bauble::Bead,
            Bauble::Swirl => Bauble::Spark,
            Bauble::Spark => Bauble::Swirl,
            Bauble::Saltire => Bauble::Cross,
            Bauble::Cross => Bauble::Saltire,
            Bauble::Ribbon => Bauble::Ribbon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ornament {
    pub pos: Point,
    pub bauble: Bauble,
}

impl Ornament {
    pub const fn new(pos: Point, bauble: Bauble) -> Self {
        Self { pos, bauble }
    }
}

/// Choose ornament positions among the leaf cells.
///
/// Each row gets a quota proportional to its share of leaves and is filled greedily from a
/// shuffled order. A second shuffled pass over all leaves tops up any shortfall. Both passes
/// reject cells too close to an ornament already placed.
pub fn place_ornaments<R: Rng + ?Sized>(leaves: &[Point], tree_height: usize, rng: &mut R) -> Vec<Ornament> {
    let target = leaves.len().min(MIN_ORNAMENTS.max(tree_height * ORNAMENTS_PER_ROW));
    let mut placed: Vec<Ornament> = Vec::with_capacity(target);

    let mut rows: BTreeMap<u16, Vec<u16>> = BTreeMap::new();
    for leaf in leaves {
        rows.entry(leaf.y).or_default().push(leaf.x);
    }

    for (y, mut row) in rows {
        let share = row.len() as f64 / leaves.len() as f64;
        let quota = ((share * target as f64 * ROW_QUOTA_BOOST) as usize).max(1);

        row.shuffle(rng);
        let mut placed_in_row = 0;
        for x in row {
            if placed.len() >= target || placed_in_row >= quota {
                break;
            }
            let pos = Point::new(x, y);
            if well_spaced(&placed, pos) {
                placed.push(Ornament::new(pos, Bauble::random(rng)));
                placed_in_row += 1;
            }
        }
    }

    if placed.len() < target {
        let mut pool = leaves.to_vec();
        pool.shuffle(rng);
        for pos in pool {
            if placed.len() >= target {
                break;
            }
            if well_spaced(&placed, pos) {
                placed.push(Ornament::new(pos, Bauble::random(rng)));
            }
        }
    }

    placed
}

fn well_spaced(placed: &[Ornament], pos: Point) -> bool {
    placed.iter().all(|ornament| {
        let dx = ornament.pos.x.abs_diff(pos.x) as usize;
        let dy = ornament.pos.y.abs_diff(pos.y) as usize;
        let crowds_row = dy == 0 && dx < ORNAMENT_MIN_ROW_GAP;
        !crowds_row && dx + dy >= ORNAMENT_MIN_DISTANCE
    })
}
