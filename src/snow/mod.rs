mod ground;
mod particle;

use rand::Rng;
use tracing::debug;

pub use crate::snow::{ground::GroundSnow, particle::Particle};
use crate::{
    constants::snow::*,
    scene::{Point, Scene, TreeGlyph},
};

/// What happened to a flake during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fate {
    Falling,
    Landed(Option<usize>),
    Gone,
}

/// Live snowflakes plus the snow settled on the ground.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    ground: GroundSnow,
    max_particles: usize,
}

impl ParticleField {
    pub fn new(width: u16, max_particles: usize) -> Self {
        Self { particles: Vec::with_capacity(max_particles), ground: GroundSnow::new(width), max_particles }
    }

    pub fn with_particles(self, particles: Vec<Particle>) -> Self {
        Self { particles, ..self }
    }

    pub fn with_ground(self, ground: GroundSnow) -> Self {
        Self { ground, ..self }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn ground(&self) -> &GroundSnow {
        &self.ground
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Fill half the particle budget with flakes at random open cells above the ground.
    pub fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R, scene: &Scene) {
        let wanted = self.max_particles / 2;
        let max_attempts = wanted * SCATTER_ATTEMPTS_PER_FLAKE;
        let span_x = f32::from(scene.width().saturating_sub(1));
        let span_y = f32::from(scene.ground_y());

        let mut attempts = 0;
        while self.particles.len() < wanted && attempts < max_attempts {
            attempts += 1;
            let x = rng.gen::<f32>() * span_x;
            let y = rng.gen::<f32>() * span_y;
            if Point::truncate(x, y).is_some_and(|cell| scene.is_solid(cell)) {
                continue;
            }
            self.particles.push(Particle::random(rng, x, y, SCATTER_SWAY));
        }
        debug!(particles = self.particles.len(), attempts, "scattered initial snow");
    }

    /// Drop a few new flakes in along the top row, never exceeding the particle budget.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, width: u16) {
        if width == 0 || self.particles.len() >= self.max_particles {
            return;
        }
        let slots = usize::from(width / SPAWN_COLUMNS_PER_FLAKE).max(MIN_SPAWN);
        let count = rng.gen_range(0..=slots).min(self.max_particles - self.particles.len());
        for _ in 0..count {
            let x = f32::from(rng.gen_range(0..width));
            self.particles.push(Particle::random(rng, x, 0.0, SPAWN_SWAY));
        }
    }

    /// Advance every flake by one frame. Flakes that leave the canvas sideways are dropped and
    /// flakes that reach the ground are turned into ground snow.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, width: u16, scene: &Scene) {
        let mut survivors = Vec::with_capacity(self.particles.len());
        for mut particle in std::mem::take(&mut self.particles) {
            match advance(&mut particle, rng, f32::from(width), scene) {
                Fate::Falling => survivors.push(particle),
                Fate::Landed(column) => {
                    let life = rng.gen_range(GROUND_LIFE.0..=GROUND_LIFE.1);
                    if let Some(column) = column {
                        self.ground.settle(column, life);
                    }
                },
                Fate::Gone => {},
            }
        }
        self.particles = survivors;
    }

    pub fn decay(&mut self) {
        self.ground.decay();
    }
}

fn advance<R: Rng + ?Sized>(particle: &mut Particle, rng: &mut R, width: f32, scene: &Scene) -> Fate {
    particle.tick_sway(rng);

    if particle.x < 0.0 || particle.x >= width {
        return Fate::Gone;
    }

    let mut next_x = particle.x + particle.drift;
    let mut next_y = particle.y + FALL_SPEED;

    if let Some(hit) = Point::truncate(next_x, next_y).filter(|cell| scene.is_solid(*cell)) {
        particle.sweep();
        let dx = slide_direction(scene, hit);
        let slide_y = particle.y + SLIDE_SPEED;
        let open = |x: f32| x >= 0.0 && x < width && Point::truncate(x, slide_y).is_some_and(|c| !scene.is_solid(c));
        // Blocked on all sides: sink straight down and overlap the tree for a frame.
        (next_x, next_y) = [dx, -dx, 0.0]
            .into_iter()
            .map(|offset| next_x + offset)
            .find(|x| open(*x))
            .map_or((next_x, slide_y), |x| (x, slide_y));
    }

    particle.x = next_x;
    particle.y = next_y;

    if particle.y >= f32::from(scene.ground_y()) {
        let column = (particle.x >= 0.0 && particle.x < width).then_some(particle.x as usize);
        return Fate::Landed(column);
    }
    Fate::Falling
}

fn slide_direction(scene: &Scene, hit: Point) -> f32 {
    match scene.glyph_at(hit) {
        Some(TreeGlyph::LeftBranch) => -SLIDE_DRIFT,
        Some(TreeGlyph::RightBranch) => SLIDE_DRIFT,
        _ if hit.x < scene.center_x() => -SLIDE_DRIFT,
        _ => SLIDE_DRIFT,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn scene_with(glyphs: &[(u16, u16, TreeGlyph)]) -> Scene {
        let glyphs: BTreeMap<Point, TreeGlyph> =
            glyphs.iter().map(|(x, y, glyph)| (Point::new(*x, *y), *glyph)).collect();
        Scene::from_parts(10, 10, 8, 5, glyphs, vec![], Point::new(9, 0))
    }

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(x, y, '.', 0.0, 1000)
    }

    fn step(field: &mut ParticleField, scene: &Scene) {
        field.update(&mut StdRng::seed_from_u64(0), scene.width(), scene);
    }

    fn assert_near(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-4, "{actual} != {expected}");
    }

    #[test]
    fn test_flake_lands_in_clear_column() {
        let mut rng = StdRng::seed_from_u64(7);
        let scene = Scene::generate(40, 20, &mut rng);
        let mut field = ParticleField::new(40, 80).with_particles(vec![still(5.0, 0.0)]);
        for _ in 0..100 {
            field.update(&mut rng, 40, &scene);
        }
        assert!(field.particles().is_empty());
        assert!(field.ground()[5] > 0);
        assert!((6..=12).contains(&field.ground()[5]));
    }

    #[test]
    fn test_free_fall_with_drift() {
        let scene = scene_with(&[]);
        let mut field = ParticleField::new(10, 4).with_particles(vec![Particle::new(2.0, 1.0, '*', 0.5, 1000)]);
        step(&mut field, &scene);
        let flake = &field.particles()[0];
        assert_near(flake.x, 2.5);
        assert_near(flake.y, 1.25);
        assert_eq!(flake.glyph, '*');
        assert!(!flake.swept);
    }

    #[test]
    fn test_left_branch_pushes_left() {
        let scene = scene_with(&[(3, 5, TreeGlyph::LeftBranch)]);
        let dark = Particle { dark: true, ..Particle::new(3.5, 4.8, '.', 0.0, 1000) };
        let mut field = ParticleField::new(10, 4).with_particles(vec![dark]);
        step(&mut field, &scene);
        let flake = &field.particles()[0];
        assert!(flake.swept);
        assert!(!flake.dark);
        assert_eq!(flake.glyph, '.');
        assert_near(flake.x, 2.9);
        assert_near(flake.y, 5.3);
    }

    #[test]
    fn test_right_branch_pushes_right() {
        let scene = scene_with(&[(3, 5, TreeGlyph::RightBranch)]);
        let mut field = ParticleField::new(10, 4).with_particles(vec![Particle::new(3.5, 4.8, '*', 0.0, 1000)]);
        step(&mut field, &scene);
        let flake = &field.particles()[0];
        assert!(flake.swept);
        assert_eq!(flake.glyph, '.');
        assert_near(flake.x, 4.1);
        assert_near(flake.y, 5.3);
    }

    #[test]
    fn test_other_surfaces_push_away_from_center() {
        let scene = scene_with(&[(3, 5, TreeGlyph::Needle), (7, 5, TreeGlyph::Needle)]);
        let mut field =
            ParticleField::new(10, 4).with_particles(vec![still(3.5, 4.8), still(7.5, 4.8)]);
        step(&mut field, &scene);
        assert_near(field.particles()[0].x, 2.9);
        assert_near(field.particles()[1].x, 8.1);
    }

    #[test]
    fn test_slide_tries_opposite_side() {
        let scene = scene_with(&[(2, 5, TreeGlyph::Needle), (3, 5, TreeGlyph::LeftBranch)]);
        let mut field = ParticleField::new(10, 4).with_particles(vec![still(3.5, 4.8)]);
        step(&mut field, &scene);
        assert_near(field.particles()[0].x, 4.1);
        assert_near(field.particles()[0].y, 5.3);
    }

    #[test]
    fn test_blocked_slide_sinks_into_tree() {
        let scene =
            scene_with(&[(2, 5, TreeGlyph::Needle), (3, 5, TreeGlyph::Needle), (4, 5, TreeGlyph::Needle)]);
        let mut field = ParticleField::new(10, 4).with_particles(vec![still(3.5, 4.8)]);
        step(&mut field, &scene);
        let flake = &field.particles()[0];
        assert!(flake.swept);
        assert_near(flake.x, 3.5);
        assert_near(flake.y, 5.3);
        assert!(scene.is_solid(flake.cell().unwrap()));
    }

    #[test]
    fn test_slide_stays_on_canvas() {
        let scene = scene_with(&[(0, 5, TreeGlyph::LeftBranch), (1, 5, TreeGlyph::Needle)]);
        let mut field = ParticleField::new(10, 4).with_particles(vec![still(0.2, 4.8)]);
        step(&mut field, &scene);
        assert_near(field.particles()[0].x, 0.2);
        assert_near(field.particles()[0].y, 5.3);
    }

    #[test]
    fn test_flakes_leaving_sideways_are_dropped() {
        let scene = scene_with(&[]);
        let mut field = ParticleField::new(10, 4).with_particles(vec![still(-0.5, 2.0), still(10.0, 2.0)]);
        step(&mut field, &scene);
        assert!(field.particles().is_empty());
        assert_eq!(*field.ground(), GroundSnow::new(10));
    }

    #[test]
    fn test_landing_keeps_deeper_snow() {
        let scene = scene_with(&[]);
        let mut ground = GroundSnow::new(10);
        ground[5] = 50;
        let mut field =
            ParticleField::new(10, 4).with_ground(ground).with_particles(vec![still(5.0, 7.9), still(6.0, 7.9)]);
        step(&mut field, &scene);
        assert!(field.particles().is_empty());
        assert_eq!(field.ground()[5], 50);
        assert!((6..=12).contains(&field.ground()[6]));
    }

    #[test]
    fn test_spawn_respects_budget() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::new(80, 10);
        for _ in 0..200 {
            field.spawn(&mut rng, 80);
            assert!(field.particles().len() <= 10);
        }
        assert_eq!(field.particles().len(), 10);
    }

    #[test]
    fn test_spawn_on_top_row() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = ParticleField::new(80, 1000);
        for _ in 0..50 {
            field.spawn(&mut rng, 80);
        }
        assert!(!field.particles().is_empty());
        for flake in field.particles() {
            assert_eq!(flake.y, 0.0);
            assert!(flake.x >= 0.0 && flake.x < 80.0);
            assert_eq!(flake.x.fract(), 0.0);
            assert!((2..=5).contains(&flake.sway));
        }
    }

    #[test]
    fn test_spawn_is_noop_when_full_or_empty_canvas() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = ParticleField::new(80, 1).with_particles(vec![still(1.0, 1.0)]);
        field.spawn(&mut rng, 80);
        assert_eq!(field.particles().len(), 1);

        let mut field = ParticleField::new(0, 10);
        field.spawn(&mut rng, 0);
        assert!(field.particles().is_empty());
    }

    #[test]
    fn test_scatter_avoids_solid() {
        let mut rng = StdRng::seed_from_u64(7);
        let scene = Scene::generate(80, 20, &mut rng);
        let mut field = ParticleField::new(80, 160);
        field.scatter(&mut rng, &scene);
        assert_eq!(field.particles().len(), 80);
        for flake in field.particles() {
            assert!(!scene.is_solid(flake.cell().unwrap()));
            assert!(flake.y < 18.0);
            assert!((1..=15).contains(&flake.sway));
        }
    }

    #[test]
    fn test_invariants_over_many_frames() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = Scene::generate(80, 20, &mut rng);
        let mut field = ParticleField::new(80, 160);
        field.scatter(&mut rng, &scene);

        for _ in 0..400 {
            field.spawn(&mut rng, 80);
            assert!(field.particles().len() <= field.max_particles());

            let before = field.ground().clone();
            field.update(&mut rng, 80, &scene);
            for (after, before) in field.ground().iter().zip(before.iter()) {
                assert!(after >= before);
            }
            for flake in field.particles().iter().filter(|flake| !flake.swept) {
                if let Some(cell) = flake.cell() {
                    assert!(!scene.is_solid(cell), "free-falling flake inside the tree at {cell:?}");
                }
            }

            let before = field.ground().clone();
            field.decay();
            for (after, before) in field.ground().iter().zip(before.iter()) {
                assert_eq!(*after, before.saturating_sub(1));
            }
        }
        assert!(field.ground().iter().any(|life| *life > 0));
    }
}
