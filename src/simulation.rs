use derive_builder::Builder;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, trace};

use crate::{
    components::{compose, FrameBuffer},
    constants::scene::{DEFAULT_SEED, MIN_HEIGHT},
    scene::Scene,
    snow::ParticleField,
};

/// Validated parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SceneSettings {
    pub width: u16,
    pub height: u16,
    #[builder(default = "DEFAULT_SEED")]
    pub seed: u64,
    /// Defaults to two flakes per column.
    #[builder(default = "self.default_max_particles()")]
    pub max_particles: usize,
}

impl SceneSettingsBuilder {
    fn default_max_particles(&self) -> usize {
        self.width.map_or(0, |width| usize::from(width) * 2)
    }

    fn validate(&self) -> Result<(), String> {
        if self.width == Some(0) {
            return Err("invalid canvas: width must be at least 1 column".to_string());
        }
        match self.height {
            Some(height) if height < MIN_HEIGHT => Err(format!(
                "invalid canvas: height must be at least {MIN_HEIGHT} rows to fit the ground line, got {height}"
            )),
            _ => Ok(()),
        }
    }
}

/// Everything that changes from frame to frame, threaded through one value.
#[derive(Debug)]
pub struct Simulation {
    settings: SceneSettings,
    scene: Scene,
    field: ParticleField,
    rng: StdRng,
    frame: u64,
}

impl Simulation {
    pub fn new(settings: SceneSettings) -> Self {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        let scene = Scene::generate(settings.width, settings.height, &mut rng);
        let mut field = ParticleField::new(settings.width, settings.max_particles);
        field.scatter(&mut rng, &scene);
        debug!(?settings, particles = field.particles().len(), "simulation ready");
        Self { settings, scene, field, rng, frame: 0 }
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Spawn, move and decay the snow by one frame.
    pub fn step(&mut self) {
        let width = self.settings.width;
        self.field.spawn(&mut self.rng, width);
        self.field.update(&mut self.rng, width, &self.scene);
        self.field.decay();
    }

    pub fn compose(&self) -> FrameBuffer {
        compose(
            self.settings.width,
            self.settings.height,
            &self.scene,
            self.field.particles(),
            self.field.ground(),
            self.frame,
        )
    }

    /// Step the snow, render the result and advance the frame counter.
    pub fn next_frame(&mut self) -> FrameBuffer {
        self.step();
        let buffer = self.compose();
        trace!(
            frame = self.frame,
            particles = self.field.particles().len(),
            snowy = self.field.ground().iter().filter(|life| **life > 0).count(),
            "frame"
        );
        self.frame += 1;
        buffer
    }
}
