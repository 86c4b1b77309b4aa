use std::path::PathBuf;

use color_eyre::eyre::Result;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::{
    cli::Cli,
    constants::scene::{DEFAULT_FRAME_INTERVAL_MS, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH},
    simulation::{SceneSettings, SceneSettingsBuilder},
    utils::{get_config_dir, get_data_dir, PROJECT_NAME},
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: u16,
    pub height: u16,
    pub seed: u64,
    pub max_particles: Option<usize>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT, seed: DEFAULT_SEED, max_particles: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub frame_interval_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Embedded defaults, then the user's `config.yaml`, then `XMAS_TREE_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let user_config = config_dir.join("config.yaml");
        if !user_config.exists() {
            debug!("no user configuration at {}, using defaults", user_config.display());
        }

        let builder = defaults()
            .set_default("_data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("_config_dir", config_dir.to_string_lossy().as_ref())?
            .add_source(File::from(user_config).format(FileFormat::Yaml).required(false))
            .add_source(environment());

        builder.build()?.try_deserialize()
    }

    /// Command-line values win over everything else.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(width) = cli.width {
            self.scene.width = width;
        }
        if let Some(height) = cli.height {
            self.scene.height = height;
        }
        if let Some(seed) = cli.seed {
            self.scene.seed = seed;
        }
        if cli.max_particles.is_some() {
            self.scene.max_particles = cli.max_particles;
        }
        if let Some(interval) = cli.frame_interval {
            self.display.frame_interval_ms = interval;
        }
        self
    }

    pub fn scene_settings(&self) -> Result<SceneSettings> {
        let mut builder = SceneSettingsBuilder::default();
        builder.width(self.scene.width).height(self.scene.height).seed(self.scene.seed);
        if let Some(max_particles) = self.scene.max_particles {
            builder.max_particles(max_particles);
        }
        Ok(builder.build()?)
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    config::Config::builder().add_source(File::from_str(CONFIG, FileFormat::Yaml))
}

fn environment() -> Environment {
    Environment::with_prefix(PROJECT_NAME.as_str()).prefix_separator("_").separator("__").try_parsing(true)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load(env: &[(&str, &str)]) -> Config {
        let vars: config::Map<String, String> = env.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        defaults()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_embedded_defaults() {
        let config = load(&[]);
        assert_eq!(config.scene, SceneConfig::default());
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(
            config.scene_settings().unwrap(),
            SceneSettings { width: 80, height: 20, seed: 7, max_particles: 160 }
        );
    }

    #[test]
    fn test_environment_overrides() {
        let config = load(&[
            ("XMAS_TREE_SCENE__SEED", "3"),
            ("XMAS_TREE_SCENE__MAX_PARTICLES", "40"),
            ("XMAS_TREE_DISPLAY__FRAME_INTERVAL_MS", "50"),
        ]);
        assert_eq!(config.scene.seed, 3);
        assert_eq!(config.scene.width, 80);
        assert_eq!(config.scene.max_particles, Some(40));
        assert_eq!(config.display.frame_interval_ms, 50);
    }

    #[test]
    fn test_negative_size_is_rejected() {
        let vars: config::Map<String, String> =
            [("XMAS_TREE_SCENE__WIDTH".to_string(), "-4".to_string())].into_iter().collect();
        let result = defaults().add_source(environment().source(Some(vars))).build().unwrap().try_deserialize::<Config>();
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_wins() {
        let cli = Cli::parse_from(["xmas-tree", "--width", "40", "--seed", "9", "--frame-interval", "120"]);
        let config = load(&[("XMAS_TREE_SCENE__SEED", "3")]).with_cli(&cli);
        assert_eq!(config.scene, SceneConfig { width: 40, height: 20, seed: 9, max_particles: None });
        assert_eq!(config.display.frame_interval_ms, 120);
        assert_eq!(config.scene_settings().unwrap().max_particles, 80);
    }

    #[test]
    fn test_invalid_canvas_is_reported() {
        let cli = Cli::parse_from(["xmas-tree", "--height", "1"]);
        let err = load(&[]).with_cli(&cli).scene_settings().unwrap_err();
        assert!(err.to_string().contains("height"), "{err}");
    }
}
