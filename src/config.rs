//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`LORENZ_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use lorenz_core::{Bounds3, GridSpec, LorenzParams, Vec3};
use lorenz_mesh::ExtractorConfig;

use crate::pipeline::{IsoSurfaceParams, StartState};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Lorenz coefficients
    #[serde(default)]
    pub attractor: AttractorConfig,
    /// Integration step, length and starting point
    #[serde(default)]
    pub integration: IntegrationConfig,
    /// Voxel grid resolution and bounds
    #[serde(default)]
    pub volume: VolumeConfig,
    /// Iso-surface extraction
    #[serde(default)]
    pub contour: ContourConfig,
    /// Mesh output
    #[serde(default)]
    pub output: OutputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`LORENZ_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // LORENZ_VOLUME__RESOLUTION=100 -> volume.resolution = 100
        figment = figment.merge(Env::prefixed("LORENZ_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Bundle everything the pipeline needs
    pub fn to_iso_surface_params(&self) -> IsoSurfaceParams {
        IsoSurfaceParams {
            lorenz: self.attractor.to_params(),
            step_size: self.integration.step_size,
            iterations: self.integration.iterations,
            start: self.integration.start_state(),
            grid: self.volume.to_grid_spec(),
            contour: self.contour.to_extractor_config(),
        }
    }
}

/// Lorenz coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractorConfig {
    /// Prandtl number (Pr)
    pub prandtl: f64,
    /// Geometric factor (b)
    pub beta: f64,
    /// Rayleigh number (r)
    pub rayleigh: f64,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        let params = LorenzParams::default();
        Self {
            prandtl: params.prandtl,
            beta: params.beta,
            rayleigh: params.rayleigh,
        }
    }
}

impl AttractorConfig {
    /// Convert to the integrator's parameter type
    pub fn to_params(&self) -> LorenzParams {
        LorenzParams::new(self.prandtl, self.rayleigh, self.beta)
    }
}

/// Integration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Euler step size (h)
    pub step_size: f64,
    /// Number of steps to integrate
    pub iterations: u64,
    /// Seed for the random starting point (unset = fresh entropy each run)
    pub seed: Option<u64>,
    /// Explicit starting point [x, y, z]; overrides the random start
    pub start: Option<[f64; 3]>,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            step_size: 0.01,
            iterations: 10_000_000,
            seed: None,
            start: None,
        }
    }
}

impl IntegrationConfig {
    /// How the initial state is chosen
    pub fn start_state(&self) -> StartState {
        match self.start {
            Some(p) => StartState::Fixed(Vec3::from_array(p)),
            None => StartState::Random { seed: self.seed },
        }
    }
}

/// Voxel grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Cells per axis
    pub resolution: usize,
    /// x range [min, max]
    pub x_range: [f64; 2],
    /// y range [min, max]
    pub y_range: [f64; 2],
    /// z range [min, max]
    pub z_range: [f64; 2],
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            resolution: 200,
            x_range: [-30.0, 30.0],
            y_range: [-30.0, 30.0],
            z_range: [-10.0, 60.0],
        }
    }
}

impl VolumeConfig {
    /// Spatial bounds of the grid
    pub fn bounds(&self) -> Bounds3 {
        Bounds3::from_ranges(self.x_range, self.y_range, self.z_range)
    }

    /// Convert to the accumulator's grid spec
    pub fn to_grid_spec(&self) -> GridSpec {
        GridSpec::new(self.resolution, self.bounds())
    }
}

/// Iso-surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Visit count of the extracted level set
    pub threshold: f64,
    /// Compute vertex normals from the density gradient
    pub compute_normals: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            compute_normals: true,
        }
    }
}

impl ContourConfig {
    /// Convert to the extractor's configuration
    pub fn to_extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            threshold: self.threshold,
            compute_normals: self.compute_normals,
        }
    }
}

/// Mesh file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    /// Wavefront OBJ
    Obj,
    /// RON dump of the mesh struct
    Ron,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the mesh
    pub path: PathBuf,
    /// File format
    pub format: MeshFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lorenz_attractor.obj"),
            format: MeshFormat::Obj,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
