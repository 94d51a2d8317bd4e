use crate::NoiseModule;
use crate::error::{Result, require_positive};
use crate::fractal::{
    FractalConfig, clamp_octave_count, fractal_sum, require_lacunarity, require_octave_factor,
};
use crate::noisegen::NoiseQuality;

// Smooth fractal gradient noise (fractal Brownian motion).
// Octaves are summed with amplitude persistence^i at frequency
// frequency * lacunarity^i, then divided by the summed amplitudes,
// so the result stays within [-1, +1].
pub struct Perlin {
    config: FractalConfig,
}

impl Perlin {
    pub const NAME: &'static str = "Perlin";

    pub fn new() -> Self {
        Self {
            config: FractalConfig::default(),
        }
    }

    pub fn from_config(config: FractalConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated(Self::NAME)?,
        })
    }

    // `config` must already have passed `FractalConfig::validated`
    pub(crate) fn from_validated(config: FractalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FractalConfig {
        &self.config
    }

    pub fn seed(&self) -> i32 {
        self.config.seed
    }

    pub fn set_seed(&mut self, seed: i32) {
        self.config.seed = seed;
    }

    pub fn frequency(&self) -> f64 {
        self.config.frequency
    }

    // Must be finite and positive
    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        self.config.frequency = require_positive(Self::NAME, "frequency", frequency)?;
        Ok(())
    }

    pub fn lacunarity(&self) -> f64 {
        self.config.lacunarity
    }

    // Must be finite and positive; values near 2.0 that are not exactly 2.0
    // keep octave lattices from lining up
    pub fn set_lacunarity(&mut self, lacunarity: f64) -> Result<()> {
        self.config.lacunarity = require_lacunarity(Self::NAME, lacunarity)?;
        Ok(())
    }

    pub fn persistence(&self) -> f64 {
        self.config.persistence
    }

    pub fn set_persistence(&mut self, persistence: f64) -> Result<()> {
        self.config.persistence = require_octave_factor(Self::NAME, "persistence", persistence)?;
        Ok(())
    }

    pub fn octave_count(&self) -> f64 {
        self.config.octave_count
    }

    // Below 1 is an error; above MAX_OCTAVE clamps
    pub fn set_octave_count(&mut self, count: f64) -> Result<()> {
        self.config.octave_count = clamp_octave_count(Self::NAME, count)?;
        Ok(())
    }

    pub fn noise_quality(&self) -> NoiseQuality {
        self.config.quality
    }

    pub fn set_noise_quality(&mut self, quality: NoiseQuality) {
        self.config.quality = quality;
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Perlin {
    fn source_module_count(&self) -> usize {
        0
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        Ok(fractal_sum(&self.config, x, y, z, |n| n))
    }
}
