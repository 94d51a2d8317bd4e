use serde::{Deserialize, Serialize};

use crate::NoiseModule;
use crate::error::{Result, require_finite, require_positive};
use crate::fractal::{
    DEFAULT_FREQUENCY, DEFAULT_LACUNARITY, DEFAULT_OCTAVE_COUNT, DEFAULT_SEED, clamp_octave_count,
    octave_coverage, require_finite_weights, require_lacunarity, spectral_weights,
};
use crate::noisegen::{NoiseQuality, gradient_coherent_noise_3d, make_int32_range};

pub const DEFAULT_SPECTRAL_EXPONENT: f64 = 1.0;

// Ridge shaping: signal = (OFFSET - |n|)^2, next octave weighted by signal * GAIN
const OFFSET: f64 = 1.0;
const GAIN: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgedConfig {
    pub seed: i32,
    pub frequency: f64,
    pub lacunarity: f64,
    pub octave_count: f64,
    pub quality: NoiseQuality,
    // Spectral exponent H; octave i is weighted by lacunarity^(-H * i).
    pub exponent: f64,
}

impl Default for RidgedConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frequency: DEFAULT_FREQUENCY,
            lacunarity: DEFAULT_LACUNARITY,
            octave_count: DEFAULT_OCTAVE_COUNT,
            quality: NoiseQuality::default(),
            exponent: DEFAULT_SPECTRAL_EXPONENT,
        }
    }
}

// Ridged multifractal noise: sharp ridge lines, as for mountain ranges
// or veined stone.
//
// Each octave is folded (`1 - |n|`), squared, and weighted by the
// previous octave's output, so detail piles up along the ridges and
// fades in the valleys. The per-octave spectral weights depend only on
// configuration and are rebuilt by the setters that affect them.
pub struct RidgedMulti {
    config: RidgedConfig,
    weights: Vec<f64>,
}

impl RidgedMulti {
    pub const NAME: &'static str = "RidgedMulti";

    pub fn new() -> Self {
        let mut module = Self {
            config: RidgedConfig::default(),
            weights: Vec::new(),
        };
        module.rebuild_weights();
        module
    }

    pub fn from_config(mut config: RidgedConfig) -> Result<Self> {
        require_positive(Self::NAME, "frequency", config.frequency)?;
        require_lacunarity(Self::NAME, config.lacunarity)?;
        require_finite(Self::NAME, "spectral exponent", config.exponent)?;
        require_finite_weights(
            Self::NAME,
            "spectral exponent",
            config.exponent,
            config.lacunarity,
            config.exponent,
        )?;
        config.octave_count = clamp_octave_count(Self::NAME, config.octave_count)?;
        let mut module = Self {
            config,
            weights: Vec::new(),
        };
        module.rebuild_weights();
        Ok(module)
    }

    pub fn config(&self) -> &RidgedConfig {
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

    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        self.config.frequency = require_positive(Self::NAME, "frequency", frequency)?;
        Ok(())
    }

    pub fn lacunarity(&self) -> f64 {
        self.config.lacunarity
    }

    pub fn set_lacunarity(&mut self, lacunarity: f64) -> Result<()> {
        let lacunarity = require_lacunarity(Self::NAME, lacunarity)?;
        require_finite_weights(
            Self::NAME,
            "lacunarity",
            lacunarity,
            lacunarity,
            self.config.exponent,
        )?;
        self.config.lacunarity = lacunarity;
        self.rebuild_weights();
        Ok(())
    }

    pub fn octave_count(&self) -> f64 {
        self.config.octave_count
    }

    pub fn set_octave_count(&mut self, count: f64) -> Result<()> {
        self.config.octave_count = clamp_octave_count(Self::NAME, count)?;
        self.rebuild_weights();
        Ok(())
    }

    pub fn exponent(&self) -> f64 {
        self.config.exponent
    }

    pub fn set_exponent(&mut self, exponent: f64) -> Result<()> {
        let exponent = require_finite(Self::NAME, "spectral exponent", exponent)?;
        require_finite_weights(
            Self::NAME,
            "spectral exponent",
            exponent,
            self.config.lacunarity,
            exponent,
        )?;
        self.config.exponent = exponent;
        self.rebuild_weights();
        Ok(())
    }

    pub fn noise_quality(&self) -> NoiseQuality {
        self.config.quality
    }

    pub fn set_noise_quality(&mut self, quality: NoiseQuality) {
        self.config.quality = quality;
    }

    pub fn spectral_weights(&self) -> &[f64] {
        &self.weights
    }

    // One weight per octave actually summed, the partial one included
    fn rebuild_weights(&mut self) {
        let count = self.config.octave_count.ceil() as usize;
        self.weights = spectral_weights(self.config.lacunarity, self.config.exponent, count);
        log::debug!(
            "{}: rebuilt {} spectral weights (lacunarity {}, exponent {})",
            Self::NAME,
            count,
            self.config.lacunarity,
            self.config.exponent
        );
    }
}

impl Default for RidgedMulti {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for RidgedMulti {
    fn source_module_count(&self) -> usize {
        0
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let mut x = x * self.config.frequency;
        let mut y = y * self.config.frequency;
        let mut z = z * self.config.frequency;

        let mut value = 0.0;
        let mut total = 0.0;
        let mut weight = 1.0f64;

        for (octave, coverage) in octave_coverage(self.config.octave_count) {
            let seed = self.config.seed.wrapping_add(octave as i32);
            let n = gradient_coherent_noise_3d(
                make_int32_range(x),
                make_int32_range(y),
                make_int32_range(z),
                seed,
                self.config.quality,
            );

            // Fold into a ridge, sharpen, then damp by the previous octave
            let mut signal = OFFSET - n.abs();
            signal *= signal;
            signal *= weight;
            weight = (signal * GAIN).clamp(0.0, 1.0);

            let spectral = self.weights[octave] * coverage;
            value += signal * spectral;
            total += spectral;

            x *= self.config.lacunarity;
            y *= self.config.lacunarity;
            z *= self.config.lacunarity;
        }

        // value / total is in [0, 1]
        Ok(value / total * 2.0 - 1.0)
    }
}
