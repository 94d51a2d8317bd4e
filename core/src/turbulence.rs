use serde::{Deserialize, Serialize};

use crate::NoiseModule;
use crate::error::{Result, require_finite, require_positive};
use crate::fractal::{FractalConfig, clamp_octave_count};
use crate::perlin::Perlin;
use crate::source::{SourceSlots, source_module_accessors};

source_module_accessors!(Turbulence);

// Fixed per-axis offsets applied before sampling each distortion field, so
// the three fields are not read at lattice-aligned points together.
const X_OFFSETS: [f64; 3] = [0.1893, 0.8127, 0.4671];
const Y_OFFSETS: [f64; 3] = [0.6542, 0.2785, 0.9319];
const Z_OFFSETS: [f64; 3] = [0.3716, 0.5408, 0.0861];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurbulenceConfig {
    // Seed of the x distortion field; y and z use seed + 1 and seed + 2.
    pub seed: i32,
    // Frequency of the distortion fields.
    pub frequency: f64,
    // Scale applied to each distortion before it is added to the coordinate.
    pub power: f64,
    // Octave count of the distortion fields.
    pub roughness: u32,
}

impl Default for TurbulenceConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
            power: 1.0,
            roughness: 3,
        }
    }
}

// Randomly perturbs the input coordinate before sampling the source.
// Each axis is pushed by its own Perlin field, scaled by power.
pub struct Turbulence<'a> {
    sources: SourceSlots<'a, 1>,
    config: TurbulenceConfig,
    distort: [Perlin; 3],
}

impl Turbulence<'_> {
    pub const NAME: &'static str = "Turbulence";

    pub fn new() -> Self {
        let config = TurbulenceConfig::default();
        Self {
            sources: SourceSlots::new(Self::NAME),
            distort: distortion_fields(&config),
            config,
        }
    }

    pub fn from_config(config: TurbulenceConfig) -> Result<Self> {
        require_positive(Self::NAME, "frequency", config.frequency)?;
        require_finite(Self::NAME, "power", config.power)?;
        let roughness = clamp_octave_count(Self::NAME, config.roughness as f64)? as u32;
        let config = TurbulenceConfig { roughness, ..config };
        Ok(Self {
            sources: SourceSlots::new(Self::NAME),
            distort: distortion_fields(&config),
            config,
        })
    }

    pub fn config(&self) -> &TurbulenceConfig {
        &self.config
    }

    pub fn seed(&self) -> i32 {
        self.config.seed
    }

    pub fn set_seed(&mut self, seed: i32) {
        self.config.seed = seed;
        for (axis, field) in self.distort.iter_mut().enumerate() {
            field.set_seed(seed.wrapping_add(axis as i32));
        }
    }

    pub fn frequency(&self) -> f64 {
        self.config.frequency
    }

    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        let frequency = require_positive(Self::NAME, "frequency", frequency)?;
        for field in &mut self.distort {
            field.set_frequency(frequency)?;
        }
        self.config.frequency = frequency;
        Ok(())
    }

    pub fn power(&self) -> f64 {
        self.config.power
    }

    pub fn set_power(&mut self, power: f64) -> Result<()> {
        self.config.power = require_finite(Self::NAME, "power", power)?;
        Ok(())
    }

    pub fn roughness(&self) -> u32 {
        self.config.roughness
    }

    // Zero is an error; above `MAX_OCTAVE` clamps.
    pub fn set_roughness(&mut self, roughness: u32) -> Result<()> {
        let octaves = clamp_octave_count(Self::NAME, roughness as f64)?;
        for field in &mut self.distort {
            field.set_octave_count(octaves)?;
        }
        self.config.roughness = octaves as u32;
        Ok(())
    }
}

fn distortion_fields(config: &TurbulenceConfig) -> [Perlin; 3] {
    [0, 1, 2].map(|axis| {
        // frequency and roughness are checked by the caller under Perlin's rules
        Perlin::from_validated(FractalConfig {
            seed: config.seed.wrapping_add(axis),
            frequency: config.frequency,
            octave_count: config.roughness as f64,
            ..FractalConfig::default()
        })
    })
}

impl NoiseModule for Turbulence<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let source = self.sources.get(0)?;
        let power = self.config.power;
        let [fx, fy, fz] = &self.distort;
        let dx = fx.get3(x + X_OFFSETS[0], y + Y_OFFSETS[0], z + Z_OFFSETS[0])?;
        let dy = fy.get3(x + X_OFFSETS[1], y + Y_OFFSETS[1], z + Z_OFFSETS[1])?;
        let dz = fz.get3(x + X_OFFSETS[2], y + Y_OFFSETS[2], z + Z_OFFSETS[2])?;
        source.get3(x + dx * power, y + dy * power, z + dz * power)
    }
}
