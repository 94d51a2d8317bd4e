use crate::NoiseModule;
use crate::error::{Result, require_positive};
use crate::fractal::{
    FractalConfig, clamp_octave_count, fractal_sum, require_lacunarity, require_octave_factor,
};
use crate::noisegen::NoiseQuality;

// Billowy fractal noise, suited to clouds and rocks.
//
// Same octave sum as [`crate::Perlin`], but each octave contributes
// `2|n| - 1`, folding every valley into a rounded lump.
pub struct Billow {
    config: FractalConfig,
}

impl Billow {
    pub const NAME: &'static str = "Billow";

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

    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        self.config.frequency = require_positive(Self::NAME, "frequency", frequency)?;
        Ok(())
    }

    pub fn lacunarity(&self) -> f64 {
        self.config.lacunarity
    }

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

impl Default for Billow {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Billow {
    fn source_module_count(&self) -> usize {
        0
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        Ok(fractal_sum(&self.config, x, y, z, |n| 2.0 * n.abs() - 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_points;

    #[test]
    fn billow_single_octave_bottoms_out_on_lattice() {
        let mut b = Billow::new();
        b.set_octave_count(1.0).unwrap();
        // |n| = 0 on the lattice, so the signal is at its floor
        assert_eq!(b.get3(2.0, -3.0, 5.0), Ok(-1.0));
    }

    #[test]
    fn billow_range() {
        let b = Billow::from_config(FractalConfig {
            seed: 2,
            frequency: 2.0,
            persistence: 0.375,
            lacunarity: 2.12109375,
            octave_count: 4.0,
            quality: NoiseQuality::Best,
        })
        .unwrap();
        for (x, y, z) in sample_points() {
            let v = b.get3(x, y, z).unwrap();
            assert!(v >= -1.0 - 1e-9 && v <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn billow_keeps_settings_after_overflowing_factor() {
        let mut b = Billow::new();
        b.set_octave_count(30.0).unwrap();
        assert!(b.set_persistence(-1e12).is_err());
        assert!(b.set_lacunarity(f64::INFINITY).is_err());
        assert_eq!(b.persistence(), 0.5);
        assert_eq!(b.lacunarity(), 2.0);
        assert!(b.get3(0.25, -1.5, 3.75).unwrap().is_finite());
    }

    #[test]
    fn billow_determinism() {
        let b = Billow::new();
        assert_eq!(b.get3(0.5, 1.5, -2.25), b.get3(0.5, 1.5, -2.25));
    }
}
