use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, Result, require_finite, require_positive};
use crate::noisegen::{NoiseQuality, gradient_coherent_noise_3d, make_int32_range};

// Highest octave count a fractal generator will sum.
// Larger requests are clamped to this.
pub const MAX_OCTAVE: usize = 30;

pub const DEFAULT_SEED: i32 = 0;
pub const DEFAULT_FREQUENCY: f64 = 1.0;
pub const DEFAULT_LACUNARITY: f64 = 2.0;
pub const DEFAULT_PERSISTENCE: f64 = 0.5;
pub const DEFAULT_OCTAVE_COUNT: f64 = 6.0;

// Parameters shared by the smooth (Perlin) and billowy fractal generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    // Seed of the first octave; octave i uses seed + i.
    pub seed: i32,
    // Frequency of the first octave.
    pub frequency: f64,
    // Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    // Amplitude multiplier between successive octaves.
    pub persistence: f64,
    // Number of octaves; a fractional part adds one partially weighted octave.
    pub octave_count: f64,
    pub quality: NoiseQuality,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frequency: DEFAULT_FREQUENCY,
            lacunarity: DEFAULT_LACUNARITY,
            persistence: DEFAULT_PERSISTENCE,
            octave_count: DEFAULT_OCTAVE_COUNT,
            quality: NoiseQuality::default(),
        }
    }
}

impl FractalConfig {
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    // Apply the same rules the setters enforce
    pub(crate) fn validated(mut self, module: &'static str) -> Result<Self> {
        require_positive(module, "frequency", self.frequency)?;
        require_lacunarity(module, self.lacunarity)?;
        require_octave_factor(module, "persistence", self.persistence)?;
        self.octave_count = clamp_octave_count(module, self.octave_count)?;
        Ok(self)
    }
}

// Validate an octave count: below one is an error, above `MAX_OCTAVE` clamps.
pub fn clamp_octave_count(module: &'static str, count: f64) -> Result<f64> {
    if count.is_nan() || count < 1.0 || count == f64::INFINITY {
        return Err(NoiseError::InvalidParameter {
            module,
            parameter: "octave count",
            value: count,
            reason: "must be a finite number of at least one",
        });
    }
    if count > MAX_OCTAVE as f64 {
        log::warn!("{module}: octave count {count} clamped to {MAX_OCTAVE}");
        return Ok(MAX_OCTAVE as f64);
    }
    Ok(count)
}

// Sum of |factor|^i over the most octaves any generator sums
fn compounded(factor: f64) -> f64 {
    let mut power = 1.0f64;
    let mut sum = 0.0;
    for _ in 0..MAX_OCTAVE {
        sum += power;
        power *= factor.abs();
    }
    sum
}

// A per-octave multiplier (persistence, lacunarity) must stay finite when
// compounded over MAX_OCTAVE octaves
pub fn require_octave_factor(
    module: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<f64> {
    require_finite(module, parameter, value)?;
    if compounded(value).is_finite() {
        Ok(value)
    } else {
        Err(NoiseError::InvalidParameter {
            module,
            parameter,
            value,
            reason: "overflows when compounded over the maximum octave count",
        })
    }
}

pub fn require_lacunarity(module: &'static str, lacunarity: f64) -> Result<f64> {
    let lacunarity = require_positive(module, "lacunarity", lacunarity)?;
    require_octave_factor(module, "lacunarity", lacunarity)
}

// Every ridged spectral weight up to MAX_OCTAVE, and their sum, must be finite.
// `parameter`/`value` name the setting being changed.
pub fn require_finite_weights(
    module: &'static str,
    parameter: &'static str,
    value: f64,
    lacunarity: f64,
    exponent: f64,
) -> Result<()> {
    let total: f64 = spectral_weights(lacunarity, exponent, MAX_OCTAVE).iter().sum();
    if total.is_finite() {
        Ok(())
    } else {
        Err(NoiseError::InvalidParameter {
            module,
            parameter,
            value,
            reason: "spectral weights overflow for this lacunarity and exponent",
        })
    }
}

// Octaves to sum for `count`, as (octave index, coverage) pairs.
// Whole octaves have coverage 1; a fractional remainder yields one more
// octave weighted by that fraction.
pub fn octave_coverage(count: f64) -> impl Iterator<Item = (usize, f64)> {
    let whole = count.floor();
    let partial = count - whole;
    let whole = whole as usize;
    (0..whole)
        .map(|octave| (octave, 1.0))
        .chain((partial > 0.0).then_some((whole, partial)))
}

// Per-octave spectral weights frequency^(-exponent) for a ridged sum,
// where the frequency of octave i is lacunarity^i.
pub fn spectral_weights(lacunarity: f64, exponent: f64, count: usize) -> Vec<f64> {
    let mut frequency = 1.0f64;
    (0..count)
        .map(|_| {
            let weight = frequency.powf(-exponent);
            frequency *= lacunarity;
            weight
        })
        .collect()
}

// Sum gradient-noise octaves shaped by `signal`, normalised by the total
// amplitude so the result stays in [-1, 1] whenever `signal` does
pub(crate) fn fractal_sum(
    config: &FractalConfig,
    x: f64,
    y: f64,
    z: f64,
    signal: impl Fn(f64) -> f64,
) -> f64 {
    let mut x = x * config.frequency;
    let mut y = y * config.frequency;
    let mut z = z * config.frequency;
    let mut amplitude = 1.0f64;
    let mut value = 0.0;
    let mut total = 0.0;

    for (octave, coverage) in octave_coverage(config.octave_count) {
        let seed = config.seed.wrapping_add(octave as i32);
        let n = gradient_coherent_noise_3d(
            make_int32_range(x),
            make_int32_range(y),
            make_int32_range(z),
            seed,
            config.quality,
        );
        value += signal(n) * amplitude * coverage;
        total += amplitude.abs() * coverage;

        x *= config.lacunarity;
        y *= config.lacunarity;
        z *= config.lacunarity;
        amplitude *= config.persistence;
    }

    if total > 0.0 { value / total } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_whole_and_partial() {
        let whole: Vec<_> = octave_coverage(3.0).collect();
        assert_eq!(whole, vec![(0, 1.0), (1, 1.0), (2, 1.0)]);

        let partial: Vec<_> = octave_coverage(2.25).collect();
        assert_eq!(partial, vec![(0, 1.0), (1, 1.0), (2, 0.25)]);
    }

    #[test]
    fn octave_count_limits() {
        assert_eq!(clamp_octave_count("Perlin", 100.0), Ok(MAX_OCTAVE as f64));
        assert_eq!(clamp_octave_count("Perlin", 4.5), Ok(4.5));
        assert!(clamp_octave_count("Perlin", 0.5).is_err());
        assert!(clamp_octave_count("Perlin", f64::NAN).is_err());
        assert!(clamp_octave_count("Perlin", f64::INFINITY).is_err());
    }

    #[test]
    fn spectral_weights_decay() {
        let weights = spectral_weights(2.0, 1.0, 4);
        let expected = [1.0, 0.5, 0.25, 0.125];
        assert_eq!(weights.len(), expected.len());
        for (w, e) in weights.iter().zip(expected) {
            assert!((w - e).abs() < 1e-12);
        }
    }

    #[test]
    fn config_validation() {
        let bad = FractalConfig {
            frequency: -1.0,
            ..Default::default()
        };
        assert!(bad.validated("Perlin").is_err());

        let clamped = FractalConfig {
            octave_count: 64.0,
            ..Default::default()
        }
        .validated("Perlin")
        .unwrap();
        assert_eq!(clamped.octave_count, MAX_OCTAVE as f64);
    }

    #[test]
    fn octave_factors_must_not_overflow() {
        assert_eq!(require_octave_factor("Perlin", "persistence", 0.5), Ok(0.5));
        assert_eq!(require_octave_factor("Perlin", "persistence", -0.75), Ok(-0.75));
        assert!(require_octave_factor("Perlin", "persistence", 1e12).is_err());
        assert!(require_lacunarity("Billow", 1e12).is_err());
        assert!(require_lacunarity("Billow", 0.0).is_err());
        assert_eq!(require_lacunarity("Billow", 2.20703125), Ok(2.20703125));

        assert!(require_finite_weights("RidgedMulti", "spectral exponent", 1.0, 2.0, 1.0).is_ok());
        assert!(
            require_finite_weights("RidgedMulti", "spectral exponent", -40.0, 2.0, -40.0).is_err()
        );
        // octave frequency underflows to zero, whose negative power is infinite
        assert!(require_finite_weights("RidgedMulti", "lacunarity", 1e-20, 1e-20, 1.0).is_err());

        let wild = FractalConfig {
            persistence: 1e12,
            ..Default::default()
        };
        assert!(wild.validated("Perlin").is_err());
    }

    #[test]
    fn config_from_partial_json() {
        let config: FractalConfig =
            serde_json::from_str(r#"{ "seed": 9, "octave_count": 3, "quality": "best" }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.octave_count, 3.0);
        assert_eq!(config.quality, NoiseQuality::Best);
        assert_eq!(config.lacunarity, DEFAULT_LACUNARITY);
    }

    #[test]
    fn fractal_sum_stays_normalised() {
        let config = FractalConfig {
            persistence: 0.9,
            octave_count: 8.5,
            ..Default::default()
        };
        for i in 0..200 {
            let t = i as f64 * 0.37;
            let v = fractal_sum(&config, t, -t * 0.5, t * 0.2, |n| n);
            assert!(v.abs() <= 1.0 + 1e-12);
        }
    }
}
