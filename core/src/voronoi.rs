use serde::{Deserialize, Serialize};

use crate::NoiseModule;
use crate::error::{Result, require_finite, require_positive};
use crate::noisegen::{make_int32_range, value_noise_3d};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoronoiConfig {
    pub seed: i32,
    pub frequency: f64,
    // Scale of the per-cell random value added to the output.
    pub displacement: f64,
    // Add the distance to the nearest seed point to the output.
    pub enable_distance: bool,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
            displacement: 1.0,
            enable_distance: false,
        }
    }
}

// Cellular noise.
// Every unit cube of the lattice holds one seed point, jittered anywhere
// within one unit of the cube's corner. A sample belongs to the cell of
// its nearest seed point; the output is that cell's random value scaled
// by the displacement, optionally plus the (rescaled) distance to the
// seed point.
pub struct Voronoi {
    config: VoronoiConfig,
}

impl Voronoi {
    pub const NAME: &'static str = "Voronoi";

    pub fn new() -> Self {
        Self {
            config: VoronoiConfig::default(),
        }
    }

    pub fn from_config(config: VoronoiConfig) -> Result<Self> {
        require_positive(Self::NAME, "frequency", config.frequency)?;
        require_finite(Self::NAME, "displacement", config.displacement)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &VoronoiConfig {
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

    pub fn displacement(&self) -> f64 {
        self.config.displacement
    }

    pub fn set_displacement(&mut self, displacement: f64) -> Result<()> {
        self.config.displacement = require_finite(Self::NAME, "displacement", displacement)?;
        Ok(())
    }

    pub fn is_distance_enabled(&self) -> bool {
        self.config.enable_distance
    }

    pub fn enable_distance(&mut self, enable: bool) {
        self.config.enable_distance = enable;
    }

    // Seed point of lattice cube (ix, iy, iz), one value-noise draw per axis
    fn seed_point(&self, ix: i32, iy: i32, iz: i32) -> (f64, f64, f64) {
        let seed = self.config.seed;
        (
            ix as f64 + value_noise_3d(ix, iy, iz, seed),
            iy as f64 + value_noise_3d(ix, iy, iz, seed.wrapping_add(1)),
            iz as f64 + value_noise_3d(ix, iy, iz, seed.wrapping_add(2)),
        )
    }
}

impl Default for Voronoi {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Voronoi {
    fn source_module_count(&self) -> usize {
        0
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let x = make_int32_range(x * self.config.frequency);
        let y = make_int32_range(y * self.config.frequency);
        let z = make_int32_range(z * self.config.frequency);

        let ix = x.floor() as i32;
        let iy = y.floor() as i32;
        let iz = z.floor() as i32;

        // Seed points stray up to one unit either way, so a point from a cube
        // outside this 5x5x5 window can occasionally sit nearer than any
        // inside it. The nearest-point search is approximate.
        let mut min_dist_sq = f64::MAX;
        let mut nearest = (0.0, 0.0, 0.0);
        for cz in iz.wrapping_sub(2)..=iz.wrapping_add(2) {
            for cy in iy.wrapping_sub(2)..=iy.wrapping_add(2) {
                for cx in ix.wrapping_sub(2)..=ix.wrapping_add(2) {
                    let (px, py, pz) = self.seed_point(cx, cy, cz);
                    let (dx, dy, dz) = (px - x, py - y, pz - z);
                    let dist_sq = dx * dx + dy * dy + dz * dz;
                    if dist_sq < min_dist_sq {
                        min_dist_sq = dist_sq;
                        nearest = (px, py, pz);
                    }
                }
            }
        }

        let mut value = if self.config.enable_distance {
            // Nearest-point distance rescaled so a typical cell spans about [-1, 1]
            min_dist_sq.sqrt() * SQRT_3 - 1.0
        } else {
            0.0
        };

        let cell = value_noise_3d(
            nearest.0.floor() as i32,
            nearest.1.floor() as i32,
            nearest.2.floor() as i32,
            self.config.seed,
        );
        value += self.config.displacement * cell;
        Ok(value)
    }
}
