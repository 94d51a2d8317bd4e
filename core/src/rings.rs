use crate::NoiseModule;
use crate::error::{Result, require_positive};

// Distance d from the nearest ring, folded into [-1, 1]:
// 1 on every integer radius, -1 half way between two of them
#[inline]
fn ring_value(distance: f64) -> f64 {
    let inner = distance - distance.floor();
    let outer = 1.0 - inner;
    1.0 - inner.min(outer) * 4.0
}

// Concentric cylinders around the y axis, like the growth rings of a log.
// No seed: the pattern depends only on the distance from the axis.
pub struct Cylinders {
    frequency: f64,
}

impl Cylinders {
    pub const NAME: &'static str = "Cylinders";

    pub fn new() -> Self {
        Self { frequency: 1.0 }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    // Rings per unit of distance; must be finite and positive
    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        self.frequency = require_positive(Self::NAME, "frequency", frequency)?;
        Ok(())
    }
}

impl Default for Cylinders {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Cylinders {
    fn source_module_count(&self) -> usize {
        0
    }

    fn get3(&self, x: f64, _y: f64, z: f64) -> Result<f64> {
        let x = x * self.frequency;
        let z = z * self.frequency;
        Ok(ring_value((x * x + z * z).sqrt()))
    }
}

// Concentric spherical shells around the origin.
pub struct Spheres {
    frequency: f64,
}

impl Spheres {
    pub const NAME: &'static str = "Spheres";

    pub fn new() -> Self {
        Self { frequency: 1.0 }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        self.frequency = require_positive(Self::NAME, "frequency", frequency)?;
        Ok(())
    }
}

impl Default for Spheres {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Spheres {
    fn source_module_count(&self) -> usize {
        0
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let x = x * self.frequency;
        let y = y * self.frequency;
        let z = z * self.frequency;
        Ok(ring_value((x * x + y * y + z * z).sqrt()))
    }
}
