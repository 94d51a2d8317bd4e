// Single-source modules that reshape their source's output value

use crate::NoiseModule;
use crate::error::{Result, require_finite, require_ordered, require_positive};
use crate::source::{SourceSlots, source_module_accessors};

source_module_accessors!(Abs, Invert, Clamp, Exponent, ScaleBias);

// Absolute value of the source output.
pub struct Abs<'a> {
    sources: SourceSlots<'a, 1>,
}

impl Abs<'_> {
    pub const NAME: &'static str = "Abs";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }
}

impl NoiseModule for Abs<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        Ok(self.sources.get(0)?.get3(x, y, z)?.abs())
    }
}

// Negated source output.
pub struct Invert<'a> {
    sources: SourceSlots<'a, 1>,
}

impl Invert<'_> {
    pub const NAME: &'static str = "Invert";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }
}

impl NoiseModule for Invert<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        Ok(-self.sources.get(0)?.get3(x, y, z)?)
    }
}

// Clamps the source output to [lower, upper]. Defaults to [-1, 1].
pub struct Clamp<'a> {
    sources: SourceSlots<'a, 1>,
    lower: f64,
    upper: f64,
}

impl Clamp<'_> {
    pub const NAME: &'static str = "Clamp";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            lower: -1.0,
            upper: 1.0,
        }
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    // lower > upper is rejected and leaves the old bounds in place
    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<()> {
        (self.lower, self.upper) = require_ordered(Self::NAME, lower, upper)?;
        Ok(())
    }
}

impl NoiseModule for Clamp<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let value = self.sources.get(0)?.get3(x, y, z)?;
        Ok(value.clamp(self.lower, self.upper))
    }
}

// Raises the source output, remapped to [0, 1], to a power and maps the
// result back to [-1, 1].
pub struct Exponent<'a> {
    sources: SourceSlots<'a, 1>,
    exponent: f64,
}

impl Exponent<'_> {
    pub const NAME: &'static str = "Exponent";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            exponent: 1.0,
        }
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn set_exponent(&mut self, exponent: f64) -> Result<()> {
        self.exponent = require_positive(Self::NAME, "exponent", exponent)?;
        Ok(())
    }
}

impl NoiseModule for Exponent<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let value = self.sources.get(0)?.get3(x, y, z)?;
        Ok(((value + 1.0) / 2.0).abs().powf(self.exponent) * 2.0 - 1.0)
    }
}

// Affine post-processing: `source * scale + bias`.
pub struct ScaleBias<'a> {
    sources: SourceSlots<'a, 1>,
    scale: f64,
    bias: f64,
}

impl ScaleBias<'_> {
    pub const NAME: &'static str = "ScaleBias";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            scale: 1.0,
            bias: 0.0,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        self.scale = require_finite(Self::NAME, "scale", scale)?;
        Ok(())
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn set_bias(&mut self, bias: f64) -> Result<()> {
        self.bias = require_finite(Self::NAME, "bias", bias)?;
        Ok(())
    }
}

impl NoiseModule for ScaleBias<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let value = self.sources.get(0)?.get3(x, y, z)?;
        Ok(value * self.scale + self.bias)
    }
}
