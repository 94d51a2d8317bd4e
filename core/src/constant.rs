use crate::NoiseModule;
use crate::error::{Result, require_finite};
use crate::noisegen::make_int32_range;

// Outputs the same value for every coordinate.
pub struct Const {
    value: f64,
}

impl Const {
    pub const NAME: &'static str = "Const";

    pub fn new() -> Self {
        Self { value: 0.0 }
    }

    pub fn with_value(value: f64) -> Result<Self> {
        Ok(Self {
            value: require_finite(Self::NAME, "value", value)?,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) -> Result<()> {
        self.value = require_finite(Self::NAME, "value", value)?;
        Ok(())
    }
}

impl Default for Const {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Const {
    fn source_module_count(&self) -> usize {
        0
    }

    fn get3(&self, _x: f64, _y: f64, _z: f64) -> Result<f64> {
        Ok(self.value)
    }
}

// Unit cubes alternating between 1 and -1.
pub struct Checkerboard;

impl Checkerboard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseModule for Checkerboard {
    fn source_module_count(&self) -> usize {
        0
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let ix = make_int32_range(x).floor() as i32;
        let iy = make_int32_range(y).floor() as i32;
        let iz = make_int32_range(z).floor() as i32;
        Ok(if (ix ^ iy ^ iz) & 1 == 0 { 1.0 } else { -1.0 })
    }
}
