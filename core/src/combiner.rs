// Two-source modules that combine both outputs at the same coordinate.
// Both sources are resolved before either is evaluated, so a missing
// slot always fails, whatever the other source returns.

use crate::NoiseModule;
use crate::error::Result;
use crate::source::{SourceSlots, source_module_accessors};

source_module_accessors!(Add, Multiply, Min, Max, Power);

// `source0 + source1`
pub struct Add<'a> {
    sources: SourceSlots<'a, 2>,
}

impl Add<'_> {
    pub const NAME: &'static str = "Add";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }
}

impl NoiseModule for Add<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let (a, b) = (self.sources.get(0)?, self.sources.get(1)?);
        Ok(a.get3(x, y, z)? + b.get3(x, y, z)?)
    }
}

// `source0 * source1`
pub struct Multiply<'a> {
    sources: SourceSlots<'a, 2>,
}

impl Multiply<'_> {
    pub const NAME: &'static str = "Multiply";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }
}

impl NoiseModule for Multiply<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let (a, b) = (self.sources.get(0)?, self.sources.get(1)?);
        Ok(a.get3(x, y, z)? * b.get3(x, y, z)?)
    }
}

// Smaller of the two source outputs.
pub struct Min<'a> {
    sources: SourceSlots<'a, 2>,
}

impl Min<'_> {
    pub const NAME: &'static str = "Min";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }
}

impl NoiseModule for Min<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let (a, b) = (self.sources.get(0)?, self.sources.get(1)?);
        Ok(a.get3(x, y, z)?.min(b.get3(x, y, z)?))
    }
}

// Larger of the two source outputs.
pub struct Max<'a> {
    sources: SourceSlots<'a, 2>,
}

impl Max<'_> {
    pub const NAME: &'static str = "Max";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }
}

impl NoiseModule for Max<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let (a, b) = (self.sources.get(0)?, self.sources.get(1)?);
        Ok(a.get3(x, y, z)?.max(b.get3(x, y, z)?))
    }
}

// `source0 ^ source1`. A negative base with a fractional exponent yields NaN,
// as `f64::powf` does.
pub struct Power<'a> {
    sources: SourceSlots<'a, 2>,
}

impl Power<'_> {
    pub const NAME: &'static str = "Power";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }
}

impl NoiseModule for Power<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let (base, exponent) = (self.sources.get(0)?, self.sources.get(1)?);
        Ok(base.get3(x, y, z)?.powf(exponent.get3(x, y, z)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoiseError;
    use crate::test_support::{AxisEcho, sample_points};
    use crate::{Billow, Const, Perlin};

    #[test]
    fn add_is_exact_sum() {
        let a = Perlin::new();
        let b = Billow::new();
        let mut add = Add::new();
        add.set_source_module(0, &a).unwrap();
        add.set_source_module(1, &b).unwrap();
        for (x, y, z) in sample_points() {
            let expected = a.get3(x, y, z).unwrap() + b.get3(x, y, z).unwrap();
            assert_eq!(add.get3(x, y, z), Ok(expected));
        }
    }

    #[test]
    fn multiply_is_exact_product() {
        let a = Perlin::new();
        let b = AxisEcho(2);
        let mut mul = Multiply::new();
        mul.set_source_module(0, &a).unwrap();
        mul.set_source_module(1, &b).unwrap();
        for (x, y, z) in sample_points() {
            assert_eq!(mul.get3(x, y, z), Ok(a.get3(x, y, z).unwrap() * z));
        }
    }

    #[test]
    fn min_max_pick_sides() {
        let x = AxisEcho(0);
        let y = AxisEcho(1);
        let mut min = Min::new();
        min.set_source_module(0, &x).unwrap();
        min.set_source_module(1, &y).unwrap();
        let mut max = Max::new();
        max.set_source_module(0, &x).unwrap();
        max.set_source_module(1, &y).unwrap();
        assert_eq!(min.get3(1.0, -2.0, 0.0), Ok(-2.0));
        assert_eq!(max.get3(1.0, -2.0, 0.0), Ok(1.0));
    }

    #[test]
    fn power_raises_source0() {
        let base = Const::with_value(2.0).unwrap();
        let exponent = Const::with_value(3.0).unwrap();
        let mut pow = Power::new();
        pow.set_source_module(0, &base).unwrap();
        pow.set_source_module(1, &exponent).unwrap();
        assert_eq!(pow.get3(0.0, 0.0, 0.0), Ok(8.0));
    }

    #[test]
    fn missing_second_source_is_an_error() {
        let a = Const::with_value(0.5).unwrap();
        let mut add = Add::new();
        add.set_source_module(0, &a).unwrap();
        assert_eq!(
            add.get3(0.0, 0.0, 0.0),
            Err(NoiseError::NoSource {
                module: "Add",
                index: 1
            })
        );
    }

    #[test]
    fn set_source_rejects_third_slot() {
        let a = Const::new();
        let mut mul = Multiply::new();
        assert!(matches!(
            mul.set_source_module(2, &a),
            Err(NoiseError::SourceIndexOutOfRange { index: 2, count: 2, .. })
        ));
        assert_eq!(mul.source_module_count(), 2);
    }
}
