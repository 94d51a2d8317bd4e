// Three-source modules steered by a control module.
// Slot 0 and slot 1 are the two candidate sources, slot 2 the control.

use crate::NoiseModule;
use crate::error::{NoiseError, Result, require_ordered};
use crate::interp::{linear_interp, s_curve3};
use crate::source::{SourceSlots, source_module_accessors};

source_module_accessors!(Select, Blend);

const CONTROL: usize = 2;

// Outputs source 1 where the control value lies within [lower, upper] and
// source 0 elsewhere.
//
// A non-zero edge falloff replaces the hard switch at each bound with an
// s-curve blend across `bound - falloff ..= bound + falloff`. The falloff
// never exceeds half the width of the bounds.
pub struct Select<'a> {
    sources: SourceSlots<'a, 3>,
    lower: f64,
    upper: f64,
    edge_falloff: f64,
}

impl<'a> Select<'a> {
    pub const NAME: &'static str = "Select";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            lower: -1.0,
            upper: 1.0,
            edge_falloff: 0.0,
        }
    }

    pub fn set_control_module(&mut self, module: &'a dyn NoiseModule) {
        self.sources.set_slot::<CONTROL>(module);
    }

    pub fn control_module(&self) -> Result<&'a dyn NoiseModule> {
        self.sources.get(CONTROL)
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper
    }

    // Set the selection range. Fails with `InvalidBounds` when
    // `lower > upper`. The edge falloff is re-clamped to the new width.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<()> {
        (self.lower, self.upper) = require_ordered(Self::NAME, lower, upper)?;
        self.edge_falloff = self.clamped_falloff(self.edge_falloff);
        Ok(())
    }

    pub fn edge_falloff(&self) -> f64 {
        self.edge_falloff
    }

    // Negative or non-finite falloff is rejected; anything wider than half
    // the bounds is clamped with a warning.
    pub fn set_edge_falloff(&mut self, falloff: f64) -> Result<()> {
        if !falloff.is_finite() || falloff < 0.0 {
            return Err(NoiseError::InvalidParameter {
                module: Self::NAME,
                parameter: "edge falloff",
                value: falloff,
                reason: "must be finite and not negative",
            });
        }
        self.edge_falloff = self.clamped_falloff(falloff);
        Ok(())
    }

    fn clamped_falloff(&self, falloff: f64) -> f64 {
        let half = (self.upper - self.lower) / 2.0;
        if falloff > half {
            log::warn!(
                "{}: edge falloff {falloff} exceeds half the bounds [{}, {}], clamped to {half}",
                Self::NAME,
                self.lower,
                self.upper
            );
            half
        } else {
            falloff
        }
    }
}

impl NoiseModule for Select<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let (outside, inside) = (self.sources.get(0)?, self.sources.get(1)?);
        let control = self.sources.get(CONTROL)?.get3(x, y, z)?;
        let (lower, upper, falloff) = (self.lower, self.upper, self.edge_falloff);

        if falloff <= 0.0 {
            return if control < lower || control > upper {
                outside.get3(x, y, z)
            } else {
                inside.get3(x, y, z)
            };
        }

        if control < lower - falloff {
            outside.get3(x, y, z)
        } else if control < lower + falloff {
            let alpha = s_curve3((control - (lower - falloff)) / (2.0 * falloff));
            Ok(linear_interp(outside.get3(x, y, z)?, inside.get3(x, y, z)?, alpha))
        } else if control < upper - falloff {
            inside.get3(x, y, z)
        } else if control < upper + falloff {
            let alpha = s_curve3((control - (upper - falloff)) / (2.0 * falloff));
            Ok(linear_interp(inside.get3(x, y, z)?, outside.get3(x, y, z)?, alpha))
        } else {
            outside.get3(x, y, z)
        }
    }
}

// Weighted blend of source 0 and source 1, weighted by the control
// output: -1 gives source 0, +1 gives source 1.
pub struct Blend<'a> {
    sources: SourceSlots<'a, 3>,
}

impl<'a> Blend<'a> {
    pub const NAME: &'static str = "Blend";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }

    pub fn set_control_module(&mut self, module: &'a dyn NoiseModule) {
        self.sources.set_slot::<CONTROL>(module);
    }

    pub fn control_module(&self) -> Result<&'a dyn NoiseModule> {
        self.sources.get(CONTROL)
    }
}

impl NoiseModule for Blend<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let (s0, s1, control) = (
            self.sources.get(0)?,
            self.sources.get(1)?,
            self.sources.get(CONTROL)?,
        );
        let alpha = (control.get3(x, y, z)? + 1.0) / 2.0;
        Ok(linear_interp(s0.get3(x, y, z)?, s1.get3(x, y, z)?, alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{AxisEcho, sample_points};
    use crate::{Const, Perlin};

    fn wired<'a>(a: &'a Const, b: &'a Const, control: &'a AxisEcho) -> Select<'a> {
        let mut select = Select::new();
        select.set_source_module(0, a).unwrap();
        select.set_source_module(1, b).unwrap();
        select.set_control_module(control);
        select
    }

    #[test]
    fn hard_switch_uses_closed_interval() {
        let (a, b) = (Const::with_value(-0.25).unwrap(), Const::with_value(0.75).unwrap());
        let control = AxisEcho(0);
        let mut select = wired(&a, &b, &control);
        select.set_bounds(-0.5, 0.5).unwrap();

        assert_eq!(select.get3(-0.5, 0.0, 0.0), Ok(0.75));
        assert_eq!(select.get3(0.5, 0.0, 0.0), Ok(0.75));
        assert_eq!(select.get3(0.0, 0.0, 0.0), Ok(0.75));
        assert_eq!(select.get3(-0.500001, 0.0, 0.0), Ok(-0.25));
        assert_eq!(select.get3(0.500001, 0.0, 0.0), Ok(-0.25));
    }

    #[test]
    fn hard_switch_matches_sources_exactly() {
        let p0 = Perlin::new();
        let mut p1 = Perlin::new();
        p1.set_seed(9);
        let control = AxisEcho(1);
        let mut select = Select::new();
        select.set_source_module(0, &p0).unwrap();
        select.set_source_module(1, &p1).unwrap();
        select.set_control_module(&control);
        select.set_bounds(-2.0, 2.0).unwrap();
        for (x, y, z) in sample_points() {
            let expected = if (-2.0..=2.0).contains(&y) {
                p1.get3(x, y, z).unwrap()
            } else {
                p0.get3(x, y, z).unwrap()
            };
            assert_eq!(select.get3(x, y, z), Ok(expected));
        }
    }

    #[test]
    fn falloff_blends_at_the_bounds() {
        let (a, b) = (Const::with_value(0.0).unwrap(), Const::with_value(1.0).unwrap());
        let control = AxisEcho(0);
        let mut select = wired(&a, &b, &control);
        select.set_bounds(-0.5, 0.5).unwrap();
        select.set_edge_falloff(0.125).unwrap();

        // half way through each edge the blend is even
        assert_eq!(select.get3(-0.5, 0.0, 0.0), Ok(0.5));
        assert_eq!(select.get3(0.5, 0.0, 0.0), Ok(0.5));
        assert_eq!(select.get3(0.0, 0.0, 0.0), Ok(1.0));
        assert_eq!(select.get3(-1.0, 0.0, 0.0), Ok(0.0));
        assert_eq!(select.get3(1.0, 0.0, 0.0), Ok(0.0));
        let rising = select.get3(-0.45, 0.0, 0.0).unwrap();
        assert!(rising > 0.5 && rising < 1.0);
    }

    #[test]
    fn falloff_is_clamped_to_half_width() {
        let mut select = Select::new();
        select.set_bounds(0.0, 0.5).unwrap();
        select.set_edge_falloff(1.0).unwrap();
        assert_eq!(select.edge_falloff(), 0.25);
        select.set_bounds(0.0, 0.2).unwrap();
        assert_eq!(select.edge_falloff(), 0.1);
        assert!(select.set_edge_falloff(-0.1).is_err());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut select = Select::new();
        assert!(matches!(
            select.set_bounds(0.5, -0.5),
            Err(NoiseError::InvalidBounds { module: "Select", .. })
        ));
        assert_eq!((select.lower_bound(), select.upper_bound()), (-1.0, 1.0));
    }

    #[test]
    fn missing_control_is_an_error() {
        let (a, b) = (Const::new(), Const::new());
        let mut select = Select::new();
        select.set_source_module(0, &a).unwrap();
        select.set_source_module(1, &b).unwrap();
        assert_eq!(
            select.get3(0.0, 0.0, 0.0),
            Err(NoiseError::NoSource {
                module: "Select",
                index: 2
            })
        );
    }

    #[test]
    fn blend_follows_control() {
        let (a, b) = (Const::with_value(-1.0).unwrap(), Const::with_value(3.0).unwrap());
        let control = AxisEcho(2);
        let mut blend = Blend::new();
        blend.set_source_module(0, &a).unwrap();
        blend.set_source_module(1, &b).unwrap();
        blend.set_control_module(&control);
        assert_eq!(blend.get3(0.0, 0.0, -1.0), Ok(-1.0));
        assert_eq!(blend.get3(0.0, 0.0, 1.0), Ok(3.0));
        assert_eq!(blend.get3(0.0, 0.0, 0.0), Ok(1.0));
    }
}
