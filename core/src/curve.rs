use crate::NoiseModule;
use crate::error::{NoiseError, Result, require_finite};
use crate::interp::cubic_interp;
use crate::source::{SourceSlots, source_module_accessors};

source_module_accessors!(Curve);

// Remaps the source output through a user-defined curve.
//
// The curve is given as (input, output) control points with strictly
// increasing inputs and is evaluated by cubic interpolation over the four
// points around the source value. At least four points are needed.
pub struct Curve<'a> {
    sources: SourceSlots<'a, 1>,
    points: Vec<(f64, f64)>,
}

impl Curve<'_> {
    pub const NAME: &'static str = "Curve";
    pub const MIN_CONTROL_POINTS: usize = 4;

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            points: Vec::new(),
        }
    }

    pub fn control_points(&self) -> &[(f64, f64)] {
        &self.points
    }

    // Inputs must be strictly increasing; a rejected point leaves the curve unchanged
    pub fn add_control_point(&mut self, input: f64, output: f64) -> Result<()> {
        require_finite(Self::NAME, "control point input", input)?;
        require_finite(Self::NAME, "control point output", output)?;
        if let Some(&(previous, _)) = self.points.last() {
            if input <= previous {
                return Err(NoiseError::ControlPointOrder {
                    module: Self::NAME,
                    value: input,
                    previous,
                });
            }
        }
        self.points.push((input, output));
        Ok(())
    }

    pub fn clear_control_points(&mut self) {
        self.points.clear();
    }
}

impl NoiseModule for Curve<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let source = self.sources.get(0)?;
        let count = self.points.len();
        if count < Self::MIN_CONTROL_POINTS {
            return Err(NoiseError::TooFewControlPoints {
                module: Self::NAME,
                required: Self::MIN_CONTROL_POINTS,
                present: count,
            });
        }

        let value = source.get3(x, y, z)?;
        let upper = self.points.partition_point(|&(input, _)| input <= value);
        let at = |offset: isize| -> (f64, f64) {
            let index = (upper as isize + offset).clamp(0, count as isize - 1);
            self.points[index as usize]
        };

        let (p0, p1, p2, p3) = (at(-2), at(-1), at(0), at(1));
        if p1 == p2 {
            return Ok(p1.1);
        }
        let alpha = (value - p1.0) / (p2.0 - p1.0);
        Ok(cubic_interp(p0.1, p1.1, p2.1, p3.1, alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::AxisEcho;

    fn identity_curve(echo: &AxisEcho) -> Curve<'_> {
        let mut c = Curve::new();
        c.set_source_module(0, echo).unwrap();
        for v in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            c.add_control_point(v, v).unwrap();
        }
        c
    }

    #[test]
    fn passes_through_control_points() {
        let echo = AxisEcho(0);
        let mut c = Curve::new();
        c.set_source_module(0, &echo).unwrap();
        for (input, output) in [(-1.0, 1.0), (-0.5, 0.0), (0.5, 0.25), (1.0, -1.0)] {
            c.add_control_point(input, output).unwrap();
        }
        assert_eq!(c.get3(-0.5, 0.0, 0.0), Ok(0.0));
        assert_eq!(c.get3(0.5, 0.0, 0.0), Ok(0.25));
        // clamps past the ends
        assert_eq!(c.get3(3.0, 0.0, 0.0), Ok(-1.0));
        assert_eq!(c.get3(-3.0, 0.0, 0.0), Ok(1.0));
    }

    #[test]
    fn linear_points_give_linear_curve() {
        let echo = AxisEcho(0);
        let c = identity_curve(&echo);
        for v in [-0.75, -0.1, 0.3, 0.6] {
            assert!((c.get3(v, 0.0, 0.0).unwrap() - v).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_unordered_inputs() {
        let mut c = Curve::new();
        c.add_control_point(0.0, 0.0).unwrap();
        assert!(matches!(
            c.add_control_point(-0.1, 1.0),
            Err(NoiseError::ControlPointOrder { .. })
        ));
        assert_eq!(c.control_points().len(), 1);
    }

    #[test]
    fn needs_four_points() {
        let echo = AxisEcho(0);
        let mut c = Curve::new();
        c.set_source_module(0, &echo).unwrap();
        for v in [-1.0, 0.0, 1.0] {
            c.add_control_point(v, v).unwrap();
        }
        assert_eq!(
            c.get3(0.0, 0.0, 0.0),
            Err(NoiseError::TooFewControlPoints {
                module: "Curve",
                required: 4,
                present: 3
            })
        );
    }
}
