use crate::NoiseModule;
use crate::error::{NoiseError, Result, require_finite};
use crate::interp::{linear_interp, s_curve3};
use crate::source::{SourceSlots, source_module_accessors};

source_module_accessors!(Terrace);

// Terrace-forming curve.
// Output is pulled towards a sorted list of control points. Between two
// neighbouring points the source value is remapped through a cubic
// s-curve, flat at both points and steepest half way; with smoothing off
// the value snaps to whichever point is nearer. Outside the first and
// last point the output clamps to that point.
pub struct Terrace<'a> {
    sources: SourceSlots<'a, 1>,
    points: Vec<f64>,
    smooth: bool,
}

impl Terrace<'_> {
    pub const NAME: &'static str = "Terrace";
    pub const MIN_CONTROL_POINTS: usize = 2;

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            points: Vec::new(),
            smooth: true,
        }
    }

    pub fn control_points(&self) -> &[f64] {
        &self.points
    }

    // Append a control point. It must be greater than every point already
    // present; otherwise the list is left unchanged and
    // `ControlPointOrder` is returned.
    pub fn add_control_point(&mut self, value: f64) -> Result<()> {
        require_finite(Self::NAME, "control point", value)?;
        if let Some(&previous) = self.points.last() {
            if value <= previous {
                return Err(NoiseError::ControlPointOrder {
                    module: Self::NAME,
                    value,
                    previous,
                });
            }
        }
        self.points.push(value);
        Ok(())
    }

    // Replace all control points; they must be strictly increasing.
    pub fn set_control_points(&mut self, points: &[f64]) -> Result<()> {
        let mut checked = Terrace::new();
        for &point in points {
            checked.add_control_point(point)?;
        }
        self.points = checked.points;
        Ok(())
    }

    // Replace the control points with `count` points evenly spaced over [-1, 1].
    pub fn make_control_points(&mut self, count: usize) -> Result<()> {
        if count < Self::MIN_CONTROL_POINTS {
            return Err(NoiseError::TooFewControlPoints {
                module: Self::NAME,
                required: Self::MIN_CONTROL_POINTS,
                present: count,
            });
        }
        let step = 2.0 / (count - 1) as f64;
        self.points = (0..count).map(|i| -1.0 + i as f64 * step).collect();
        Ok(())
    }

    pub fn clear_control_points(&mut self) {
        self.points.clear();
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
    }
}

impl NoiseModule for Terrace<'_> {
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

        // First point above the value; its predecessor bounds it from below
        let upper = self.points.partition_point(|&p| p <= value);
        let i0 = upper.saturating_sub(1).min(count - 1);
        let i1 = upper.min(count - 1);
        if i0 == i1 {
            return Ok(self.points[i1]);
        }

        let (v0, v1) = (self.points[i0], self.points[i1]);
        let alpha = (value - v0) / (v1 - v0);
        if self.smooth {
            Ok(linear_interp(v0, v1, s_curve3(alpha)))
        } else if alpha < 0.5 {
            Ok(v0)
        } else {
            Ok(v1)
        }
    }
}
