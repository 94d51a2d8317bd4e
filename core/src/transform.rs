// Coordinate transforms.
// Each module rewrites the coordinate it is sampled at and passes it down
// to source 0, returning that source's output unchanged.

use crate::NoiseModule;
use crate::error::{Result, require_finite};
use crate::source::{SourceSlots, source_module_accessors};

source_module_accessors!(ScalePoint, TranslatePoint, RotatePoint, Displace);

// Multiplies the input coordinate per axis before sampling the source.
pub struct ScalePoint<'a> {
    sources: SourceSlots<'a, 1>,
    scale: [f64; 3],
}

impl ScalePoint<'_> {
    pub const NAME: &'static str = "ScalePoint";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            scale: [1.0; 3],
        }
    }

    pub fn scale(&self) -> [f64; 3] {
        self.scale
    }

    pub fn set_scale(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        self.scale = [
            require_finite(Self::NAME, "x scale", x)?,
            require_finite(Self::NAME, "y scale", y)?,
            require_finite(Self::NAME, "z scale", z)?,
        ];
        Ok(())
    }

    pub fn set_x_scale(&mut self, x: f64) -> Result<()> {
        self.scale[0] = require_finite(Self::NAME, "x scale", x)?;
        Ok(())
    }

    pub fn set_y_scale(&mut self, y: f64) -> Result<()> {
        self.scale[1] = require_finite(Self::NAME, "y scale", y)?;
        Ok(())
    }

    pub fn set_z_scale(&mut self, z: f64) -> Result<()> {
        self.scale[2] = require_finite(Self::NAME, "z scale", z)?;
        Ok(())
    }
}

impl NoiseModule for ScalePoint<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let [sx, sy, sz] = self.scale;
        self.sources.get(0)?.get3(x * sx, y * sy, z * sz)
    }
}

// Offsets the input coordinate per axis before sampling the source.
pub struct TranslatePoint<'a> {
    sources: SourceSlots<'a, 1>,
    translation: [f64; 3],
}

impl TranslatePoint<'_> {
    pub const NAME: &'static str = "TranslatePoint";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            translation: [0.0; 3],
        }
    }

    pub fn translation(&self) -> [f64; 3] {
        self.translation
    }

    pub fn set_translation(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        self.translation = [
            require_finite(Self::NAME, "x translation", x)?,
            require_finite(Self::NAME, "y translation", y)?,
            require_finite(Self::NAME, "z translation", z)?,
        ];
        Ok(())
    }

    pub fn set_x_translation(&mut self, x: f64) -> Result<()> {
        self.translation[0] = require_finite(Self::NAME, "x translation", x)?;
        Ok(())
    }

    pub fn set_y_translation(&mut self, y: f64) -> Result<()> {
        self.translation[1] = require_finite(Self::NAME, "y translation", y)?;
        Ok(())
    }

    pub fn set_z_translation(&mut self, z: f64) -> Result<()> {
        self.translation[2] = require_finite(Self::NAME, "z translation", z)?;
        Ok(())
    }
}

impl NoiseModule for TranslatePoint<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let [tx, ty, tz] = self.translation;
        self.sources.get(0)?.get3(x + tx, y + ty, z + tz)
    }
}

type Matrix3 = [[f64; 3]; 3];

// Rotation about x, then y, then z (angles in radians): Rz * Ry * Rx
fn rotation_matrix(x: f64, y: f64, z: f64) -> Matrix3 {
    let (sx, cx) = x.sin_cos();
    let (sy, cy) = y.sin_cos();
    let (sz, cz) = z.sin_cos();
    [
        [cz * cy, cz * sy * sx - sz * cx, cz * sy * cx + sz * sx],
        [sz * cy, sz * sy * sx + cz * cx, sz * sy * cx - cz * sx],
        [-sy, cy * sx, cy * cx],
    ]
}

// Rotates the input coordinate about the origin before sampling the
// source. Angles are in degrees and applied about x, then y, then z.
pub struct RotatePoint<'a> {
    sources: SourceSlots<'a, 1>,
    angles: [f64; 3],
    matrix: Matrix3,
}

impl RotatePoint<'_> {
    pub const NAME: &'static str = "RotatePoint";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
            angles: [0.0; 3],
            matrix: rotation_matrix(0.0, 0.0, 0.0),
        }
    }

    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    pub fn set_angles(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        let angles = [
            require_finite(Self::NAME, "x angle", x)?,
            require_finite(Self::NAME, "y angle", y)?,
            require_finite(Self::NAME, "z angle", z)?,
        ];
        self.apply(angles);
        Ok(())
    }

    pub fn set_x_angle(&mut self, x: f64) -> Result<()> {
        let [_, y, z] = self.angles;
        self.set_angles(x, y, z)
    }

    pub fn set_y_angle(&mut self, y: f64) -> Result<()> {
        let [x, _, z] = self.angles;
        self.set_angles(x, y, z)
    }

    pub fn set_z_angle(&mut self, z: f64) -> Result<()> {
        let [x, y, _] = self.angles;
        self.set_angles(x, y, z)
    }

    fn apply(&mut self, angles: [f64; 3]) {
        let [x, y, z] = angles.map(f64::to_radians);
        self.angles = angles;
        self.matrix = rotation_matrix(x, y, z);
        log::debug!("{}: rotation matrix rebuilt for angles {:?}", Self::NAME, angles);
    }
}

impl NoiseModule for RotatePoint<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let source = self.sources.get(0)?;
        let m = &self.matrix;
        source.get3(
            m[0][0] * x + m[0][1] * y + m[0][2] * z,
            m[1][0] * x + m[1][1] * y + m[1][2] * z,
            m[2][0] * x + m[2][1] * y + m[2][2] * z,
        )
    }
}

const DISPLACE_X: usize = 1;
const DISPLACE_Y: usize = 2;
const DISPLACE_Z: usize = 3;

// Offsets each axis of the input coordinate by the output of its own
// displacement module (slots 1, 2, 3) before sampling source 0.
pub struct Displace<'a> {
    sources: SourceSlots<'a, 4>,
}

impl<'a> Displace<'a> {
    pub const NAME: &'static str = "Displace";

    pub fn new() -> Self {
        Self {
            sources: SourceSlots::new(Self::NAME),
        }
    }

    pub fn set_x_displace_module(&mut self, module: &'a dyn NoiseModule) {
        self.sources.set_slot::<DISPLACE_X>(module);
    }

    pub fn set_y_displace_module(&mut self, module: &'a dyn NoiseModule) {
        self.sources.set_slot::<DISPLACE_Y>(module);
    }

    pub fn set_z_displace_module(&mut self, module: &'a dyn NoiseModule) {
        self.sources.set_slot::<DISPLACE_Z>(module);
    }

    pub fn set_displace_modules(
        &mut self,
        x: &'a dyn NoiseModule,
        y: &'a dyn NoiseModule,
        z: &'a dyn NoiseModule,
    ) {
        self.set_x_displace_module(x);
        self.set_y_displace_module(y);
        self.set_z_displace_module(z);
    }
}

impl NoiseModule for Displace<'_> {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64> {
        let source = self.sources.get(0)?;
        let (dx, dy, dz) = (
            self.sources.get(DISPLACE_X)?,
            self.sources.get(DISPLACE_Y)?,
            self.sources.get(DISPLACE_Z)?,
        );
        source.get3(
            x + dx.get3(x, y, z)?,
            y + dy.get3(x, y, z)?,
            z + dz.get3(x, y, z)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoiseError;
    use crate::test_support::{AxisEcho, sample_points};
    use crate::{Const, Perlin};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn unit_scale_is_identity() {
        let perlin = Perlin::new();
        let mut scale = ScalePoint::new();
        scale.set_source_module(0, &perlin).unwrap();
        scale.set_scale(1.0, 1.0, 1.0).unwrap();
        for (x, y, z) in sample_points() {
            assert_eq!(scale.get3(x, y, z), perlin.get3(x, y, z));
        }
    }

    #[test]
    fn scale_multiplies_each_axis() {
        let echo = AxisEcho(1);
        let mut scale = ScalePoint::new();
        scale.set_source_module(0, &echo).unwrap();
        scale.set_y_scale(0.25).unwrap();
        assert_eq!(scale.get3(3.0, 2.0, 1.0), Ok(0.5));
        assert!(scale.set_z_scale(f64::INFINITY).is_err());
        assert_eq!(scale.scale(), [1.0, 0.25, 1.0]);
    }

    #[test]
    fn translate_offsets_each_axis() {
        let echo = AxisEcho(2);
        let mut translate = TranslatePoint::new();
        translate.set_source_module(0, &echo).unwrap();
        translate.set_z_translation(1.5).unwrap();
        assert_eq!(translate.get3(0.0, 0.0, 1.0), Ok(2.5));
        translate.set_translation(1.0, 2.0, -3.0).unwrap();
        assert_eq!(translate.get3(0.0, 0.0, 1.0), Ok(-2.0));
    }

    #[test]
    fn quarter_turn_about_z() {
        let echo_x = AxisEcho(0);
        let echo_y = AxisEcho(1);
        let mut rx = RotatePoint::new();
        rx.set_source_module(0, &echo_x).unwrap();
        rx.set_angles(0.0, 0.0, 90.0).unwrap();
        let mut ry = RotatePoint::new();
        ry.set_source_module(0, &echo_y).unwrap();
        ry.set_z_angle(90.0).unwrap();

        // (1, 0, 0) turns into (0, 1, 0)
        assert!(close(rx.get3(1.0, 0.0, 0.0).unwrap(), 0.0));
        assert!(close(ry.get3(1.0, 0.0, 0.0).unwrap(), 1.0));
    }

    #[test]
    fn rotation_applies_x_before_z() {
        let echo_z = AxisEcho(2);
        let mut rot = RotatePoint::new();
        rot.set_source_module(0, &echo_z).unwrap();
        rot.set_angles(90.0, 0.0, 90.0).unwrap();
        // about x: (0, 1, 0) -> (0, 0, 1); the z turn then leaves it alone
        assert!(close(rot.get3(0.0, 1.0, 0.0).unwrap(), 1.0));
    }

    #[test]
    fn rotation_preserves_distance() {
        let perlin = Perlin::new();
        let mut rot = RotatePoint::new();
        rot.set_source_module(0, &perlin).unwrap();
        rot.set_angles(33.0, -71.0, 12.5).unwrap();
        for row in rot.matrix {
            let len: f64 = row.iter().map(|v| v * v).sum();
            assert!(close(len, 1.0));
        }
        assert_eq!(rot.angles(), [33.0, -71.0, 12.5]);
    }

    #[test]
    fn displace_adds_module_outputs() {
        let echo = AxisEcho(0);
        let (dx, dy, dz) = (
            Const::with_value(0.5).unwrap(),
            Const::with_value(0.0).unwrap(),
            Const::with_value(0.0).unwrap(),
        );
        let mut displace = Displace::new();
        displace.set_source_module(0, &echo).unwrap();
        displace.set_displace_modules(&dx, &dy, &dz);
        assert_eq!(displace.get3(1.0, 7.0, 7.0), Ok(1.5));
        assert_eq!(displace.source_module_count(), 4);
    }

    #[test]
    fn displace_needs_every_axis() {
        let echo = AxisEcho(0);
        let dx = Const::new();
        let mut displace = Displace::new();
        displace.set_source_module(0, &echo).unwrap();
        displace.set_x_displace_module(&dx);
        displace.set_y_displace_module(&dx);
        assert_eq!(
            displace.get3(0.0, 0.0, 0.0),
            Err(NoiseError::NoSource {
                module: "Displace",
                index: 3
            })
        );
    }
}
