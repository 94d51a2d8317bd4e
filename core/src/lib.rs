// coherent: composable coherent-noise modules
//
// Generators produce noise straight from a coordinate, every other module
// borrows one or more source modules and is evaluated by pulling values
// through the graph from its root.
pub mod billow;
pub mod combiner;
pub mod constant;
pub mod curve;
pub mod error;
pub mod fractal;
pub mod interp;
pub mod modifier;
pub mod noisegen;
pub mod perlin;
pub mod ridged;
pub mod rings;
pub mod select;
pub mod source;
pub mod terrace;
pub mod transform;
pub mod turbulence;
pub mod utils;
pub mod voronoi;

pub use billow::Billow;
pub use combiner::{Add, Max, Min, Multiply, Power};
pub use constant::{Checkerboard, Const};
pub use curve::Curve;
pub use error::{NoiseError, Result};
pub use fractal::{FractalConfig, MAX_OCTAVE};
pub use modifier::{Abs, Clamp, Exponent, Invert, ScaleBias};
pub use noisegen::NoiseQuality;
pub use perlin::Perlin;
pub use ridged::{RidgedConfig, RidgedMulti};
pub use rings::{Cylinders, Spheres};
pub use select::{Blend, Select};
pub use source::SourceSlots;
pub use terrace::Terrace;
pub use transform::{Displace, RotatePoint, ScalePoint, TranslatePoint};
pub use turbulence::{Turbulence, TurbulenceConfig};
pub use utils::{CylinderBuilder, NoiseMap, PlaneBuilder, SphereBuilder};
pub use voronoi::{Voronoi, VoronoiConfig};

// A node of a noise graph: maps a coordinate to a scalar.
//
// Output is nominally in [-1, 1], though combinators may leave that range.
// Evaluation never mutates the module, so one instance can feed many
// combinators and be sampled from many threads at once; only the setters
// need exclusive access.
pub trait NoiseModule: Send + Sync {
    // Number of source modules that must be wired in before evaluation.
    fn source_module_count(&self) -> usize;

    // Sample the module at (x, y, z).
    //
    // Fails with [`NoiseError::NoSource`] when any required source module
    // anywhere below this one has not been set.
    fn get3(&self, x: f64, y: f64, z: f64) -> Result<f64>;

    // Sample the z = 0 plane.
    fn get2(&self, x: f64, y: f64) -> Result<f64> {
        self.get3(x, y, 0.0)
    }
}
