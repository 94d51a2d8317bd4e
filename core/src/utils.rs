// Noise maps: a module sampled over a 2D grid.
// The builders here only consume the evaluate contract; turning a map into
// pixels is left to the caller.

use crate::NoiseModule;
use crate::error::{NoiseError, Result};
use crate::interp::linear_interp;
use crate::source::SourceSlots;

// 2D noise map: row-major Vec<Vec<f32>> of size height x width,
// access as `map[y][x]`.
pub type NoiseMap = Vec<Vec<f32>>;

// flatten a 2D noise map (row-major) into a single Vec<f32>,
// e.g. for handing to an image buffer
pub fn flatten2(map: &NoiseMap) -> Vec<f32> {
    map.iter().flat_map(|row| row.iter().cloned()).collect()
}

// (min, max) over the whole map; None for an empty map
pub fn bounds2(map: &NoiseMap) -> Option<(f32, f32)> {
    map.iter().flatten().fold(None, |acc, &val| match acc {
        None => Some((val, val)),
        Some((min, max)) => Some((min.min(val), max.max(val))),
    })
}

// Stretch the map linearly onto [0, 1]
pub fn normalize2(map: &mut NoiseMap) {
    let Some((min, max)) = bounds2(map) else {
        return;
    };
    let range = (max - min).max(f32::EPSILON); // flat maps go to 0
    for val in map.iter_mut().flatten() {
        *val = (*val - min) / range;
    }
}

fn check_size(builder: &'static str, width: usize, height: usize) -> Result<()> {
    for (parameter, value) in [("destination width", width), ("destination height", height)] {
        if value == 0 {
            return Err(NoiseError::InvalidParameter {
                module: builder,
                parameter,
                value: 0.0,
                reason: "must be at least one",
            });
        }
    }
    Ok(())
}

fn check_bounds(builder: &'static str, lower: f64, upper: f64) -> Result<(f64, f64)> {
    if lower.is_finite() && upper.is_finite() && lower < upper {
        Ok((lower, upper))
    } else {
        Err(NoiseError::InvalidBounds {
            module: builder,
            lower,
            upper,
        })
    }
}

// Fill a height x width map row by row; the first failing sample aborts the build
fn fill(
    builder: &'static str,
    width: usize,
    height: usize,
    sample: impl Fn(usize, usize) -> Result<f64>,
) -> Result<NoiseMap> {
    log::debug!("{builder}: building {width}x{height} noise map");
    let map = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| sample(x, y).map(|v| v as f32))
                .collect::<Result<Vec<f32>>>()
        })
        .collect::<Result<NoiseMap>>()?;
    log::debug!("{builder}: noise map done");
    Ok(map)
}

// Samples a module over a rectangle of the y = 0 plane.
//
// Map column x covers the range [lower_x, upper_x), rows cover
// [lower_z, upper_z). With seamless tiling on, each value is blended with
// the samples one period away so opposite edges of the map match up.
pub struct PlaneBuilder<'a> {
    source: SourceSlots<'a, 1>,
    width: usize,
    height: usize,
    x_bounds: (f64, f64),
    z_bounds: (f64, f64),
    seamless: bool,
}

impl<'a> PlaneBuilder<'a> {
    pub const NAME: &'static str = "PlaneBuilder";

    pub fn new() -> Self {
        Self {
            source: SourceSlots::new(Self::NAME),
            width: 0,
            height: 0,
            x_bounds: (-1.0, 1.0),
            z_bounds: (-1.0, 1.0),
            seamless: false,
        }
    }

    pub fn set_source_module(&mut self, module: &'a dyn NoiseModule) {
        self.source.set_slot::<0>(module);
    }

    pub fn set_dest_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn set_bounds(
        &mut self,
        lower_x: f64,
        upper_x: f64,
        lower_z: f64,
        upper_z: f64,
    ) -> Result<()> {
        let x_bounds = check_bounds(Self::NAME, lower_x, upper_x)?;
        self.z_bounds = check_bounds(Self::NAME, lower_z, upper_z)?;
        self.x_bounds = x_bounds;
        Ok(())
    }

    pub fn enable_seamless(&mut self, enable: bool) {
        self.seamless = enable;
    }

    pub fn is_seamless(&self) -> bool {
        self.seamless
    }

    pub fn build(&self) -> Result<NoiseMap> {
        let module = self.source.get(0)?;
        check_size(Self::NAME, self.width, self.height)?;
        let (lower_x, upper_x) = self.x_bounds;
        let (lower_z, upper_z) = self.z_bounds;
        let (x_extent, z_extent) = (upper_x - lower_x, upper_z - lower_z);
        let x_delta = x_extent / self.width as f64;
        let z_delta = z_extent / self.height as f64;

        fill(Self::NAME, self.width, self.height, |col, row| {
            let x = lower_x + col as f64 * x_delta;
            let z = lower_z + row as f64 * z_delta;
            if !self.seamless {
                return module.get3(x, 0.0, z);
            }
            let sw = module.get3(x, 0.0, z)?;
            let se = module.get3(x + x_extent, 0.0, z)?;
            let nw = module.get3(x, 0.0, z + z_extent)?;
            let ne = module.get3(x + x_extent, 0.0, z + z_extent)?;
            let x_blend = 1.0 - (x - lower_x) / x_extent;
            let z_blend = 1.0 - (z - lower_z) / z_extent;
            let south = linear_interp(sw, se, x_blend);
            let north = linear_interp(nw, ne, x_blend);
            Ok(linear_interp(south, north, z_blend))
        })
    }
}

impl Default for PlaneBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// Samples a module over the surface of a unit-radius cylinder around the
// y axis. Columns run over the angle (degrees), rows over the height.
pub struct CylinderBuilder<'a> {
    source: SourceSlots<'a, 1>,
    width: usize,
    height: usize,
    angle_bounds: (f64, f64),
    height_bounds: (f64, f64),
}

impl<'a> CylinderBuilder<'a> {
    pub const NAME: &'static str = "CylinderBuilder";

    pub fn new() -> Self {
        Self {
            source: SourceSlots::new(Self::NAME),
            width: 0,
            height: 0,
            angle_bounds: (-180.0, 180.0),
            height_bounds: (-1.0, 1.0),
        }
    }

    pub fn set_source_module(&mut self, module: &'a dyn NoiseModule) {
        self.source.set_slot::<0>(module);
    }

    pub fn set_dest_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn set_bounds(
        &mut self,
        lower_angle: f64,
        upper_angle: f64,
        lower_height: f64,
        upper_height: f64,
    ) -> Result<()> {
        let angle_bounds = check_bounds(Self::NAME, lower_angle, upper_angle)?;
        self.height_bounds = check_bounds(Self::NAME, lower_height, upper_height)?;
        self.angle_bounds = angle_bounds;
        Ok(())
    }

    pub fn build(&self) -> Result<NoiseMap> {
        let module = self.source.get(0)?;
        check_size(Self::NAME, self.width, self.height)?;
        let (lower_angle, upper_angle) = self.angle_bounds;
        let (lower_height, upper_height) = self.height_bounds;
        let angle_delta = (upper_angle - lower_angle) / self.width as f64;
        let height_delta = (upper_height - lower_height) / self.height as f64;

        fill(Self::NAME, self.width, self.height, |col, row| {
            let angle = (lower_angle + col as f64 * angle_delta).to_radians();
            let y = lower_height + row as f64 * height_delta;
            module.get3(angle.cos(), y, angle.sin())
        })
    }
}

impl Default for CylinderBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// Point on the unit sphere for a latitude/longitude pair in degrees
fn lat_lon_to_xyz(lat: f64, lon: f64) -> (f64, f64, f64) {
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    (cos_lat * cos_lon, sin_lat, cos_lat * sin_lon)
}

// Samples a module over the surface of the unit sphere. Columns run over
// longitude, rows over latitude, both in degrees.
pub struct SphereBuilder<'a> {
    source: SourceSlots<'a, 1>,
    width: usize,
    height: usize,
    lat_bounds: (f64, f64),
    lon_bounds: (f64, f64),
}

impl<'a> SphereBuilder<'a> {
    pub const NAME: &'static str = "SphereBuilder";

    pub fn new() -> Self {
        Self {
            source: SourceSlots::new(Self::NAME),
            width: 0,
            height: 0,
            lat_bounds: (-90.0, 90.0),
            lon_bounds: (-180.0, 180.0),
        }
    }

    pub fn set_source_module(&mut self, module: &'a dyn NoiseModule) {
        self.source.set_slot::<0>(module);
    }

    pub fn set_dest_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    // Bounds as (south, north, west, east).
    pub fn set_bounds(&mut self, south: f64, north: f64, west: f64, east: f64) -> Result<()> {
        let lat_bounds = check_bounds(Self::NAME, south, north)?;
        self.lon_bounds = check_bounds(Self::NAME, west, east)?;
        self.lat_bounds = lat_bounds;
        Ok(())
    }

    pub fn build(&self) -> Result<NoiseMap> {
        let module = self.source.get(0)?;
        check_size(Self::NAME, self.width, self.height)?;
        let (south, north) = self.lat_bounds;
        let (west, east) = self.lon_bounds;
        let lon_delta = (east - west) / self.width as f64;
        let lat_delta = (north - south) / self.height as f64;

        fill(Self::NAME, self.width, self.height, |col, row| {
            let lat = south + row as f64 * lat_delta;
            let lon = west + col as f64 * lon_delta;
            let (x, y, z) = lat_lon_to_xyz(lat, lon);
            module.get3(x, y, z)
        })
    }
}

impl Default for SphereBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
