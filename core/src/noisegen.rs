// Stateless lattice noise primitives.
// Everything here is a pure function of (coordinate, seed), so the same
// inputs give bit-identical output on every call, thread and run.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use crate::interp::{linear_interp, s_curve3, s_curve5};

// Fidelity of coherent noise.
//
// The level only selects the interpolation curve applied across each
// lattice cell; the lattice values themselves are identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseQuality {
    // Linear interpolation. Visible creases at cell boundaries.
    Fast,
    // Cubic s-curve. Continuous first derivative.
    #[default]
    Standard,
    // Quintic s-curve. Continuous first and second derivatives.
    Best,
}

impl NoiseQuality {
    #[inline]
    pub fn curve(self, t: f64) -> f64 {
        match self {
            NoiseQuality::Fast => t,
            NoiseQuality::Standard => s_curve3(t),
            NoiseQuality::Best => s_curve5(t),
        }
    }
}

// Large odd primes, one per axis, used to spread lattice coordinates
// across the hash before mixing
const AXIS_PRIMES: [u32; 4] = [501_125_321, 1_136_930_381, 1_720_413_743, 1_066_037_191];
const HASH_MIX: u32 = 0x27d4_eb2d;

const D: f64 = FRAC_1_SQRT_2;
const R3: f64 = 0.577_350_269_189_625_8; // 1 / sqrt(3)

const GRADIENTS_1D: [[f64; 1]; 2] = [[1.0], [-1.0]];

const GRADIENTS_2D: [[f64; 2]; 8] = [
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [D, D],
    [-D, D],
    [D, -D],
    [-D, -D],
];

// The 12 cube edge directions, padded to 16 so the hash can be masked
const GRADIENTS_3D: [[f64; 3]; 16] = [
    [D, D, 0.0],
    [-D, D, 0.0],
    [D, -D, 0.0],
    [-D, -D, 0.0],
    [D, 0.0, D],
    [-D, 0.0, D],
    [D, 0.0, -D],
    [-D, 0.0, -D],
    [0.0, D, D],
    [0.0, -D, D],
    [0.0, D, -D],
    [0.0, -D, -D],
    [D, D, 0.0],
    [-D, D, 0.0],
    [0.0, -D, D],
    [0.0, -D, -D],
];

// Tesseract edge directions: one zero axis, the other three signed
const GRADIENTS_4D: [[f64; 4]; 32] = [
    [0.0, R3, R3, R3],
    [0.0, -R3, R3, R3],
    [0.0, R3, -R3, R3],
    [0.0, -R3, -R3, R3],
    [0.0, R3, R3, -R3],
    [0.0, -R3, R3, -R3],
    [0.0, R3, -R3, -R3],
    [0.0, -R3, -R3, -R3],
    [R3, 0.0, R3, R3],
    [-R3, 0.0, R3, R3],
    [R3, 0.0, -R3, R3],
    [-R3, 0.0, -R3, R3],
    [R3, 0.0, R3, -R3],
    [-R3, 0.0, R3, -R3],
    [R3, 0.0, -R3, -R3],
    [-R3, 0.0, -R3, -R3],
    [R3, R3, 0.0, R3],
    [-R3, R3, 0.0, R3],
    [R3, -R3, 0.0, R3],
    [-R3, -R3, 0.0, R3],
    [R3, R3, 0.0, -R3],
    [-R3, R3, 0.0, -R3],
    [R3, -R3, 0.0, -R3],
    [-R3, -R3, 0.0, -R3],
    [R3, R3, R3, 0.0],
    [-R3, R3, R3, 0.0],
    [R3, -R3, R3, 0.0],
    [-R3, -R3, R3, 0.0],
    [R3, R3, -R3, 0.0],
    [-R3, R3, -R3, 0.0],
    [R3, -R3, -R3, 0.0],
    [-R3, -R3, -R3, 0.0],
];

// Hash an integer lattice point of 1 to 4 dimensions together with a seed.
//
// Axes beyond the fourth are ignored.
#[inline]
pub fn lattice_hash<const N: usize>(seed: i32, lattice: [i32; N]) -> u32 {
    let mut hash = seed as u32;
    for (&coord, &prime) in lattice.iter().zip(AXIS_PRIMES.iter()) {
        hash ^= (coord as u32).wrapping_mul(prime);
    }
    hash = hash.wrapping_mul(HASH_MIX);
    hash ^= hash >> 15;
    hash.wrapping_mul(HASH_MIX) ^ (hash >> 13)
}

// Pseudo-random integer in [0, 2^31 - 1] for a 3D lattice point.
#[inline]
pub fn int_value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> i32 {
    (lattice_hash(seed, [x, y, z]) & 0x7fff_ffff) as i32
}

// Pseudo-random value in (-1, 1] for a 3D lattice point.
#[inline]
pub fn value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> f64 {
    1.0 - int_value_noise_3d(x, y, z, seed) as f64 / 1_073_741_824.0
}

// Value noise interpolated between the eight surrounding lattice points.
pub fn value_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    coherent([x, y, z], quality, |[ix, iy, iz]| value_noise_3d(ix, iy, iz, seed))
}

// Gradient contribution of lattice point (ix, iy, iz) at (fx, fy, fz):
// the dot product of the lattice gradient with the offset to the point.
#[inline]
pub fn gradient_noise_3d(fx: f64, fy: f64, fz: f64, ix: i32, iy: i32, iz: i32, seed: i32) -> f64 {
    gradient_dot([fx, fy, fz], [ix, iy, iz], seed)
}

pub fn gradient_coherent_noise_1d(x: f64, seed: i32, quality: NoiseQuality) -> f64 {
    coherent_gradient([x], seed, quality)
}

pub fn gradient_coherent_noise_2d(x: f64, y: f64, seed: i32, quality: NoiseQuality) -> f64 {
    coherent_gradient([x, y], seed, quality)
}

// Gradient (Perlin) noise in [-1, 1]. Exactly zero on lattice points.
pub fn gradient_coherent_noise_3d(
    x: f64,
    y: f64,
    z: f64,
    seed: i32,
    quality: NoiseQuality,
) -> f64 {
    coherent_gradient([x, y, z], seed, quality)
}

pub fn gradient_coherent_noise_4d(
    x: f64,
    y: f64,
    z: f64,
    w: f64,
    seed: i32,
    quality: NoiseQuality,
) -> f64 {
    coherent_gradient([x, y, z, w], seed, quality)
}

// Wrap a coordinate into the range the 32-bit lattice can address,
// so very large inputs keep their fractional precision.
pub fn make_int32_range(n: f64) -> f64 {
    const HALF: f64 = 1_073_741_824.0; // 2^30
    if (-HALF..HALF).contains(&n) {
        n
    } else {
        (n + HALF).rem_euclid(2.0 * HALF) - HALF
    }
}

#[inline]
fn gradient_dot<const N: usize>(point: [f64; N], lattice: [i32; N], seed: i32) -> f64 {
    let hash = lattice_hash(seed, lattice) as usize;
    // scale brings the coherent sum of unit gradients (at most sqrt(N)/2) to 1
    let (gradient, scale): (&[f64], f64) = match N {
        1 => (&GRADIENTS_1D[hash & 1], 2.0),
        2 => (&GRADIENTS_2D[hash & 7], SQRT_2),
        3 => (&GRADIENTS_3D[hash & 15], 1.154_700_538_379_251_5),
        _ => (&GRADIENTS_4D[hash & 31], 1.0),
    };
    let dot: f64 = gradient
        .iter()
        .zip(point.iter().zip(lattice.iter()))
        .map(|(g, (p, l))| g * (p - *l as f64))
        .sum();
    dot * scale
}

fn coherent_gradient<const N: usize>(point: [f64; N], seed: i32, quality: NoiseQuality) -> f64 {
    coherent(point, quality, |lattice| gradient_dot(point, lattice, seed)).clamp(-1.0, 1.0)
}

// Evaluate `corner` on the 2^N lattice points around `point`, then collapse
// the corners one axis at a time with the quality curve.
// Corner index bit k selects the upper lattice line on axis k.
fn coherent<const N: usize>(
    point: [f64; N],
    quality: NoiseQuality,
    corner: impl Fn([i32; N]) -> f64,
) -> f64 {
    debug_assert!((1..=4).contains(&N));
    let mut base = [0i32; N];
    let mut weights = [0.0f64; N];
    for axis in 0..N {
        let floor = point[axis].floor();
        base[axis] = floor as i32;
        weights[axis] = quality.curve(point[axis] - floor);
    }

    let mut corners = [0.0f64; 16];
    let mut len = 1usize << N;
    for (index, value) in corners.iter_mut().take(len).enumerate() {
        let mut lattice = base;
        for (axis, cell) in lattice.iter_mut().enumerate() {
            *cell = cell.wrapping_add(((index >> axis) & 1) as i32);
        }
        *value = corner(lattice);
    }

    for &weight in &weights {
        len /= 2;
        for i in 0..len {
            corners[i] = linear_interp(corners[2 * i], corners[2 * i + 1], weight);
        }
    }
    corners[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUALITIES: [NoiseQuality; 3] =
        [NoiseQuality::Fast, NoiseQuality::Standard, NoiseQuality::Best];

    fn sample_points() -> impl Iterator<Item = (f64, f64, f64)> {
        (0..400).map(|i| {
            let t = i as f64;
            (t * 0.173 - 30.0, t * 0.291 - 51.7, (t * 0.057).sin() * 40.0)
        })
    }

    #[test]
    fn hash_is_deterministic_and_seeded() {
        assert_eq!(lattice_hash(7, [1, 2, 3]), lattice_hash(7, [1, 2, 3]));
        assert_ne!(lattice_hash(7, [1, 2, 3]), lattice_hash(8, [1, 2, 3]));
        assert_ne!(lattice_hash(7, [1, 2, 3]), lattice_hash(7, [3, 2, 1]));
    }

    #[test]
    fn hash_spreads_gradient_indices() {
        let mut buckets = [0usize; 16];
        for x in 0..32 {
            for y in 0..32 {
                buckets[lattice_hash(0, [x, y, 0]) as usize & 15] += 1;
            }
        }
        // 1024 samples over 16 buckets, expect 64 each
        assert!(buckets.iter().all(|&count| count > 30 && count < 110), "{buckets:?}");
    }

    #[test]
    fn value_noise_range() {
        for x in -20..20 {
            for z in -20..20 {
                let v = value_noise_3d(x, x * 3, z, 11);
                assert!(v > -1.0 && v <= 1.0);
            }
        }
    }

    #[test]
    fn gradient_noise_vanishes_on_lattice() {
        for quality in QUALITIES {
            assert_eq!(gradient_coherent_noise_3d(0.0, 0.0, 0.0, 0, quality), 0.0);
            assert_eq!(gradient_coherent_noise_3d(4.0, -7.0, 12.0, 99, quality), 0.0);
            assert_eq!(gradient_coherent_noise_2d(-3.0, 5.0, 1, quality), 0.0);
            assert_eq!(gradient_coherent_noise_4d(1.0, 2.0, 3.0, 4.0, 1, quality), 0.0);
        }
    }

    #[test]
    fn gradient_noise_range_all_dimensions() {
        for quality in QUALITIES {
            for (x, y, z) in sample_points() {
                let values = [
                    gradient_coherent_noise_1d(x, 3, quality),
                    gradient_coherent_noise_2d(x, y, 3, quality),
                    gradient_coherent_noise_3d(x, y, z, 3, quality),
                    gradient_coherent_noise_4d(x, y, z, x - y, 3, quality),
                ];
                assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)), "{values:?}");
            }
        }
    }

    #[test]
    fn gradient_noise_is_not_flat() {
        let spread: f64 = sample_points()
            .map(|(x, y, z)| gradient_coherent_noise_3d(x, y, z, 0, NoiseQuality::Standard).abs())
            .sum();
        assert!(spread > 10.0);
    }

    #[test]
    fn coherent_noise_is_continuous_across_cells() {
        let eps = 1e-7;
        for quality in QUALITIES {
            let below = gradient_coherent_noise_3d(2.0 - eps, 0.3, 0.6, 5, quality);
            let above = gradient_coherent_noise_3d(2.0 + eps, 0.3, 0.6, 5, quality);
            assert!((below - above).abs() < 1e-5);
        }
    }

    #[test]
    fn value_coherent_matches_lattice_values() {
        let v = value_coherent_noise_3d(3.0, -2.0, 8.0, 4, NoiseQuality::Best);
        assert_eq!(v, value_noise_3d(3, -2, 8, 4));
    }

    #[test]
    fn int32_range_wraps_large_inputs() {
        assert_eq!(make_int32_range(12.5), 12.5);
        let wrapped = make_int32_range(3.0e12 + 0.25);
        assert!(wrapped.abs() <= 1_073_741_824.0);
        assert_eq!(wrapped - wrapped.floor(), 0.25);
    }
}
