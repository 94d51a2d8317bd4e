// Interpolation curves shared by the noise primitives and the modules

// Linear interpolation between n0 (a = 0) and n1 (a = 1)
#[inline]
pub fn linear_interp(n0: f64, n1: f64, a: f64) -> f64 {
    n0 + a * (n1 - n0)
}

// Cubic interpolation through four evenly spaced samples.
// n1 and n2 are the values the curve passes through at a = 0 and a = 1,
// n0 and n3 only shape the tangents.
#[inline]
pub fn cubic_interp(n0: f64, n1: f64, n2: f64, n3: f64, a: f64) -> f64 {
    let p = (n3 - n2) - (n0 - n1);
    let q = (n0 - n1) - p;
    let r = n2 - n0;
    let s = n1;
    p * a * a * a + q * a * a + r * a + s
}

// Cubic s-curve: 3a^2 - 2a^3
// First derivative is zero at a = 0 and a = 1
#[inline]
pub fn s_curve3(a: f64) -> f64 {
    a * a * (3.0 - 2.0 * a)
}

// Quintic s-curve: 6a^5 - 15a^4 + 10a^3
// First and second derivatives are zero at a = 0 and a = 1,
// so lattice boundaries leave no visible creases
#[inline]
pub fn s_curve5(a: f64) -> f64 {
    a * a * a * (a * (a * 6.0 - 15.0) + 10.0)
}
