// Copyright (c) 2020-2024 Via Technology Ltd. All Rights Reserved.
// Consult your license regarding permissions and restrictions.

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The trig module contains functions for performing trigonometric
//! calculations: latitude and longitude range checks, wrapping angles into
//! their conventional ranges, the haversine function and accurate floating
//! point summation.
//!
//! It also contains the mean earth radii used to convert angular distances
//! on the unit sphere into physical distances.

#![allow(clippy::float_cmp)]

use contracts::debug_ensures;

/// The mean earth radius in metres.
pub const R_M: f64 = 6_371_008.771_415;

/// The mean earth radius in kilometres.
pub const R_KM: f64 = R_M * 1.0e-3;

/// The mean earth radius in nautical miles.
pub const R_NM: f64 = R_M / 1852.0;

/// The mean earth radius in statute miles.
pub const R_SM: f64 = R_M / 1609.344;

/// The machine epsilon, the threshold for "near zero" tests.
pub const EPS: f64 = std::f64::EPSILON;

/// One minus `EPS`, the threshold for "near one" tests.
pub const EPS1: f64 = 1.0 - EPS;

/// Two times Pi.
pub const PI2: f64 = 2.0 * std::f64::consts::PI;

/// Test whether a value is a valid latitude.
/// I.e. whether it lies in the range: -90.0 <= value <= 90.0
#[must_use]
pub fn is_latitude(value: f64) -> bool {
    (-90.0..=90.0).contains(&value)
}

/// Test whether a value is a valid longitude.
/// I.e. whether it lies in the range: -180.0 <= value <= 180.0
#[must_use]
pub fn is_longitude(value: f64) -> bool {
    (-180.0..=180.0).contains(&value)
}

/// Wrap an angle in degrees into the range: -180.0 < value <= 180.0
/// # Examples
/// ```
/// use sphere_trig::trig::wrap180;
///
/// assert_eq!(180.0, wrap180(-180.0));
/// assert_eq!(-179.0, wrap180(181.0));
/// assert_eq!(1.0, wrap180(721.0));
/// ```
#[must_use]
pub fn wrap180(deg: f64) -> f64 {
    let w = libm::fmod(deg, 360.0);
    if w > 180.0 {
        w - 360.0
    } else if w <= -180.0 {
        w + 360.0
    } else {
        w
    }
}

/// Wrap an angle in degrees into the latitude range: -90.0 <= value <= 90.0
/// Angles beyond a pole are reflected back over it.
/// # Examples
/// ```
/// use sphere_trig::trig::wrap90;
///
/// assert_eq!(90.0, wrap90(90.0));
/// assert_eq!(89.0, wrap90(91.0));
/// assert_eq!(-89.0, wrap90(-91.0));
/// ```
#[must_use]
pub fn wrap90(deg: f64) -> f64 {
    let w = wrap180(deg);
    if w > 90.0 {
        180.0 - w
    } else if w < -90.0 {
        -180.0 - w
    } else {
        w
    }
}

/// Wrap an angle in degrees into the compass range: 0.0 <= value < 360.0
#[debug_ensures(!deg.is_finite() || (0.0..360.0).contains(&ret))]
#[must_use]
pub fn wrap360(deg: f64) -> f64 {
    let w = libm::fmod(deg, 360.0);
    let w = if w < 0.0 { w + 360.0 } else { w };
    // a tiny negative value rounds up to 360.0
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

/// Wrap an angle in radians into the range: -PI < value <= PI
#[must_use]
pub fn wrap_pi(rad: f64) -> f64 {
    let w = libm::fmod(rad, PI2);
    if w > std::f64::consts::PI {
        w - PI2
    } else if w <= -std::f64::consts::PI {
        w + PI2
    } else {
        w
    }
}

/// Convert radians to a latitude in degrees, see `wrap90`.
#[must_use]
pub fn degrees90(rad: f64) -> f64 {
    wrap90(rad.to_degrees())
}

/// Convert radians to a longitude in degrees, see `wrap180`.
#[must_use]
pub fn degrees180(rad: f64) -> f64 {
    wrap180(rad.to_degrees())
}

/// Convert radians to a compass bearing in degrees, see `wrap360`.
#[must_use]
pub fn degrees360(rad: f64) -> f64 {
    wrap360(rad.to_degrees())
}

/// The haversine function: the square of the sine of half the angle.
/// * `rad` the angle in radians.
#[debug_ensures((0.0..=1.0).contains(&ret) || !rad.is_finite())]
#[must_use]
pub fn hsin(rad: f64) -> f64 {
    let s = libm::sin(0.5 * rad);
    s * s
}

/// The weighted average of two values.
/// * `a`, `b` the values.
/// * `f` the weight of `b`: 0.0 returns `a`, 1.0 returns `b`.
#[must_use]
pub fn favg(a: f64, b: f64, f: f64) -> f64 {
    a + f * (b - a)
}

/// The accurate sum of floating point values.
/// Sums values without the cancellation errors of naive addition using
/// Shewchuk's algorithm of non-overlapping partial sums, so the result
/// does not depend upon the order of the values.
/// # Examples
/// ```
/// use sphere_trig::trig::fsum;
///
/// let values = [1.0e100, 1.0, -1.0e100, 1.0e-100];
/// assert_eq!(1.0, fsum(values));
/// ```
#[must_use]
pub fn fsum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut partials: Vec<f64> = Vec::new();
    for value in values {
        let mut x = value;
        let mut i = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if libm::fabs(x) < libm::fabs(y) {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[i] = lo;
                i += 1;
            }
            x = hi;
        }
        partials.truncate(i);
        partials.push(x);
    }

    let mut n = partials.len();
    if n == 0 {
        return 0.0;
    }

    // sum the partials from the largest, stopping at the first inexact sum
    n -= 1;
    let mut hi = partials[n];
    let mut lo = 0.0;
    while n > 0 {
        n -= 1;
        let x = hi;
        let y = partials[n];
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }

    // round half even, correcting for the next partial
    if n > 0 && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0)) {
        let y = 2.0 * lo;
        let x = hi + y;
        if y == x - hi {
            hi = x;
        }
    }
    hi
}
