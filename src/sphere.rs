// Copyright (c) 2020-2024 Via Technology Ltd. All Rights Reserved.

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

//! The sphere module contains types and functions for calculating distances,
//! bearings and positions on the surface of a sphere using spherical
//! trigonometry.
//!
//! Positions are represented by n-vectors: unit vectors from the centre of
//! the sphere normal to its surface, see `Vector3d`.
//! The `LatLon` point type and its great circle calculations are in the
//! `latlon` module, path intersection is in the `intersection` module.

pub mod intersection;
pub mod latlon;

pub use intersection::intersection;
pub use latlon::{mean_of, LatLon};

extern crate nalgebra as na;
use crate::trig::{degrees180, degrees90, fsum, hsin};
use contracts::{debug_ensures, debug_requires};
use tracing::trace;

/// A `Vector3d` is a nalgebra Vector3.
pub type Vector3d = na::Vector3<f64>;

/// Create an n-vector from a latitude and longitude.
/// * `lat` - the latitude in radians.
/// * `lon` - the longitude in radians.
///
/// returns a `Vector3d` on the unit sphere.
#[debug_ensures(is_unit(&ret))]
#[must_use]
pub fn to_sphere(lat: f64, lon: f64) -> Vector3d {
    let (sa, ca) = libm::sincos(lat);
    let (sb, cb) = libm::sincos(lon);
    Vector3d::new(ca * cb, ca * sb, sa)
}

/// Calculate the latitude and longitude of a vector.
/// The vector does not need to be a unit vector.
///
/// returns the latitude and longitude in degrees.
#[must_use]
pub fn to_lat_lon(v: &Vector3d) -> (f64, f64) {
    let a = libm::atan2(v.z, libm::hypot(v.x, v.y));
    let b = libm::atan2(v.y, v.x);
    (degrees90(a), degrees180(b))
}

/// Determine whether a `Vector3d` is a unit vector.
///
/// returns true if the vector is a unit vector, false otherwise.
#[must_use]
pub fn is_unit(a: &Vector3d) -> bool {
    const MIN_POINT_SQ_LENGTH: f64 = 1.0 - 12.0 * std::f64::EPSILON;
    const MAX_POINT_SQ_LENGTH: f64 = 1.0 + 12.0 * std::f64::EPSILON;

    (MIN_POINT_SQ_LENGTH..=MAX_POINT_SQ_LENGTH).contains(&(a.norm()))
}

/// Calculate the angle between two vectors.
/// * `a`, `b` - the vectors.
/// * `sign` - an optional vector: the angle is negative if the normal of
///   `a` and `b` points away from it.
///
/// returns the angle in radians: 0 to PI, or -PI to PI if signed.
#[debug_ensures(libm::fabs(ret) <= std::f64::consts::PI)]
#[must_use]
pub fn angle_to(a: &Vector3d, b: &Vector3d, sign: Option<&Vector3d>) -> f64 {
    let x = a.cross(b);
    let s = x.norm();
    let s = match sign {
        Some(v) if x.dot(v) < 0.0 => -s,
        _ => s,
    };
    libm::atan2(s, a.dot(b))
}

/// Calculate the sum of vectors, summing each component with `fsum`.
#[must_use]
pub fn sum_of<'a, I>(vectors: I) -> Vector3d
where
    I: IntoIterator<Item = &'a Vector3d>,
{
    let (xs, (ys, zs)): (Vec<f64>, (Vec<f64>, Vec<f64>)) =
        vectors.into_iter().map(|v| (v.x, (v.y, v.z))).unzip();
    Vector3d::new(fsum(xs), fsum(ys), fsum(zs))
}

/// Convert a haversine value into an angle.
/// A value outside the range 0.0 to 1.0 due to floating point errors is
/// treated as 0 if it is less than 0.5, otherwise PI.
///
/// returns the angle in radians.
#[debug_ensures((0.0..=std::f64::consts::PI).contains(&ret) || h.is_nan())]
#[must_use]
pub fn haversine_angle(h: f64) -> f64 {
    if (0.0..=1.0).contains(&h) {
        2.0 * libm::atan2(libm::sqrt(h), libm::sqrt(1.0 - h))
    } else {
        trace!(h, "haversine out of range");
        if h < 0.5 {
            0.0
        } else {
            std::f64::consts::PI
        }
    }
}

/// Calculate the great circle distance between two positions using the
/// haversine formula.
/// * `a1`, `a2` - the latitudes in radians.
/// * `db` - the difference in longitude in radians.
///
/// returns the angular distance in radians.
#[must_use]
pub fn haversine_distance(a1: f64, a2: f64, db: f64) -> f64 {
    let h = hsin(a2 - a1) + libm::cos(a1) * libm::cos(a2) * hsin(db);
    haversine_angle(h)
}

/// Calculate the destination along a great circle.
/// * `a`, `b` - the start latitude and longitude in radians.
/// * `r` - the angular distance in radians.
/// * `t` - the initial bearing in radians.
///
/// returns the latitude and longitude of the destination in degrees.
#[debug_requires(r.is_finite() && t.is_finite())]
#[must_use]
pub fn destination_point(a: f64, b: f64, r: f64, t: f64) -> (f64, f64) {
    let (sa, ca) = libm::sincos(a);
    let (sr, cr) = libm::sincos(r);
    let (st, ct) = libm::sincos(t);

    let a2 = libm::asin(ct * sr * ca + cr * sa);
    let b2 = b + libm::atan2(st * sr * ca, cr - sa * libm::sin(a2));
    (degrees90(a2), degrees180(b2))
}
