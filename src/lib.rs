// Copyright (c) 2018-2024 Via Technology Ltd.

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

//! This library uses spherical trigonometry and vectors to calculate
//! geodetic quantities between points on a spherical model of the Earth:
//! distance, bearing, destination, midpoint, intersection, cross-track
//! distance, enclosure and geographic mean.
//!
//! The `latlong` module contains the `LatLonBase` trait and the
//! `LatLonHeightBase` type that stores a latitude, longitude and height and
//! lazily caches the position in radians. It also validates polygons and
//! determines their winding direction.
//!
//! The `sphere` module contains the spherical `LatLon` point type and the
//! great circle calculations between `LatLon` points. The `trig` module
//! contains angle types and functions, the `dms` module parses and formats
//! angles in degrees, minutes and seconds.
//!
//! The library uses the [contracts](https://crates.io/crates/contracts) crate
//! to implement Design By Contract [(DbC)](https://wiki.c2.com/?DesignByContract).  
//! It also defines a `Validate` trait to define an `is_valid` invariant
//! function to support Design By Contract invariants.
//!
//! # Examples
//! ```
//! use sphere_trig::sphere::LatLon;
//! use sphere_trig::trig::R_M;
//!
//! let p = LatLon::new(52.205, 0.119, 0.0);
//! let q = LatLon::new(48.857, 2.351, 0.0);
//! let d = p.distance_to(&q, R_M).unwrap();
//! assert!(sphere_trig::is_within_tolerance(404_279.720_589, d, 1.0e-6));
//! ```

pub mod dms;
pub mod error;
pub mod latlong;
pub mod sphere;
pub mod trig;

pub use error::{Error, ErrorKind, IntersectionKind, Result};
pub use latlong::{isclockwise, LatLonBase, LatLonHeightBase};
pub use sphere::{intersection, mean_of, LatLon};

use contracts::{debug_ensures, debug_requires};

/// The smaller of two values, `a` if they are equal.
#[inline]
#[must_use]
pub fn min<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

/// The larger of two values, `b` if they are equal.
#[inline]
#[must_use]
pub fn max<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

/// Limit a value to the range `lower` to `upper` inclusive.
/// Used to keep the arguments of `acos` and `asin` within their domain.
#[debug_requires(lower <= upper)]
#[debug_ensures((lower..=upper).contains(&ret))]
#[inline]
#[must_use]
pub fn clamp<T: PartialOrd + Copy>(value: T, lower: T, upper: T) -> T {
    max(lower, min(value, upper))
}

/// The Validate trait.
pub trait Validate {
    /// return true if the type is valid, false otherwise.
    fn is_valid(&self) -> bool;
}

/// Check whether a value is within tolerance of a reference value.
/// * `reference` the required value
/// * `value` the value to test
/// * `tolerance` the permitted absolute difference
///
/// return true if abs(reference - value) is <= tolerance
#[debug_requires(tolerance >= 0.0)]
#[inline]
#[must_use]
pub fn is_within_tolerance(reference: f64, value: f64, tolerance: f64) -> bool {
    libm::fabs(reference - value) <= tolerance
}
