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

//! The intersection module contains functions for calculating the
//! intersection of two paths on the surface of a sphere, each defined by a
//! start point and an initial bearing.

use super::{destination_point, haversine_distance, LatLon};
use crate::error::{Error, IntersectionKind, Result};
use crate::latlong::LatLonBase;
use crate::trig::{favg, wrap_pi, EPS, PI2};
use crate::{clamp, min};
use tracing::debug;

/// Calculate the intersection of two paths.
/// * `start1` - the start point of the first path.
/// * `bearing1` - the initial bearing of the first path in degrees.
/// * `start2` - the start point of the second path.
/// * `bearing2` - the initial bearing of the second path in degrees.
///
/// returns the intersection point in front of the start points, at the
/// average height of the start points.
/// # Errors
/// `Error::Intersection` if:
/// * the start points coincide or a start point is at a pole: `Parallel`,
/// * the paths coincide: `Infinite`,
/// * the paths only meet behind a start point: `Ambiguous`.
///
/// `Error::TypeMismatch` if a start point is not compatible with a `LatLon`.
/// # Examples
/// ```
/// use sphere_trig::{intersection, LatLon, LatLonBase};
///
/// let p = LatLon::new(51.8853, 0.2545, 0.0);
/// let s = LatLon::new(49.0034, 2.5735, 0.0);
/// let i = intersection(&p, 108.547, &s, 32.435).unwrap();
/// assert_eq!("50.9078°N, 004.5084°E", i.to_str(sphere_trig::dms::Format::D, Some(4)));
/// ```
#[allow(clippy::similar_names)]
pub fn intersection<P1, P2>(
    start1: &P1,
    bearing1: f64,
    start2: &P2,
    bearing2: f64,
) -> Result<LatLon>
where
    P1: LatLonBase,
    P2: LatLonBase,
{
    let reference = LatLon::default();
    reference.others(start1, "start1")?;
    reference.others(start2, "start2")?;

    let error = |kind: IntersectionKind| {
        let (start1, start2) = (start1.to_str2(), start2.to_str2());
        debug!(%kind, start1 = %start1, start2 = %start2, "no intersection");
        Error::Intersection {
            kind,
            start1,
            start2,
        }
    };

    let (a1, b1) = start1.to2ab();
    let (a2, b2) = start2.to2ab();

    let r12 = haversine_distance(a1, a2, b2 - b1);
    if libm::fabs(r12) < EPS {
        return Err(error(IntersectionKind::Parallel));
    }

    let (sa1, ca1) = libm::sincos(a1);
    let (sa2, ca2) = libm::sincos(a2);
    let (sr12, cr12) = libm::sincos(r12);
    let (x1, x2) = (sr12 * ca1, sr12 * ca2);
    if min(libm::fabs(x1), libm::fabs(x2)) < EPS {
        return Err(error(IntersectionKind::Parallel));
    }

    // the initial bearings between the start points
    let t1 = libm::acos(clamp((sa2 - sa1 * cr12) / x1, -1.0, 1.0));
    let t2 = libm::acos(clamp((sa1 - sa2 * cr12) / x2, -1.0, 1.0));
    let (t12, t21) = if libm::sin(b2 - b1) > 0.0 {
        (t1, PI2 - t2)
    } else {
        (PI2 - t1, t2)
    };

    // the angles at the start points: 2-1-3 and 1-2-3
    let t13 = bearing1.to_radians();
    let t23 = bearing2.to_radians();
    let (sx1, cx1) = libm::sincos(wrap_pi(t13 - t12));
    let (sx2, cx2) = libm::sincos(wrap_pi(t21 - t23));
    if sx1 == 0.0 && sx2 == 0.0 {
        return Err(error(IntersectionKind::Infinite));
    }
    let sx3 = sx1 * sx2;
    if sx3 < 0.0 {
        return Err(error(IntersectionKind::Ambiguous));
    }

    let x3 = libm::acos(clamp(cr12 * sx3 - cx2 * cx1, -1.0, 1.0));
    let r13 = libm::atan2(sr12 * sx3, cx2 + cx1 * libm::cos(x3));

    let (lat, lon) = destination_point(a1, b1, r13, t13);
    let height = favg(start1.height(), start2.height(), 0.5);
    Ok(LatLon::new(lat, lon, height))
}

impl LatLon {
    /// Calculate the intersection of the path from this point on a bearing
    /// with the path from an other point on a bearing, see `intersection`.
    /// # Errors
    /// `Error::Intersection` if the paths do not have a single intersection,
    /// `Error::TypeMismatch` if `start2` is not compatible.
    pub fn intersection<P: LatLonBase>(
        &self,
        bearing: f64,
        start2: &P,
        bearing2: f64,
    ) -> Result<Self> {
        intersection(self, bearing, start2, bearing2)
    }
}
