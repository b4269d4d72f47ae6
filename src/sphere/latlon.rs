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

//! The latlon module contains the `LatLon` type: a point on a spherical
//! model of the Earth.
//!
//! `LatLon` calculates great circle distances, bearings and positions
//! between points using spherical trigonometry. Calculations that combine
//! points accept any kind of point that is compatible with a `LatLon`,
//! see `LatLonBase::others`.
//!
//! # Examples
//! ```
//! use sphere_trig::{LatLon, LatLonBase};
//! use sphere_trig::trig::R_M;
//!
//! let p = LatLon::new(52.205, 0.119, 0.0);
//! let q = LatLon::new(48.857, 2.351, 0.0);
//!
//! let bearing = p.bearing_to(&q).unwrap();
//! let distance = p.distance_to(&q, R_M).unwrap();
//!
//! let r = p.destination(distance, bearing, R_M);
//! assert!(r.equals(&q, Some(1.0e-9)).unwrap());
//! ```

use super::{angle_to, destination_point, haversine_distance, sum_of, to_lat_lon, Vector3d};
use crate::dms::{parse_dms, Format};
use crate::error::{Error, Result};
use crate::latlong::{repr_points, LatLonBase, LatLonHeightBase};
use crate::trig::{degrees180, degrees360, degrees90, favg, fsum, EPS, EPS1};
use crate::Validate;
use contracts::debug_ensures;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, trace};

/// A point on a spherical model of the Earth.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LatLon {
    #[serde(flatten)]
    base: LatLonHeightBase,
}

/// Calculate the initial bearing between two positions.
/// * `p1`, `p2` the latitudes and longitudes in radians.
///
/// returns the bearing in degrees clockwise from North.
#[debug_ensures((0.0..360.0).contains(&ret) || ret.is_nan())]
fn initial_bearing(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let ((a1, b1), (a2, b2)) = (p1, p2);
    let db = b2 - b1;
    let (sa1, ca1) = libm::sincos(a1);
    let (sa2, ca2) = libm::sincos(a2);
    let (sdb, cdb) = libm::sincos(db);

    let x = ca1 * sa2 - sa1 * ca2 * cdb;
    let y = sdb * ca2;
    degrees360(libm::atan2(y, x))
}

/// Calculate the angular distance between two positions.
/// * `p1`, `p2` the latitudes and longitudes in radians.
fn angular_distance(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    haversine_distance(p1.0, p2.0, p2.1 - p1.1)
}

impl LatLon {
    /// The kind of a spherical point.
    pub const CLASSNAME: &'static str = "sphere.LatLon";

    /// Construct a `LatLon`.
    /// * `lat` - the latitude in degrees.
    /// * `lon` - the longitude in degrees.
    /// * `height` - the height above the surface in metres.
    #[must_use]
    pub const fn new(lat: f64, lon: f64, height: f64) -> Self {
        Self {
            base: LatLonHeightBase::new(lat, lon, height),
        }
    }

    /// Construct a `LatLon` from latitude and longitude strings in
    /// degrees, minutes and seconds, see `dms::parse_dms`.
    /// # Errors
    /// `Error::InvalidDms` if `lat` or `lon` is not a valid angle.
    /// # Examples
    /// ```
    /// use sphere_trig::{LatLon, LatLonBase};
    ///
    /// let p = LatLon::from_str_parts("51°28′40.12″N", "000°00′05.31″W", 0.0).unwrap();
    /// assert_eq!("51.477811°N, 000.001475°W", p.to_string());
    /// ```
    pub fn from_str_parts(lat: &str, lon: &str, height: f64) -> Result<Self> {
        Ok(Self::new(
            parse_dms(lat, "NS")?,
            parse_dms(lon, "EW")?,
            height,
        ))
    }

    /// A copy of this point, without its cached values.
    #[must_use]
    pub fn copy(&self) -> Self {
        let (lat, lon, height) = self.to3llh();
        Self::new(lat, lon, height)
    }

    /// Calculate the initial bearing from this point to an other point.
    /// * `other` - the other point.
    ///
    /// returns the bearing in degrees clockwise from North: 0.0 <= bearing < 360.0
    /// # Errors
    /// `Error::TypeMismatch` if the other point is not compatible.
    pub fn bearing_to<P: LatLonBase>(&self, other: &P) -> Result<f64> {
        self.others(other, "other")?;
        Ok(initial_bearing(self.to2ab(), other.to2ab()))
    }

    /// Calculate the final bearing arriving at an other point from this point.
    /// * `other` - the other point.
    ///
    /// returns the bearing in degrees clockwise from North: 0.0 <= bearing < 360.0
    /// # Errors
    /// `Error::TypeMismatch` if the other point is not compatible.
    pub fn final_bearing_to<P: LatLonBase>(&self, other: &P) -> Result<f64> {
        self.others(other, "other")?;
        let bearing = initial_bearing(other.to2ab(), self.to2ab());
        Ok(crate::trig::wrap360(bearing + 180.0))
    }

    /// Calculate the great circle distance from this point to an other point
    /// using the haversine formula.
    /// * `other` - the other point.
    /// * `radius` - the radius of the Earth, e.g. `trig::R_M`.
    ///
    /// returns the distance in the units of `radius`.
    /// # Errors
    /// `Error::TypeMismatch` if the other point is not compatible.
    pub fn distance_to<P: LatLonBase>(&self, other: &P, radius: f64) -> Result<f64> {
        self.others(other, "other")?;
        Ok(angular_distance(self.to2ab(), other.to2ab()) * radius)
    }

    /// Calculate the destination from this point after travelling a distance
    /// on an initial bearing.
    /// * `distance` - the distance in the units of `radius`.
    /// * `bearing` - the initial bearing in degrees clockwise from North.
    /// * `radius` - the radius of the Earth, e.g. `trig::R_M`.
    ///
    /// returns the destination, at the height of this point.
    #[must_use]
    pub fn destination(&self, distance: f64, bearing: f64, radius: f64) -> Self {
        let (a, b) = self.to2ab();
        let (lat, lon) = destination_point(a, b, distance / radius, bearing.to_radians());
        Self::new(lat, lon, self.height())
    }

    /// Calculate the midpoint between this point and an other point.
    /// * `other` - the other point.
    ///
    /// returns the midpoint, at the average height of the points.
    /// # Errors
    /// `Error::TypeMismatch` if the other point is not compatible.
    pub fn midpoint_to<P: LatLonBase>(&self, other: &P) -> Result<Self> {
        self.others(other, "other")?;

        let (a1, b1) = self.to2ab();
        let (a2, b2) = other.to2ab();
        let (sa1, ca1) = libm::sincos(a1);
        let (sa2, ca2) = libm::sincos(a2);
        let (sdb, cdb) = libm::sincos(b2 - b1);

        let x = ca2 * cdb + ca1;
        let y = ca2 * sdb;

        let a = libm::atan2(sa1 + sa2, libm::hypot(x, y));
        let b = libm::atan2(y, x) + b1;
        Ok(Self::new(
            degrees90(a),
            degrees180(b),
            favg(self.height(), other.height(), 0.5),
        ))
    }

    /// Calculate the point at a fraction of the great circle path between
    /// this point and an other point.
    /// * `other` - the other point.
    /// * `fraction` - the fraction along the path: 0.0 at this point,
    ///   1.0 at the other point.
    ///
    /// returns the intermediate point, at the height interpolated by the
    /// same fraction.
    /// # Errors
    /// `Error::TypeMismatch` if the other point is not compatible.
    pub fn intermediate_to<P: LatLonBase>(&self, other: &P, fraction: f64) -> Result<Self> {
        self.others(other, "other")?;

        if fraction < EPS {
            let (lat, lon, height) = self.to3llh();
            return Ok(Self::new(lat, lon, height));
        }
        if fraction > EPS1 {
            let (lat, lon, height) = other.to3llh();
            return Ok(Self::new(lat, lon, height));
        }

        let (a1, b1) = self.to2ab();
        let (a2, b2) = other.to2ab();
        let r = haversine_distance(a1, a2, b2 - b1);
        let (a, b) = if r > EPS {
            let (sa1, ca1) = libm::sincos(a1);
            let (sa2, ca2) = libm::sincos(a2);
            let (sb1, cb1) = libm::sincos(b1);
            let (sb2, cb2) = libm::sincos(b2);
            let sr = libm::sin(r);

            let f1 = libm::sin((1.0 - fraction) * r) / sr;
            let f2 = libm::sin(fraction * r) / sr;

            let x = f1 * ca1 * cb1 + f2 * ca2 * cb2;
            let y = f1 * ca1 * sb1 + f2 * ca2 * sb2;
            let z = f1 * sa1 + f2 * sa2;
            (libm::atan2(z, libm::hypot(x, y)), libm::atan2(y, x))
        } else {
            trace!(r, "coincident points, interpolating linearly");
            (favg(a1, a2, fraction), favg(b1, b2, fraction))
        };

        Ok(Self::new(
            degrees90(a),
            degrees180(b),
            favg(self.height(), other.height(), fraction),
        ))
    }

    /// Calculate the normal of the great circle heading on a bearing from
    /// this point.
    ///
    /// The initial bearing vector at this point is the cross product of
    /// the normal and the n-vector of this point.
    /// * `bearing` - the initial bearing in degrees clockwise from North.
    ///
    /// returns the great circle normal.
    #[debug_ensures(super::is_unit(&ret))]
    #[must_use]
    pub fn great_circle(&self, bearing: f64) -> Vector3d {
        let (a, b) = self.to2ab();
        let (sa, ca) = libm::sincos(a);
        let (sb, cb) = libm::sincos(b);
        let (st, ct) = libm::sincos(bearing.to_radians());

        Vector3d::new(sb * ct - cb * sa * st, -cb * ct - sb * sa * st, ca * st)
    }

    /// Calculate the longitudes at which the great circle through this point
    /// and an other point crosses a latitude.
    /// * `other` - the other point.
    /// * `lat` - the latitude in degrees.
    ///
    /// returns the pair of longitudes in degrees, or None if the great
    /// circle does not reach the latitude.
    /// # Errors
    /// `Error::TypeMismatch` if the other point is not compatible.
    pub fn crossing_parallels<P: LatLonBase>(
        &self,
        other: &P,
        lat: f64,
    ) -> Result<Option<(f64, f64)>> {
        self.others(other, "other")?;

        let (a1, b1) = self.to2ab();
        let (a2, b2) = other.to2ab();
        let (sa, ca) = libm::sincos(lat.to_radians());
        let (sa1, ca1) = libm::sincos(a1);
        let (sa2, ca2) = libm::sincos(a2);
        let (sdb, cdb) = libm::sincos(b2 - b1);

        let x = sa1 * ca2 * ca * sdb;
        let y = sa1 * ca2 * ca * cdb - ca1 * sa2 * ca;
        let z = ca1 * ca2 * sa * sdb;

        let h = libm::hypot(x, y);
        if h == 0.0 || libm::fabs(z) > h {
            trace!(lat, "great circle does not cross latitude");
            return Ok(None);
        }

        // the longitude of the maximum latitude and the difference to the crossings
        let m = libm::atan2(-y, x) + b1;
        let d = libm::acos(z / h);
        Ok(Some((degrees180(m - d), degrees180(m + d))))
    }

    /// Calculate the signed distance from this point to the great circle
    /// path through a start and end point.
    /// * `start` - the start point of the path.
    /// * `end` - the end point of the path.
    /// * `radius` - the radius of the Earth, e.g. `trig::R_M`.
    ///
    /// returns the distance in the units of `radius`: negative if this
    /// point is to the left of the path, positive if to the right.
    /// # Errors
    /// `Error::TypeMismatch` if the start or end point is not compatible.
    pub fn cross_track_distance_to<P1, P2>(
        &self,
        start: &P1,
        end: &P2,
        radius: f64,
    ) -> Result<f64>
    where
        P1: LatLonBase,
        P2: LatLonBase,
    {
        self.others(start, "start")?;
        self.others(end, "end")?;

        let r = angular_distance(start.to2ab(), self.to2ab());
        let b = initial_bearing(start.to2ab(), self.to2ab()).to_radians();
        let e = initial_bearing(start.to2ab(), end.to2ab()).to_radians();
        Ok(libm::asin(libm::sin(r) * libm::sin(b - e)) * radius)
    }

    /// Determine whether this point is enclosed by a convex polygon.
    /// * `points` - the points of the polygon, clockwise or anti-clockwise.
    ///
    /// returns true if this point is on the same side of every edge of the
    /// polygon, false otherwise.
    /// # Errors
    /// `Error::TooFewPoints` if the polygon has less than 3 points,
    /// `Error::NonConvex` if the polygon is not convex,
    /// `Error::TypeMismatch` if a point is not compatible.
    pub fn is_enclosed_by<P: LatLonBase>(&self, points: &[P]) -> Result<bool> {
        let (n, points) = self.points(points, true)?;

        // the great circle normal of each edge
        let mut v1 = points[n - 1].to_vector3d();
        let gc: Vec<Vector3d> = points
            .iter()
            .map(|p| {
                let v2 = p.to_vector3d();
                let normal = v1.cross(&v2);
                v1 = v2;
                normal
            })
            .collect();

        let v = self.to_vector3d();
        let is_right = |normal: &Vector3d| angle_to(normal, &v, None) > FRAC_PI_2;
        let t0 = is_right(&gc[0]);
        if gc[1..].iter().any(|normal| is_right(normal) != t0) {
            return Ok(false);
        }

        // the side test is only valid for convex polygons
        let mut gc1 = &gc[n - 1];
        for gc2 in &gc {
            if angle_to(gc1, gc2, Some(&v)) < 0.0 {
                let first = repr_points(&points[..3]);
                debug!(first = %first, "non-convex polygon");
                return Err(Error::NonConvex(first));
            }
            gc1 = gc2;
        }

        Ok(true)
    }
}

impl LatLonBase for LatLon {
    fn base(&self) -> &LatLonHeightBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LatLonHeightBase {
        &mut self.base
    }

    fn classname(&self) -> &'static str {
        Self::CLASSNAME
    }
}

impl From<LatLonHeightBase> for LatLon {
    fn from(base: LatLonHeightBase) -> Self {
        Self { base }
    }
}

impl PartialEq for LatLon {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl Validate for LatLon {
    /// Test whether a `LatLon` is valid, see `LatLonHeightBase::is_valid`.
    fn is_valid(&self) -> bool {
        self.base.is_valid()
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_str(Format::D, Some(6)))
    }
}

/// Calculate the geographic mean of points: the direction of the sum of
/// their n-vectors.
/// * `points` - the points.
/// * `height` - the height of the mean, None for the mean of the heights.
///
/// returns the mean point.
/// # Errors
/// `Error::TooFewPoints` if there are no points,
/// `Error::TypeMismatch` if a point is not compatible with a `LatLon`.
/// # Examples
/// ```
/// use sphere_trig::{mean_of, LatLon, LatLonBase};
///
/// let points = [LatLon::new(10.0, 0.0, 100.0), LatLon::new(-10.0, 0.0, 300.0)];
/// let mean = mean_of(&points, None).unwrap();
/// assert_eq!(0.0, mean.lat());
/// assert_eq!(200.0, mean.height());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn mean_of<P: LatLonBase>(points: &[P], height: Option<f64>) -> Result<LatLon> {
    let (n, points) = LatLon::default().points(points, false)?;

    let vectors: Vec<Vector3d> = points.iter().map(LatLonBase::to_vector3d).collect();
    let (lat, lon) = to_lat_lon(&sum_of(&vectors));
    let height = height.unwrap_or_else(|| fsum(points.iter().map(LatLonBase::height)) / n as f64);
    Ok(LatLon::new(lat, lon, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::is_within_tolerance;
    use crate::trig::{R_M, R_NM};

    fn lat_lons(values: &[(f64, f64)]) -> Vec<LatLon> {
        values
            .iter()
            .map(|&(lat, lon)| LatLon::new(lat, lon, 0.0))
            .collect()
    }

    fn square() -> Vec<LatLon> {
        lat_lons(&[(45.0, 1.0), (45.0, 2.0), (46.0, 2.0), (46.0, 1.0)])
    }

    #[test]
    fn test_latlon_traits() {
        let a = LatLon::new(52.205, 0.119, 0.0);
        assert!(a.is_valid());
        assert_eq!(LatLon::CLASSNAME, a.classname());

        let a_clone = a.clone();
        assert!(a_clone == a);
        assert_eq!(a, a.copy());

        assert_eq!(a, LatLon::from(LatLonHeightBase::new(52.205, 0.119, 0.0)));
        assert_eq!("52.205°N, 000.119°E", a.to_string());

        print!("LatLon: {:?}", a);
    }

    #[test]
    fn test_from_str_parts() {
        let a = LatLon::from_str_parts("52.205", "0.119E", 10.0).unwrap();
        assert_eq!(LatLon::new(52.205, 0.119, 10.0), a);
        assert_eq!(10.0, a.height());

        let result = LatLon::from_str_parts("52.205", "0.119N", 0.0);
        assert_eq!(
            Err(Error::InvalidDms("0.119N".to_owned())),
            result
        );
    }

    #[test]
    fn test_vector_cache() {
        let mut a = LatLon::new(0.0, 0.0, 0.0);
        assert_eq!(Vector3d::x(), a.to_vector3d());

        a.set_height(1000.0);
        assert_eq!(Vector3d::x(), a.to_vector3d());

        a.set_lon(90.0);
        let v = a.to_vector3d();
        assert!(is_within_tolerance(0.0, v.x, f64::EPSILON));
        assert_eq!(1.0, v.y);

        a.set_lat(90.0);
        assert_eq!(1.0, a.to_vector3d().z);
    }

    #[test]
    fn test_vector_cache_base_mut() {
        let mut a = LatLon::new(0.0, 0.0, 0.0);
        assert_eq!(Vector3d::x(), a.to_vector3d());

        a.base_mut().update_lat(90.0);
        assert_eq!(90.0, a.lat());
        let v = a.to_vector3d();
        assert!(is_within_tolerance(0.0, v.x, f64::EPSILON));
        assert_eq!(1.0, v.z);

        let mean = mean_of(&[a.clone(), LatLon::new(45.0, 0.0, 0.0)], None).unwrap();
        assert!(is_within_tolerance(67.5, mean.lat(), 1.0e-12));
        assert!(is_within_tolerance(0.0, mean.lon(), 1.0e-12));

        *a.base_mut() = LatLonHeightBase::new(0.0, 90.0, 0.0);
        let v = a.to_vector3d();
        assert!(is_within_tolerance(0.0, v.x, f64::EPSILON));
        assert_eq!(1.0, v.y);
        assert_eq!(0.0, v.z);
    }

    #[test]
    fn test_serde_latlon() {
        let a = LatLon::new(52.205, 0.119, 0.0);
        a.to_vector3d();

        let serialized = serde_json::to_string(&a).unwrap();
        assert_eq!(r#"{"lat":52.205,"lon":0.119,"height":0.0}"#, serialized);

        let deserialized: LatLon = serde_json::from_str(&serialized).unwrap();
        assert_eq!(a, deserialized);
        assert_eq!(a.to_vector3d(), deserialized.to_vector3d());
    }

    #[test]
    fn test_bearing_to() {
        let p = LatLon::new(52.205, 0.119, 0.0);
        let q = LatLon::new(48.857, 2.351, 0.0);

        let bearing = p.bearing_to(&q).unwrap();
        assert!(is_within_tolerance(156.166_582_581_531_74, bearing, 1.0e-9));

        let bearing = p.final_bearing_to(&q).unwrap();
        assert!(is_within_tolerance(157.890_440_190_492_43, bearing, 1.0e-9));

        // due East and West on the equator
        let a = LatLon::new(0.0, 0.0, 0.0);
        let b = LatLon::new(0.0, 180.0, 0.0);
        assert_eq!(90.0, a.bearing_to(&LatLon::new(0.0, 10.0, 0.0)).unwrap());
        assert_eq!(270.0, a.bearing_to(&LatLon::new(0.0, -10.0, 0.0)).unwrap());
        assert!(is_within_tolerance(90.0, a.bearing_to(&b).unwrap(), 1.0e-12));

        // coincident points
        assert_eq!(0.0, p.bearing_to(&p).unwrap());
    }

    #[test]
    fn test_distance_to() {
        let p = LatLon::new(52.205, 0.119, 0.0);
        let q = LatLon::new(48.857, 2.351, 0.0);

        let d = p.distance_to(&q, R_M).unwrap();
        assert!(is_within_tolerance(404_279.720_588_949_7, d, 1.0e-6));
        assert!(is_within_tolerance(d, q.distance_to(&p, R_M).unwrap(), 1.0e-6));
        assert_eq!(0.0, p.distance_to(&p, R_M).unwrap());

        // antipodal points
        let a = LatLon::new(0.0, 0.0, 0.0);
        let b = LatLon::new(0.0, 180.0, 0.0);
        assert!(is_within_tolerance(
            std::f64::consts::PI,
            a.distance_to(&b, 1.0).unwrap(),
            4.0 * f64::EPSILON
        ));
    }

    #[test]
    fn test_lax_to_jfk() {
        let lax = LatLon::new(33.0 + 57.0 / 60.0, -(118.0 + 24.0 / 60.0), 0.0);
        let jfk = LatLon::new(0.709_186_f64.to_degrees(), -1.287_762_f64.to_degrees(), 0.0);

        let bearing = lax.bearing_to(&jfk).unwrap();
        assert!(is_within_tolerance(65.892_112_477_387_6, bearing, 1.0e-9));

        let d = lax.distance_to(&jfk, R_NM).unwrap();
        assert!(is_within_tolerance(2145.17, d, 0.01));

        let p = lax.destination(100.0, 66.0, R_NM);
        assert!(is_within_tolerance(34.613_65, p.lat(), 1.0e-4));
        assert!(is_within_tolerance(-116.551_16, p.lon(), 1.0e-4));
    }

    #[test]
    fn test_destination() {
        let p = LatLon::new(51.4778, -0.0015, 25.0);
        let q = p.destination(7794.0, 300.7, R_M);
        assert!(is_within_tolerance(51.513_545_642_584, q.lat(), 1.0e-9));
        assert!(is_within_tolerance(-0.098_345_248_009_973_31, q.lon(), 1.0e-9));
        assert_eq!(25.0, q.height());
        assert_eq!("51°30′49″N, 000°05′54″W, +25.00m", q.to_str(Format::DMS, Some(0)));

        // zero distance
        assert!(p.destination(0.0, 123.0, R_M).equals(&p, Some(1.0e-12)).unwrap());
    }

    #[test]
    fn test_midpoint_to() {
        let p = LatLon::new(52.205, 0.119, 10.0);
        let q = LatLon::new(48.857, 2.351, 20.0);

        let m = p.midpoint_to(&q).unwrap();
        assert!(is_within_tolerance(50.536_326_878_274_34, m.lat(), 1.0e-9));
        assert!(is_within_tolerance(1.274_614_100_678_228_2, m.lon(), 1.0e-9));
        assert_eq!(15.0, m.height());

        let dp = m.distance_to(&p, R_M).unwrap();
        let dq = m.distance_to(&q, R_M).unwrap();
        assert!(is_within_tolerance(dp, dq, 1.0e-6));
    }

    #[test]
    fn test_intermediate_to() {
        let p = LatLon::new(52.205, 0.119, 0.0);
        let q = LatLon::new(48.857, 2.351, 100.0);

        let i = p.intermediate_to(&q, 0.25).unwrap();
        assert!(is_within_tolerance(51.372_083_855_466_36, i.lat(), 1.0e-9));
        assert!(is_within_tolerance(0.707_337_100_919_817_6, i.lon(), 1.0e-9));
        assert_eq!(25.0, i.height());

        let i = p.intermediate_to(&q, 0.5).unwrap();
        let m = p.midpoint_to(&q).unwrap();
        assert!(i.equals(&m, Some(1.0e-9)).unwrap());

        // the end points are exact
        let i = p.intermediate_to(&q, 0.0).unwrap();
        assert_eq!(p.to3llh(), i.to3llh());
        let i = p.intermediate_to(&q, 1.0).unwrap();
        assert_eq!(q.to3llh(), i.to3llh());
    }

    #[test]
    fn test_intermediate_to_coincident() {
        let p = LatLon::new(10.0, 20.0, 0.0);
        let q = LatLon::new(10.0, 20.0, 100.0);

        let i = p.intermediate_to(&q, 0.5).unwrap();
        assert!(is_within_tolerance(10.0, i.lat(), 1.0e-12));
        assert!(is_within_tolerance(20.0, i.lon(), 1.0e-12));
        assert_eq!(50.0, i.height());
    }

    #[test]
    fn test_great_circle() {
        let p = LatLon::new(53.3206, -1.7297, 0.0);
        let gc = p.great_circle(96.0);
        assert!(is_within_tolerance(-0.794_078_520_559_766_6, gc.x, 1.0e-12));
        assert!(is_within_tolerance(0.128_555_803_598_106, gc.y, 1.0e-12));
        assert!(is_within_tolerance(0.594_064_565_974_825_3, gc.z, 1.0e-12));

        // the great circle is normal to the point
        assert!(is_within_tolerance(0.0, gc.dot(&p.to_vector3d()), 1.0e-12));

        // heading North from the equator at the prime meridian
        let gc = LatLon::new(0.0, 0.0, 0.0).great_circle(0.0);
        assert!(is_within_tolerance(0.0, gc.x, f64::EPSILON));
        assert_eq!(-1.0, gc.y);
        assert_eq!(0.0, gc.z);
    }

    #[test]
    fn test_crossing_parallels() {
        let p = LatLon::new(0.0, 0.0, 0.0);
        let q = LatLon::new(60.0, 30.0, 0.0);

        let (lon1, lon2) = p.crossing_parallels(&q, 30.0).unwrap().unwrap();
        assert!(is_within_tolerance(9.594_068_226_860_46, lon1, 1.0e-9));
        assert!(is_within_tolerance(170.405_931_773_139_54, lon2, 1.0e-9));

        assert_eq!(None, p.crossing_parallels(&q, 89.0).unwrap());

        let p = LatLon::new(10.0, -20.0, 0.0);
        let q = LatLon::new(20.0, 40.0, 0.0);
        let (lon1, lon2) = p.crossing_parallels(&q, 12.0).unwrap().unwrap();
        assert!(is_within_tolerance(-13.246_283_308_150_845, lon1, 1.0e-9));
        assert!(is_within_tolerance(95.303_039_924_436_39, lon2, 1.0e-9));

        // the equator does not define a single great circle crossing
        let a = LatLon::new(0.0, 0.0, 0.0);
        let b = LatLon::new(0.0, 10.0, 0.0);
        assert_eq!(None, a.crossing_parallels(&b, 0.0).unwrap());
    }

    #[test]
    fn test_cross_track_distance_to() {
        let p = LatLon::new(53.2611, -0.7972, 0.0);
        let start = LatLon::new(53.3206, -1.7297, 0.0);
        let end = LatLon::new(53.1887, 0.1334, 0.0);

        let d = p.cross_track_distance_to(&start, &end, R_M).unwrap();
        assert!(is_within_tolerance(-307.549_993_845_473_24, d, 1.0e-6));

        // a point on the path
        let m = start.midpoint_to(&end).unwrap();
        let d = m.cross_track_distance_to(&start, &end, R_M).unwrap();
        assert!(is_within_tolerance(0.0, d, 1.0e-6));

        // to the right of the path
        let q = LatLon::new(53.2, -0.7972, 0.0);
        assert!(0.0 < q.cross_track_distance_to(&start, &end, R_M).unwrap());
    }

    #[test]
    fn test_is_enclosed_by() {
        let f = square();
        assert!(LatLon::new(45.1, 1.1, 0.0).is_enclosed_by(&f).unwrap());
        assert!(!LatLon::new(0.0, 0.0, 0.0).is_enclosed_by(&f).unwrap());

        // a closing point is ignored
        let mut closed = square();
        closed.push(LatLon::new(45.0, 1.0, 0.0));
        assert!(LatLon::new(45.1, 1.1, 0.0).is_enclosed_by(&closed).unwrap());

        // a self intersecting polygon
        let bowtie = lat_lons(&[(45.0, 1.0), (46.0, 2.0), (45.0, 2.0), (46.0, 1.0)]);
        assert!(!LatLon::new(45.1, 1.1, 0.0).is_enclosed_by(&bowtie).unwrap());

        let result = LatLon::new(45.1, 1.1, 0.0).is_enclosed_by(&f[..2]);
        assert_eq!(Err(Error::TooFewPoints(2)), result);
    }

    #[test]
    fn test_is_enclosed_by_non_convex() {
        let concave = lat_lons(&[(45.0, 1.0), (45.0, 3.0), (46.0, 3.0), (45.5, 2.0), (46.0, 1.0)]);
        for (lat, lon) in [(45.2, 2.0), (45.1, 2.0), (45.3, 2.0), (45.2, 1.9)] {
            let result = LatLon::new(lat, lon, 0.0).is_enclosed_by(&concave);
            assert!(matches!(result, Err(Error::NonConvex(_))));
            assert_eq!(ErrorKind::Value, result.unwrap_err().kind());
        }

        // a point in the notch of the polygon
        assert!(!LatLon::new(45.5, 1.5, 0.0).is_enclosed_by(&concave).unwrap());

        // a clockwise polygon is reported as non-convex
        let mut reversed = square();
        reversed.reverse();
        let result = LatLon::new(45.5, 1.5, 0.0).is_enclosed_by(&reversed);
        assert_eq!(
            "non-convex: [LatLon(46.0°N, 001.0°E), LatLon(46.0°N, 002.0°E), LatLon(45.0°N, 002.0°E)]",
            result.unwrap_err().to_string()
        );
    }

    #[test]
    fn test_mean_of() {
        let f = square();
        let mean = mean_of(&f, None).unwrap();
        assert!(is_within_tolerance(45.501_090_678_124_44, mean.lat(), 1.0e-9));
        assert!(is_within_tolerance(1.5, mean.lon(), 1.0e-9));
        assert_eq!(0.0, mean.height());

        let mean = mean_of(&f, Some(100.0)).unwrap();
        assert_eq!(100.0, mean.height());

        let single = [LatLon::new(10.0, 20.0, 30.0)];
        let mean = mean_of(&single, None).unwrap();
        assert!(mean.equals(&single[0], Some(1.0e-12)).unwrap());
        assert_eq!(30.0, mean.height());

        let empty: [LatLon; 0] = [];
        assert_eq!(Err(Error::TooFewPoints(0)), mean_of(&empty, None));
    }

    #[test]
    fn test_base_points_are_compatible() {
        let p = LatLon::new(52.205, 0.119, 0.0);
        let q = LatLonHeightBase::new(48.857, 2.351, 0.0);
        let d = p.distance_to(&q, R_M).unwrap();
        assert!(is_within_tolerance(404_279.720_588_949_7, d, 1.0e-6));

        let bases = [
            LatLonHeightBase::new(45.0, 1.0, 0.0),
            LatLonHeightBase::new(46.0, 2.0, 0.0),
        ];
        assert!(mean_of(&bases, None).is_ok());
    }
}
