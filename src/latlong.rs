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

//! The latlong module contains types and functions for representing positions
//! on the surface of the Earth.
//!
//! `LatLonHeightBase` stores a latitude and longitude in degrees and a height
//! in metres. It lazily calculates the position in radians and as an
//! n-vector, caching both until the latitude or longitude changes.
//!
//! The `LatLonBase` trait is implemented by every kind of point, e.g. the
//! spherical `LatLon` in the `sphere` module. It provides the coordinate
//! accessors and the functions that check and compare points:
//! * `others` checks that two points are compatible kinds,
//! * `points` validates the points of a polygon or path,
//! * `isclockwise` determines the winding direction of a polygon.
//!
//! The module also contains functions for converting positions to and from
//! [geo-types](https://crates.io/crates/geo-types), see `geojson`.

#![allow(clippy::float_cmp)]

pub mod geojson;

use crate::dms::{lat_dms, lon_dms, parse_dms, Format};
use crate::error::{Error, Result};
use crate::sphere::Vector3d;
use crate::trig::{fsum, is_latitude, wrap180, wrap90};
use crate::Validate;
use contracts::debug_ensures;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// A position as a latitude and longitude in degrees and a height in metres.
///
/// The latitude is conventionally in the range -90.0 to 90.0 but it is not
/// clamped. The longitude may be any value, it is only wrapped for output.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LatLonHeightBase {
    lat: f64,
    lon: f64,
    #[serde(default)]
    height: f64,
    /// The latitude and longitude in radians.
    #[serde(skip)]
    ab: OnceLock<(f64, f64)>,
    /// The n-vector of the position.
    #[serde(skip)]
    v3d: OnceLock<Vector3d>,
}

impl LatLonHeightBase {
    /// The kind of the base point, compatible with every other kind.
    pub const CLASSNAME: &'static str = "latlong.LatLonHeightBase";

    /// Construct a `LatLonHeightBase`.
    /// * `lat` - the latitude in degrees.
    /// * `lon` - the longitude in degrees.
    /// * `height` - the height above the surface in metres.
    #[must_use]
    pub const fn new(lat: f64, lon: f64, height: f64) -> Self {
        Self {
            lat,
            lon,
            height,
            ab: OnceLock::new(),
            v3d: OnceLock::new(),
        }
    }

    /// Construct a `LatLonHeightBase` from degrees, minutes and seconds strings.
    /// * `lat` - the latitude, with an optional `N` or `S` suffix.
    /// * `lon` - the longitude, with an optional `E` or `W` suffix.
    /// * `height` - the height above the surface in metres.
    /// # Errors
    /// `Error::InvalidDms` if `lat` or `lon` is not a valid angle.
    pub fn from_dms(lat: &str, lon: &str, height: f64) -> Result<Self> {
        Ok(Self::new(
            parse_dms(lat, "NS")?,
            parse_dms(lon, "EW")?,
            height,
        ))
    }

    fn clear_caches(&mut self) {
        self.ab.take();
        self.v3d.take();
    }

    /// Update the latitude, clearing the cached positions if it changed.
    ///
    /// returns true if the latitude changed.
    pub fn update_lat(&mut self, lat: f64) -> bool {
        let updated = lat != self.lat;
        if updated {
            self.clear_caches();
        }
        self.lat = lat;
        updated
    }

    /// Update the longitude, clearing the cached positions if it changed.
    ///
    /// returns true if the longitude changed.
    pub fn update_lon(&mut self, lon: f64) -> bool {
        let updated = lon != self.lon;
        if updated {
            self.clear_caches();
        }
        self.lon = lon;
        updated
    }

    /// Set the height. The height is not part of the cached position.
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    /// The latitude and longitude in radians, calculated on first use.
    #[must_use]
    pub fn to2ab(&self) -> (f64, f64) {
        *self
            .ab
            .get_or_init(|| (self.lat.to_radians(), self.lon.to_radians()))
    }

    /// The n-vector components of the position on the unit sphere,
    /// ignoring the height:
    /// x towards 0°N 0°E, y towards 0°N 90°E and z towards 90°N.
    #[debug_ensures(crate::sphere::is_unit(&Vector3d::new(ret.0, ret.1, ret.2)))]
    #[must_use]
    pub fn to3xyz(&self) -> (f64, f64, f64) {
        let (a, b) = self.to2ab();
        let (sa, ca) = libm::sincos(a);
        let (sb, cb) = libm::sincos(b);
        (ca * cb, ca * sb, sa)
    }

    /// The n-vector of the position, calculated on first use.
    #[must_use]
    pub fn to_vector3d(&self) -> Vector3d {
        *self.v3d.get_or_init(|| {
            let (x, y, z) = self.to3xyz();
            Vector3d::new(x, y, z)
        })
    }
}

impl PartialEq for LatLonHeightBase {
    /// Positions are equal if their latitudes and longitudes are equal,
    /// the height is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

impl Validate for LatLonHeightBase {
    /// Test whether a `LatLonHeightBase` is valid.
    /// I.e. whether its values are finite and its latitude lies in the
    /// range: -90.0 <= value <= 90.0
    fn is_valid(&self) -> bool {
        is_latitude(self.lat) && self.lon.is_finite() && self.height.is_finite()
    }
}

impl std::fmt::Display for LatLonHeightBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_str(Format::D, Some(6)))
    }
}

/// The capabilities shared by every kind of point.
///
/// A kind of point stores its coordinates in a `LatLonHeightBase` and names
/// itself with a `classname`. Points of different kinds are not compatible,
/// except that the base kind is compatible with every kind.
pub trait LatLonBase {
    /// The position data of the point.
    fn base(&self) -> &LatLonHeightBase;

    /// The mutable position data of the point.
    fn base_mut(&mut self) -> &mut LatLonHeightBase;

    /// The name of the kind of point, e.g. `sphere.LatLon`.
    fn classname(&self) -> &'static str;

    /// The latitude in degrees.
    fn lat(&self) -> f64 {
        self.base().lat
    }

    /// The longitude in degrees.
    fn lon(&self) -> f64 {
        self.base().lon
    }

    /// The height in metres.
    fn height(&self) -> f64 {
        self.base().height
    }

    /// Set the latitude in degrees.
    fn set_lat(&mut self, lat: f64) {
        self.base_mut().update_lat(lat);
    }

    /// Set the longitude in degrees.
    fn set_lon(&mut self, lon: f64) {
        self.base_mut().update_lon(lon);
    }

    /// Set the height in metres.
    fn set_height(&mut self, height: f64) {
        self.base_mut().set_height(height);
    }

    /// The latitude and longitude in radians.
    fn to2ab(&self) -> (f64, f64) {
        self.base().to2ab()
    }

    /// The latitude, longitude and height.
    fn to3llh(&self) -> (f64, f64, f64) {
        let base = self.base();
        (base.lat, base.lon, base.height)
    }

    /// The n-vector components of the point on the unit sphere.
    fn to3xyz(&self) -> (f64, f64, f64) {
        self.base().to3xyz()
    }

    /// The n-vector of the point: the unit vector normal to the surface.
    fn to_vector3d(&self) -> Vector3d {
        self.base().to_vector3d()
    }

    /// Check that an other point is compatible with this point.
    /// * `other` the other point.
    /// * `name` the name of the other point, used in the error.
    /// # Errors
    /// `Error::TypeMismatch` if the points are not compatible kinds.
    fn others<P: LatLonBase>(&self, other: &P, name: &str) -> Result<()> {
        let this = self.classname();
        let that = other.classname();
        if this == that
            || this == LatLonHeightBase::CLASSNAME
            || that == LatLonHeightBase::CLASSNAME
        {
            Ok(())
        } else {
            debug!(name, other = that, this, "type mismatch");
            Err(Error::TypeMismatch {
                name: name.to_owned(),
                other: that,
                this,
            })
        }
    }

    /// Compare this point with an other point.
    /// * `other` the other point.
    /// * `eps` an optional tolerance in degrees.
    ///
    /// returns true if both latitude and longitude are equal or, given a
    /// positive tolerance, if both differ by less than the tolerance.
    /// The height is not compared.
    /// # Errors
    /// `Error::TypeMismatch` if the points are not compatible kinds.
    fn equals<P: LatLonBase>(&self, other: &P, eps: Option<f64>) -> Result<bool> {
        self.others(other, "other")?;

        Ok(match eps {
            Some(eps) if eps > 0.0 => crate::max(
                libm::fabs(self.lat() - other.lat()),
                libm::fabs(self.lon() - other.lon()),
            ) < eps,
            _ => self.lat() == other.lat() && self.lon() == other.lon(),
        })
    }

    /// Validate the points of a polygon or path.
    /// * `points` the points.
    /// * `closed` whether the points form a closed polygon: a duplicate
    ///   closing point is removed and at least 3 points are required,
    ///   otherwise at least 1 point is required.
    ///
    /// returns the number of points and the points.
    /// # Errors
    /// `Error::TooFewPoints` if there are not enough points,
    /// `Error::TypeMismatch` if a point is not compatible with this point.
    fn points<'a, P: LatLonBase>(&self, points: &'a [P], closed: bool) -> Result<(usize, &'a [P])> {
        let mut n = points.len();
        let mut points = points;
        if closed && n > 1 && points[0].equals(&points[n - 1], None)? {
            n -= 1;
            points = &points[..n];
        }

        if n < if closed { 3 } else { 1 } {
            debug!(n, closed, "too few points");
            return Err(Error::TooFewPoints(n));
        }

        for (i, p) in points.iter().enumerate() {
            self.others(p, &format!("points[{i}]"))?;
        }

        Ok((n, points))
    }

    /// Determine the winding direction of a polygon.
    ///
    /// Sums the signed pseudo-area of the polygon edges with longitudes
    /// and latitudes treated as flat x-y coordinates.
    /// * `points` the points of the polygon.
    ///
    /// returns true if the polygon is clockwise, false if anti-clockwise.
    /// # Errors
    /// `Error::TooFewPoints` if there are less than 3 points,
    /// `Error::ZeroArea` if the polygon has no area,
    /// `Error::TypeMismatch` if a point is not compatible with this point.
    fn isclockwise<P: LatLonBase>(&self, points: &[P]) -> Result<bool> {
        fn to_xy<P: LatLonBase>(p: &P) -> (f64, f64) {
            (wrap180(p.lon()), wrap90(p.lat()))
        }

        let (n, points) = self.points(points, true)?;

        let (mut x1, mut y1) = to_xy(&points[n - 1]);
        let area = fsum(points.iter().map(|p| {
            let (x2, y2) = to_xy(p);
            let a = (x2 - x1) * (y2 + y1);
            (x1, y1) = (x2, y2);
            a
        }));

        if area > 0.0 {
            Ok(true)
        } else if area < 0.0 {
            Ok(false)
        } else {
            let first = repr_points(&points[..3]);
            debug!(first = %first, "zero area");
            Err(Error::ZeroArea(first))
        }
    }

    /// Convert the point to a "lat, lon[, height]" string.
    /// * `form` the format of the latitude and longitude.
    /// * `prec` the number of decimal places, `None` for the format default.
    fn to_str(&self, form: Format, prec: Option<i32>) -> String {
        let (lat, lon, height) = self.to3llh();
        let mut t = format!("{}, {}", lat_dms(lat, form, prec), lon_dms(lon, form, prec));
        if height != 0.0 {
            t.push_str(&format!(", {height:+.2}m"));
        }
        t
    }

    /// Convert the point to a string of its kind and decimal degrees,
    /// e.g. `LatLon(52.205°N, 000.119°E)`.
    fn to_str2(&self) -> String {
        let name = self.classname();
        let name = name.rsplit('.').next().unwrap_or(name);
        format!("{name}({})", self.to_str(Format::D, None))
    }
}

impl LatLonBase for LatLonHeightBase {
    fn base(&self) -> &LatLonHeightBase {
        self
    }

    fn base_mut(&mut self) -> &mut LatLonHeightBase {
        self
    }

    fn classname(&self) -> &'static str {
        Self::CLASSNAME
    }
}

/// The points as a list of `to_str2` strings, e.g. for an error message.
pub(crate) fn repr_points<P: LatLonBase>(points: &[P]) -> String {
    let points = points
        .iter()
        .map(LatLonBase::to_str2)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{points}]")
}

/// Determine the winding direction of a polygon of any kind of points,
/// see `LatLonBase::isclockwise`.
/// # Errors
/// `Error::TooFewPoints` if there are less than 3 points,
/// `Error::ZeroArea` if the polygon has no area.
/// # Examples
/// ```
/// use sphere_trig::{isclockwise, LatLon};
///
/// let f = [LatLon::new(45.0, 1.0, 0.0), LatLon::new(45.0, 2.0, 0.0),
///          LatLon::new(46.0, 2.0, 0.0), LatLon::new(46.0, 1.0, 0.0)];
/// assert!(!isclockwise(&f).unwrap());
/// ```
pub fn isclockwise<P: LatLonBase>(points: &[P]) -> Result<bool> {
    LatLonHeightBase::default().isclockwise(points)
}
