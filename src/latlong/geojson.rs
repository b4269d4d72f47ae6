// Copyright (c) 2024 Via Technology Ltd. All Rights Reserved.

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

//! The `geojson` module converts `LatLon` points to and from
//! [geo-types](https://crates.io/crates/geo-types) geometries,
//! see: [RFC7946](https://datatracker.ietf.org/doc/html/rfc7946).
//! Note: `geo_types` coordinate order is **lon, lat.**
//!
//! Heights are not stored by `geo_types` geometries, so converted points
//! have a height of zero.

use crate::error::{Error, Result};
use crate::latlong::LatLonBase;
use crate::sphere::LatLon;
use crate::trig::{is_latitude, is_longitude};

impl TryFrom<&geo_types::Coord> for LatLon {
    type Error = Error;

    /// Attempt to convert a `geo_types::Coord` to a `LatLon`.
    fn try_from(item: &geo_types::Coord) -> Result<Self> {
        if !is_latitude(item.y) {
            Err(Error::InvalidCoordinate(format!("latitude: {}", item.y)))
        } else if !is_longitude(item.x) {
            Err(Error::InvalidCoordinate(format!("longitude: {}", item.x)))
        } else {
            Ok(Self::new(item.y, item.x, 0.0))
        }
    }
}

impl From<&LatLon> for geo_types::Coord {
    fn from(a: &LatLon) -> Self {
        Self {
            x: a.lon(),
            y: a.lat(),
        }
    }
}

impl TryFrom<&geo_types::Point> for LatLon {
    type Error = Error;

    /// Attempt to convert a `geo_types::Point` to a `LatLon`.
    fn try_from(item: &geo_types::Point) -> Result<Self> {
        Self::try_from(&item.0)
    }
}

impl From<&LatLon> for geo_types::Point {
    fn from(a: &LatLon) -> Self {
        Self::new(a.lon(), a.lat())
    }
}

/// Attempt to convert a `geo_types::LineString` to `LatLon` points.
/// # Errors
/// `Error::InvalidCoordinate` if a coordinate is not a valid position.
pub fn try_from_line_string(values: &geo_types::LineString) -> Result<Vec<LatLon>> {
    values.0.iter().map(LatLon::try_from).collect()
}

/// Convert `LatLon` points to a `geo_types::LineString`.
#[must_use]
pub fn to_line_string(values: &[LatLon]) -> geo_types::LineString {
    geo_types::LineString::new(values.iter().map(geo_types::Coord::from).collect())
}

/// Attempt to convert the exterior ring of a `geo_types::Polygon` to
/// `LatLon` points.
/// The ring is closed, its last point is the same as its first point.
/// # Errors
/// `Error::InvalidCoordinate` if a coordinate is not a valid position.
pub fn try_from_polygon(value: &geo_types::Polygon) -> Result<Vec<LatLon>> {
    try_from_line_string(value.exterior())
}
