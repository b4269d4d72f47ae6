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

//! The error module contains the `Error` type returned by the fallible
//! functions of this library.
//!
//! Every `Error` is one of two kinds, see `ErrorKind`:
//! * a type mismatch between two point kinds, e.g. a spherical `LatLon`
//!   combined with a point of an unrelated model;
//! * a value error: a geometric or numeric impossibility, e.g. too few
//!   points for a polygon or parallel great circle paths.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// The two kinds of `Error`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Incompatible point kinds.
    Type,
    /// Geometrically or numerically impossible input.
    Value,
}

/// The reason that two great circle paths do not have a single intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntersectionKind {
    /// The start points coincide or a start point is at a pole.
    Parallel,
    /// The paths coincide over a range.
    Infinite,
    /// The paths only meet behind one of the start points.
    Ambiguous,
}

impl std::fmt::Display for IntersectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Parallel => "parallel",
            Self::Infinite => "infinite",
            Self::Ambiguous => "ambiguous",
        })
    }
}

/// The errors returned by this library.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// A point is not compatible with the point that it is combined with.
    #[error("type({name}) mismatch: {other} vs {this}")]
    TypeMismatch {
        /// The name of the argument, e.g. `other` or `points[2]`.
        name: String,
        /// The kind of the argument.
        other: &'static str,
        /// The kind of the receiving point.
        this: &'static str,
    },

    /// A polygon or point list has too few points.
    #[error("too few points: {0}")]
    TooFewPoints(usize),

    /// A polygon has a zero (pseudo) area.
    #[error("zero area: {0}")]
    ZeroArea(String),

    /// A polygon is not convex.
    #[error("non-convex: {0}")]
    NonConvex(String),

    /// A pair of paths does not have a single intersection.
    #[error("intersection {kind}: {start1} vs {start2}")]
    Intersection {
        kind: IntersectionKind,
        start1: String,
        start2: String,
    },

    /// A degrees, minutes, seconds string could not be parsed.
    #[error("parseDMS: invalid {0:?}")]
    InvalidDms(String),

    /// A coordinate is not a valid latitude or longitude.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl Error {
    /// The `ErrorKind` of the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::Type,
            Self::TooFewPoints(_)
            | Self::ZeroArea(_)
            | Self::NonConvex(_)
            | Self::Intersection { .. }
            | Self::InvalidDms(_)
            | Self::InvalidCoordinate(_) => ErrorKind::Value,
        }
    }
}
