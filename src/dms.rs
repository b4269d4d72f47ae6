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

//! The dms module parses and formats angles in degrees, minutes and seconds,
//! e.g. `51° 28′ 40.12″ N` or `000°00'05.31"W`.

use crate::error::{Error, Result};
use crate::trig::wrap360;

/// The degrees symbol.
pub const S_DEG: char = '°';
/// The minutes symbol.
pub const S_MIN: char = '′';
/// The seconds symbol.
pub const S_SEC: char = '″';

/// The format of an angle string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Decimal degrees, e.g. `45.7626°`
    D,
    /// Degrees and decimal minutes, e.g. `45°45.756′`
    DM,
    /// Degrees, minutes and decimal seconds, e.g. `45°45′45.36″`
    #[default]
    DMS,
}

impl Format {
    /// The default number of decimal places of the format.
    #[must_use]
    pub const fn default_prec(self) -> i32 {
        match self {
            Self::D => 6,
            Self::DM => 4,
            Self::DMS => 2,
        }
    }
}

/// Whether a character separates degrees, minutes or seconds.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '°' | '\'' | '′' | '’' | '"' | '″' | '”' | ':')
}

/// Parse a string of degrees, minutes and seconds into degrees.
/// * `s` the string, e.g. `"51° 28′ 40.12″ N"` or `"-0.001475"`
/// * `suffix` the valid compass suffixes, e.g. `"NS"` or `"EW"`.
///
/// A leading `-` or a trailing `S` or `W` suffix negates the result.
/// # Errors
/// `Error::InvalidDms` if the string is not a valid angle.
/// # Examples
/// ```
/// use sphere_trig::dms::parse_dms;
///
/// assert_eq!(0.0, parse_dms("000°00'00\"", "NS").unwrap());
/// assert_eq!(-0.5, parse_dms("0° 30′ W", "EW").unwrap());
/// assert!(parse_dms("12°N", "EW").is_err());
/// ```
pub fn parse_dms(s: &str, suffix: &str) -> Result<f64> {
    let invalid = || Error::InvalidDms(s.to_owned());

    let mut text = s.trim();
    let mut negative = false;

    if let Some(last) = text.chars().last() {
        if last.is_ascii_alphabetic() {
            let hemisphere = last.to_ascii_uppercase();
            if !suffix.to_ascii_uppercase().contains(hemisphere) {
                return Err(invalid());
            }
            negative = matches!(hemisphere, 'S' | 'W');
            text = text[..text.len() - last.len_utf8()].trim_end();
        }
    }

    if let Some(rest) = text.strip_prefix('-') {
        negative = !negative;
        text = rest;
    } else if let Some(rest) = text.strip_prefix('+') {
        text = rest;
    }

    let mut parts = Vec::with_capacity(3);
    for part in text.split(is_separator).filter(|p| !p.is_empty()) {
        let value: f64 = part.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        parts.push(value);
    }

    let degrees = match parts.as_slice() {
        [d] => *d,
        [d, m] => d + m / 60.0,
        [d, m, sec] => d + m / 60.0 + sec / 3600.0,
        _ => return Err(invalid()),
    };

    Ok(if negative { -degrees } else { degrees })
}

/// Format a fraction `value / scale` with `prec` decimal places and a
/// minimum integer `width`.
fn format_fixed(value: u64, scale: u64, prec: usize, width: usize) -> String {
    let integer = value / scale;
    if prec == 0 {
        format!("{integer:0width$}")
    } else {
        let fraction = value % scale;
        format!("{integer:0width$}.{fraction:0prec$}")
    }
}

/// Remove the trailing zeros of a formatted number, leaving at least one
/// decimal digit.
fn strip_zeros(mut t: String) -> String {
    if t.contains('.') {
        let trimmed = t.trim_end_matches('0').len();
        t.truncate(trimmed);
        if t.ends_with('.') {
            t.push('0');
        }
    }
    t
}

/// Format the absolute value of an angle in degrees.
/// * `ddd` the minimum number of digits of the degrees.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_dms(deg: f64, form: Format, prec: Option<i32>, ddd: usize) -> String {
    let prec = prec.unwrap_or_else(|| form.default_prec());
    let strip = prec > 0;
    let p = prec.unsigned_abs().min(9) as usize;
    let scale = 10_u64.pow(p as u32);
    let deg = libm::fabs(deg);

    match form {
        Format::D => {
            let v = libm::round(deg * scale as f64) as u64;
            let t = format_fixed(v, scale, p, ddd);
            format!("{}{S_DEG}", if strip { strip_zeros(t) } else { t })
        }
        Format::DM => {
            let unit = 60 * scale;
            let v = libm::round(deg * unit as f64) as u64;
            let m = format_fixed(v % unit, scale, p, 2);
            let m = if strip { strip_zeros(m) } else { m };
            format!("{:0ddd$}{S_DEG}{m}{S_MIN}", v / unit)
        }
        Format::DMS => {
            let unit = 3600 * scale;
            let v = libm::round(deg * unit as f64) as u64;
            let rem = v % unit;
            let s = format_fixed(rem % (60 * scale), scale, p, 2);
            let s = if strip { strip_zeros(s) } else { s };
            format!(
                "{:0ddd$}{S_DEG}{:02}{S_MIN}{s}{S_SEC}",
                v / unit,
                rem / (60 * scale)
            )
        }
    }
}

/// Convert an angle in degrees to a string in the given format, ignoring
/// its sign.
/// * `deg` the angle in degrees.
/// * `form` the format.
/// * `prec` the number of decimal places, `None` for the format default.
///   A positive precision strips trailing zeros, a negative precision keeps them.
/// # Examples
/// ```
/// use sphere_trig::dms::{to_dms, Format};
///
/// assert_eq!("45°45′45.36″", to_dms(45.7626, Format::DMS, None));
/// assert_eq!("45.7626°", to_dms(45.7626, Format::D, None));
/// assert_eq!("45°45.7560′", to_dms(45.7626, Format::DM, Some(-4)));
/// ```
#[must_use]
pub fn to_dms(deg: f64, form: Format, prec: Option<i32>) -> String {
    format_dms(deg, form, prec, 2)
}

/// Convert a latitude to a string with an `N` or `S` suffix.
#[must_use]
pub fn lat_dms(deg: f64, form: Format, prec: Option<i32>) -> String {
    let hemisphere = if deg < 0.0 { 'S' } else { 'N' };
    format!("{}{hemisphere}", format_dms(deg, form, prec, 2))
}

/// Convert a longitude to a string with an `E` or `W` suffix.
#[must_use]
pub fn lon_dms(deg: f64, form: Format, prec: Option<i32>) -> String {
    let hemisphere = if deg < 0.0 { 'W' } else { 'E' };
    format!("{}{hemisphere}", format_dms(deg, form, prec, 3))
}

/// The 32 points of the compass.
const COMPASS: [&str; 32] = [
    "N", "NbE", "NNE", "NEbN", "NE", "NEbE", "ENE", "EbN", "E", "EbS", "ESE", "SEbE", "SE", "SEbS",
    "SSE", "SbE", "S", "SbW", "SSW", "SWbS", "SW", "SWbW", "WSW", "WbS", "W", "WbN", "WNW", "NWbW",
    "NW", "NWbN", "NNW", "NbW",
];

/// The compass point of a bearing.
/// * `bearing` the bearing in degrees.
/// * `prec` the precision: 1 for 4 points, 2 for 8, 3 for 16 or 4 for 32 points.
/// # Examples
/// ```
/// use sphere_trig::dms::compass_point;
///
/// assert_eq!("NNE", compass_point(24.0, 3));
/// assert_eq!("SW", compass_point(226.0, 2));
/// ```
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn compass_point(bearing: f64, prec: u32) -> &'static str {
    let m = 2_usize << crate::clamp(prec, 1, 4);
    let index = libm::floor(m as f64 * wrap360(bearing) / 360.0 + 0.5) as usize % m;
    COMPASS[index * (32 / m)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dms() {
        assert_eq!(0.0, parse_dms("0.0°", "").unwrap());
        assert_eq!(0.0, parse_dms("0°", "").unwrap());
        assert_eq!(0.0, parse_dms("000°00'00\"", "").unwrap());
        assert_eq!(0.0, parse_dms("000°00'00.0\"", "").unwrap());
        assert_eq!(0.0, parse_dms("000° 00'00\"", "").unwrap());
        assert_eq!(0.0, parse_dms("000°00 ' 00.0\"", "").unwrap());

        let lon = parse_dms("000° 00′ 05.31″W", "EW").unwrap();
        assert_eq!("-0.001475", format!("{lon:.6}"));
        let lat = parse_dms("51° 28′ 40.12″ N", "NS").unwrap();
        assert_eq!("51.477811", format!("{lat:.6}"));

        assert_eq!(-5.71475, parse_dms("-5.71475", "EW").unwrap());
        assert_eq!(50.06632, parse_dms("50.06632", "NS").unwrap());
        assert_eq!(-47.5, parse_dms("47°30′S", "NS").unwrap());
        assert_eq!(47.5, parse_dms("-47°30′S", "NS").unwrap());
    }

    #[test]
    fn test_parse_dms_invalid() {
        assert_eq!(
            Err(Error::InvalidDms(String::new())),
            parse_dms("", "NS")
        );
        assert!(parse_dms("°", "NS").is_err());
        assert!(parse_dms("abc", "NS").is_err());
        assert!(parse_dms("51°N", "EW").is_err());
        assert!(parse_dms("1 2 3 4", "NS").is_err());
        assert!(parse_dms("10°-5′", "NS").is_err());
        assert!(parse_dms("inf", "NS").is_err());
    }

    #[test]
    fn test_to_dms() {
        assert_eq!("45°45′45.36″", to_dms(45.7626, Format::DMS, None));
        assert_eq!("45.7626°", to_dms(45.7626, Format::D, None));
        assert_eq!("45°45.756′", to_dms(45.7626, Format::DM, None));
        assert_eq!("45°45′45.36″", to_dms(45.7626, Format::DMS, None));
        assert_eq!("45.7626°", to_dms(45.7626, Format::D, Some(6)));
        assert_eq!("45°45.7560′", to_dms(45.7626, Format::DM, Some(-4)));
        assert_eq!("45°45′45.36″", to_dms(45.7626, Format::DMS, Some(2)));
        assert_eq!("46°", to_dms(45.7626, Format::D, Some(0)));
    }

    #[test]
    fn test_lat_lon_dms() {
        assert_eq!("52.20472°N", lat_dms(52.20472, Format::D, Some(6)));
        assert_eq!("000.14056°E", lon_dms(0.14056, Format::D, Some(6)));
        assert_eq!("52°12.283′N", lat_dms(52.20472, Format::DM, Some(3)));
        assert_eq!("000°08.434′E", lon_dms(0.14056, Format::DM, Some(3)));
        assert_eq!("52°12′17″N", lat_dms(52.20472, Format::DMS, Some(0)));
        assert_eq!("000°08′26″E", lon_dms(0.14056, Format::DMS, Some(0)));
        assert_eq!("51.0°S", lat_dms(-51.0, Format::D, None));
        assert_eq!("002.0°W", lon_dms(-2.0, Format::D, None));
    }

    #[test]
    fn test_compass_point() {
        let cases = [
            (1.0, 3, "N"),
            (0.0, 3, "N"),
            (-1.0, 3, "N"),
            (359.0, 3, "N"),
            (24.0, 3, "NNE"),
            (24.0, 1, "N"),
            (24.0, 2, "NE"),
            (226.0, 1, "W"),
            (226.0, 2, "SW"),
            (226.0, 3, "SW"),
            (237.0, 1, "W"),
            (237.0, 2, "SW"),
            (237.0, 3, "WSW"),
            (237.0, 4, "SWbW"),
        ];
        for (bearing, prec, expected) in cases {
            assert_eq!(expected, compass_point(bearing, prec));
        }
    }
}
