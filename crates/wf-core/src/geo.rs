//! Geographic coordinate type and spherical-Earth primitives.
//!
//! Distances are great-circle miles on a sphere of radius
//! [`EARTH_RADIUS_MI`], computed with the haversine formula.  Bearings are
//! initial compass headings in degrees.  Both operate on `f64` longitude /
//! latitude pairs; argument order is always **longitude first**.

use crate::{CoreError, CoreResult};

/// Spherical Earth radius used by every distance computation, in miles.
pub const EARTH_RADIUS_MI: f64 = 3963.0;

/// A WGS-84 geographic coordinate, longitude first.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Reject NaN, infinities, and values outside the valid degree ranges.
    pub fn validate(self) -> CoreResult<Self> {
        let finite = self.lon.is_finite() && self.lat.is_finite();
        if !finite || self.lon.abs() > 180.0 || self.lat.abs() > 90.0 {
            return Err(CoreError::InvalidCoordinate { lon: self.lon, lat: self.lat });
        }
        Ok(self)
    }

    /// `true` if both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Great-circle distance to `other` in miles.
    #[inline]
    pub fn distance_mi(self, other: GeoPoint) -> f64 {
        distance(self.lon, self.lat, other.lon, other.lat)
    }

    /// Initial bearing from `self` toward `other`, degrees in (−180, 180].
    #[inline]
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        bearing(self.lon, self.lat, other.lon, other.lat)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = CoreError;

    /// Parse `"lon,lat"`.  The result is validated, so out-of-range values
    /// fail with [`CoreError::InvalidCoordinate`] rather than `Parse`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let parse_err = || CoreError::Parse(format!("expected \"lon,lat\", got {s:?}"));
        let (lon, lat) = s.split_once(',').ok_or_else(parse_err)?;
        let lon: f64 = lon.trim().parse().map_err(|_| parse_err())?;
        let lat: f64 = lat.trim().parse().map_err(|_| parse_err())?;
        GeoPoint::new(lon, lat).validate()
    }
}

/// Haversine great-circle distance in miles between two lon/lat pairs.
pub fn distance(lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
    let phi1 = lat_a.to_radians();
    let phi2 = lat_b.to_radians();
    let d_phi = (lat_b - lat_a).to_radians();
    let d_lambda = (lon_b - lon_a).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MI * c
}

/// Initial bearing in degrees from point A toward point B, in (−180, 180].
pub fn bearing(lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
    let phi1 = lat_a.to_radians();
    let phi2 = lat_b.to_radians();
    let d_lambda = (lon_b - lon_a).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    let deg = y.atan2(x).to_degrees();
    // atan2 may return exactly −π; the half-open range excludes it.
    if deg <= -180.0 { deg + 360.0 } else { deg }
}

/// Normalize an angular difference to [−180, 180].
///
/// Used to compare two bearings: `normalize_delta(out - in)` is the signed
/// turn angle, positive clockwise (rightward).
pub fn normalize_delta(mut delta: f64) -> f64 {
    if !delta.is_finite() {
        return delta;
    }
    while delta > 180.0 {
        delta -= 360.0;
    }
    while delta < -180.0 {
        delta += 360.0;
    }
    delta
}
