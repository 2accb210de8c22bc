// Copyright (c) 2024-2025 Ken Barker

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

//! The ellipsoid module contains functions for deriving the parameters of an
//! ellipsoid of revolution from its Semimajor axis and flattening ratio.

use crate::Metres;
use angle_sc::Radians;

pub mod wgs84 {
    //! The WGS 84 geoid primary parameters from the ICAO
    //! [WGS 84 Implementation Manual Version 2.4](https://www.icao.int/safety/pbn/Documentation/EUROCONTROL/Eurocontrol%20WGS%2084%20Implementation%20Manual.pdf)
    //! Chapter 3, page 14.

    use crate::Metres;

    /// The WGS 84 Semimajor axis measured in metres.
    /// This is the radius at the equator.
    pub const A: Metres = Metres(6_378_137.0);

    /// The WGS 84 flattening, a ratio.
    /// This is the flattening of the ellipsoid at the poles.
    pub const F: f64 = 1.0 / 298.257_223_563;
}

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use geocalc::Metres;
/// use geocalc::ellipsoid::{calculate_minor_axis, wgs84};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// assert_eq!(b, calculate_minor_axis(wgs84::A, wgs84::F));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use geocalc::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
///
/// // The WGS 84 sq 2nd eccentricity.
/// assert_eq!(0.006739496742276434, calculate_sq_2nd_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Convert a `geodetic` Latitude to a `reduced` Latitude on the
/// auxiliary sphere.
///
/// The `atan2` form is used instead of `atan((1 - f) * tan(lat))` so that
/// latitudes at the poles do not divide by a zero cosine.
/// * `lat` - the `geodetic` Latitude
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_reduced_latitude(lat: Radians, one_minus_f: f64) -> Radians {
    Radians(libm::atan2(
        one_minus_f * libm::sin(lat.0),
        libm::cos(lat.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_minor_axis() {
        let b = calculate_minor_axis(wgs84::A, wgs84::F);
        assert_eq!(6_356_752.314_245_179, b.0);
    }

    #[test]
    fn test_eccentricities() {
        assert_eq!(
            0.006_694_379_990_141_316_5,
            calculate_sq_eccentricity(wgs84::F)
        );
        assert_eq!(
            0.006_739_496_742_276_434,
            calculate_sq_2nd_eccentricity(wgs84::F)
        );
    }

    #[test]
    fn test_calculate_reduced_latitude() {
        let one_minus_f = 1.0 - wgs84::F;

        // the equator and the poles are fixed points
        assert_eq!(0.0, calculate_reduced_latitude(Radians(0.0), one_minus_f).0);
        assert!(is_within_tolerance(
            core::f64::consts::FRAC_PI_2,
            calculate_reduced_latitude(Radians(core::f64::consts::FRAC_PI_2), one_minus_f).0,
            f64::EPSILON
        ));

        // at 45 degrees the reduced latitude is approx 44.9 degrees
        let lat_45 = calculate_reduced_latitude(Radians(45.0_f64.to_radians()), one_minus_f);
        assert!(is_within_tolerance(
            44.903_787_849_420_226,
            lat_45.0.to_degrees(),
            1e-12
        ));

        // reduced latitudes are symmetric about the equator
        for i in 0..90 {
            let lat = Radians(f64::from(i).to_radians());
            let north = calculate_reduced_latitude(lat, one_minus_f);
            let south = calculate_reduced_latitude(Radians(-lat.0), one_minus_f);
            assert_eq!(north.0, -south.0);
        }
    }
}
