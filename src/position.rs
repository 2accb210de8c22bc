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

//! The position module contains functions for validating geodetic positions
//! and for reasoning about their relationship on the sphere: longitude
//! normalization, antipode construction and antipodal detection.

use angle_sc::Degrees;
use unit_sphere::LatLong;

/// The absolute tolerance for antipodal detection, in degrees.
/// Roughly 1.1 mm at the Earth's surface.
pub const ANTIPODAL_EPSILON: f64 = 1e-10;

/// Test whether a position lies within the valid coordinate ranges:
/// latitude in [-90, 90] and longitude in [-180, 180], both inclusive.
/// * `a` - the position.
#[must_use]
pub fn is_valid_position(a: &LatLong) -> bool {
    libm::fabs(a.lat().0) <= 90.0 && libm::fabs(a.lon().0) <= 180.0
}

/// Normalize a longitude into the half-open interval (-180, 180].
///
/// Uses modulo-360 arithmetic, so any finite value maps onto the valid
/// range and a value already in range is returned unchanged.
/// @pre `lon` is finite.
/// * `lon` - the longitude, in degrees.
///
/// returns the equivalent longitude in (-180, 180].
/// # Examples
/// ```
/// use angle_sc::Degrees;
/// use geocalc::position::normalize_longitude;
///
/// assert_eq!(180.0, normalize_longitude(Degrees(-180.0)).0);
/// assert_eq!(-170.0, normalize_longitude(Degrees(190.0)).0);
/// assert_eq!(20.0, normalize_longitude(Degrees(380.0)).0);
/// ```
#[must_use]
pub fn normalize_longitude(lon: Degrees) -> Degrees {
    let mut deg = libm::fmod(lon.0, 360.0);
    if deg > 180.0 {
        deg -= 360.0;
    } else if deg <= -180.0 {
        deg += 360.0;
    }
    Degrees(deg)
}

/// Calculate the antipode of a position: the point diametrically opposite
/// on the sphere.
/// * `a` - the position.
///
/// returns the antipodal position.
#[must_use]
pub fn antipode(a: &LatLong) -> LatLong {
    LatLong::new(
        Degrees(-a.lat().0),
        normalize_longitude(Degrees(a.lon().0 + 180.0)),
    )
}

/// Test whether two positions are antipodal, within [`ANTIPODAL_EPSILON`].
///
/// Two positions are antipodal when one is at the North pole and the other
/// at the South pole, or when their latitudes cancel and their longitudes
/// differ by 180 degrees.
/// * `a`, `b` - the positions.
/// # Examples
/// ```
/// use angle_sc::Degrees;
/// use geocalc::position::are_antipodal;
/// use unit_sphere::LatLong;
///
/// let a = LatLong::new(Degrees(45.0), Degrees(9.0));
/// let b = LatLong::new(Degrees(-45.0), Degrees(-171.0));
/// assert!(are_antipodal(&a, &b));
/// ```
#[must_use]
pub fn are_antipodal(a: &LatLong, b: &LatLong) -> bool {
    let lat1 = a.lat().0;
    let lat2 = b.lat().0;

    // pole to pole, either way around
    if (libm::fabs(lat1 - 90.0) < ANTIPODAL_EPSILON
        && libm::fabs(lat2 + 90.0) < ANTIPODAL_EPSILON)
        || (libm::fabs(lat1 + 90.0) < ANTIPODAL_EPSILON
            && libm::fabs(lat2 - 90.0) < ANTIPODAL_EPSILON)
    {
        return true;
    }

    libm::fabs(lat1 + lat2) < ANTIPODAL_EPSILON
        && libm::fabs(libm::fabs(a.lon().0 - b.lon().0) - 180.0) < ANTIPODAL_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_position() {
        assert!(is_valid_position(&LatLong::new(
            Degrees(90.0),
            Degrees(180.0)
        )));
        assert!(is_valid_position(&LatLong::new(
            Degrees(-90.0),
            Degrees(-180.0)
        )));
        assert!(is_valid_position(&LatLong::new(Degrees(0.0), Degrees(0.0))));

        assert!(!is_valid_position(&LatLong::new(
            Degrees(90.000001),
            Degrees(0.0)
        )));
        assert!(!is_valid_position(&LatLong::new(
            Degrees(-90.000001),
            Degrees(0.0)
        )));
        assert!(!is_valid_position(&LatLong::new(
            Degrees(0.0),
            Degrees(180.000001)
        )));
        assert!(!is_valid_position(&LatLong::new(
            Degrees(0.0),
            Degrees(-180.000001)
        )));
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(0.0, normalize_longitude(Degrees(0.0)).0);
        assert_eq!(180.0, normalize_longitude(Degrees(180.0)).0);
        assert_eq!(180.0, normalize_longitude(Degrees(-180.0)).0);
        assert_eq!(180.0, normalize_longitude(Degrees(540.0)).0);
        assert_eq!(180.0, normalize_longitude(Degrees(-540.0)).0);
        assert_eq!(-170.0, normalize_longitude(Degrees(190.0)).0);
        assert_eq!(170.0, normalize_longitude(Degrees(-190.0)).0);
        assert_eq!(0.0, normalize_longitude(Degrees(720.0)).0);
        assert_eq!(-0.25, normalize_longitude(Degrees(359.75)).0);
    }

    #[test]
    fn test_normalize_longitude_is_idempotent() {
        for i in -720..=720 {
            let lon = Degrees(f64::from(i) * 0.5);
            let once = normalize_longitude(lon);
            let twice = normalize_longitude(once);
            assert_eq!(once.0, twice.0);
            assert!(once.0 > -180.0 && once.0 <= 180.0);
        }
    }

    #[test]
    fn test_antipode() {
        let a = antipode(&LatLong::new(Degrees(45.0), Degrees(9.0)));
        assert_eq!(-45.0, a.lat().0);
        assert_eq!(-171.0, a.lon().0);

        let b = antipode(&LatLong::new(Degrees(-30.0), Degrees(-100.0)));
        assert_eq!(30.0, b.lat().0);
        assert_eq!(80.0, b.lon().0);

        // the antipode of a pole is the other pole
        let c = antipode(&LatLong::new(Degrees(90.0), Degrees(0.0)));
        assert_eq!(-90.0, c.lat().0);
    }

    #[test]
    fn test_are_antipodal_poles() {
        let north = LatLong::new(Degrees(90.0), Degrees(0.0));
        let south = LatLong::new(Degrees(-90.0), Degrees(0.0));
        assert!(are_antipodal(&north, &south));
        assert!(are_antipodal(&south, &north));

        // pole longitudes are irrelevant
        let south_dateline = LatLong::new(Degrees(-90.0), Degrees(180.0));
        assert!(are_antipodal(&north, &south_dateline));
    }

    #[test]
    fn test_are_antipodal_general() {
        let a = LatLong::new(Degrees(45.0), Degrees(9.0));
        assert!(are_antipodal(&a, &antipode(&a)));
        assert!(!are_antipodal(&a, &a));

        let b = LatLong::new(Degrees(0.0), Degrees(0.0));
        assert!(are_antipodal(&b, &LatLong::new(Degrees(0.0), Degrees(180.0))));
        assert!(are_antipodal(
            &b,
            &LatLong::new(Degrees(0.0), Degrees(-180.0))
        ));

        // just inside and just outside the tolerance
        let near = LatLong::new(Degrees(-45.0 + 0.5e-10), Degrees(-171.0));
        assert!(are_antipodal(&LatLong::new(Degrees(45.0), Degrees(9.0)), &near));
        let far = LatLong::new(Degrees(-45.0 + 2e-10), Degrees(-171.0));
        assert!(!are_antipodal(&LatLong::new(Degrees(45.0), Degrees(9.0)), &far));
    }
}
