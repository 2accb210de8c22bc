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

//! The sphere module contains functions for calculating distances, initial
//! bearings and destination positions along great circles on a spherical
//! Earth model.

#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]

use crate::error::{Error, Result};
use crate::position::{are_antipodal, is_valid_position, normalize_longitude};
use crate::Metres;
use angle_sc::Degrees;
use unit_sphere::LatLong;

/// The mean Earth radius of the spherical model, in metres.
pub const EARTH_RADIUS: Metres = Metres(6_371_000.0);

/// Half the circumference of the spherical model: the distance between a
/// position and its antipode, in metres.
pub const MAX_EARTH_DISTANCE: Metres = Metres(core::f64::consts::PI * 6_371_000.0);

/// The factor applied to a pole latitude before the direct geodesic solve,
/// moving it just off the singularity in the longitude calculation.
const POLE_NUDGE: f64 = 1.0 - 1e-9;

/// Normalize a bearing angle in degrees into the range [0, 360).
fn normalize_bearing(deg: f64) -> Degrees {
    Degrees(libm::fmod(deg + 360.0, 360.0))
}

/// Calculate the haversine distance between a pair of positions.
///
/// The arc between exact antipodes is indeterminate under the haversine
/// rounding, so that case resolves to [`MAX_EARTH_DISTANCE`] instead of
/// propagating a NaN.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
///
/// returns the distance in metres on the spherical model, or
/// `Error::CoordinateOutOfRange` if either position is invalid.
///
/// # Examples
/// ```
/// use angle_sc::Degrees;
/// use geocalc::sphere::haversine;
/// use unit_sphere::LatLong;
///
/// // a quarter of the equator
/// let a = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let b = LatLong::new(Degrees(0.0), Degrees(90.0));
/// let distance = haversine(&a, &b).unwrap();
/// assert!((distance.0 - 10_007_543.398).abs() < 1e-3);
/// ```
pub fn haversine(a: &LatLong, b: &LatLong) -> Result<Metres> {
    if !is_valid_position(a) || !is_valid_position(b) {
        return Err(Error::CoordinateOutOfRange);
    }

    let lat1 = a.lat().0.to_radians();
    let lat2 = b.lat().0.to_radians();
    let delta_phi = (b.lat().0 - a.lat().0).to_radians();
    let delta_lambda = (b.lon().0 - a.lon().0).to_radians();

    let sin_delta_phi = libm::sin(delta_phi / 2.0);
    let sin_delta_lambda = libm::sin(delta_lambda / 2.0);

    let hav = sin_delta_phi * sin_delta_phi
        + libm::cos(lat1) * libm::cos(lat2) * sin_delta_lambda * sin_delta_lambda;

    let arc = 2.0 * libm::atan2(libm::sqrt(hav), libm::sqrt(1.0 - hav));

    let distance = EARTH_RADIUS.0 * arc;
    if distance.is_nan() {
        Ok(MAX_EARTH_DISTANCE)
    } else {
        Ok(Metres(distance))
    }
}

/// Calculate the initial bearing of the great circle between a pair of
/// positions.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
///
/// returns the initial bearing at `a` in degrees, in the range [0, 360),
/// `Error::CoordinateOutOfRange` if either position is invalid, or
/// `Error::BearingUndefined` if the positions are antipodal, since every
/// great circle through a position passes through its antipode.
pub fn initial_bearing(a: &LatLong, b: &LatLong) -> Result<Degrees> {
    if !is_valid_position(a) || !is_valid_position(b) {
        return Err(Error::CoordinateOutOfRange);
    }
    if are_antipodal(a, b) {
        return Err(Error::BearingUndefined);
    }

    let lat1 = a.lat().0.to_radians();
    let lat2 = b.lat().0.to_radians();
    let delta_lambda = (b.lon().0 - a.lon().0).to_radians();

    let y = libm::sin(delta_lambda) * libm::cos(lat2);
    let x = libm::cos(lat1) * libm::sin(lat2)
        - libm::sin(lat1) * libm::cos(lat2) * libm::cos(delta_lambda);

    Ok(normalize_bearing(libm::atan2(y, x).to_degrees()))
}

/// Calculate the destination position after travelling a distance along a
/// bearing from a start position, the "direct" geodesic problem on the
/// spherical model.
///
/// A negative distance travels in the opposite direction of the bearing.
/// A start position at a pole is nudged slightly towards the equator,
/// since the longitude term is singular at the poles.
/// * `a` - the start position in geodetic coordinates.
/// * `bearing` - the bearing at `a`, in the range [0, 360] degrees.
/// * `distance` - the signed distance in metres.
///
/// returns the destination position with its longitude normalized into
/// (-180, 180], `Error::CoordinateOutOfRange` if `a` is invalid, or
/// `Error::BearingOutOfRange` if the bearing is outside [0, 360].
///
/// # Examples
/// ```
/// use angle_sc::Degrees;
/// use geocalc::sphere::destination_position;
/// use geocalc::Metres;
/// use unit_sphere::LatLong;
///
/// let a = LatLong::new(Degrees(45.0), Degrees(0.0));
/// let b = destination_position(&a, Degrees(45.0), Metres(1000.0)).unwrap();
/// assert!((b.lat().0 - 45.006359).abs() < 5e-7);
/// assert!((b.lon().0 - 0.008994).abs() < 5e-7);
/// ```
pub fn destination_position(a: &LatLong, bearing: Degrees, distance: Metres) -> Result<LatLong> {
    if !is_valid_position(a) {
        return Err(Error::CoordinateOutOfRange);
    }
    if !(0.0..=360.0).contains(&bearing.0) {
        return Err(Error::BearingOutOfRange);
    }

    let mut lat = a.lat().0;
    if libm::fabs(lat) == 90.0 {
        lat *= POLE_NUDGE;
    }

    let phi1 = lat.to_radians();
    let theta = bearing.0.to_radians();
    let delta = distance.0 / EARTH_RADIUS.0;

    let sin_delta = libm::sin(delta);
    let cos_delta = libm::cos(delta);
    let sin_phi1 = libm::sin(phi1);
    let cos_phi1 = libm::cos(phi1);

    let sin_phi2 = sin_phi1 * cos_delta + cos_phi1 * sin_delta * libm::cos(theta);
    let sin_phi2 = sin_phi2.clamp(-1.0, 1.0);
    let phi2 = libm::asin(sin_phi2);

    let lambda2 = a.lon().0.to_radians()
        + libm::atan2(
            libm::sin(theta) * sin_delta * cos_phi1,
            cos_delta - sin_phi1 * sin_phi2,
        );

    Ok(LatLong::new(
        Degrees(phi2.to_degrees()),
        normalize_longitude(Degrees(lambda2.to_degrees())),
    ))
}

/// Calculate the position at a fraction of the great circle route between a
/// pair of positions.
///
/// The fraction is unrestricted: 0 is the start position, 1 is the finish
/// position, and values outside [0, 1] extrapolate beyond the end points or
/// behind the start.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `fraction` - the fraction of the route distance.
///
/// returns the route position, `Error::CoordinateOutOfRange` if either
/// position is invalid, or `Error::BearingUndefined` if the positions are
/// antipodal so the route between them is not unique.
pub fn route_position(a: &LatLong, b: &LatLong, fraction: f64) -> Result<LatLong> {
    let bearing = initial_bearing(a, b)?;
    let total = haversine(a, b)?;
    destination_position(a, bearing, Metres(fraction * total.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::antipode;
    use angle_sc::is_within_tolerance;

    fn round6(value: f64) -> f64 {
        libm::round(value * 1e6) / 1e6
    }

    #[test]
    fn test_haversine_invalid_positions() {
        let valid = LatLong::new(Degrees(0.0), Degrees(0.0));
        let bad_lat = LatLong::new(Degrees(90.5), Degrees(0.0));
        let bad_lon = LatLong::new(Degrees(0.0), Degrees(-181.0));

        assert_eq!(
            Err(Error::CoordinateOutOfRange),
            haversine(&bad_lat, &valid)
        );
        assert_eq!(
            Err(Error::CoordinateOutOfRange),
            haversine(&valid, &bad_lon)
        );
    }

    #[test]
    fn test_haversine_coincident_and_symmetric() {
        let a = LatLong::new(Degrees(59.9139), Degrees(10.7522));
        let b = LatLong::new(Degrees(-33.8688), Degrees(151.2093));

        assert_eq!(0.0, haversine(&a, &a).unwrap().0);
        assert_eq!(haversine(&a, &b).unwrap().0, haversine(&b, &a).unwrap().0);
    }

    #[test]
    fn test_haversine_known_distances() {
        // London to Paris
        let a = LatLong::new(Degrees(51.5074), Degrees(-0.1278));
        let b = LatLong::new(Degrees(48.8566), Degrees(2.3522));
        let d = haversine(&a, &b).unwrap();
        assert!(is_within_tolerance(344_000.0, d.0, 5000.0));

        // one degree of latitude along a meridian
        let c = LatLong::new(Degrees(1.0), Degrees(0.0));
        let origin = LatLong::new(Degrees(0.0), Degrees(0.0));
        let d = haversine(&origin, &c).unwrap();
        assert!(is_within_tolerance(111_194.93, d.0, 0.01));
    }

    #[test]
    fn test_haversine_antipodal_is_max_distance() {
        let positions = [
            LatLong::new(Degrees(0.0), Degrees(0.0)),
            LatLong::new(Degrees(30.0), Degrees(151.2093)),
            LatLong::new(Degrees(45.0), Degrees(9.0)),
            LatLong::new(Degrees(60.0), Degrees(-97.25)),
            LatLong::new(Degrees(90.0), Degrees(0.0)),
        ];
        for a in &positions {
            let d = haversine(a, &antipode(a)).unwrap();
            assert_eq!(20_015_086.796_021, round6(d.0));
        }
    }

    #[test]
    fn test_initial_bearing() {
        let a = LatLong::new(Degrees(1.0), Degrees(2.0));
        let b = LatLong::new(Degrees(3.0), Degrees(4.0));
        let bearing = initial_bearing(&a, &b).unwrap();
        assert_eq!(44.951_998, round6(bearing.0));

        // due North along a meridian
        let c = LatLong::new(Degrees(10.0), Degrees(5.0));
        let d = LatLong::new(Degrees(20.0), Degrees(5.0));
        assert_eq!(0.0, initial_bearing(&c, &d).unwrap().0);
        // and due South back again
        assert_eq!(180.0, initial_bearing(&d, &c).unwrap().0);

        // westbound bearings are normalized into [0, 360)
        let e = LatLong::new(Degrees(0.0), Degrees(0.0));
        let f = LatLong::new(Degrees(0.0), Degrees(-10.0));
        assert_eq!(270.0, initial_bearing(&e, &f).unwrap().0);
    }

    #[test]
    fn test_initial_bearing_errors() {
        let valid = LatLong::new(Degrees(0.0), Degrees(0.0));
        let bad = LatLong::new(Degrees(0.0), Degrees(200.0));
        assert_eq!(
            Err(Error::CoordinateOutOfRange),
            initial_bearing(&valid, &bad)
        );

        let a = LatLong::new(Degrees(45.0), Degrees(9.0));
        assert_eq!(
            Err(Error::BearingUndefined),
            initial_bearing(&a, &antipode(&a))
        );
    }

    #[test]
    fn test_destination_position() {
        let a = LatLong::new(Degrees(45.0), Degrees(0.0));
        let b = destination_position(&a, Degrees(45.0), Metres(1000.0)).unwrap();
        assert_eq!(45.006_359, round6(b.lat().0));
        assert_eq!(0.008_994, round6(b.lon().0));

        // a zero distance returns the start position
        let c = destination_position(&a, Degrees(123.0), Metres(0.0)).unwrap();
        assert_eq!(45.0, round6(c.lat().0));
        assert_eq!(0.0, round6(c.lon().0));

        // a negative distance travels in the opposite direction
        let east = destination_position(&a, Degrees(90.0), Metres(10_000.0)).unwrap();
        let west = destination_position(&a, Degrees(90.0), Metres(-10_000.0)).unwrap();
        assert_eq!(round6(east.lon().0), round6(-west.lon().0));
        assert_eq!(round6(east.lat().0), round6(west.lat().0));
    }

    #[test]
    fn test_destination_position_at_pole() {
        let north = LatLong::new(Degrees(90.0), Degrees(0.0));
        let b = destination_position(&north, Degrees(180.0), Metres(1000.0)).unwrap();
        assert!(b.lat().0 < 90.0);
        assert!(!b.lat().0.is_nan());
        assert!(!b.lon().0.is_nan());
        assert!(libm::fabs(b.lon().0) <= 180.0);

        // roughly 1000 m from the pole; the nudge costs about a centimetre
        let d = haversine(&north, &b).unwrap();
        assert!(is_within_tolerance(1000.0, d.0, 0.1));
    }

    #[test]
    fn test_destination_position_errors() {
        let a = LatLong::new(Degrees(45.0), Degrees(0.0));
        assert_eq!(
            Err(Error::BearingOutOfRange),
            destination_position(&a, Degrees(-0.5), Metres(1000.0))
        );
        assert_eq!(
            Err(Error::BearingOutOfRange),
            destination_position(&a, Degrees(360.5), Metres(1000.0))
        );
        // both ends of the bearing range are inclusive
        assert!(destination_position(&a, Degrees(0.0), Metres(1.0)).is_ok());
        assert!(destination_position(&a, Degrees(360.0), Metres(1.0)).is_ok());

        let bad = LatLong::new(Degrees(91.0), Degrees(0.0));
        assert_eq!(
            Err(Error::CoordinateOutOfRange),
            destination_position(&bad, Degrees(0.0), Metres(1.0))
        );
    }

    #[test]
    fn test_route_position_end_points() {
        let a = LatLong::new(Degrees(60.0), Degrees(5.0));
        let b = LatLong::new(Degrees(50.0), Degrees(-30.0));

        let start = route_position(&a, &b, 0.0).unwrap();
        assert_eq!(60.0, round6(start.lat().0));
        assert_eq!(5.0, round6(start.lon().0));

        let finish = route_position(&a, &b, 1.0).unwrap();
        assert_eq!(50.0, round6(finish.lat().0));
        assert_eq!(-30.0, round6(finish.lon().0));
    }

    #[test]
    fn test_route_position_crosses_pole() {
        let a = LatLong::new(Degrees(45.0), Degrees(0.0));
        let b = LatLong::new(Degrees(45.0), Degrees(180.0));

        // the mid point of the route is the North pole
        let mid = route_position(&a, &b, 0.5).unwrap();
        assert_eq!(90.0, round6(mid.lat().0));
        assert!(libm::fabs(mid.lon().0) <= 180.0);
    }

    #[test]
    fn test_route_position_extrapolates() {
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(0.0), Degrees(10.0));

        let beyond = route_position(&a, &b, 2.0).unwrap();
        assert_eq!(20.0, round6(beyond.lon().0));

        let behind = route_position(&a, &b, -1.0).unwrap();
        assert_eq!(-10.0, round6(behind.lon().0));
    }

    #[test]
    fn test_route_position_errors() {
        let a = LatLong::new(Degrees(45.0), Degrees(9.0));
        assert_eq!(
            Err(Error::BearingUndefined),
            route_position(&a, &antipode(&a), 0.5)
        );

        let bad = LatLong::new(Degrees(0.0), Degrees(181.0));
        assert_eq!(
            Err(Error::CoordinateOutOfRange),
            route_position(&a, &bad, 0.5)
        );
    }
}
