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

//! The geodesic module contains functions for calculating the length and
//! initial azimuth of the geodesic between two points on the surface of an
//! ellipsoid, the "inverse" geodesic problem.
//!
//! Both solvers share one iteration over the auxiliary sphere longitude
//! difference lambda. The iteration does not converge between nearly
//! antipodal positions; the distance solver reports that as
//! [`Error::NonConvergent`] and the azimuth solver as
//! [`Error::BearingUndefined`].

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::calculate_reduced_latitude;
use crate::error::{Error, Result};
use crate::position::{are_antipodal, is_valid_position, normalize_longitude};
use crate::{Ellipsoid, Metres};
use angle_sc::{Degrees, Radians};
use unit_sphere::LatLong;

/// The convergence tolerance for the lambda iteration, in radians.
pub const LAMBDA_TOLERANCE: f64 = 1e-12;

/// The maximum number of lambda iterations to attempt.
pub const MAX_ITERATIONS: u32 = 100;

/// The latitude tolerance below which both positions count as lying on the
/// Equator, in degrees.
const EQUATORIAL_EPSILON: f64 = 1e-13;

/// The converged state of the shared lambda iteration.
struct LambdaSolution {
    sin_u1: f64,
    cos_u1: f64,
    sin_u2: f64,
    cos_u2: f64,
    sin_lambda: f64,
    cos_lambda: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    sigma: f64,
    cos_sq_alpha: f64,
    cos_2sigma_m: f64,
}

/// The outcome of the shared lambda iteration.
enum Iteration {
    /// The positions are effectively the same point.
    Coincident,
    /// The iteration converged to within [`LAMBDA_TOLERANCE`].
    Converged(LambdaSolution),
    /// The iteration exhausted [`MAX_ITERATIONS`], which happens between
    /// nearly antipodal positions.
    CapExhausted,
}

/// Iterate the auxiliary sphere longitude difference lambda between a pair
/// of positions until it converges or the iteration limit is reached.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `ellipsoid` - the `Ellipsoid`.
fn iterate_lambda(a: &LatLong, b: &LatLong, ellipsoid: &Ellipsoid) -> Iteration {
    let f = ellipsoid.f();
    let one_minus_f = ellipsoid.one_minus_f();

    // reduced latitudes on the auxiliary sphere
    let u1 = calculate_reduced_latitude(Radians(a.lat().0.to_radians()), one_minus_f);
    let u2 = calculate_reduced_latitude(Radians(b.lat().0.to_radians()), one_minus_f);
    let sin_u1 = libm::sin(u1.0);
    let cos_u1 = libm::cos(u1.0);
    let sin_u2 = libm::sin(u2.0);
    let cos_u2 = libm::cos(u2.0);

    // the geodetic longitude difference
    let l = (b.lon().0 - a.lon().0).to_radians();
    let mut lambda = l;

    for _ in 0..MAX_ITERATIONS {
        let sin_lambda = libm::sin(lambda);
        let cos_lambda = libm::cos(lambda);

        let t1 = cos_u2 * sin_lambda;
        let t2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = libm::sqrt(t1 * t1 + t2 * t2);
        if sin_sigma == 0.0 {
            return Iteration::Coincident;
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = libm::atan2(sin_sigma, cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // the cos_2sigma_m term is indeterminate on an equatorial line
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

        let previous_lambda = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        if libm::fabs(lambda - previous_lambda) < LAMBDA_TOLERANCE {
            return Iteration::Converged(LambdaSolution {
                sin_u1,
                cos_u1,
                sin_u2,
                cos_u2,
                sin_lambda,
                cos_lambda,
                sin_sigma,
                cos_sigma,
                sigma,
                cos_sq_alpha,
                cos_2sigma_m,
            });
        }
    }

    Iteration::CapExhausted
}

/// Calculate the length of the geodesic between a pair of positions on an
/// ellipsoid.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the geodesic length in metres, `Error::CoordinateOutOfRange` if
/// either position is invalid, or `Error::NonConvergent` if the iteration
/// exhausted its limit, which happens between nearly antipodal positions.
///
/// # Examples
/// ```
/// use angle_sc::Degrees;
/// use geocalc::geodesic::inverse_distance;
/// use geocalc::WGS84_ELLIPSOID;
/// use unit_sphere::LatLong;
///
/// // pole to pole along a meridian
/// let north = LatLong::new(Degrees(90.0), Degrees(0.0));
/// let south = LatLong::new(Degrees(-90.0), Degrees(0.0));
/// let length = inverse_distance(&north, &south, &WGS84_ELLIPSOID).unwrap();
/// assert!((length.0 - 20_003_931.458_623_58).abs() < 1e-6);
/// ```
pub fn inverse_distance(a: &LatLong, b: &LatLong, ellipsoid: &Ellipsoid) -> Result<Metres> {
    if !is_valid_position(a) || !is_valid_position(b) {
        return Err(Error::CoordinateOutOfRange);
    }

    match iterate_lambda(a, b, ellipsoid) {
        Iteration::Coincident => Ok(Metres(0.0)),
        Iteration::CapExhausted => Err(Error::NonConvergent),
        Iteration::Converged(s) => {
            let u_sq = s.cos_sq_alpha * ellipsoid.ep_2();
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

            let delta_sigma = big_b
                * s.sin_sigma
                * (s.cos_2sigma_m
                    + big_b / 4.0
                        * (s.cos_sigma * (-1.0 + 2.0 * s.cos_2sigma_m * s.cos_2sigma_m)
                            - big_b / 6.0
                                * s.cos_2sigma_m
                                * (-3.0 + 4.0 * s.sin_sigma * s.sin_sigma)
                                * (-3.0 + 4.0 * s.cos_2sigma_m * s.cos_2sigma_m)));

            Ok(Metres(ellipsoid.b().0 * big_a * (s.sigma - delta_sigma)))
        }
    }
}

/// Calculate the initial azimuth of the geodesic between a pair of positions
/// on an ellipsoid.
///
/// Positions on the Equator are detected up front and resolved due East or
/// due West from the sign of the normalized longitude difference; the
/// iterative form is unstable for an equatorial line.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the initial azimuth at `a` in degrees, in the range [0, 360),
/// `Error::CoordinateOutOfRange` if either position is invalid, or
/// `Error::BearingUndefined` if the positions are coincident, antipodal,
/// share a pole, or the iteration exhausted its limit.
pub fn inverse_azimuth(a: &LatLong, b: &LatLong, ellipsoid: &Ellipsoid) -> Result<Degrees> {
    if !is_valid_position(a) || !is_valid_position(b) {
        return Err(Error::CoordinateOutOfRange);
    }

    let lat1 = a.lat().0;
    let lat2 = b.lat().0;

    // no azimuth between coincident positions
    if lat1 == lat2 && a.lon().0 == b.lon().0 {
        return Err(Error::BearingUndefined);
    }
    // or between positions at the same pole
    if (lat1 == 90.0 && lat2 == 90.0) || (lat1 == -90.0 && lat2 == -90.0) {
        return Err(Error::BearingUndefined);
    }
    // or between opposite poles and other antipodal pairs
    if are_antipodal(a, b) {
        return Err(Error::BearingUndefined);
    }

    // equatorial geodesics run along the Equator
    if libm::fabs(lat1) < EQUATORIAL_EPSILON && libm::fabs(lat2) < EQUATORIAL_EPSILON {
        let delta_lon = normalize_longitude(Degrees(b.lon().0 - a.lon().0));
        return if delta_lon.0 > 0.0 {
            Ok(Degrees(90.0))
        } else {
            Ok(Degrees(270.0))
        };
    }

    match iterate_lambda(a, b, ellipsoid) {
        Iteration::Coincident | Iteration::CapExhausted => Err(Error::BearingUndefined),
        Iteration::Converged(s) => {
            let azimuth = libm::atan2(
                s.cos_u2 * s.sin_lambda,
                s.cos_u1 * s.sin_u2 - s.sin_u1 * s.cos_u2 * s.cos_lambda,
            );
            Ok(Degrees(libm::fmod(azimuth.to_degrees() + 360.0, 360.0)))
        }
    }
}
