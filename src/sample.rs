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

//! The sample module contains the random position generator.
//!
//! Positions are drawn either uniformly over the whole sphere or from an
//! annulus around a centre position. The generator owns its random number
//! stream, so a fixed seed reproduces the same positions for the same call
//! sequence.

#![allow(clippy::float_cmp)]

use crate::error::{Error, Result};
use crate::position::{antipode, is_valid_position};
use crate::sphere::{destination_position, haversine, MAX_EARTH_DISTANCE};
use crate::Metres;
use angle_sc::Degrees;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unit_sphere::LatLong;

/// A generator of random positions on the spherical Earth model.
///
/// Wraps a seedable random number stream. Two samplers built with the same
/// seed produce identical position sequences for identical calls.
pub struct PositionSampler {
    rng: StdRng,
}

impl PositionSampler {
    /// Construct a `PositionSampler`.
    /// * `seed` - the seed of the random number stream, or None to seed
    ///   from operating system entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Generate a position uniformly distributed over the sphere.
    ///
    /// The latitude is the arcsine of a uniform draw, which weights
    /// latitude bands by their surface area; drawing the latitude angle
    /// uniformly would oversample the poles. The longitude is a second
    /// uniform draw over [-180, 180).
    pub fn uniform_position(&mut self) -> LatLong {
        let u: f64 = self.rng.gen();
        let lat = libm::asin(2.0 * u - 1.0).to_degrees();
        let v: f64 = self.rng.gen();
        let lon = 360.0 * v - 180.0;
        LatLong::new(Degrees(lat), Degrees(lon))
    }

    /// Generate a position whose distance from `centre` lies between
    /// `mindist` and `maxdist` inclusive.
    ///
    /// A `maxdist` of zero means unlimited: with both limits zero the
    /// position is uniform over the whole sphere, and with only `mindist`
    /// set the request is re-centred on the antipode, since "farther than
    /// `mindist` from the centre" is "closer than the antipodal distance
    /// minus `mindist` from the antipode". Swapped limits are accepted and
    /// swapped back.
    ///
    /// Candidates are drawn by bearing and distance and rejected until the
    /// true spherical distance lands inside the annulus. The distance draw
    /// uses a square root to spread candidates with uniform areal density,
    /// which is exact on a flat disc and an approximation on the sphere.
    /// When `mindist` equals `maxdist` the first candidate is accepted
    /// outright: the true distance almost never equals the target exactly,
    /// so rejection would not terminate.
    /// * `centre` - the centre position in geodetic coordinates.
    /// * `maxdist` - the maximum distance from `centre` in metres, or zero
    ///   for no limit.
    /// * `mindist` - the minimum distance from `centre` in metres.
    ///
    /// returns a position inside the annulus, `Error::CoordinateOutOfRange`
    /// if the centre is invalid, or `Error::InvalidSamplingArguments` if
    /// either distance limit is negative.
    pub fn annulus_position(
        &mut self,
        centre: &LatLong,
        maxdist: Metres,
        mindist: Metres,
    ) -> Result<LatLong> {
        if !is_valid_position(centre) {
            return Err(Error::CoordinateOutOfRange);
        }
        if maxdist.0 < 0.0 || mindist.0 < 0.0 {
            return Err(Error::InvalidSamplingArguments);
        }
        if maxdist.0 == 0.0 && mindist.0 == 0.0 {
            return Ok(self.uniform_position());
        }

        let mut min = mindist.0;
        let mut max = maxdist.0;
        let centre = if min > 0.0 && max == 0.0 {
            // a minimum beyond the antipode leaves only the antipode itself
            max = (MAX_EARTH_DISTANCE.0 - min).max(0.0);
            min = 0.0;
            antipode(centre)
        } else {
            LatLong::new(centre.lat(), centre.lon())
        };
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }

        let degenerate = min == max;
        loop {
            let u: f64 = self.rng.gen();
            let bearing = Degrees(360.0 * u);
            let v: f64 = self.rng.gen();
            let mut distance = min + libm::sqrt(v) * (max - min);
            if distance > MAX_EARTH_DISTANCE.0 {
                distance = MAX_EARTH_DISTANCE.0;
            }

            let candidate = destination_position(&centre, bearing, Metres(distance))?;
            if degenerate {
                return Ok(candidate);
            }

            let actual = haversine(&centre, &candidate)?;
            if (min..=max).contains(&actual.0) {
                return Ok(candidate);
            }
        }
    }
}
