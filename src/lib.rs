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

//! geocalc
//!
//! A library and command line tool for calculating distances, initial
//! bearings, destination positions, route positions and random positions
//! on the surface of the Earth from decimal degree coordinates.
//!
//! Distances and bearings between positions can be calculated on the
//! spherical model with the haversine formula (see [`sphere`]) or on the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid with the iterative inverse solution (see [`geodesic`]).
//! The spherical solvers also provide the "direct" problem, fractional
//! route interpolation and the random position generator built on them
//! (see [`sample`]).
//!
//! ## Design
//!
//! The solvers are pure functions over [`LatLong`] positions, [`Degrees`]
//! bearings and [`Metres`] distances; every failure is reported through
//! [`Error`] instead of a sentinel value, and the output layer performs all
//! presentation rounding (see [`format`]).
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Degrees`
//!   and `Radians`;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define
//!   `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define
//!   `Metres`;
//! - [rand](https://crates.io/crates/rand) - for the seedable random
//!   number stream of the position sampler.

pub mod cli;
pub mod ellipsoid;
pub mod error;
pub mod format;
pub mod geodesic;
pub mod position;
pub mod sample;
pub mod sphere;

pub use angle_sc::{Degrees, Radians};
pub use error::{Error, Result};
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;

use once_cell::sync::Lazy;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }
}

/// A static instance of the WGS-84 `Ellipsoid`.
pub static WGS84_ELLIPSOID: Lazy<Ellipsoid> = Lazy::new(Ellipsoid::wgs84);

/// The formula used to calculate a distance or bearing between positions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Formula {
    /// The haversine formula on the spherical model.
    Haversine,
    /// The iterative inverse solution on the WGS-84 ellipsoid.
    Karney,
}

/// Calculate the distance between a pair of positions with the given
/// formula.
/// * `formula` - the distance formula.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
///
/// returns the distance in metres, or the error of the underlying solver.
///
/// # Examples
/// ```
/// use angle_sc::Degrees;
/// use geocalc::{distance, Formula};
/// use unit_sphere::LatLong;
///
/// let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
/// let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));
/// let d = distance(Formula::Karney, &istanbul, &washington).unwrap();
/// assert!((d.0 - 8_339_863.136).abs() < 0.01);
/// ```
pub fn distance(formula: Formula, a: &LatLong, b: &LatLong) -> Result<Metres> {
    match formula {
        Formula::Haversine => sphere::haversine(a, b),
        Formula::Karney => geodesic::inverse_distance(a, b, &WGS84_ELLIPSOID),
    }
}

/// Calculate the initial bearing between a pair of positions with the
/// given formula.
/// * `formula` - the distance formula.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
///
/// returns the initial bearing at `a` in degrees, in the range [0, 360),
/// or the error of the underlying solver.
pub fn bearing(formula: Formula, a: &LatLong, b: &LatLong) -> Result<Degrees> {
    match formula {
        Formula::Haversine => sphere::initial_bearing(a, b),
        Formula::Karney => geodesic::inverse_azimuth(a, b, &WGS84_ELLIPSOID),
    }
}
