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

//! The error module defines the outcomes of a calculation other than a
//! numeric result.
//!
//! Each solver reports the failure it observed through a dedicated variant
//! instead of overloading the numeric return channel, so callers can always
//! distinguish an out-of-range input from a geometrically undefined request
//! or an iteration that did not converge.

/// `Result` alias for calculations that can fail with an [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// The ways a geodesic calculation can fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A latitude is outside [-90, 90] or a longitude outside [-180, 180].
    #[error("Value out of range")]
    CoordinateOutOfRange,

    /// A bearing is outside the range [0, 360].
    #[error("Value out of range")]
    BearingOutOfRange,

    /// No unique initial bearing exists: the positions are coincident,
    /// antipodal, share a pole, or the azimuth iteration failed.
    #[error("The bearing is undefined between these positions")]
    BearingUndefined,

    /// The ellipsoidal distance iteration exhausted its iteration limit,
    /// which happens between nearly antipodal positions.
    #[error("The formula did not converge")]
    NonConvergent,

    /// A sampling distance limit is negative.
    #[error("Distance limits cannot be negative")]
    InvalidSamplingArguments,
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_error_messages() {
        assert_eq!("Value out of range", Error::CoordinateOutOfRange.to_string());
        assert_eq!("Value out of range", Error::BearingOutOfRange.to_string());
        assert_eq!(
            "The bearing is undefined between these positions",
            Error::BearingUndefined.to_string()
        );
        assert_eq!(
            "The formula did not converge",
            Error::NonConvergent.to_string()
        );
        assert_eq!(
            "Distance limits cannot be negative",
            Error::InvalidSamplingArguments.to_string()
        );
    }

    #[test]
    fn test_error_distinctions() {
        // the range, undefined and convergence outcomes must stay distinct
        assert_ne!(Error::CoordinateOutOfRange, Error::BearingUndefined);
        assert_ne!(Error::BearingUndefined, Error::NonConvergent);
        assert_ne!(Error::CoordinateOutOfRange, Error::NonConvergent);
    }
}
