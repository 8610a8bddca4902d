/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Error type and input validation helpers.

use crate::Float;
use thiserror::Error;

/// Errors raised while building materials, stacks or boundary conditions.
///
/// Once a [`LayerStack`](crate::LayerStack) exists, it is valid; none of the
/// physical calculations can fail afterwards.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FenestrationError {
    /// A scalar input is outside its allowed closed range.
    #[error("{property} must be between {min} and {max}... found {value}")]
    OutOfRange {
        /// What was being set
        property: &'static str,
        /// The offending value
        value: Float,
        /// Lower bound
        min: Float,
        /// Upper bound
        max: Float,
    },

    /// A scalar input needs to be strictly positive.
    #[error("{property} must be positive... found {value}")]
    NotPositive {
        /// What was being set
        property: &'static str,
        /// The offending value
        value: Float,
    },

    /// Transmittance plus reflectance adds up to more than one.
    #[error("{spectrum} transmittance plus {side} reflectance cannot exceed 1... found {sum}")]
    TransmittancePlusReflectance {
        /// `"solar"` or `"visible"`
        spectrum: &'static str,
        /// `"front"` or `"back"`
        side: &'static str,
        /// The offending sum
        sum: Float,
    },

    /// The name of a gas is not one of Air, Argon, Krypton or Xenon.
    #[error("unknown gas type '{0}'... expecting Air, Argon, Krypton or Xenon")]
    UnknownGas(String),

    /// A gas mixture with too few or too many constituents.
    #[error("gas mixtures need between 2 and 4 gases... found {0}")]
    GasCount(usize),

    /// Gas types and fractions do not line up.
    #[error("gas mixture has {gases} gases but {fractions} fractions")]
    FractionCount {
        /// Number of gas types
        gases: usize,
        /// Number of fractions
        fractions: usize,
    },

    /// Gas fractions must add up to one.
    #[error("gas fractions must sum to 1... found {0}")]
    FractionSum(Float),

    /// The layers of a stack break an ordering rule.
    #[error("invalid window construction: {0}")]
    Structure(String),

    /// A stack with no layers at all.
    #[error("a window construction needs at least one layer")]
    EmptyStack,

    /// A stack with more layers than the engine accepts.
    #[error("window constructions cannot have more than {max} layers... found {0}", max = crate::MAX_LAYERS)]
    TooManyLayers(usize),

    /// A boundary condition that cannot be used for calculations.
    #[error("invalid boundary condition: {0}")]
    InvalidBoundaryCondition(String),
}

/// Checks that `value` is within `[min, max]`
pub(crate) fn in_range(
    property: &'static str,
    value: Float,
    min: Float,
    max: Float,
) -> Result<Float, FenestrationError> {
    if value.is_nan() || value < min || value > max {
        return Err(FenestrationError::OutOfRange {
            property,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Checks that `value` is strictly positive
pub(crate) fn positive(property: &'static str, value: Float) -> Result<Float, FenestrationError> {
    if value.is_nan() || value <= 0.0 {
        return Err(FenestrationError::NotPositive { property, value });
    }
    Ok(value)
}
