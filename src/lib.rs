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

//! Steady-state thermal and optical performance of multi-layer windows.
//!
//! Given a stack of glazing panes and gas gaps (outside to inside), this
//! crate calculates U-factors and R-factors (ISO 15099 / EN 673 film and
//! cavity correlations), the temperature at every layer boundary, the
//! solar and visible transmittance, reflectance and per-pane absorptance
//! (ISO 9050), and the Solar Heat Gain Coefficient under NFRC conditions.
//!
//! All calculations are pure functions of a validated [`LayerStack`] and
//! a [`BoundaryCondition`].

#![deny(missing_docs)]

pub mod cavity;
pub mod construction;
pub mod convection;
pub mod environment;
pub mod error;
pub mod frame;
pub mod gas;
pub mod glazing;
pub mod optics;
pub mod performance;
pub mod shgc;
pub mod solver;

pub use crate::cavity::{CavityState, GasGap};
pub use crate::construction::{Layer, LayerStack, MAX_LAYERS};
pub use crate::environment::BoundaryCondition;
pub use crate::error::FenestrationError;
pub use crate::frame::{Frame, WindowGeometry};
pub use crate::gas::{CustomGas, Gas, GasFill, GasKind, GasProperties};
pub use crate::glazing::{Glazing, SimpleGlazing, SpectralProperties};
pub use crate::optics::{OpticalResult, Spectrum};
pub use crate::performance::{rate_all, WindowPerformance};
pub use crate::solver::TemperatureProfile;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// The number $`\pi`$, in whatever precision [`Float`] has.
#[cfg(feature = "float")]
pub const PI: Float = std::f32::consts::PI;

/// The number $`\pi`$, in whatever precision [`Float`] has.
#[cfg(not(feature = "float"))]
pub const PI: Float = std::f64::consts::PI;

/// The Stefan-Boltzmann constant ($`W/m^2.K^4`$), with the precision
/// used by the ISO 15099 film and cavity correlations
pub const SIGMA: Float = 5.6697e-8;

/// Transforms C into K
pub fn in_kelvin(t: Float) -> Float {
    t + 273.15
}
