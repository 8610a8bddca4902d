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

//! Gas-filled cavities between panes and their heat transfer.

use crate::error::{positive, FenestrationError};
use crate::gas::GasFill;
use crate::{Float, PI, SIGMA};

/// The acceleration of gravity, in $`m/s^2`$
const G: Float = 9.81;

/// The thermal state of a cavity for which its heat transfer
/// coefficients are calculated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CavityState {
    /// The temperature difference across the cavity, in $`K`$. Only
    /// its magnitude matters.
    pub delta_t: Float,

    /// The mean temperature of the gas, in $`K`$
    pub mean_temperature: Float,

    /// The gas pressure, in $`Pa`$
    pub pressure: Float,

    /// Height of the cavity. Defined by ISO15099/2003 as "the distance between the top and bottom of the fill
    /// gas cavity which is usually the same as the height of the window view area."
    pub height: Float,

    /// The tilt of the cavity in degrees. $`0^o`$ is horizontal with downward heat flow;
    /// $`90^o`$ is vertical; $`180^o`$ is horizontal with upward heat flow.
    pub angle: Float,
}

impl std::default::Default for CavityState {
    fn default() -> Self {
        Self {
            delta_t: 15.,
            mean_temperature: 273.15,
            pressure: 101325.,
            height: 1.,
            angle: 90.,
        }
    }
}

/// Represents some gas enclosed by two glazing layers
#[derive(Debug, Clone, PartialEq)]
pub struct GasGap {
    /// The name of the gap
    pub identifier: String,

    /// The distance between the two panes, in $`m`$
    thickness: Float,

    /// The gas contained
    pub fill: GasFill,
}

impl GasGap {
    /// Creates a new gap of a certain `thickness` (in $`m`$), which needs to be positive
    pub fn new<S: Into<String>>(
        identifier: S,
        thickness: Float,
        fill: GasFill,
    ) -> Result<Self, FenestrationError> {
        Ok(Self {
            identifier: identifier.into(),
            thickness: positive("gas gap thickness", thickness)?,
            fill,
        })
    }

    /// The distance between the two panes, in $`m`$
    pub fn thickness(&self) -> Float {
        self.thickness
    }

    /// Calculates the Grashof number of the cavity
    pub fn grashof(&self, state: &CavityState) -> Float {
        let t = state.mean_temperature;
        let rho = self.fill.density(t, state.pressure);
        let mu = self.fill.viscosity(t);
        G * self.thickness.powi(3) * state.delta_t.abs() * rho.powi(2) / (t * mu.powi(2))
    }

    /// Calculates the Raleigh number of the cavity
    ///
    /// Source: Equation 40 of ISO15099/2003
    pub fn rayleigh(&self, state: &CavityState) -> Float {
        if state.delta_t.abs() < 1e-10 {
            return 0.0000001;
        }

        let temp = state.mean_temperature;
        // Eq. 41 of iso15099/2003
        let beta = 1. / temp;

        let c_p = self.fill.specific_heat(temp);
        let mu = self.fill.viscosity(temp);
        let lambda = self.fill.conductivity(temp);
        let rho = self.fill.density(temp, state.pressure);

        // Eq. 40 of iso15099/2003
        rho.powi(2) * self.thickness.powi(3) * G * beta * c_p * state.delta_t.abs() / (mu * lambda)
    }

    /// The Nusselt number of the cavity when vertical
    pub fn nusselt(&self, state: &CavityState) -> Float {
        nu_90(self.rayleigh(state), self.thickness, state.height)
    }

    /// The Nusselt number of the cavity at `state.angle`. It
    /// is the same as [`GasGap::nusselt`] for vertical cavities.
    ///
    /// This categorization, as a function of $`\gamma`$, is based on the assumption that
    /// the cavity is heated from the internal side. When the reverse is true, the
    /// complement of the tilt angle, $`180^o - \gamma`$, needs to be passed.
    pub fn nusselt_at_angle(&self, state: &CavityState) -> Float {
        let ra = self.rayleigh(state);
        let gamma = state.angle;
        let (d, h) = (self.thickness, state.height);
        if gamma < 60. {
            nu_0_60(ra, gamma)
        } else if gamma < 90. {
            nu_60_90(ra, gamma, d, h)
        } else if gamma == 90. {
            nu_90(ra, d, h)
        } else {
            nu_90_180(ra, gamma, d, h)
        }
    }

    /// Calculates the convective heat transfer coefficient ($`W/m^2.K`$)
    /// of the cavity when vertical
    ///
    /// Equation 39 of ISO15099/2003
    pub fn convective_conductance(&self, state: &CavityState) -> Float {
        let lambda = self.fill.conductivity(state.mean_temperature);
        self.nusselt(state) * lambda / self.thickness
    }

    /// Calculates the convective heat transfer coefficient ($`W/m^2.K`$)
    /// of the cavity at `state.angle`
    pub fn convective_conductance_at_angle(&self, state: &CavityState) -> Float {
        let lambda = self.fill.conductivity(state.mean_temperature);
        self.nusselt_at_angle(state) * lambda / self.thickness
    }

    /// The radiative heat transfer coefficient ($`W/m^2.K`$) between the two
    /// panes, with emissivities `e1` and `e2`, around a mean temperature `t_kelvin`
    ///
    /// ```math
    /// h_r = \frac{4 \sigma {T_m}^3 }{1/\epsilon_1 + 1/\epsilon_2 - 1}
    /// ```
    pub fn radiative_conductance(&self, e1: Float, e2: Float, t_kelvin: Float) -> Float {
        4. * SIGMA * t_kelvin.powi(3) / (1. / e1 + 1. / e2 - 1.)
    }

    /// Calculates the `U-value` (convective plus radiative heat transfer) of a
    /// vertical cavity, so that $`U_{cavity}\times \Delta T = q`$
    pub fn u_value(&self, state: &CavityState, e1: Float, e2: Float) -> Float {
        self.convective_conductance(state)
            + self.radiative_conductance(e1, e2, state.mean_temperature)
    }

    /// Calculates the `U-value` of the cavity at `state.angle`
    pub fn u_value_at_angle(&self, state: &CavityState, e1: Float, e2: Float) -> Float {
        self.convective_conductance_at_angle(state)
            + self.radiative_conductance(e1, e2, state.mean_temperature)
    }
}

/// `(x + |x|)/2`, Equation 44 of ISO15099/2003
fn dot(x: Float) -> Float {
    (x + x.abs()) / 2.
}

/// Calculates the Nusselt number for cavities tilted between
/// $`0^o`$ and $`60^o`$
///
/// From Equation 43 and 44 of ISO15099/2003 (based on ref. 7 of that standard)
fn nu_0_60(ra: Float, gamma: Float) -> Float {
    let gamma = gamma * PI / 180.;
    let ra_cos = ra * gamma.cos();

    let a = dot(1. - 1708. / ra_cos);
    let b = 1. - 1708. * ((1.8 * gamma).sin()).powf(1.6) / ra_cos;
    let c = (ra_cos / 5830.).powf(1. / 3.) - 1.;

    // eq. 43
    1. + 1.44 * a * b + dot(c)
}

/// Calculates the Nusselt number for cavities tilted $`60^o`$
///
/// From Equations 45-48 of ISO15099/2003  (based on ref. 8 of that standard)
fn nu_60(ra: Float, thickness: Float, height: Float) -> Float {
    // Eq. 48
    let g = 0.5 / (1. + (ra / 3160.).powf(20.6)).powf(0.1);
    // Eq. 46
    let nu1 = (1. + (0.0936 * ra.powf(0.314) / (1. + g)).powi(7)).powf(1. / 7.);
    if height <= 0. {
        return nu1;
    }
    // Eq. 47
    let a_gi = height / thickness;
    let nu2 = (0.104 + 0.175 / a_gi) * ra.powf(0.283);

    // Eq. 45
    nu1.max(nu2)
}

/// Calculates the Nusselt number for cavities tilted between $`60^o`$
/// and $`90^o`$, interpolating linearly as section 5.3.3.4 of ISO15099/2003
fn nu_60_90(ra: Float, gamma: Float, thickness: Float, height: Float) -> Float {
    let nu60 = nu_60(ra, thickness, height);
    let nu90 = nu_90(ra, thickness, height);
    let x = (gamma - 60.) / 30.;
    nu60 + (nu90 - nu60) * x
}

/// Calculates the Nusselt number for cavities tilted $`90^o`$
///
/// From Equations 49-53 of ISO15099/2003  (based on ref. 8 of that standard)
fn nu_90(ra: Float, thickness: Float, height: Float) -> Float {
    let nu1 = if ra > 5e4 {
        // Eq. 50
        0.0673838 * ra.powf(1. / 3.)
    } else if ra > 1e4 {
        // Eq. 51
        0.028154 * ra.powf(0.4134)
    } else {
        // Eq. 52
        1. + 1.7596678 * 1e-10 * ra.powf(2.2984755)
    };
    if height <= 0. {
        return nu1;
    }
    // Eq. 53
    let nu2 = 0.242 * (ra * thickness / height).powf(0.272);

    // Eq. 49
    nu1.max(nu2)
}

/// Calculates the Nusselt number for cavities tilted between $`90^o`$ and $`180^o`$
///
/// From Equation 54 of ISO15099/2003  (based on ref. 10 of that standard)
fn nu_90_180(ra: Float, gamma: Float, thickness: Float, height: Float) -> Float {
    let nu_v = nu_90(ra, thickness, height);
    1. + (nu_v - 1.) * (gamma * PI / 180.).sin()
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::gas::GasKind;
    use approx::assert_relative_eq;

    fn air_gap(thickness: Float) -> GasGap {
        GasGap::new("Air Gap", thickness, GasFill::Pure(GasKind::Air)).unwrap()
    }

    #[test]
    fn test_new() {
        assert!(GasGap::new("gap", 0., GasFill::default()).is_err());
        assert!(GasGap::new("gap", -0.01, GasFill::default()).is_err());
        let gap = air_gap(0.0127);
        assert_eq!(gap.thickness(), 0.0127);
        assert_eq!(gap.identifier, "Air Gap");
    }

    #[test]
    fn test_nusselt() {
        // Reference values from ISO15099/2003 correlations
        let ra = 1e3;
        let exp = 1. + 1.7596678 * 1e-10 * (ra as Float).powf(2.2984755);
        assert_relative_eq!(nu_90(ra, 0.01, 0.), exp);

        let ra = 2e4;
        assert_relative_eq!(nu_90(ra, 0.01, 0.), 0.028154 * (ra as Float).powf(0.4134));

        let ra = 1e5;
        assert_relative_eq!(nu_90(ra, 0.01, 0.), 0.0673838 * (ra as Float).powf(1. / 3.));

        // Very tall cavities are dominated by the first term; short
        // and wide ones by the aspect ratio term.
        let ra = 1e3;
        assert!(nu_90(ra, 0.01, 1.) < nu_90(ra, 0.01, 0.02) + 1e-9);
        assert_relative_eq!(nu_90(ra, 0.1, 0.1), 0.242 * (ra as Float).powf(0.272));
    }

    #[test]
    fn test_nusselt_bands() {
        let (d, h) = (0.0127, 1.);
        let ra = 5000.;

        // Continuous at 60 and 90 degrees
        assert_relative_eq!(nu_60_90(ra, 60., d, h), nu_60(ra, d, h));
        assert_relative_eq!(nu_60_90(ra, 90. - 1e-9, d, h), nu_90(ra, d, h), max_relative = 1e-6);
        assert_relative_eq!(nu_90_180(ra, 90., d, h), nu_90(ra, d, h));

        // Horizontal, upward heat flow... only conduction
        assert_relative_eq!(nu_90_180(ra, 180., d, h), 1., epsilon = 1e-9);

        // Horizontal, downward heat flow and below the critical Rayleigh
        // number... only conduction
        assert_relative_eq!(nu_0_60(1000., 0.), 1.);
        // Above it, some convection
        assert!(nu_0_60(1e4, 0.) > 1.);
    }

    #[test]
    fn test_rayleigh() {
        let gap = air_gap(0.0127);
        let state = CavityState::default();
        let ra = gap.rayleigh(&state);

        let t = state.mean_temperature;
        let fill = &gap.fill;
        let rho = fill.density(t, state.pressure);
        let exp = rho * rho * (0.0127 as Float).powi(3) * 9.81 * fill.specific_heat(t) * 15.
            / (t * fill.viscosity(t) * fill.conductivity(t));
        assert_relative_eq!(ra, exp, max_relative = 1e-9);

        // Sign does not matter
        let neg = CavityState {
            delta_t: -15.,
            ..state
        };
        assert_relative_eq!(gap.rayleigh(&neg), ra);

        // Isothermal
        let iso = CavityState {
            delta_t: 0.,
            ..state
        };
        assert!(gap.rayleigh(&iso) > 0.);
        assert!(gap.u_value(&iso, 0.84, 0.84).is_finite());

        // Ra = Gr Pr
        let gr = gap.grashof(&state);
        assert_relative_eq!(ra, gr * fill.prandtl(t), max_relative = 1e-9);
    }

    #[test]
    fn test_u_value() {
        let gap_thickness = 0.0127;
        let gap = air_gap(gap_thickness);

        let t_out: Float = 259.116115;
        let t_in: Float = 279.323983;
        let state = CavityState {
            delta_t: t_in - t_out,
            mean_temperature: (t_in + t_out) / 2.,
            ..CavityState::default()
        };
        let u = gap.u_value(&state, 0.84, 0.84);
        let exp_u = 0.069446 / gap_thickness;
        assert_relative_eq!(u, exp_u, max_relative = 0.05);

        // At 90 degrees both are the same
        assert_relative_eq!(u, gap.u_value_at_angle(&state, 0.84, 0.84));

        // Low-e coatings
        assert!(gap.u_value(&state, 0.84, 0.04) < u / 2.);
    }

    #[test]
    fn test_radiative_conductance() {
        let gap = air_gap(0.0127);
        let h = gap.radiative_conductance(1., 1., 300.);
        assert_relative_eq!(h, 4. * 5.6697e-8 * 300. * 300. * 300., max_relative = 1e-12);

        let h = gap.radiative_conductance(0.84, 0.84, 273.15);
        let exp = 4. * 5.6697e-8 * (273.15 as Float).powi(3) * 0.84 * 0.84 / (1. - 0.16 * 0.16);
        assert_relative_eq!(h, exp, max_relative = 1e-9);
    }

    #[test]
    fn test_heavier_gases_insulate_better() {
        let state = CavityState::default();
        let air = air_gap(0.0127);
        let argon = GasGap::new("Argon Gap", 0.0127, GasFill::Pure(GasKind::Argon)).unwrap();
        let krypton = GasGap::new("Krypton Gap", 0.0127, GasFill::Pure(GasKind::Krypton)).unwrap();

        let u_air = air.u_value(&state, 0.84, 0.84);
        let u_argon = argon.u_value(&state, 0.84, 0.84);
        let u_krypton = krypton.u_value(&state, 0.84, 0.84);
        assert!(u_air > u_argon);
        assert!(u_argon > u_krypton);
    }

    #[test]
    fn test_tilted() {
        let gap = air_gap(0.0127);
        let state = CavityState {
            delta_t: 30.,
            angle: 0.,
            ..CavityState::default()
        };
        let horizontal_down = gap.u_value_at_angle(&state, 0.84, 0.84);
        let up = CavityState {
            angle: 180.,
            ..state
        };
        let horizontal_up = gap.u_value_at_angle(&up, 0.84, 0.84);
        let vertical = gap.u_value(&state, 0.84, 0.84);

        // Heated from below convects the most
        assert!(horizontal_down >= vertical);
        assert!(vertical >= horizontal_up);
    }
}
