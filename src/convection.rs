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

//! Film coefficients: the heat transfer coefficients (convective plus
//! radiative) between the outermost and innermost surfaces of a window
//! and the surrounding air.
//!
//! The *simple* coefficients follow ISO 10292 and are used for reporting
//! R-factors that are not tied to a specific boundary condition. The
//! *detailed* ones follow ISO 15099 and are used for calculating
//! temperature profiles.

use crate::gas::AIR;
use crate::{Float, PI, SIGMA};

/// The acceleration of gravity, in $`m/s^2`$
const G: Float = 9.81;

/// The smallest film coefficient ($`W/m^2.K`$) returned by [`in_h_detailed`].
/// A non-emitting surface with no height to drive convection would
/// otherwise have an infinite film resistance.
pub const MIN_FILM_COEFFICIENT: Float = 0.1;

/// The outdoor film coefficient of ISO 10292, in $`W/m^2.K`$
pub fn out_h_simple() -> Float {
    23.
}

/// The indoor film coefficient of ISO 10292, in $`W/m^2.K`$, for an inner
/// surface with an infrared `emissivity`
///
/// ```math
/// h = 3.6 + \frac{4.4 \varepsilon}{0.84}
/// ```
pub fn in_h_simple(emissivity: Float) -> Float {
    3.6 + 4.4 * emissivity / 0.84
}

/// The radiative part of a film coefficient, linearized around `t_kelvin`
fn radiative_h(emissivity: Float, t_kelvin: Float) -> Float {
    4. * SIGMA * emissivity * t_kelvin.powi(3)
}

/// The detailed outdoor film coefficient, in $`W/m^2.K`$.
///
/// `t_kelvin` is the average between the outdoor air temperature and
/// that of the exterior surface.
///
/// ```math
/// h = 4 + 4 V + 4 \sigma \varepsilon T^3
/// ```
pub fn out_h_detailed(wind_speed: Float, t_kelvin: Float, emissivity: Float) -> Float {
    let convective = 4. + 4. * wind_speed;
    convective + radiative_h(emissivity, t_kelvin)
}

/// The Nusselt number for natural convection at the indoor face of a
/// window, as a function of its Rayleigh number and its `tilt` (in
/// degrees)
fn indoor_nusselt(rayleigh: Float, tilt: Float) -> Float {
    if tilt < 15. {
        0.13 * rayleigh.powf(1. / 3.)
    } else if tilt <= 90. {
        let sin = (tilt * PI / 180.).sin();
        let critical = 2.5e5 * ((0.72 * tilt).exp() / sin).powf(1. / 5.);
        if rayleigh < critical {
            0.56 * (rayleigh * sin).powf(1. / 4.)
        } else {
            0.56 * (critical * sin).powf(1. / 4.)
                + 0.13 * (rayleigh.powf(1. / 3.) - critical.powf(1. / 3.))
        }
    } else if tilt <= 179. {
        let sin = (tilt * PI / 180.).sin();
        0.56 * (rayleigh * sin).powf(1. / 4.)
    } else {
        0.58 * rayleigh.powf(1. / 5.)
    }
}

/// The detailed indoor film coefficient, in $`W/m^2.K`$.
///
/// `t_kelvin` is the average between the indoor air temperature and that
/// of the interior surface, and `delta_t` the difference between them.
/// The convective part is derived from the Rayleigh number of the indoor
/// air over a surface of `height` $`m`$ tilted `tilt` degrees
/// ($`0^o`$ means downward heat flow; $`180^o`$, upward).
///
/// ```math
/// Ra = \frac{\rho^2 H^3 g c_p |\Delta T|}{T \mu k}
/// ```
///
/// When `height` is zero, the Nusselt number is not normalized by it. The
/// result is never below [`MIN_FILM_COEFFICIENT`].
pub fn in_h_detailed(
    t_kelvin: Float,
    delta_t: Float,
    height: Float,
    tilt: Float,
    pressure: Float,
    emissivity: Float,
) -> Float {
    let k = AIR.thermal_conductivity(t_kelvin);
    let mu = AIR.dynamic_viscosity(t_kelvin);
    let cp = AIR.heat_capacity(t_kelvin);
    let rho = AIR.density(t_kelvin, pressure);

    let rayleigh = (rho.powi(2) * height.powi(3) * G * cp * delta_t / (t_kelvin * mu * k)).abs();
    let nusselt = indoor_nusselt(rayleigh, tilt);

    let convective = if height == 0. {
        nusselt * k
    } else {
        nusselt * k / height
    };
    (convective + radiative_h(emissivity, t_kelvin)).max(MIN_FILM_COEFFICIENT)
}

#[cfg(test)]
mod testing {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple() {
        assert_eq!(out_h_simple(), 23.);
        assert_relative_eq!(in_h_simple(0.84), 8.0);
        assert_relative_eq!(in_h_simple(0.), 3.6);
    }

    #[test]
    fn test_out_h_detailed() {
        // No emissivity means only convection
        assert_relative_eq!(out_h_detailed(6.7, 273.15, 0.), 30.8, max_relative = 1e-12);

        let h = out_h_detailed(0., 273.15, 0.84);
        let exp = 4. + 4. * 5.6697e-8 * 0.84 * (273.15 as Float).powi(3);
        assert_relative_eq!(h, exp, max_relative = 1e-9);

        // More wind, more heat transfer
        assert!(out_h_detailed(5., 273.15, 0.84) > out_h_detailed(2., 273.15, 0.84));
    }

    #[test]
    fn test_in_h_detailed() {
        let h = in_h_detailed(293.15, 15., 1., 90., 101325., 0.84);
        // Vertical, NFRC-like condition
        assert!(h > 7. && h < 9., "h = {}", h);

        // Horizontal surfaces use the Ra^(1/3) and Ra^(1/5) correlations
        let at_0 = in_h_detailed(293.15, 15., 1., 0., 101325., 0.84);
        let at_180 = in_h_detailed(293.15, 15., 1., 180., 101325., 0.84);
        assert!(at_0 > at_180);
        assert!(at_180 > radiative_h(0.84, 293.15));

        // The sign of the temperature difference does not matter
        let neg = in_h_detailed(293.15, -15., 1., 90., 101325., 0.84);
        assert_relative_eq!(h, neg);

        // Low-e surfaces exchange less radiation
        let low_e = in_h_detailed(293.15, 15., 1., 90., 101325., 0.05);
        assert!(low_e < h);
    }

    #[test]
    fn test_zero_height() {
        let h = in_h_detailed(293.15, 15., 0., 0., 101325., 0.84);
        assert!(h.is_finite());
        // No Rayleigh number, no convection
        assert_relative_eq!(h, radiative_h(0.84, 293.15), max_relative = 1e-12);

        // ... and no radiation either
        let h = in_h_detailed(293.15, 15., 0., 90., 101325., 0.);
        assert_eq!(h, MIN_FILM_COEFFICIENT);
        assert!((1. / h).is_finite());
    }

    #[test]
    fn test_indoor_nusselt_bands() {
        let ra = 1e8;
        // Continuous across the critical Rayleigh number
        let tilt = 60.;
        let sin = (tilt * PI / 180.).sin();
        let critical = 2.5e5 * ((0.72 * tilt).exp() / sin).powf(1. / 5.);
        let below = indoor_nusselt(critical * (1. - 1e-9), tilt);
        let above = indoor_nusselt(critical * (1. + 1e-9), tilt);
        assert_relative_eq!(below, above, max_relative = 1e-6);

        assert_relative_eq!(indoor_nusselt(ra, 10.), 0.13 * ra.powf(1. / 3.));
        assert_relative_eq!(indoor_nusselt(ra, 180.), 0.58 * ra.powf(1. / 5.));
        let sin = (120. * PI / 180.).sin();
        assert_relative_eq!(indoor_nusselt(ra, 120.), 0.56 * (ra * sin).powf(0.25));
    }
}
