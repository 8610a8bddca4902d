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

//! Steady-state temperature profile across a window.
//!
//! The resistance of a gas gap depends on the temperatures of the
//! panes around it, and those temperatures depend on the resistances.
//! The profile is therefore found iteratively: temperatures are derived
//! from the current resistances, gap resistances are recalculated from
//! those temperatures, and so on until the total resistance settles.

use crate::cavity::CavityState;
use crate::construction::{Layer, LayerStack};
use crate::convection::{in_h_detailed, in_h_simple, out_h_detailed};
use crate::environment::BoundaryCondition;
use crate::{in_kelvin, Float};

/// Convergence tolerance on the total resistance, in $`m^2.K/W`$
const TOLERANCE: Float = 0.001;

/// Iterations after which the solver gives up converging
const MAX_ITERATIONS: usize = 100;

/// The temperature at each layer boundary of a window, and the
/// resistance of each layer, for a certain [`BoundaryCondition`]
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureProfile {
    /// Outdoor air, each boundary between layers, and indoor air (in $`C`$)
    temperatures: Vec<Float>,

    /// Outdoor film, each layer, and indoor film (in $`m^2.K/W`$)
    resistances: Vec<Float>,

    /// The heat generated within each layer ($`W/m^2`$)
    heat_generation: Vec<Float>,

    /// The number of iterations it took to converge
    iterations: usize,
}

impl TemperatureProfile {
    /// Temperatures of the outdoor air, each boundary between layers, and the
    /// indoor air, in $`C`$
    pub fn temperatures(&self) -> &[Float] {
        &self.temperatures
    }

    /// Resistances of the outdoor film, each layer, and the indoor film, in $`m^2.K/W`$
    pub fn resistances(&self) -> &[Float] {
        &self.resistances
    }

    /// The heat generated within each layer, in $`W/m^2`$
    pub fn heat_generation(&self) -> &[Float] {
        &self.heat_generation
    }

    /// The number of iterations performed. Zero for windows without gaps.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The temperature of the face looking outside, in $`C`$
    pub fn outside_surface_temperature(&self) -> Float {
        self.temperatures[1]
    }

    /// The temperature of the face looking inside, in $`C`$
    pub fn inside_surface_temperature(&self) -> Float {
        self.temperatures[self.temperatures.len() - 2]
    }

    /// The total resistance, including films, in $`m^2.K/W`$
    pub fn r_factor(&self) -> Float {
        self.resistances.iter().sum()
    }

    /// The total conductance, including films, in $`W/m^2.K`$
    pub fn u_factor(&self) -> Float {
        1. / self.r_factor()
    }

    /// The resistance of the layers, excluding films, in $`m^2.K/W`$
    pub fn r_value(&self) -> Float {
        let n = self.resistances.len();
        self.resistances[1..n - 1].iter().sum()
    }

    /// The fraction of the heat generated within a layer that flows
    /// to the inside.
    ///
    /// Heat is generated in the middle of the layer, so this fraction is the
    /// resistance between the outdoor air and that point over the total.
    pub fn inward_flowing_fraction(&self, layer: usize) -> Float {
        inward_fraction(&self.resistances, layer)
    }
}

/// The resistance between the outdoor air and the middle of `layer`
fn source_position(resistances: &[Float], layer: usize) -> Float {
    let before: Float = resistances[..=layer].iter().sum();
    before + resistances[layer + 1] / 2.
}

fn inward_fraction(resistances: &[Float], layer: usize) -> Float {
    let total: Float = resistances.iter().sum();
    source_position(resistances, layer) / total
}

/// Distributes the temperature difference between outdoor and indoor air
/// proportionally to the resistances, and adds the rise produced by the
/// heat generated within each layer.
///
/// A source $`q`$ at resistance $`x_s`$ from the outdoor air raises the
/// temperature at a boundary located at $`x`$ by
///
/// ```math
/// \Delta T = \begin{cases}
///   q \frac{x (R - x_s)}{R} & x \leq x_s \\
///   q \frac{x_s (R - x)}{R} & x > x_s
/// \end{cases}
/// ```
fn temperatures_from_resistances(
    resistances: &[Float],
    t_out: Float,
    t_in: Float,
    heat_generation: &[Float],
) -> Vec<Float> {
    let total: Float = resistances.iter().sum();
    let delta_t = t_in - t_out;

    let mut x = 0.0;
    let mut positions = Vec::with_capacity(resistances.len() + 1);
    positions.push(x);
    for r in resistances {
        x += r;
        positions.push(x);
    }

    let mut temperatures: Vec<Float> = positions
        .iter()
        .map(|x| t_out + delta_t * x / total)
        .collect();

    for (layer, q) in heat_generation.iter().enumerate() {
        if *q == 0.0 {
            continue;
        }
        let xs = source_position(resistances, layer);
        for (t, x) in temperatures.iter_mut().zip(positions.iter()) {
            *t += if *x <= xs {
                q * x * (total - xs) / total
            } else {
                q * xs * (total - x) / total
            };
        }
    }

    // Air temperatures are boundary conditions
    if let Some(first) = temperatures.first_mut() {
        *first = t_out;
    }
    if let Some(last) = temperatures.last_mut() {
        *last = t_in;
    }
    temperatures
}

/// The outdoor and indoor film resistances ($`m^2.K/W`$) of an element
/// without gaps whose own resistance is `r_element`, under `bc`.
///
/// The indoor film uses a half-delta correction: it is evaluated around the
/// mean between the indoor air and the surface temperature estimated with
/// the simple indoor coefficient.
pub(crate) fn gap_free_films(
    bc: &BoundaryCondition,
    r_element: Float,
    e_out: Float,
    e_in: Float,
) -> (Float, Float) {
    let t_out = bc.outdoor_temperature;
    let t_in = bc.indoor_temperature;
    let r_out = 1. / out_h_detailed(bc.wind_speed, in_kelvin(t_out), e_out);
    let r_in = 1. / in_h_simple(e_in);

    let drop = r_in / (r_out + r_element + r_in) * (t_in - t_out);
    let h = in_h_detailed(
        in_kelvin(t_in - drop / 2.),
        drop,
        bc.height,
        bc.effective_tilt(),
        bc.pressure,
        e_in,
    );
    (r_out, 1. / h)
}

/// Calculates the [`TemperatureProfile`] of `stack` under `bc`, with
/// `heat_generation` $`W/m^2`$ generated within each layer (an empty
/// slice means no generation).
///
/// Windows without gaps are solved directly; the rest iterate until the
/// total resistance changes less than $`0.001 m^2.K/W`$.
pub(crate) fn solve(
    stack: &LayerStack,
    bc: &BoundaryCondition,
    heat_generation: &[Float],
) -> TemperatureProfile {
    let layers = stack.layers();
    let mut heat_generation = heat_generation.to_vec();
    heat_generation.resize(layers.len(), 0.0);

    let t_out = bc.outdoor_temperature;
    let t_in = bc.indoor_temperature;
    let tilt = bc.effective_tilt();
    let e_out = stack.outside_emissivity();
    let e_in = stack.inside_emissivity();

    let gap_count = stack.gap_count();
    if gap_count == 0 {
        let r_layers: Vec<Float> = layers.iter().filter_map(|l| l.fixed_r_value()).collect();
        let (r_out, r_in) = gap_free_films(bc, r_layers.iter().sum(), e_out, e_in);
        let mut resistances = Vec::with_capacity(r_layers.len() + 2);
        resistances.push(r_out);
        resistances.extend(r_layers);
        resistances.push(r_in);

        let temperatures = temperatures_from_resistances(&resistances, t_out, t_in, &heat_generation);
        return TemperatureProfile {
            temperatures,
            resistances,
            heat_generation,
            iterations: 0,
        };
    }

    // Initial guess
    let guess = ((t_in - t_out).abs() / 2.).max(1.);
    let avg = in_kelvin((t_in + t_out) / 2.);
    let initial_state = CavityState {
        delta_t: guess / gap_count as Float,
        mean_temperature: avg,
        pressure: bc.pressure,
        height: bc.height,
        angle: 90.,
    };

    let mut resistances = Vec::with_capacity(layers.len() + 2);
    resistances.push(1. / out_h_detailed(bc.wind_speed, avg - guess, e_out));
    for (i, layer) in layers.iter().enumerate() {
        let r = match layer {
            Layer::Gap(gap) => {
                let (e1, e2) = stack.gap_emissivities(i);
                1. / gap.u_value(&initial_state, e1, e2)
            }
            _ => layer.fixed_r_value().unwrap_or(0.),
        };
        resistances.push(r);
    }
    resistances.push(1. / in_h_simple(e_in));

    let mut r_last = 0.0;
    let mut r_next: Float = resistances.iter().sum();
    let mut iterations = 0;
    while (r_next - r_last).abs() > TOLERANCE {
        if iterations == MAX_ITERATIONS {
            log::warn!(
                "temperature profile of '{}' did not converge after {} iterations (last change in R was {})",
                stack.identifier,
                MAX_ITERATIONS,
                (r_next - r_last).abs()
            );
            break;
        }
        iterations += 1;
        r_last = r_next;

        let temperatures = temperatures_from_resistances(&resistances, t_out, t_in, &heat_generation);

        for (i, layer) in layers.iter().enumerate() {
            if let Layer::Gap(gap) = layer {
                let (t_a, t_b) = (temperatures[i + 1], temperatures[i + 2]);
                let state = CavityState {
                    delta_t: (t_a - t_b).abs(),
                    mean_temperature: in_kelvin((t_a + t_b) / 2.),
                    pressure: bc.pressure,
                    height: bc.height,
                    angle: tilt,
                };
                let (e1, e2) = stack.gap_emissivities(i);
                resistances[i + 1] = 1. / gap.u_value_at_angle(&state, e1, e2);
            }
        }

        let n = temperatures.len();
        let (t_surface, t_air) = (temperatures[n - 2], temperatures[n - 1]);
        let h = in_h_detailed(
            in_kelvin((t_surface + t_air) / 2.),
            (t_air - t_surface).abs(),
            bc.height,
            tilt,
            bc.pressure,
            e_in,
        );
        if let Some(last) = resistances.last_mut() {
            *last = 1. / h;
        }

        r_next = resistances.iter().sum();
        log::debug!(
            "'{}': iteration {} gives R = {}",
            stack.identifier,
            iterations,
            r_next
        );
    }

    let temperatures = temperatures_from_resistances(&resistances, t_out, t_in, &heat_generation);
    TemperatureProfile {
        temperatures,
        resistances,
        heat_generation,
        iterations,
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::convection::MIN_FILM_COEFFICIENT;
    use crate::glazing::{Glazing, SpectralProperties};
    use approx::assert_relative_eq;

    fn single_pane(emissivity_back: Float) -> LayerStack {
        let glass = Glazing::new(
            "Generic 3mm",
            0.003,
            0.9,
            SpectralProperties::new(0.85, 0.075),
            SpectralProperties::new(0.9, 0.075),
            0.84,
            emissivity_back,
        )
        .unwrap();
        LayerStack::new("Single", vec![glass.into()]).unwrap()
    }

    #[test]
    fn test_linear_profile() {
        let r = [0.1, 0.2, 0.1];
        let t = temperatures_from_resistances(&r, 0., 40., &[]);
        assert_eq!(t.len(), 4);
        assert_eq!(t[0], 0.);
        assert_relative_eq!(t[1], 10.);
        assert_relative_eq!(t[2], 30.);
        assert_eq!(t[3], 40.);
    }

    #[test]
    fn test_heat_source() {
        // Same air temperature on both sides, source right in the middle
        let r = [0.1, 0.2, 0.1];
        let t = temperatures_from_resistances(&r, 20., 20., &[10.]);
        // Half of the heat flows each way
        assert_relative_eq!(inward_fraction(&r, 0), 0.5);
        assert_relative_eq!(t[1], 20. + 10. * 0.1 * 0.2 / 0.4);
        assert_relative_eq!(t[2], t[1]);
        assert_eq!(t[0], 20.);
        assert_eq!(t[3], 20.);

        // Source closer to the outside
        let r = [0.05, 0.01, 0.3];
        assert_relative_eq!(inward_fraction(&r, 0), 0.055 / 0.36);
    }

    #[test]
    fn test_half_delta() {
        let w = single_pane(0.84);
        let bc = BoundaryCondition::default();
        let profile = solve(&w, &bc, &[]);

        let r_out = 1. / out_h_detailed(6.7, in_kelvin(-18.), 0.84);
        let r_glass = 0.003 / 0.9;
        let drop = (1. / 8.) / (r_out + r_glass + 1. / 8.) * (21. + 18.);
        let h_in = in_h_detailed(in_kelvin(21. - drop / 2.), drop, 1., 90., 101325., 0.84);

        let r = profile.resistances();
        assert_eq!(r.len(), 3);
        assert_relative_eq!(r[0], r_out, max_relative = 1e-12);
        assert_relative_eq!(r[1], r_glass, max_relative = 1e-12);
        assert_relative_eq!(r[2], 1. / h_in, max_relative = 1e-12);
        // The correction matters
        assert!((r[2] - 1. / 8.).abs() > 1e-3);
    }

    #[test]
    fn test_no_indoor_film_exchange() {
        // Nothing drives convection or radiation at the inner face
        let w = single_pane(0.);
        let bc = BoundaryCondition {
            height: 0.,
            ..BoundaryCondition::nfrc_summer()
        };
        let absorbed = w.absorbed_solar(bc.solar_irradiance);
        let profile = solve(&w, &bc, &absorbed);

        let r = profile.resistances();
        assert_relative_eq!(r[2], 1. / MIN_FILM_COEFFICIENT);
        assert!(profile.r_factor().is_finite());
        assert!(profile.temperatures().iter().all(|t| t.is_finite()));
        assert_eq!(profile.temperatures()[0], bc.outdoor_temperature);
        assert_eq!(profile.temperatures()[3], bc.indoor_temperature);
        // The pane heats up above the outdoor air
        assert!(profile.outside_surface_temperature() > bc.outdoor_temperature);
    }
}
