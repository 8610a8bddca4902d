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

//! Solar Heat Gain Coefficient under the NFRC 200 summer condition.
//!
//! The SHGC is the fraction of the incident solar radiation that ends up
//! inside, either transmitted or absorbed and then conducted inward:
//!
//! ```math
//! SHGC = \tau + \sum_i \alpha_i N_i
//! ```
//!
//! where $`N_i`$ is the inward-flowing fraction of the heat absorbed by
//! pane $`i`$.

use crate::construction::LayerStack;
use crate::environment::BoundaryCondition;
use crate::frame::Frame;
use crate::solver;
use crate::Float;

/// The SHGC of the glass alone
pub fn center_of_glass_shgc(stack: &LayerStack) -> Float {
    if let Some(simple) = stack.simple_glazing() {
        return simple.shgc();
    }

    let bc = BoundaryCondition::nfrc_summer();
    let optics = stack.solar_optics();
    let absorbed = stack.absorbed_solar(bc.solar_irradiance);
    let profile = solver::solve(stack, &bc, &absorbed);

    let conducted: Float = absorbed
        .iter()
        .enumerate()
        .map(|(layer, q)| q * profile.inward_flowing_fraction(layer))
        .sum();

    optics.transmittance + conducted / bc.solar_irradiance
}

/// The SHGC of an opaque frame: the part of its absorbed
/// radiation that flows inward.
///
/// The frame is solved as a window without gaps under the same condition
/// as the glass, with the absorbed heat at its mid-plane.
pub fn frame_shgc(frame: &Frame) -> Float {
    let bc = BoundaryCondition::nfrc_summer();
    let e = frame.thermal_absorptance();
    let r_frame = frame.r_value();
    let (r_out, r_in) = solver::gap_free_films(&bc, r_frame, e, e);
    let total = r_out + r_frame + r_in;
    frame.solar_absorptance() * (r_out + r_frame / 2.) / total
}

/// The SHGC of the whole window. If there is a frame, its SHGC is weighted
/// against that of the glass by their areas.
pub fn shgc(stack: &LayerStack) -> Float {
    let glass = center_of_glass_shgc(stack);
    match stack.frame() {
        Some(frame) => frame.area_weighted(glass, frame_shgc(frame), stack.geometry()),
        None => glass,
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::frame::WindowGeometry;
    use crate::convection::{in_h_detailed, in_h_simple, out_h_detailed};
    use crate::glazing::{Glazing, SimpleGlazing};
    use crate::in_kelvin;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_pane() {
        let w = LayerStack::new("Single", vec![Glazing::default().into()]).unwrap();
        let s = center_of_glass_shgc(&w);
        let optics = w.solar_optics();
        // More than what is transmitted, less than transmitted + absorbed
        assert!(s > optics.transmittance);
        assert!(s < optics.transmittance + optics.absorptance());
        assert!(s > 0.85 && s < 0.9, "shgc = {}", s);
    }

    #[test]
    fn test_single_pane_closed_form() {
        let w = LayerStack::new("Single", vec![Glazing::default().into()]).unwrap();

        // Generic 3mm clear: tau = 0.85, alpha = 1 - 0.85 - 0.075
        let (tau, alpha) = (0.85, 0.075);
        let irradiance = 783.;
        let (t_out, t_in) = (32., 24.);
        let r_out = 1. / out_h_detailed(2.75, in_kelvin(t_out), 0.84);
        let r_glass = 0.003 / 0.9;
        let r_in_simple = 1. / 8.;
        let drop = r_in_simple / (r_out + r_glass + r_in_simple) * (t_in - t_out);
        let h_in = in_h_detailed(in_kelvin(t_in - drop / 2.), drop, 1., 90., 101325., 0.84);
        let total = r_out + r_glass + 1. / h_in;

        // Heat absorbed in the middle of the pane
        let inward = (r_out + r_glass / 2.) / total;
        let exp = tau + alpha * irradiance * inward / irradiance;
        assert_relative_eq!(center_of_glass_shgc(&w), exp, max_relative = 1e-9);
    }

    #[test]
    fn test_simple_glazing() {
        let simple = SimpleGlazing::new("Simple", 2.5, 0.45, 0.6).unwrap();
        let w = LayerStack::new("w", vec![simple.into()]).unwrap();
        assert_eq!(shgc(&w), 0.45);

        let frame = Frame::new("frame", 0.1, 5.).unwrap();
        let fs = frame_shgc(&frame);
        let w = w.with_frame(frame);
        assert_relative_eq!(shgc(&w), (0.45 + fs * 0.44) / 1.44, max_relative = 1e-12);
    }

    #[test]
    fn test_frame_shgc() {
        let frame = Frame::new("frame", 0.1, 5.).unwrap();

        // Network under NFRC summer conditions, by hand
        let (t_out, t_in) = (32., 24.);
        let r_out = 1. / out_h_detailed(2.75, in_kelvin(t_out), 0.9);
        let r_frame = 0.2;
        let r_in_simple = 1. / in_h_simple(0.9);
        let drop = r_in_simple / (r_out + r_frame + r_in_simple) * (t_in - t_out);
        let h_in = in_h_detailed(in_kelvin(t_in - drop / 2.), drop, 1., 90., 101325., 0.9);
        let r_in = 1. / h_in;
        let exp = 0.7 * (r_out + r_frame / 2.) / (r_out + r_frame + r_in);
        assert_relative_eq!(frame_shgc(&frame), exp, max_relative = 1e-12);

        // Not the network used for rating its U-factor
        let [r_out_simple, _, _] = frame.resistances();
        assert!((r_out - r_out_simple).abs() > 1e-3);

        // Frames let in much less heat than glass
        let w = LayerStack::new("Single", vec![Glazing::default().into()]).unwrap();
        let glass = shgc(&w);
        let framed = shgc(&w.clone().with_frame(frame.clone()));
        assert!(framed < glass);

        // Bigger windows are dominated by their glass
        let big = w
            .with_frame(frame)
            .with_geometry(WindowGeometry::rectangle(3., 3.).unwrap());
        let big_shgc = shgc(&big);
        assert!(big_shgc > framed && big_shgc < glass);
    }
}
