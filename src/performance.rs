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

//! Whole-window performance results.

use crate::construction::LayerStack;
use crate::optics::OpticalResult;
use crate::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The standard ratings of a window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPerformance {
    /// The name of the rated window
    pub identifier: String,

    /// Center-of-glass R-factor, including films ($`m^2.K/W`$)
    pub r_factor: Float,

    /// Center-of-glass U-factor, including films ($`W/m^2.K`$)
    pub u_factor: Float,

    /// U-factor of the glass combined with the frame ($`W/m^2.K`$)
    pub assembly_u_factor: Float,

    /// Solar Heat Gain Coefficient, including the frame
    pub shgc: Float,

    /// Normal-incidence solar optics
    pub solar: OpticalResult,

    /// Normal-incidence visible optics
    pub visible: OpticalResult,
}

impl WindowPerformance {
    /// Rates a window
    pub fn new(stack: &LayerStack) -> Self {
        let r_factor = stack.r_factor();
        Self {
            identifier: stack.identifier.clone(),
            r_factor,
            u_factor: 1. / r_factor,
            assembly_u_factor: stack.assembly_u_factor(),
            shgc: stack.shgc(),
            solar: stack.solar_optics(),
            visible: stack.visible_optics(),
        }
    }
}

/// Rates several windows. With the `parallel` feature, they are
/// rated in parallel.
pub fn rate_all(stacks: &[LayerStack]) -> Vec<WindowPerformance> {
    #[cfg(feature = "parallel")]
    let iter = stacks.par_iter();

    #[cfg(not(feature = "parallel"))]
    let iter = stacks.iter();

    iter.map(WindowPerformance::new).collect()
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::frame::Frame;
    use crate::glazing::Glazing;

    #[test]
    fn test_rate_all() {
        let single = LayerStack::new("Single", vec![Glazing::default().into()]).unwrap();
        let framed = single
            .clone()
            .with_frame(Frame::new("Frame", 0.05, 4.).unwrap());

        let ratings = rate_all(&[single.clone(), framed.clone()]);
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[1].assembly_u_factor, framed.assembly_u_factor());
        assert_eq!(ratings[1].shgc, framed.shgc());
        assert_eq!(ratings[0], WindowPerformance::new(&single));
        assert_eq!(ratings[0].u_factor, ratings[0].assembly_u_factor);
        assert!(ratings[1].assembly_u_factor < ratings[1].u_factor);
        assert!(ratings[1].shgc < ratings[0].shgc);
        assert_eq!(ratings[0].solar.absorptances.len(), 1);
    }
}
