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

//! Window frame and whole-window geometry.

use crate::convection::{in_h_simple, out_h_simple};
use crate::error::{in_range, positive, FenestrationError};
use crate::Float;

/// The fraction of the glazed area considered center-of-glass when
/// the edge of glass performs differently
const CENTER_OF_GLASS_FRACTION: Float = 0.76;

/// The size of the glazed opening of a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    /// Area of glass, in $`m^2`$
    area: Float,

    /// Perimeter of the glass, in $`m`$
    perimeter: Float,
}

impl std::default::Default for WindowGeometry {
    /// A 1m x 1m square
    fn default() -> Self {
        Self {
            area: 1.,
            perimeter: 4.,
        }
    }
}

impl WindowGeometry {
    /// Creates a new geometry from the `area` ($`m^2`$) and
    /// `perimeter` ($`m`$) of the glass, both of which need to be positive
    pub fn new(area: Float, perimeter: Float) -> Result<Self, FenestrationError> {
        Ok(Self {
            area: positive("window area", area)?,
            perimeter: positive("window perimeter", perimeter)?,
        })
    }

    /// The geometry of a rectangular glass of `width` by `height` $`m`$
    pub fn rectangle(width: Float, height: Float) -> Result<Self, FenestrationError> {
        positive("window width", width)?;
        positive("window height", height)?;
        Self::new(width * height, 2. * (width + height))
    }

    /// Area of glass, in $`m^2`$
    pub fn area(&self) -> Float {
        self.area
    }

    /// Perimeter of the glass, in $`m`$
    pub fn perimeter(&self) -> Float {
        self.perimeter
    }
}

/// The frame around the glass of a window
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The name of the frame
    pub identifier: String,
    width: Float,
    conductance: Float,
    edge_to_center_ratio: Float,
    solar_absorptance: Float,
    thermal_absorptance: Float,
}

impl Frame {
    /// Creates a new `Frame` of a certain `width` ($`m`$, within $`(0, 1]`$) and
    /// `conductance` ($`W/m^2.K`$, excluding films).
    ///
    /// The edge-of-glass U-factor is the same as the center of glass, the solar
    /// absorptance is 0.7 and the thermal absorptance is 0.9.
    pub fn new<S: Into<String>>(
        identifier: S,
        width: Float,
        conductance: Float,
    ) -> Result<Self, FenestrationError> {
        positive("frame width", width)?;
        in_range("frame width", width, 0., 1.)?;
        positive("frame conductance", conductance)?;
        Ok(Self {
            identifier: identifier.into(),
            width,
            conductance,
            edge_to_center_ratio: 1.,
            solar_absorptance: 0.7,
            thermal_absorptance: 0.9,
        })
    }

    /// Sets the ratio between the edge-of-glass and the center-of-glass
    /// U-factors, within $`(0, 4]`$
    pub fn with_edge_to_center_ratio(mut self, ratio: Float) -> Result<Self, FenestrationError> {
        positive("frame edge to center ratio", ratio)?;
        self.edge_to_center_ratio = in_range("frame edge to center ratio", ratio, 0., 4.)?;
        Ok(self)
    }

    /// Sets the solar absorptance of the outside of the frame
    pub fn with_solar_absorptance(mut self, absorptance: Float) -> Result<Self, FenestrationError> {
        self.solar_absorptance = in_range("frame solar absorptance", absorptance, 0., 1.)?;
        Ok(self)
    }

    /// Sets the thermal (infrared) absorptance of the frame, which is
    /// also its emissivity
    pub fn with_thermal_absorptance(mut self, absorptance: Float) -> Result<Self, FenestrationError> {
        self.thermal_absorptance = in_range("frame thermal absorptance", absorptance, 0., 1.)?;
        Ok(self)
    }

    /// Width, in $`m`$
    pub fn width(&self) -> Float {
        self.width
    }

    /// Conductance, excluding films, in $`W/m^2.K`$
    pub fn conductance(&self) -> Float {
        self.conductance
    }

    /// The ratio between the edge-of-glass and the center-of-glass U-factors
    pub fn edge_to_center_ratio(&self) -> Float {
        self.edge_to_center_ratio
    }

    /// The solar absorptance
    pub fn solar_absorptance(&self) -> Float {
        self.solar_absorptance
    }

    /// The thermal absorptance
    pub fn thermal_absorptance(&self) -> Float {
        self.thermal_absorptance
    }

    /// The R-value, excluding films, in $`m^2.K/W`$
    pub fn r_value(&self) -> Float {
        1. / self.conductance
    }

    /// The resistances of the outdoor film, the frame and the indoor
    /// film, using the film coefficients of ISO 10292
    pub(crate) fn resistances(&self) -> [Float; 3] {
        [
            1. / out_h_simple(),
            self.r_value(),
            1. / in_h_simple(self.thermal_absorptance),
        ]
    }

    /// The U-factor, including films, in $`W/m^2.K`$
    pub fn u_factor(&self) -> Float {
        1. / self.resistances().iter().sum::<Float>()
    }

    /// The area of the frame around a glass of a certain geometry.
    ///
    /// ```math
    /// A_{frame} = P w + 4 w^2
    /// ```
    pub fn area(&self, geometry: &WindowGeometry) -> Float {
        geometry.perimeter * self.width + 4. * self.width.powi(2)
    }

    /// Weights a property of the glass against that of the frame
    /// by their areas
    pub(crate) fn area_weighted(&self, glass: Float, frame: Float, geometry: &WindowGeometry) -> Float {
        let a_glass = geometry.area;
        let a_frame = self.area(geometry);
        (glass * a_glass + frame * a_frame) / (a_glass + a_frame)
    }

    /// Combines the center-of-glass U-factor `u_glass` with this frame.
    ///
    /// When the edge of glass performs differently than the center (i.e., the
    /// ratio is not 1) and the glass is not a simple glazing system, 24% of
    /// the glass is considered edge of glass:
    ///
    /// ```math
    /// U_{glass} = 0.76 U_{cog} + 0.24 \, ratio \, U_{cog}
    /// ```
    pub fn combine_u_factor(&self, u_glass: Float, is_simple: bool, geometry: &WindowGeometry) -> Float {
        let u_glass = if self.edge_to_center_ratio != 1. && !is_simple {
            CENTER_OF_GLASS_FRACTION * u_glass
                + (1. - CENTER_OF_GLASS_FRACTION) * self.edge_to_center_ratio * u_glass
        } else {
            u_glass
        };
        self.area_weighted(u_glass, self.u_factor(), geometry)
    }
}
