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

//! Layer stacks: the ordered panes and gas gaps of a window.

use crate::cavity::GasGap;
use crate::convection::{in_h_simple, out_h_simple};
use crate::environment::BoundaryCondition;
use crate::error::FenestrationError;
use crate::frame::{Frame, WindowGeometry};
use crate::glazing::{Glazing, SimpleGlazing, CLEAR_GLASS_EMISSIVITY};
use crate::optics::{self, OpticalLayer, OpticalResult, Spectrum};
use crate::solver::{self, TemperatureProfile};
use crate::Float;

/// The maximum number of layers that a [`LayerStack`] can have
pub const MAX_LAYERS: usize = 8;

/// One of the layers of a window
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// A pane of glass
    Glazing(Glazing),

    /// A sealed gas cavity
    Gap(GasGap),

    /// A whole glazing system described by its overall performance.
    /// It needs to be the only layer of its stack.
    Simple(SimpleGlazing),
}

impl From<Glazing> for Layer {
    fn from(g: Glazing) -> Self {
        Layer::Glazing(g)
    }
}

impl From<GasGap> for Layer {
    fn from(g: GasGap) -> Self {
        Layer::Gap(g)
    }
}

impl From<SimpleGlazing> for Layer {
    fn from(g: SimpleGlazing) -> Self {
        Layer::Simple(g)
    }
}

impl Layer {
    /// The name of the material of this layer
    pub fn identifier(&self) -> &str {
        match self {
            Layer::Glazing(g) => &g.identifier,
            Layer::Gap(g) => &g.identifier,
            Layer::Simple(g) => &g.identifier,
        }
    }

    /// The thickness of the layer, in $`m`$. Simple glazing systems
    /// have no thickness.
    pub fn thickness(&self) -> Float {
        match self {
            Layer::Glazing(g) => g.thickness(),
            Layer::Gap(g) => g.thickness(),
            Layer::Simple(_) => 0.,
        }
    }

    /// Checks whether this is a gas gap
    pub fn is_gap(&self) -> bool {
        matches!(self, Layer::Gap(_))
    }

    /// The optical representation of the layer, if it is not a gap
    fn optical(&self, spectrum: Spectrum) -> Option<OpticalLayer> {
        match self {
            Layer::Glazing(g) => Some(OpticalLayer::from(g.spectral(spectrum))),
            Layer::Simple(g) => Some(OpticalLayer::from(&g.spectral(spectrum))),
            Layer::Gap(_) => None,
        }
    }

    /// The emissivities of the front and back faces of a layer, if it is not a gap
    fn emissivities(&self) -> Option<(Float, Float)> {
        match self {
            Layer::Glazing(g) => Some((g.emissivity_front(), g.emissivity_back())),
            Layer::Simple(_) => Some((CLEAR_GLASS_EMISSIVITY, CLEAR_GLASS_EMISSIVITY)),
            Layer::Gap(_) => None,
        }
    }

    /// The fixed R-value of a layer. Gaps have none, as their
    /// resistance depends on their temperature
    pub(crate) fn fixed_r_value(&self) -> Option<Float> {
        match self {
            Layer::Glazing(g) => Some(g.r_value()),
            Layer::Simple(g) => Some(g.r_value()),
            Layer::Gap(_) => None,
        }
    }

    /// The same layer, installed the other way around
    fn flipped(&self) -> Self {
        match self {
            Layer::Glazing(g) => Layer::Glazing(g.flipped()),
            _ => self.clone(),
        }
    }
}

/// An ordered sequence of layers, from outside to inside, that
/// makes up a window.
///
/// The ordering rules are checked when it is built, so all the
/// calculations performed afterwards are infallible for the standard
/// conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    /// The name of the construction
    pub identifier: String,
    layers: Vec<Layer>,
    frame: Option<Frame>,
    geometry: WindowGeometry,
}

impl LayerStack {
    /// Creates a new `LayerStack`, checking that:
    ///
    /// * it has between 1 and [`MAX_LAYERS`] layers
    /// * a [`SimpleGlazing`] is the only layer of the stack
    /// * the first and last layers are not gaps
    /// * gaps are always between two glazing layers, and glazing layers
    ///   are always separated by a gap
    pub fn new<S: Into<String>>(identifier: S, layers: Vec<Layer>) -> Result<Self, FenestrationError> {
        let n = layers.len();
        if n == 0 {
            return Err(FenestrationError::EmptyStack);
        }
        if n > MAX_LAYERS {
            return Err(FenestrationError::TooManyLayers(n));
        }
        if n > 1 && layers.iter().any(|l| matches!(l, Layer::Simple(_))) {
            return Err(FenestrationError::Structure(
                "a simple glazing system must be the only layer of its construction".to_string(),
            ));
        }
        if layers[0].is_gap() || layers[n - 1].is_gap() {
            return Err(FenestrationError::Structure(
                "gas gaps cannot be the first or last layer of a window".to_string(),
            ));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            match (pair[0].is_gap(), pair[1].is_gap()) {
                (true, true) => {
                    return Err(FenestrationError::Structure(format!(
                        "gas gaps '{}' and '{}' (layers {} and {}) cannot be adjacent",
                        pair[0].identifier(),
                        pair[1].identifier(),
                        i,
                        i + 1
                    )))
                }
                (false, false) => {
                    return Err(FenestrationError::Structure(format!(
                        "glazing layers '{}' and '{}' (layers {} and {}) need to be separated by a gas gap",
                        pair[0].identifier(),
                        pair[1].identifier(),
                        i,
                        i + 1
                    )))
                }
                _ => {}
            }
        }

        Ok(Self {
            identifier: identifier.into(),
            layers,
            frame: None,
            geometry: WindowGeometry::default(),
        })
    }

    /// Attaches a [`Frame`] to the window
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Sets the geometry of the glazed opening, used for weighting
    /// the frame against the glass
    pub fn with_geometry(mut self, geometry: WindowGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// The layers, from outside to inside
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The frame, if any
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// The geometry of the glazed opening
    pub fn geometry(&self) -> &WindowGeometry {
        &self.geometry
    }

    /// The identifiers of the materials, from outside to inside
    pub fn material_identifiers(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.identifier()).collect()
    }

    /// Returns the [`SimpleGlazing`] if the window is made of one
    pub fn simple_glazing(&self) -> Option<&SimpleGlazing> {
        match self.layers.as_slice() {
            [Layer::Simple(g)] => Some(g),
            _ => None,
        }
    }

    /// The number of layers that are not gaps
    pub fn glazing_count(&self) -> usize {
        self.layers.iter().filter(|l| !l.is_gap()).count()
    }

    /// The number of gas gaps
    pub fn gap_count(&self) -> usize {
        self.layers.iter().filter(|l| l.is_gap()).count()
    }

    /// The total thickness, in $`m`$
    pub fn thickness(&self) -> Float {
        self.layers.iter().map(|l| l.thickness()).sum()
    }

    /// The emissivity of the face looking outside
    pub fn outside_emissivity(&self) -> Float {
        self.layers
            .first()
            .and_then(|l| l.emissivities())
            .map_or(CLEAR_GLASS_EMISSIVITY, |(front, _)| front)
    }

    /// The emissivity of the face looking inside
    pub fn inside_emissivity(&self) -> Float {
        self.layers
            .last()
            .and_then(|l| l.emissivities())
            .map_or(CLEAR_GLASS_EMISSIVITY, |(_, back)| back)
    }

    /// The emissivities facing the gap at `index`: that of the back of
    /// the previous pane and that of the front of the next one.
    pub(crate) fn gap_emissivities(&self, index: usize) -> (Float, Float) {
        let back = index
            .checked_sub(1)
            .and_then(|i| self.layers.get(i))
            .and_then(|l| l.emissivities())
            .map_or(CLEAR_GLASS_EMISSIVITY, |(_, back)| back);
        let front = self
            .layers
            .get(index + 1)
            .and_then(|l| l.emissivities())
            .map_or(CLEAR_GLASS_EMISSIVITY, |(front, _)| front);
        (back, front)
    }

    /// Checks whether the layers mirror each other front-to-back.
    pub fn is_symmetric(&self) -> bool {
        let ids = self.material_identifiers();
        ids.iter().eq(ids.iter().rev())
    }

    /// The same window, installed the other way around: layers are in
    /// reverse order and each pane has its faces swapped.
    pub fn reversed(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            layers: self.layers.iter().rev().map(|l| l.flipped()).collect(),
            frame: self.frame.clone(),
            geometry: self.geometry,
        }
    }

    /// The product of the transmittances of all panes, ignoring
    /// inter-reflections
    fn unshaded_transmittance(&self, spectrum: Spectrum) -> Float {
        self.layers
            .iter()
            .filter_map(|l| l.optical(spectrum))
            .map(|o| o.tau_front())
            .product()
    }

    /// The product of the solar transmittances of all panes
    pub fn unshaded_solar_transmittance(&self) -> Float {
        self.unshaded_transmittance(Spectrum::Solar)
    }

    /// The product of the visible transmittances of all panes
    pub fn unshaded_visible_transmittance(&self) -> Float {
        self.unshaded_transmittance(Spectrum::Visible)
    }

    /// Calculates the transmittance, front reflectance and per-pane
    /// absorptance at normal incidence.
    pub fn optics(&self, spectrum: Spectrum) -> OpticalResult {
        let panes: Vec<OpticalLayer> = self
            .layers
            .iter()
            .filter_map(|l| l.optical(spectrum))
            .collect();
        optics::solve(&panes)
    }

    /// [`LayerStack::optics`] over the solar spectrum
    pub fn solar_optics(&self) -> OpticalResult {
        self.optics(Spectrum::Solar)
    }

    /// [`LayerStack::optics`] over the visible spectrum
    pub fn visible_optics(&self) -> OpticalResult {
        self.optics(Spectrum::Visible)
    }

    /// The R-factor ($`m^2.K/W`$), including air films
    ///
    /// Windows without gaps use the film coefficients of ISO 10292:
    ///
    /// ```math
    /// R = \frac{1}{23} + R_{layer} + \frac{1}{3.6 + 4.4 \varepsilon / 0.84}
    /// ```
    ///
    /// Other windows report the converged resistances of the temperature
    /// profile under the default (i.e., NFRC winter) [`BoundaryCondition`].
    pub fn r_factor(&self) -> Float {
        match self.closed_form_r_value() {
            Some(r) => r + 1. / out_h_simple() + 1. / in_h_simple(self.inside_emissivity()),
            None => self.standard_profile().r_factor(),
        }
    }

    /// The U-factor ($`W/m^2.K`$), including air films
    pub fn u_factor(&self) -> Float {
        1. / self.r_factor()
    }

    /// The R-value ($`m^2.K/W`$), excluding air films
    pub fn r_value(&self) -> Float {
        match self.closed_form_r_value() {
            Some(r) => r,
            None => self.standard_profile().r_value(),
        }
    }

    /// The U-value ($`W/m^2.K`$), excluding air films
    pub fn u_value(&self) -> Float {
        1. / self.r_value()
    }

    /// The R-value of windows with no gaps
    fn closed_form_r_value(&self) -> Option<Float> {
        if self.gap_count() > 0 {
            return None;
        }
        self.layers.first().and_then(|l| l.fixed_r_value())
    }

    fn standard_profile(&self) -> TemperatureProfile {
        solver::solve(self, &BoundaryCondition::default(), &[])
    }

    /// The heat absorbed by each layer ($`W/m^2`$) when the outside face
    /// receives `irradiance` $`W/m^2`$ of solar radiation
    pub(crate) fn absorbed_solar(&self, irradiance: Float) -> Vec<Float> {
        let mut alphas = self.solar_optics().absorptances.into_iter();
        self.layers
            .iter()
            .map(|l| {
                if l.is_gap() {
                    0.
                } else {
                    alphas.next().unwrap_or(0.) * irradiance
                }
            })
            .collect()
    }

    /// Calculates the temperatures at each layer boundary, and the
    /// resistance of each layer, under a certain [`BoundaryCondition`].
    ///
    /// The heat generated by the absorption of the solar irradiance of
    /// the boundary condition is included.
    pub fn temperature_profile(
        &self,
        bc: &BoundaryCondition,
    ) -> Result<TemperatureProfile, FenestrationError> {
        bc.validate()?;
        let heat_generation = if bc.solar_irradiance > 0. {
            self.absorbed_solar(bc.solar_irradiance)
        } else {
            Vec::new()
        };
        Ok(solver::solve(self, bc, &heat_generation))
    }

    /// The Solar Heat Gain Coefficient under NFRC summer conditions,
    /// including the frame if there is one
    pub fn shgc(&self) -> Float {
        crate::shgc::shgc(self)
    }

    /// The U-factor ($`W/m^2.K`$) of the whole window, combining the center of
    /// glass with the frame, if there is one
    pub fn assembly_u_factor(&self) -> Float {
        let u = self.u_factor();
        match &self.frame {
            Some(frame) => frame.combine_u_factor(u, self.simple_glazing().is_some(), &self.geometry),
            None => u,
        }
    }

    /// The R-factor ($`m^2.K/W`$) of the whole window
    pub fn assembly_r_factor(&self) -> Float {
        1. / self.assembly_u_factor()
    }
}
