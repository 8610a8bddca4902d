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

//! Glazing panes and their optical and thermal properties.

use crate::convection::{in_h_simple, out_h_simple};
use crate::error::{in_range, positive, FenestrationError};
use crate::optics::Spectrum;
use crate::Float;

/// The emissivity of uncoated glass, used for both faces of
/// a [`SimpleGlazing`]
pub const CLEAR_GLASS_EMISSIVITY: Float = 0.84;

/// The normal-incidence optical properties of a glazing pane,
/// averaged over a certain [`Spectrum`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralProperties {
    /// Transmittance $`\tau`$ for light coming from the outside
    pub transmittance_front: Float,

    /// Transmittance $`\tau'`$ for light coming from the inside
    pub transmittance_back: Float,

    /// Reflectance $`\rho`$ of the face looking outside
    pub reflectance_front: Float,

    /// Reflectance $`\rho'`$ of the face looking inside
    pub reflectance_back: Float,
}

impl SpectralProperties {
    /// Creates properties with the same transmittance and reflectance on both sides
    pub fn new(transmittance: Float, reflectance: Float) -> Self {
        Self {
            transmittance_front: transmittance,
            transmittance_back: transmittance,
            reflectance_front: reflectance,
            reflectance_back: reflectance,
        }
    }

    /// Sets a different reflectance for the back face
    pub fn with_reflectance_back(mut self, reflectance_back: Float) -> Self {
        self.reflectance_back = reflectance_back;
        self
    }

    /// Sets a different transmittance for light coming from the back
    pub fn with_transmittance_back(mut self, transmittance_back: Float) -> Self {
        self.transmittance_back = transmittance_back;
        self
    }

    /// The front absorptance $`1 - \tau - \rho`$
    pub fn absorptance_front(&self) -> Float {
        1. - self.transmittance_front - self.reflectance_front
    }

    /// The back absorptance $`1 - \tau' - \rho'`$
    pub fn absorptance_back(&self) -> Float {
        1. - self.transmittance_back - self.reflectance_back
    }

    /// The same properties, seen from the other side
    pub fn flipped(&self) -> Self {
        Self {
            transmittance_front: self.transmittance_back,
            transmittance_back: self.transmittance_front,
            reflectance_front: self.reflectance_back,
            reflectance_back: self.reflectance_front,
        }
    }

    /// Checks that all values are within $`[0,1]`$ and that, on each side,
    /// transmittance and reflectance do not add up to more than 1.
    pub fn validate(&self, spectrum: Spectrum) -> Result<(), FenestrationError> {
        let (t_name, r_name) = match spectrum {
            Spectrum::Solar => ("solar transmittance", "solar reflectance"),
            Spectrum::Visible => ("visible transmittance", "visible reflectance"),
        };
        in_range(t_name, self.transmittance_front, 0., 1.)?;
        in_range(t_name, self.transmittance_back, 0., 1.)?;
        in_range(r_name, self.reflectance_front, 0., 1.)?;
        in_range(r_name, self.reflectance_back, 0., 1.)?;

        let sides = [
            ("front", self.transmittance_front + self.reflectance_front),
            ("back", self.transmittance_back + self.reflectance_back),
        ];
        for (side, sum) in sides {
            if sum > 1. {
                return Err(FenestrationError::TransmittancePlusReflectance {
                    spectrum: spectrum.name(),
                    side,
                    sum,
                });
            }
        }
        Ok(())
    }
}

/// A pane of glass (or other specular material) described by
/// its optical and thermal properties
#[derive(Debug, Clone, PartialEq)]
pub struct Glazing {
    /// The name of the material
    pub identifier: String,
    thickness: Float,
    conductivity: Float,
    solar: SpectralProperties,
    visible: SpectralProperties,
    emissivity_front: Float,
    emissivity_back: Float,
}

impl std::default::Default for Glazing {
    /// A generic 3mm clear pane
    fn default() -> Self {
        Self {
            identifier: "Generic Clear Glass".to_string(),
            thickness: 0.003,
            conductivity: 0.9,
            solar: SpectralProperties::new(0.85, 0.075),
            visible: SpectralProperties::new(0.9, 0.075),
            emissivity_front: CLEAR_GLASS_EMISSIVITY,
            emissivity_back: CLEAR_GLASS_EMISSIVITY,
        }
    }
}

impl Glazing {
    /// Creates a new `Glazing`, validating all of its properties.
    ///
    /// `thickness` is in $`m`$ and `conductivity` in $`W/m.K`$; both
    /// need to be positive. Emissivities need to be within $`[0,1]`$.
    pub fn new<S: Into<String>>(
        identifier: S,
        thickness: Float,
        conductivity: Float,
        solar: SpectralProperties,
        visible: SpectralProperties,
        emissivity_front: Float,
        emissivity_back: Float,
    ) -> Result<Self, FenestrationError> {
        positive("glazing thickness", thickness)?;
        positive("glazing conductivity", conductivity)?;
        solar.validate(Spectrum::Solar)?;
        visible.validate(Spectrum::Visible)?;
        in_range("glazing emissivity", emissivity_front, 0., 1.)?;
        in_range("glazing back emissivity", emissivity_back, 0., 1.)?;

        Ok(Self {
            identifier: identifier.into(),
            thickness,
            conductivity,
            solar,
            visible,
            emissivity_front,
            emissivity_back,
        })
    }

    /// Thickness, in $`m`$
    pub fn thickness(&self) -> Float {
        self.thickness
    }

    /// Thermal conductivity, in $`W/m.K`$
    pub fn conductivity(&self) -> Float {
        self.conductivity
    }

    /// The infrared emissivity of the front face
    pub fn emissivity_front(&self) -> Float {
        self.emissivity_front
    }

    /// The infrared emissivity of the back face
    pub fn emissivity_back(&self) -> Float {
        self.emissivity_back
    }

    /// The optical properties over a certain [`Spectrum`]
    pub fn spectral(&self, spectrum: Spectrum) -> &SpectralProperties {
        match spectrum {
            Spectrum::Solar => &self.solar,
            Spectrum::Visible => &self.visible,
        }
    }

    /// The R-value $`d/k`$ of the pane, excluding air films
    pub fn r_value(&self) -> Float {
        self.thickness / self.conductivity
    }

    /// The U-value of the pane, excluding air films
    pub fn u_value(&self) -> Float {
        1. / self.r_value()
    }

    /// The same pane, installed the other way around
    pub fn flipped(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            thickness: self.thickness,
            conductivity: self.conductivity,
            solar: self.solar.flipped(),
            visible: self.visible.flipped(),
            emissivity_front: self.emissivity_back,
            emissivity_back: self.emissivity_front,
        }
    }
}

/// A whole glazing system described only by its overall
/// performance, as done by EnergyPlus' `WindowMaterial:SimpleGlazingSystem`
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleGlazing {
    /// The name of the material
    pub identifier: String,
    u_factor: Float,
    shgc: Float,
    vt: Float,
    solar_reflectance: Float,
    visible_reflectance: Float,
}

impl SimpleGlazing {
    /// Creates a new `SimpleGlazing`.
    ///
    /// The `u_factor` (including films) needs to be within $`(0, 12]`$ $`W/m^2.K`$ and
    /// both the `shgc` and the visible transmittance `vt` within $`[0,1]`$.
    pub fn new<S: Into<String>>(
        identifier: S,
        u_factor: Float,
        shgc: Float,
        vt: Float,
    ) -> Result<Self, FenestrationError> {
        positive("simple glazing u-factor", u_factor)?;
        in_range("simple glazing u-factor", u_factor, 0., 12.)?;
        in_range("simple glazing shgc", shgc, 0., 1.)?;
        in_range("simple glazing visible transmittance", vt, 0., 1.)?;
        Ok(Self {
            identifier: identifier.into(),
            u_factor,
            shgc,
            vt,
            solar_reflectance: 0.,
            visible_reflectance: 0.,
        })
    }

    /// Sets the front reflectances reported for the system, which
    /// otherwise are zero.
    pub fn with_reflectances(
        mut self,
        solar_reflectance: Float,
        visible_reflectance: Float,
    ) -> Result<Self, FenestrationError> {
        self.solar_reflectance = solar_reflectance;
        self.visible_reflectance = visible_reflectance;
        self.spectral(Spectrum::Solar).validate(Spectrum::Solar)?;
        self.spectral(Spectrum::Visible).validate(Spectrum::Visible)?;
        Ok(self)
    }

    /// The U-factor, including air films
    pub fn u_factor(&self) -> Float {
        self.u_factor
    }

    /// The Solar Heat Gain Coefficient
    pub fn shgc(&self) -> Float {
        self.shgc
    }

    /// The visible transmittance
    pub fn vt(&self) -> Float {
        self.vt
    }

    /// The R-value excluding the standard air films of ISO 10292
    /// (i.e., $`1/23`$ outside and $`1/8`$ inside).
    pub fn r_value(&self) -> Float {
        1. / self.u_factor - (1. / out_h_simple() + 1. / in_h_simple(CLEAR_GLASS_EMISSIVITY))
    }

    /// The optical properties reported for a certain [`Spectrum`]. About
    /// 80% of the solar heat gain is assumed to be directly transmitted.
    pub fn spectral(&self, spectrum: Spectrum) -> SpectralProperties {
        match spectrum {
            Spectrum::Solar => SpectralProperties::new(0.8 * self.shgc, self.solar_reflectance),
            Spectrum::Visible => SpectralProperties::new(self.vt, self.visible_reflectance),
        }
    }
}
