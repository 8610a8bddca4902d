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

//! Normal-incidence optics of a stack of specular panes, following
//! ISO 9050/2003. Inter-reflections between panes are accounted for
//! by the closed form of the corresponding geometric series.

use crate::glazing::SpectralProperties;
use crate::Float;

/// The spectral range over which optical properties are averaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spectrum {
    /// The whole solar spectrum
    Solar,
    /// The visible portion of the spectrum
    Visible,
}

impl Spectrum {
    /// The name of the spectrum, in lowercase
    pub fn name(&self) -> &'static str {
        match self {
            Spectrum::Solar => "solar",
            Spectrum::Visible => "visible",
        }
    }
}

/// The optical behaviour of a whole stack of panes
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalResult {
    /// Fraction of the light incident on the outer face that
    /// reaches the inside
    pub transmittance: Float,

    /// Fraction of the light incident on the outer face that
    /// is reflected back outside
    pub reflectance: Float,

    /// Fraction of the light incident on the outer face that is absorbed
    /// by each pane, from outside to inside
    pub absorptances: Vec<Float>,
}

impl OpticalResult {
    /// The total absorptance
    pub fn absorptance(&self) -> Float {
        self.absorptances.iter().sum()
    }
}

/// An abstraction of a glazing layer for optical purposes.
///
/// All properties can be Solar or Visible spectral averages.
#[derive(Debug, Clone, Copy)]
pub struct OpticalLayer {
    /// Transmittance $`\tau`$ for light coming from the front
    tau_front: Float,

    /// Transmittance $`\tau'`$ for light coming from the back
    tau_back: Float,

    /// Reflectance $`\rho_f`$ on the front side.
    rho_front: Float,

    /// Reflectance $`\rho_b`$ on the back side
    rho_back: Float,

    /// Absorbtance $`\alpha_f`$ on the front side
    alpha_front: Float,

    /// Absorbtance $`\alpha_b`$ on the back side
    alpha_back: Float,
}

impl From<&SpectralProperties> for OpticalLayer {
    fn from(p: &SpectralProperties) -> Self {
        Self::new(
            p.transmittance_front,
            p.transmittance_back,
            p.reflectance_front,
            p.reflectance_back,
        )
    }
}

impl OpticalLayer {
    /// Creates a new `OpticalLayer`
    pub fn new(tau_front: Float, tau_back: Float, rho_front: Float, rho_back: Float) -> Self {
        debug_assert!(tau_front >= 0.0);
        debug_assert!(tau_back >= 0.0);
        debug_assert!(rho_front >= 0.0);
        debug_assert!(rho_back >= 0.0);

        debug_assert!(tau_front + rho_front <= 1. + 1e-9);
        debug_assert!(tau_back + rho_back <= 1. + 1e-9);

        Self {
            tau_front,
            tau_back,
            rho_back,
            rho_front,
            alpha_front: 1. - tau_front - rho_front,
            alpha_back: 1. - tau_back - rho_back,
        }
    }

    /// Gets the front transmittance
    pub fn tau_front(&self) -> Float {
        self.tau_front
    }

    /// Gets the back transmittance
    pub fn tau_back(&self) -> Float {
        self.tau_back
    }

    /// Gets the front reflectance
    pub fn rho_front(&self) -> Float {
        self.rho_front
    }

    /// Gets the back reflectance
    pub fn rho_back(&self) -> Float {
        self.rho_back
    }

    /// Gets the front absorbtance
    pub fn alpha_front(&self) -> Float {
        self.alpha_front
    }

    /// Gets the back absorbtance
    pub fn alpha_back(&self) -> Float {
        self.alpha_back
    }

    /// The denominator $`1 - \rho'_1 \rho_2`$ that sums up the
    /// inter-reflections between two layers
    fn inter_reflection(&self, other: &Self) -> Float {
        1. - self.rho_back * other.rho_front
    }

    /// Calculates the overall front transmittance of a system of two layers
    ///
    /// Source: ISO-9050/2003, Equation 2
    ///
    /// ```math
    /// \tau_{1-2} = \frac{\tau_1 \tau_2}{1 - \rho'_1 \rho_2}
    /// ```
    ///
    /// This equation, like the others in this module, can
    /// be used recursively, treating two layers combined as a single one
    /// and then attaching a third one.
    pub fn combined_tau_front(&self, other: &Self) -> Float {
        self.tau_front * other.tau_front / self.inter_reflection(other)
    }

    /// Calculates the overall back transmittance of a system of two layers
    ///
    /// ```math
    /// \tau'_{1-2} = \frac{\tau'_1 \tau'_2}{1 - \rho'_1 \rho_2}
    /// ```
    pub fn combined_tau_back(&self, other: &Self) -> Float {
        self.tau_back * other.tau_back / self.inter_reflection(other)
    }

    /// Calculates the overall front reflectance of a system of two layers
    ///
    /// Source: ISO-9050/2003, Equation 5
    ///
    /// ```math
    /// \rho_{1-2} = \rho_1 + \frac{\tau_1 \tau'_1 \rho_2}{1 - \rho'_1 \rho_2}
    /// ```
    pub fn combined_rho_front(&self, other: &Self) -> Float {
        self.rho_front
            + self.tau_front * self.tau_back * other.rho_front / self.inter_reflection(other)
    }

    /// Calculates the overall back reflectance of a system of two layers
    ///
    /// Derived by assigning the corresponding values to Equation 5 of the same standard
    ///     
    /// ```math
    /// \rho'_{1-2} = \rho'_2 + \frac{\tau_2 \tau'_2 \rho'_1}{1 - \rho_2 \rho'_1}
    /// ```
    pub fn combined_rho_back(&self, other: &Self) -> Float {
        other.rho_back
            + other.tau_back * other.tau_front * self.rho_back / self.inter_reflection(other)
    }

    /// Combines two layers into the equivalent single layer
    pub fn combine(&self, other: &Self) -> Self {
        Self::new(
            self.combined_tau_front(other),
            self.combined_tau_back(other),
            self.combined_rho_front(other),
            self.combined_rho_back(other),
        )
    }

    /// Combines several layers into the equivalent single one.
    ///
    /// Returns `None` if `layers` is empty
    pub fn combine_layers(layers: &[OpticalLayer]) -> Option<Self> {
        let (first, rest) = layers.split_first()?;
        match Self::combine_layers(rest) {
            None => Some(*first),
            Some(rest) => Some(first.combine(&rest)),
        }
    }

    /// Calculates the front absorbtance of two layers
    /// according to Equations 17 and 18 of ISO9050/2003
    ///
    /// ```math
    /// \alpha_{e1} = \alpha_1 + \frac{\alpha'_1 \tau_1 \rho_2 }{1 - \rho'_1 \rho_2}
    /// ```
    ///
    /// and
    ///
    /// ```math
    /// \alpha_{e2} = \frac{\alpha_2 \tau_1}{1 - \rho'_1 \rho_2}
    /// ```
    pub fn combined_alphas(&self, other: &Self) -> (Float, Float) {
        let denom = self.inter_reflection(other);
        let a1 = self.alpha_front + self.alpha_back * self.tau_front * other.rho_front / denom;
        let a2 = other.alpha_front * self.tau_front / denom;
        (a1, a2)
    }

    /// Calculates the absorbtances of each layer of the sytem
    pub fn alphas(layers: &[OpticalLayer]) -> Vec<Float> {
        let mut ret = Vec::with_capacity(layers.len());

        let (last, init) = match layers.split_last() {
            None => return ret,
            Some(v) => v,
        };
        if init.is_empty() {
            ret.push(last.alpha_front);
            return ret;
        }

        let mut acc_alpha = 0.0;
        for i in 1..layers.len() {
            if let (Some(g0), Some(g1)) = (
                Self::combine_layers(&layers[0..i]),
                Self::combine_layers(&layers[i..]),
            ) {
                let (a0, _) = g0.combined_alphas(&g1);
                ret.push(a0 - acc_alpha);
                acc_alpha = a0;
            }
        }

        // fill the last one
        if let Some(g0) = Self::combine_layers(init) {
            let (_, a1) = g0.combined_alphas(last);
            ret.push(a1);
        }
        ret
    }
}

/// Calculates the transmittance, front reflectance and per-layer
/// absorptance of a stack of layers, ordered from outside to inside
pub fn solve(layers: &[OpticalLayer]) -> OpticalResult {
    match OpticalLayer::combine_layers(layers) {
        None => OpticalResult {
            transmittance: 1.,
            reflectance: 0.,
            absorptances: Vec::new(),
        },
        Some(system) => OpticalResult {
            transmittance: system.tau_front,
            reflectance: system.rho_front,
            absorptances: OpticalLayer::alphas(layers),
        },
    }
}
