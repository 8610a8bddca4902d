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

//! Environmental boundary conditions on each side of a window.

use crate::error::FenestrationError;
use crate::Float;

/// The conditions on both sides of a window for which its
/// thermal performance is calculated.
///
/// The [`Default`] is the NFRC 100-2010 winter condition used for
/// rating U-factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCondition {
    /// The dry bulb temperature of the outdoor air, in $`C`$
    pub outdoor_temperature: Float,

    /// The dry bulb temperature of the indoor air, in $`C`$
    pub indoor_temperature: Float,

    /// The outdoor wind speed, in $`m/s`$
    pub wind_speed: Float,

    /// The Solar Irradiance incident on the outer face, in $`W/m^2`$
    pub solar_irradiance: Float,

    /// The height of the window (and of its cavities), in $`m`$
    pub height: Float,

    /// The tilt of the window, in degrees. $`90^o`$ is vertical; $`0^o`$
    /// and $`180^o`$ are horizontal.
    pub tilt: Float,

    /// The atmospheric pressure, in $`Pa`$
    pub pressure: Float,
}

impl std::default::Default for BoundaryCondition {
    fn default() -> Self {
        Self {
            outdoor_temperature: -18.,
            indoor_temperature: 21.,
            wind_speed: 6.7,
            solar_irradiance: 0.,
            height: 1.,
            tilt: 90.,
            pressure: 101325.,
        }
    }
}

impl BoundaryCondition {
    /// The NFRC 200 summer condition used for rating the
    /// Solar Heat Gain Coefficient
    pub fn nfrc_summer() -> Self {
        Self {
            outdoor_temperature: 32.,
            indoor_temperature: 24.,
            wind_speed: 2.75,
            solar_irradiance: 783.,
            ..Self::default()
        }
    }

    /// Checks that this condition can be used for calculating
    pub fn validate(&self) -> Result<(), FenestrationError> {
        let err = |msg: String| Err(FenestrationError::InvalidBoundaryCondition(msg));

        let finite = [
            ("outdoor temperature", self.outdoor_temperature),
            ("indoor temperature", self.indoor_temperature),
            ("wind speed", self.wind_speed),
            ("solar irradiance", self.solar_irradiance),
            ("height", self.height),
            ("tilt", self.tilt),
            ("pressure", self.pressure),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return err(format!("{name} must be a finite number... found {v}"));
            }
        }

        if !(0.0..=180.).contains(&self.tilt) {
            return err(format!(
                "tilt must be between 0 and 180 degrees... found {}",
                self.tilt
            ));
        }
        if self.outdoor_temperature <= -273.15 || self.indoor_temperature <= -273.15 {
            return err("temperatures must be above absolute zero".to_string());
        }
        if self.wind_speed < 0. {
            return err(format!("wind speed cannot be negative... found {}", self.wind_speed));
        }
        if self.solar_irradiance < 0. {
            return err(format!(
                "solar irradiance cannot be negative... found {}",
                self.solar_irradiance
            ));
        }
        if self.height < 0. {
            return err(format!("height cannot be negative... found {}", self.height));
        }
        if self.pressure <= 0. {
            return err(format!("pressure must be positive... found {}", self.pressure));
        }
        Ok(())
    }

    /// The tilt used for picking convection correlations.
    ///
    /// Correlations assume heat flowing from the inside to the outside. When
    /// the outside is warmer the complement $`180^o - \gamma`$ is used instead,
    /// except for vertical surfaces
    pub fn effective_tilt(&self) -> Float {
        if self.tilt != 90. && self.outdoor_temperature > self.indoor_temperature {
            (180. - self.tilt).abs()
        } else {
            self.tilt
        }
    }
}
