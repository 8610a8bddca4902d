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

//! Gas properties and gas mixtures used to fill cavities.

use crate::error::{in_range, positive, FenestrationError};
use crate::Float;
use polynomial::{poly, Polynomial};
use std::str::FromStr;

/// The universal gas constant, in $`J/kmol.K`$
const R: Float = 8314.46261815324;

/// A structure containing the data that will describe the thermal
/// behaviour of a gas.
#[derive(Debug, Clone)]
pub struct Gas {
    /// The thermal conductivity ($`{W}/{m.K}`$) as a function of the
    /// temperature (in $`K`$)
    thermal_conductivity: Polynomial,

    /// The dynamic viscosity ( $`{N.s}/{m^2}`$) as a function of the
    /// temperature (in $`K`$)
    dynamic_viscosity: Polynomial,

    /// The specific heat capacity ($`{J}/{kg.K}`$) as a function of the
    /// temperature (in $`K`$)
    heat_capacity: Polynomial,

    /// THe Molecular Mass ($`{kg}/{kmol}`$)
    mass: Float,

    /// The ratio between the specific heat at constant pressure and
    /// that at constant volume
    specific_heat_ratio: Float,
}

/// Returns a gas with the properties of Air
pub const AIR: Gas = Gas {
    thermal_conductivity: poly![2.873e-3, 7.760e-5],
    dynamic_viscosity: poly![3.723e-6, 4.94e-8],
    heat_capacity: poly![1002.7370, 1.2324e-2],
    mass: 28.97,
    specific_heat_ratio: 1.4,
};

/// Returns a gas with the properties of argon
pub const ARGON: Gas = Gas {
    thermal_conductivity: poly![2.285e-3, 5.149e-5],
    dynamic_viscosity: poly![3.379e-6, 6.451e-8],
    heat_capacity: poly![521.9285],
    mass: 39.948,
    specific_heat_ratio: 1.67,
};

/// A gas with the properties of krypton
pub const KRYPTON: Gas = Gas {
    thermal_conductivity: poly![9.443e-4, 2.826e-5],
    dynamic_viscosity: poly![2.213e-6, 7.777e-8],
    heat_capacity: poly![248.0907],
    mass: 83.8,
    specific_heat_ratio: 1.68,
};

/// A gas with the properties of xenon
pub const XENON: Gas = Gas {
    thermal_conductivity: poly![4.538e-4, 1.723e-5],
    dynamic_viscosity: poly![1.069e-6, 7.414e-8],
    heat_capacity: poly![158.3397],
    mass: 131.30,
    specific_heat_ratio: 1.66,
};

impl Gas {
    /// Derives the Thermal Conductivity at a certain Temperature (in $`K`$)
    pub fn thermal_conductivity(&self, temp: Float) -> Float {
        self.thermal_conductivity.eval(temp)
    }

    /// Derives the Dynamic Viscosity at a certain Temperature (in $`K`$)
    pub fn dynamic_viscosity(&self, temp: Float) -> Float {
        self.dynamic_viscosity.eval(temp)
    }

    /// Derives the Specific Heat Capacity at a certain Temperature (in $`K`$)
    pub fn heat_capacity(&self, temp: Float) -> Float {
        self.heat_capacity.eval(temp)
    }

    /// Retreives the Molecular Mass
    pub fn mass(&self) -> Float {
        self.mass
    }

    /// Retreives the ratio of specific heats
    pub fn specific_heat_ratio(&self) -> Float {
        self.specific_heat_ratio
    }

    /// Derives the density based on the temperature (in $`K`$) and the
    /// `pressure` (in $`Pa`$)
    pub fn density(&self, temp: Float, pressure: Float) -> Float {
        // Eq. 55 of iso15099/2003
        pressure * self.mass / (R * temp)
    }
}

/// The temperature-dependent properties needed for calculating
/// heat transfer through a gas
pub trait GasProperties {
    /// Thermal Conductivity ($`W/m.K`$) at a certain Temperature (in $`K`$)
    fn thermal_conductivity(&self, temp: Float) -> Float;

    /// Dynamic Viscosity ($`kg/m.s`$) at a certain Temperature (in $`K`$)
    fn dynamic_viscosity(&self, temp: Float) -> Float;

    /// Specific Heat Capacity ($`J/kg.K`$) at a certain Temperature (in $`K`$)
    fn heat_capacity(&self, temp: Float) -> Float;

    /// Molecular Mass ($`kg/kmol`$)
    fn mass(&self) -> Float;
}

impl GasProperties for Gas {
    fn thermal_conductivity(&self, temp: Float) -> Float {
        Gas::thermal_conductivity(self, temp)
    }
    fn dynamic_viscosity(&self, temp: Float) -> Float {
        Gas::dynamic_viscosity(self, temp)
    }
    fn heat_capacity(&self, temp: Float) -> Float {
        Gas::heat_capacity(self, temp)
    }
    fn mass(&self) -> Float {
        Gas::mass(self)
    }
}

/// A gas described by user-provided quadratic property curves, so that
/// $`p(T) = a + bT + cT^2`$ with $`T`$ in $`K`$.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomGas {
    conductivity: [Float; 3],
    viscosity: [Float; 3],
    heat_capacity: [Float; 3],
    specific_heat_ratio: Float,
    mass: Float,
}

fn quadratic(c: &[Float; 3], t: Float) -> Float {
    c[0] + c[1] * t + c[2] * t * t
}

impl CustomGas {
    /// Creates a gas from the coefficients `[a, b, c]` of its property
    /// curves.
    ///
    /// The first coefficients of the viscosity and heat capacity must be
    /// positive; the `specific_heat_ratio` must be at least one and the
    /// `molecular_weight` must be between 20 and 200 $`kg/kmol`$
    pub fn new(
        conductivity: [Float; 3],
        viscosity: [Float; 3],
        heat_capacity: [Float; 3],
        specific_heat_ratio: Float,
        molecular_weight: Float,
    ) -> Result<Self, FenestrationError> {
        positive("custom gas viscosity coefficient A", viscosity[0])?;
        positive("custom gas specific heat coefficient A", heat_capacity[0])?;
        in_range("custom gas specific heat ratio", specific_heat_ratio, 1., Float::MAX)?;
        in_range("custom gas molecular weight", molecular_weight, 20., 200.)?;
        Ok(Self {
            conductivity,
            viscosity,
            heat_capacity,
            specific_heat_ratio,
            mass: molecular_weight,
        })
    }

    /// Retreives the ratio of specific heats
    pub fn specific_heat_ratio(&self) -> Float {
        self.specific_heat_ratio
    }
}

impl GasProperties for CustomGas {
    fn thermal_conductivity(&self, temp: Float) -> Float {
        quadratic(&self.conductivity, temp)
    }
    fn dynamic_viscosity(&self, temp: Float) -> Float {
        quadratic(&self.viscosity, temp)
    }
    fn heat_capacity(&self, temp: Float) -> Float {
        quadratic(&self.heat_capacity, temp)
    }
    fn mass(&self) -> Float {
        self.mass
    }
}

/// The pure gases for which property data is tabulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasKind {
    /// Dry air
    Air,
    /// Argon
    Argon,
    /// Krypton
    Krypton,
    /// Xenon
    Xenon,
}

impl GasKind {
    /// All the tabulated gases
    pub const ALL: [GasKind; 4] = [GasKind::Air, GasKind::Argon, GasKind::Krypton, GasKind::Xenon];

    /// The property data of this gas, according to Annex B of ISO15099/2003
    pub fn gas(&self) -> &'static Gas {
        match self {
            GasKind::Air => &AIR,
            GasKind::Argon => &ARGON,
            GasKind::Krypton => &KRYPTON,
            GasKind::Xenon => &XENON,
        }
    }

    /// The name of the gas
    pub fn name(&self) -> &'static str {
        match self {
            GasKind::Air => "Air",
            GasKind::Argon => "Argon",
            GasKind::Krypton => "Krypton",
            GasKind::Xenon => "Xenon",
        }
    }
}

impl std::fmt::Display for GasKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GasKind {
    type Err = FenestrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        GasKind::ALL
            .iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| FenestrationError::UnknownGas(s.to_string()))
    }
}

/// What fills a gas cavity
#[derive(Debug, Clone, PartialEq)]
pub enum GasFill {
    /// A single tabulated gas
    Pure(GasKind),

    /// Between 2 and 4 tabulated gases with volumetric fractions adding
    /// up to one
    Mixture(Vec<(GasKind, Float)>),

    /// A gas described by user-provided property curves
    Custom(CustomGas),
}

impl std::default::Default for GasFill {
    fn default() -> Self {
        GasFill::Pure(GasKind::Air)
    }
}

impl GasFill {
    /// Creates a [`GasFill::Mixture`], checking that there are between 2
    /// and 4 gases, that there is one fraction per gas and that the
    /// fractions add up to 1.
    pub fn mixture(gases: &[GasKind], fractions: &[Float]) -> Result<Self, FenestrationError> {
        if !(2..=4).contains(&gases.len()) {
            return Err(FenestrationError::GasCount(gases.len()));
        }
        if gases.len() != fractions.len() {
            return Err(FenestrationError::FractionCount {
                gases: gases.len(),
                fractions: fractions.len(),
            });
        }
        for f in fractions {
            in_range("gas fraction", *f, 0., 1.)?;
        }
        let sum: Float = fractions.iter().sum();
        if (sum - 1.).abs() > 1e-6 {
            return Err(FenestrationError::FractionSum(sum));
        }
        Ok(GasFill::Mixture(
            gases.iter().copied().zip(fractions.iter().copied()).collect(),
        ))
    }

    /// Like [`GasFill::mixture`], but the gases are given by name
    pub fn mixture_by_name(gases: &[&str], fractions: &[Float]) -> Result<Self, FenestrationError> {
        let kinds = gases
            .iter()
            .map(|name| name.parse::<GasKind>())
            .collect::<Result<Vec<GasKind>, FenestrationError>>()?;
        Self::mixture(&kinds, fractions)
    }

    /// Evaluates a property as the fraction-weighted sum of those of
    /// the constituents
    fn weighted<F: Fn(&dyn GasProperties) -> Float>(&self, property: F) -> Float {
        match self {
            GasFill::Pure(kind) => property(kind.gas()),
            GasFill::Mixture(parts) => parts
                .iter()
                .map(|(kind, fraction)| property(kind.gas() as &dyn GasProperties) * fraction)
                .sum(),
            GasFill::Custom(gas) => property(gas),
        }
    }

    /// The Thermal Conductivity ($`W/m.K`$) at a certain Temperature (in $`K`$)
    pub fn conductivity(&self, temp: Float) -> Float {
        self.weighted(|g| g.thermal_conductivity(temp))
    }

    /// The Dynamic Viscosity ($`kg/m.s`$) at a certain Temperature (in $`K`$)
    pub fn viscosity(&self, temp: Float) -> Float {
        self.weighted(|g| g.dynamic_viscosity(temp))
    }

    /// The Specific Heat ($`J/kg.K`$) at a certain Temperature (in $`K`$)
    pub fn specific_heat(&self, temp: Float) -> Float {
        self.weighted(|g| g.heat_capacity(temp))
    }

    /// The Molecular Mass ($`kg/kmol`$)
    pub fn molecular_weight(&self) -> Float {
        self.weighted(|g| g.mass())
    }

    /// The density ($`kg/m^3`$) at a certain Temperature (in $`K`$) and pressure (in $`Pa`$),
    /// following the ideal gas law
    pub fn density(&self, temp: Float, pressure: Float) -> Float {
        pressure * self.molecular_weight() / (R * temp)
    }

    /// The Prandtl number at a certain Temperature (in $`K`$)
    pub fn prandtl(&self, temp: Float) -> Float {
        self.viscosity(temp) * self.specific_heat(temp) / self.conductivity(temp)
    }

    /// A short description of the fill
    pub fn description(&self) -> String {
        match self {
            GasFill::Pure(kind) => kind.name().to_string(),
            GasFill::Mixture(parts) => parts
                .iter()
                .map(|(kind, fraction)| format!("{}:{}", kind.name(), fraction))
                .collect::<Vec<String>>()
                .join("+"),
            GasFill::Custom(_) => "Custom".to_string(),
        }
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;

    fn check_value(a: Float, b: Float) -> Result<(), String> {
        let err = (a - b).abs() / a.abs();
        if err > 1e-2 {
            //1% error max
            return Err(format!("a = {} | b = {} | err = {}", a, b, err));
        }
        Ok(())
    }

    #[test]
    fn test_thermal_conductivity() {
        check_value(0.0241, AIR.thermal_conductivity(0. + 273.15)).unwrap();
        check_value(0.0248, AIR.thermal_conductivity(10. + 273.15)).unwrap();

        check_value(0.0163, ARGON.thermal_conductivity(0. + 273.15)).unwrap();
        check_value(0.0169, ARGON.thermal_conductivity(10. + 273.15)).unwrap();

        check_value(0.0087, KRYPTON.thermal_conductivity(0. + 273.15)).unwrap();
        check_value(0.0089, KRYPTON.thermal_conductivity(10. + 273.15)).unwrap();

        check_value(0.0052, XENON.thermal_conductivity(0. + 273.15)).unwrap();
        check_value(0.0053, XENON.thermal_conductivity(10. + 273.15)).unwrap();
    }

    #[test]
    fn test_dynamic_viscosity() {
        check_value(1.722e-5, AIR.dynamic_viscosity(0. + 273.15)).unwrap();
        check_value(1.771e-5, AIR.dynamic_viscosity(10. + 273.15)).unwrap();

        check_value(2.1e-5, ARGON.dynamic_viscosity(0. + 273.15)).unwrap();
        check_value(2.165e-5, ARGON.dynamic_viscosity(10. + 273.15)).unwrap();

        check_value(2.346e-5, KRYPTON.dynamic_viscosity(0. + 273.15)).unwrap();
        check_value(2.423e-5, KRYPTON.dynamic_viscosity(10. + 273.15)).unwrap();

        check_value(2.132e-5, XENON.dynamic_viscosity(0. + 273.15)).unwrap();
        check_value(2.206e-5, XENON.dynamic_viscosity(10. + 273.15)).unwrap();
    }

    #[test]
    fn test_heat_capacity() {
        check_value(1006.1034, AIR.heat_capacity(0. + 273.15)).unwrap();
        check_value(1006.2265, AIR.heat_capacity(10. + 273.15)).unwrap();
        check_value(521.9285, ARGON.heat_capacity(10. + 273.15)).unwrap();
        check_value(248.0907, KRYPTON.heat_capacity(10. + 273.15)).unwrap();
        check_value(158.3397, XENON.heat_capacity(10. + 273.15)).unwrap();
    }

    #[test]
    fn test_density() {
        let rho = AIR.density(293.15, 101325.);
        assert!((1.2041 - rho).abs() < 1e-3);

        // Half the pressure, half the density
        let half = AIR.density(293.15, 101325. / 2.);
        assert!((rho / 2. - half).abs() < 1e-9);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Argon".parse::<GasKind>(), Ok(GasKind::Argon));
        assert_eq!("argon".parse::<GasKind>(), Ok(GasKind::Argon));
        assert_eq!(" XENON ".parse::<GasKind>(), Ok(GasKind::Xenon));
        assert_eq!(
            "Neon".parse::<GasKind>(),
            Err(FenestrationError::UnknownGas("Neon".to_string()))
        );
        assert_eq!(GasKind::Krypton.to_string(), "Krypton");
    }

    #[test]
    fn test_mixture_validation() {
        // OK
        let fill = GasFill::mixture(&[GasKind::Argon, GasKind::Air], &[0.9, 0.1]).unwrap();
        assert_eq!(fill.description(), "Argon:0.9+Air:0.1");

        // Fractions do not add up
        assert!(matches!(
            GasFill::mixture(&[GasKind::Argon, GasKind::Air], &[0.8, 0.1]),
            Err(FenestrationError::FractionSum(_))
        ));

        // Wrong arity
        assert_eq!(
            GasFill::mixture(&[GasKind::Argon, GasKind::Air], &[0.7, 0.2, 0.1]).unwrap_err(),
            FenestrationError::FractionCount {
                gases: 2,
                fractions: 3
            }
        );

        // Too few and too many gases
        assert_eq!(
            GasFill::mixture(&[GasKind::Argon], &[1.0]).unwrap_err(),
            FenestrationError::GasCount(1)
        );
        let five = [GasKind::Air; 5];
        assert_eq!(
            GasFill::mixture(&five, &[0.2; 5]).unwrap_err(),
            FenestrationError::GasCount(5)
        );

        // Rounding noise is tolerated
        assert!(GasFill::mixture(
            &[GasKind::Argon, GasKind::Air, GasKind::Krypton],
            &[0.7, 0.2, 0.1]
        )
        .is_ok());

        // Unknown names
        assert_eq!(
            GasFill::mixture_by_name(&["Argon", "Helium"], &[0.5, 0.5]).unwrap_err(),
            FenestrationError::UnknownGas("Helium".to_string())
        );
    }

    #[test]
    fn test_mixture_properties() {
        let t = 283.15;
        let fill = GasFill::mixture(&[GasKind::Argon, GasKind::Air], &[0.9, 0.1]).unwrap();
        let exp = 0.9 * ARGON.thermal_conductivity(t) + 0.1 * AIR.thermal_conductivity(t);
        assert!((fill.conductivity(t) - exp).abs() < 1e-12);

        let exp = 0.9 * ARGON.mass() + 0.1 * AIR.mass();
        assert!((fill.molecular_weight() - exp).abs() < 1e-9);

        // A mixture of a gas with itself is that gas
        let same = GasFill::mixture(&[GasKind::Krypton, GasKind::Krypton], &[0.5, 0.5]).unwrap();
        let pure = GasFill::Pure(GasKind::Krypton);
        assert!((same.viscosity(t) - pure.viscosity(t)).abs() < 1e-15);
        assert!((same.specific_heat(t) - pure.specific_heat(t)).abs() < 1e-9);
    }

    #[test]
    fn test_custom_gas() {
        // CO2
        let co2 = CustomGas::new([0.0146, 0., 0.], [0.000014, 0., 0.], [827.73, 0., 0.], 1.4, 44.)
            .unwrap();
        let fill = GasFill::Custom(co2);
        assert!((fill.conductivity(300.) - 0.0146).abs() < 1e-12);
        assert!((fill.specific_heat(250.) - 827.73).abs() < 1e-9);
        assert!((fill.molecular_weight() - 44.).abs() < 1e-12);
        assert_eq!(fill.description(), "Custom");

        let t = 283.15;
        let exp = 0.000014 * 827.73 / 0.0146;
        assert!((fill.prandtl(t) - exp).abs() < 1e-9);

        // Quadratic terms are used
        let g = CustomGas::new([0.001, 0.0001, 1e-8], [1e-5, 0., 0.], [1000., 0., 0.], 1., 30.).unwrap();
        let exp = 0.001 + 0.0001 * t + 1e-8 * t * t;
        assert!((g.thermal_conductivity(t) - exp).abs() < 1e-12);
        assert_eq!(g.specific_heat_ratio(), 1.);

        assert!(CustomGas::new([0.0146, 0., 0.], [0., 0., 0.], [827.73, 0., 0.], 1.4, 44.).is_err());
        assert!(CustomGas::new([0.0146, 0., 0.], [1e-5, 0., 0.], [827.73, 0., 0.], 0.9, 44.).is_err());
        assert!(CustomGas::new([0.0146, 0., 0.], [1e-5, 0., 0.], [827.73, 0., 0.], 1.4, 10.).is_err());
    }
}
