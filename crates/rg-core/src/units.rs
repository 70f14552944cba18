//! SI quantity types for the gas state variables.

use uom::si::f64::{
    AvailableEnergy, SpecificHeatCapacity, SpecificVolume, ThermodynamicTemperature,
};

pub use uom::si::f64::Pressure;

pub type SpecEnergy = AvailableEnergy;
pub type SpecHeat = SpecificHeatCapacity;
pub type SpecVolume = SpecificVolume;
pub type Temperature = ThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m3pkg(v: f64) -> SpecVolume {
    use uom::si::specific_volume::cubic_meter_per_kilogram;
    SpecVolume::new::<cubic_meter_per_kilogram>(v)
}

/// Specific internal energy or enthalpy.
#[inline]
pub fn jpkg(v: f64) -> SpecEnergy {
    use uom::si::available_energy::joule_per_kilogram;
    SpecEnergy::new::<joule_per_kilogram>(v)
}

/// Specific heat capacity or entropy.
#[inline]
pub fn jpkgk(v: f64) -> SpecHeat {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecHeat::new::<joule_per_kilogram_kelvin>(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::pressure::bar;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn constructors_store_si() {
        assert_eq!(pa(101_325.0).value, 101_325.0);
        assert_eq!(m3pkg(0.05).value, 0.05);
        assert_eq!(jpkg(1.0e5).value, 1.0e5);
        assert_eq!(jpkgk(2200.0).value, 2200.0);
    }

    #[test]
    fn conversions_out_of_si() {
        assert!((pa(5.0e5).get::<bar>() - 5.0).abs() < 1e-12);
        assert!((k(300.0).get::<degree_celsius>() - 26.85).abs() < 1e-9);
    }
}
