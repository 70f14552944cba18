//! Built-in critical constants and ideal-gas heat capacities.

use crate::error::EosResult;
use crate::gas::GasKind;
use crate::parameters::{ConstParameters, UNIVERSAL_R};
use rg_core::numeric::Real;

/// Critical data of one catalog gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub gas: GasKind,
    pub display_name: &'static str,
    /// Molar mass [kg/kmol].
    pub molar_mass: Real,
    /// Critical temperature [K].
    pub tc: Real,
    /// Critical pressure [MPa].
    pub pc_mpa: Real,
    /// Molar critical volume [cm³/mol].
    pub vc_molar: Real,
    pub zc: Real,
    pub acentric: Real,
    /// Ideal-gas isobaric heat capacity near 298 K [J/(mol·K)].
    pub cp0_molar: Real,
}

impl CatalogEntry {
    /// Critical specific volume [m³/kg].
    pub fn vc(&self) -> Real {
        self.vc_molar / 1000.0 / self.molar_mass
    }

    pub fn pc(&self) -> Real {
        self.pc_mpa * 1.0e6
    }

    /// Constants built from the tabulated critical volume.
    pub fn const_parameters(&self) -> EosResult<ConstParameters> {
        ConstParameters::new(
            self.gas,
            Some(self.vc()),
            None,
            self.pc(),
            self.tc,
            self.molar_mass,
            self.acentric,
        )
    }

    /// Ideal-gas isochoric heat capacity [J/(kg·K)].
    pub fn cv0(&self) -> Real {
        cv0_from_molar_cp0(self.cp0_molar, self.molar_mass)
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }
        self.gas.key().contains(&query)
            || self.gas.formula().to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
    }
}

/// `cv0 = cp0 − R` per kilogram, from a molar `cp0` in J/(mol·K).
pub fn cv0_from_molar_cp0(cp0_molar: Real, molar_mass: Real) -> Real {
    (cp0_molar * 1000.0 - UNIVERSAL_R) / molar_mass
}

/// Fallback ideal-gas `cv0` for custom constants: `cp0 = 4R`.
pub fn default_cv0(const_params: &ConstParameters) -> Real {
    3.0 * const_params.r()
}

macro_rules! entry {
    ($gas:ident, $name:literal, $m:expr, $tc:expr, $pc:expr, $vc:expr, $zc:expr, $w:expr, $cp0:expr) => {
        CatalogEntry {
            gas: GasKind::$gas,
            display_name: $name,
            molar_mass: $m,
            tc: $tc,
            pc_mpa: $pc,
            vc_molar: $vc,
            zc: $zc,
            acentric: $w,
            cp0_molar: $cp0,
        }
    };
}

#[rustfmt::skip]
const GAS_CATALOG: [CatalogEntry; 27] = [
    entry!(Methane,         "Methane",          16.043,  190.56, 4.599,  98.6,  0.286,  0.011, 35.7),
    entry!(Ethane,          "Ethane",           30.07,   305.32, 4.872, 145.5,  0.279,  0.099, 52.5),
    entry!(Propane,         "Propane",          44.097,  369.83, 4.248, 200.0,  0.276,  0.152, 73.6),
    entry!(NButane,         "n-Butane",         58.123,  425.12, 3.796, 255.0,  0.274,  0.200, 98.5),
    entry!(IsoButane,       "Isobutane",        58.123,  407.85, 3.640, 262.7,  0.278,  0.186, 96.7),
    entry!(NPentane,        "n-Pentane",        72.15,   469.7,  3.370, 313.0,  0.270,  0.252, 120.1),
    entry!(IsoPentane,      "Isopentane",       72.15,   460.39, 3.381, 306.0,  0.270,  0.229, 118.9),
    entry!(Hexane,          "n-Hexane",         86.177,  507.6,  3.025, 371.0,  0.266,  0.300, 143.1),
    entry!(Heptane,         "n-Heptane",       100.204,  540.2,  2.740, 428.0,  0.261,  0.350, 165.98),
    entry!(Octane,          "n-Octane",        114.231,  568.7,  2.490, 492.0,  0.259,  0.399, 188.9),
    entry!(Nonane,          "n-Nonane",        128.258,  594.6,  2.290, 555.0,  0.257,  0.445, 211.7),
    entry!(Decane,          "n-Decane",        142.285,  617.7,  2.110, 624.0,  0.256,  0.490, 234.6),
    entry!(Ethylene,        "Ethylene",         28.054,  282.34, 5.041, 131.1,  0.281,  0.087, 42.9),
    entry!(Propylene,       "Propylene",        42.081,  364.9,  4.600, 184.6,  0.280,  0.142, 64.3),
    entry!(Acetylene,       "Acetylene",        26.038,  308.3,  6.138, 112.7,  0.270,  0.189, 44.0),
    entry!(Benzene,         "Benzene",          78.114,  562.05, 4.895, 256.0,  0.268,  0.210, 82.4),
    entry!(Toluene,         "Toluene",          92.141,  591.75, 4.108, 316.0,  0.264,  0.264, 103.6),
    entry!(Cyclohexane,     "Cyclohexane",      84.161,  553.5,  4.073, 308.0,  0.273,  0.211, 106.3),
    entry!(Nitrogen,        "Nitrogen",         28.0135, 126.2,  3.398,  90.1,  0.289,  0.037, 29.12),
    entry!(CarbonDioxide,   "Carbon dioxide",   44.01,   304.12, 7.374,  94.07, 0.274,  0.225, 37.12),
    entry!(HydrogenSulfide, "Hydrogen sulfide", 34.082,  373.4,  8.963,  98.5,  0.284,  0.090, 34.2),
    entry!(Helium,          "Helium",            4.0026,   5.19, 0.227,  57.3,  0.302, -0.390, 20.79),
    entry!(Hydrogen,        "Hydrogen",          2.0159,  33.19, 1.313,  64.1,  0.305, -0.216, 28.84),
    entry!(Oxygen,          "Oxygen",           31.9988, 154.58, 5.043,  73.4,  0.288,  0.022, 29.38),
    entry!(Argon,           "Argon",            39.948,  150.86, 4.898,  74.57, 0.291, -0.002, 20.79),
    entry!(CarbonMonoxide,  "Carbon monoxide",  28.01,   132.85, 3.494,  93.1,  0.292,  0.045, 29.14),
    entry!(Water,           "Water",            18.0153, 647.14, 22.064, 55.95, 0.229,  0.344, 33.58),
];

pub fn gas_catalog() -> &'static [CatalogEntry] {
    &GAS_CATALOG
}

/// Catalog entry of a gas, `None` for [`GasKind::Mix`].
pub fn lookup(gas: GasKind) -> Option<&'static CatalogEntry> {
    GAS_CATALOG.iter().find(|entry| entry.gas == gas)
}

pub fn filter_catalog(query: &str) -> Vec<CatalogEntry> {
    gas_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    #[test]
    fn every_gas_has_one_entry() {
        let mut seen = HashSet::new();
        for entry in gas_catalog() {
            assert!(seen.insert(entry.gas), "duplicate entry: {}", entry.gas);
        }
        for gas in GasKind::ALL {
            assert!(lookup(gas).is_some(), "missing entry: {gas}");
        }
        assert!(lookup(GasKind::Mix).is_none());
    }

    #[test]
    fn methane_specific_volume() {
        let methane = lookup(GasKind::Methane).unwrap();
        assert_relative_eq!(methane.vc(), 0.0986 / 16.043, max_relative = 1e-12);
        let cp = methane.const_parameters().unwrap();
        // tabulated Zc and the one derived from Vc agree to table precision
        assert!((cp.zc() - methane.zc).abs() < 0.01);
    }

    #[test]
    fn catalog_zc_is_consistent_with_vc() {
        for entry in gas_catalog() {
            let cp = entry.const_parameters().unwrap();
            assert!(
                (cp.zc() - entry.zc).abs() < 0.015,
                "{}: derived zc {} vs table {}",
                entry.gas,
                cp.zc(),
                entry.zc
            );
        }
    }

    #[test]
    fn cv0_of_monatomic_gas_is_three_halves_r() {
        let helium = lookup(GasKind::Helium).unwrap();
        let r = UNIVERSAL_R / helium.molar_mass;
        assert_relative_eq!(helium.cv0(), 1.5 * r, max_relative = 2e-3);
    }

    #[test]
    fn search_by_formula_and_name() {
        assert!(filter_catalog("co2").iter().any(|e| e.gas == GasKind::CarbonDioxide));
        assert!(filter_catalog("toluene").iter().any(|e| e.gas == GasKind::Toluene));
        assert_eq!(filter_catalog("").len(), GasKind::ALL.len());
    }
}
