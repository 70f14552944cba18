//! Gas identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chemical family, used by the Chueh-Prausnitz rule to pick its coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChemicalClass {
    Paraffin,
    Olefin,
    Acetylene,
    Aromatic,
    Cycloalkane,
    Inorganic,
}

/// A pure substance known to the engine, or the `Mix` marker of a
/// pseudo-critical parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasKind {
    Methane,
    Ethane,
    Propane,
    NButane,
    IsoButane,
    NPentane,
    IsoPentane,
    Hexane,
    Heptane,
    Octane,
    Nonane,
    Decane,
    Ethylene,
    Propylene,
    Acetylene,
    Benzene,
    Toluene,
    Cyclohexane,
    Nitrogen,
    CarbonDioxide,
    HydrogenSulfide,
    Helium,
    Hydrogen,
    Oxygen,
    Argon,
    CarbonMonoxide,
    Water,
    /// Pseudo-critical parameters of a mixture.
    Mix,
}

impl GasKind {
    /// Every pure substance (without `Mix`).
    pub const ALL: [GasKind; 27] = [
        GasKind::Methane,
        GasKind::Ethane,
        GasKind::Propane,
        GasKind::NButane,
        GasKind::IsoButane,
        GasKind::NPentane,
        GasKind::IsoPentane,
        GasKind::Hexane,
        GasKind::Heptane,
        GasKind::Octane,
        GasKind::Nonane,
        GasKind::Decane,
        GasKind::Ethylene,
        GasKind::Propylene,
        GasKind::Acetylene,
        GasKind::Benzene,
        GasKind::Toluene,
        GasKind::Cyclohexane,
        GasKind::Nitrogen,
        GasKind::CarbonDioxide,
        GasKind::HydrogenSulfide,
        GasKind::Helium,
        GasKind::Hydrogen,
        GasKind::Oxygen,
        GasKind::Argon,
        GasKind::CarbonMonoxide,
        GasKind::Water,
    ];

    /// Stable numeric code, shared with persisted state logs.
    pub fn code(&self) -> u8 {
        match self {
            GasKind::Methane => 0x01,
            GasKind::Ethane => 0x02,
            GasKind::Propane => 0x03,
            GasKind::HydrogenSulfide => 0x04,
            GasKind::Hexane => 0x05,
            GasKind::Nitrogen => 0x06,
            GasKind::CarbonDioxide => 0x07,
            GasKind::Helium => 0x08,
            GasKind::Hydrogen => 0x09,
            GasKind::NButane => 0x0A,
            GasKind::IsoButane => 0x0B,
            GasKind::NPentane => 0x0C,
            GasKind::IsoPentane => 0x0D,
            GasKind::Oxygen => 0x0E,
            GasKind::Argon => 0x0F,
            GasKind::Heptane => 0x11,
            GasKind::Octane => 0x12,
            GasKind::Nonane => 0x15,
            GasKind::Decane => 0x16,
            GasKind::CarbonMonoxide => 0x17,
            GasKind::Water => 0x18,
            GasKind::Ethylene => 0x19,
            GasKind::Propylene => 0x1A,
            GasKind::Acetylene => 0x1B,
            GasKind::Benzene => 0x1C,
            GasKind::Toluene => 0x1D,
            GasKind::Cyclohexane => 0x1E,
            GasKind::Mix => 0xFF,
        }
    }

    /// Canonical key used in run files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            GasKind::Methane => "methane",
            GasKind::Ethane => "ethane",
            GasKind::Propane => "propane",
            GasKind::NButane => "n_butane",
            GasKind::IsoButane => "iso_butane",
            GasKind::NPentane => "n_pentane",
            GasKind::IsoPentane => "iso_pentane",
            GasKind::Hexane => "hexane",
            GasKind::Heptane => "heptane",
            GasKind::Octane => "octane",
            GasKind::Nonane => "nonane",
            GasKind::Decane => "decane",
            GasKind::Ethylene => "ethylene",
            GasKind::Propylene => "propylene",
            GasKind::Acetylene => "acetylene",
            GasKind::Benzene => "benzene",
            GasKind::Toluene => "toluene",
            GasKind::Cyclohexane => "cyclohexane",
            GasKind::Nitrogen => "nitrogen",
            GasKind::CarbonDioxide => "carbon_dioxide",
            GasKind::HydrogenSulfide => "hydrogen_sulfide",
            GasKind::Helium => "helium",
            GasKind::Hydrogen => "hydrogen",
            GasKind::Oxygen => "oxygen",
            GasKind::Argon => "argon",
            GasKind::CarbonMonoxide => "carbon_monoxide",
            GasKind::Water => "water",
            GasKind::Mix => "mix",
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            GasKind::Methane => "CH4",
            GasKind::Ethane => "C2H6",
            GasKind::Propane => "C3H8",
            GasKind::NButane => "n-C4H10",
            GasKind::IsoButane => "i-C4H10",
            GasKind::NPentane => "n-C5H12",
            GasKind::IsoPentane => "i-C5H12",
            GasKind::Hexane => "C6H14",
            GasKind::Heptane => "C7H16",
            GasKind::Octane => "C8H18",
            GasKind::Nonane => "C9H20",
            GasKind::Decane => "C10H22",
            GasKind::Ethylene => "C2H4",
            GasKind::Propylene => "C3H6",
            GasKind::Acetylene => "C2H2",
            GasKind::Benzene => "C6H6",
            GasKind::Toluene => "C7H8",
            GasKind::Cyclohexane => "C6H12",
            GasKind::Nitrogen => "N2",
            GasKind::CarbonDioxide => "CO2",
            GasKind::HydrogenSulfide => "H2S",
            GasKind::Helium => "He",
            GasKind::Hydrogen => "H2",
            GasKind::Oxygen => "O2",
            GasKind::Argon => "Ar",
            GasKind::CarbonMonoxide => "CO",
            GasKind::Water => "H2O",
            GasKind::Mix => "mix",
        }
    }

    pub fn class(&self) -> ChemicalClass {
        match self {
            GasKind::Methane
            | GasKind::Ethane
            | GasKind::Propane
            | GasKind::NButane
            | GasKind::IsoButane
            | GasKind::NPentane
            | GasKind::IsoPentane
            | GasKind::Hexane
            | GasKind::Heptane
            | GasKind::Octane
            | GasKind::Nonane
            | GasKind::Decane => ChemicalClass::Paraffin,
            GasKind::Ethylene | GasKind::Propylene => ChemicalClass::Olefin,
            GasKind::Acetylene => ChemicalClass::Acetylene,
            GasKind::Benzene | GasKind::Toluene => ChemicalClass::Aromatic,
            GasKind::Cyclohexane => ChemicalClass::Cycloalkane,
            _ => ChemicalClass::Inorganic,
        }
    }

    pub fn is_noble(&self) -> bool {
        matches!(self, GasKind::Helium | GasKind::Argon)
    }

    pub fn is_mix(&self) -> bool {
        matches!(self, GasKind::Mix)
    }
}

impl fmt::Display for GasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for GasKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_uppercase();
        match norm.as_str() {
            "METHANE" | "CH4" => Ok(GasKind::Methane),
            "ETHANE" | "C2H6" => Ok(GasKind::Ethane),
            "PROPANE" | "C3H8" => Ok(GasKind::Propane),
            "NBUTANE" | "BUTANE" | "NC4H10" | "NC4" => Ok(GasKind::NButane),
            "ISOBUTANE" | "IBUTANE" | "IC4H10" | "IC4" => Ok(GasKind::IsoButane),
            "NPENTANE" | "PENTANE" | "NC5H12" | "NC5" => Ok(GasKind::NPentane),
            "ISOPENTANE" | "IPENTANE" | "IC5H12" | "IC5" => Ok(GasKind::IsoPentane),
            "HEXANE" | "NHEXANE" | "C6H14" => Ok(GasKind::Hexane),
            "HEPTANE" | "NHEPTANE" | "C7H16" => Ok(GasKind::Heptane),
            "OCTANE" | "NOCTANE" | "C8H18" => Ok(GasKind::Octane),
            "NONANE" | "NNONANE" | "C9H20" => Ok(GasKind::Nonane),
            "DECANE" | "NDECANE" | "C10H22" => Ok(GasKind::Decane),
            "ETHYLENE" | "ETHENE" | "C2H4" => Ok(GasKind::Ethylene),
            "PROPYLENE" | "PROPENE" | "C3H6" => Ok(GasKind::Propylene),
            "ACETYLENE" | "ETHYNE" | "C2H2" => Ok(GasKind::Acetylene),
            "BENZENE" | "C6H6" => Ok(GasKind::Benzene),
            "TOLUENE" | "C7H8" => Ok(GasKind::Toluene),
            "CYCLOHEXANE" | "C6H12" => Ok(GasKind::Cyclohexane),
            "NITROGEN" | "N2" => Ok(GasKind::Nitrogen),
            "CARBONDIOXIDE" | "CO2" => Ok(GasKind::CarbonDioxide),
            "HYDROGENSULFIDE" | "H2S" => Ok(GasKind::HydrogenSulfide),
            "HELIUM" | "HE" => Ok(GasKind::Helium),
            "HYDROGEN" | "H2" => Ok(GasKind::Hydrogen),
            "OXYGEN" | "O2" => Ok(GasKind::Oxygen),
            "ARGON" | "AR" => Ok(GasKind::Argon),
            "CARBONMONOXIDE" | "CO" => Ok(GasKind::CarbonMonoxide),
            "WATER" | "H2O" => Ok(GasKind::Water),
            "MIX" | "MIXTURE" => Ok(GasKind::Mix),
            _ => Err("unknown gas"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parse_aliases() {
        assert_eq!("CH4".parse::<GasKind>().unwrap(), GasKind::Methane);
        assert_eq!("n-butane".parse::<GasKind>().unwrap(), GasKind::NButane);
        assert_eq!("i-C4H10".parse::<GasKind>().unwrap(), GasKind::IsoButane);
        assert_eq!("Carbon Dioxide".parse::<GasKind>().unwrap(), GasKind::CarbonDioxide);
        assert!("unobtainium".parse::<GasKind>().is_err());
    }

    #[test]
    fn canonical_key_roundtrip() {
        for gas in GasKind::ALL {
            assert_eq!(gas.key().parse::<GasKind>().unwrap(), gas);
            assert_eq!(gas.formula().parse::<GasKind>().unwrap(), gas);
        }
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<u8> = GasKind::ALL.iter().map(GasKind::code).collect();
        assert_eq!(codes.len(), GasKind::ALL.len());
        assert!(!codes.contains(&GasKind::Mix.code()));
    }

    #[test]
    fn chemical_classes() {
        assert_eq!(GasKind::Toluene.class(), ChemicalClass::Aromatic);
        assert_eq!(GasKind::Acetylene.class(), ChemicalClass::Acetylene);
        assert_eq!(GasKind::Decane.class(), ChemicalClass::Paraffin);
        assert_eq!(GasKind::HydrogenSulfide.class(), ChemicalClass::Inorganic);
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&GasKind::CarbonDioxide).unwrap();
        assert_eq!(json, "\"carbon_dioxide\"");
        let back: GasKind = serde_json::from_str("\"iso_butane\"").unwrap();
        assert_eq!(back, GasKind::IsoButane);
    }
}
