//! Binary interaction parameters `kᵢⱼ` of the cubic mixing rules.
//!
//! Lookup is symmetric; unlisted pairs (and every gas with itself) are 0.

use crate::gas::GasKind::{self, *};
use rg_core::numeric::Real;

type Entry = (GasKind, GasKind, Real);

/// Soave-Redlich-Kwong interaction parameters.
#[rustfmt::skip]
const SRK_KIJ: &[Entry] = &[
    (CarbonDioxide, Methane, 0.12),
    (CarbonDioxide, Ethylene, 0.15),
    (CarbonDioxide, Ethane, 0.15),
    (CarbonDioxide, Propylene, 0.08),
    (CarbonDioxide, Propane, 0.15),
    (CarbonDioxide, IsoButane, 0.15),
    (CarbonDioxide, NButane, 0.15),
    (CarbonDioxide, IsoPentane, 0.15),
    (CarbonDioxide, NPentane, 0.15),
    (CarbonDioxide, Hexane, 0.15),
    (CarbonDioxide, Heptane, 0.15),
    (CarbonDioxide, Octane, 0.15),
    (CarbonDioxide, Nonane, 0.15),
    (CarbonDioxide, Decane, 0.15),
    (CarbonDioxide, Cyclohexane, 0.15),
    (CarbonDioxide, Benzene, 0.15),
    (CarbonDioxide, Toluene, 0.15),

    (HydrogenSulfide, Methane, 0.08),
    (HydrogenSulfide, Ethylene, 0.07),
    (HydrogenSulfide, Ethane, 0.07),
    (HydrogenSulfide, Propylene, 0.07),
    (HydrogenSulfide, Propane, 0.07),
    (HydrogenSulfide, IsoButane, 0.06),
    (HydrogenSulfide, NButane, 0.06),
    (HydrogenSulfide, IsoPentane, 0.06),
    (HydrogenSulfide, NPentane, 0.06),
    (HydrogenSulfide, Hexane, 0.05),
    (HydrogenSulfide, Heptane, 0.04),
    (HydrogenSulfide, Octane, 0.04),
    (HydrogenSulfide, Nonane, 0.03),
    (HydrogenSulfide, Decane, 0.03),
    (HydrogenSulfide, CarbonDioxide, 0.12),
    (HydrogenSulfide, Cyclohexane, 0.03),
    (HydrogenSulfide, Benzene, 0.03),
    (HydrogenSulfide, Toluene, 0.03),

    (Nitrogen, Methane, 0.02),
    (Nitrogen, Ethylene, 0.04),
    (Nitrogen, Ethane, 0.06),
    (Nitrogen, Propylene, 0.06),
    (Nitrogen, Propane, 0.08),
    (Nitrogen, IsoButane, 0.08),
    (Nitrogen, NButane, 0.08),
    (Nitrogen, IsoPentane, 0.08),
    (Nitrogen, NPentane, 0.08),
    (Nitrogen, Hexane, 0.08),
    (Nitrogen, Heptane, 0.08),
    (Nitrogen, Octane, 0.08),
    (Nitrogen, Nonane, 0.08),
    (Nitrogen, Decane, 0.08),
    (Nitrogen, Cyclohexane, 0.08),
    (Nitrogen, Benzene, 0.08),
    (Nitrogen, Toluene, 0.08),
    (Nitrogen, CarbonDioxide, 0.0),

    (CarbonMonoxide, Methane, -0.02),
    (CarbonMonoxide, CarbonDioxide, -0.04),
];

/// Peng-Robinson interaction parameters.
#[rustfmt::skip]
const PR_KIJ: &[Entry] = &[
    (Methane, CarbonDioxide, 0.0919),
    (Methane, Nitrogen, 0.0311),
    (Methane, HydrogenSulfide, 0.08),
    (Ethane, CarbonDioxide, 0.1322),
    (Ethane, Nitrogen, 0.05),
    (Propane, CarbonDioxide, 0.1241),
    (Propane, Nitrogen, 0.0852),
    (Nitrogen, CarbonDioxide, -0.017),
    (HydrogenSulfide, CarbonDioxide, 0.0974),
    (Nitrogen, HydrogenSulfide, 0.1767),
];

fn lookup(table: &[Entry], a: GasKind, b: GasKind) -> Real {
    table
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, k)| *k)
        .unwrap_or(0.0)
}

pub fn srk_kij(a: GasKind, b: GasKind) -> Real {
    lookup(SRK_KIJ, a, b)
}

pub fn pr_kij(a: GasKind, b: GasKind) -> Real {
    lookup(PR_KIJ, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_symmetric() {
        for table in [SRK_KIJ, PR_KIJ] {
            for &(a, b, k) in table {
                assert_eq!(lookup(table, a, b), k);
                assert_eq!(lookup(table, b, a), k);
            }
        }
    }

    #[test]
    fn no_pair_listed_twice() {
        for table in [SRK_KIJ, PR_KIJ] {
            for (i, &(a, b, _)) in table.iter().enumerate() {
                let dup = table[i + 1..]
                    .iter()
                    .any(|&(x, y, _)| (x == a && y == b) || (x == b && y == a));
                assert!(!dup, "{a}-{b} listed twice");
            }
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(srk_kij(Methane, CarbonDioxide), 0.12);
        assert_eq!(srk_kij(Toluene, HydrogenSulfide), 0.03);
        assert_eq!(srk_kij(Methane, CarbonMonoxide), -0.02);
        assert_eq!(pr_kij(CarbonDioxide, Ethane), 0.1322);
        assert_eq!(pr_kij(HydrogenSulfide, Nitrogen), 0.1767);
    }

    #[test]
    fn unlisted_and_self_pairs_are_zero() {
        assert_eq!(srk_kij(Methane, Methane), 0.0);
        assert_eq!(srk_kij(Methane, Ethane), 0.0);
        assert_eq!(pr_kij(Helium, Hydrogen), 0.0);
    }
}
