//! Mixture component lists.

use crate::catalog;
use crate::error::{EosResult, GasMixError, InitError};
use crate::gas::GasKind;
use crate::parameters::ConstParameters;
use rg_core::numeric::{Real, Tolerances, nearly_equal};
use serde::Serialize;

/// Allowed deviation of the raw fraction sum from 1.
pub const FRACTION_SUM_TOLERANCE: Real = 0.03;

/// Reject a raw fraction sum outside `1 ± 0.03`.
pub fn check_fraction_sum(sum: Real) -> EosResult<()> {
    if sum.is_finite() && (sum - 1.0).abs() <= FRACTION_SUM_TOLERANCE {
        Ok(())
    } else {
        Err(InitError::CompositionSum { sum }.into())
    }
}

fn validated_sum(fractions: impl Iterator<Item = Real>) -> EosResult<Real> {
    let mut sum = 0.0;
    for frac in fractions {
        if !frac.is_finite() || frac < 0.0 {
            return Err(InitError::InvalidArg {
                what: "mole fraction is negative or non-finite",
            }
            .into());
        }
        sum += frac;
    }
    if sum <= 0.0 {
        return Err(InitError::InvalidArg {
            what: "mole fractions sum to zero",
        }
        .into());
    }
    Ok(sum)
}

/// Gas composition by mole fraction.
///
/// Stored normalized to 1; the sum of the fractions as given is kept in
/// [`Composition::input_sum`] so callers can apply their own tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    items: Vec<(GasKind, Real)>,
    input_sum: Real,
}

impl Composition {
    pub fn pure(gas: GasKind) -> Self {
        Self {
            items: vec![(gas, 1.0)],
            input_sum: 1.0,
        }
    }

    /// Validate fractions (finite, non-negative, positive sum) and normalize.
    /// Repeated gases are merged.
    pub fn new_mole_fractions(fractions: Vec<(GasKind, Real)>) -> EosResult<Self> {
        if fractions.is_empty() {
            return Err(GasMixError::EmptyComponents.into());
        }
        let sum = validated_sum(fractions.iter().map(|(_, f)| *f))?;

        let mut items: Vec<(GasKind, Real)> = Vec::with_capacity(fractions.len());
        for (gas, frac) in fractions {
            let frac = frac / sum;
            if frac <= 1e-15 {
                continue;
            }
            match items.iter_mut().find(|(g, _)| *g == gas) {
                Some((_, existing)) => *existing += frac,
                None => items.push((gas, frac)),
            }
        }
        Ok(Self {
            items,
            input_sum: sum,
        })
    }

    pub fn mole_fraction(&self, gas: GasKind) -> Real {
        self.items
            .iter()
            .find(|(g, _)| *g == gas)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    pub fn is_pure(&self) -> Option<GasKind> {
        match self.items.as_slice() {
            [(gas, frac)] if nearly_equal(*frac, 1.0, Tolerances::default()) => Some(*gas),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GasKind, Real)> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn input_sum(&self) -> Real {
        self.input_sum
    }

    /// Mixture molar mass [kg/kmol] from catalog data.
    pub fn molar_mass(&self) -> Real {
        self.items
            .iter()
            .filter_map(|(gas, x)| catalog::lookup(*gas).map(|e| e.molar_mass * x))
            .sum()
    }
}

/// One component of a cubic-model mixture: a catalog gas, optionally with
/// custom constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MixtureComponent {
    pub gas: GasKind,
    pub fraction: Real,
    pub constants: Option<ConstParameters>,
}

impl MixtureComponent {
    pub fn catalog(gas: GasKind, fraction: Real) -> Self {
        Self {
            gas,
            fraction,
            constants: None,
        }
    }

    pub fn custom(constants: ConstParameters, fraction: Real) -> Self {
        Self {
            gas: constants.gas(),
            fraction,
            constants: Some(constants),
        }
    }

    /// Constants of the component: the custom set, else the catalog's.
    pub fn const_parameters(&self) -> EosResult<ConstParameters> {
        if let Some(constants) = self.constants {
            return Ok(constants);
        }
        match catalog::lookup(self.gas) {
            Some(entry) => entry.const_parameters(),
            None => Err(InitError::UnknownGas {
                name: self.gas.key().to_string(),
            }
            .into()),
        }
    }
}

/// A mixture component with its constants looked up and fraction normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedComponent {
    pub fraction: Real,
    pub constants: ConstParameters,
    /// Ideal-gas `cv0` [J/(kg·K)].
    pub cv0: Real,
}

/// Ideal-gas `cv0` for a set of constants: catalog `cp0` when the gas is
/// known, else `cp0 = 4R`.
pub fn ideal_cv0(constants: &ConstParameters) -> Real {
    match catalog::lookup(constants.gas()) {
        Some(entry) => {
            catalog::cv0_from_molar_cp0(entry.cp0_molar, constants.molar_mass())
        }
        None => catalog::default_cv0(constants),
    }
}

/// Resolve constants for every component and normalize fractions.
pub fn resolve_components(components: &[MixtureComponent]) -> EosResult<Vec<ResolvedComponent>> {
    if components.is_empty() {
        return Err(GasMixError::EmptyComponents.into());
    }
    let sum = validated_sum(components.iter().map(|c| c.fraction))?;
    components
        .iter()
        .map(|component| {
            let constants = component.const_parameters()?;
            Ok(ResolvedComponent {
                fraction: component.fraction / sum,
                cv0: ideal_cv0(&constants),
                constants,
            })
        })
        .collect()
}

/// Raw fraction sum of a component list.
pub fn components_sum(components: &[MixtureComponent]) -> Real {
    components.iter().map(|c| c.fraction).sum()
}

/// Mass-fraction-weighted `cv0` of resolved components.
pub fn mixture_cv0(components: &[ResolvedComponent]) -> Real {
    let molar_mass: Real = components
        .iter()
        .map(|c| c.fraction * c.constants.molar_mass())
        .sum();
    components
        .iter()
        .map(|c| c.fraction * c.constants.molar_mass() / molar_mass * c.cv0)
        .sum()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_sum_is_one(fracs in prop::collection::vec(0.0_f64..1.0_f64, 1..6)) {
            let gases = [
                GasKind::Methane,
                GasKind::Ethane,
                GasKind::Propane,
                GasKind::Nitrogen,
                GasKind::CarbonDioxide,
            ];
            let input: Vec<(GasKind, Real)> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (gases[i % gases.len()], f))
                .collect();

            if let Ok(comp) = Composition::new_mole_fractions(input) {
                let sum: Real = comp.iter().map(|(_, f)| f).sum();
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(sum, 1.0, tol));
            }
        }
    }
}
