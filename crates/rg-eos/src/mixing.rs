//! Pseudo-critical mixing rules for cubic-model mixtures.
//!
//! Each rule collapses a component list into one [`ConstParameters`] with
//! the `Mix` identity. Molar critical volumes are used throughout; the
//! result is converted back per kilogram of mixture.

use crate::composition::ResolvedComponent;
use crate::error::{EosResult, GasMixError, InitError};
use crate::gas::{ChemicalClass, GasKind};
use crate::model::{ModelIdentity, ModelKind};
use crate::parameters::{ConstParameters, UNIVERSAL_R};
use rg_core::numeric::Real;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixingRule {
    /// Mole-weighted critical constants, geometric-mean acentric factor.
    MoleAverage,
    /// Redlich-Kwong two-parameter rule with `Zc = 1/3`.
    RedlichKwong2,
    /// Lee (Li) volume-fraction rule.
    Lee,
    /// Chueh-Prausnitz pairwise rule.
    ChuehPrausnitz,
}

impl MixingRule {
    pub const ALL: [MixingRule; 4] = [
        MixingRule::MoleAverage,
        MixingRule::RedlichKwong2,
        MixingRule::Lee,
        MixingRule::ChuehPrausnitz,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MixingRule::MoleAverage => "mole_average",
            MixingRule::RedlichKwong2 => "redlich_kwong2",
            MixingRule::Lee => "lee",
            MixingRule::ChuehPrausnitz => "chueh_prausnitz",
        }
    }

    /// Rule used when a run does not choose one.
    pub fn default_for(identity: ModelIdentity) -> Self {
        match identity.kind {
            ModelKind::IdealGas | ModelKind::NgGost => MixingRule::MoleAverage,
            ModelKind::RedlichKwong => MixingRule::RedlichKwong2,
            ModelKind::PengRobinson => MixingRule::ChuehPrausnitz,
        }
    }

    /// Pseudo-critical constants of normalized components.
    pub fn pseudo_critical(&self, components: &[ResolvedComponent]) -> EosResult<ConstParameters> {
        if components.is_empty() {
            return Err(GasMixError::EmptyComponents.into());
        }
        let molar_mass = weighted(components, |c| c.molar_mass());
        match self {
            MixingRule::MoleAverage => mole_average(components, molar_mass),
            MixingRule::RedlichKwong2 => redlich_kwong2(components, molar_mass),
            MixingRule::Lee => lee(components, molar_mass),
            MixingRule::ChuehPrausnitz => chueh_prausnitz(components, molar_mass),
        }
    }
}

impl fmt::Display for MixingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for MixingRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "mole_average" | "average" | "mean" => Ok(MixingRule::MoleAverage),
            "redlich_kwong2" | "rk2" | "redlich_kwong" => Ok(MixingRule::RedlichKwong2),
            "lee" | "li" => Ok(MixingRule::Lee),
            "chueh_prausnitz" | "cp" => Ok(MixingRule::ChuehPrausnitz),
            _ => Err(format!("Unknown mixing rule: {s}")),
        }
    }
}

fn weighted(components: &[ResolvedComponent], f: impl Fn(&ConstParameters) -> Real) -> Real {
    components
        .iter()
        .map(|c| c.fraction * f(&c.constants))
        .sum()
}

/// `exp(Σ y·ln ω)`; the arithmetic mean when any factor is not positive.
fn geometric_acentric(components: &[ResolvedComponent]) -> Real {
    if components.iter().all(|c| c.constants.acentric() > 0.0) {
        weighted(components, |c| c.acentric().ln()).exp()
    } else {
        weighted(components, |c| c.acentric())
    }
}

fn mix_parameters(
    vc_molar: Option<Real>,
    zc: Option<Real>,
    pc: Real,
    tc: Real,
    molar_mass: Real,
    acentric: Real,
) -> EosResult<ConstParameters> {
    ConstParameters::new(
        GasKind::Mix,
        vc_molar.map(|v| v / molar_mass),
        zc,
        pc,
        tc,
        molar_mass,
        acentric,
    )
}

fn mole_average(components: &[ResolvedComponent], molar_mass: Real) -> EosResult<ConstParameters> {
    mix_parameters(
        Some(weighted(components, |c| c.vc_molar())),
        None,
        weighted(components, |c| c.pc()),
        weighted(components, |c| c.tc()),
        molar_mass,
        geometric_acentric(components),
    )
}

fn redlich_kwong2(components: &[ResolvedComponent], molar_mass: Real) -> EosResult<ConstParameters> {
    let sqrt_sum = weighted(components, |c| (c.tc().powf(2.5) / c.pc()).sqrt());
    let ratio_sum = weighted(components, |c| c.tc() / c.pc());
    let tc = sqrt_sum.powf(4.0 / 3.0) / ratio_sum.powf(2.0 / 3.0);
    mix_parameters(
        None,
        Some(1.0 / 3.0),
        tc / ratio_sum,
        tc,
        molar_mass,
        weighted(components, |c| c.acentric()),
    )
}

fn lee(components: &[ResolvedComponent], molar_mass: Real) -> EosResult<ConstParameters> {
    let vc = weighted(components, |c| c.vc_molar());
    let tc: Real = components
        .iter()
        .map(|c| c.fraction * c.constants.vc_molar() / vc * c.constants.tc())
        .sum();
    let zc = weighted(components, |c| c.zc());
    mix_parameters(
        Some(vc),
        None,
        zc * UNIVERSAL_R * tc / vc,
        tc,
        molar_mass,
        weighted(components, |c| c.acentric()),
    )
}

/// Coefficient rows `A + B·d + C·d² + D·d³ + E·d⁴` for `d ≤ 0.5`.
type Polynomial = [Real; 5];

const TC_DEFAULT: Polynomial = [-0.0076, 0.287, -1.343, 5.443, -3.038];
const TC_AROMATIC: Polynomial = [-0.0219, 1.227, -24.277, 147.673, -259.433];
const TC_HYDROGEN_SULFIDE: Polynomial = [-0.0479, -5.725, 70.974, -161.319, 0.0];
const TC_CARBON_DIOXIDE: Polynomial = [-0.0953, 2.185, -33.985, 179.068, -264.522];

const VC_DEFAULT: Polynomial = [-0.4957, 17.1185, -168.56, 587.05, -698.89];
const VC_AROMATIC: Polynomial = [0.0; 5];

/// Above this deviation only the `d ≤ 0.5` table is available.
const MAX_TABULATED_DEVIATION: Real = 0.5;

/// Acetylene and CO pairs carry no fitted coefficients of their own.
const TC_ACETYLENE: Polynomial = TC_DEFAULT;
const TC_CARBON_MONOXIDE: Polynomial = TC_DEFAULT;

/// Chemical class of a component pair, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairClass {
    Aromatic,
    HydrogenSulfide,
    CarbonDioxide,
    Acetylene,
    CarbonMonoxide,
    Default,
}

impl PairClass {
    fn of(a: GasKind, b: GasKind) -> Self {
        let either = |gas: GasKind| a == gas || b == gas;
        if a.class() == ChemicalClass::Aromatic && b.class() == ChemicalClass::Aromatic {
            PairClass::Aromatic
        } else if either(GasKind::HydrogenSulfide) {
            PairClass::HydrogenSulfide
        } else if either(GasKind::CarbonDioxide) {
            PairClass::CarbonDioxide
        } else if either(GasKind::Acetylene) {
            PairClass::Acetylene
        } else if either(GasKind::CarbonMonoxide) {
            PairClass::CarbonMonoxide
        } else {
            PairClass::Default
        }
    }

    fn tc_coefficients(&self) -> &'static Polynomial {
        match self {
            PairClass::Aromatic => &TC_AROMATIC,
            PairClass::HydrogenSulfide => &TC_HYDROGEN_SULFIDE,
            PairClass::CarbonDioxide => &TC_CARBON_DIOXIDE,
            PairClass::Acetylene => &TC_ACETYLENE,
            PairClass::CarbonMonoxide => &TC_CARBON_MONOXIDE,
            PairClass::Default => &TC_DEFAULT,
        }
    }

    fn vc_coefficients(&self) -> &'static Polynomial {
        match self {
            PairClass::Aromatic => &VC_AROMATIC,
            _ => &VC_DEFAULT,
        }
    }
}

fn polynomial(coefs: &Polynomial, d: Real) -> Real {
    coefs.iter().rev().fold(0.0, |acc, c| acc * d + c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantity {
    Temperature,
    Volume,
}

/// Interaction factor of one pair, falling back to the default row (and
/// logging it) past the tabulated range.
fn interaction(class: PairClass, quantity: Quantity, d: Real, a: GasKind, b: GasKind) -> Real {
    let class = if d > MAX_TABULATED_DEVIATION {
        warn!(%a, %b, d, ?quantity, "Chueh-Prausnitz deviation above 0.5, default coefficients used");
        PairClass::Default
    } else {
        class
    };
    let coefs = match quantity {
        Quantity::Temperature => class.tc_coefficients(),
        Quantity::Volume => class.vc_coefficients(),
    };
    polynomial(coefs, d)
}

fn chueh_prausnitz(components: &[ResolvedComponent], molar_mass: Real) -> EosResult<ConstParameters> {
    let surface: Vec<Real> = components
        .iter()
        .map(|c| c.constants.vc_molar().powf(2.0 / 3.0))
        .collect();
    let total: Real = components
        .iter()
        .zip(&surface)
        .map(|(c, s)| c.fraction * s)
        .sum();
    if !(total > 0.0) {
        return Err(InitError::NonPositive {
            what: "Chueh-Prausnitz surface fraction sum",
        }
        .into());
    }
    let theta: Vec<Real> = components
        .iter()
        .zip(&surface)
        .map(|(c, s)| c.fraction * s / total)
        .collect();

    let mut tc: Real = components
        .iter()
        .zip(&theta)
        .map(|(c, th)| th * c.constants.tc())
        .sum();
    let mut vc: Real = components
        .iter()
        .zip(&theta)
        .map(|(c, th)| th * c.constants.vc_molar())
        .sum();

    for (i, ci) in components.iter().enumerate() {
        for (j, cj) in components.iter().enumerate() {
            if i == j {
                continue;
            }
            let (a, b) = (ci.constants, cj.constants);
            let class = PairClass::of(a.gas(), b.gas());

            let d_t = (a.tc() - b.tc()).abs() / (a.tc() + b.tc());
            let psi_t = interaction(class, Quantity::Temperature, d_t, a.gas(), b.gas());
            tc += theta[i] * theta[j] * psi_t * (a.tc() + b.tc()) / 2.0;

            let d_v = (surface[i] - surface[j]).abs() / (surface[i] + surface[j]);
            let psi_v = interaction(class, Quantity::Volume, d_v, a.gas(), b.gas());
            vc += theta[i] * theta[j] * psi_v * (a.vc_molar() + b.vc_molar()) / 2.0;
        }
    }

    let acentric = weighted(components, |c| c.acentric());
    let pc = UNIVERSAL_R * tc * (0.291 - 0.08 * acentric) / vc;
    mix_parameters(Some(vc), None, pc, tc, molar_mass, acentric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::ideal_cv0;
    use approx::assert_relative_eq;

    fn component(fraction: Real, constants: ConstParameters) -> ResolvedComponent {
        ResolvedComponent {
            fraction,
            cv0: ideal_cv0(&constants),
            constants,
        }
    }

    /// Methane / ethane / n-butane at 0.193 / 0.470 / 0.337.
    fn light_alkanes() -> Vec<ResolvedComponent> {
        let methane =
            ConstParameters::new(GasKind::Methane, Some(0.00617), None, 4.226e6, 190.66, 16.043, 0.011)
                .unwrap();
        let ethane =
            ConstParameters::new(GasKind::Ethane, Some(0.0049), None, 4.871e6, 305.33, 30.07, 0.105)
                .unwrap();
        let butane =
            ConstParameters::new(GasKind::NButane, None, Some(0.274), 3.8e6, 425.66, 58.123, 0.193)
                .unwrap();
        vec![
            component(0.193, methane),
            component(0.470, ethane),
            component(0.337, butane),
        ]
    }

    #[test]
    fn lee_pseudo_critical_temperature() {
        let mix = MixingRule::Lee.pseudo_critical(&light_alkanes()).unwrap();
        assert!((mix.tc() - 352.0).abs() < 0.5, "tc = {}", mix.tc());
        assert_eq!(mix.gas(), GasKind::Mix);
    }

    #[test]
    fn chueh_prausnitz_pseudo_critical_temperature() {
        let mix = MixingRule::ChuehPrausnitz
            .pseudo_critical(&light_alkanes())
            .unwrap();
        assert!((mix.tc() - 353.0).abs() < 0.5, "tc = {}", mix.tc());
        let w = 0.193 * 0.011 + 0.470 * 0.105 + 0.337 * 0.193;
        let expected_pc = UNIVERSAL_R * mix.tc() * (0.291 - 0.08 * w) / mix.vc_molar();
        assert_relative_eq!(mix.pc(), expected_pc, max_relative = 1e-9);
    }

    #[test]
    fn chueh_prausnitz_past_tabulated_deviation_uses_default_row() {
        // methane/decane: d = |190.56 − 617.7|/(190.56 + 617.7) ≈ 0.53
        let methane = crate::catalog::lookup(GasKind::Methane).unwrap();
        let decane = crate::catalog::lookup(GasKind::Decane).unwrap();
        let components = [
            component(0.5, methane.const_parameters().unwrap()),
            component(0.5, decane.const_parameters().unwrap()),
        ];
        let mix = MixingRule::ChuehPrausnitz.pseudo_critical(&components).unwrap();
        let d = (617.7 - 190.56) / (617.7 + 190.56);
        assert!(d > MAX_TABULATED_DEVIATION);
        assert!(mix.tc() > 190.56 && mix.tc().is_finite());
        assert_relative_eq!(
            interaction(PairClass::CarbonDioxide, Quantity::Temperature, d, GasKind::Methane, GasKind::Decane),
            polynomial(&TC_DEFAULT, d)
        );
    }

    #[test]
    fn redlich_kwong2_has_third_critical_compressibility() {
        let mix = MixingRule::RedlichKwong2
            .pseudo_critical(&light_alkanes())
            .unwrap();
        assert_relative_eq!(mix.zc(), 1.0 / 3.0, max_relative = 1e-12);
        let ratio: Real = light_alkanes()
            .iter()
            .map(|c| c.fraction * c.constants.tc() / c.constants.pc())
            .sum();
        assert_relative_eq!(mix.pc(), mix.tc() / ratio, max_relative = 1e-12);
    }

    #[test]
    fn single_component_reproduces_itself() {
        let pure = &light_alkanes()[1..2];
        let one = [ResolvedComponent {
            fraction: 1.0,
            ..pure[0]
        }];
        for rule in [MixingRule::MoleAverage, MixingRule::Lee, MixingRule::ChuehPrausnitz] {
            let mix = rule.pseudo_critical(&one).unwrap();
            assert_relative_eq!(mix.tc(), 305.33, max_relative = 1e-12);
            assert_relative_eq!(mix.molar_mass(), 30.07, max_relative = 1e-12);
        }
    }

    #[test]
    fn pair_classes() {
        assert_eq!(PairClass::of(GasKind::Benzene, GasKind::Toluene), PairClass::Aromatic);
        assert_eq!(
            PairClass::of(GasKind::Methane, GasKind::HydrogenSulfide),
            PairClass::HydrogenSulfide
        );
        assert_eq!(
            PairClass::of(GasKind::CarbonDioxide, GasKind::Propane),
            PairClass::CarbonDioxide
        );
        assert_eq!(PairClass::of(GasKind::Ethane, GasKind::Acetylene), PairClass::Acetylene);
        assert_eq!(
            PairClass::of(GasKind::CarbonMonoxide, GasKind::Nitrogen),
            PairClass::CarbonMonoxide
        );
        assert_eq!(PairClass::of(GasKind::Methane, GasKind::NButane), PairClass::Default);
        // aromatic only when both sides are
        assert_eq!(PairClass::of(GasKind::Benzene, GasKind::Methane), PairClass::Default);
        // H2S and CO2 take precedence over the later classes
        assert_eq!(
            PairClass::of(GasKind::HydrogenSulfide, GasKind::CarbonDioxide),
            PairClass::HydrogenSulfide
        );
        assert_eq!(
            PairClass::of(GasKind::CarbonDioxide, GasKind::CarbonMonoxide),
            PairClass::CarbonDioxide
        );
    }

    #[test]
    fn acetylene_and_carbon_monoxide_rows_follow_the_default() {
        for d in [0.0, 0.1, 0.25, 0.5] {
            for class in [PairClass::Acetylene, PairClass::CarbonMonoxide] {
                assert_eq!(
                    interaction(class, Quantity::Temperature, d, GasKind::Acetylene, GasKind::CarbonMonoxide),
                    polynomial(&TC_DEFAULT, d)
                );
                assert_eq!(
                    interaction(class, Quantity::Volume, d, GasKind::Acetylene, GasKind::CarbonMonoxide),
                    polynomial(&VC_DEFAULT, d)
                );
            }
        }
        assert_ne!(
            interaction(PairClass::CarbonDioxide, Quantity::Temperature, 0.25, GasKind::CarbonDioxide, GasKind::Methane),
            polynomial(&TC_DEFAULT, 0.25)
        );
    }

    #[test]
    fn geometric_mean_falls_back_for_negative_acentric() {
        let he = crate::catalog::lookup(GasKind::Helium).unwrap();
        let ch4 = crate::catalog::lookup(GasKind::Methane).unwrap();
        let components = [
            component(0.1, he.const_parameters().unwrap()),
            component(0.9, ch4.const_parameters().unwrap()),
        ];
        let mix = MixingRule::MoleAverage.pseudo_critical(&components).unwrap();
        assert_relative_eq!(mix.acentric(), 0.1 * -0.390 + 0.9 * 0.011, max_relative = 1e-12);
    }

    #[test]
    fn defaults_per_model_and_parsing() {
        assert_eq!(MixingRule::default_for(ModelIdentity::IDEAL_GAS), MixingRule::MoleAverage);
        assert_eq!(
            MixingRule::default_for(ModelIdentity::REDLICH_KWONG_SOAVE),
            MixingRule::RedlichKwong2
        );
        assert_eq!(
            MixingRule::default_for(ModelIdentity::PENG_ROBINSON),
            MixingRule::ChuehPrausnitz
        );
        for rule in MixingRule::ALL {
            assert_eq!(rule.key().parse::<MixingRule>(), Ok(rule));
        }
    }
}
