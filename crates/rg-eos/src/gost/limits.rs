//! Composition limits of the natural-gas correlation (GOST 30319.3, table 2).

use crate::composition::Composition;
use crate::error::{EosResult, GasMixError};
use crate::gas::GasKind;
use rg_core::numeric::{FLOAT_ACCURACY, Real};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    min: Real,
    max: Real,
}

impl Range {
    const fn upto(max: Real) -> Self {
        Self { min: 0.0, max }
    }

    fn contains(&self, fraction: Real) -> bool {
        self.min < fraction + FLOAT_ACCURACY && fraction < self.max + FLOAT_ACCURACY
    }
}

const BUTANES: Range = Range::upto(0.015);
const PENTANES: Range = Range::upto(0.005);
/// Sum of everything without a limit of its own.
const OTHERS: Range = Range::upto(0.0015);
/// Octane, nonane and decane together (ISO only).
const HEAVY_ALKANES: Range = Range::upto(0.0005);

fn gost_range(gas: GasKind) -> Option<Range> {
    let range = match gas {
        GasKind::Methane => Range {
            min: 0.7,
            max: 0.99999,
        },
        GasKind::Ethane => Range::upto(0.1),
        GasKind::Propane => Range::upto(0.035),
        GasKind::Hexane => Range::upto(0.001),
        GasKind::Nitrogen | GasKind::CarbonDioxide => Range::upto(0.2),
        GasKind::Helium => Range::upto(0.005),
        GasKind::Hydrogen => Range::upto(0.1),
        _ => return None,
    };
    Some(range)
}

fn iso_range(gas: GasKind) -> Option<Range> {
    let range = match gas {
        GasKind::Heptane => Range::upto(0.0005),
        GasKind::CarbonMonoxide => Range::upto(0.03),
        GasKind::Water => Range::upto(0.00015),
        GasKind::Oxygen | GasKind::HydrogenSulfide | GasKind::Argon => Range::upto(0.0002),
        _ => return None,
    };
    Some(range)
}

fn check(range: Range, component: &str, fraction: Real) -> EosResult<()> {
    if range.contains(fraction) {
        Ok(())
    } else {
        Err(GasMixError::CompositionLimit {
            component: component.to_string(),
            fraction,
        }
        .into())
    }
}

/// Check every component (and the pooled groups) against its allowed range.
///
/// Without ISO, heptane and heavier count towards "others".
pub fn check_limits(composition: &Composition, iso: bool) -> EosResult<()> {
    let mut butanes = 0.0;
    let mut pentanes = 0.0;
    let mut heavy = 0.0;
    let mut others = 0.0;
    for (gas, fraction) in composition.iter() {
        match gas {
            GasKind::IsoButane | GasKind::NButane => butanes += fraction,
            GasKind::IsoPentane | GasKind::NPentane => pentanes += fraction,
            GasKind::Octane | GasKind::Nonane | GasKind::Decane if iso => heavy += fraction,
            _ => match gost_range(gas).or_else(|| iso.then(|| iso_range(gas)).flatten()) {
                Some(range) => check(range, gas.key(), fraction)?,
                None => others += fraction,
            },
        }
    }
    check(BUTANES, "butanes", butanes)?;
    check(PENTANES, "pentanes", pentanes)?;
    if iso {
        check(HEAVY_ALKANES, "octane to decane", heavy)?;
    }
    check(OTHERS, "others", others)
}
