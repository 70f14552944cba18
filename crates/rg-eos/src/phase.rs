//! Phase state and its classification against a binodal envelope.

use crate::binodal::BinodalPoints;
use crate::parameters::StateParams;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseState {
    /// Supercritical fluid.
    Scf,
    Gas,
    Liquid,
    /// Two-phase region under the binodal.
    LiqSteam,
    /// Stratified two-phase state. Never produced by [`classify`].
    Lamination,
    #[default]
    NotSet,
}

impl PhaseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseState::Scf => "SCF",
            PhaseState::Gas => "GAS",
            PhaseState::Liquid => "LIQUID",
            PhaseState::LiqSteam => "LIQ_STEAM",
            PhaseState::Lamination => "LAMINATION",
            PhaseState::NotSet => "NOT_SET",
        }
    }
}

impl fmt::Display for PhaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `state` against a binodal expressed in the same units as
/// `critical`.
///
/// Models pass reduced coordinates with a unit critical point; callers with
/// absolute points pass the gas's `(Vc, Pc, Tc)`.
pub fn classify(
    points: Option<&BinodalPoints>,
    critical: StateParams,
    state: StateParams,
) -> PhaseState {
    let Some(points) = points.filter(|p| !p.is_empty()) else {
        return PhaseState::NotSet;
    };
    if state.t >= critical.t {
        return if state.p >= critical.p {
            PhaseState::Scf
        } else {
            PhaseState::Gas
        };
    }

    let p = &points.p;
    let bracket = (0..p.len().saturating_sub(1)).find(|&i| p[i] >= state.p && state.p > p[i + 1]);
    let Some(i) = bracket else {
        return if state.v <= critical.v {
            PhaseState::LiqSteam
        } else {
            PhaseState::Gas
        };
    };

    let frac = (state.p - p[i + 1]) / (p[i] - p[i + 1]);
    let lerp = |v: &[f64]| v[i + 1] + (v[i] - v[i + 1]) * frac;
    if state.v < critical.v {
        if state.v < lerp(&points.v_left) {
            PhaseState::Liquid
        } else {
            PhaseState::LiqSteam
        }
    } else if state.v > lerp(&points.v_right) {
        PhaseState::Gas
    } else {
        PhaseState::LiqSteam
    }
}
