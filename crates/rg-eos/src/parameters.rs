//! Per-substance constants and state-dependent quantities.

use crate::error::{EosError, EosResult, InitError};
use crate::gas::GasKind;
use rg_core::numeric::{GAS_CONSTANT, Real, ensure_positive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Universal gas constant in J/(kmol·K), so that `R = UNIVERSAL_R / M` is J/(kg·K).
pub const UNIVERSAL_R: Real = GAS_CONSTANT * 1000.0;

/// Macroscopic state `(v, p, t)` in m³/kg, Pa, K.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateParams {
    pub v: Real,
    pub p: Real,
    pub t: Real,
}

impl StateParams {
    pub fn new(v: Real, p: Real, t: Real) -> Self {
        Self { v, p, t }
    }

    /// A `(p, t)` query with the volume left unknown.
    pub fn at_pt(p: Real, t: Real) -> Self {
        Self { v: 0.0, p, t }
    }

    pub fn has_volume(&self) -> bool {
        self.v.is_finite() && self.v > 0.0
    }

    /// The state divided component-wise by a critical point.
    pub fn reduced(&self, critical: StateParams) -> StateParams {
        StateParams {
            v: self.v / critical.v,
            p: self.p / critical.p,
            t: self.t / critical.t,
        }
    }
}

/// Immutable critical constants of a pure gas or a pseudo-critical mixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConstParameters {
    gas: GasKind,
    /// Critical specific volume [m³/kg].
    vc: Real,
    /// Critical pressure [Pa].
    pc: Real,
    /// Critical temperature [K].
    tc: Real,
    /// Critical compressibility.
    zc: Real,
    acentric: Real,
    /// Molar mass [kg/kmol].
    molar_mass: Real,
    /// Specific gas constant [J/(kg·K)].
    r: Real,
}

impl ConstParameters {
    /// Build from critical data. Exactly one of `vc` and `zc` must be given;
    /// the other follows from `v = z·R·T/p`.
    pub fn new(
        gas: GasKind,
        vc: Option<Real>,
        zc: Option<Real>,
        pc: Real,
        tc: Real,
        molar_mass: Real,
        acentric: Real,
    ) -> EosResult<Self> {
        check_positive(pc, "critical pressure")?;
        check_positive(tc, "critical temperature")?;
        check_positive(molar_mass, "molar mass")?;
        if !acentric.is_finite() {
            return Err(InitError::InvalidArg {
                what: "acentric factor is not finite",
            }
            .into());
        }
        let r = UNIVERSAL_R / molar_mass;
        let (vc, zc) = match (vc, zc) {
            (Some(vc), None) => {
                check_positive(vc, "critical volume")?;
                (vc, pc * vc / (r * tc))
            }
            (None, Some(zc)) => {
                check_positive(zc, "critical compressibility")?;
                (zc * r * tc / pc, zc)
            }
            _ => return Err(InitError::CriticalVolumeOrZ.into()),
        };
        Ok(Self {
            gas,
            vc,
            pc,
            tc,
            zc,
            acentric,
            molar_mass,
            r,
        })
    }

    pub fn gas(&self) -> GasKind {
        self.gas
    }

    pub fn vc(&self) -> Real {
        self.vc
    }

    pub fn pc(&self) -> Real {
        self.pc
    }

    pub fn tc(&self) -> Real {
        self.tc
    }

    pub fn zc(&self) -> Real {
        self.zc
    }

    pub fn acentric(&self) -> Real {
        self.acentric
    }

    pub fn molar_mass(&self) -> Real {
        self.molar_mass
    }

    /// Specific gas constant [J/(kg·K)].
    pub fn r(&self) -> Real {
        self.r
    }

    /// Molar critical volume [m³/kmol].
    pub fn vc_molar(&self) -> Real {
        self.vc * self.molar_mass
    }

    pub fn critical_point(&self) -> StateParams {
        StateParams::new(self.vc, self.pc, self.tc)
    }
}

impl fmt::Display for ConstParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: vc={:.6} m3/kg pc={:.0} Pa tc={:.2} K zc={:.4} w={:.4} M={:.3}",
            self.gas, self.vc, self.pc, self.tc, self.zc, self.acentric, self.molar_mass
        )
    }
}

pub(crate) fn check_positive(v: Real, what: &'static str) -> EosResult<()> {
    ensure_positive(v, what)
        .map(|_| ())
        .map_err(|_| EosError::from(InitError::NonPositive { what }))
}

/// Bitmask of populated [`DynParameters`] fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DynSetup(u32);

impl DynSetup {
    pub const VOLUME: DynSetup = DynSetup(1 << 0);
    pub const PRESSURE: DynSetup = DynSetup(1 << 1);
    pub const TEMPERATURE: DynSetup = DynSetup(1 << 2);
    pub const HEAT_CAP_VOL: DynSetup = DynSetup(1 << 3);
    pub const HEAT_CAP_PRES: DynSetup = DynSetup(1 << 4);
    pub const INTERNAL_ENERGY: DynSetup = DynSetup(1 << 5);
    pub const ENTHALPY: DynSetup = DynSetup(1 << 6);
    pub const ADIABATIC: DynSetup = DynSetup(1 << 7);
    pub const BETA_KR: DynSetup = DynSetup(1 << 8);
    pub const ENTROPY: DynSetup = DynSetup(1 << 9);

    pub const STATE: DynSetup = DynSetup(0b111);
    pub const ALL: DynSetup = DynSetup(0x3FF);

    pub fn empty() -> Self {
        DynSetup(0)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: DynSetup) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: DynSetup) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: DynSetup) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for DynSetup {
    type Output = DynSetup;

    fn bitor(self, rhs: DynSetup) -> DynSetup {
        DynSetup(self.0 | rhs.0)
    }
}

/// Critical flow coefficient `(2/(k+1))^(k/(k−1))`, defined for `k > 1`.
pub fn beta_kr(k: Real) -> Option<Real> {
    if k.is_finite() && k > 1.0 {
        Some((2.0 / (k + 1.0)).powf(k / (k - 1.0)))
    } else {
        None
    }
}

/// State-dependent quantities of one model instance.
///
/// Energies are J/kg, heat capacities and entropy J/(kg·K). Fields whose
/// bit is absent from [`DynParameters::setup`] hold `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DynParameters {
    pub state: StateParams,
    pub cv: Real,
    pub cp: Real,
    pub u: Real,
    pub h: Real,
    pub k: Real,
    pub beta_kr: Real,
    pub s: Real,
    pub setup: DynSetup,
}

impl DynParameters {
    /// Only the state is known.
    pub fn at_state(state: StateParams) -> Self {
        Self {
            state,
            setup: DynSetup::STATE,
            ..Self::default()
        }
    }

    /// Heat capacities; the adiabatic index becomes `cp/cv`.
    pub fn set_heat_capacities(&mut self, cv: Real, cp: Real) {
        self.cv = cv;
        self.cp = cp;
        self.setup
            .insert(DynSetup::HEAT_CAP_VOL | DynSetup::HEAT_CAP_PRES);
        if cv.abs() > 0.0 {
            self.set_adiabatic(cp / cv);
        }
    }

    /// Override the adiabatic index (and with it `beta_kr`).
    pub fn set_adiabatic(&mut self, k: Real) {
        self.k = k;
        self.setup.insert(DynSetup::ADIABATIC);
        match beta_kr(k) {
            Some(beta) => {
                self.beta_kr = beta;
                self.setup.insert(DynSetup::BETA_KR);
            }
            None => {
                self.beta_kr = 0.0;
                self.setup.remove(DynSetup::BETA_KR);
            }
        }
    }

    /// Internal energy; enthalpy follows as `u + p·v`.
    pub fn set_internal_energy(&mut self, u: Real) {
        self.u = u;
        self.h = u + self.state.p * self.state.v;
        self.setup
            .insert(DynSetup::INTERNAL_ENERGY | DynSetup::ENTHALPY);
    }

    pub fn set_entropy(&mut self, s: Real) {
        self.s = s;
        self.setup.insert(DynSetup::ENTROPY);
    }

    pub fn is_set(&self, field: DynSetup) -> bool {
        self.setup.contains(field)
    }

    /// Value of a field, `None` when it was never populated.
    pub fn get(&self, field: DynSetup) -> Option<Real> {
        if !self.is_set(field) {
            return None;
        }
        let value = match field {
            DynSetup::VOLUME => self.state.v,
            DynSetup::PRESSURE => self.state.p,
            DynSetup::TEMPERATURE => self.state.t,
            DynSetup::HEAT_CAP_VOL => self.cv,
            DynSetup::HEAT_CAP_PRES => self.cp,
            DynSetup::INTERNAL_ENERGY => self.u,
            DynSetup::ENTHALPY => self.h,
            DynSetup::ADIABATIC => self.k,
            DynSetup::BETA_KR => self.beta_kr,
            DynSetup::ENTROPY => self.s,
            _ => return None,
        };
        Some(value)
    }
}
