//! Process-wide compute-once store of reduced envelopes.

use super::{BinodalPoints, ReducedEquation, calculate};
use crate::gas::GasKind;
use crate::model::{ModelIdentity, ModelKind, ModelSubtype};
use rg_core::numeric::Real;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::debug;

/// Cubic family whose reduced equation produces an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinodalFamily {
    RedlichKwong,
    Soave,
    PengRobinson,
}

impl BinodalFamily {
    /// Envelope family used by a model. The ideal gas borrows the
    /// Redlich-Kwong envelope; GOST has none.
    pub fn for_identity(identity: ModelIdentity) -> Option<Self> {
        match (identity.kind, identity.subtype) {
            (ModelKind::IdealGas, _) => Some(BinodalFamily::RedlichKwong),
            (ModelKind::RedlichKwong, ModelSubtype::Soave) => Some(BinodalFamily::Soave),
            (ModelKind::RedlichKwong, _) => Some(BinodalFamily::RedlichKwong),
            (ModelKind::PengRobinson, _) => Some(BinodalFamily::PengRobinson),
            (ModelKind::NgGost, _) => None,
        }
    }

    pub fn identity(&self) -> ModelIdentity {
        match self {
            BinodalFamily::RedlichKwong => ModelIdentity::REDLICH_KWONG,
            BinodalFamily::Soave => ModelIdentity::REDLICH_KWONG_SOAVE,
            BinodalFamily::PengRobinson => ModelIdentity::PENG_ROBINSON,
        }
    }

    pub fn equation(&self, acentric: Real) -> ReducedEquation {
        match self {
            BinodalFamily::RedlichKwong => ReducedEquation::RedlichKwong,
            BinodalFamily::Soave => ReducedEquation::soave(acentric),
            BinodalFamily::PengRobinson => ReducedEquation::peng_robinson(acentric),
        }
    }

    fn uses_acentric(&self) -> bool {
        !matches!(self, BinodalFamily::RedlichKwong)
    }
}

/// Cache key: family identity, gas and acentric factor in units of 1e-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinodalKey {
    pub identity: ModelIdentity,
    pub gas: GasKind,
    pub acentric_e4: i64,
}

impl BinodalKey {
    pub fn new(family: BinodalFamily, gas: GasKind, acentric: Real) -> Self {
        let acentric_e4 = if family.uses_acentric() {
            (acentric * 1.0e4).round() as i64
        } else {
            0
        };
        Self {
            identity: family.identity(),
            gas,
            acentric_e4,
        }
    }

    fn acentric(&self) -> Real {
        self.acentric_e4 as Real * 1.0e-4
    }
}

type Cell = Arc<OnceLock<Arc<BinodalPoints>>>;

static CACHE: OnceLock<Mutex<HashMap<BinodalKey, Cell>>> = OnceLock::new();

fn cache() -> MutexGuard<'static, HashMap<BinodalKey, Cell>> {
    CACHE
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Reduced envelope for `(identity, gas, acentric)`, computed on first use.
///
/// The map lock is held only to fetch the key's cell; the envelope itself is
/// computed under the cell's `OnceLock`, so concurrent callers for one key
/// wait for a single computation while other keys proceed.
pub fn get_or_compute(
    identity: ModelIdentity,
    gas: GasKind,
    acentric: Real,
) -> Option<Arc<BinodalPoints>> {
    let family = BinodalFamily::for_identity(identity)?;
    let key = BinodalKey::new(family, gas, acentric);
    let cell = Arc::clone(cache().entry(key).or_default());
    let points = cell.get_or_init(|| {
        let points = calculate(&family.equation(key.acentric()));
        debug!(?family, %gas, acentric = key.acentric(), samples = points.len(), "binodal computed");
        Arc::new(points)
    });
    Some(Arc::clone(points))
}

/// Envelope in absolute units for a gas's critical point.
pub fn scaled(
    identity: ModelIdentity,
    gas: GasKind,
    acentric: Real,
    vc: Real,
    pc: Real,
    tc: Real,
) -> Option<BinodalPoints> {
    get_or_compute(identity, gas, acentric).map(|points| points.scaled(vc, pc, tc))
}

pub fn contains(key: &BinodalKey) -> bool {
    cache().get(key).is_some_and(|cell| cell.get().is_some())
}

/// Drop every cached envelope. Models keep their `Arc`s.
pub fn clear() {
    cache().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn family_mapping() {
        assert_eq!(
            BinodalFamily::for_identity(ModelIdentity::IDEAL_GAS),
            Some(BinodalFamily::RedlichKwong)
        );
        assert_eq!(
            BinodalFamily::for_identity(ModelIdentity::PENG_ROBINSON_BINARY),
            Some(BinodalFamily::PengRobinson)
        );
        assert_eq!(BinodalFamily::for_identity(ModelIdentity::NG_ISO_20765), None);
    }

    #[test]
    fn redlich_kwong_key_ignores_acentric() {
        let a = BinodalKey::new(BinodalFamily::RedlichKwong, GasKind::Methane, 0.011);
        let b = BinodalKey::new(BinodalFamily::RedlichKwong, GasKind::Methane, 0.3);
        assert_eq!(a, b);
        let c = BinodalKey::new(BinodalFamily::Soave, GasKind::Methane, 0.011);
        assert_eq!(c.acentric_e4, 110);
    }

    #[test]
    fn concurrent_requests_share_one_envelope() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    get_or_compute(ModelIdentity::PENG_ROBINSON, GasKind::Propylene, 0.1423)
                        .unwrap()
                })
            })
            .collect();
        let results: Vec<Arc<BinodalPoints>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        for points in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], points));
        }
        let key = BinodalKey::new(BinodalFamily::PengRobinson, GasKind::Propylene, 0.1423);
        assert!(contains(&key));
    }

    #[test]
    fn gost_has_no_envelope() {
        assert!(get_or_compute(ModelIdentity::NG_GOST, GasKind::Mix, 0.0).is_none());
    }
}
