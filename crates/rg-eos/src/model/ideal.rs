//! Ideal gas, `p·v = R·T`.

use super::cubic::{CubicFamily, CubicGas, Validity, delegate_to_core};
use super::ModelIdentity;
use crate::composition::ideal_cv0;
use crate::error::EosResult;
use crate::parameters::ConstParameters;
use rg_core::numeric::Real;

#[derive(Debug, Clone)]
pub struct IdealGas {
    core: CubicGas,
}

impl IdealGas {
    pub fn new(constants: ConstParameters, p: Real, t: Real) -> EosResult<Self> {
        Self::with_cv0(constants, ideal_cv0(&constants), p, t)
    }

    /// Ideal gas with an explicit `cv0`, as used for mixtures.
    pub fn with_cv0(constants: ConstParameters, cv0: Real, p: Real, t: Real) -> EosResult<Self> {
        let form = CubicFamily::Ideal.form(&constants, cv0);
        let core = CubicGas::new(
            ModelIdentity::IDEAL_GAS,
            CubicFamily::Ideal,
            constants,
            form,
            Validity::GasPhase,
            p,
            t,
        )?;
        Ok(Self { core })
    }

    pub fn core(&self) -> &CubicGas {
        &self.core
    }
}

delegate_to_core!(IdealGas);
