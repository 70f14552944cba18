//! Classic Redlich-Kwong, `p = RT/(v−b) − a/(√T·v(v+b))`.

use super::cubic::{CubicFamily, CubicGas, Validity, delegate_to_core};
use super::ModelIdentity;
use crate::composition::ideal_cv0;
use crate::error::EosResult;
use crate::parameters::{ConstParameters, DynParameters, StateParams};
use rg_core::numeric::Real;

#[derive(Debug, Clone)]
pub struct RedlichKwong {
    core: CubicGas,
}

impl RedlichKwong {
    pub fn new(constants: ConstParameters, p: Real, t: Real) -> EosResult<Self> {
        Self::with_cv0(constants, ideal_cv0(&constants), p, t)
    }

    pub fn with_cv0(constants: ConstParameters, cv0: Real, p: Real, t: Real) -> EosResult<Self> {
        let form = CubicFamily::RedlichKwong.form(&constants, cv0);
        let core = CubicGas::new(
            ModelIdentity::REDLICH_KWONG,
            CubicFamily::RedlichKwong,
            constants,
            form,
            Validity::ReducedPressureBound,
            p,
            t,
        )?;
        Ok(Self { core })
    }

    pub fn core(&self) -> &CubicGas {
        &self.core
    }

    pub fn update_dyn_params_with(
        &self,
        prev: &mut DynParameters,
        new_state: StateParams,
        constants: &ConstParameters,
    ) -> EosResult<()> {
        self.core.update_dyn_params_with(prev, new_state, constants)
    }
}

delegate_to_core!(RedlichKwong);
