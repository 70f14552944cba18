//! Run-file validation logic.

use crate::schema::{ComponentDef, ConstantsDef, GasDef, RunFile};
use rg_eos::composition::FRACTION_SUM_TOLERANCE;
use rg_eos::{ModelIdentity, Quantity};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Empty list: {field}")]
    Empty { field: String },

    #[error("Duplicate model: {model} (listed as {listed})")]
    DuplicateModel { model: ModelIdentity, listed: ModelIdentity },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported combination: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_run_file(run: &RunFile) -> Result<(), ValidationError> {
    if run.version == 0 || run.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: run.version,
        });
    }
    if run.name.trim().is_empty() {
        return Err(invalid("name", "''", "must not be empty"));
    }

    validate_gas(&run.gas)?;

    if run.models.is_empty() {
        return Err(ValidationError::Empty {
            field: "models".to_string(),
        });
    }
    let gost_gas = matches!(run.gas, GasDef::GostMixture { .. });
    let mut seen = HashSet::new();
    for entry in &run.models {
        let identity = run.configuration.resolve(entry.model);
        if !seen.insert(identity) {
            return Err(ValidationError::DuplicateModel {
                model: identity,
                listed: entry.model,
            });
        }
        if identity.is_gost() != gost_gas {
            return Err(ValidationError::Unsupported {
                feature: entry.model.to_string(),
                reason: if gost_gas {
                    "a gost_mixture gas runs only with ng_gost or ng_iso_20765".to_string()
                } else {
                    "ng_gost and ng_iso_20765 need a gost_mixture gas".to_string()
                },
            });
        }
    }

    for (i, point) in run.points.iter().enumerate() {
        point
            .p
            .to_si(Quantity::Pressure)
            .map_err(|e| invalid(format!("points[{i}].p"), format!("{:?}", point.p), e.to_string()))?;
        point
            .t
            .to_si(Quantity::Temperature)
            .map_err(|e| invalid(format!("points[{i}].t"), format!("{:?}", point.t), e.to_string()))?;
    }

    for (i, sweep) in run.sweeps.iter().enumerate() {
        sweep
            .definition()
            .map_err(|e| invalid(format!("sweeps[{i}]"), format!("{} .. {}", sweep.start, sweep.end), e.to_string()))?;
        sweep
            .fixed_si()
            .map_err(|e| invalid(format!("sweeps[{i}].fixed"), format!("{:?}", sweep.fixed), e.to_string()))?;
    }

    Ok(())
}

fn validate_gas(gas: &GasDef) -> Result<(), ValidationError> {
    match gas {
        GasDef::Pure { gas, constants } => {
            if let Some(constants) = constants {
                validate_constants(&format!("gas.{gas}.constants"), constants)?;
            }
            Ok(())
        }
        GasDef::Mixture { components } => {
            validate_components(components)?;
            for component in components {
                if let Some(constants) = &component.constants {
                    validate_constants(&format!("gas.{}.constants", component.gas), constants)?;
                }
            }
            Ok(())
        }
        GasDef::GostMixture { components } => {
            validate_components(components)?;
            if let Some(component) = components.iter().find(|c| c.constants.is_some()) {
                return Err(ValidationError::Unsupported {
                    feature: format!("gas.{}.constants", component.gas),
                    reason: "the natural-gas correlation uses its own component data".to_string(),
                });
            }
            Ok(())
        }
    }
}

fn validate_components(components: &[ComponentDef]) -> Result<(), ValidationError> {
    if components.is_empty() {
        return Err(ValidationError::Empty {
            field: "gas.components".to_string(),
        });
    }
    let mut seen = HashSet::new();
    for component in components {
        if !seen.insert(component.gas) {
            return Err(invalid("gas.components", component.gas, "listed twice"));
        }
        if !(component.fraction.is_finite() && (0.0..=1.0).contains(&component.fraction)) {
            return Err(invalid(
                format!("gas.{}.fraction", component.gas),
                component.fraction,
                "must be within [0, 1]",
            ));
        }
    }
    let sum: f64 = components.iter().map(|c| c.fraction).sum();
    if (sum - 1.0).abs() > FRACTION_SUM_TOLERANCE {
        return Err(invalid(
            "gas.components",
            sum,
            format!("fractions must sum to 1 ± {FRACTION_SUM_TOLERANCE}"),
        ));
    }
    Ok(())
}

fn validate_constants(field: &str, constants: &ConstantsDef) -> Result<(), ValidationError> {
    if constants.vc.is_some() == constants.zc.is_some() {
        return Err(invalid(field, "vc/zc", "give exactly one of vc and zc"));
    }
    for (name, value) in [
        ("pc", Some(constants.pc)),
        ("tc", Some(constants.tc)),
        ("molar_mass", Some(constants.molar_mass)),
        ("vc", constants.vc),
        ("zc", constants.zc),
    ] {
        match value {
            Some(value) if !(value.is_finite() && value > 0.0) => {
                return Err(invalid(format!("{field}.{name}"), value, "must be positive"));
            }
            _ => {}
        }
    }
    if !constants.acentric.is_finite() {
        return Err(invalid(format!("{field}.acentric"), constants.acentric, "must be finite"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Configuration, ModelEntry, PointDef, SweepDef, ValueDef};
    use rg_eos::{GasKind, SweepType};

    fn methane_run() -> RunFile {
        RunFile {
            version: 1,
            name: "methane".to_string(),
            gas: GasDef::Pure {
                gas: GasKind::Methane,
                constants: None,
            },
            models: vec![ModelEntry {
                model: ModelIdentity::PENG_ROBINSON,
                priority: None,
            }],
            configuration: Configuration::default(),
            points: vec![],
            sweeps: vec![],
        }
    }

    #[test]
    fn accepts_minimal_run() {
        validate_run_file(&methane_run()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut run = methane_run();
        run.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_run_file(&run),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn duplicates_are_detected_after_flags() {
        let mut run = methane_run();
        run.models.push(ModelEntry {
            model: ModelIdentity::PENG_ROBINSON_BINARY,
            priority: Some(10),
        });
        assert!(matches!(
            validate_run_file(&run),
            Err(ValidationError::DuplicateModel { .. })
        ));
        run.configuration.pr_enable_by_binary_coefs = false;
        validate_run_file(&run).unwrap();
    }

    #[test]
    fn gost_models_need_a_gost_mixture() {
        let mut run = methane_run();
        run.models[0].model = ModelIdentity::NG_GOST;
        assert!(matches!(validate_run_file(&run), Err(ValidationError::Unsupported { .. })));
    }

    #[test]
    fn constants_need_exactly_one_of_vc_and_zc() {
        let mut run = methane_run();
        run.gas = GasDef::Pure {
            gas: GasKind::Methane,
            constants: Some(ConstantsDef {
                vc: Some(0.006),
                zc: Some(0.286),
                pc: 4.6e6,
                tc: 190.6,
                molar_mass: 16.04,
                acentric: 0.011,
            }),
        };
        assert!(matches!(validate_run_file(&run), Err(ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn bad_points_and_sweeps_are_reported_by_field() {
        let mut run = methane_run();
        run.points.push(PointDef {
            p: ValueDef::Text("5 psi".to_string()),
            t: ValueDef::Number(300.0),
        });
        match validate_run_file(&run) {
            Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "points[0].p"),
            other => panic!("unexpected {other:?}"),
        }

        run.points.clear();
        run.sweeps.push(SweepDef {
            quantity: Quantity::Pressure,
            start: "1 bar".to_string(),
            end: "1 bar".to_string(),
            points: 5,
            spacing: SweepType::Linear,
            fixed: ValueDef::Number(300.0),
        });
        match validate_run_file(&run) {
            Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "sweeps[0]"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn mixture_fractions_must_sum_to_one() {
        let mut run = methane_run();
        run.gas = GasDef::Mixture {
            components: vec![
                ComponentDef {
                    gas: GasKind::Methane,
                    fraction: 0.8,
                    constants: None,
                },
                ComponentDef {
                    gas: GasKind::Ethane,
                    fraction: 0.1,
                    constants: None,
                },
            ],
        };
        assert!(validate_run_file(&run).is_err());
        if let GasDef::Mixture { components } = &mut run.gas {
            components[1].fraction = 0.2;
        }
        validate_run_file(&run).unwrap();
    }
}
