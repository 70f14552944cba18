use rg_config::schema::*;
use rg_config::{load, load_json, load_yaml, save_json, save_yaml, validate_run_file};
use rg_eos::{GasKind, MixingRule, ModelIdentity, Quantity, SweepType};

fn mixture_run() -> RunFile {
    RunFile {
        version: 1,
        name: "Methane-ethane".to_string(),
        gas: GasDef::Mixture {
            components: vec![
                ComponentDef {
                    gas: GasKind::Methane,
                    fraction: 0.9,
                    constants: None,
                },
                ComponentDef {
                    gas: GasKind::Ethane,
                    fraction: 0.1,
                    constants: Some(ConstantsDef {
                        vc: None,
                        zc: Some(0.279),
                        pc: 4.872e6,
                        tc: 305.32,
                        molar_mass: 30.07,
                        acentric: 0.099,
                    }),
                },
            ],
        },
        models: vec![
            ModelEntry {
                model: ModelIdentity::PENG_ROBINSON,
                priority: Some(150),
            },
            ModelEntry {
                model: ModelIdentity::IDEAL_GAS,
                priority: None,
            },
        ],
        configuration: Configuration {
            mixing_rule: Some(MixingRule::Lee),
            log_level: LogLevel::Debug,
            ..Configuration::default()
        },
        points: vec![
            PointDef {
                p: ValueDef::Text("2 MPa".to_string()),
                t: ValueDef::Number(280.0),
            },
            PointDef {
                p: ValueDef::Number(101325.0),
                t: ValueDef::Text("25 C".to_string()),
            },
        ],
        sweeps: vec![SweepDef {
            quantity: Quantity::Pressure,
            start: "1 bar".to_string(),
            end: "50 bar".to_string(),
            points: 8,
            spacing: SweepType::Logarithmic,
            fixed: ValueDef::Text("300 K".to_string()),
        }],
    }
}

#[test]
fn roundtrip_yaml_mixture_run() {
    let run = mixture_run();
    validate_run_file(&run).unwrap();

    let path = std::env::temp_dir().join("rg_config_roundtrip_mixture.yaml");
    save_yaml(&path, &run).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(run, loaded);
}

#[test]
fn roundtrip_json_mixture_run() {
    let run = mixture_run();

    let path = std::env::temp_dir().join("rg_config_roundtrip_mixture.json");
    save_json(&path, &run).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(run, loaded);

    let by_extension = load(&path).unwrap();
    assert_eq!(run, by_extension);
}

#[test]
fn save_refuses_invalid_runs() {
    let mut run = mixture_run();
    run.models.clear();

    let path = std::env::temp_dir().join("rg_config_invalid_run.yaml");
    let _ = std::fs::remove_file(&path);
    assert!(save_yaml(&path, &run).is_err());
    assert!(!path.exists());
}

#[test]
fn omitted_sections_take_defaults() {
    let yaml = "
version: 1
name: bare
gas:
  type: pure
  gas: nitrogen
models:
  - model: redlich_kwong
";
    let run = rg_config::from_yaml_str(yaml).unwrap();
    assert_eq!(run.configuration, Configuration::default());
    assert!(run.configuration.rk_enable_soave_mod);
    assert!(run.points.is_empty() && run.sweeps.is_empty());

    let inputs = run.model_inputs().unwrap();
    assert_eq!(inputs[0].0.identity, ModelIdentity::REDLICH_KWONG_SOAVE);
    assert_eq!((inputs[0].0.p, inputs[0].0.t), rg_config::DEFAULT_STATE);
}
