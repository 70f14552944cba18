//! Run-file schema definitions.

use rg_eos::{GasKind, MixingRule, ModelIdentity, Quantity, SweepType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunFile {
    pub version: u32,
    pub name: String,
    pub gas: GasDef,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub configuration: Configuration,
    #[serde(default)]
    pub points: Vec<PointDef>,
    #[serde(default)]
    pub sweeps: Vec<SweepDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GasDef {
    Pure {
        gas: GasKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        constants: Option<ConstantsDef>,
    },
    Mixture {
        components: Vec<ComponentDef>,
    },
    GostMixture {
        components: Vec<ComponentDef>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub gas: GasKind,
    pub fraction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<ConstantsDef>,
}

/// Critical data overriding the catalog. Exactly one of `vc` (m³/kg) and
/// `zc` is given.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConstantsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zc: Option<f64>,
    /// Pa
    pub pc: f64,
    /// K
    pub tc: f64,
    /// kg/kmol
    pub molar_mass: f64,
    pub acentric: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModelEntry {
    pub model: ModelIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Configuration {
    /// Run `ng_gost` entries as ISO 20765, with caloric properties.
    #[serde(default = "enabled")]
    pub enable_iso_20765: bool,
    /// Run `redlich_kwong` entries with Soave's α(T).
    #[serde(default = "enabled")]
    pub rk_enable_soave_mod: bool,
    /// Run `peng_robinson` entries with binary interaction coefficients.
    #[serde(default = "enabled")]
    pub pr_enable_by_binary_coefs: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixing_rule: Option<MixingRule>,
    #[serde(default)]
    pub log_level: LogLevel,
}

fn enabled() -> bool {
    true
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            enable_iso_20765: true,
            rk_enable_soave_mod: true,
            pr_enable_by_binary_coefs: true,
            mixing_rule: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Configuration {
    /// The identity a listed model actually runs as under these flags.
    pub fn resolve(&self, identity: ModelIdentity) -> ModelIdentity {
        match identity {
            ModelIdentity::REDLICH_KWONG if self.rk_enable_soave_mod => ModelIdentity::REDLICH_KWONG_SOAVE,
            ModelIdentity::PENG_ROBINSON if self.pr_enable_by_binary_coefs => ModelIdentity::PENG_ROBINSON_BINARY,
            ModelIdentity::NG_GOST if self.enable_iso_20765 => ModelIdentity::NG_ISO_20765,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// A state variable: a bare SI number or unit text such as `"5 MPa"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueDef {
    Number(f64),
    Text(String),
}

impl From<f64> for ValueDef {
    fn from(value: f64) -> Self {
        ValueDef::Number(value)
    }
}

impl From<&str> for ValueDef {
    fn from(text: &str) -> Self {
        ValueDef::Text(text.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointDef {
    pub p: ValueDef,
    pub t: ValueDef,
}

/// An isotherm (`quantity: pressure`, `fixed` is the temperature) or an
/// isobar (`quantity: temperature`, `fixed` is the pressure).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    pub quantity: Quantity,
    pub start: String,
    pub end: String,
    pub points: usize,
    #[serde(default)]
    pub spacing: SweepType,
    pub fixed: ValueDef,
}
