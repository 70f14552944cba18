//! Unit-tagged numeric input.
//!
//! Run files and the command line give state variables as text such as
//! `"5 MPa"`, `"300 K"` or `"25 C"`. The text is kept next to the SI value
//! so it can be written back unchanged.

use rg_core::numeric::Real;
use rg_core::units::{Pressure, SpecVolume, Temperature};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uom::si::{pressure, specific_volume, thermodynamic_temperature};

/// Quantity family of a unit-tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Absolute temperature (K)
    Temperature,
    /// Absolute pressure (Pa)
    Pressure,
    /// Specific volume (m³/kg)
    SpecificVolume,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Pressure => write!(f, "pressure"),
            Self::SpecificVolume => write!(f, "specific volume"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Could not parse a number from '{0}'")]
    Parse(String),

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("Ambiguous unit '{unit}': {hint}")]
    Ambiguous { unit: String, hint: &'static str },

    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: Real, reason: &'static str },
}

/// Value with its original text and canonical SI magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    pub raw_text: String,
    pub si: Real,
    pub quantity: Quantity,
}

impl UnitValue {
    pub fn from_text(raw_text: impl Into<String>, quantity: Quantity) -> Result<Self, UnitError> {
        let raw_text = raw_text.into();
        let si = parse_quantity(&raw_text, quantity)?;
        Ok(Self {
            raw_text,
            si,
            quantity,
        })
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}

/// Parse `raw_text` to the SI magnitude of `quantity`. A bare number is
/// taken as SI already.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<Real, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    match quantity {
        Quantity::Temperature => temperature(value, &unit).map(|t| t.get::<thermodynamic_temperature::kelvin>()),
        Quantity::Pressure => pressure(value, &unit).map(|p| p.get::<pressure::pascal>()),
        Quantity::SpecificVolume => specific_volume(value, &unit)
            .map(|v| v.get::<specific_volume::cubic_meter_per_kilogram>()),
    }
}

/// Parse temperature text into a typed quantity.
pub fn parse_temperature(raw_text: &str) -> Result<Temperature, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    temperature(value, &unit)
}

/// Parse absolute-pressure text into a typed quantity.
pub fn parse_pressure(raw_text: &str) -> Result<Pressure, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;
    pressure(value, &unit)
}

fn temperature(value: Real, unit: &str) -> Result<Temperature, UnitError> {
    use thermodynamic_temperature::{degree_celsius, degree_fahrenheit, degree_rankine, kelvin};
    let t = match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => Temperature::new::<kelvin>(value),
        "c" | "°c" | "celsius" => Temperature::new::<degree_celsius>(value),
        "f" | "°f" | "fahrenheit" => Temperature::new::<degree_fahrenheit>(value),
        "r" | "°r" | "rankine" => Temperature::new::<degree_rankine>(value),
        _ => {
            return Err(UnitError::UnknownUnit {
                unit: unit.to_string(),
                quantity: Quantity::Temperature,
            });
        }
    };
    let kelvin_value = t.get::<kelvin>();
    if kelvin_value <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin_value,
            reason: "absolute temperature must be > 0 K",
        });
    }
    Ok(t)
}

fn pressure(value: Real, unit: &str) -> Result<Pressure, UnitError> {
    use pressure::{atmosphere, bar, kilopascal, megapascal, pascal, pound_force_per_square_inch as psi};
    let p = match unit.to_lowercase().as_str() {
        "" | "pa" => Pressure::new::<pascal>(value),
        "kpa" => Pressure::new::<kilopascal>(value),
        "mpa" => Pressure::new::<megapascal>(value),
        "bar" => Pressure::new::<bar>(value),
        "atm" => Pressure::new::<atmosphere>(value),
        "psia" => Pressure::new::<psi>(value),
        // gauge units against one standard atmosphere
        "barg" => Pressure::new::<bar>(value) + Pressure::new::<atmosphere>(1.0),
        "psig" => Pressure::new::<psi>(value) + Pressure::new::<atmosphere>(1.0),
        "psi" => {
            return Err(UnitError::Ambiguous {
                unit: unit.to_string(),
                hint: "use 'psia' (absolute) or 'psig' (gauge)",
            });
        }
        _ => {
            return Err(UnitError::UnknownUnit {
                unit: unit.to_string(),
                quantity: Quantity::Pressure,
            });
        }
    };
    if p.get::<pascal>() <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: p.get::<pascal>(),
            reason: "absolute pressure must be positive",
        });
    }
    Ok(p)
}

fn specific_volume(value: Real, unit: &str) -> Result<SpecVolume, UnitError> {
    use specific_volume::cubic_meter_per_kilogram;
    let v = match unit.to_lowercase().as_str() {
        "" | "m3/kg" | "m^3/kg" | "m³/kg" => SpecVolume::new::<cubic_meter_per_kilogram>(value),
        "l/kg" => SpecVolume::new::<cubic_meter_per_kilogram>(value * 1e-3),
        _ => {
            return Err(UnitError::UnknownUnit {
                unit: unit.to_string(),
                quantity: Quantity::SpecificVolume,
            });
        }
    };
    if v.get::<cubic_meter_per_kilogram>() <= 0.0 {
        return Err(UnitError::OutOfRange {
            value,
            reason: "specific volume must be positive",
        });
    }
    Ok(v)
}

/// `"14.7 psia"` -> `(14.7, "psia")`, `"300"` -> `(300.0, "")`.
fn split_value_and_unit(input: &str) -> Result<(Real, String), UnitError> {
    let trimmed = input.trim();
    let split = trimmed
        .char_indices()
        .find(|&(i, c)| {
            let exponent = matches!(c, 'e' | 'E')
                && trimmed[i + 1..].starts_with(|n: char| n.is_ascii_digit() || n == '-' || n == '+');
            !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+') || exponent)
        })
        .map_or(trimmed.len(), |(i, _)| i);
    let (number, unit) = trimmed.split_at(split);
    let value = number
        .trim()
        .parse::<Real>()
        .map_err(|_| UnitError::Parse(input.to_string()))?;
    Ok((value, unit.trim().to_string()))
}
