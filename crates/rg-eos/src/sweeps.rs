//! Sweep definitions over pressure or temperature.

use crate::units::{Quantity, UnitError, parse_quantity};
use rg_core::numeric::Real;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Spacing of the generated points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepType {
    #[default]
    Linear,
    Logarithmic,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepDefinitionError {
    #[error("Start value: {0}")]
    Start(UnitError),

    #[error("End value: {0}")]
    End(UnitError),

    #[error("Sweep must have at least 2 points")]
    TooFewPoints,

    #[error("Start and end values must be different")]
    EmptyRange,

    #[error("Sweeps run over pressure or temperature, not {0}")]
    UnsupportedQuantity(Quantity),
}

/// One swept variable. The raw text is kept for writing run files back.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub quantity: Quantity,
    pub start_si: Real,
    pub start_raw: String,
    pub end_si: Real,
    pub end_raw: String,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    /// Build from unit text such as `"1 MPa"` and `"10 MPa"`.
    pub fn from_text(
        start_raw: impl Into<String>,
        end_raw: impl Into<String>,
        quantity: Quantity,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepDefinitionError> {
        if !matches!(quantity, Quantity::Pressure | Quantity::Temperature) {
            return Err(SweepDefinitionError::UnsupportedQuantity(quantity));
        }
        let start_raw = start_raw.into();
        let end_raw = end_raw.into();
        let start_si = parse_quantity(&start_raw, quantity).map_err(SweepDefinitionError::Start)?;
        let end_si = parse_quantity(&end_raw, quantity).map_err(SweepDefinitionError::End)?;
        if num_points < 2 {
            return Err(SweepDefinitionError::TooFewPoints);
        }
        if (start_si - end_si).abs() < 1e-12 {
            return Err(SweepDefinitionError::EmptyRange);
        }
        Ok(Self {
            quantity,
            start_si,
            start_raw,
            end_si,
            end_raw,
            num_points,
            sweep_type,
        })
    }

    pub fn generate_points(&self) -> Vec<Real> {
        if self.num_points <= 1 {
            return vec![self.start_si];
        }
        let last = (self.num_points - 1) as Real;
        let mut points: Vec<Real> = match self.sweep_type {
            // parsed values are positive, so the logarithms exist
            SweepType::Logarithmic if self.start_si > 0.0 && self.end_si > 0.0 => {
                let (a, b) = (self.start_si.ln(), self.end_si.ln());
                (0..self.num_points)
                    .map(|i| (a + (b - a) * i as Real / last).exp())
                    .collect()
            }
            _ => (0..self.num_points)
                .map(|i| self.start_si + (self.end_si - self.start_si) * i as Real / last)
                .collect(),
        };
        points[self.num_points - 1] = self.end_si;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} to {} ({} points, {})",
            self.quantity, self.start_raw, self.end_raw, self.num_points, self.sweep_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_points() {
        let sweep = SweepDefinition::from_text("300 K", "350 K", Quantity::Temperature, 6, SweepType::Linear).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 6);
        assert_relative_eq!(points[1], 310.0, max_relative = 1e-12);
        assert_eq!(points[5], 350.0);
    }

    #[test]
    fn logarithmic_points() {
        let sweep =
            SweepDefinition::from_text("0.1 MPa", "10 MPa", Quantity::Pressure, 3, SweepType::Logarithmic).unwrap();
        let points = sweep.generate_points();
        assert_relative_eq!(points[0], 1e5, max_relative = 1e-12);
        assert_relative_eq!(points[1], 1e6, max_relative = 1e-9);
        assert_eq!(points[2], 1e7);
    }

    #[test]
    fn descending_sweep() {
        let sweep = SweepDefinition::from_text("25 C", "0 C", Quantity::Temperature, 2, SweepType::Linear).unwrap();
        let points = sweep.generate_points();
        assert_relative_eq!(points[0], 298.15, max_relative = 1e-12);
        assert_relative_eq!(points[1], 273.15, max_relative = 1e-12);
        assert_eq!(sweep.to_string(), "temperature from 25 C to 0 C (2 points, linear)");
    }

    #[test]
    fn rejects_bad_definitions() {
        assert_eq!(
            SweepDefinition::from_text("1 bar", "2 bar", Quantity::Pressure, 1, SweepType::Linear),
            Err(SweepDefinitionError::TooFewPoints)
        );
        assert_eq!(
            SweepDefinition::from_text("300 K", "27 C", Quantity::Temperature, 1, SweepType::Linear)
                .unwrap_err(),
            SweepDefinitionError::TooFewPoints
        );
        assert!(matches!(
            SweepDefinition::from_text("300 K", "300 K", Quantity::Temperature, 5, SweepType::Linear),
            Err(SweepDefinitionError::EmptyRange)
        ));
        assert!(matches!(
            SweepDefinition::from_text("1 psi", "2 bar", Quantity::Pressure, 5, SweepType::Linear),
            Err(SweepDefinitionError::Start(_))
        ));
        assert!(matches!(
            SweepDefinition::from_text("0.01", "0.02", Quantity::SpecificVolume, 5, SweepType::Linear),
            Err(SweepDefinitionError::UnsupportedQuantity(_))
        ));
    }
}
