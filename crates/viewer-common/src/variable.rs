//! Ocean color variables served by the raster archive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ViewerError;

/// A raster variable in the Long Island Sound OLCI archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    /// Colored dissolved organic matter absorption.
    Cdom,
    /// Suspended particulate matter.
    Spm,
    /// Chlorophyll-a concentration.
    Chl,
}

impl Variable {
    /// All variables, in menu order.
    pub fn all() -> &'static [Variable] {
        &[Variable::Cdom, Variable::Spm, Variable::Chl]
    }

    /// The field name used in raster file names and backend queries.
    pub fn field(&self) -> &'static str {
        match self {
            Variable::Cdom => "cdom",
            Variable::Spm => "spm",
            Variable::Chl => "chl",
        }
    }

    /// Display settings for this variable.
    pub fn settings(&self) -> VariableSettings {
        match self {
            Variable::Cdom => VariableSettings {
                label: "CDOM",
                units: "m⁻¹",
                max: 12.0,
            },
            Variable::Spm => VariableSettings {
                label: "SPM",
                units: "mg L⁻¹",
                max: 20.0,
            },
            Variable::Chl => VariableSettings {
                label: "Chl-a",
                units: "mg m⁻³",
                max: 20.0,
            },
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl FromStr for Variable {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cdom" => Ok(Variable::Cdom),
            "spm" => Ok(Variable::Spm),
            "chl" => Ok(Variable::Chl),
            other => Err(ViewerError::Domain(format!("Unknown variable: {}", other))),
        }
    }
}

/// Presentation settings for a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableSettings {
    /// Human-readable label (colorbar, popups, chart axis).
    pub label: &'static str,
    /// Unit string for display.
    pub units: &'static str,
    /// Upper end of the color ramp for this variable.
    pub max: f64,
}

impl VariableSettings {
    /// Axis/legend label, e.g. "CDOM (m⁻¹)".
    pub fn axis_label(&self) -> String {
        format!("{} ({})", self.label, self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for v in Variable::all() {
            assert_eq!(v.field().parse::<Variable>().unwrap(), *v);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("sst".parse::<Variable>().is_err());
    }

    #[test]
    fn test_settings() {
        assert_eq!(Variable::Cdom.settings().max, 12.0);
        assert_eq!(Variable::Spm.settings().max, 20.0);
        assert_eq!(Variable::Chl.settings().label, "Chl-a");
        assert_eq!(Variable::Cdom.settings().axis_label(), "CDOM (m⁻¹)");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Variable::Chl).unwrap();
        assert_eq!(json, "\"chl\"");
        let v: Variable = serde_json::from_str("\"cdom\"").unwrap();
        assert_eq!(v, Variable::Cdom);
    }
}
