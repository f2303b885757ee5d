use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

/// Use case whose variable schema gives formulas their meaning
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    /// UV-disinfection robot with human-detection mitigations
    Master,
    Rover,
    LungVentilator,
    Drone,
    /// Synthetic variables `variable_1` .. `variable_6`
    Pipeline,
    /// Propositions `prop_1` .. `prop_7` of the lifted LTL corpus
    Lifted,
    /// Schema supplied through the configuration file
    Custom(String),
}

impl Domain {
    pub const BUILTIN: [Domain; 6] = [
        Domain::Master,
        Domain::Rover,
        Domain::LungVentilator,
        Domain::Drone,
        Domain::Pipeline,
        Domain::Lifted,
    ];

    /// Stable identifier used on the command line and in config files
    pub fn key(&self) -> &str {
        match self {
            Domain::Master => "master",
            Domain::Rover => "rover",
            Domain::LungVentilator => "lung-ventilator",
            Domain::Drone => "drone",
            Domain::Pipeline => "pipeline",
            Domain::Lifted => "lifted",
            Domain::Custom(name) => name,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Master => write!(f, "Master (UV robot)"),
            Domain::Rover => write!(f, "Rover"),
            Domain::LungVentilator => write!(f, "Lung Ventilator"),
            Domain::Drone => write!(f, "Drone"),
            Domain::Pipeline => write!(f, "Pipeline (synthetic)"),
            Domain::Lifted => write!(f, "Lifted LTL (prop_1..prop_7)"),
            Domain::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Domain {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let domain = match s.trim().to_lowercase().as_str() {
            "master" | "uvc" => Domain::Master,
            "rover" => Domain::Rover,
            "lung-ventilator" | "lungv" | "lung" | "ventilator" => Domain::LungVentilator,
            "drone" => Domain::Drone,
            "pipeline" | "synthetic" => Domain::Pipeline,
            "lifted" | "props" => Domain::Lifted,
            _ => Domain::Custom(s.trim().to_string()),
        };
        Ok(domain)
    }
}

/// Which decision procedure the batch driver consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OracleKind {
    /// Fixed-schema ptLTL checked by an external model checker
    #[default]
    ModelChecking,
    /// Future-time LTL over propositional atoms, decided in-process
    Automata,
}

impl FromStr for OracleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "model-checking" | "nuxmv" | "smv" => Ok(OracleKind::ModelChecking),
            "automata" | "ltl" => Ok(OracleKind::Automata),
            other => Err(format!("Unsupported oracle: {}", other)),
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleKind::ModelChecking => write!(f, "model-checking"),
            OracleKind::Automata => write!(f, "automata"),
        }
    }
}
