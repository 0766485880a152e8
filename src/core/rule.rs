use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{LocationMap, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    #[serde(rename = "CIS")]
    Cis,
    #[serde(rename = "ISO")]
    Iso,
    #[serde(rename = "NIST")]
    Nist,
    #[serde(rename = "PCI")]
    Pci,
    #[serde(rename = "HIPAA")]
    Hipaa,
}

impl Framework {
    pub const fn as_str(self) -> &'static str {
        match self {
            Framework::Cis => "CIS",
            Framework::Iso => "ISO",
            Framework::Nist => "NIST",
            Framework::Pci => "PCI",
            Framework::Hipaa => "HIPAA",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CIS" => Ok(Framework::Cis),
            "ISO" => Ok(Framework::Iso),
            "NIST" => Ok(Framework::Nist),
            "PCI" => Ok(Framework::Pci),
            "HIPAA" => Ok(Framework::Hipaa),
            other => Err(format!(
                "invalid framework: {other} (expected CIS|ISO|NIST|PCI|HIPAA)"
            )),
        }
    }
}

/// A named compliance check with a per-location on/off applicability flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRule {
    pub id: String,
    /// Short rule code, e.g. "CIS-1.3".
    #[serde(rename = "ruleId")]
    pub code: String,
    pub framework: Framework,
    pub description: String,
    pub severity: Severity,
    pub locations: LocationMap,
}
