use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    Router,
    Server,
    Firewall,
}

impl AssetType {
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetType::Router => "Router",
            AssetType::Server => "Server",
            AssetType::Firewall => "Firewall",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "router" => Ok(AssetType::Router),
            "server" => Ok(AssetType::Server),
            "firewall" => Ok(AssetType::Firewall),
            other => Err(format!(
                "invalid asset type: {other} (expected Router|Server|Firewall)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    Compliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl AssetStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Compliant => "Compliant",
            AssetStatus::NonCompliant => "Non-Compliant",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compliant" => Ok(AssetStatus::Compliant),
            "non-compliant" | "noncompliant" => Ok(AssetStatus::NonCompliant),
            other => Err(format!(
                "invalid asset status: {other} (expected Compliant|Non-Compliant)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetRisk {
    Low,
    Medium,
    High,
}

impl AssetRisk {
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetRisk::Low => "Low",
            AssetRisk::Medium => "Medium",
            AssetRisk::High => "High",
        }
    }
}

impl fmt::Display for AssetRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetRisk {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(AssetRisk::Low),
            "medium" => Ok(AssetRisk::Medium),
            "high" => Ok(AssetRisk::High),
            other => Err(format!("invalid risk: {other} (expected Low|Medium|High)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub asset_id: String,
    pub hostname: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub os_firmware: String,
    pub owner: String,
    pub status: AssetStatus,
    pub risk: AssetRisk,
    pub score: u32,
    pub last_scanned: String,
}
