use serde::{Deserialize, Serialize};

use crate::core::{Location, Severity};

/// Flat host record; `critical_failed` of `None` means "not evaluated" and
/// is treated as 0 in aggregations, rendered as a dash in views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    pub hostname: String,
    pub os: String,
    pub last_seen: String,
    pub score: u32,
    pub critical_failed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub timestamp: String,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
}

impl RuleStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleStatus::Pass => "PASS",
            RuleStatus::Fail => "FAIL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedRule {
    pub rule_id: String,
    pub description: String,
    pub expected: String,
    pub actual: String,
    pub status: RuleStatus,
    pub severity: Severity,
    pub remediation: String,
}

/// Extended per-host record backing the detail view and the host report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostDetail {
    pub id: String,
    pub hostname: String,
    pub os: String,
    pub ip_address: String,
    pub domain: String,
    pub last_seen: String,
    pub cpu: String,
    pub memory: String,
    pub disk: String,
    pub uptime: String,
    pub tags: Vec<String>,
    pub score: u32,
    pub location: Location,
    pub recent_activity: Vec<RecentActivity>,
    pub evaluated_rules: Vec<EvaluatedRule>,
}
