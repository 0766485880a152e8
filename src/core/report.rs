use serde::{Deserialize, Serialize};

/// Generated-report document: the shared structure behind the HTML, CSV,
/// JSON and plain-text exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub generated_at: String,
    /// Ordered key/value metadata pairs (generated by, location, ...).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub metadata: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_metrics: Option<SummaryMetrics>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub severity_data: Vec<SeverityRow>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub category_data: Vec<CategoryRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonData>,
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub system_compliance: f64,
    pub total_endpoints: u32,
    pub total_controls: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityRow {
    pub severity: String,
    pub passed: u32,
    pub failed: u32,
}

impl SeverityRow {
    /// Compliance share of this tier, as a percentage with one decimal.
    pub fn compliance_pct(&self) -> f64 {
        let total = self.passed + self.failed;
        if total == 0 {
            return 0.0;
        }
        (f64::from(self.passed) / f64::from(total) * 1000.0).round() / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub const fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }

    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Trend::Up
        } else if delta < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonChange {
    pub metric: String,
    pub previous: String,
    pub current: String,
    pub change: String,
    pub trend: Trend,
}

/// Two-point comparison block rendered with trend arrows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonData {
    pub previous_date: String,
    pub current_date: String,
    pub previous_compliance: f64,
    pub current_compliance: f64,
    pub changes: Vec<ComparisonChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    #[serde(flatten)]
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum SectionContent {
    Text(Vec<String>),
    List(Vec<String>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl ReportSection {
    pub fn text(title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content: SectionContent::Text(paragraphs),
        }
    }

    pub fn list(title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content: SectionContent::List(items),
        }
    }

    pub fn table(title: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            title: title.into(),
            content: SectionContent::Table { headers, rows },
        }
    }
}
