mod asset;
mod audit;
mod host;
mod issue;
mod location;
mod report;
mod rule;
mod severity;
mod user;

pub use asset::{Asset, AssetRisk, AssetStatus, AssetType};
pub use audit::AuditLogEntry;
pub use host::{EvaluatedRule, Host, HostDetail, RecentActivity, RuleStatus};
pub use issue::{Issue, IssueStatus};
pub use location::{Location, LocationFilter, LocationMap};
pub use report::{
    CategoryRow, ComparisonChange, ComparisonData, ReportData, ReportSection, SectionContent,
    SeverityRow, SummaryMetrics, Trend,
};
pub use rule::{ComplianceRule, Framework};
pub use severity::Severity;
pub use user::{Role, User};
