//! Client-side list narrowing: each view applies a conjunction of optional
//! predicates and preserves the source order of whatever survives. An unset
//! predicate is always true.

use std::str::FromStr;

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};

use crate::core::{Asset, AssetRisk, AssetStatus, AssetType, Host, Issue, IssueStatus, Severity};

/// Named score buckets from the hosts view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreRange {
    #[default]
    All,
    From90,
    From70,
    From50,
    Below50,
}

impl ScoreRange {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreRange::All => "All Scores",
            ScoreRange::From90 => "90-100%",
            ScoreRange::From70 => "70-89%",
            ScoreRange::From50 => "50-69%",
            ScoreRange::Below50 => "Below 50%",
        }
    }

    pub fn matches(self, score: u32) -> bool {
        match self {
            ScoreRange::All => true,
            ScoreRange::From90 => score >= 90,
            ScoreRange::From70 => (70..90).contains(&score),
            ScoreRange::From50 => (50..70).contains(&score),
            ScoreRange::Below50 => score < 50,
        }
    }
}

impl FromStr for ScoreRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "all" | "all scores" => Ok(ScoreRange::All),
            "90-100" => Ok(ScoreRange::From90),
            "70-89" => Ok(ScoreRange::From70),
            "50-69" => Ok(ScoreRange::From50),
            "below 50" | "below-50" | "<50" => Ok(ScoreRange::Below50),
            other => Err(format!(
                "invalid score range: {other} (expected 90-100%|70-89%|50-69%|Below 50%)"
            )),
        }
    }
}

fn text_matches(needle: &str, fields: &[&str]) -> bool {
    let needle = needle.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, Default)]
pub struct HostFilter {
    search: Option<String>,
    os: Option<String>,
    scores: ScoreRange,
    hostname_glob: Option<GlobMatcher>,
}

impl HostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    pub fn scores(mut self, range: ScoreRange) -> Self {
        self.scores = range;
        self
    }

    /// Glob pattern over the hostname, e.g. `prod-*` or `*web*`.
    pub fn hostname_pattern(mut self, pattern: &str) -> Result<Self> {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid hostname pattern: {pattern}"))?;
        self.hostname_glob = Some(glob.compile_matcher());
        Ok(self)
    }

    pub fn apply(&self, hosts: &[Host]) -> Vec<Host> {
        hosts
            .iter()
            .filter(|h| {
                self.search
                    .as_deref()
                    .is_none_or(|needle| text_matches(needle, &[&h.hostname, &h.os]))
            })
            .filter(|h| {
                self.os
                    .as_deref()
                    .is_none_or(|os| h.os.eq_ignore_ascii_case(os) || text_matches(os, &[&h.os]))
            })
            .filter(|h| self.scores.matches(h.score))
            .filter(|h| {
                self.hostname_glob
                    .as_ref()
                    .is_none_or(|glob| glob.is_match(&h.hostname))
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    search: Option<String>,
    asset_type: Option<AssetType>,
    status: Option<AssetStatus>,
    risk: Option<AssetRisk>,
    location_code: Option<String>,
}

impl AssetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn asset_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = Some(asset_type);
        self
    }

    pub fn status(mut self, status: AssetStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn risk(mut self, risk: AssetRisk) -> Self {
        self.risk = Some(risk);
        self
    }

    /// Assets carry their site in the asset-id prefix (`DEL-RTR-0001`).
    pub fn location_code(mut self, code: impl Into<String>) -> Self {
        self.location_code = Some(code.into());
        self
    }

    pub fn apply(&self, assets: &[Asset]) -> Vec<Asset> {
        assets
            .iter()
            .filter(|a| {
                self.search.as_deref().is_none_or(|needle| {
                    text_matches(needle, &[&a.asset_id, &a.hostname, &a.owner, &a.os_firmware])
                })
            })
            .filter(|a| self.asset_type.is_none_or(|t| a.asset_type == t))
            .filter(|a| self.status.is_none_or(|s| a.status == s))
            .filter(|a| self.risk.is_none_or(|r| a.risk == r))
            .filter(|a| {
                self.location_code.as_deref().is_none_or(|code| {
                    a.asset_id
                        .split('-')
                        .next()
                        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(code))
                })
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    search: Option<String>,
    severity: Option<Severity>,
    status: Option<IssueStatus>,
}

impl IssueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        issues
            .iter()
            .filter(|i| {
                self.search.as_deref().is_none_or(|needle| {
                    text_matches(needle, &[&i.rule_id, &i.description, &i.framework])
                })
            })
            .filter(|i| self.severity.is_none_or(|s| i.severity == s))
            .filter(|i| self.status.is_none_or(|s| i.status == s))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn score_range_50_69_keeps_source_order() {
        let hosts = data::hosts();
        let filtered = HostFilter::new().scores(ScoreRange::From50).apply(&hosts);
        let scores: Vec<u32> = filtered.iter().map(|h| h.score).collect();
        assert_eq!(scores, vec![67, 52]);
    }

    #[test]
    fn unset_filters_are_always_true() {
        let hosts = data::hosts();
        assert_eq!(HostFilter::new().apply(&hosts).len(), hosts.len());
    }

    #[test]
    fn search_is_case_insensitive() {
        let hosts = data::hosts();
        let filtered = HostFilter::new().search("PROD-WEB").apply(&hosts);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].hostname, "prod-web-01.corp.local");
    }

    #[test]
    fn hostname_glob_narrows_the_list() {
        let hosts = data::hosts();
        let filter = HostFilter::new()
            .hostname_pattern("prod-*")
            .expect("pattern");
        let filtered = filter.apply(&hosts);
        // Six of the eight seeded hosts are prod-*.
        assert_eq!(filtered.len(), 6);
        assert!(filtered.iter().all(|h| h.hostname.starts_with("prod-")));
    }

    #[test]
    fn conjunction_of_predicates() {
        let hosts = data::hosts();
        let filtered = HostFilter::new()
            .search("corp.local")
            .scores(ScoreRange::From90)
            .apply(&hosts);
        let scores: Vec<u32> = filtered.iter().map(|h| h.score).collect();
        assert_eq!(scores, vec![92, 95]);
    }

    #[test]
    fn asset_filter_by_location_prefix_and_status() {
        let assets = data::assets();
        let filtered = AssetFilter::new()
            .location_code("DEL")
            .status(AssetStatus::Compliant)
            .apply(&assets);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|a| a.asset_id.starts_with("DEL-")));
    }

    #[test]
    fn issue_filter_by_severity_and_status() {
        let issues = data::issues();
        let filtered = IssueFilter::new()
            .severity(Severity::High)
            .status(IssueStatus::Open)
            .apply(&issues);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].rule_id, "ISO-5.3");
    }
}
