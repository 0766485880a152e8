//! Seeded datasets. Everything here is static demo data generated at load
//! time; only the compliance rules are ever mutated (via the toggle
//! pipeline), and those reset back to `default_rules()`.

use crate::core::{
    Asset, AssetRisk, AssetStatus, AssetType, ComplianceRule, EvaluatedRule, Framework, Host,
    HostDetail, Issue, IssueStatus, Location, LocationMap, RecentActivity, Role, RuleStatus,
    Severity, User,
};

pub fn users() -> Vec<User> {
    fn user(id: &str, name: &str, email: &str, role: Role, initials: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            initials: initials.to_string(),
        }
    }

    vec![
        user("1", "Rajesh Kumar", "rajesh.kumar@digitruce.com", Role::SuperAdmin, "RK"),
        user("2", "Priya Sharma", "priya.sharma@digitruce.com", Role::LocalAdmin, "PS"),
        user("3", "Amit Patel", "amit.patel@digitruce.com", Role::Auditor, "AP"),
        user("4", "Sneha Reddy", "sneha.reddy@digitruce.com", Role::Viewer, "SR"),
    ]
}

/// Find a roster user by id or (case-insensitive) name.
pub fn find_user(query: &str) -> Option<User> {
    let query = query.trim();
    users()
        .into_iter()
        .find(|u| u.id == query || u.name.eq_ignore_ascii_case(query))
}

pub fn hosts() -> Vec<Host> {
    fn host(
        id: &str,
        hostname: &str,
        os: &str,
        last_seen: &str,
        score: u32,
        critical_failed: Option<u32>,
    ) -> Host {
        Host {
            id: id.to_string(),
            hostname: hostname.to_string(),
            os: os.to_string(),
            last_seen: last_seen.to_string(),
            score,
            critical_failed,
        }
    }

    vec![
        host("1", "prod-web-01.corp.local", "Ubuntu 22.04 LTS", "Nov 17, 02:45 PM", 92, None),
        host("2", "prod-db-primary.corp.local", "Windows Server 2022", "Nov 17, 02:40 PM", 45, Some(5)),
        host("3", "prod-app-01.corp.local", "RHEL 8.5", "Nov 17, 02:25 PM", 88, Some(1)),
        host("4", "dev-test-server.corp.local", "Ubuntu 20.04 LTS", "Nov 17, 02:15 PM", 67, Some(2)),
        host("5", "prod-cache-01.corp.local", "Debian 11", "Nov 17, 02:50 PM", 95, None),
        host("6", "prod-api-gateway.corp.local", "Ubuntu 22.04 LTS", "Nov 17, 02:35 PM", 78, Some(1)),
        host("7", "stage-web-01.corp.local", "Windows Server 2019", "Nov 17, 01:00 PM", 52, Some(4)),
        host("8", "prod-mail-server.corp.local", "CentOS 7", "Nov 17, 02:30 PM", 71, Some(2)),
    ]
}

pub fn assets() -> Vec<Asset> {
    #[allow(clippy::too_many_arguments)]
    fn asset(
        id: &str,
        asset_id: &str,
        hostname: &str,
        asset_type: AssetType,
        os_firmware: &str,
        owner: &str,
        status: AssetStatus,
        risk: AssetRisk,
        score: u32,
        last_scanned: &str,
    ) -> Asset {
        Asset {
            id: id.to_string(),
            asset_id: asset_id.to_string(),
            hostname: hostname.to_string(),
            asset_type,
            os_firmware: os_firmware.to_string(),
            owner: owner.to_string(),
            status,
            risk,
            score,
            last_scanned: last_scanned.to_string(),
        }
    }

    vec![
        asset("1", "DEL-RTR-0001", "del-router-01.corp.digitruce.in", AssetType::Router, "Debian 11", "Network Engineering", AssetStatus::NonCompliant, AssetRisk::Medium, 77, "27/01/2026"),
        asset("2", "DEL-SRV-0002", "del-server-02.corp.digitruce.in", AssetType::Server, "Ubuntu 22.04 LTS", "Database Administration", AssetStatus::Compliant, AssetRisk::Low, 95, "30/01/2026"),
        asset("3", "DEL-FW-0003", "del-firewall-03.corp.digitruce.in", AssetType::Firewall, "Cisco IOS 15.1", "Security Operations", AssetStatus::Compliant, AssetRisk::Medium, 83, "02/02/2026"),
        asset("4", "DEL-RTR-0004", "del-router-04.corp.digitruce.in", AssetType::Router, "Ubuntu 22.04 LTS", "Security Operations", AssetStatus::NonCompliant, AssetRisk::High, 74, "28/01/2026"),
        asset("5", "DEL-SRV-0005", "del-server-05.corp.digitruce.in", AssetType::Server, "Windows Server 2022", "DevOps Team", AssetStatus::Compliant, AssetRisk::Medium, 89, "31/01/2026"),
        asset("6", "MUM-SRV-0006", "mum-server-06.corp.digitruce.in", AssetType::Server, "RHEL 8.5", "IT Operations", AssetStatus::Compliant, AssetRisk::Low, 91, "29/01/2026"),
        asset("7", "BLR-RTR-0007", "blr-router-07.corp.digitruce.in", AssetType::Router, "Juniper Junos", "Network Engineering", AssetStatus::NonCompliant, AssetRisk::High, 62, "25/01/2026"),
        asset("8", "HYD-FW-0008", "hyd-firewall-08.corp.digitruce.in", AssetType::Firewall, "Palo Alto PAN-OS", "Security Operations", AssetStatus::Compliant, AssetRisk::Low, 97, "01/02/2026"),
    ]
}

pub fn default_rules() -> Vec<ComplianceRule> {
    fn rule(
        id: &str,
        code: &str,
        framework: Framework,
        description: &str,
        severity: Severity,
        locations: LocationMap,
    ) -> ComplianceRule {
        ComplianceRule {
            id: id.to_string(),
            code: code.to_string(),
            framework,
            description: description.to_string(),
            severity,
            locations,
        }
    }

    vec![
        rule("1", "CIS-1.3", Framework::Cis, "Ensure automatic updates are enabled", Severity::Critical, LocationMap::all(true)),
        rule("2", "CIS-2.1", Framework::Cis, "Ensure firewall is enabled on all endpoints", Severity::High, LocationMap::new(true, true, true, false)),
        rule("3", "ISO-5.3", Framework::Iso, "Password complexity requirements not met", Severity::High, LocationMap::new(false, true, true, true)),
        rule("4", "NIST-AC-2", Framework::Nist, "User account monitoring disabled", Severity::High, LocationMap::new(true, false, false, true)),
        rule("5", "PCI-8.2.3", Framework::Pci, "Multi-factor authentication not enforced", Severity::Critical, LocationMap::all(true)),
        rule("6", "HIPAA-164.312", Framework::Hipaa, "Encryption at rest not configured", Severity::Medium, LocationMap::new(true, true, false, true)),
        rule("7", "CIS-5.1", Framework::Cis, "Antivirus software installed and updated", Severity::Critical, LocationMap::all(true)),
        rule("8", "ISO-9.4", Framework::Iso, "System access control not properly configured", Severity::High, LocationMap::new(false, true, true, true)),
    ]
}

pub fn issues() -> Vec<Issue> {
    #[allow(clippy::too_many_arguments)]
    fn issue(
        id: &str,
        rule_id: &str,
        severity: Severity,
        description: &str,
        hosts_affected: u32,
        framework: &str,
        status: IssueStatus,
        first_detected: &str,
    ) -> Issue {
        Issue {
            id: id.to_string(),
            rule_id: rule_id.to_string(),
            severity,
            description: description.to_string(),
            hosts_affected,
            framework: framework.to_string(),
            status,
            first_detected: first_detected.to_string(),
        }
    }

    vec![
        issue("1", "CIS-1.3", Severity::Critical, "Ensure automatic updates are enabled", 23, "CIS", IssueStatus::Open, "2025-11-07"),
        issue("2", "ISO-5.3", Severity::High, "Password complexity requirements not met", 18, "ISO", IssueStatus::Open, "2025-11-08"),
        issue("3", "NIST-AC-2", Severity::High, "User account monitoring disabled", 15, "NIST", IssueStatus::InProgress, "2025-11-09"),
        issue("4", "PCI-8.2.3", Severity::Critical, "Multi-factor authentication not enforced", 12, "PCI", IssueStatus::Open, "2025-11-10"),
        issue("5", "CIS-2.1", Severity::High, "Ensure firewall is enabled on all endpoints", 8, "CIS", IssueStatus::Resolved, "2025-11-05"),
        issue("6", "HIPAA-164.312", Severity::Medium, "Encryption at rest not configured", 6, "HIPAA", IssueStatus::InProgress, "2025-11-11"),
    ]
}

pub fn host_details() -> Vec<HostDetail> {
    fn activity(activity_type: &str, timestamp: &str, details: &str) -> RecentActivity {
        RecentActivity {
            activity_type: activity_type.to_string(),
            timestamp: timestamp.to_string(),
            details: details.to_string(),
        }
    }

    fn evaluated(
        rule_id: &str,
        description: &str,
        expected: &str,
        actual: &str,
        status: RuleStatus,
        severity: Severity,
        remediation: &str,
    ) -> EvaluatedRule {
        EvaluatedRule {
            rule_id: rule_id.to_string(),
            description: description.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            status,
            severity,
            remediation: remediation.to_string(),
        }
    }

    vec![
        HostDetail {
            id: "1".to_string(),
            hostname: "prod-web-01.corp.local".to_string(),
            os: "Ubuntu 22.04 LTS".to_string(),
            ip_address: "10.0.1.10".to_string(),
            domain: "CORP".to_string(),
            last_seen: "17/11/2025, 14:45:00".to_string(),
            cpu: "AMD EPYC 7542".to_string(),
            memory: "32 GB".to_string(),
            disk: "500GB NVMe".to_string(),
            uptime: "120 days".to_string(),
            tags: vec!["production".to_string(), "web".to_string(), "frontend".to_string()],
            score: 92,
            location: Location::Del,
            recent_activity: vec![
                activity("Scan completed", "17/11/2025, 14:45:00", "Score: 92%"),
                activity("Patch applied", "16/11/2025, 03:00:00", "Security update KB5034441"),
            ],
            evaluated_rules: vec![
                evaluated("CIS-1.3", "Ensure automatic updates are enabled", "Enabled", "Enabled", RuleStatus::Pass, Severity::Critical, ""),
                evaluated("CIS-2.1", "Ensure firewall is enabled", "Enabled", "Enabled", RuleStatus::Pass, Severity::High, ""),
                evaluated("ISO-5.3", "Password complexity requirements", "Min 12 chars, complexity enabled", "Min 12 chars, complexity enabled", RuleStatus::Pass, Severity::High, ""),
                evaluated("NIST-AC-2", "User account monitoring", "Audit logging enabled", "Audit logging enabled", RuleStatus::Pass, Severity::High, ""),
                evaluated("PCI-8.2.3", "Multi-factor authentication", "MFA enforced for all accounts", "MFA not configured", RuleStatus::Fail, Severity::Critical, "Deploy and enforce MFA using Azure AD or similar solution."),
                evaluated("CIS-5.1", "Antivirus software installed and updated", "Active with current definitions", "Active with current definitions", RuleStatus::Pass, Severity::Critical, ""),
            ],
        },
        HostDetail {
            id: "2".to_string(),
            hostname: "prod-db-primary.corp.local".to_string(),
            os: "Windows Server 2022".to_string(),
            ip_address: "10.0.2.15".to_string(),
            domain: "CORP".to_string(),
            last_seen: "17/11/2025, 14:40:00".to_string(),
            cpu: "Intel Xeon E5-2690 v4".to_string(),
            memory: "64 GB".to_string(),
            disk: "2TB SSD".to_string(),
            uptime: "45 days".to_string(),
            tags: vec!["production".to_string(), "database".to_string(), "critical".to_string()],
            score: 45,
            location: Location::Hyd,
            recent_activity: vec![
                activity("Scan completed", "17/11/2025, 14:40:00", "Score: 45%"),
                activity("Configuration change", "16/11/2025, 09:15:00", "Firewall rules updated"),
                activity("Scan completed", "15/11/2025, 14:30:00", "Score: 42%"),
            ],
            evaluated_rules: vec![
                evaluated("CIS-1.3", "Ensure automatic updates are enabled", "Enabled", "Disabled", RuleStatus::Fail, Severity::Critical, "Enable Windows Update service and configure auto-update policy via GPO."),
                evaluated("CIS-2.1", "Ensure firewall is enabled", "Enabled", "Enabled", RuleStatus::Pass, Severity::High, ""),
                evaluated("ISO-5.3", "Password complexity requirements", "Min 12 chars, complexity enabled", "Min 8 chars, no complexity", RuleStatus::Fail, Severity::High, "Update Group Policy to enforce minimum 12 character passwords with complexity requirements."),
                evaluated("NIST-AC-2", "User account monitoring", "Audit logging enabled", "Audit logging disabled", RuleStatus::Fail, Severity::High, "Enable audit policy for account management events."),
                evaluated("PCI-8.2.3", "Multi-factor authentication", "MFA enforced for all accounts", "MFA not configured", RuleStatus::Fail, Severity::Critical, "Deploy and enforce MFA using Azure AD or similar solution."),
                evaluated("CIS-5.1", "Antivirus software installed and updated", "Active with current definitions", "Active with current definitions", RuleStatus::Pass, Severity::Critical, ""),
            ],
        },
    ]
}

pub fn find_host_detail(id: &str) -> Option<HostDetail> {
    host_details().into_iter().find(|d| d.id == id)
}

/// Endpoint count used by the analytics heuristics.
pub const TOTAL_ENDPOINTS: u32 = 245;

/// Control count shown in report summary metrics.
pub const TOTAL_CONTROLS: u32 = 856;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_list_has_eight_rules() {
        let rules = default_rules();
        assert_eq!(rules.len(), 8);
        assert!(rules.iter().any(|r| r.code == "CIS-1.3"));
        assert!(rules.iter().all(|r| !r.description.is_empty()));
    }

    #[test]
    fn roster_has_one_user_per_role() {
        let roster = users();
        assert_eq!(roster.len(), 4);
        for role in Role::ALL {
            assert_eq!(roster.iter().filter(|u| u.role == role).count(), 1, "{role}");
        }
    }

    #[test]
    fn find_user_matches_id_and_name() {
        assert_eq!(find_user("3").expect("by id").name, "Amit Patel");
        assert_eq!(find_user("sneha reddy").expect("by name").id, "4");
        assert!(find_user("nobody").is_none());
    }

    #[test]
    fn host_scores_match_the_reference_list() {
        let scores: Vec<u32> = hosts().iter().map(|h| h.score).collect();
        assert_eq!(scores, vec![92, 45, 88, 67, 95, 78, 52, 71]);
    }
}
