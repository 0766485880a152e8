use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Role;

/// A named permission flag checked before a mutating action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    CanEdit,
    CanDelete,
    CanExport,
    CanRescan,
    CanManageUsers,
    CanManageRules,
    CanGenerateReports,
    CanViewAuditLogs,
    CanChangeSettings,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::CanEdit,
        Capability::CanDelete,
        Capability::CanExport,
        Capability::CanRescan,
        Capability::CanManageUsers,
        Capability::CanManageRules,
        Capability::CanGenerateReports,
        Capability::CanViewAuditLogs,
        Capability::CanChangeSettings,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::CanEdit => "canEdit",
            Capability::CanDelete => "canDelete",
            Capability::CanExport => "canExport",
            Capability::CanRescan => "canRescan",
            Capability::CanManageUsers => "canManageUsers",
            Capability::CanManageRules => "canManageRules",
            Capability::CanGenerateReports => "canGenerateReports",
            Capability::CanViewAuditLogs => "canViewAuditLogs",
            Capability::CanChangeSettings => "canChangeSettings",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "canedit" | "edit" => Ok(Capability::CanEdit),
            "candelete" | "delete" => Ok(Capability::CanDelete),
            "canexport" | "export" => Ok(Capability::CanExport),
            "canrescan" | "rescan" => Ok(Capability::CanRescan),
            "canmanageusers" | "manageusers" => Ok(Capability::CanManageUsers),
            "canmanagerules" | "managerules" => Ok(Capability::CanManageRules),
            "cangeneratereports" | "generatereports" => Ok(Capability::CanGenerateReports),
            "canviewauditlogs" | "viewauditlogs" => Ok(Capability::CanViewAuditLogs),
            "canchangesettings" | "changesettings" => Ok(Capability::CanChangeSettings),
            _ => Err(format!("invalid capability: {s}")),
        }
    }
}

/// Static role→capability matrix. This table is the single source of truth
/// for authorization; it is never mutated at runtime and lookup cannot fail.
pub const fn has_permission(role: Role, capability: Capability) -> bool {
    match role {
        Role::SuperAdmin => true,
        Role::LocalAdmin => match capability {
            Capability::CanEdit
            | Capability::CanExport
            | Capability::CanRescan
            | Capability::CanManageRules
            | Capability::CanGenerateReports
            | Capability::CanViewAuditLogs => true,
            Capability::CanDelete
            | Capability::CanManageUsers
            | Capability::CanChangeSettings => false,
        },
        Role::Auditor => match capability {
            Capability::CanExport
            | Capability::CanGenerateReports
            | Capability::CanViewAuditLogs => true,
            Capability::CanEdit
            | Capability::CanDelete
            | Capability::CanRescan
            | Capability::CanManageUsers
            | Capability::CanManageRules
            | Capability::CanChangeSettings => false,
        },
        Role::Viewer => false,
    }
}

impl Role {
    pub const fn allows(self, capability: Capability) -> bool {
        has_permission(self, capability)
    }

    pub fn capabilities(self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|cap| self.allows(*cap))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_has_every_capability() {
        for cap in Capability::ALL {
            assert!(Role::SuperAdmin.allows(cap), "{cap}");
        }
    }

    #[test]
    fn viewer_has_none() {
        for cap in Capability::ALL {
            assert!(!Role::Viewer.allows(cap), "{cap}");
        }
    }

    #[test]
    fn local_admin_cannot_delete_or_manage_users() {
        assert!(Role::LocalAdmin.allows(Capability::CanManageRules));
        assert!(!Role::LocalAdmin.allows(Capability::CanDelete));
        assert!(!Role::LocalAdmin.allows(Capability::CanManageUsers));
        assert!(!Role::LocalAdmin.allows(Capability::CanChangeSettings));
    }

    #[test]
    fn auditor_is_read_and_export_only() {
        assert!(Role::Auditor.allows(Capability::CanExport));
        assert!(Role::Auditor.allows(Capability::CanGenerateReports));
        assert!(Role::Auditor.allows(Capability::CanViewAuditLogs));
        assert!(!Role::Auditor.allows(Capability::CanRescan));
        assert!(!Role::Auditor.allows(Capability::CanManageRules));
    }
}
