use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    #[serde(rename = "Local Admin")]
    LocalAdmin,
    Auditor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::LocalAdmin, Role::Auditor, Role::Viewer];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::LocalAdmin => "Local Admin",
            Role::Auditor => "Auditor",
            Role::Viewer => "Viewer",
        }
    }

    pub const fn is_admin(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::LocalAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "super admin" | "super-admin" | "superadmin" => Ok(Role::SuperAdmin),
            "local admin" | "local-admin" | "localadmin" => Ok(Role::LocalAdmin),
            "auditor" => Ok(Role::Auditor),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!(
                "invalid role: {other} (expected Super Admin|Local Admin|Auditor|Viewer)"
            )),
        }
    }
}

/// One entry of the fixed user roster. There is no authentication; switching
/// users is a local session action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub initials: String,
}
