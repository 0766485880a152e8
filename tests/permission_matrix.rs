use racap::core::Role;
use racap::perm::{Capability, has_permission};

fn granted(role: Role) -> Vec<Capability> {
    Capability::ALL
        .into_iter()
        .filter(|c| has_permission(role, *c))
        .collect()
}

#[test]
fn super_admin_holds_every_capability() {
    assert_eq!(granted(Role::SuperAdmin).len(), Capability::ALL.len());
}

#[test]
fn local_admin_lacks_exactly_the_destructive_and_global_capabilities() {
    let denied: Vec<Capability> = Capability::ALL
        .into_iter()
        .filter(|c| !has_permission(Role::LocalAdmin, *c))
        .collect();
    assert_eq!(
        denied,
        vec![
            Capability::CanDelete,
            Capability::CanManageUsers,
            Capability::CanChangeSettings,
        ]
    );
}

#[test]
fn auditor_is_read_and_report_only() {
    assert_eq!(
        granted(Role::Auditor),
        vec![
            Capability::CanExport,
            Capability::CanGenerateReports,
            Capability::CanViewAuditLogs,
        ]
    );
}

#[test]
fn viewer_holds_nothing() {
    assert!(granted(Role::Viewer).is_empty());
}

#[test]
fn unknown_combinations_never_panic() {
    for role in Role::ALL {
        for capability in Capability::ALL {
            let _ = has_permission(role, capability);
        }
    }
}
