use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::{AuditLogEntry, User};
use crate::store::{AUDIT_LOGS_KEY, Store, load_json, save_json};

/// Hard cap on retained entries; the oldest are silently dropped beyond it.
pub const MAX_ENTRIES: usize = 1000;

/// Default window for in-app display.
pub const DISPLAY_COUNT: usize = 100;

static ENTRY_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_entry_id(now: OffsetDateTime) -> String {
    let seq = ENTRY_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("log_{}_{seq}", now.unix_timestamp_nanos())
}

/// Append-only audit log, newest first, persisted whole under its slot.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditLogEntry>,
}

impl AuditLog {
    /// Load the persisted log. Missing or malformed data yields an empty log;
    /// first run appends a bootstrap entry.
    pub fn load(store: &mut dyn Store) -> Result<Self> {
        let entries: Vec<AuditLogEntry> = load_json(store, AUDIT_LOGS_KEY, Vec::new())?;
        let mut log = Self { entries };
        if log.entries.is_empty() {
            log.append_raw(
                store,
                "System Initialized",
                "system",
                "System",
                "System",
                "Local state store initialized successfully".to_string(),
                Map::new(),
            )?;
        }
        Ok(log)
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        store: &mut dyn Store,
        action: &str,
        user: &User,
        details: String,
        metadata: Map<String, Value>,
    ) -> Result<()> {
        self.append_raw(
            store,
            action,
            &user.id,
            &user.name,
            user.role.as_str(),
            details,
            metadata,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn append_raw(
        &mut self,
        store: &mut dyn Store,
        action: &str,
        user_id: &str,
        user_name: &str,
        role: &str,
        details: String,
        metadata: Map<String, Value>,
    ) -> Result<()> {
        let now = OffsetDateTime::now_utc();
        let entry = AuditLogEntry {
            id: next_entry_id(now),
            action: action.to_string(),
            user: user_id.to_string(),
            user_name: user_name.to_string(),
            role: role.to_string(),
            timestamp: now
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
            details,
            metadata,
        };

        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
        save_json(store, AUDIT_LOGS_KEY, &self.entries)
            .context("failed to persist the audit log")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All retained entries, newest first.
    pub fn all(&self) -> &[AuditLogEntry] {
        &self.entries
    }

    /// The `min(count, len)` newest entries.
    pub fn recent(&self, count: usize) -> &[AuditLogEntry] {
        &self.entries[..count.min(self.entries.len())]
    }

    pub fn newest(&self) -> Option<&AuditLogEntry> {
        self.entries.first()
    }

    /// Newest-first entries matching every given predicate, evaluated over
    /// the whole retained log. Entries with an unparsable timestamp never
    /// match a time range.
    pub fn query(
        &self,
        user_name: Option<&str>,
        action: Option<&str>,
        range: Option<(OffsetDateTime, OffsetDateTime)>,
    ) -> Vec<&AuditLogEntry> {
        self.entries
            .iter()
            .filter(|e| user_name.is_none_or(|u| e.user_name == u))
            .filter(|e| action.is_none_or(|a| e.action == a))
            .filter(|e| match range {
                None => true,
                Some((start, end)) => {
                    match OffsetDateTime::parse(&e.timestamp, &Rfc3339) {
                        Ok(ts) => ts >= start && ts <= end,
                        Err(_) => false,
                    }
                }
            })
            .collect()
    }

    /// Full log as a pretty-printed JSON blob.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).context("failed to serialize the audit log")
    }

    /// Bulk clear: drops every entry and the persisted copy.
    pub fn clear(&mut self, store: &mut dyn Store) -> Result<()> {
        self.entries.clear();
        store
            .remove(AUDIT_LOGS_KEY)
            .context("failed to clear the persisted audit log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;
    use crate::store::MemStore;

    fn test_user() -> User {
        User {
            id: "1".to_string(),
            name: "Rajesh Kumar".to_string(),
            email: "rajesh.kumar@digitruce.com".to_string(),
            role: Role::SuperAdmin,
            initials: "RK".to_string(),
        }
    }

    #[test]
    fn first_load_appends_bootstrap_entry() {
        let mut store = MemStore::new();
        let log = AuditLog::load(&mut store).expect("load");
        assert_eq!(log.len(), 1);
        assert_eq!(log.newest().expect("entry").action, "System Initialized");
        assert!(store.contains(AUDIT_LOGS_KEY));
    }

    #[test]
    fn entries_are_newest_first() {
        let mut store = MemStore::new();
        let mut log = AuditLog::empty();
        let user = test_user();
        for i in 0..3 {
            log.append(&mut store, "Action", &user, format!("entry {i}"), Map::new())
                .expect("append");
        }
        assert_eq!(log.newest().expect("entry").details, "entry 2");
        assert_eq!(log.recent(2).len(), 2);
        assert_eq!(log.recent(2)[1].details, "entry 1");
    }

    #[test]
    fn cap_drops_oldest_beyond_1000() {
        let mut store = MemStore::new();
        let mut log = AuditLog::empty();
        let user = test_user();
        for i in 0..(MAX_ENTRIES + 1) {
            log.append(&mut store, "Action", &user, format!("entry {i}"), Map::new())
                .expect("append");
        }
        assert_eq!(log.len(), MAX_ENTRIES);
        // entry 0 fell off the end; the newest survives.
        assert_eq!(log.newest().expect("entry").details, "entry 1000");
        assert_eq!(
            log.all().last().expect("oldest").details,
            "entry 1".to_string()
        );
    }

    #[test]
    fn recent_never_exceeds_len() {
        let mut store = MemStore::new();
        let mut log = AuditLog::empty();
        let user = test_user();
        log.append(&mut store, "Action", &user, "only".to_string(), Map::new())
            .expect("append");
        assert_eq!(log.recent(50).len(), 1);
    }

    #[test]
    fn query_combines_pure_predicates() {
        let mut store = MemStore::new();
        let mut log = AuditLog::empty();
        let user = test_user();
        log.append(&mut store, "Rule Enabled", &user, "a".to_string(), Map::new())
            .expect("append");
        log.append(&mut store, "Rule Disabled", &user, "b".to_string(), Map::new())
            .expect("append");

        assert_eq!(log.query(None, Some("Rule Enabled"), None).len(), 1);
        assert_eq!(log.query(Some("Rajesh Kumar"), None, None).len(), 2);
        assert_eq!(log.query(Some("Nobody"), None, None).len(), 0);
        assert_eq!(
            log.query(Some("Rajesh Kumar"), Some("Rule Disabled"), None).len(),
            1
        );

        let now = OffsetDateTime::now_utc();
        let window = log.query(None, None, Some((now - time::Duration::minutes(1), now)));
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn clear_removes_entries_and_slot() {
        let mut store = MemStore::new();
        let mut log = AuditLog::load(&mut store).expect("load");
        log.clear(&mut store).expect("clear");
        assert!(log.is_empty());
        assert!(!store.contains(AUDIT_LOGS_KEY));
    }
}
