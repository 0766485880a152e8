use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::audit::AuditLog;
use crate::core::{ComplianceRule, Location, LocationFilter, User};
use crate::data;
use crate::perm::Capability;
use crate::store::{
    COMPLIANCE_RULES_KEY, SESSION_DATA_KEY, Store, USER_PREFERENCES_KEY, load_json, save_json,
};

/// Session-scratch slot: which roster user is active and which location
/// filter was last selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied {
        rule_code: String,
        location: Location,
        previous: bool,
        new_state: bool,
    },
    Denied,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedOutcome {
    Applied,
    Denied,
}

/// Explicit application state: one active user, the rule list, the audit
/// log, and the store they persist to. Single writer; everything mutating
/// goes through the permission-gated methods here.
pub struct AppState {
    store: Box<dyn Store>,
    rules: Vec<ComplianceRule>,
    audit: AuditLog,
    current_user: User,
    selected_location: LocationFilter,
}

impl AppState {
    /// Load persisted rules (falling back to the defaults), the audit log
    /// (bootstrapping on first run), and the session's active user.
    pub fn load(mut store: Box<dyn Store>) -> Result<Self> {
        let rules: Vec<ComplianceRule> =
            load_json(store.as_ref(), COMPLIANCE_RULES_KEY, Vec::new())?;
        let rules = if rules.is_empty() {
            data::default_rules()
        } else {
            rules
        };

        let audit = AuditLog::load(store.as_mut())?;

        let session: SessionData = load_json(store.as_ref(), SESSION_DATA_KEY, SessionData::default())?;
        let roster = data::users();
        let current_user = session
            .active_user_id
            .as_deref()
            .and_then(|id| roster.iter().find(|u| u.id == id).cloned())
            .unwrap_or_else(|| roster[0].clone());
        let selected_location = session
            .selected_location
            .as_deref()
            .and_then(|s| s.parse::<LocationFilter>().ok())
            .unwrap_or_default();

        Ok(Self {
            store,
            rules,
            audit,
            current_user,
            selected_location,
        })
    }

    pub fn rules(&self) -> &[ComplianceRule] {
        &self.rules
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn selected_location(&self) -> LocationFilter {
        self.selected_location
    }

    pub fn has_permission(&self, capability: Capability) -> bool {
        self.current_user.role.allows(capability)
    }

    fn find_rule_index(&self, rule: &str) -> Option<usize> {
        self.rules
            .iter()
            .position(|r| r.code.eq_ignore_ascii_case(rule) || r.id == rule)
    }

    /// The permission-gated, audit-logged toggle pipeline. Ordering on
    /// success: in-memory flip, then persist, then audit — entries always
    /// describe state that has already been committed. A persistence failure
    /// keeps the in-memory flip and is surfaced to the caller instead of
    /// silently diverging.
    pub fn toggle_rule_location(&mut self, rule: &str, location: Location) -> Result<ToggleOutcome> {
        if !self.has_permission(Capability::CanManageRules) {
            let mut metadata = Map::new();
            metadata.insert("ruleId".to_string(), Value::String(rule.to_string()));
            metadata.insert(
                "location".to_string(),
                Value::String(location.to_string()),
            );
            metadata.insert("denied".to_string(), Value::Bool(true));
            let details = format!(
                "User {} attempted to toggle {rule} for {location} but lacks permission",
                self.current_user.name
            );
            self.audit.append(
                self.store.as_mut(),
                "Rule Toggle Denied",
                &self.current_user,
                details,
                metadata,
            )?;
            return Ok(ToggleOutcome::Denied);
        }

        let Some(idx) = self.find_rule_index(rule) else {
            return Ok(ToggleOutcome::NotFound);
        };

        let previous = self.rules[idx].locations.get(location);
        let new_state = !previous;
        self.rules[idx].locations.set(location, new_state);

        let code = self.rules[idx].code.clone();
        let framework = self.rules[idx].framework;
        let severity = self.rules[idx].severity;

        save_json(self.store.as_mut(), COMPLIANCE_RULES_KEY, &self.rules).with_context(|| {
            format!(
                "rule {code} was toggled in memory but could not be persisted; \
                 the saved state is now behind the session"
            )
        })?;

        let action = if new_state { "Rule Enabled" } else { "Rule Disabled" };
        let verb = if new_state { "Enabled" } else { "Disabled" };
        let details = format!("{verb} {code} ({framework}) for {location} location");
        let mut metadata = Map::new();
        metadata.insert("ruleId".to_string(), Value::String(code.clone()));
        metadata.insert("location".to_string(), Value::String(location.to_string()));
        metadata.insert(
            "framework".to_string(),
            Value::String(framework.to_string()),
        );
        metadata.insert(
            "severity".to_string(),
            Value::String(severity.to_string()),
        );
        metadata.insert("previousState".to_string(), Value::Bool(previous));
        metadata.insert("newState".to_string(), Value::Bool(new_state));
        self.audit
            .append(self.store.as_mut(), action, &self.current_user, details, metadata)?;

        Ok(ToggleOutcome::Applied {
            rule_code: code,
            location,
            previous,
            new_state,
        })
    }

    /// Restore the default rule list, clearing the persisted override
    /// (rather than writing the defaults back). Denies silently.
    pub fn reset_compliance_rules(&mut self) -> Result<GatedOutcome> {
        if !self.has_permission(Capability::CanManageRules) {
            return Ok(GatedOutcome::Denied);
        }

        self.rules = data::default_rules();
        self.store
            .as_mut()
            .remove(COMPLIANCE_RULES_KEY)
            .context("failed to clear the persisted rule list")?;

        let mut metadata = Map::new();
        metadata.insert(
            "resetBy".to_string(),
            Value::String(self.current_user.name.clone()),
        );
        self.audit.append(
            self.store.as_mut(),
            "Rules Reset",
            &self.current_user,
            "All compliance rules reset to default configuration".to_string(),
            metadata,
        )?;
        Ok(GatedOutcome::Applied)
    }

    /// Record a completed (simulated) rescan. The artificial delay itself
    /// lives with the caller; this only gates and logs.
    pub fn record_rescan(&mut self) -> Result<GatedOutcome> {
        if !self.has_permission(Capability::CanRescan) {
            return Ok(GatedOutcome::Denied);
        }
        let mut metadata = Map::new();
        metadata.insert(
            "location".to_string(),
            Value::String(self.selected_location.to_string()),
        );
        self.audit.append(
            self.store.as_mut(),
            "Rescan Triggered",
            &self.current_user,
            "Manual compliance rescan completed".to_string(),
            metadata,
        )?;
        Ok(GatedOutcome::Applied)
    }

    /// Record a generated report.
    pub fn record_report_generated(&mut self, report_name: &str) -> Result<GatedOutcome> {
        if !self.has_permission(Capability::CanGenerateReports) {
            return Ok(GatedOutcome::Denied);
        }
        let mut metadata = Map::new();
        metadata.insert(
            "report".to_string(),
            Value::String(report_name.to_string()),
        );
        self.audit.append(
            self.store.as_mut(),
            "Report Generated",
            &self.current_user,
            format!("Generated report: {report_name}"),
            metadata,
        )?;
        Ok(GatedOutcome::Applied)
    }

    /// Bulk-clear the audit log. The clearing action itself is logged after
    /// the clear so the operation stays traceable.
    pub fn clear_audit_log(&mut self) -> Result<GatedOutcome> {
        if !self.has_permission(Capability::CanChangeSettings) {
            return Ok(GatedOutcome::Denied);
        }
        self.audit.clear(self.store.as_mut())?;
        self.audit.append(
            self.store.as_mut(),
            "Audit Log Cleared",
            &self.current_user,
            "Audit log bulk-cleared".to_string(),
            Map::new(),
        )?;
        Ok(GatedOutcome::Applied)
    }

    /// Select another roster user. Local session action, no authentication.
    pub fn switch_user(&mut self, query: &str) -> Result<Option<User>> {
        let Some(user) = data::find_user(query) else {
            return Ok(None);
        };
        self.current_user = user.clone();
        self.persist_session()?;
        Ok(Some(user))
    }

    pub fn set_selected_location(&mut self, filter: LocationFilter) -> Result<()> {
        self.selected_location = filter;
        self.persist_session()
    }

    fn persist_session(&mut self) -> Result<()> {
        let session = SessionData {
            active_user_id: Some(self.current_user.id.clone()),
            selected_location: Some(self.selected_location.to_string()),
        };
        save_json(self.store.as_mut(), SESSION_DATA_KEY, &session)
            .context("failed to persist session data")
    }

    pub fn preference(&self, key: &str) -> Result<Option<String>> {
        let prefs: Map<String, Value> =
            load_json(self.store.as_ref(), USER_PREFERENCES_KEY, Map::new())?;
        Ok(prefs.get(key).and_then(Value::as_str).map(str::to_string))
    }

    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<()> {
        let mut prefs: Map<String, Value> =
            load_json(self.store.as_ref(), USER_PREFERENCES_KEY, Map::new())?;
        prefs.insert(key.to_string(), Value::String(value.to_string()));
        save_json(self.store.as_mut(), USER_PREFERENCES_KEY, &prefs)
            .context("failed to persist user preferences")
    }
}
