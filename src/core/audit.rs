use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Immutable record of one administrative action. Created once, never
/// mutated; the containing log is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub action: String,
    /// Acting user id.
    pub user: String,
    pub user_name: String,
    pub role: String,
    /// RFC 3339 timestamp assigned at append time.
    pub timestamp: String,
    pub details: String,
    /// Free-form extra metadata, kept flat in the serialized form.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl AuditLogEntry {
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub fn metadata_bool(&self, key: &str) -> Option<bool> {
        self.metadata.get(key).and_then(Value::as_bool)
    }
}
