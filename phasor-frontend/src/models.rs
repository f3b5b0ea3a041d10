use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Fait d'instance tel que renvoyé par le backend
///
/// Se décode uniquement depuis un objet JSON : un tableau ne passe jamais pour un snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct InstanceSnapshot {
    pub version: String,
    pub hostname: String,
    #[serde(rename = "uptime")]
    pub uptime_display: String,
    pub runtime_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Deserialize)]
struct SnapshotFields {
    #[serde(default)]
    version: String,
    #[serde(default)]
    hostname: String,
    #[serde(default)]
    uptime: String,
    // Les anciens backends envoient encore `go_version`
    #[serde(alias = "go_version", default)]
    runtime_version: String,
    #[serde(with = "time::serde::rfc3339", default = "unix_epoch")]
    timestamp: OffsetDateTime,
}

fn unix_epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

impl TryFrom<Map<String, Value>> for InstanceSnapshot {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: SnapshotFields = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            version: fields.version,
            hostname: fields.hostname,
            uptime_display: fields.uptime,
            runtime_version: fields.runtime_version,
            timestamp: fields.timestamp,
        })
    }
}

impl InstanceSnapshot {
    /// Placeholder shown in a tile whose fetch failed
    pub fn fetch_failed() -> Self {
        Self {
            version: "error".into(),
            hostname: "failed to fetch".into(),
            uptime_display: "N/A".into(),
            runtime_version: "N/A".into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Clé de couleur : `hostname|version`
    pub fn color_key(&self) -> String {
        format!("{}|{}", self.hostname, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileRecord {
    /// 1-based, dense after renumbering
    pub position: usize,
    pub snapshot: InstanceSnapshot,
    pub color: String,
    pub label_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexView {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_backend_body() {
        let snapshot: InstanceSnapshot = serde_json::from_value(json!({
            "version": "1.0.0",
            "hostname": "h1",
            "uptime": "1h 2s",
            "runtime_version": "rustc 1.80.0",
            "timestamp": "2025-01-01T12:00:00Z",
        }))
        .unwrap();

        assert_eq!(snapshot.hostname, "h1");
        assert_eq!(snapshot.uptime_display, "1h 2s");
        assert_eq!(snapshot.runtime_version, "rustc 1.80.0");
        assert_eq!(snapshot.timestamp.year(), 2025);
    }

    #[test]
    fn test_decode_legacy_go_version_and_missing_fields() {
        let snapshot: InstanceSnapshot = serde_json::from_value(json!({
            "version": "2.0.0",
            "hostname": "test-host",
            "go_version": "go1.23",
            "uptime": "1h0m0s",
        }))
        .unwrap();

        assert_eq!(snapshot.runtime_version, "go1.23");
        assert_eq!(snapshot.timestamp, OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(serde_json::from_value::<InstanceSnapshot>(json!(["not", "an", "object"])).is_err());
        assert!(serde_json::from_str::<InstanceSnapshot>(r#"["evil-host","x","y"]"#).is_err());
        assert!(serde_json::from_str::<InstanceSnapshot>("\"h1\"").is_err());
        assert!(serde_json::from_value::<InstanceSnapshot>(json!(null)).is_err());
        assert!(serde_json::from_value::<InstanceSnapshot>(json!({ "timestamp": "yesterday" })).is_err());
    }

    #[test]
    fn test_serialized_form_decodes_back() {
        let original = InstanceSnapshot {
            version: "1.0.0".into(),
            hostname: "h1".into(),
            uptime_display: "3s".into(),
            runtime_version: "rustc 1.80.0".into(),
            timestamp: OffsetDateTime::UNIX_EPOCH,
        };
        let value = serde_json::to_value(&original).unwrap();
        assert_eq!(value["uptime"], "3s");
        assert_eq!(serde_json::from_value::<InstanceSnapshot>(value).unwrap(), original);
    }

    #[test]
    fn test_fetch_failed_placeholder() {
        let s = InstanceSnapshot::fetch_failed();
        assert_eq!(s.version, "error");
        assert_eq!(s.hostname, "failed to fetch");
        assert_eq!(s.uptime_display, "N/A");
        assert_eq!(s.runtime_version, "N/A");
        assert_eq!(s.color_key(), "failed to fetch|error");
    }
}
