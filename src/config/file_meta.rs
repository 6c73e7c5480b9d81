use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Provenance block of a method configuration document: who maintains it,
/// which file it is, when it last changed, and the full change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Document author / maintainer
    pub author: String,

    /// Contact email of the maintainer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Document identifier (typically the file name)
    pub file: String,

    /// Date the document was last modified (ISO 8601 calendar date)
    pub modification_date: NaiveDate,

    /// Ordered, append-only change history
    #[serde(default, skip_serializing_if = "ChangeLog::is_empty")]
    pub change_log: ChangeLog,
}

/// One change-log entry: a version string and a free-text description of
/// what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeLogEntry {
    /// Version string, e.g. "v0.1"
    pub version: String,

    /// Free-text description of the change
    pub description: String,
}

/// Append-only audit trail of document revisions.
///
/// Entries keep the order in which their versions appear in the document.
/// There is deliberately no removal API: history is only ever appended to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeLog {
    entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    /// Create an empty change log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for `version`.
    pub fn push(&mut self, version: impl Into<String>, description: impl Into<String>) {
        self.entries.push(ChangeLogEntry {
            version: version.into(),
            description: description.into(),
        });
    }

    /// Iterate entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeLogEntry> {
        self.entries.iter()
    }

    /// The most recently appended entry.
    pub fn latest(&self) -> Option<&ChangeLogEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// The document stores the change log as a JSON object keyed by version
// string, so (de)serialization goes through a map rather than a sequence.
impl Serialize for ChangeLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.version, &entry.description)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChangeLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChangeLogVisitor;

        impl<'de> Visitor<'de> for ChangeLogVisitor {
            type Value = ChangeLog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of version string to change description")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut log = ChangeLog::new();
                while let Some((version, description)) = access.next_entry::<String, String>()? {
                    log.push(version, description);
                }
                Ok(log)
            }
        }

        deserializer.deserialize_map(ChangeLogVisitor)
    }
}
