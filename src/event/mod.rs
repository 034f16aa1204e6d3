//! Sensu Go event model.
//!
//! Only the fields the mutator reads are typed. Everything else is carried in
//! the flattened `extra` maps so an event serializes back exactly as it came
//! in, apart from the points appended to `metrics`.

pub(crate) mod serde_utils;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::metrics::point::Metrics;
use serde_utils::nullable;

/// Name, labels and annotations shared by entities and checks.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub labels: HashMap<String, String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub annotations: HashMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct System {
    #[serde(default, deserialize_with = "nullable")]
    pub hostname: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The agent or proxy entity the check ran against.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Entity {
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub system: System,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    /// Annotation value for `key`, if set.
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata.annotations.get(key).map(String::as_str)
    }
}

/// Result of a single check execution.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Check {
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    /// Exit status of the check command.
    #[serde(default)]
    pub status: u32,
    /// Execution time in seconds.
    #[serde(default)]
    pub duration: f64,
    /// Scheduling interval in seconds.
    #[serde(default)]
    pub interval: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Check {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Label value for `key`. A missing label is the empty string, never an
    /// error.
    #[must_use]
    pub fn label(&self, key: &str) -> &str {
        self.metadata.labels.get(key).map_or("", String::as_str)
    }

    /// Annotation value for `key`, if set.
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata.annotations.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Event {
    /// Epoch seconds.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<Entity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<Check>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    #[must_use]
    pub fn has_check(&self) -> bool {
        self.check.is_some()
    }

    #[must_use]
    pub fn has_metrics(&self) -> bool {
        self.metrics.is_some()
    }

    /// Hostname reported by the entity's system info, empty without an entity.
    #[must_use]
    pub fn hostname(&self) -> &str {
        self.entity
            .as_ref()
            .map_or("", |entity| entity.system.hostname.as_str())
    }
}
