//! Per-event configuration overrides.
//!
//! Entities and checks can carry annotations under the plugin keyspace, e.g.
//! `sensu.io/plugins/sensu-influxdb-metric-mutator/config/metric-name-template`.
//! Entity annotations apply first and check annotations take precedence.
//! Empty annotations are ignored.

use tracing::debug;

use crate::PLUGIN_KEYSPACE;
use crate::config::Config;
use crate::event::Event;

/// Option path of the metric name template within the keyspace.
pub const METRIC_NAME_TEMPLATE_PATH: &str = "metric-name-template";

#[must_use]
pub fn annotation_key(path: &str) -> String {
    format!("{PLUGIN_KEYSPACE}/{path}")
}

/// Returns `config` with any annotation overrides found on `event` applied.
#[must_use]
pub fn apply_overrides(config: &Config, event: &Event) -> Config {
    let key = annotation_key(METRIC_NAME_TEMPLATE_PATH);
    let mut config = config.clone();

    let entity_value = event.entity.as_ref().and_then(|e| e.annotation(&key));
    let check_value = event.check.as_ref().and_then(|c| c.annotation(&key));

    for (source, value) in [("entity", entity_value), ("check", check_value)] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            debug!("Overriding metric name template from {source} annotation: {value:?}");
            config.metric_name_template = value.to_string();
        }
    }
    config
}
