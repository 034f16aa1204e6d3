pub mod annotations;
pub mod log_level;

use std::env;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::log_level::LogLevel;

/// Metric base name used when nothing else is configured.
pub const DEFAULT_METRIC_NAME_TEMPLATE: &str = "{{.Check.Name}}.status";

/// Optional configuration file looked up in the configuration directory.
pub const CONFIG_FILE_NAME: &str = "sensu-influxdb-metric-mutator.yaml";

/// Prefix for environment overrides such as `MUTATOR_LOG_LEVEL`.
pub const ENV_PREFIX: &str = "MUTATOR_";

/// Environment variable carrying the metric name template.
pub const METRIC_NAME_TEMPLATE_ENV: &str = "METRIC_NAME_TEMPLATE";

#[derive(Debug, PartialEq, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_template")]
    pub metric_name_template: String,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            metric_name_template: DEFAULT_METRIC_NAME_TEMPLATE.to_string(),
            log_level: LogLevel::default(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    ParseError(String),
    #[error(
        "metric name template is required: set METRIC_NAME_TEMPLATE, MUTATOR_METRIC_NAME_TEMPLATE or metric_name_template in the config file"
    )]
    MissingTemplate,
}

/// Load the configuration.
///
/// Sources, lowest precedence first: built-in defaults, the YAML file in
/// `config_directory`, `MUTATOR_*` environment variables, and finally
/// `METRIC_NAME_TEMPLATE`.
///
/// Template variables are taken verbatim. `Env` would coerce values such as
/// `007` or `true` before they reach the template field.
#[allow(clippy::module_name_repetitions)]
pub fn get_config(config_directory: &Path) -> Result<Config, ConfigError> {
    let path = config_directory.join(CONFIG_FILE_NAME);

    let mut figment = Figment::new()
        .merge(Yaml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&[TEMPLATE_KEY]));

    let prefixed_template_env = format!("{ENV_PREFIX}{METRIC_NAME_TEMPLATE_ENV}");
    for var in [prefixed_template_env.as_str(), METRIC_NAME_TEMPLATE_ENV] {
        if let Ok(template) = env::var(var) {
            figment = figment.merge(Serialized::default(TEMPLATE_KEY, template));
        }
    }

    figment
        .extract()
        .map_err(|err| ConfigError::ParseError(err.to_string()))
}

const TEMPLATE_KEY: &str = "metric_name_template";

// An empty environment variable may reach us as a unit value rather than an
// empty string; both mean "no template".
fn deserialize_template<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("expected a string template")),
    }
}

/// Validation hook run before an event is mutated.
pub fn check_args(config: &Config) -> Result<(), ConfigError> {
    if config.metric_name_template.is_empty() {
        return Err(ConfigError::MissingTemplate);
    }
    Ok(())
}
