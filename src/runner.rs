//! Plugin lifecycle: read one event, mutate it, write it back.
//!
//! Sensu pipes the event JSON to the mutator's standard input and reads the
//! mutated event from its standard output.

use std::io::{self, Read, Write};

use tracing::{debug, info};

use crate::config::{self, Config, ConfigError, annotations};
use crate::event::{Check, Event};
use crate::mutator::Mutator;
use crate::mutator::errors::MutatorError;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read event: {0}")]
    Read(#[source] io::Error),
    #[error("failed to unmarshal event: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid event: {0}")]
    InvalidEvent(&'static str),
    #[error(transparent)]
    Mutate(#[from] MutatorError),
    #[error("failed to marshal event: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write event: {0}")]
    Write(#[source] io::Error),
}

/// Run the mutator once over the event read from `reader`, writing the
/// mutated event to `writer`.
///
/// Nothing is written when an error is returned.
///
/// # Errors
///
/// Configuration problems are reported before the input is touched. Input
/// that is not an event, an event without an entity, or a failed mutation
/// end the run with the matching [`RunnerError`].
pub fn run<R: Read, W: Write>(
    config: &Config,
    mut reader: R,
    mut writer: W,
) -> Result<(), RunnerError> {
    config::check_args(config)?;

    let mut input = Vec::new();
    reader.read_to_end(&mut input).map_err(RunnerError::Read)?;
    debug!("Read {} bytes of event data", input.len());

    let mut event: Event = serde_json::from_slice(&input).map_err(RunnerError::Decode)?;
    validate_event(&event)?;

    let config = annotations::apply_overrides(config, &event);
    config::check_args(&config)?;

    let mutator = Mutator::from_config(&config);
    mutator.mutate(&mut event)?;

    let output = serde_json::to_vec(&event).map_err(RunnerError::Encode)?;
    writer.write_all(&output).map_err(RunnerError::Write)?;
    writer.flush().map_err(RunnerError::Write)?;

    info!(
        "Mutated event for check {:?} on {:?}",
        event.check.as_ref().map_or("", Check::name),
        event.hostname()
    );
    Ok(())
}

fn validate_event(event: &Event) -> Result<(), RunnerError> {
    if event.entity.is_none() {
        return Err(RunnerError::InvalidEvent("event must contain an entity"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &str = r#"{
        "timestamp": 1700000000,
        "entity": {"system": {"hostname": "h1"}, "metadata": {"name": "h1"}},
        "check": {"status": 0, "duration": 0.25, "interval": 30, "metadata": {"name": "ping"}}
    }"#;

    #[test]
    fn test_run_writes_event() {
        let mut output = Vec::new();
        run(&Config::default(), EVENT.as_bytes(), &mut output).expect("should run");

        let event: Event = serde_json::from_slice(&output).expect("output should be an event");
        let points = event.metrics.expect("metrics should exist").points;
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].name, "ping.status.integerType.duration");
        assert!((points[0].value - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_template_is_rejected_before_reading() {
        struct Unreadable;
        impl Read for Unreadable {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                panic!("input must not be read");
            }
        }

        let config = Config {
            metric_name_template: String::new(),
            ..Config::default()
        };
        let mut output = Vec::new();
        let err = run(&config, Unreadable, &mut output).expect_err("should fail");
        assert!(matches!(err, RunnerError::Config(ConfigError::MissingTemplate)));
        assert!(output.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let mut output = Vec::new();
        let err = run(&Config::default(), &b"not json"[..], &mut output).expect_err("should fail");
        assert!(matches!(err, RunnerError::Decode(_)));
        assert!(output.is_empty());
    }

    #[test]
    fn test_event_without_entity() {
        let mut output = Vec::new();
        let err = run(
            &Config::default(),
            &br#"{"check": {"metadata": {"name": "ping"}}}"#[..],
            &mut output,
        )
        .expect_err("should fail");
        assert!(matches!(err, RunnerError::InvalidEvent(_)));
        assert!(output.is_empty());
    }

    #[test]
    fn test_event_without_check() {
        let mut output = Vec::new();
        let err = run(
            &Config::default(),
            &br#"{"entity": {"system": {"hostname": "h1"}}}"#[..],
            &mut output,
        )
        .expect_err("should fail");
        assert!(matches!(err, RunnerError::Mutate(MutatorError::MissingCheck)));
        assert_eq!(err.to_string(), "event has no check");
        assert!(output.is_empty());
    }
}
