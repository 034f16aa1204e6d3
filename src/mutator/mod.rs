pub mod errors;

use tracing::debug;

use crate::config::Config;
use crate::event::Event;
use crate::metrics::point::{Metrics, build_points};
use crate::metrics::tags::build_tags;
use crate::template;
use errors::MutatorError;

/// Turns a check event into status metric points.
///
/// Holds nothing but the name template, so one instance can serve any number
/// of events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutator {
    metric_name_template: String,
}

impl Mutator {
    #[must_use]
    pub fn new(metric_name_template: impl Into<String>) -> Mutator {
        Mutator {
            metric_name_template: metric_name_template.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Mutator {
        Mutator::new(config.metric_name_template.clone())
    }

    #[must_use]
    pub fn metric_name_template(&self) -> &str {
        &self.metric_name_template
    }

    /// Append the duration, interval, `status_int` and constant value points
    /// for the event's check to `event.metrics.points`.
    ///
    /// Points already present are kept, so running twice on the same event
    /// yields eight points.
    ///
    /// # Errors
    ///
    /// Returns [`MutatorError::MissingCheck`] when the event has no check and
    /// [`MutatorError::Template`] when the base name cannot be rendered. In
    /// both cases the event is not modified.
    pub fn mutate<'a>(&self, event: &'a mut Event) -> Result<&'a mut Event, MutatorError> {
        let Some(check) = event.check.as_ref() else {
            return Err(MutatorError::MissingCheck);
        };

        let base_name = template::render(&self.metric_name_template, event)?;
        debug!("Rendered metric base name {base_name:?}");

        let tags = build_tags(check, event.hostname());
        let points = build_points(&base_name, check, event.timestamp, &tags);

        event
            .metrics
            .get_or_insert_with(Metrics::default)
            .points
            .extend(points);

        Ok(event)
    }
}
