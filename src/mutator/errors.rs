//! Error types for `mutator` module

use crate::template::TemplateError;

/// Failures from [`crate::mutator::Mutator::mutate`]. The event is left
/// untouched whenever one of these is returned.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MutatorError {
    /// The event carries no check result to turn into metrics.
    #[error("event has no check")]
    MissingCheck,
    /// The metric name template could not be evaluated against the event.
    #[error("failed to evaluate template: {0}")]
    Template(#[from] TemplateError),
}
