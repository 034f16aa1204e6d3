use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::Check;
use crate::event::serde_utils::nullable;
use crate::metrics::constants::{
    DURATION_SUFFIX, INTERVAL_SUFFIX, POINTS_PER_EVENT, STATUS_INT_SUFFIX, VALUE_SUFFIX,
};
use crate::metrics::tags::{MetricTag, is_critical};

/// A single time-series sample. Points built for the same event share one
/// tag allocation.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct MetricPoint {
    pub name: String,
    pub value: f64,
    pub timestamp: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Arc<[MetricTag]>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Metrics {
    #[serde(default, deserialize_with = "nullable")]
    pub points: Vec<MetricPoint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Check duration in whole milliseconds.
///
/// The scaled value is truncated toward zero, never rounded: `1.2345` s is
/// `1234` ms and `-0.0009` s is `0` ms.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn duration_ms(duration: f64) -> i64 {
    (duration * 1000.0) as i64
}

/// Status code reported in the `status_int` point: doubled for critical
/// checks so they stand apart from the same status on a non-critical one.
#[must_use]
pub fn status_int(check: &Check) -> u64 {
    let status = u64::from(check.status);
    if is_critical(check) { status * 2 } else { status }
}

/// Build the four points for one check result, in emission order.
#[must_use]
pub fn build_points(
    base_name: &str,
    check: &Check,
    timestamp: i64,
    tags: &Arc<[MetricTag]>,
) -> [MetricPoint; POINTS_PER_EVENT] {
    let point = |suffix: &str, value: f64| MetricPoint {
        name: format!("{base_name}{suffix}"),
        value,
        timestamp,
        tags: Arc::clone(tags),
    };

    [
        point(DURATION_SUFFIX, duration_ms(check.duration) as f64),
        point(INTERVAL_SUFFIX, f64::from(check.interval)),
        point(STATUS_INT_SUFFIX, status_int(check) as f64),
        point(VALUE_SUFFIX, 1.0),
    ]
}
