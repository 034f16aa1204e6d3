//! Crate for the `sensu-influxdb-metric-mutator` Sensu plugin
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]

pub mod config;
pub mod event;
pub mod logger;
pub mod metrics;
pub mod mutator;
pub mod runner;
pub mod template;

pub const PLUGIN_NAME: &str = "sensu-influxdb-metric-mutator";
pub const PLUGIN_SHORT: &str = "Sensu InfluxDB Metric Mutator";
pub const PLUGIN_KEYSPACE: &str = "sensu.io/plugins/sensu-influxdb-metric-mutator/config";
