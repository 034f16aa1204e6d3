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

use std::{env, io, path::Path, process::ExitCode};

use metric_mutator::{
    PLUGIN_NAME, PLUGIN_SHORT,
    config::{self, Config},
    logger, runner,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Directory searched for the optional YAML configuration file.
const CONFIG_DIR_ENV: &str = "MUTATOR_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = "/etc/sensu";

fn main() -> ExitCode {
    let config_directory =
        env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = match config::get_config(Path::new(&config_directory)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error executing {PLUGIN_NAME}: {e}");
            return ExitCode::FAILURE;
        }
    };
    enable_logging_subsystem(&config);
    debug!("Starting {PLUGIN_SHORT}");

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match runner::run(&config, stdin, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error executing {PLUGIN_NAME}: {e}");
            ExitCode::FAILURE
        }
    }
}

// Standard output carries the mutated event, so logs go to standard error.
fn enable_logging_subsystem(config: &Config) {
    let env_filter = EnvFilter::try_new(config.log_level.as_filter_directive())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(false)
        .without_time()
        .event_format(logger::Formatter)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
        return;
    }

    debug!("Logging subsystem enabled");
}
