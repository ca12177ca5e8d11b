//! Run the comparison operator suite
//!
//! Usage: `run_compare_suite [FILTER]`. Only groups whose name contains
//! `FILTER` run. Configuration comes from `ACCEL_COMPARE_DEVICE`,
//! `ACCEL_COMPARE_SEED` and `ACCEL_TOOLKIT_VERSION`; `RUST_LOG` sets verbosity.

use accel_compare::harness::{SuiteConfig, build_registry, run_suite};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match SuiteConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };

    let filter = std::env::args().nth(1);
    let groups: Vec<_> = build_registry(config.toolkit_version)
        .into_iter()
        .filter(|g| filter.as_deref().is_none_or(|f| g.name().contains(f)))
        .collect();
    if groups.is_empty() {
        log::error!("no groups match {filter:?}");
        return ExitCode::from(2);
    }

    let report = run_suite(&groups, &config);
    if report.is_success() {
        log::info!("{report}");
        ExitCode::SUCCESS
    } else {
        log::error!("{report}");
        ExitCode::FAILURE
    }
}
