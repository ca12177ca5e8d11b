//! Comparison operator test suite
//!
//! [`build_registry`] enumerates every (operator, dtype) pair into a
//! [`TestGroup`] produced by [`create_test_class`]. Each group runs the same
//! case template: declarative runs on random and broadcast fixtures, eager
//! runs, argument type checks and output naming. Results are checked against
//! host oracles element for element.

mod config;
mod factory;
mod registry;
mod report;

pub use config::{DEVICE_ENV, SEED_ENV, SuiteConfig};
pub use factory::{
    BroadcastFixture, CaseContext, CaseKind, TestCase, TestGroup, check_against, create_test_class,
};
pub use registry::{BF16_MIN_TOOLKIT_VERSION, PRIMITIVE_TYPES, build_registry, find_group};
pub use report::{CaseFailure, CaseOutcome, CaseReport, GroupReport, SuiteReport};

use crate::host::FixtureRng;

/// Run `groups` sequentially with fixtures seeded from `config`
pub fn run_suite(groups: &[TestGroup], config: &SuiteConfig) -> SuiteReport {
    let rng = config.seed.map_or_else(FixtureRng::from_entropy, FixtureRng::new);
    let seed = rng.seed();
    log::info!("running {} groups on {} (seed {seed})", groups.len(), config.device);

    let mut ctx = CaseContext::new(config.device.clone(), rng);
    let groups = groups.iter().map(|g| g.run(&mut ctx)).collect();
    SuiteReport { seed, groups }
}
