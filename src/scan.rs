//! Scanning orchestration.
//!
//! Runs every registered check over every parsed block and post-processes the
//! findings with the scan config and inline ignore comments.

use crate::checks::{Check, Registry};
use crate::config::ScanConfig;
use crate::parser::{BlockRef, Blocks};
use crate::types::ScanResult;
use rayon::prelude::*;

/// Runs a registry of checks over parsed blocks.
#[derive(Debug)]
pub struct Scanner<'r> {
    registry: &'r Registry,
    config: ScanConfig,
}

impl<'r> Scanner<'r> {
    /// A scanner with the default config.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: ScanConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan all blocks.
    ///
    /// Findings are ordered by check registration order, then by depth-first
    /// block order. The same input always yields the same output.
    pub fn scan(&self, blocks: &Blocks) -> Vec<ScanResult> {
        let walk = blocks.walk();
        let checks: Vec<&dyn Check> = self
            .registry
            .checks()
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| !self.config.is_excluded(c.code()))
            .collect();

        log::debug!(
            "running {} checks over {} blocks",
            checks.len(),
            walk.len()
        );

        let per_check: Vec<Vec<ScanResult>> = checks
            .par_iter()
            .map(|check| run_check(*check, &walk))
            .collect();

        let results: Vec<ScanResult> = per_check
            .into_iter()
            .flatten()
            .filter(|r| self.config.disable_inline_ignores || !blocks.ignores().suppresses(r))
            .filter_map(|r| self.config.apply(r))
            .collect();

        log::debug!("{} findings", results.len());
        results
    }
}

/// Apply one check to every block, skipping blocks the check cannot reason about.
fn run_check(check: &dyn Check, walk: &[BlockRef<'_>]) -> Vec<ScanResult> {
    let mut results = Vec::new();
    for block in walk {
        match check.apply(*block) {
            Ok(found) => results.extend(found),
            Err(err) => log::debug!(
                "{} skipped {} at {}: {}",
                check.code(),
                block.full_name(),
                block.range(),
                err
            ),
        }
    }
    results
}
