//! Slot machine — grid generation plus evaluation over one configuration

use std::sync::Arc;

use rand::Rng;

use crate::config::SlotConfig;
use crate::error::{SlotError, SlotResult};
use crate::grid::{Grid, GridGenerator};
use crate::scatter::ScatterEvaluator;
use crate::spin::SpinResult;
use crate::ways::WaysEvaluator;

/// Stateless slot machine.
///
/// Only [`SlotMachine::spin`] consumes randomness; [`SlotMachine::evaluate`]
/// is a pure function of grid, bet and configuration.
#[derive(Debug, Clone)]
pub struct SlotMachine {
    config: Arc<SlotConfig>,
}

impl SlotMachine {
    /// Create a machine, rejecting invalid configurations
    pub fn new(config: SlotConfig) -> SlotResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Share an already validated configuration
    pub fn from_shared(config: Arc<SlotConfig>) -> SlotResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<SlotConfig> {
        Arc::clone(&self.config)
    }

    /// Generate a grid only
    pub fn generate_grid<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        GridGenerator::new(&self.config).generate(rng)
    }

    /// Generate and evaluate one spin
    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R, bet: u64, is_free_spin: bool) -> SpinResult {
        let grid = self.generate_grid(rng);
        self.score(grid, bet, is_free_spin)
    }

    /// Evaluate a fixed grid, which must have the configured shape
    pub fn evaluate(&self, grid: Grid, bet: u64, is_free_spin: bool) -> SlotResult<SpinResult> {
        let spec = self.config.grid;
        if grid.reel_count() != spec.reels || grid.row_count() != spec.rows {
            return Err(SlotError::GridShape {
                reels: grid.reel_count(),
                rows: grid.row_count(),
                expected_reels: spec.reels,
                expected_rows: spec.rows,
            });
        }
        Ok(self.score(grid, bet, is_free_spin))
    }

    fn score(&self, grid: Grid, bet: u64, is_free_spin: bool) -> SpinResult {
        let scatter = ScatterEvaluator::new(&self.config.scatter, self.config.rtp).evaluate(&grid, bet);
        let ways = WaysEvaluator::new(&self.config).evaluate(&grid, bet);
        SpinResult::new(grid, bet, is_free_spin, scatter, ways)
    }
}
