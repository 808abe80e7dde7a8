//! Scatter evaluation

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};
use crate::paytable::ScatterTable;
use crate::symbols::Symbol;

/// Scatter award for one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterAward {
    /// Number of scatters on the grid
    pub count: u8,
    /// Free spins awarded
    pub bonus_free_spins: u32,
    /// Bet multiplier of the reached tier
    pub multiplier: f64,
    /// floor(bet × multiplier × rtp)
    pub payout: u64,
}

/// Result of scanning a grid for scatters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterEvaluation {
    /// Every scatter position, reel-major
    pub positions: Vec<Position>,
    /// Award, when the count reaches a tier
    pub award: Option<ScatterAward>,
}

impl ScatterEvaluation {
    pub fn bonus_free_spins(&self) -> u32 {
        self.award.as_ref().map_or(0, |a| a.bonus_free_spins)
    }

    pub fn payout(&self) -> u64 {
        self.award.as_ref().map_or(0, |a| a.payout)
    }
}

/// Scatter evaluator over a scatter table and RTP
#[derive(Debug, Clone, Copy)]
pub struct ScatterEvaluator<'a> {
    table: &'a ScatterTable,
    rtp: f64,
}

impl<'a> ScatterEvaluator<'a> {
    pub fn new(table: &'a ScatterTable, rtp: f64) -> Self {
        Self { table, rtp }
    }

    pub fn evaluate(&self, grid: &Grid, bet: u64) -> ScatterEvaluation {
        let positions = grid.positions_of(Symbol::Scatter);
        let award = self.table.tier_for(positions.len()).map(|tier| ScatterAward {
            count: positions.len().min(u8::MAX as usize) as u8,
            bonus_free_spins: tier.free_spins,
            multiplier: tier.multiplier,
            payout: (bet as f64 * tier.multiplier * self.rtp).floor() as u64,
        });

        ScatterEvaluation { positions, award }
    }
}
