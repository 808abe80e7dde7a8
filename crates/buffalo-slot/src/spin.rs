//! Spin result

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};
use crate::scatter::{ScatterAward, ScatterEvaluation};
use crate::ways::{SymbolWin, WaysEvaluation, WinPath};

/// Complete, final outcome of one spin.
///
/// Computed in full before anything is shown; presentation only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Final grid (reels × rows)
    pub grid: Grid,
    /// Bet amount
    pub bet: u64,
    /// Was this spin paid from the free spin counter?
    pub is_free_spin: bool,
    /// Every scatter on the grid
    pub scatter_positions: Vec<Position>,
    /// Scatter award, when three or more landed
    pub scatter_award: Option<ScatterAward>,
    /// Free spins granted by this spin
    pub bonus_free_spins: u32,
    /// Immediate scatter payout
    pub scatter_payout: u64,
    /// Per-symbol ways wins
    pub symbol_wins: Vec<SymbolWin>,
    /// Individual winning combinations
    pub win_paths: Vec<WinPath>,
    /// scatter_payout + every symbol's scaled win
    pub total_win: u64,
}

impl SpinResult {
    /// Combine the scatter and ways evaluations of one grid
    pub fn new(
        grid: Grid,
        bet: u64,
        is_free_spin: bool,
        scatter: ScatterEvaluation,
        ways: WaysEvaluation,
    ) -> Self {
        let bonus_free_spins = scatter.bonus_free_spins();
        let scatter_payout = scatter.payout();

        Self {
            grid,
            bet,
            is_free_spin,
            scatter_positions: scatter.positions,
            scatter_award: scatter.award,
            bonus_free_spins,
            scatter_payout,
            symbol_wins: ways.symbol_wins,
            win_paths: ways.win_paths,
            total_win: scatter_payout + ways.total_win,
        }
    }

    /// Check if this is a win
    pub fn is_win(&self) -> bool {
        self.total_win > 0
    }

    /// Did this spin award free spins?
    pub fn triggers_bonus(&self) -> bool {
        self.bonus_free_spins > 0
    }

    /// Win-to-bet ratio
    pub fn win_ratio(&self) -> f64 {
        if self.bet > 0 {
            self.total_win as f64 / self.bet as f64
        } else {
            0.0
        }
    }

    /// Ways win total, without the scatter payout
    pub fn ways_win(&self) -> u64 {
        self.total_win - self.scatter_payout
    }
}
