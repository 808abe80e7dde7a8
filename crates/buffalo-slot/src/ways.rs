//! Ways-to-win evaluation
//!
//! Every paying symbol on the grid is scored independently. A symbol (or a
//! wild) has to appear on consecutive reels starting from the leftmost one;
//! each combination of one matching cell per reel in that run is a "way".
//!
//! ```text
//! reel:      0    1    2    3    4
//! matches:  {0}  {1,3} {}  {2}  {0}
//!            └─────┘
//!            run = 2, ways = 1 × 2 = 2   (reels 3 and 4 never count)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{PathPayoutPolicy, SlotConfig};
use crate::grid::{Grid, Position};
use crate::symbols::Symbol;

/// One concrete winning combination, one cell per reel of the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinPath {
    pub symbol: Symbol,
    /// (reel, row) per reel, left to right
    pub positions: Vec<Position>,
    /// Display amount for this path
    pub amount: u64,
}

/// Aggregate win for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolWin {
    pub symbol: Symbol,
    /// Consecutive matching reels from reel 0
    pub run_length: usize,
    /// Matching rows for each reel in the run
    pub matching_rows: Vec<Vec<usize>>,
    /// Product of matching row counts over the run
    pub ways: u64,
    /// Paytable multiplier for the run length
    pub multiplier: f64,
    /// multiplier × bet × ways, before RTP
    pub raw_win: f64,
    /// floor(raw_win × rtp), the amount actually paid
    pub scaled_win: u64,
    /// floor(scaled_win / ways)
    pub per_path_payout: u64,
}

impl SymbolWin {
    /// Credits lost to floor division when every path shows `per_path_payout`
    pub fn floor_remainder(&self) -> u64 {
        self.scaled_win - self.per_path_payout * self.ways
    }
}

/// Ways evaluation of a full grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaysEvaluation {
    pub symbol_wins: Vec<SymbolWin>,
    pub win_paths: Vec<WinPath>,
    /// Sum of every symbol's scaled win
    pub total_win: u64,
}

impl WaysEvaluation {
    pub fn symbol_win(&self, symbol: Symbol) -> Option<&SymbolWin> {
        self.symbol_wins.iter().find(|w| w.symbol == symbol)
    }

    pub fn paths_for(&self, symbol: Symbol) -> impl Iterator<Item = &WinPath> + '_ {
        self.win_paths.iter().filter(move |p| p.symbol == symbol)
    }
}

/// Rows on each reel that match `target`, counting wilds on any reel
pub fn matching_rows(grid: &Grid, target: Symbol) -> Vec<Vec<usize>> {
    grid.reels()
        .iter()
        .map(|reel| {
            reel.iter()
                .enumerate()
                .filter(|&(_, &s)| s == target || s.is_wild())
                .map(|(row, _)| row)
                .collect()
        })
        .collect()
}

/// Leading reels with at least one match; the first empty reel ends the run
pub fn run_length(matching: &[Vec<usize>]) -> usize {
    matching.iter().take_while(|rows| !rows.is_empty()).count()
}

/// Ways-to-win evaluator bound to one configuration
#[derive(Debug, Clone, Copy)]
pub struct WaysEvaluator<'a> {
    config: &'a SlotConfig,
}

impl<'a> WaysEvaluator<'a> {
    pub fn new(config: &'a SlotConfig) -> Self {
        Self { config }
    }

    /// Score every paying symbol present on the grid.
    ///
    /// Pure: the same grid, bet and configuration always give the same
    /// evaluation.
    pub fn evaluate(&self, grid: &Grid, bet: u64) -> WaysEvaluation {
        let mut eval = WaysEvaluation::default();

        for symbol in grid.distinct_symbols() {
            if !symbol.is_paying() {
                continue;
            }
            let Some(win) = self.evaluate_symbol(grid, symbol, bet) else {
                continue;
            };
            eval.win_paths.extend(self.win_paths(&win));
            eval.total_win += win.scaled_win;
            eval.symbol_wins.push(win);
        }

        log::debug!(
            "ways: {} winning symbols, {} paths, total {}",
            eval.symbol_wins.len(),
            eval.win_paths.len(),
            eval.total_win
        );
        eval
    }

    /// Score one target symbol, `None` when it does not win
    pub fn evaluate_symbol(&self, grid: &Grid, symbol: Symbol, bet: u64) -> Option<SymbolWin> {
        let min_run = self.config.min_run.for_symbol(symbol)?;

        let mut matching = matching_rows(grid, symbol);
        let run = run_length(&matching);
        if run < min_run {
            return None;
        }

        let multiplier = self.config.paytable.multiplier(symbol, run);
        if multiplier <= 0.0 {
            return None;
        }

        matching.truncate(run);
        let Some(ways) = matching
            .iter()
            .try_fold(1u64, |acc, rows| acc.checked_mul(rows.len() as u64))
            .filter(|&ways| ways <= self.config.grid.max_ways())
        else {
            log::warn!("{symbol}: ways exceed the {} grid limit", self.config.grid.max_ways());
            return None;
        };
        let raw_win = multiplier * bet as f64 * ways as f64;
        let scaled_win = (raw_win * self.config.rtp).floor() as u64;

        Some(SymbolWin {
            symbol,
            run_length: run,
            matching_rows: matching,
            ways,
            multiplier,
            raw_win,
            scaled_win,
            per_path_payout: scaled_win / ways,
        })
    }

    /// Cartesian product of the matching rows, one path per way
    fn win_paths(&self, win: &SymbolWin) -> Vec<WinPath> {
        let mut combos: Vec<Vec<Position>> = vec![Vec::with_capacity(win.run_length)];
        for (reel, rows) in win.matching_rows.iter().enumerate() {
            combos = combos
                .into_iter()
                .flat_map(|prefix| {
                    rows.iter().map(move |&row| {
                        let mut next = prefix.clone();
                        next.push((reel, row));
                        next
                    })
                })
                .collect();
        }

        let mut paths: Vec<WinPath> = combos
            .into_iter()
            .map(|positions| WinPath {
                symbol: win.symbol,
                positions,
                amount: win.per_path_payout,
            })
            .collect();

        if self.config.path_payout == PathPayoutPolicy::Reconcile {
            if let Some(first) = paths.first_mut() {
                first.amount += win.floor_remainder();
            }
        }
        paths
    }
}
