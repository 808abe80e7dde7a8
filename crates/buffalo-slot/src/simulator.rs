//! Batch spin simulator for measuring a configuration's real payback
//!
//! Spins are split into fixed-size batches. Every batch draws from its own
//! ChaCha stream derived from the seed, so the report depends only on
//! `(config, bet, spins, seed)` and never on thread scheduling.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::SlotMachine;
use crate::error::{SlotError, SlotResult};
use crate::spin::SpinResult;

const DEFAULT_BATCH_SIZE: u64 = 10_000;
const DEFAULT_MAX_FREE_SPINS: u64 = 1_000;

/// Aggregated simulation output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Paid spins requested
    pub paid_spins: u64,
    /// Free spins played out from scatter awards
    pub free_spins: u64,
    pub total_bet: u64,
    pub total_win: u64,
    /// Spins (paid or free) that paid anything
    pub wins: u64,
    pub bonus_triggers: u64,
    pub max_win: u64,
    /// Free spin chains cut off at the per-paid-spin cap
    pub truncated_chains: u64,
}

impl SimulationReport {
    /// Measured return to player (0.0 - 1.0+)
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            self.total_win as f64 / self.total_bet as f64
        } else {
            0.0
        }
    }

    /// Winning spins over all spins played
    pub fn hit_rate(&self) -> f64 {
        let spins = self.paid_spins + self.free_spins;
        if spins > 0 {
            self.wins as f64 / spins as f64
        } else {
            0.0
        }
    }

    /// Bonus triggers per paid spin
    pub fn bonus_rate(&self) -> f64 {
        if self.paid_spins > 0 {
            self.bonus_triggers as f64 / self.paid_spins as f64
        } else {
            0.0
        }
    }

    fn record(&mut self, result: &SpinResult) {
        if result.is_free_spin {
            self.free_spins += 1;
        } else {
            self.paid_spins += 1;
            self.total_bet += result.bet;
        }
        self.total_win += result.total_win;
        if result.is_win() {
            self.wins += 1;
        }
        if result.triggers_bonus() {
            self.bonus_triggers += 1;
        }
        self.max_win = self.max_win.max(result.total_win);
    }

    fn merge(mut self, other: Self) -> Self {
        self.paid_spins += other.paid_spins;
        self.free_spins += other.free_spins;
        self.total_bet += other.total_bet;
        self.total_win += other.total_win;
        self.wins += other.wins;
        self.bonus_triggers += other.bonus_triggers;
        self.max_win = self.max_win.max(other.max_win);
        self.truncated_chains += other.truncated_chains;
        self
    }
}

/// Parallel batch simulator
#[derive(Debug, Clone)]
pub struct Simulator {
    machine: SlotMachine,
    bet: u64,
    batch_size: u64,
    max_free_spins: u64,
}

impl Simulator {
    pub fn new(machine: SlotMachine, bet: u64) -> SlotResult<Self> {
        let limits = machine.config().bets;
        if !limits.contains(bet) {
            return Err(SlotError::InvalidBet {
                bet,
                min: limits.min,
                max: limits.max,
            });
        }
        Ok(Self {
            machine,
            bet,
            batch_size: DEFAULT_BATCH_SIZE,
            max_free_spins: DEFAULT_MAX_FREE_SPINS,
        })
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Cap on free spins played out after a single paid spin
    pub fn with_max_free_spins(mut self, max_free_spins: u64) -> Self {
        self.max_free_spins = max_free_spins;
        self
    }

    /// Play `spins` paid spins, each followed by any free spins it awards
    pub fn run(&self, spins: u64, seed: u64) -> SimulationReport {
        let batches = spins.div_ceil(self.batch_size);
        let report = (0..batches)
            .into_par_iter()
            .map(|batch| {
                let start = batch * self.batch_size;
                let count = self.batch_size.min(spins - start);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(batch);
                self.run_batch(&mut rng, count)
            })
            .reduce(SimulationReport::default, SimulationReport::merge);

        log::info!(
            "simulated {} paid + {} free spins: rtp {:.4}, hit rate {:.4}",
            report.paid_spins,
            report.free_spins,
            report.rtp(),
            report.hit_rate()
        );
        report
    }

    fn run_batch(&self, rng: &mut ChaCha8Rng, count: u64) -> SimulationReport {
        let mut report = SimulationReport::default();
        for _ in 0..count {
            let result = self.machine.spin(rng, self.bet, false);
            report.record(&result);

            let mut free_spins = u64::from(result.bonus_free_spins);
            let mut played = 0;
            while free_spins > 0 {
                if played == self.max_free_spins {
                    log::warn!(
                        "free spin chain cut at {} spins with {} left",
                        played,
                        free_spins
                    );
                    report.truncated_chains += 1;
                    break;
                }
                free_spins -= 1;
                played += 1;
                let result = self.machine.spin(rng, self.bet, true);
                report.record(&result);
                free_spins += u64::from(result.bonus_free_spins);
            }
        }
        report
    }
}
