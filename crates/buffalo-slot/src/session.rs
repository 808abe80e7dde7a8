//! Spin session — balance, bet and free spin state machine
//!
//! ```text
//!   Idle ──spin(bet)──▶ Spinning ──grid──▶ Evaluating ──apply──▶ Idle
//!    │
//!    └─ InvalidBet / InsufficientFunds: rejected, nothing changes
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::SlotMachine;
use crate::error::{SlotError, SlotResult};
use crate::spin::SpinResult;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
    Evaluating,
}

/// Player-visible session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// In-memory credit balance
    pub balance: u64,
    /// Bet of the last admitted spin
    pub bet: u64,
    /// Free spins still available
    pub free_spins: u32,
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub free_spins_played: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub wins: u64,
    pub losses: u64,
    pub bonus_triggers: u64,
    pub free_spins_awarded: u64,
    pub max_win: u64,
}

impl SessionStats {
    /// Calculate RTP (%), against paid bets only
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_win as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate (%)
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, result: &SpinResult) {
        self.total_spins += 1;
        if result.is_free_spin {
            self.free_spins_played += 1;
        } else {
            self.total_bet += result.bet;
        }
        self.total_win += result.total_win;
        if result.is_win() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        if result.triggers_bonus() {
            self.bonus_triggers += 1;
            self.free_spins_awarded += u64::from(result.bonus_free_spins);
        }
        self.max_win = self.max_win.max(result.total_win);
    }
}

/// One player's spin session.
///
/// Owns its random source; sessions never share mutable state.
#[derive(Debug)]
pub struct SpinSession<R = StdRng> {
    machine: SlotMachine,
    state: SessionState,
    phase: SpinPhase,
    stats: SessionStats,
    rng: R,
}

impl SpinSession<StdRng> {
    /// Session seeded from the operating system.
    ///
    /// Fails with [`SlotError::Rng`] when no OS randomness is available.
    pub fn from_os_rng(machine: SlotMachine, balance: u64) -> SlotResult<Self> {
        let rng = StdRng::try_from_os_rng().map_err(|e| SlotError::Rng(e.to_string()))?;
        Ok(Self::new(machine, balance, rng))
    }

    /// Reproducible session
    pub fn seeded(machine: SlotMachine, balance: u64, seed: u64) -> Self {
        Self::new(machine, balance, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpinSession<R> {
    /// Create a session with an injected random source
    pub fn new(machine: SlotMachine, balance: u64, rng: R) -> Self {
        log::info!(
            "session opened: balance {balance}, config '{}'",
            machine.config().name
        );
        let bet = machine.config().bets.min;
        Self {
            machine,
            state: SessionState {
                balance,
                bet,
                free_spins: 0,
            },
            phase: SpinPhase::Idle,
            stats: SessionStats::default(),
            rng,
        }
    }

    /// Start with free spins already available
    pub fn with_free_spins(mut self, free_spins: u32) -> Self {
        self.state.free_spins = free_spins;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn balance(&self) -> u64 {
        self.state.balance
    }

    pub fn free_spins(&self) -> u32 {
        self.state.free_spins
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn machine(&self) -> &SlotMachine {
        &self.machine
    }

    /// Add credits to the balance
    pub fn deposit(&mut self, amount: u64) {
        self.state.balance = self.state.balance.saturating_add(amount);
    }

    /// Check whether a spin at `bet` would be admitted.
    ///
    /// [`SpinSession::spin`] takes `&mut self` and runs to `Idle` before it
    /// returns, so a second spin can never start while one is in flight.
    pub fn can_spin(&self, bet: u64) -> SlotResult<()> {
        debug_assert_eq!(self.phase, SpinPhase::Idle);
        let limits = self.machine.config().bets;
        if !limits.contains(bet) {
            return Err(SlotError::InvalidBet {
                bet,
                min: limits.min,
                max: limits.max,
            });
        }
        if self.state.free_spins == 0 && self.state.balance < bet {
            return Err(SlotError::InsufficientFunds {
                balance: self.state.balance,
                bet,
            });
        }
        Ok(())
    }

    /// Run one spin to completion.
    ///
    /// A free spin is consumed when any are available, otherwise `bet` is
    /// deducted. The whole outcome is fixed before this returns.
    pub fn spin(&mut self, bet: u64) -> SlotResult<SpinResult> {
        if let Err(e) = self.can_spin(bet) {
            log::warn!("spin rejected: {e}");
            return Err(e);
        }

        // Idle → Spinning
        self.phase = SpinPhase::Spinning;
        self.state.bet = bet;
        let is_free_spin = self.state.free_spins > 0;
        if is_free_spin {
            self.state.free_spins -= 1;
        } else {
            self.state.balance -= bet;
        }

        // Spinning → Evaluating
        self.phase = SpinPhase::Evaluating;
        let result = self.machine.spin(&mut self.rng, bet, is_free_spin);

        // Evaluating → Idle
        self.state.balance = self.state.balance.saturating_add(result.total_win);
        self.state.free_spins = self.state.free_spins.saturating_add(result.bonus_free_spins);
        self.stats.record(&result);
        self.phase = SpinPhase::Idle;

        if result.triggers_bonus() {
            log::info!(
                "bonus: {} scatters, +{} free spins",
                result.scatter_positions.len(),
                result.bonus_free_spins
            );
        }
        log::debug!(
            "spin: bet {bet}{}, win {}, balance {}, free spins {}",
            if is_free_spin { " (free)" } else { "" },
            result.total_win,
            self.state.balance,
            self.state.free_spins
        );

        Ok(result)
    }
}
