//! Paytable, scatter tables and minimum run lengths

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::symbols::{Symbol, SymbolClass};

/// Longest possible run (one per reel)
pub const MAX_RUN_LENGTH: usize = 5;

/// Per-symbol multipliers indexed by run length.
///
/// Multipliers are fractions of the bet. Index 0 is unused so that
/// `pays[symbol][run_length]` reads naturally. Missing symbols or indices
/// read as `0.0`, which means "no win".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayTable {
    pub pays: BTreeMap<Symbol, Vec<f64>>,
}

impl PayTable {
    /// Empty table, every lookup is zero
    pub fn empty() -> Self {
        Self {
            pays: BTreeMap::new(),
        }
    }

    /// Standard Buffalo paytable
    pub fn buffalo() -> Self {
        let mut table = Self::empty();
        // Animals (pay from 2 reels)
        table.set(Symbol::Buffalo, &[0.25, 1.0, 2.5, 7.5], 2);
        table.set(Symbol::Eagle, &[0.2, 0.75, 2.0, 5.0], 2);
        table.set(Symbol::Cougar, &[0.1, 0.5, 1.25, 3.0], 2);
        table.set(Symbol::Wolf, &[0.1, 0.4, 1.0, 2.5], 2);
        table.set(Symbol::Elk, &[0.1, 0.4, 1.0, 2.0], 2);
        // Card ranks (pay from 3 reels)
        table.set(Symbol::Ace, &[0.25, 0.5, 1.25], 3);
        table.set(Symbol::King, &[0.25, 0.5, 1.25], 3);
        table.set(Symbol::Queen, &[0.2, 0.4, 1.0], 3);
        table.set(Symbol::Jack, &[0.2, 0.4, 1.0], 3);
        table.set(Symbol::Ten, &[0.1, 0.25, 0.75], 3);
        table.set(Symbol::Nine, &[0.1, 0.25, 0.75], 3);
        table
    }

    /// Set pays for a symbol starting at `first_run` reels
    pub fn set(&mut self, symbol: Symbol, pays: &[f64], first_run: usize) {
        let mut row = vec![0.0; first_run];
        row.extend_from_slice(pays);
        row.resize(MAX_RUN_LENGTH + 1, 0.0);
        self.pays.insert(symbol, row);
    }

    /// Multiplier for a run, zero when absent
    pub fn multiplier(&self, symbol: Symbol, run_length: usize) -> f64 {
        self.pays
            .get(&symbol)
            .and_then(|row| row.get(run_length))
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::buffalo()
    }
}

/// One row of the scatter table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterTier {
    /// Scatter count that triggers this tier
    pub count: u8,
    /// Free spins awarded
    pub free_spins: u32,
    /// Bet multiplier paid immediately
    pub multiplier: f64,
}

/// Scatter count → bonus spins and multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTable {
    /// Tiers sorted by ascending count
    pub tiers: Vec<ScatterTier>,
}

impl ScatterTable {
    pub fn buffalo() -> Self {
        Self {
            tiers: vec![
                ScatterTier { count: 3, free_spins: 5, multiplier: 0.25 },
                ScatterTier { count: 4, free_spins: 10, multiplier: 0.5 },
                ScatterTier { count: 5, free_spins: 15, multiplier: 1.0 },
            ],
        }
    }

    /// Smallest count that awards anything
    pub fn trigger_count(&self) -> Option<u8> {
        self.tiers.iter().map(|t| t.count).min()
    }

    /// Best tier reached by `count` scatters.
    ///
    /// Counts above the highest configured tier saturate at that tier.
    pub fn tier_for(&self, count: usize) -> Option<&ScatterTier> {
        self.tiers
            .iter()
            .filter(|t| t.count as usize <= count)
            .max_by_key(|t| t.count)
    }
}

impl Default for ScatterTable {
    fn default() -> Self {
        Self::buffalo()
    }
}

/// Minimum winning run length per symbol class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinRunLengths {
    pub animal: usize,
    pub card_rank: usize,
}

impl MinRunLengths {
    /// Minimum run for a symbol; wild and scatter never form a ways win
    pub fn for_symbol(&self, symbol: Symbol) -> Option<usize> {
        match symbol.class() {
            SymbolClass::Animal => Some(self.animal),
            SymbolClass::CardRank => Some(self.card_rank),
            SymbolClass::Wild | SymbolClass::Scatter => None,
        }
    }
}

impl Default for MinRunLengths {
    fn default() -> Self {
        Self {
            animal: 2,
            card_rank: 3,
        }
    }
}
