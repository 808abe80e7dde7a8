//! Slot configuration
//!
//! Every tunable of the game lives in one [`SlotConfig`] value that is
//! injected into the machine. Several configurations (difficulty tiers) can
//! coexist in one process.

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::paytable::{MAX_RUN_LENGTH, MinRunLengths, PayTable, ScatterTable};
use crate::symbols::Symbol;

/// Tallest reel a configuration may declare (8^5 = 32768 ways)
pub const MAX_ROWS: usize = 8;

/// Grid specification (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: usize,
    /// Number of visible rows per reel
    pub rows: usize,
}

impl GridSpec {
    /// Buffalo 5×4 (1024 ways)
    pub fn standard_5x4() -> Self {
        Self { reels: 5, rows: 4 }
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels * self.rows
    }

    /// Theoretical maximum number of ways (rows ^ reels)
    pub fn max_ways(&self) -> u64 {
        (self.rows as u64).saturating_pow(self.reels as u32)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_5x4()
    }
}

/// Regular symbols drawn together with one bucket weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolBucket {
    /// Probability of landing in this bucket
    pub weight: f64,
    /// Symbols picked uniformly once the bucket is chosen
    pub symbols: Vec<Symbol>,
}

/// Layered probabilities used by the grid generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationWeights {
    /// Chance of a wild on an eligible reel (checked first)
    pub wild_probability: f64,
    /// Reels on which wilds may be generated
    pub wild_reels: Vec<usize>,
    /// Chance of a scatter (checked second)
    pub scatter_probability: f64,
    /// Regular symbol buckets, drawn with a single roll
    pub buckets: Vec<SymbolBucket>,
}

impl GenerationWeights {
    pub fn buffalo() -> Self {
        Self {
            wild_probability: 0.02,
            wild_reels: vec![1, 2, 3],
            scatter_probability: 0.015,
            buckets: vec![
                SymbolBucket {
                    weight: 0.50,
                    symbols: Symbol::CARD_RANKS.to_vec(),
                },
                SymbolBucket {
                    weight: 0.25,
                    symbols: vec![Symbol::Cougar, Symbol::Wolf, Symbol::Elk],
                },
                SymbolBucket {
                    weight: 0.17,
                    symbols: vec![Symbol::Eagle],
                },
                SymbolBucket {
                    weight: 0.08,
                    symbols: vec![Symbol::Buffalo],
                },
            ],
        }
    }

    pub fn is_wild_reel(&self, reel: usize) -> bool {
        self.wild_reels.contains(&reel)
    }
}

impl Default for GenerationWeights {
    fn default() -> Self {
        Self::buffalo()
    }
}

/// How a symbol's scaled win is spread over its individual win paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathPayoutPolicy {
    /// Every path shows `floor(scaled_win / ways)`; the paths may under-sum
    /// the authoritative win by up to `ways - 1`
    #[default]
    Floor,
    /// The floor remainder is added to the first path so the paths sum to
    /// the authoritative win exactly
    Reconcile,
}

/// Accepted bet range (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetLimits {
    pub min: u64,
    pub max: u64,
}

impl BetLimits {
    pub fn contains(&self, bet: u64) -> bool {
        bet > 0 && bet >= self.min && bet <= self.max
    }
}

impl Default for BetLimits {
    fn default() -> Self {
        Self { min: 1, max: 10_000 }
    }
}

/// Complete slot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Tier name for reference
    pub name: String,
    /// Grid geometry
    pub grid: GridSpec,
    /// Return-to-player scalar applied to every payout (0 < rtp ≤ 1)
    pub rtp: f64,
    /// Bet range
    pub bets: BetLimits,
    /// Grid generation probabilities
    pub generation: GenerationWeights,
    /// Ways paytable
    pub paytable: PayTable,
    /// Scatter awards
    pub scatter: ScatterTable,
    /// Minimum winning run per symbol class
    pub min_run: MinRunLengths,
    /// Per-path display amounts
    pub path_payout: PathPayoutPolicy,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self::buffalo()
    }
}

impl SlotConfig {
    /// Standard Buffalo tier, 75% RTP
    pub fn buffalo() -> Self {
        Self {
            name: "Buffalo".into(),
            grid: GridSpec::standard_5x4(),
            rtp: 0.75,
            bets: BetLimits::default(),
            generation: GenerationWeights::buffalo(),
            paytable: PayTable::buffalo(),
            scatter: ScatterTable::buffalo(),
            min_run: MinRunLengths::default(),
            path_payout: PathPayoutPolicy::Floor,
        }
    }

    pub fn with_rtp(mut self, rtp: f64) -> Self {
        self.rtp = rtp;
        self
    }

    pub fn with_paytable(mut self, paytable: PayTable) -> Self {
        self.paytable = paytable;
        self
    }

    pub fn with_path_payout(mut self, policy: PathPayoutPolicy) -> Self {
        self.path_payout = policy;
        self
    }

    pub fn with_bets(mut self, min: u64, max: u64) -> Self {
        self.bets = BetLimits { min, max };
        self
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> SlotResult<Self> {
        let config: SlotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML configuration
    pub fn from_yaml(yaml: &str) -> SlotResult<Self> {
        let config: SlotConfig = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SlotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> SlotResult<String> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Check every invariant the generator and evaluators rely on
    pub fn validate(&self) -> SlotResult<()> {
        let invalid = |msg: String| Err(SlotError::InvalidConfig(msg));

        if self.grid.reels == 0 || self.grid.rows == 0 {
            return invalid("Grid must have at least 1 reel and 1 row".into());
        }
        if self.grid.reels > MAX_RUN_LENGTH {
            return invalid(format!(
                "Too many reels: {} > {}",
                self.grid.reels, MAX_RUN_LENGTH
            ));
        }
        if self.grid.rows > MAX_ROWS {
            return invalid(format!("Too many rows: {} > {}", self.grid.rows, MAX_ROWS));
        }

        if !(self.rtp > 0.0 && self.rtp <= 1.0) {
            return invalid(format!("RTP must be in (0, 1], got {}", self.rtp));
        }

        if self.bets.min == 0 || self.bets.min > self.bets.max {
            return invalid(format!(
                "Bet limits must satisfy 0 < min <= max, got {}..={}",
                self.bets.min, self.bets.max
            ));
        }

        let generation = &self.generation;
        for (label, p) in [
            ("wild", generation.wild_probability),
            ("scatter", generation.scatter_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{label} probability must be in [0, 1], got {p}"));
            }
        }
        if let Some(&reel) = generation.wild_reels.iter().find(|&&r| r >= self.grid.reels) {
            return invalid(format!("Wild reel {reel} is outside the grid"));
        }
        if generation.buckets.is_empty() {
            return invalid("At least one symbol bucket is required".into());
        }
        for bucket in &generation.buckets {
            if !(bucket.weight > 0.0) || bucket.symbols.is_empty() {
                return invalid("Symbol buckets need a positive weight and symbols".into());
            }
            if let Some(s) = bucket.symbols.iter().find(|s| !s.is_paying()) {
                return invalid(format!("{s} cannot be drawn from a regular bucket"));
            }
        }
        let total: f64 = generation.buckets.iter().map(|b| b.weight).sum();
        if (total - 1.0).abs() > 1e-9 {
            return invalid(format!("Symbol bucket weights must sum to 1, got {total}"));
        }

        for (symbol, pays) in &self.paytable.pays {
            if pays.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return invalid(format!("Pays for {symbol} must be finite and non-negative"));
            }
        }

        for tier in &self.scatter.tiers {
            if tier.count == 0 || !tier.multiplier.is_finite() || tier.multiplier < 0.0 {
                return invalid(format!("Invalid scatter tier for count {}", tier.count));
            }
        }

        for (label, min) in [("animal", self.min_run.animal), ("card rank", self.min_run.card_rank)] {
            if min == 0 || min > self.grid.reels {
                return invalid(format!("Minimum {label} run must be in 1..={}", self.grid.reels));
            }
        }

        Ok(())
    }
}
