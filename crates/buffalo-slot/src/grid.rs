//! Symbol grid and layered random grid generation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GenerationWeights, GridSpec, SlotConfig};
use crate::symbols::Symbol;

/// Grid coordinate (reel, row)
pub type Position = (usize, usize);

/// Visible symbol window, stored reel-major (`reels[reel][row]`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    reels: Vec<Vec<Symbol>>,
}

impl Grid {
    /// Grid of `spec` size filled with one symbol
    pub fn filled(spec: GridSpec, symbol: Symbol) -> Self {
        Self {
            reels: vec![vec![symbol; spec.rows]; spec.reels],
        }
    }

    /// Build from explicit reels. Every reel must have the same row count.
    pub fn from_reels(reels: Vec<Vec<Symbol>>) -> Option<Self> {
        let rows = reels.first().map(Vec::len)?;
        if rows == 0 || reels.iter().any(|r| r.len() != rows) {
            return None;
        }
        Some(Self { reels })
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn row_count(&self) -> usize {
        self.reels.first().map_or(0, Vec::len)
    }

    pub fn get(&self, reel: usize, row: usize) -> Option<Symbol> {
        self.reels.get(reel).and_then(|r| r.get(row)).copied()
    }

    /// Overwrite one cell; out of range positions are ignored
    pub fn set(&mut self, reel: usize, row: usize, symbol: Symbol) {
        if let Some(cell) = self.reels.get_mut(reel).and_then(|r| r.get_mut(row)) {
            *cell = symbol;
        }
    }

    /// Symbols of one reel, top to bottom
    pub fn reel(&self, reel: usize) -> &[Symbol] {
        self.reels.get(reel).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn reels(&self) -> &[Vec<Symbol>] {
        &self.reels
    }

    /// Every cell in reel-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, Symbol)> + '_ {
        self.reels.iter().enumerate().flat_map(|(reel, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(row, &symbol)| ((reel, row), symbol))
        })
    }

    /// Positions holding `symbol`, reel-major
    pub fn positions_of(&self, symbol: Symbol) -> Vec<Position> {
        self.cells()
            .filter(|&(_, s)| s == symbol)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Distinct symbols in first-appearance order
    pub fn distinct_symbols(&self) -> Vec<Symbol> {
        let mut seen = Vec::new();
        for (_, symbol) in self.cells() {
            if !seen.contains(&symbol) {
                seen.push(symbol);
            }
        }
        seen
    }
}

/// Produces one grid per spin from an injected random source.
///
/// Each cell is drawn with three ordered checks: wild (eligible reels
/// only), then scatter, then a single roll over the regular symbol
/// buckets. The order is part of the game math and must not change.
#[derive(Debug, Clone, Copy)]
pub struct GridGenerator<'a> {
    spec: GridSpec,
    weights: &'a GenerationWeights,
}

impl<'a> GridGenerator<'a> {
    pub fn new(config: &'a SlotConfig) -> Self {
        Self {
            spec: config.grid,
            weights: &config.generation,
        }
    }

    /// Generate a full grid, reel by reel, top to bottom
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let reels: Vec<Vec<Symbol>> = (0..self.spec.reels)
            .map(|reel| (0..self.spec.rows).map(|_| self.draw_cell(reel, rng)).collect())
            .collect();
        Grid { reels }
    }

    fn draw_cell<R: Rng + ?Sized>(&self, reel: usize, rng: &mut R) -> Symbol {
        if self.weights.is_wild_reel(reel) && rng.random_bool(self.weights.wild_probability) {
            return Symbol::Wild;
        }
        if rng.random_bool(self.weights.scatter_probability) {
            return Symbol::Scatter;
        }
        self.draw_regular(rng)
    }

    fn draw_regular<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        let roll: f64 = rng.random();
        let mut cumulative = 0.0;
        for bucket in &self.weights.buckets {
            cumulative += bucket.weight;
            if roll < cumulative {
                return bucket.symbols[rng.random_range(0..bucket.symbols.len())];
            }
        }
        // Float drift past the last boundary lands in the last bucket
        let last = &self.weights.buckets[self.weights.buckets.len() - 1];
        last.symbols[rng.random_range(0..last.symbols.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_accessors() {
        let mut grid = Grid::filled(GridSpec::standard_5x4(), Symbol::Nine);
        grid.set(2, 3, Symbol::Scatter);
        assert_eq!(grid.reel_count(), 5);
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.get(2, 3), Some(Symbol::Scatter));
        assert_eq!(grid.get(5, 0), None);
        assert_eq!(grid.positions_of(Symbol::Scatter), vec![(2, 3)]);
        assert_eq!(grid.distinct_symbols(), vec![Symbol::Nine, Symbol::Scatter]);
    }

    #[test]
    fn test_from_reels_rejects_ragged() {
        assert!(Grid::from_reels(vec![vec![Symbol::Ace; 4], vec![Symbol::Ace; 3]]).is_none());
        assert!(Grid::from_reels(Vec::new()).is_none());
        assert!(Grid::from_reels(vec![vec![Symbol::Ace; 4]; 5]).is_some());
    }

    #[test]
    fn test_generated_shape() {
        let config = SlotConfig::buffalo();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = GridGenerator::new(&config).generate(&mut rng);
        assert_eq!(grid.reel_count(), 5);
        assert_eq!(grid.row_count(), 4);
    }

    #[test]
    fn test_wilds_only_on_interior_reels() {
        let mut config = SlotConfig::buffalo();
        config.generation.wild_probability = 0.5;
        let generator = GridGenerator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut interior_wilds = 0;
        for _ in 0..200 {
            let grid = generator.generate(&mut rng);
            for (reel, _) in grid.positions_of(Symbol::Wild) {
                assert!((1..=3).contains(&reel), "wild generated on reel {reel}");
                interior_wilds += 1;
            }
        }
        assert!(interior_wilds > 0);
    }

    #[test]
    fn test_certain_wild_wins_over_scatter() {
        let mut config = SlotConfig::buffalo();
        config.generation.wild_probability = 1.0;
        config.generation.scatter_probability = 1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = GridGenerator::new(&config).generate(&mut rng);

        for reel in 0..5 {
            let expected = if (1..=3).contains(&reel) {
                Symbol::Wild
            } else {
                Symbol::Scatter
            };
            assert!(grid.reel(reel).iter().all(|&s| s == expected));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = SlotConfig::buffalo();
        let generator = GridGenerator::new(&config);
        let a = generator.generate(&mut ChaCha8Rng::seed_from_u64(99));
        let b = generator.generate(&mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_regular_draw_follows_buckets() {
        let mut config = SlotConfig::buffalo();
        config.generation.wild_probability = 0.0;
        config.generation.scatter_probability = 0.0;
        let generator = GridGenerator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(2024);

        let mut cards = 0usize;
        let mut buffalo = 0usize;
        let mut total = 0usize;
        for _ in 0..2_000 {
            for (_, symbol) in generator.generate(&mut rng).cells() {
                assert!(symbol.is_paying());
                total += 1;
                if Symbol::CARD_RANKS.contains(&symbol) {
                    cards += 1;
                }
                if symbol == Symbol::Buffalo {
                    buffalo += 1;
                }
            }
        }
        let card_share = cards as f64 / total as f64;
        let buffalo_share = buffalo as f64 / total as f64;
        assert!((card_share - 0.50).abs() < 0.02, "card share {card_share}");
        assert!((buffalo_share - 0.08).abs() < 0.01, "buffalo share {buffalo_share}");
    }
}
