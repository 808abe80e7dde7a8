//! Symbol definitions for the Buffalo reels

use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbol class, drives minimum run length and evaluation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolClass {
    /// High paying animal symbol
    Animal,
    /// Low paying card rank symbol
    CardRank,
    /// Wild - substitutes for every paying symbol
    Wild,
    /// Scatter - pays and awards free spins regardless of position
    Scatter,
}

/// One of the 13 symbols that can land on a Buffalo reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Symbol {
    /// Highest paying animal
    Buffalo = 0,
    Eagle = 1,
    Cougar = 2,
    Wolf = 3,
    Elk = 4,
    Ace = 5,
    King = 6,
    Queen = 7,
    Jack = 8,
    Ten = 9,
    Nine = 10,
    Wild = 11,
    Scatter = 12,
}

impl Symbol {
    /// Every symbol, in paytable order
    pub const ALL: [Symbol; 13] = [
        Symbol::Buffalo,
        Symbol::Eagle,
        Symbol::Cougar,
        Symbol::Wolf,
        Symbol::Elk,
        Symbol::Ace,
        Symbol::King,
        Symbol::Queen,
        Symbol::Jack,
        Symbol::Ten,
        Symbol::Nine,
        Symbol::Wild,
        Symbol::Scatter,
    ];

    /// The five animal symbols, highest paying first
    pub const ANIMALS: [Symbol; 5] = [
        Symbol::Buffalo,
        Symbol::Eagle,
        Symbol::Cougar,
        Symbol::Wolf,
        Symbol::Elk,
    ];

    /// The six card rank symbols, highest paying first
    pub const CARD_RANKS: [Symbol; 6] = [
        Symbol::Ace,
        Symbol::King,
        Symbol::Queen,
        Symbol::Jack,
        Symbol::Ten,
        Symbol::Nine,
    ];

    pub fn class(self) -> SymbolClass {
        match self {
            Symbol::Buffalo | Symbol::Eagle | Symbol::Cougar | Symbol::Wolf | Symbol::Elk => {
                SymbolClass::Animal
            }
            Symbol::Ace | Symbol::King | Symbol::Queen | Symbol::Jack | Symbol::Ten | Symbol::Nine => {
                SymbolClass::CardRank
            }
            Symbol::Wild => SymbolClass::Wild,
            Symbol::Scatter => SymbolClass::Scatter,
        }
    }

    /// Can this symbol be the target of a ways win?
    pub fn is_paying(self) -> bool {
        matches!(self.class(), SymbolClass::Animal | SymbolClass::CardRank)
    }

    pub fn is_wild(self) -> bool {
        self == Symbol::Wild
    }

    pub fn is_scatter(self) -> bool {
        self == Symbol::Scatter
    }

    /// Short display name (e.g. "BUFFALO", "A", "WILD")
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Buffalo => "BUFFALO",
            Symbol::Eagle => "EAGLE",
            Symbol::Cougar => "COUGAR",
            Symbol::Wolf => "WOLF",
            Symbol::Elk => "ELK",
            Symbol::Ace => "A",
            Symbol::King => "K",
            Symbol::Queen => "Q",
            Symbol::Jack => "J",
            Symbol::Ten => "10",
            Symbol::Nine => "9",
            Symbol::Wild => "WILD",
            Symbol::Scatter => "SCATTER",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_classes() {
        assert!(Symbol::ANIMALS.iter().all(|s| s.class() == SymbolClass::Animal));
        assert!(Symbol::CARD_RANKS.iter().all(|s| s.class() == SymbolClass::CardRank));
        assert_eq!(Symbol::Wild.class(), SymbolClass::Wild);
        assert_eq!(Symbol::Scatter.class(), SymbolClass::Scatter);
    }

    #[test]
    fn test_paying_symbols() {
        let paying = Symbol::ALL.iter().filter(|s| s.is_paying()).count();
        assert_eq!(paying, 11);
        assert!(!Symbol::Wild.is_paying());
        assert!(!Symbol::Scatter.is_paying());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Symbol::Buffalo).unwrap();
        assert_eq!(json, "\"buffalo\"");
        let back: Symbol = serde_json::from_str("\"scatter\"").unwrap();
        assert_eq!(back, Symbol::Scatter);
    }
}
