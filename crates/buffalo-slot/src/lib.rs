//! # buffalo-slot — Ways-to-win engine for the Buffalo slot
//!
//! Generates 5×4 symbol grids and prices them under the "all ways pay"
//! rule, with scatter free spins and a configurable return-to-player.
//!
//! ## Features
//!
//! - **Layered Grid Generation**: wild, then scatter, then weighted regular draw
//! - **Ways Evaluation**: up to 1024 ways per symbol, one path per way
//! - **Scatter Awards**: free spins and an immediate payout from 3+ scatters
//! - **Sessions**: balance and free spin state machine, isolated per player
//! - **Simulation**: seeded parallel batches to measure a tier's real RTP
//!
//! ## Architecture
//!
//! ```text
//! SpinSession (balance, bet, free spins)
//!     │
//!     v
//! SlotMachine ── SlotConfig (rtp, paytable, weights, scatter tiers)
//!     │
//!     ├── GridGenerator ──▶ Grid
//!     ├── ScatterEvaluator ──▶ ScatterEvaluation
//!     └── WaysEvaluator ──▶ WaysEvaluation
//!           │
//!           v
//!     SpinResult
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod paytable;
pub mod registry;
pub mod scatter;
pub mod session;
pub mod simulator;
pub mod spin;
pub mod symbols;
pub mod ways;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use paytable::*;
pub use registry::*;
pub use scatter::*;
pub use session::*;
pub use simulator::*;
pub use spin::*;
pub use symbols::*;
pub use ways::*;
