//! Spin scenario tests
//!
//! Drives the public API with scripted grids and seeded sessions.
//! Verifies:
//! - Scatter awards for 3 and 5 scatters
//! - Two-reel animal wins through a wild
//! - Ways, path counts and floor drift on generated grids
//! - Session bookkeeping across paid and free spins

use buffalo_slot::{
    Grid, GridSpec, PathPayoutPolicy, SlotConfig, SlotError, SlotMachine, SpinSession, Symbol,
    matching_rows, run_length,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const BET: u64 = 40;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn machine() -> SlotMachine {
    SlotMachine::new(SlotConfig::buffalo()).unwrap()
}

/// Checkerboard of card ranks with no winning run
fn quiet_grid() -> Grid {
    Grid::from_reels(vec![
        vec![Symbol::Ace, Symbol::King, Symbol::Ace, Symbol::King],
        vec![Symbol::Queen, Symbol::Jack, Symbol::Queen, Symbol::Jack],
        vec![Symbol::Ten, Symbol::Nine, Symbol::Ten, Symbol::Nine],
        vec![Symbol::Ace, Symbol::King, Symbol::Ace, Symbol::King],
        vec![Symbol::Queen, Symbol::Jack, Symbol::Queen, Symbol::Jack],
    ])
    .unwrap()
}

#[test]
fn three_scatters_award_five_spins() {
    init_logging();
    let mut grid = quiet_grid();
    grid.set(0, 3, Symbol::Scatter);
    grid.set(2, 0, Symbol::Scatter);
    grid.set(4, 2, Symbol::Scatter);

    let result = machine().evaluate(grid, BET, false).unwrap();
    assert_eq!(result.scatter_positions, vec![(0, 3), (2, 0), (4, 2)]);
    assert_eq!(result.bonus_free_spins, 5);
    assert_eq!(result.scatter_payout, 7);
    assert_eq!(result.total_win, 7);
    assert!(result.win_paths.is_empty());
}

#[test]
fn five_scatters_pay_full_bet_times_rtp() {
    let mut grid = quiet_grid();
    for reel in 0..5 {
        grid.set(reel, reel % 4, Symbol::Scatter);
    }

    let result = machine().evaluate(grid, BET, false).unwrap();
    let award = result.scatter_award.clone().unwrap();
    assert_eq!(award.count, 5);
    assert_eq!(award.multiplier, 1.0);
    assert_eq!(result.bonus_free_spins, 15);
    assert_eq!(result.scatter_payout, (BET as f64 * 0.75).floor() as u64);
}

#[test]
fn animal_pays_on_two_reels_through_wild() {
    let mut grid = quiet_grid();
    grid.set(0, 1, Symbol::Buffalo);
    grid.set(1, 2, Symbol::Wild);

    let result = machine().evaluate(grid, BET, false).unwrap();
    let win = result
        .symbol_wins
        .iter()
        .find(|w| w.symbol == Symbol::Buffalo)
        .unwrap();
    assert_eq!(win.run_length, 2);
    assert_eq!(win.ways, 1);
    // 0.25 × 40 × 1 × 0.75 = 7.5
    assert_eq!(win.scaled_win, 7);

    let paths: Vec<_> = result
        .win_paths
        .iter()
        .filter(|p| p.symbol == Symbol::Buffalo)
        .collect();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].positions, vec![(0, 1), (1, 2)]);
}

#[test]
fn trailing_matches_never_extend_a_run() {
    let mut grid = quiet_grid();
    grid.set(0, 0, Symbol::Wolf);
    grid.set(2, 0, Symbol::Wolf);
    grid.set(3, 0, Symbol::Wolf);

    let matching = matching_rows(&grid, Symbol::Wolf);
    assert_eq!(run_length(&matching), 1);

    let result = machine().evaluate(grid, BET, false).unwrap();
    assert_eq!(result.total_win, 0);
}

#[test]
fn generated_spins_keep_ways_invariants() {
    init_logging();
    let machine = machine();
    let mut rng = ChaCha8Rng::seed_from_u64(2026);

    for _ in 0..500 {
        let result = machine.spin(&mut rng, BET, false);

        let scatters = result.grid.positions_of(Symbol::Scatter);
        assert_eq!(result.scatter_positions, scatters);
        if scatters.len() < 3 {
            assert_eq!(result.bonus_free_spins, 0);
            assert_eq!(result.scatter_payout, 0);
        }

        let mut ways_total = 0;
        for win in &result.symbol_wins {
            let matching = matching_rows(&result.grid, win.symbol);
            assert_eq!(win.run_length, run_length(&matching));
            let ways: u64 = matching[..win.run_length]
                .iter()
                .map(|rows| rows.len() as u64)
                .product();
            assert_eq!(win.ways, ways);

            let paths: Vec<_> = result
                .win_paths
                .iter()
                .filter(|p| p.symbol == win.symbol)
                .collect();
            assert_eq!(paths.len() as u64, win.ways);

            let path_sum: u64 = paths.iter().map(|p| p.amount).sum();
            assert!(path_sum <= win.scaled_win);
            assert!(win.scaled_win - path_sum < win.ways);
            ways_total += win.scaled_win;
        }
        assert_eq!(result.total_win, result.scatter_payout + ways_total);

        for (reel, _) in result.grid.positions_of(Symbol::Wild) {
            assert!((1..=3).contains(&reel));
        }
    }
}

#[test]
fn reconcile_policy_paths_sum_to_scaled_win() {
    let machine = SlotMachine::new(
        SlotConfig::buffalo().with_path_payout(PathPayoutPolicy::Reconcile),
    )
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..300 {
        let result = machine.spin(&mut rng, 33, false);
        for win in &result.symbol_wins {
            let path_sum: u64 = result
                .win_paths
                .iter()
                .filter(|p| p.symbol == win.symbol)
                .map(|p| p.amount)
                .sum();
            assert_eq!(path_sum, win.scaled_win);
        }
    }
}

#[test]
fn evaluation_is_bit_for_bit_repeatable() {
    let machine = machine();
    let grid = machine.generate_grid(&mut ChaCha8Rng::seed_from_u64(8));
    let a = machine.evaluate(grid.clone(), BET, false).unwrap();
    let b = machine.evaluate(grid, BET, false).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn insufficient_funds_leaves_session_untouched() {
    let mut session = SpinSession::new(machine(), 30, ChaCha8Rng::seed_from_u64(1));
    let err = session.spin(BET).unwrap_err();
    assert_eq!(err, SlotError::InsufficientFunds { balance: 30, bet: BET });
    assert_eq!(session.balance(), 30);
    assert_eq!(session.free_spins(), 0);
}

#[test]
fn session_balance_tracks_every_spin() {
    init_logging();
    let mut session = SpinSession::new(machine(), 10_000, ChaCha8Rng::seed_from_u64(5));
    let mut expected_balance = 10_000u64;
    let mut expected_free = 0u32;

    for _ in 0..200 {
        if expected_free == 0 && expected_balance < BET {
            break;
        }
        let result = session.spin(BET).unwrap();
        if expected_free > 0 {
            assert!(result.is_free_spin);
            expected_free -= 1;
        } else {
            assert!(!result.is_free_spin);
            expected_balance -= BET;
        }
        expected_balance += result.total_win;
        expected_free += result.bonus_free_spins;

        assert_eq!(session.balance(), expected_balance);
        assert_eq!(session.free_spins(), expected_free);
    }
}

#[test]
fn fixed_grid_size_matches_config() {
    let grid = Grid::filled(GridSpec::standard_5x4(), Symbol::Elk);
    assert_eq!(grid.cells().count(), SlotConfig::buffalo().grid.total_positions());
}
