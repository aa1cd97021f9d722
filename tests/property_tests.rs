//! Property-based tests for the simulation core.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated grids, patterns and command sequences.

use cellsim::core::{controller, Cell, Grid, HistoryLedger, Outcome, Pattern, SimulationState};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_grid()(rows in 1..8usize, cols in 1..8usize)
        (cells in prop::collection::vec(prop::collection::vec(any::<bool>(), cols), rows))
        -> Grid
    {
        let cells = cells
            .into_iter()
            .map(|row| row.into_iter().map(Cell::from).collect())
            .collect();
        Grid::from_rows(cells).unwrap()
    }
}

prop_compose! {
    fn arbitrary_pattern()(height in 1..4usize, width in 1..4usize)
        (cells in prop::collection::vec(prop::collection::vec(any::<bool>(), width), height))
        -> Pattern
    {
        let cells = cells
            .into_iter()
            .map(|row| row.into_iter().map(Cell::from).collect())
            .collect();
        Pattern::new("Random", cells).unwrap()
    }
}

proptest! {
    #[test]
    fn next_generation_is_deterministic(grid in arbitrary_grid()) {
        prop_assert_eq!(grid.next_generation(), grid.next_generation());
    }

    #[test]
    fn next_generation_preserves_dimensions(grid in arbitrary_grid()) {
        let next = grid.next_generation();
        prop_assert_eq!((next.rows(), next.cols()), (grid.rows(), grid.cols()));
    }

    #[test]
    fn empty_grid_is_stable(rows in 1..12usize, cols in 1..12usize) {
        let grid = Grid::empty(rows, cols).unwrap();
        prop_assert_eq!(grid.next_generation(), grid);
    }

    #[test]
    fn toggle_changes_exactly_one_cell(
        grid in arbitrary_grid(),
        x in 0..8isize,
        y in 0..8isize,
    ) {
        let in_bounds = (x as usize) < grid.rows() && (y as usize) < grid.cols();
        match grid.toggle(x, y) {
            Ok(toggled) => {
                prop_assert!(in_bounds);
                let before = grid.population() as isize;
                let after = toggled.population() as isize;
                prop_assert_eq!((after - before).abs(), 1);
                prop_assert_eq!(toggled.toggle(x, y).unwrap(), grid);
            }
            Err(_) => prop_assert!(!in_bounds),
        }
    }

    #[test]
    fn stamp_is_an_idempotent_union(
        grid in arbitrary_grid(),
        pattern in arbitrary_pattern(),
        x in -3..8isize,
        y in -3..8isize,
    ) {
        let once = pattern.apply(&grid, x, y);
        for (row, col) in grid.live_cells() {
            prop_assert!(once.is_alive(row, col));
        }
        prop_assert_eq!(pattern.apply(&once, x, y), once);
    }

    #[test]
    fn ledger_stays_bounded_and_sorted(
        capacity in 1..6usize,
        steps in prop::collection::vec(0..20u64, 1..30),
    ) {
        let grid = Grid::empty(2, 2).unwrap();
        let mut ledger = HistoryLedger::new(capacity);

        for &step in &steps {
            ledger = ledger.record(step, grid.clone());
            prop_assert!(ledger.contains(step));
        }

        let recorded = ledger.steps();
        prop_assert!(recorded.len() <= capacity);
        prop_assert!(recorded.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn replay_matches_first_computation(grid in arbitrary_grid(), warmup in 0..5usize) {
        let state = SimulationState::from_parts(grid, 0, 100, HistoryLedger::new(10));
        let state = (0..warmup).fold(state, |s, _| controller::step_in(&s).state);

        let forward = controller::step_in(&state).state;
        let back = controller::step_out(&forward).state;
        prop_assert_eq!(back.grid(), state.grid());

        let again = controller::step_in(&back);
        let replayed = matches!(again.outcome, Outcome::Replayed { .. });
        prop_assert!(replayed);
        prop_assert_eq!(again.state.grid(), forward.grid());
    }

    #[test]
    fn grid_roundtrip_serialization(grid in arbitrary_grid()) {
        let json = serde_json::to_string(&grid).unwrap();
        let deserialized: Grid = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(grid, deserialized);
    }
}
