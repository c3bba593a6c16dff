use rand::Rng;

use crate::{Coord, Grid};

/// Columns on the left of the race board that never contain pits.
pub const START_ZONE_WIDTH: usize = 2;

/// Extra columns a race board has on top of its pit area: the start zone and the finish line.
pub const EXTRA_COLUMNS: usize = START_ZONE_WIDTH + 1;

/// Smallest pit grid that has a placement avoiding both full diagonals.
pub const MIN_PIT_GRID_SIZE: usize = 3;

/// Generates a square pit grid where `true` marks a pit.
///
/// Exactly `size` pits are placed and no two of them share a row or a column.
/// Layouts where either corner-to-corner diagonal consists only of pits would wall
/// off the board, so they are thrown away and generated again.
///
/// # Panics
/// Panics if `size` is smaller than [`MIN_PIT_GRID_SIZE`], since every such layout is an impasse.
pub fn generate_pit_grid(size: usize, rng: &mut impl Rng) -> Grid<bool> {
    assert!(
        size >= MIN_PIT_GRID_SIZE,
        "pit grid size must be at least {}, got {}",
        MIN_PIT_GRID_SIZE,
        size
    );
    loop {
        let grid = place_pits(size, rng);
        if !has_impasse(&grid) {
            return grid;
        }
        log::debug!("Pit layout of size {} contains an impasse, regenerating", size);
    }
}

/// Places `size` pits by rejection sampling: random cells are drawn until one is found
/// whose row and column are still free.
fn place_pits(size: usize, rng: &mut impl Rng) -> Grid<bool> {
    let mut grid = Grid::from_fn(size, size, |_| false);
    let mut row_taken = vec![false; size];
    let mut col_taken = vec![false; size];
    let mut placed = 0;
    while placed < size {
        let row = rng.gen_range(0..size);
        let col = rng.gen_range(0..size);
        if row_taken[row] || col_taken[col] {
            continue;
        }
        row_taken[row] = true;
        col_taken[col] = true;
        if let Ok(cell) = grid.get_mut(Coord::new(row as i32, col as i32)) {
            *cell = true;
        }
        placed += 1;
    }
    grid
}

/// Checks whether the main diagonal or the anti-diagonal consists only of pits.
pub fn has_impasse(grid: &Grid<bool>) -> bool {
    let size = grid.rows().min(grid.cols());
    if size == 0 {
        return false;
    }
    let is_pit = |row: usize, col: usize| {
        grid.get(Coord::new(row as i32, col as i32))
            .copied()
            .unwrap_or(false)
    };
    let down = (0..size).all(|i| is_pit(i, i));
    let up = (0..size).all(|i| is_pit(size - 1 - i, i));
    down || up
}

/// Generates the pit layout of a race board with `rows` rows.
///
/// The result has `rows + 3` columns: the pits of [`generate_pit_grid`] are shifted
/// right by [`START_ZONE_WIDTH`], leaving the start zone and the finish column free.
pub fn generate_board_layout(rows: usize, rng: &mut impl Rng) -> Grid<bool> {
    let pits = generate_pit_grid(rows, rng);
    Grid::from_fn(rows, rows + EXTRA_COLUMNS, |pos| {
        let pit_pos = pos.offset(0, -(START_ZONE_WIDTH as i32));
        pits.get(pit_pos).copied().unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pits_per_line(grid: &Grid<bool>) -> (Vec<usize>, Vec<usize>) {
        let rows = (0..grid.rows())
            .map(|r| grid.row(r).iter().filter(|&&p| p).count())
            .collect();
        let cols = (0..grid.cols())
            .map(|c| grid.column(c).filter(|&&p| p).count())
            .collect();
        (rows, cols)
    }

    #[test]
    fn test_pit_grid_is_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for size in 3..=12 {
            for _ in 0..50 {
                let grid = generate_pit_grid(size, &mut rng);
                let (rows, cols) = pits_per_line(&grid);
                assert_eq!(rows, vec![1; size]);
                assert_eq!(cols, vec![1; size]);
            }
        }
    }

    #[test]
    fn test_pit_grid_has_no_impasse() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 3..=6 {
            for _ in 0..200 {
                let grid = generate_pit_grid(size, &mut rng);
                assert!(!has_impasse(&grid));
            }
        }
    }

    #[test]
    fn test_has_impasse() {
        let down = Grid::from_fn(4, 4, |pos| pos.row == pos.col);
        assert!(has_impasse(&down));
        let up = Grid::from_fn(4, 4, |pos| pos.row + pos.col == 3);
        assert!(has_impasse(&up));
        let broken = Grid::from_fn(4, 4, |pos| {
            let swapped = (pos.row == 2 && pos.col == 3) || (pos.row == 3 && pos.col == 2);
            (pos.row == pos.col && pos.row < 2) || swapped
        });
        assert!(!has_impasse(&broken));
    }

    #[test]
    fn test_board_layout_keeps_start_and_finish_clear() {
        let mut rng = StdRng::seed_from_u64(1234);
        for rows in 4..=12 {
            let layout = generate_board_layout(rows, &mut rng);
            assert_eq!(layout.rows(), rows);
            assert_eq!(layout.cols(), rows + 3);
            for col in [0, 1, rows + 2] {
                assert!(layout.column(col).all(|&p| !p));
            }
            let (row_counts, col_counts) = pits_per_line(&layout);
            assert_eq!(row_counts, vec![1; rows]);
            for col in 2..rows + 2 {
                assert_eq!(col_counts[col], 1);
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_board_layout(8, &mut StdRng::seed_from_u64(99));
        let b = generate_board_layout(8, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn test_tiny_grid_panics() {
        generate_pit_grid(2, &mut StdRng::seed_from_u64(0));
    }
}
