#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Coord { row, col }
    }

    /// Iterates over every coordinate of a `rows` x `cols` grid in row-major order.
    pub fn iter_grid(rows: usize, cols: usize) -> impl Iterator<Item = Coord> {
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Coord::new(row as i32, col as i32)))
    }

    pub fn is_valid(&self, rows: usize, cols: usize) -> bool {
        self.row >= 0 && self.col >= 0 && (self.row as usize) < rows && (self.col as usize) < cols
    }

    pub fn offset(&self, drow: i32, dcol: i32) -> Self {
        Coord {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    pub fn offset_dir(&self, dir: Direction) -> Self {
        match dir {
            Direction::Up => self.offset(-1, 0),
            Direction::Down => self.offset(1, 0),
            Direction::Forward => self.offset(0, 1),
        }
    }

    fn index(&self, rows: usize, cols: usize) -> Option<usize> {
        if self.is_valid(rows, cols) {
            Some((self.row as usize) * cols + (self.col as usize))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The three ways a hedgehog can be moved during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Forward,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Up, Direction::Down, Direction::Forward];

    pub fn is_sideways(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("cell {0} does not exist")]
pub struct CellNotFound(pub Coord);

/// A row-major grid of `rows` x `cols` values.
/// All access goes through the bounds-checked [`Grid::get`] and [`Grid::get_mut`],
/// which report [`CellNotFound`] for coordinates outside the grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn from_fn(rows: usize, cols: usize, f: impl FnMut(Coord) -> T) -> Self {
        let cells = Coord::iter_grid(rows, cols).map(f).collect();
        Grid { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Coord) -> bool {
        pos.is_valid(self.rows, self.cols)
    }

    pub fn check(&self, pos: Coord) -> Result<(), CellNotFound> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(CellNotFound(pos))
        }
    }

    pub fn get(&self, pos: Coord) -> Result<&T, CellNotFound> {
        pos.index(self.rows, self.cols)
            .and_then(|index| self.cells.get(index))
            .ok_or(CellNotFound(pos))
    }

    pub fn get_mut(&mut self, pos: Coord) -> Result<&mut T, CellNotFound> {
        pos.index(self.rows, self.cols)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(CellNotFound(pos))
    }

    /// Returns an iterator over every cell together with its coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        Coord::iter_grid(self.rows, self.cols).zip(self.cells.iter())
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = (row * self.cols).min(self.cells.len());
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Returns an iterator over the cells of one column, top to bottom.
    /// Yields nothing if the column is outside the grid.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(index, _)| col < cols && index % cols == col)
            .map(|(_, cell)| cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_dir() {
        let pos = Coord::new(2, 3);
        assert_eq!(pos.offset_dir(Direction::Up), Coord::new(1, 3));
        assert_eq!(pos.offset_dir(Direction::Down), Coord::new(3, 3));
        assert_eq!(pos.offset_dir(Direction::Forward), Coord::new(2, 4));
        assert_eq!(Coord::new(0, 0).offset_dir(Direction::Up), Coord::new(-1, 0));
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::from_fn(3, 5, |pos| pos.row * 10 + pos.col);
        assert_eq!(grid.get(Coord::new(2, 4)), Ok(&24));
        assert_eq!(grid.get(Coord::new(0, 0)), Ok(&0));
        let invalid_cases = [
            Coord::new(3, 0),
            Coord::new(0, 5),
            Coord::new(-1, 0),
            Coord::new(0, -1),
        ];
        for pos in invalid_cases {
            assert_eq!(grid.get(pos), Err(CellNotFound(pos)));
            assert_eq!(grid.check(pos), Err(CellNotFound(pos)));
        }
    }

    #[test]
    fn test_grid_rows_and_columns() {
        let mut grid = Grid::from_fn(3, 4, |pos| pos.row * 10 + pos.col);
        assert_eq!(grid.row(1), &[10, 11, 12, 13]);
        assert_eq!(grid.column(2).copied().collect::<Vec<_>>(), vec![2, 12, 22]);
        assert_eq!(grid.column(7).count(), 0);

        *grid.get_mut(Coord::new(1, 1)).unwrap() = 99;
        assert_eq!(grid.row(1), &[10, 99, 12, 13]);
        assert_eq!(grid.iter().count(), 12);
    }

    #[test]
    fn test_cell_not_found_display() {
        let err = CellNotFound(Coord::new(-1, 4));
        assert_eq!(err.to_string(), "cell (-1, 4) does not exist");
    }
}
