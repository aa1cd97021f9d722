//! Pattern stamps overlaid onto a grid.

use super::error::SimulationError;
use super::grid::{Cell, Grid};
use serde::{Deserialize, Serialize};

/// Named, immutable binary matrix that can be stamped onto a [`Grid`].
///
/// Invariant: non-empty and rectangular. Patterns are usually much smaller
/// than the grid they are applied to.
///
/// # Example
///
/// ```rust
/// use cellsim::core::{Grid, Pattern};
///
/// let block = Pattern::parse("Block", "OO\nOO").unwrap();
/// let grid = block.apply(&Grid::empty(5, 5).unwrap(), 1, 1);
///
/// assert_eq!(grid.live_cells(), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPattern", into = "RawPattern")]
pub struct Pattern {
    name: String,
    cells: Vec<Vec<Cell>>,
}

#[derive(Serialize, Deserialize)]
struct RawPattern {
    name: String,
    cells: Vec<Vec<Cell>>,
}

impl Pattern {
    /// Build a pattern from a matrix, enforcing the shape invariant.
    pub fn new(name: impl Into<String>, cells: Vec<Vec<Cell>>) -> Result<Self, SimulationError> {
        let name = name.into();
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(SimulationError::EmptyPattern { name });
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(SimulationError::RaggedRows {
                row,
                expected: width,
                found,
            });
        }
        Ok(Self { name, cells })
    }

    /// Parse a plaintext picture: `O` or `*` for live cells, `.` for dead.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, SimulationError> {
        let cells = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|glyph| match glyph {
                        'O' | '*' => Ok(Cell::Alive),
                        '.' => Ok(Cell::Dead),
                        other => Err(SimulationError::InvalidGlyph(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, cells)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn as_rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Union the pattern's live cells onto a copy of `grid`.
    ///
    /// `origin_x` is the column offset and `origin_y` the row offset of the
    /// pattern's top-left corner, so pattern cell `(row, col)` lands on grid
    /// cell `(origin_y + row, origin_x + col)`. Cells falling outside the grid
    /// are skipped. Dead pattern cells never clear grid cells.
    pub fn apply(&self, grid: &Grid, origin_x: isize, origin_y: isize) -> Grid {
        let mut stamped = grid.clone();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.is_alive() {
                    continue;
                }
                let target = (
                    origin_y.checked_add_unsigned(row).and_then(|r| usize::try_from(r).ok()),
                    origin_x.checked_add_unsigned(col).and_then(|c| usize::try_from(c).ok()),
                );
                if let (Some(r), Some(c)) = target {
                    stamped.set_alive(r, c);
                }
            }
        }
        stamped
    }
}

impl TryFrom<RawPattern> for Pattern {
    type Error = SimulationError;

    fn try_from(raw: RawPattern) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.cells)
    }
}

impl From<Pattern> for RawPattern {
    fn from(pattern: Pattern) -> Self {
        Self {
            name: pattern.name,
            cells: pattern.cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Pattern {
        Pattern::parse("Block", "OO\nOO").unwrap()
    }

    #[test]
    fn parse_reads_dimensions() {
        let glider = Pattern::parse("Glider", ".O.\n..O\nOOO").unwrap();
        assert_eq!(glider.name(), "Glider");
        assert_eq!(glider.width(), 3);
        assert_eq!(glider.height(), 3);
        assert_eq!(glider.as_rows()[1], vec![Cell::Dead, Cell::Dead, Cell::Alive]);
    }

    #[test]
    fn parse_ignores_blank_lines_and_indentation() {
        let pattern = Pattern::parse("Row", "\n    OOO\n\n").unwrap();
        assert_eq!(pattern.height(), 1);
        assert_eq!(pattern.width(), 3);
    }

    #[test]
    fn parse_rejects_unknown_glyphs() {
        assert_eq!(
            Pattern::parse("Bad", "O#"),
            Err(SimulationError::InvalidGlyph('#'))
        );
    }

    #[test]
    fn new_rejects_empty_and_ragged() {
        assert!(matches!(
            Pattern::new("Nothing", vec![]),
            Err(SimulationError::EmptyPattern { .. })
        ));
        assert!(matches!(
            Pattern::parse("Nothing", ""),
            Err(SimulationError::EmptyPattern { .. })
        ));
        assert!(matches!(
            Pattern::parse("Ragged", "OO\nO"),
            Err(SimulationError::RaggedRows { row: 1, .. })
        ));
    }

    #[test]
    fn stamp_sets_exactly_the_covered_live_cells() {
        let grid = Grid::empty(5, 5).unwrap();
        let stamped = block().apply(&grid, 1, 1);

        assert_eq!(stamped.live_cells(), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn stamp_is_idempotent() {
        let grid = Grid::empty(5, 5).unwrap();
        let once = block().apply(&grid, 1, 1);
        let twice = block().apply(&once, 1, 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn stamp_uses_x_as_column_offset() {
        let row = Pattern::parse("Row", "OOO").unwrap();
        let stamped = row.apply(&Grid::empty(4, 6).unwrap(), 2, 1);
        assert_eq!(stamped.live_cells(), vec![(1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn stamp_never_clears_cells() {
        let grid = Grid::empty(3, 3).unwrap().toggle(1, 1).unwrap();
        let hollow = Pattern::parse("Hollow", "O.O").unwrap();
        let stamped = hollow.apply(&grid, 0, 1);

        assert_eq!(stamped.live_cells(), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn stamp_skips_cells_outside_the_grid() {
        let grid = Grid::empty(3, 3).unwrap();

        let clipped = block().apply(&grid, 2, 2);
        assert_eq!(clipped.live_cells(), vec![(2, 2)]);

        let negative = block().apply(&grid, -1, -1);
        assert_eq!(negative.live_cells(), vec![(0, 0)]);

        let far = block().apply(&grid, 10, 10);
        assert_eq!(far, grid);
    }

    #[test]
    fn pattern_serde_validates() {
        let json = serde_json::to_string(&block()).unwrap();
        assert_eq!(json, r#"{"name":"Block","cells":[[1,1],[1,1]]}"#);

        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block());
        assert!(serde_json::from_str::<Pattern>(r#"{"name":"X","cells":[]}"#).is_err());
    }
}
