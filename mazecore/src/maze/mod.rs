pub mod cell;
pub mod generator;

use smallvec::SmallVec;

pub use cell::{Cell, CellWall};
pub use generator::{build_maze, GenerationStats, Generator, GeneratorError, SetsKind, Termination};

use crate::{array::Array2D, dims::Dims};

/// Rectangular maze, cells are addressed as `Dims(col, row)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub(crate) cells: Array2D<Cell>,
}

impl Maze {
    /// Maze with every wall standing.
    pub(crate) fn closed(width: usize, height: usize) -> Self {
        Maze {
            cells: Array2D::new(Cell::new(), width, height),
        }
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.get(pos).is_some()
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Dims, &Cell)> {
        self.cells.iter_pos().zip(self.cells.iter())
    }

    /// Top-left cell, next to the entrance breach.
    pub fn entrance_cell(&self) -> Dims {
        Dims::ZERO
    }

    /// Bottom-right cell, next to the exit breach.
    pub fn exit_cell(&self) -> Dims {
        self.size() - Dims::ONE
    }

    /// Returns the cell owning the wall between two adjacent cells, and which of its walls it is.
    ///
    /// Returns `None` if the cells are not adjacent.
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<(Dims, CellWall)> {
        match (cell2.0 - cell.0, cell2.1 - cell.1) {
            (0, -1) => Some((cell, CellWall::North)),
            (0, 1) => Some((cell2, CellWall::North)),
            (-1, 0) => Some((cell, CellWall::West)),
            (1, 0) => Some((cell2, CellWall::West)),
            _ => None,
        }
    }

    pub fn is_open_between(&self, cell: Dims, cell2: Dims) -> bool {
        if !self.is_in_bounds(cell) || !self.is_in_bounds(cell2) {
            return false;
        }

        Self::which_wall_between(cell, cell2)
            .and_then(|(owner, wall)| self.get_cell(owner).map(|c| !c.has_wall(wall)))
            .unwrap_or(false)
    }

    /// Cells reachable from `pos` in one step through a cleared wall.
    pub fn open_neighbors(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        [Dims(0, -1), Dims(0, 1), Dims(-1, 0), Dims(1, 0)]
            .into_iter()
            .map(|off| pos + off)
            .filter(|&next| self.is_open_between(pos, next))
            .collect()
    }

    pub fn cleared_walls(&self) -> usize {
        self.cells.iter().map(Cell::cleared_walls).sum()
    }

    pub(crate) fn remove_wall(&mut self, pos: Dims, wall: CellWall) {
        if !self.is_in_bounds(pos + wall.to_coord()) {
            return;
        }

        self.cells[pos].remove_wall(wall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_are_shared_with_neighbors() {
        let mut maze = Maze::closed(3, 3);
        assert!(!maze.is_open_between(Dims(1, 1), Dims(1, 2)));

        maze.remove_wall(Dims(1, 2), CellWall::North);
        assert!(maze.is_open_between(Dims(1, 1), Dims(1, 2)));
        assert!(maze.is_open_between(Dims(1, 2), Dims(1, 1)));

        maze.remove_wall(Dims(2, 1), CellWall::West);
        assert_eq!(
            maze.open_neighbors(Dims(1, 1)).as_slice(),
            &[Dims(1, 2), Dims(2, 1)]
        );
        assert_eq!(maze.cleared_walls(), 2);
    }

    #[test]
    fn border_walls_stay() {
        let mut maze = Maze::closed(2, 2);
        maze.remove_wall(Dims(0, 0), CellWall::North);
        maze.remove_wall(Dims(0, 1), CellWall::West);
        assert_eq!(maze.cleared_walls(), 0);
    }

    #[test]
    fn only_adjacent_cells_share_walls() {
        assert_eq!(Maze::which_wall_between(Dims(0, 0), Dims(1, 1)), None);
        assert_eq!(Maze::which_wall_between(Dims(0, 0), Dims(0, 0)), None);
        assert_eq!(
            Maze::which_wall_between(Dims(2, 0), Dims(1, 0)),
            Some((Dims(2, 0), CellWall::West))
        );
    }
}
