use crate::dims::Dims;

/// Walls owned by a single cell.
///
/// A cell only stores its north and west walls, the south and east ones belong to the neighbors
/// below and to the right of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    north: bool,
    west: bool,
}

impl Cell {
    pub fn new() -> Cell {
        Cell {
            north: true,
            west: true,
        }
    }

    pub fn remove_wall(&mut self, wall: CellWall) {
        match wall {
            CellWall::North => self.north = false,
            CellWall::West => self.west = false,
        }
    }

    pub fn has_wall(&self, wall: CellWall) -> bool {
        match wall {
            CellWall::North => self.north,
            CellWall::West => self.west,
        }
    }

    pub fn cleared_walls(&self) -> usize {
        CellWall::ALL.iter().filter(|&&w| !self.has_wall(w)).count()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellWall {
    North,
    West,
}

impl CellWall {
    pub const ALL: [CellWall; 2] = [CellWall::North, CellWall::West];

    /// Offset of the neighbor on the other side of the wall.
    pub fn to_coord(self) -> Dims {
        match self {
            Self::North => Dims(0, -1),
            Self::West => Dims(-1, 0),
        }
    }
}
