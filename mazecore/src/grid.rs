//! Dense open/wall pixel map shared by the generator and the solver.
//!
//! A maze of `w`x`h` cells becomes a `(2w + 1)`x`(2h + 1)` grid. Cell `(c, r)` sits at pixel
//! `(2c + 1, 2r + 1)`, its north wall at `(2c + 1, 2r)` and its west wall at `(2c, 2r + 1)`,
//! pixels with both coordinates even are always walls. The border is solid except for the
//! entrance at `(0, 1)` and the exit at `(width - 1, height - 2)`.

use std::{fmt, str::FromStr};

use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    array::{Array2D, MAX_SIDE},
    dims::Dims,
    maze::{CellWall, Maze},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pixel {
    #[default]
    Open,
    Wall,
    /// Part of a solution, only ever written into copies made by the solver.
    Solved,
}

impl Pixel {
    pub fn is_passable(self) -> bool {
        !matches!(self, Pixel::Wall)
    }

    pub fn to_char(self) -> char {
        match self {
            Pixel::Open => ' ',
            Pixel::Wall => '#',
            Pixel::Solved => '*',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' | '.' => Some(Pixel::Open),
            '#' => Some(Pixel::Wall),
            '*' => Some(Pixel::Solved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid of {width}x{height} is too small, it needs at least 2x2 pixels")]
    TooSmall { width: usize, height: usize },
    #[error(
        "grid of {width}x{height} is too large, a side can be at most {max} pixels",
        max = MAX_SIDE
    )]
    TooLarge { width: usize, height: usize },
    #[error("expected {expected} pixels, got {got}")]
    SizeMismatch { expected: usize, got: usize },
    #[error("row {row} has {len} pixels, expected {expected}")]
    RaggedRows { row: usize, len: usize, expected: usize },
    #[error("unknown pixel {0:?} at {1}")]
    UnknownChar(char, Dims),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDir {
    Up,
    Down,
    Left,
    Right,
}

impl GridDir {
    pub const ALL: [GridDir; 4] = [GridDir::Up, GridDir::Down, GridDir::Left, GridDir::Right];

    pub fn offset(self) -> Dims {
        match self {
            GridDir::Up => Dims(0, -1),
            GridDir::Down => Dims(0, 1),
            GridDir::Left => Dims(-1, 0),
            GridDir::Right => Dims(1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridEncoding {
    pixels: Array2D<Pixel>,
}

impl GridEncoding {
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, GridError> {
        if width < 2 || height < 2 {
            return Err(GridError::TooSmall { width, height });
        }

        let expected = match width.checked_mul(height) {
            Some(expected) if width <= MAX_SIDE && height <= MAX_SIDE => expected,
            _ => return Err(GridError::TooLarge { width, height }),
        };

        let got = pixels.len();
        let pixels = Array2D::from_vec(pixels, width, height)
            .ok_or(GridError::SizeMismatch { expected, got })?;

        Ok(Self { pixels })
    }

    pub fn size(&self) -> Dims {
        self.pixels.size()
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn get(&self, pos: Dims) -> Option<Pixel> {
        self.pixels.get(pos).copied()
    }

    pub fn is_passable(&self, pos: Dims) -> bool {
        self.get(pos).is_some_and(Pixel::is_passable)
    }

    pub fn entrance(&self) -> Dims {
        Dims(0, 1)
    }

    pub fn exit(&self) -> Dims {
        self.size() - Dims(1, 2)
    }

    /// The neighbor in `dir`, if it lies inside the grid and is not a wall.
    pub fn neighbor(&self, pos: Dims, dir: GridDir) -> Option<Dims> {
        let next = pos + dir.offset();
        self.is_passable(next).then_some(next)
    }

    pub fn open_neighbors(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        GridDir::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(pos, dir))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dims, Pixel)> + '_ {
        self.pixels.iter_pos().zip(self.pixels.iter().copied())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.rows()
    }

    pub fn count(&self, pixel: Pixel) -> usize {
        self.pixels.iter().filter(|&&p| p == pixel).count()
    }

    pub(crate) fn set(&mut self, pos: Dims, pixel: Pixel) {
        if let Some(p) = self.pixels.get_mut(pos) {
            *p = pixel;
        }
    }

    fn fill_rect(&mut self, from: Dims, to: Dims, pixel: Pixel) {
        for pos in Dims::iter_fill(from, to) {
            self.set(pos, pixel);
        }
    }
}

impl Maze {
    /// Renders the wall state into a fresh [`GridEncoding`].
    pub fn to_grid(&self) -> GridEncoding {
        let size = self.size() * 2 + Dims::ONE;
        let mut grid = GridEncoding {
            pixels: Array2D::new(Pixel::Open, size.0 as usize, size.1 as usize),
        };

        for (pos, cell) in self.cells() {
            let corner = pos * 2;
            grid.set(corner, Pixel::Wall);
            if cell.has_wall(CellWall::North) {
                grid.set(corner + Dims(1, 0), Pixel::Wall);
            }
            if cell.has_wall(CellWall::West) {
                grid.set(corner + Dims(0, 1), Pixel::Wall);
            }
        }

        // south and east borders have no owning cell
        grid.fill_rect(Dims(size.0 - 1, 0), size, Pixel::Wall);
        grid.fill_rect(Dims(0, size.1 - 1), size, Pixel::Wall);

        let (entrance, exit) = (grid.entrance(), grid.exit());
        grid.set(entrance, Pixel::Open);
        grid.set(exit, Pixel::Open);

        grid
    }
}

impl From<&Maze> for GridEncoding {
    fn from(maze: &Maze) -> Self {
        maze.to_grid()
    }
}

impl fmt::Display for GridEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for pixel in row {
                write!(f, "{}", pixel.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for GridEncoding {
    type Err = GridError;

    /// Parses the [`Display`](fmt::Display) format, `.` is accepted as an open pixel too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().filter(|l| !l.is_empty()).collect();
        let width = lines.first().map_or(0, |l| l.chars().count());

        let mut pixels = Vec::with_capacity(width * lines.len());
        for (y, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != width {
                return Err(GridError::RaggedRows {
                    row: y,
                    len,
                    expected: width,
                });
            }

            for (x, c) in line.chars().enumerate() {
                let pixel = Pixel::from_char(c)
                    .ok_or(GridError::UnknownChar(c, Dims(x as i32, y as i32)))?;
                pixels.push(pixel);
            }
        }

        Self::from_pixels(width, lines.len(), pixels)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::{maze::build_maze, Random};

    #[test]
    fn closed_maze_layout() {
        let grid = Maze::closed(2, 2).to_grid();
        let expected = ["#####", "  # #", "#####", "# #  ", "#####"];
        assert_eq!(grid.to_string().lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn generated_maze_layout() {
        let mut rng = Random::seed_from_u64(3);
        let maze = build_maze(6, 4, &mut rng).unwrap();
        let grid = maze.to_grid();
        assert_eq!(grid.size(), Dims(13, 9));

        for (pos, pixel) in grid.iter() {
            let on_border = pos.0 == 0 || pos.1 == 0 || pos.0 == 12 || pos.1 == 8;
            let even = pos.0 % 2 == 0 && pos.1 % 2 == 0;
            let cell = pos.0 % 2 == 1 && pos.1 % 2 == 1;

            if pos == grid.entrance() || pos == grid.exit() {
                assert_eq!(pixel, Pixel::Open);
            } else if on_border || even {
                assert_eq!(pixel, Pixel::Wall, "{}", pos);
            } else if cell {
                assert_eq!(pixel, Pixel::Open, "{}", pos);
            }
        }

        // every cleared wall opens exactly one joint pixel
        let joints = grid
            .iter()
            .filter(|&(pos, p)| (pos.0 + pos.1) % 2 == 1 && p == Pixel::Open)
            .count();
        assert_eq!(joints, maze.cleared_walls() + 2);
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let grid: GridEncoding = "###\n..#\n#.#\n".parse().unwrap();

        assert_eq!(grid.neighbor(Dims(0, 1), GridDir::Left), None);
        assert_eq!(grid.neighbor(Dims(0, 1), GridDir::Up), None);
        assert_eq!(grid.neighbor(Dims(0, 1), GridDir::Right), Some(Dims(1, 1)));
        assert_eq!(grid.open_neighbors(Dims(1, 1)).as_slice(), &[Dims(1, 2), Dims(0, 1)]);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "#\n".parse::<GridEncoding>(),
            Err(GridError::TooSmall {
                width: 1,
                height: 1
            })
        );
        assert_eq!(
            "##\n#\n".parse::<GridEncoding>(),
            Err(GridError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            "##\n#x\n".parse::<GridEncoding>(),
            Err(GridError::UnknownChar('x', Dims(1, 1)))
        );
        assert_eq!(
            GridEncoding::from_pixels(2, 2, vec![Pixel::Open; 3]),
            Err(GridError::SizeMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let width = usize::MAX / 2 + 1;
        assert_eq!(
            GridEncoding::from_pixels(width, 2, Vec::new()),
            Err(GridError::TooLarge { width, height: 2 })
        );
        assert_eq!(
            GridEncoding::from_pixels(2, MAX_SIDE + 1, Vec::new()),
            Err(GridError::TooLarge {
                width: 2,
                height: MAX_SIDE + 1
            })
        );
    }

    #[test]
    fn display_parses_back() {
        let mut rng = Random::seed_from_u64(8);
        let grid = build_maze(5, 5, &mut rng).unwrap().to_grid();
        assert_eq!(grid.to_string().parse::<GridEncoding>(), Ok(grid));
    }
}
