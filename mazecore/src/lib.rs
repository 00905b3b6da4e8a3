//! Maze generation and solving.
//!
//! [`maze::Generator`] carves a perfect maze with randomized Kruskal's algorithm, using one of
//! the [`sets`] implementations to tell which cells are already connected.
//! [`Maze::to_grid`](maze::Maze::to_grid) turns it into a [`grid::GridEncoding`] that
//! [`solver::Solver`] searches with A*.

pub mod array;
pub mod dims;
pub mod grid;
pub mod maze;
pub mod sets;
pub mod solver;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

pub use dims::Dims;
pub use grid::{GridEncoding, Pixel};
pub use maze::{build_maze, Generator, Maze};
pub use solver::{solve, Solver};
