use rand::{thread_rng, Rng as _, SeedableRng as _};
use thiserror::Error;

use super::{CellWall, Maze};
use crate::{
    dims::Dims,
    sets::{DisjointSets, FasterDisjointSets, SetError, TrivialDisjointSets},
    Random,
};

/// Largest side that still fits the grid encoding into `i32` coordinates.
pub const MAX_SIDE: usize = (i32::MAX as usize - 1) / 2;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(
        "invalid maze size {width}x{height}, both sides must be between 2 and {max}",
        max = MAX_SIDE
    )]
    InvalidSize { width: usize, height: usize },
    #[error("disjoint sets rejected an operation: {0}")]
    Sets(#[from] SetError),
}

/// Which union-find implementation tracks connectivity while carving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetsKind {
    Trivial,
    #[default]
    Faster,
}

/// When carving stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Termination {
    /// Every cell is connected, the maze is a spanning tree.
    #[default]
    AllConnected,
    /// Stop as soon as the entrance and exit cells are connected, leaving some cells sealed off.
    EntranceToExit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationStats {
    pub samples: usize,
    pub out_of_bounds: usize,
    pub cycles: usize,
    pub walls_cleared: usize,
    pub sets_left: usize,
    pub average_depth: f64,
}

/// Randomized Kruskal's generator.
///
/// Repeatedly picks a random cell and one of its two walls (north or west), and knocks the wall
/// down if the cells on both sides are not connected yet. Samples are drawn with replacement, so
/// the loop only ends once the chosen [`Termination`] holds.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    sets: SetsKind,
    termination: Termination,
    seed: Option<u64>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sets(mut self, value: SetsKind) -> Self {
        self.sets = value;
        self
    }

    pub fn termination(mut self, value: Termination) -> Self {
        self.termination = value;
        self
    }

    pub fn seed(mut self, value: Option<u64>) -> Self {
        self.seed = value;
        self
    }

    pub fn generate(&self, width: usize, height: usize) -> Result<Maze, GeneratorError> {
        self.generate_stats(width, height).map(|(maze, _)| maze)
    }

    pub fn generate_with(
        &self,
        width: usize,
        height: usize,
        rng: &mut Random,
    ) -> Result<Maze, GeneratorError> {
        self.generate_stats_with(width, height, rng)
            .map(|(maze, _)| maze)
    }

    /// Generates with a generator seeded from the configured seed, or a random one.
    pub fn generate_stats(
        &self,
        width: usize,
        height: usize,
    ) -> Result<(Maze, GenerationStats), GeneratorError> {
        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = Random::seed_from_u64(seed);
        log::debug!("generating with seed {}", seed);

        self.generate_stats_with(width, height, &mut rng)
    }

    /// Generates drawing every random decision from `rng`, the configured seed is ignored.
    pub fn generate_stats_with(
        &self,
        width: usize,
        height: usize,
        rng: &mut Random,
    ) -> Result<(Maze, GenerationStats), GeneratorError> {
        if !(2..=MAX_SIDE).contains(&width) || !(2..=MAX_SIDE).contains(&height) {
            return Err(GeneratorError::InvalidSize { width, height });
        }

        let mut maze = Maze::closed(width, height);
        let stats = match self.sets {
            SetsKind::Trivial => {
                carve(&mut maze, TrivialDisjointSets::new(), self.termination, rng)?
            }
            SetsKind::Faster => {
                let mut sets_rng = rng.clone();
                sets_rng.long_jump();
                let sets = FasterDisjointSets::with_rng(sets_rng);
                carve(&mut maze, sets, self.termination, rng)?
            }
        };

        log::debug!(
            "generated {}x{} maze: {} samples ({} out of bounds, {} cycles), {} walls cleared, \
             average depth {:.3}",
            width,
            height,
            stats.samples,
            stats.out_of_bounds,
            stats.cycles,
            stats.walls_cleared,
            stats.average_depth
        );

        Ok((maze, stats))
    }
}

/// Builds a perfect maze with the default configuration.
pub fn build_maze(width: usize, height: usize, rng: &mut Random) -> Result<Maze, GeneratorError> {
    Generator::default().generate_with(width, height, rng)
}

fn is_done<S: DisjointSets<Dims>>(sets: &mut S, termination: Termination, maze: &Maze) -> bool {
    match termination {
        Termination::AllConnected => sets.number_of_sets() <= 1,
        Termination::EntranceToExit => sets.same_set(&maze.entrance_cell(), &maze.exit_cell()),
    }
}

fn carve<S: DisjointSets<Dims>>(
    maze: &mut Maze,
    mut sets: S,
    termination: Termination,
    rng: &mut Random,
) -> Result<GenerationStats, GeneratorError> {
    for pos in Dims::iter_fill(Dims::ZERO, maze.size()) {
        sets.make_set(pos)?;
    }

    let Dims(width, height) = maze.size();
    let mut stats = GenerationStats::default();

    while !is_done(&mut sets, termination, maze) {
        stats.samples += 1;

        let row = rng.gen_range(0..height);
        let col = rng.gen_range(0..width);
        let cell = Dims(col, row);
        let wall = CellWall::ALL[rng.gen_range(0..CellWall::ALL.len())];

        let neighbor = cell + wall.to_coord();
        if !maze.is_in_bounds(neighbor) {
            stats.out_of_bounds += 1;
            continue;
        }

        // already connected, knocking the wall down would close a loop
        if sets.same_set(&cell, &neighbor) {
            stats.cycles += 1;
            continue;
        }

        sets.union(&cell, &neighbor)?;
        maze.remove_wall(cell, wall);
        stats.walls_cleared += 1;
    }

    stats.sets_left = sets.number_of_sets();
    stats.average_depth = sets.average_depth();

    Ok(stats)
}
