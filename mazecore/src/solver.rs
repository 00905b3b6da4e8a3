use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use thiserror::Error;

use crate::{
    dims::Dims,
    grid::{GridEncoding, Pixel},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("no path from the entrance to the exit")]
    NotFound,
}

/// Search state of a single pixel.
#[derive(Debug, Clone)]
struct PathNode {
    cost: f64,
    previous: Option<Dims>,
    pending: bool,
    done: bool,
}

impl PathNode {
    fn undiscovered() -> Self {
        Self {
            cost: f64::INFINITY,
            previous: None,
            pending: false,
            done: false,
        }
    }
}

/// Frontier entry, `priority` and `cost` are captured when the entry is pushed.
#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    cost: f64,
    pos: Dims,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // `BinaryHeap` is a max-heap, so the lowest priority has to compare as the greatest.
    // Ties go to the cheaper entry, which keeps nodes from getting cheaper while they wait in the
    // frontier on a unit-cost grid.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.cost.total_cmp(&self.cost))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Pixels from the entrance to the exit, both included.
    pub path: Vec<Dims>,
    /// Number of steps, one per pixel moved.
    pub cost: f64,
    /// Nodes taken off the frontier before the exit was reached.
    pub expanded: usize,
}

impl Solution {
    /// Copy of `grid` with the path marked as [`Pixel::Solved`].
    pub fn paint(&self, grid: &GridEncoding) -> GridEncoding {
        let mut solved = grid.clone();
        solved.set(grid.entrance(), Pixel::Solved);
        solved.set(grid.exit(), Pixel::Solved);
        for &pos in &self.path {
            solved.set(pos, Pixel::Solved);
        }
        solved
    }
}

/// A* search over grid pixels with unit step cost, guided by the straight-line distance to the
/// exit.
///
/// A node that gets a cheaper cost while it already waits in the frontier is not pushed again,
/// its old entry keeps its old priority. Entries of nodes that were already expanded are
/// dropped when popped.
#[derive(Debug, Clone, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Solver
    }

    pub fn find_path(&self, grid: &GridEncoding) -> Result<Solution, SolveError> {
        let start = grid.entrance();
        let goal = grid.exit();
        let heuristic = |pos: Dims| pos.euclidean(goal);

        if !grid.is_passable(start) {
            log::debug!("entrance {} is walled off", start);
            return Err(SolveError::NotFound);
        }

        let mut nodes: HashMap<Dims, PathNode> = HashMap::new();
        let mut frontier = BinaryHeap::new();
        let mut expanded = 0;

        nodes.insert(
            start,
            PathNode {
                cost: 0.0,
                pending: true,
                ..PathNode::undiscovered()
            },
        );
        frontier.push(Entry {
            priority: heuristic(start),
            cost: 0.0,
            pos: start,
        });

        while let Some(Entry { pos, .. }) = frontier.pop() {
            let current = nodes.entry(pos).or_insert_with(PathNode::undiscovered);
            if current.done {
                continue;
            }
            current.done = true;
            current.pending = false;
            let cost = current.cost;
            expanded += 1;

            if pos == goal {
                let path = Self::reconstruct(&nodes, goal);
                log::debug!(
                    "found path of cost {} after expanding {} nodes",
                    cost,
                    expanded
                );
                return Ok(Solution {
                    path,
                    cost,
                    expanded,
                });
            }

            for next in grid.open_neighbors(pos) {
                let node = nodes.entry(next).or_insert_with(PathNode::undiscovered);
                let new_cost = cost + 1.0;
                if node.done || new_cost >= node.cost {
                    continue;
                }

                node.cost = new_cost;
                node.previous = Some(pos);
                if !node.pending {
                    node.pending = true;
                    frontier.push(Entry {
                        priority: new_cost + heuristic(next),
                        cost: new_cost,
                        pos: next,
                    });
                }
            }
        }

        log::debug!("frontier exhausted after expanding {} nodes", expanded);
        Err(SolveError::NotFound)
    }

    /// Finds a path and returns a copy of `grid` with it marked.
    pub fn solve(&self, grid: &GridEncoding) -> Result<GridEncoding, SolveError> {
        self.find_path(grid).map(|solution| solution.paint(grid))
    }

    fn reconstruct(nodes: &HashMap<Dims, PathNode>, goal: Dims) -> Vec<Dims> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(previous) = nodes.get(&current).and_then(|n| n.previous) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }
}

/// Solves `grid` with the default [`Solver`].
pub fn solve(grid: &GridEncoding) -> Result<GridEncoding, SolveError> {
    Solver::new().solve(grid)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::SeedableRng as _;

    use super::*;
    use crate::{
        maze::{build_maze, CellWall, Generator, Maze, SetsKind},
        Random,
    };

    fn grid(s: &str) -> GridEncoding {
        s.parse().unwrap()
    }

    /// Plain breadth-first distance, for checking optimality.
    fn bfs_distance(grid: &GridEncoding) -> Option<usize> {
        let mut dist = HashMap::new();
        let mut queue = VecDeque::from([grid.entrance()]);
        dist.insert(grid.entrance(), 0);
        while let Some(pos) = queue.pop_front() {
            let d = dist[&pos];
            if pos == grid.exit() {
                return Some(d);
            }
            for next in grid.open_neighbors(pos) {
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn assert_valid_path(grid: &GridEncoding, solution: &Solution) {
        assert_eq!(solution.path.first(), Some(&grid.entrance()));
        assert_eq!(solution.path.last(), Some(&grid.exit()));
        assert_eq!(solution.cost, (solution.path.len() - 1) as f64);
        for step in solution.path.windows(2) {
            assert_eq!(step[0].manhattan(step[1]), 1);
            assert!(grid.is_passable(step[1]));
        }
    }

    #[test]
    fn l_shaped_two_by_two() {
        let mut maze = Maze::closed(2, 2);
        maze.remove_wall(Dims(1, 0), CellWall::West);
        maze.remove_wall(Dims(1, 1), CellWall::North);
        maze.remove_wall(Dims(0, 1), CellWall::North);
        let maze_grid = maze.to_grid();

        let solution = Solver::new().find_path(&maze_grid).unwrap();
        assert_eq!(
            solution.path,
            vec![
                Dims(0, 1),
                Dims(1, 1),
                Dims(2, 1),
                Dims(3, 1),
                Dims(3, 2),
                Dims(3, 3),
                Dims(4, 3),
            ]
        );
        assert_eq!(solution.cost, 6.0);

        let solved = solve(&maze_grid).unwrap();
        let expected = grid(
            "#####\n\
             ****#\n\
             #.#*#\n\
             #.#**\n\
             #####\n",
        );
        assert_eq!(solved, expected);
    }

    #[test]
    fn open_room_costs_manhattan_distance() {
        let room = grid(
            "#######\n\
             .......\n\
             .......\n\
             .......\n\
             #######\n",
        );
        let solution = Solver::new().find_path(&room).unwrap();
        assert_eq!(
            solution.cost,
            room.entrance().manhattan(room.exit()) as f64
        );
        assert_valid_path(&room, &solution);
    }

    #[test]
    fn walled_off_exit_is_not_found() {
        let split = grid(
            "#######\n\
             ...#..#\n\
             #..#...\n\
             #######\n",
        );
        assert_eq!(Solver::new().find_path(&split), Err(SolveError::NotFound));
        assert_eq!(solve(&split), Err(SolveError::NotFound));
    }

    #[test]
    fn blocked_exit_pixel_is_not_found() {
        let blocked = grid(
            "####\n\
             ...#\n\
             ####\n",
        );
        assert_eq!(solve(&blocked), Err(SolveError::NotFound));
    }

    #[test]
    fn walled_entrance_is_not_found() {
        let walled = grid(
            "#####\n\
             #...#\n\
             #....\n\
             #####\n",
        );
        assert_eq!(walled.get(walled.entrance()), Some(Pixel::Wall));
        assert_eq!(Solver::new().find_path(&walled), Err(SolveError::NotFound));
        assert_eq!(solve(&walled), Err(SolveError::NotFound));
    }

    #[test]
    fn input_is_left_untouched() {
        let mut rng = Random::seed_from_u64(10);
        let maze_grid = build_maze(8, 8, &mut rng).unwrap().to_grid();
        let copy = maze_grid.clone();

        let solved = solve(&maze_grid).unwrap();
        assert_eq!(maze_grid, copy);
        assert_eq!(maze_grid.count(Pixel::Solved), 0);
        assert_ne!(solved, maze_grid);
    }

    #[test]
    fn finds_shortest_path_around_loops() {
        // more than one route leads to the exit
        let loops = grid(
            "#########\n\
             ........#\n\
             #.#####.#\n\
             #.#...#.#\n\
             #.#.#.#.#\n\
             #.......#\n\
             #####....\n\
             #########\n",
        );
        let solution = Solver::new().find_path(&loops).unwrap();
        assert_valid_path(&loops, &solution);
        assert_eq!(Some(solution.cost as usize), bfs_distance(&loops));
    }

    #[test]
    fn generated_mazes_are_solved_optimally() {
        for seed in 0..20 {
            let mut rng = Random::seed_from_u64(seed);
            let kind = if seed % 2 == 0 {
                SetsKind::Faster
            } else {
                SetsKind::Trivial
            };
            let maze = Generator::new()
                .sets(kind)
                .generate_with(9, 13, &mut rng)
                .unwrap();
            let maze_grid = maze.to_grid();

            let solution = Solver::new().find_path(&maze_grid).unwrap();
            assert_valid_path(&maze_grid, &solution);
            assert_eq!(Some(solution.cost as usize), bfs_distance(&maze_grid));

            let solved = solution.paint(&maze_grid);
            assert_eq!(solved.count(Pixel::Solved), solution.path.len());
        }
    }

    #[test]
    fn frontier_orders_by_full_precision() {
        // a truncating comparison would see these as equal
        let mut frontier = BinaryHeap::new();
        for (priority, x) in [(10.7, 0), (10.3, 1), (10.5, 2)] {
            frontier.push(Entry {
                priority,
                cost: 0.0,
                pos: Dims(x, 0),
            });
        }
        let order: Vec<_> = std::iter::from_fn(|| frontier.pop().map(|e| e.pos.0)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn frontier_ties_prefer_cheaper_entries() {
        let mut frontier = BinaryHeap::new();
        frontier.push(Entry {
            priority: 8.0,
            cost: 6.0,
            pos: Dims(0, 0),
        });
        frontier.push(Entry {
            priority: 8.0,
            cost: 4.0,
            pos: Dims(1, 0),
        });
        assert_eq!(frontier.pop().map(|e| e.pos), Some(Dims(1, 0)));
    }
}
