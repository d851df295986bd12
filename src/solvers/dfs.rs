use crate::{
    error::MazeError,
    maze::{Coord, Grid},
    observer::{Phase, StepEvent, StepKind, StepObserver},
};

/// Depth-first walk with an explicit stack. Cells are marked visited as they are
/// pushed, so the walk terminates on any grid, not only on trees. On success the
/// stack, bottom to top, is the route from `start` to `goal`.
pub(super) fn solve_dfs<O>(
    grid: &mut Grid,
    start: Coord,
    goal: Coord,
    observer: &mut O,
) -> Result<Vec<Coord>, MazeError>
where
    O: StepObserver + ?Sized,
{
    grid.mark_visited(start)?;
    let mut stack = vec![start];

    loop {
        let Some(&current) = stack.last() else {
            return Err(MazeError::Unsolvable { start, goal });
        };
        if current == goal {
            return Ok(stack);
        }

        let next = grid[current]
            .passages()
            .iter()
            .filter_map(|direction| grid.neighbor(current, direction))
            .find(|&neighbor| !grid[neighbor].is_visited());

        let event = match next {
            Some(neighbor) => {
                grid.mark_visited(neighbor)?;
                stack.push(neighbor);
                StepEvent::new(neighbor, StepKind::Visit, Phase::Solve)
            }
            None => {
                // Nothing left to explore from here
                stack.pop();
                StepEvent::new(current, StepKind::Backtrack, Phase::Solve)
            }
        };

        if observer.on_step(grid, event).is_break() {
            return Err(MazeError::Aborted);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use crate::{
        generators::{generate, get_rng, tests::FirstPick},
        maze::Direction,
        observer::NoopObserver,
        solvers::{solve, solve_between},
    };

    use super::*;

    fn generated(width: u16, height: u16, seed: u64) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        generate(&mut grid, &mut get_rng(Some(seed)), &mut NoopObserver).unwrap();
        grid
    }

    #[test]
    fn test_first_pick_two_by_two() {
        let mut grid = Grid::new(2, 2).unwrap();
        generate(&mut grid, &mut FirstPick, &mut NoopObserver).unwrap();
        let path = solve(&mut grid, &mut NoopObserver).unwrap();
        assert_eq!(path.as_slice(), &[(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_single_cell_path() {
        let mut grid = generated(1, 1, 0);
        let path = solve(&mut grid, &mut NoopObserver).unwrap();
        assert_eq!(path.as_slice(), &[(0, 0)]);
    }

    #[test]
    fn test_path_is_simple_and_connected() {
        let mut grid = generated(12, 9, 77);
        let path = solve(&mut grid, &mut NoopObserver).unwrap();

        assert_eq!(path.start(), Some((0, 0)));
        assert_eq!(path.goal(), Some((11, 8)));
        for pair in path.as_slice().windows(2) {
            let direction = Direction::between(pair[0], pair[1]).unwrap();
            assert!(grid.is_open(pair[0], direction));
        }
        let mut sorted = path.clone().into_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), path.len());
    }

    #[test]
    fn test_resolve_gives_same_path() {
        let mut grid = generated(10, 10, 3);
        let first = solve(&mut grid, &mut NoopObserver).unwrap();
        let second = solve(&mut grid, &mut NoopObserver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_path_cells_are_visited() {
        let mut grid = generated(7, 4, 11);
        let path = solve(&mut grid, &mut NoopObserver).unwrap();
        assert!(path.iter().all(|&coord| grid[coord].is_visited()));
    }

    #[test]
    fn test_explicit_endpoints() {
        let mut grid = generated(6, 6, 21);
        let path = solve_between(&mut grid, (5, 0), (0, 5), &mut NoopObserver).unwrap();
        assert_eq!(path.start(), Some((5, 0)));
        assert_eq!(path.goal(), Some((0, 5)));
    }

    #[test]
    fn test_disconnected_grid_is_unsolvable() {
        // Carved but with no passages: the walk has nowhere to go
        let mut grid = Grid::new(2, 2).unwrap();
        grid.coords()
            .for_each(|coord| grid.mark_carved(coord).unwrap());
        assert_eq!(
            solve(&mut grid, &mut NoopObserver),
            Err(MazeError::Unsolvable {
                start: (0, 0),
                goal: (1, 1)
            })
        );
    }

    #[test]
    fn test_cycle_does_not_loop_forever() {
        // A 2x2 ring plus a spur has a cycle, the walk must still finish
        let mut grid = Grid::new(3, 2).unwrap();
        grid.coords()
            .for_each(|coord| grid.mark_carved(coord).unwrap());
        grid.open_passage((0, 0), Direction::Right).unwrap();
        grid.open_passage((1, 0), Direction::Down).unwrap();
        grid.open_passage((1, 1), Direction::Left).unwrap();
        grid.open_passage((0, 1), Direction::Up).unwrap();
        grid.open_passage((1, 1), Direction::Right).unwrap();
        let path = solve(&mut grid, &mut NoopObserver).unwrap();
        assert_eq!(path.goal(), Some((2, 1)));
    }

    #[test]
    fn test_observer_events_and_abort() {
        let mut grid = generated(8, 8, 8);
        let mut visits = 0;
        let mut observer = |grid: &Grid, event: StepEvent| -> ControlFlow<()> {
            assert_eq!(event.phase, Phase::Solve);
            if event.kind == StepKind::Visit {
                assert!(grid[event.coord].is_visited());
                visits += 1;
            }
            ControlFlow::Continue(())
        };
        let path = solve(&mut grid, &mut observer).unwrap();
        assert!(visits + 1 >= path.len());

        let mut stop_now = |_: &Grid, _: StepEvent| -> ControlFlow<()> { ControlFlow::Break(()) };
        assert_eq!(
            solve(&mut grid, &mut stop_now),
            Err(MazeError::Aborted)
        );
    }
}
