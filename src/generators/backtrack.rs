use crate::{
    error::MazeError,
    generators::RandomSource,
    maze::{Grid, get_neighbors},
    observer::{Phase, StepEvent, StepKind, StepObserver},
};

pub(super) fn randomized_dfs<R, O>(
    grid: &mut Grid,
    rng: &mut R,
    observer: &mut O,
) -> Result<(), MazeError>
where
    R: RandomSource + ?Sized,
    O: StepObserver + ?Sized,
{
    let total = grid.len();

    // Initialize the starting point
    let start = (
        rng.pick_range(0..grid.width()),
        rng.pick_range(0..grid.height()),
    );
    grid.mark_carved(start)?;
    let mut carved = 1;

    // The stack holds the current carving path, top is the cell being extended
    let mut stack = vec![start];

    while carved < total {
        let Some(&current) = stack.last() else {
            break;
        };

        let candidates = get_neighbors(grid, current)
            .filter(|&(_, neighbor)| !grid[neighbor].is_carved())
            .collect::<Vec<_>>();

        let event = if candidates.is_empty() {
            // Dead end, the cell keeps its passages but does no further work
            stack.pop();
            StepEvent::new(current, StepKind::Backtrack, Phase::Generate)
        } else {
            let (direction, _) = candidates[rng.pick_index(candidates.len())];
            let next = grid.open_passage(current, direction)?;
            grid.mark_carved(next)?;
            stack.push(next);
            carved += 1;
            StepEvent::new(next, StepKind::Carve, Phase::Generate)
        };

        if observer.on_step(grid, event).is_break() {
            return Err(MazeError::Aborted);
        }
    }

    debug_assert_eq!(carved, total, "every cell must be carved");
    Ok(())
}
