//! Step notifications emitted by the generator and the solver.
//!
//! Observers see the grid read-only after each algorithmic step and may return
//! [`ControlFlow::Break`] to abort the running algorithm with
//! [`MazeError::Aborted`](crate::MazeError::Aborted). Any pacing or drawing is the
//! observer's business; the algorithms themselves never sleep or render.

use std::{ops::ControlFlow, sync::mpsc::Sender};

use crate::maze::{Coord, Grid};

/// Which algorithm produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Generate,
    Solve,
}

/// What happened at the reported coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// A new cell was joined to the spanning tree
    Carve,
    /// A cell was popped off the stack
    Backtrack,
    /// The solver stepped onto a cell
    Visit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepEvent {
    pub coord: Coord,
    pub kind: StepKind,
    pub phase: Phase,
}

impl StepEvent {
    pub fn new(coord: Coord, kind: StepKind, phase: Phase) -> Self {
        StepEvent { coord, kind, phase }
    }
}

pub trait StepObserver {
    /// Called once after every step. Returning `Break` stops the algorithm.
    fn on_step(&mut self, grid: &Grid, event: StepEvent) -> ControlFlow<()>;
}

/// Observer for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _grid: &Grid, _event: StepEvent) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F> StepObserver for F
where
    F: FnMut(&Grid, StepEvent) -> ControlFlow<()>,
{
    fn on_step(&mut self, grid: &Grid, event: StepEvent) -> ControlFlow<()> {
        self(grid, event)
    }
}

/// Forwards every step to another thread, e.g. a render loop.
///
/// Once the receiving side hangs up there is nobody left to show the steps to,
/// so the observer asks the algorithm to stop.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<StepEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<StepEvent>) -> Self {
        ChannelObserver { sender }
    }
}

impl StepObserver for ChannelObserver {
    fn on_step(&mut self, _grid: &Grid, event: StepEvent) -> ControlFlow<()> {
        match self.sender.send(event) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => {
                tracing::debug!("[observer] step channel closed, requesting stop");
                ControlFlow::Break(())
            }
        }
    }
}
