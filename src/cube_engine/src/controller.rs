use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::{
    facelets::FaceletState,
    history::MoveHistory,
    moves::{InvalidMove, Move},
    notation::{self, NotationError},
    solution::{self, SolutionError, SolutionToken},
    solver::{Solver, SolverError},
};

#[derive(Error, Debug)]
pub enum CubeError {
    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),
    #[error("Malformed facelet string: {0}")]
    MalformedNotation(#[from] NotationError),
    #[error("Malformed solution {solution:?}: {source}")]
    MalformedSolution {
        solution: String,
        source: SolutionError,
    },
    #[error("The cube cannot be solved: {0}")]
    UnsolvableState(String),
    #[error(transparent)]
    SolverFailure(SolverError),
}

impl From<SolverError> for CubeError {
    fn from(value: SolverError) -> Self {
        match value {
            SolverError::Unsolvable(reason) => CubeError::UnsolvableState(reason),
            e => CubeError::SolverFailure(e),
        }
    }
}

/// The cube after a move, as returned to whoever asked for the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    #[serde(rename = "move")]
    pub mv: Move,
    pub cube_string: String,
}

/// A solver's answer, both as it was printed and parsed into tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Solution {
    #[serde(rename = "solutionString")]
    pub raw: String,
    #[serde(rename = "parsedMoves")]
    pub tokens: Vec<SolutionToken>,
}

impl Solution {
    /// Every quarter turn of the solution, in order.
    pub fn quarter_turns(&self) -> impl Iterator<Item = Move> + '_ {
        self.tokens.iter().flat_map(|token| token.quarter_turns())
    }
}

/// Ask `solver` for a solution of `state`. An already solved cube gets an
/// empty solution without consulting the solver.
///
/// # Errors
///
/// If the state cannot be encoded, the solver rejects it or fails, or the
/// solver's answer cannot be parsed
pub fn solve_state<S: Solver + ?Sized>(
    solver: &mut S,
    state: &FaceletState,
) -> Result<Solution, CubeError> {
    if state.is_solved() {
        info!(target: "solver", "Cube is already solved");
        return Ok(Solution::default());
    }

    let facelets = notation::encode_for_solver(state)?;
    info!(target: "solver", "Solving {facelets}");

    let raw = solver.solve(&facelets).inspect_err(|e| {
        warn!(target: "solver", "Solving {facelets} failed: {e}");
    })?;

    let tokens = match solution::parse(&raw) {
        Ok(tokens) => tokens,
        Err(source) => {
            return Err(CubeError::MalformedSolution {
                solution: raw,
                source,
            });
        }
    };

    info!(target: "solver", "Found solution {raw:?} with {} steps", tokens.len());

    Ok(Solution { raw, tokens })
}

/// A single live cube: its state, the moves that led to it, and the solver
/// used to undo them.
pub struct CubeController<S> {
    state: FaceletState,
    history: MoveHistory,
    solver: S,
}

impl<S: Solver> CubeController<S> {
    pub fn new(solver: S) -> CubeController<S> {
        CubeController {
            state: FaceletState::solved(),
            history: MoveHistory::new(),
            solver,
        }
    }

    pub fn state(&self) -> &FaceletState {
        &self.state
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn encoded(&self) -> String {
        notation::encode(&self.state)
    }

    /// Apply a move given by name, such as `F` or `M'`.
    ///
    /// # Errors
    ///
    /// If the name is not a quarter turn. The cube is left as it was.
    pub fn apply(&mut self, name: &str) -> Result<MoveReport, CubeError> {
        let mv = self.state.apply_notation(name).inspect_err(|e| {
            warn!(target: "controller", "{e}");
        })?;

        Ok(self.record(mv))
    }

    pub fn apply_move(&mut self, mv: Move) -> MoveReport {
        self.state.apply(mv);
        self.record(mv)
    }

    fn record(&mut self, mv: Move) -> MoveReport {
        self.history.record(mv);
        debug!(target: "controller", "Applied {mv}, {} moves in history", self.history.len());

        MoveReport {
            mv,
            cube_string: self.encoded(),
        }
    }

    /// Undo the most recent move, if there is one.
    pub fn undo(&mut self) -> Option<Move> {
        self.history.undo(&mut self.state)
    }

    pub fn reset(&mut self) {
        self.state = FaceletState::solved();
        self.history.clear();
        debug!(target: "controller", "Reset cube");
    }

    /// Ask the solver how to solve the current state. The cube itself is not
    /// changed; see [`CubeController::execute`].
    ///
    /// # Errors
    ///
    /// See [`solve_state`]
    pub fn solve(&mut self) -> Result<Solution, CubeError> {
        solve_state(&mut self.solver, &self.state)
    }

    /// Perform every token in order, one quarter turn at a time.
    pub fn execute(&mut self, tokens: &[SolutionToken]) {
        for mv in tokens.iter().flat_map(|token| token.quarter_turns()) {
            self.apply_move(mv);
        }
    }
}
