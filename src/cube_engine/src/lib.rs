//! A 3x3x3 cube held as 54 coloured stickers. Moves are applied as fixed
//! permutations of those stickers, and solving is delegated to an external
//! program that speaks Kociemba facelet strings.

mod controller;
pub mod external;
pub mod facelets;
mod history;
pub mod moves;
pub mod notation;
pub mod solution;
mod solver;

pub use controller::{CubeController, CubeError, MoveReport, Solution, solve_state};
pub use facelets::{Color, Face, FaceletState};
pub use history::MoveHistory;
pub use moves::{Direction, InvalidMove, Layer, Move};
pub use notation::NotationError;
pub use solution::{SolutionError, SolutionToken};
pub use solver::{Solver, SolverError};
