use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    /// The solver understood the input but no sequence of moves reaches it.
    #[error("The solver rejected the cube: {0}")]
    Unsolvable(String),
    #[error("The solver failed: {0}")]
    Failed(String),
    #[error("Could not communicate with the solver: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that finds a solution for a facelet string. Implementors are
/// called once per solve request and never retried.
pub trait Solver {
    /// Given a 54 character facelet string, return the moves that solve it as
    /// a whitespace separated string such as `R U2 F'`.
    ///
    /// # Errors
    ///
    /// If the cube is not solvable or the solver itself fails
    fn solve(&mut self, facelets: &str) -> Result<String, SolverError>;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&mut self, facelets: &str) -> Result<String, SolverError> {
        (**self).solve(facelets)
    }
}

impl<S: Solver + ?Sized> Solver for &mut S {
    fn solve(&mut self, facelets: &str) -> Result<String, SolverError> {
        (**self).solve(facelets)
    }
}
