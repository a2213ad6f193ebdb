//! Solvers that run as separate programs.

use std::{
    fs,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    thread::available_parallelism,
};

use itertools::Itertools;
use log::{debug, info, warn};

use crate::solver::{Solver, SolverError};

/// Remove the trailing move count from a line of solver output, e.g.
/// `R F2 R' U (4)` becomes `R F2 R' U`. Anything else is kept for the
/// solution parser to accept or reject.
fn clean_solution(line: &str) -> String {
    let mut tokens = line.split_whitespace().collect_vec();

    if tokens.last().is_some_and(|last| is_move_count(last)) {
        tokens.pop();
    }

    tokens.join(" ")
}

fn is_move_count(token: &str) -> bool {
    token
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .is_some_and(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()))
}

fn is_error_line(line: &str) -> bool {
    let line = line.to_ascii_lowercase();
    line.contains("error") || line.contains("invalid")
}

/// Drives a long running [rob-twophase](https://github.com/efrantar/rob-twophase)
/// process. The process is started on the first solve and kept around for
/// later ones since loading its tables takes a while.
pub struct TwophaseSolver {
    program: PathBuf,
    args: Vec<String>,
    tables_dir: Option<PathBuf>,
    process: Option<TwophaseProcess>,
}

struct TwophaseProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl Drop for TwophaseProcess {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            debug!(target: "solver", "Could not kill rob-twophase: {e}");
        }
        let _ = self.child.wait();
    }
}

impl TwophaseSolver {
    pub fn new(program: impl Into<PathBuf>) -> TwophaseSolver {
        TwophaseSolver {
            program: program.into(),
            args: TwophaseSolver::default_args(),
            tables_dir: TwophaseSolver::default_tables_dir(),
            process: None,
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> TwophaseSolver {
        self.args = args;
        self
    }

    /// rob-twophase dumps its tables into its working directory.
    #[must_use]
    pub fn with_tables_dir(mut self, tables_dir: impl Into<PathBuf>) -> TwophaseSolver {
        self.tables_dir = Some(tables_dir.into());
        self
    }

    pub fn default_tables_dir() -> Option<PathBuf> {
        let mut cache = dirs::cache_dir()?;
        cache.push("rob-twophase-tables");
        Some(cache)
    }

    /// Solve with at most 30 moves on every available core.
    pub fn default_args() -> Vec<String> {
        let threads = match available_parallelism() {
            Ok(v) => v.to_string(),
            Err(e) => {
                warn!(target: "solver", "Failed to get available parallelism; defaulting to 1: {e}");
                (1).to_string()
            }
        };

        ["-c", "-m", "30", "-t"]
            .into_iter()
            .map(str::to_owned)
            .chain([threads])
            .collect()
    }

    fn spawn(&self) -> Result<TwophaseProcess, SolverError> {
        let mut command = Command::new(&self.program);

        if let Some(tables_dir) = &self.tables_dir {
            fs::create_dir_all(tables_dir)?;
            command.current_dir(tables_dir);
        }

        info!(
            target: "solver",
            "Starting {} {}", self.program.display(), self.args.join(" ")
        );

        let mut child = command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            return Err(SolverError::Failed(
                "rob-twophase was started without pipes".to_owned(),
            ));
        };

        Ok(TwophaseProcess {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    /*
    The rob-twophase TUI looks like

    ```
    This is rob-twophase v2.0; copyright Elias Frantar 2020.

    Loading tables ...
    Done. 0.518s

    Enter >>solve FACECUBE<< to solve, >>scramble<< to scramble or >>bench<< to benchmark.

    Ready!
    solve LBDLULDDURDRRRFRURBFFRFBFRDLDBDDBDFBBULRLFFBUFLUUBUULL
    30.177ms
    R F2 R' U R U2 F2 U2 F' D' R D2 L2 D2 L' U2 F2 (17)
    Ready!
    ```
    */
    fn exchange(process: &mut TwophaseProcess, facelets: &str) -> Result<String, SolverError> {
        let mut read_line = || -> Result<String, SolverError> {
            let mut line = String::new();
            if process.stdout.read_line(&mut line)? == 0 {
                return Err(SolverError::Failed("rob-twophase exited".to_owned()));
            }
            Ok(line)
        };

        // Wait until rob-twophase tells us that it's ready
        while read_line()?.trim_end() != "Ready!" {}

        writeln!(process.stdin, "solve {facelets}")?;
        process.stdin.flush()?;

        // Captures `30.177ms`
        let timing = read_line()?;
        if is_error_line(&timing) {
            return Err(SolverError::Unsolvable(timing.trim().to_owned()));
        }
        debug!(target: "solver", "rob-twophase took {}", timing.trim());

        let result = read_line()?;
        if is_error_line(&result) {
            return Err(SolverError::Unsolvable(result.trim().to_owned()));
        }

        Ok(clean_solution(&result))
    }
}

impl Solver for TwophaseSolver {
    fn solve(&mut self, facelets: &str) -> Result<String, SolverError> {
        let process = match self.process.take() {
            Some(process) => process,
            None => self.spawn()?,
        };
        let process = self.process.insert(process);

        let result = TwophaseSolver::exchange(process, facelets);

        if matches!(result, Err(SolverError::Io(_) | SolverError::Failed(_))) {
            // The next request starts a fresh process
            self.process = None;
        }

        result
    }
}

/// Runs `program args.. FACELETS` once per solve and reads the solution from
/// the last line it prints, e.g. the `kociemba` command from the Python
/// package of the same name.
pub struct CommandSolver {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandSolver {
    pub fn new(program: impl Into<PathBuf>) -> CommandSolver {
        CommandSolver {
            program: program.into(),
            args: vec![],
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> CommandSolver {
        self.args = args;
        self
    }
}

impl Solver for CommandSolver {
    fn solve(&mut self, facelets: &str) -> Result<String, SolverError> {
        debug!(
            target: "solver",
            "Running {} {} {facelets}", self.program.display(), self.args.join(" ")
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(facelets)
            .stdin(Stdio::null())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if let Some(error) = stdout.lines().chain(stderr.lines()).find(|v| is_error_line(v)) {
            return Err(SolverError::Unsolvable(error.trim().to_owned()));
        }

        if !output.status.success() {
            return Err(SolverError::Failed(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        let line = stdout
            .lines()
            .rev()
            .find(|v| !v.trim().is_empty())
            .unwrap_or_default();

        Ok(clean_solution(line))
    }
}
