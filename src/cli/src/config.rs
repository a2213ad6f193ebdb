use std::{fs, path::Path, path::PathBuf};

use color_eyre::eyre::WrapErr;
use cube_engine::{
    Solver,
    external::{CommandSolver, TwophaseSolver},
};
use log::info;
use serde::{Deserialize, Serialize};

/// Everything read from `cube.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    pub solver: SolverConfig,
}

/// Which program finds solutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolverConfig {
    /// A long running rob-twophase process.
    Twophase {
        #[serde(default = "default_twophase_program")]
        program: PathBuf,
        /// Replaces the default `-c -m 30 -t <threads>`
        args: Option<Vec<String>>,
        /// Where rob-twophase keeps its tables
        tables_dir: Option<PathBuf>,
    },
    /// A program that is started once per solve with the facelets as its
    /// last argument.
    Command {
        program: PathBuf,
        #[serde(default)]
        args: Vec<String>,
    },
}

fn default_twophase_program() -> PathBuf {
    PathBuf::from("twophase")
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig::Twophase {
            program: default_twophase_program(),
            args: None,
            tables_dir: None,
        }
    }
}

impl SolverConfig {
    pub fn build(&self) -> Box<dyn Solver> {
        match self {
            SolverConfig::Twophase {
                program,
                args,
                tables_dir,
            } => {
                let mut solver = TwophaseSolver::new(program);
                if let Some(args) = args {
                    solver = solver.with_args(args.clone());
                }
                if let Some(tables_dir) = tables_dir {
                    solver = solver.with_tables_dir(tables_dir);
                }
                Box::new(solver)
            }
            SolverConfig::Command { program, args } => {
                Box::new(CommandSolver::new(program).with_args(args.clone()))
            }
        }
    }
}

impl CubeConfig {
    /// Read the configuration at `path`, falling back to the defaults if
    /// there is no such file.
    pub fn load(path: &Path) -> color_eyre::Result<CubeConfig> {
        if !path.exists() {
            info!(target: "config", "{} does not exist; using the defaults", path.display());
            return Ok(CubeConfig::default());
        }

        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read configuration file {}", path.display()))?;

        toml::from_str::<CubeConfig>(&text)
            .wrap_err_with(|| format!("Failed to parse configuration file {}", path.display()))
    }
}
