mod config;
mod net;

use std::{
    io::{self, BufRead},
    path::PathBuf,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use cube_engine::{
    CubeController, FaceletState, Move, SolutionToken, Solver, notation, solution, solve_state,
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, debug};
use owo_colors::OwoColorize;

use crate::config::CubeConfig;

/// Turns a virtual 3x3x3 cube and asks an external solver how to solve it
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The configuration file to use, in TOML format. The defaults are used
    /// if it does not exist.
    #[arg(
        long,
        short = 'c',
        global = true,
        default_value = "cube.toml",
        value_name = "CONFIG"
    )]
    config: PathBuf,

    /// Increase logging verbosity (can be repeated)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a sequence of moves to a solved cube and print the result.
    Apply {
        /// The moves to apply, e.g. "R U' F2 M".
        moves: String,
        /// Draw the cube instead of printing its facelet string.
        #[arg(long)]
        show: bool,
    },
    /// Find a solution for a scrambled cube.
    Solve {
        /// Scramble a solved cube with these moves.
        #[arg(long, conflicts_with = "facelets", required_unless_present = "facelets")]
        scramble: Option<String>,
        /// The cube as a 54 character facelet string in URFDLB order.
        #[arg(long)]
        facelets: Option<String>,
        /// Print the solution as JSON.
        #[arg(long)]
        json: bool,
        /// Perform the solution and check that it solves the cube.
        #[arg(long)]
        apply: bool,
    },
    /// Parse solver output into the steps a driver would perform.
    Parse {
        /// The solution, e.g. "R U2 F' (3)" without the move count.
        solution: String,
        /// Print the steps as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Turn a single cube interactively.
    Repl,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match cli.command {
        Commands::Apply { moves, show } => {
            let state = FaceletState::after(&quarter_turns(&moves)?);

            if show {
                println!("{}", net::render(&state));
            } else {
                println!("{}", notation::encode(&state));
            }
        }
        Commands::Solve {
            scramble,
            facelets,
            json,
            apply,
        } => {
            let state = match (scramble, facelets) {
                (Some(scramble), None) => FaceletState::after(&quarter_turns(&scramble)?),
                (None, Some(facelets)) => notation::decode(&facelets)?,
                _ => return Err(eyre!("Exactly one of --scramble or --facelets is needed")),
            };

            let config = CubeConfig::load(&cli.config)?;
            run_solve(config.solver.build(), &state, json, apply)?;
        }
        Commands::Parse { solution, json } => {
            let tokens = solution::parse(&solution)?;

            if json {
                println!("{}", serde_json::to_string(&tokens)?);
            } else {
                for token in tokens {
                    let turns = token.quarter_turns().join(" ");
                    println!("{:<4} {}", token.to_string(), turns.dimmed());
                }
            }
        }
        Commands::Repl => {
            let config = CubeConfig::load(&cli.config)?;
            run_repl(config.solver.build())?;
        }
    }

    Ok(())
}

/// Read a move sequence, allowing half turns such as `R2`.
fn quarter_turns(moves: &str) -> color_eyre::Result<Vec<Move>> {
    let tokens =
        solution::parse(moves).wrap_err_with(|| format!("Could not read the moves {moves:?}"))?;

    Ok(tokens
        .into_iter()
        .flat_map(SolutionToken::quarter_turns)
        .collect())
}

fn run_solve(
    mut solver: Box<dyn Solver>,
    state: &FaceletState,
    json: bool,
    apply: bool,
) -> color_eyre::Result<()> {
    let solution = solve_state(&mut solver, state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        println!(
            "{} ({} steps, {} quarter turns)",
            solution.raw,
            solution.tokens.len(),
            solution.quarter_turns().count()
        );
    }

    if apply {
        let mut state = state.clone();
        state.apply_all(&solution.quarter_turns().collect_vec());

        if !state.is_solved() {
            return Err(eyre!(
                "The solution left the cube at {}",
                notation::encode(&state)
            ));
        }

        eprintln!("{}", "Solved".green());
    }

    Ok(())
}

fn run_repl(solver: Box<dyn Solver>) -> color_eyre::Result<()> {
    let mut cube = CubeController::new(solver);

    eprintln!(
        "Enter moves such as `R U' F2 M`, or one of `undo`, `reset`, `solve`, `show`, `history`, `exit`"
    );

    for line in io::stdin().lock().lines() {
        let line = line?;

        match line.trim() {
            "" => {}
            "exit" | "quit" => break,
            "undo" => match cube.undo() {
                Some(mv) => println!("Undid {mv}; {}", cube.encoded()),
                None => println!("{}", "Nothing to undo".yellow()),
            },
            "reset" => {
                cube.reset();
                println!("{}", cube.encoded());
            }
            "show" => println!("{}", net::render(cube.state())),
            "history" => {
                println!("{}", solution::compress(cube.history().moves()).iter().join(" "));
            }
            "solve" => match cube.solve() {
                Ok(solution) => {
                    println!("Solution: {}", solution.raw);
                    cube.execute(&solution.tokens);
                    println!("{}", cube.encoded());
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
            moves => match solution::parse(moves) {
                Ok(tokens) => {
                    for mv in tokens.iter().flat_map(|token| token.quarter_turns()) {
                        let report = cube.apply_move(mv);
                        debug!("{} -> {}", report.mv, report.cube_string);
                    }
                    println!("{}", cube.encoded());
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
        }
    }

    Ok(())
}
