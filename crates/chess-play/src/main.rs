mod config;
mod render;
mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chess_core::{LayoutError, Square};
use chess_rules::{material_balance, Game, Position, RulesError};
use clap::{Args, Parser, Subcommand};
use config::{Config, ConfigError};
use session::Session;
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Two-player chess in the terminal")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to chess.toml in . or ..)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Setup {
    /// Placement descriptor to start from
    #[arg(long)]
    layout: Option<String>,

    /// Side to move: w or b
    #[arg(long)]
    side: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game, reading moves from standard input
    Play {
        #[command(flatten)]
        setup: Setup,
    },
    /// List the legal destinations of the piece on a square
    Moves {
        /// Square of the piece (e.g. e2)
        square: String,
        #[command(flatten)]
        setup: Setup,
    },
    /// Print the material balance (positive favours White)
    Eval {
        #[command(flatten)]
        setup: Setup,
    },
    /// Validate a layout and report check and checkmate
    Check {
        #[command(flatten)]
        setup: Setup,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    debug!(?config, "configuration");

    match cli.command {
        Commands::Play { setup } => {
            let position = load_position(&config, &setup)?;
            let mut game = Game::from_position(position)?;
            let stdin = io::stdin();
            Session::new(&mut game, io::stdout(), config.show_hints).run(stdin.lock())?;
        }
        Commands::Moves { square, setup } => {
            let position = load_position(&config, &setup)?;
            let from: Square = square.parse()?;
            let dests = position.legal_destinations(from)?;
            println!("{}", render::board_with_marks(&position, dests));
            println!("{}", render::square_list(dests));
        }
        Commands::Eval { setup } => {
            let position = load_position(&config, &setup)?;
            println!("{}", material_balance(&position));
        }
        Commands::Check { setup } => {
            let position = load_position(&config, &setup)?;
            println!("{}", render::board(&position));
            println!("layout: {position}");
            let side = position.side_to_move();
            if position.is_checkmate(side)? {
                println!("{side} is checkmated");
            } else if position.is_in_check(side)? {
                println!("{side} is in check");
            } else {
                println!("{side} to move");
            }
        }
    }
    Ok(())
}

fn load_position(config: &Config, setup: &Setup) -> Result<Position, LayoutError> {
    config.position(setup.layout.as_deref(), setup.side.as_deref())
}
