//! Gomoku console front end
//!
//! Plays against a human on stdin, watches the engine play itself, or
//! suggests a move for a position stored in a text file.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use gomoku::rules::check_winner;
use gomoku::{AIEngine, Board, EngineConfig, Pos, SearchType, Stone};

#[derive(Parser, Debug)]
#[command(author, version, about = "Gomoku (five in a row) engine", long_about = None)]
struct Cli {
    /// Engine configuration file (TOML); defaults are used if it is missing
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Plies searched below each candidate move
    #[arg(long, global = true)]
    depth: Option<i8>,

    /// Root candidates searched in parallel
    #[arg(long, global = true)]
    batch: Option<usize>,

    /// Search threads
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Time budget per move in milliseconds
    #[arg(long, global = true)]
    time_limit_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// The engine plays both sides
    Selfplay {
        /// Stop after this many moves
        #[arg(long, default_value_t = 225)]
        max_moves: usize,
    },
    /// Play against the engine; enter moves as "row col"
    Play {
        /// Colour the human plays (black moves first)
        #[arg(long, value_enum, default_value_t = Side::Black)]
        human: Side,
    },
    /// Print the engine's move for a position file
    Suggest {
        /// Board in text form: 15 rows of '.', 'X', 'O'
        board_file: PathBuf,

        /// Side to move
        #[arg(long, value_enum)]
        side: Side,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Stone {
    fn from(side: Side) -> Stone {
        match side {
            Side::Black => Stone::Black,
            Side::White => Stone::White,
        }
    }
}

/// How a game ended after a move.
enum Outcome {
    Win(Stone),
    Draw,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    info!("engine config: {:?}", config);
    let mut engine = AIEngine::with_config(config).context("failed to start engine")?;

    match cli.command {
        Command::Selfplay { max_moves } => selfplay(&mut engine, max_moves),
        Command::Play { human } => play(&mut engine, human.into()),
        Command::Suggest { board_file, side } => suggest(&mut engine, &board_file, side.into()),
    }
}

/// File (or defaults) first, then command-line overrides.
fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load_or_default(path)?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = cli.depth {
        config.search_depth = depth;
    }
    if let Some(batch) = cli.batch {
        config.parallel_batch = batch;
    }
    if let Some(threads) = cli.threads {
        config.threads = threads;
    }
    if let Some(ms) = cli.time_limit_ms {
        config.time_limit_ms = Some(ms);
    }
    config.validate()?;
    Ok(config)
}

/// Apply `pos` for `side` and report whether the game ended.
fn apply_move(board: &mut Board, pos: Pos, side: Stone) -> Result<Option<Outcome>> {
    let (row, col) = (i32::from(pos.row), i32::from(pos.col));
    if !board.place(row, col, side) {
        bail!("illegal move {} for {:?}", pos, side);
    }
    if board.is_win(row, col, side) {
        Ok(Some(Outcome::Win(side)))
    } else if board.is_full() {
        Ok(Some(Outcome::Draw))
    } else {
        Ok(None)
    }
}

fn announce(outcome: &Outcome) {
    match outcome {
        Outcome::Win(side) => println!("{:?} ({}) wins!", side, side.symbol()),
        Outcome::Draw => println!("Board full: draw."),
    }
}

/// Ask the engine for a move, echoing what it found.
fn engine_move(engine: &mut AIEngine, board: &Board, side: Stone) -> Result<Pos> {
    let result = engine.choose_move(board, side);
    let pos = result
        .best_move
        .with_context(|| format!("engine found no move for {side:?}"))?;
    println!(
        "{:?} plays {} [{:?}, score {}, {} nodes, {} ms]",
        side, pos, result.search_type, result.score, result.nodes, result.time_ms
    );
    if result.opponent_open_three && result.search_type != SearchType::Defense {
        println!("warning: {:?} has an open three", side.opponent());
    }
    Ok(pos)
}

fn selfplay(engine: &mut AIEngine, max_moves: usize) -> Result<()> {
    let mut board = Board::new();
    let mut side = Stone::Black;

    for _ in 0..max_moves {
        let pos = engine_move(engine, &board, side)?;
        let outcome = apply_move(&mut board, pos, side)?;
        println!("{board}");
        if let Some(outcome) = outcome {
            announce(&outcome);
            return Ok(());
        }
        side = side.opponent();
    }
    println!("Move limit reached.");
    Ok(())
}

fn play(engine: &mut AIEngine, human: Stone) -> Result<()> {
    let mut board = Board::new();
    let mut side = Stone::Black;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{board}");
    loop {
        let pos = if side == human {
            print!("{:?} ({}) move [row col]: ", side, side.symbol());
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                println!();
                return Ok(());
            };
            match parse_move(&line?, &board) {
                Some(pos) => pos,
                None => {
                    println!("Invalid move, try again.");
                    continue;
                }
            }
        } else {
            engine_move(engine, &board, side)?
        };

        let outcome = apply_move(&mut board, pos, side)?;
        println!("{board}");
        if let Some(outcome) = outcome {
            announce(&outcome);
            return Ok(());
        }
        side = side.opponent();
    }
}

/// Parse "row col" into an empty on-board cell.
fn parse_move(line: &str, board: &Board) -> Option<Pos> {
    let mut parts = line.split_whitespace();
    let row: i32 = parts.next()?.parse().ok()?;
    let col: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let pos = Pos::try_new(row, col)?;
    board.is_empty(pos).then_some(pos)
}

fn suggest(engine: &mut AIEngine, path: &Path, side: Stone) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    let board: Board = text
        .parse()
        .with_context(|| format!("failed to parse board file {}", path.display()))?;

    if let Some(winner) = check_winner(&board) {
        bail!("position is already won by {:?}", winner);
    }
    if board.is_full() {
        bail!("board is full, no move to suggest");
    }
    let pos = engine_move(engine, &board, side)?;
    println!("{} {}", pos.row, pos.col);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        let mut board = Board::new();
        assert_eq!(parse_move("7 7", &board), Some(Pos::new(7, 7)));
        assert_eq!(parse_move("  3   14 ", &board), Some(Pos::new(3, 14)));
        assert_eq!(parse_move("15 0", &board), None);
        assert_eq!(parse_move("-1 4", &board), None);
        assert_eq!(parse_move("7", &board), None);
        assert_eq!(parse_move("7 7 7", &board), None);
        assert_eq!(parse_move("a b", &board), None);

        board.place_stone(Pos::new(7, 7), Stone::Black);
        assert_eq!(parse_move("7 7", &board), None);
    }

    #[test]
    fn test_apply_move_detects_end() {
        let mut board = Board::new();
        for c in 0..4 {
            board.place_stone(Pos::new(0, c), Stone::White);
        }
        assert!(matches!(
            apply_move(&mut board, Pos::new(0, 4), Stone::White),
            Ok(Some(Outcome::Win(Stone::White)))
        ));
        assert!(apply_move(&mut board, Pos::new(0, 4), Stone::Black).is_err());
        assert!(matches!(
            apply_move(&mut board, Pos::new(5, 5), Stone::Black),
            Ok(None)
        ));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["gomoku", "--depth", "2", "--batch", "0", "selfplay"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.search_depth, 2);
        assert_eq!(config.parallel_batch, 0);
        assert_eq!(config.threads, EngineConfig::default().threads);

        let bad = Cli::parse_from(["gomoku", "--threads", "0", "selfplay"]);
        assert!(build_config(&bad).is_err());
    }
}
