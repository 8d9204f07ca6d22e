use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use std::path::PathBuf;

use connect4_search::{
    game::{Game, GameState},
    players::{ConsolePlayer, EnginePlayer, FixedOrderPlayer, Player, RandomPlayer},
    AppConfig, Board, Engine, Piece, Strategy,
};

mod render;
use render::*;

/// Play or analyse Connect 4 against a depth-limited search engine.
#[derive(Parser)]
#[command(name = "connect4", about = "Connect 4 with minimax and alpha-beta agents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Override the search depth
    #[arg(long)]
    depth: Option<u32>,

    /// Seed for random players
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one game in the console
    Play {
        #[arg(long, value_enum, default_value = "human")]
        player_one: PlayerKind,

        #[arg(long, value_enum, default_value = "alphabeta")]
        player_two: PlayerKind,

        /// Use a colour palette that avoids red and yellow
        #[arg(long)]
        cvd: bool,
    },
    /// Play many computer-only games and report the results
    Arena {
        #[arg(long, value_enum, default_value = "alphabeta")]
        player_one: PlayerKind,

        #[arg(long, value_enum, default_value = "random")]
        player_two: PlayerKind,

        #[arg(long, default_value_t = 100)]
        games: u64,
    },
    /// Compare both searches on a position given as 1-indexed column digits
    Analyse {
        #[arg(default_value = "")]
        moves: String,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum PlayerKind {
    Human,
    Minimax,
    Alphabeta,
    Random,
    Fixed,
}

fn build_player(
    kind: PlayerKind,
    side: Piece,
    config: &AppConfig,
    seed: u64,
) -> Result<Box<dyn Player>> {
    let player: Box<dyn Player> = match kind {
        PlayerKind::Human => Box::new(ConsolePlayer::stdin(side)),
        PlayerKind::Minimax => Box::new(EnginePlayer::new(
            config.engine_config(side).with_strategy(Strategy::Minimax),
        )?),
        PlayerKind::Alphabeta => Box::new(EnginePlayer::new(
            config.engine_config(side).with_strategy(Strategy::AlphaBeta),
        )?),
        PlayerKind::Random => Box::new(RandomPlayer::new(seed)),
        PlayerKind::Fixed => Box::new(FixedOrderPlayer),
    };
    Ok(player)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(depth) = cli.depth {
        config.depth = depth;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate()?;

    match cli.command {
        Command::Play {
            player_one,
            player_two,
            cvd,
        } => play(&config, player_one, player_two, cvd || config.cvd_mode),
        Command::Arena {
            player_one,
            player_two,
            games,
        } => arena(&config, player_one, player_two, games),
        Command::Analyse { moves } => analyse(&config, &moves),
    }
}

fn play(config: &AppConfig, one: PlayerKind, two: PlayerKind, cvd_mode: bool) -> Result<()> {
    let palette = Palette::new(cvd_mode);
    let mut player_one = build_player(one, Piece::PlayerOne, config, config.seed)?;
    let mut player_two =
        build_player(two, Piece::PlayerTwo, config, config.seed.wrapping_add(1))?;

    println!("Welcome to Connect 4\n");
    println!("Player 1: {}", player_one.name());
    println!("Player 2: {}\n", player_two.name());

    let mut game = Game::new();
    display(game.board(), palette).context("Failed to draw board!")?;

    let state = game.run(player_one.as_mut(), player_two.as_mut(), |game| {
        println!("Player {} played", game.to_move.opponent().number());
        if let Err(err) = display(game.board(), palette) {
            println!("Failed to draw board: {}", err);
        }
    })?;

    match state {
        GameState::PlayerOneWin => println!("Player 1 wins!"),
        GameState::PlayerTwoWin => println!("Player 2 wins!"),
        GameState::Draw => println!("Draw!"),
        GameState::Playing => return Err(anyhow!("game stopped before it was over")),
    }
    println!("Moves: {}", game.moves);
    Ok(())
}

fn arena(config: &AppConfig, one: PlayerKind, two: PlayerKind, games: u64) -> Result<()> {
    if one == PlayerKind::Human || two == PlayerKind::Human {
        return Err(anyhow!("the arena only runs computer players"));
    }

    let progress = ProgressBar::new(games);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    // every game gets its own players so the seeds and searches stay independent
    let results = (0..games)
        .into_par_iter()
        .map_with(progress.clone(), |progress, i| {
            let seed = config.seed.wrapping_add(2 * i);
            let mut player_one = build_player(one, Piece::PlayerOne, config, seed)?;
            let mut player_two =
                build_player(two, Piece::PlayerTwo, config, seed.wrapping_add(1))?;
            let state = Game::new().run(player_one.as_mut(), player_two.as_mut(), |_| {})?;
            progress.inc(1);
            Ok(state)
        })
        .collect::<Result<Vec<GameState>>>()?;
    progress.finish();

    let count = |wanted: GameState| results.iter().filter(|&&s| s == wanted).count();
    println!("{} games played", results.len());
    println!("Player 1 ({:?}) wins: {}", one, count(GameState::PlayerOneWin));
    println!("Player 2 ({:?}) wins: {}", two, count(GameState::PlayerTwoWin));
    println!("Draws: {}", count(GameState::Draw));
    Ok(())
}

fn analyse(config: &AppConfig, moves: &str) -> Result<()> {
    let board = Board::from_moves(moves)?;
    let side = board.side_to_move();
    println!("{}\n", board);
    println!("Player {} to move, depth {}", side.number(), config.depth);

    for strategy in [Strategy::Minimax, Strategy::AlphaBeta].iter().copied() {
        let engine = Engine::new(config.engine_config(side).with_strategy(strategy))?;
        let report = engine.search(&board)?;
        match report.score {
            Some(score) => println!(
                "{:>9}: column {} score {} ({} nodes)",
                strategy, report.column, score, report.nodes
            ),
            None => println!("{:>9}: column {} (opening move)", strategy, report.column),
        }
    }
    Ok(())
}
