mod best_move;
mod config;
mod play;
mod self_play;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{Mark, SearchMode};
use tictactoe_common::{log, logger};

use best_move::{parse_mark, run_best_move};
use config::get_config_manager;
use play::run_play;
use self_play::run_self_play;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a perfect minimax opponent")]
struct Args {
    #[arg(long, global = true)]
    use_log_prefix: bool,

    /// YAML config file; defaults to tictactoe_config.yaml next to the binary
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively on stdin/stdout
    Play,
    /// Let the configured bot play both sides
    SelfPlay {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the best move for a position such as "XX.OO...."
    BestMove {
        #[arg(long)]
        board: String,
        #[arg(long, value_parser = parse_mark)]
        mark: Option<Mark>,
        #[arg(long)]
        alpha_beta: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("CLI".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = get_config_manager(args.config.as_deref()).get_config()?;
    log!("Loaded config: {:?}", config);

    let stdout = io::stdout();
    let mut output = stdout.lock();

    match args.command {
        Command::Play => {
            let mut rng = SessionRng::from_random();
            let outcomes = run_play(&config.game, &mut rng, io::stdin().lock(), &mut output)?;
            log!("Finished {} game(s)", outcomes.len());
        }
        Command::SelfPlay { seed } => {
            let mut rng = match seed {
                Some(seed) => SessionRng::new(seed),
                None => SessionRng::from_random(),
            };
            run_self_play(config.game.bot_type, &mut rng, &mut output)?;
        }
        Command::BestMove {
            board,
            mark,
            alpha_beta,
        } => {
            let mode = if alpha_beta {
                SearchMode::AlphaBeta
            } else {
                SearchMode::Exhaustive
            };
            run_best_move(&board, mark, mode, &mut output)?;
        }
    }

    Ok(())
}
