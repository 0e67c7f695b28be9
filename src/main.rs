use std::io::stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::thread_rng;

mod engine;
mod error;
mod leaderboard;
mod store;
mod tui;

use engine::session::{GameStatus, Session};
use leaderboard::Leaderboard;
use tui::{next_input, Screen, UserInput};

#[derive(Parser)]
#[command(about = "the 2048 tile game, in your terminal")]
struct Cli {
    /// Where the in-progress game is saved between runs.
    #[arg(long, default_value = "term48-save.json")]
    save_file: PathBuf,

    /// Where the leaderboard lives.
    #[arg(long, default_value = "term48-leaders.json")]
    leaderboard_file: PathBuf,

    /// Name recorded on the leaderboard when a game ends.
    #[arg(long, default_value = "anonymous")]
    player: String,

    /// Ignore any saved game and start fresh.
    #[arg(long)]
    fresh: bool,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // the terminal belongs to the game screen, so logs go to a file
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(cli.verbose.log_level_filter())
        .chain(fern::log_file("./term48.log")?)
        .apply()?;

    let rng = thread_rng();
    let mut session = if cli.fresh {
        Session::new(rng)
    } else {
        match store::load(&cli.save_file) {
            Some((grid, score)) => {
                log::info!("resuming saved game at score {}", score);
                Session::resume(grid, score, rng)
            }
            None => Session::new(rng),
        }
    };
    let mut leaderboard = Leaderboard::load(&cli.leaderboard_file);

    let w = stdout().lock();
    let mut screen = Screen::new(Box::new(w))?;

    loop {
        screen.draw(&session, &leaderboard)?;
        match next_input()? {
            UserInput::Direction(direction) => {
                let was_playing = session.status() == GameStatus::Playing;
                if session.apply(direction).is_none() {
                    continue;
                }
                store::save(&cli.save_file, session.grid(), session.score())?;
                if was_playing && session.status() == GameStatus::Over {
                    log::info!("game over at score {}", session.score());
                    leaderboard.record(&cli.player, session.score());
                    leaderboard.save(&cli.leaderboard_file)?;
                }
            }
            UserInput::Undo => {
                if session.undo() {
                    store::save(&cli.save_file, session.grid(), session.score())?;
                }
            }
            UserInput::NewGame => {
                session.new_game();
                store::save(&cli.save_file, session.grid(), session.score())?;
            }
            UserInput::Quit => break,
        }
    }

    Ok(())
}
