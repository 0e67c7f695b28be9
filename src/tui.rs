use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent},
    style, terminal, ExecutableCommand, QueueableCommand,
};

use crate::engine::grid::Direction;
use crate::engine::session::{GameStatus, Session};
use crate::error::Result;
use crate::leaderboard::Leaderboard;

/// UserInput is the full set of key presses that reach the game session.
/// Everything else bounces off the event loop.
pub(crate) enum UserInput {
    Direction(Direction),
    Undo,
    NewGame,
    Quit,
}

/// Block until the player presses a key the game cares about.
pub(crate) fn next_input() -> Result<UserInput> {
    loop {
        match event::read()? {
            CrosstermEvent::Key(ke) => match handle_key_event(ke) {
                Some(input) => return Ok(input),
                None => continue,
            },
            _ => continue,
        };
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    match ke {
        KeyEvent { code, .. } => match code {
            KeyCode::Left | KeyCode::Char('h') => Some(UserInput::Direction(Direction::Left)),
            KeyCode::Right | KeyCode::Char('l') => Some(UserInput::Direction(Direction::Right)),
            KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Direction(Direction::Up)),
            KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Direction(Direction::Down)),
            KeyCode::Char('u') => Some(UserInput::Undo),
            KeyCode::Char('n') => Some(UserInput::NewGame),
            KeyCode::Char('q') | KeyCode::Esc => Some(UserInput::Quit),
            _ => None,
        },
    }
}

/// Screen owns the terminal for the lifetime of the game: raw mode plus the
/// alternate screen on entry, both restored on drop. Rendering is a plain
/// full redraw of the committed session state; there is no animation layer.
pub(crate) struct Screen<T: Write> {
    w: Box<T>,
}

impl<T: Write> Screen<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w })
    }

    pub(crate) fn draw(&mut self, session: &Session, leaderboard: &Leaderboard) -> Result<()> {
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;

        let best = leaderboard.best().unwrap_or(0).max(session.score());
        self.put(
            0,
            &format!("term48    score {:>6}    best {:>6}", session.score(), best),
        )?;

        let mut line = 2;
        for row in session.grid().rows() {
            let cells = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>6}", ".")
                    } else {
                        format!("{:>6}", v)
                    }
                })
                .collect::<Vec<String>>()
                .join("  ");
            self.put(line, &cells)?;
            line += 2;
        }

        match session.status() {
            GameStatus::Over => {
                self.put(line, &format!("game over at {} points", session.score()))?;
                self.put(line + 1, "n: new game  q: quit")?;
                let mut row = line + 3;
                for (rank, entry) in leaderboard.entries().iter().enumerate() {
                    self.put(
                        row,
                        &format!(
                            "{:>2}. {:<16} {:>6}  {}",
                            rank + 1,
                            entry.name,
                            entry.score,
                            entry.date
                        ),
                    )?;
                    row += 1;
                }
            }
            GameStatus::Playing => {
                self.put(line + 1, "arrows/hjkl: move  u: undo  n: new game  q: quit")?;
            }
        }

        self.w.flush()?;
        Ok(())
    }

    fn put(&mut self, line: u16, text: &str) -> Result<()> {
        self.w.queue(cursor::MoveTo(0, line))?;
        self.w.queue(style::Print(text.to_string()))?;
        Ok(())
    }
}

impl<T: Write> Drop for Screen<T> {
    fn drop(&mut self) {
        self.w.execute(cursor::Show).expect("showing cursor");
        self.w
            .execute(terminal::LeaveAlternateScreen)
            .expect("leaving alternate screen");
        terminal::disable_raw_mode().expect("disabling raw mode");
    }
}
