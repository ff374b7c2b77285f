use std::{thread::sleep, time::Duration};

use crate::config::Options;
use crate::error::{AppError, AppResult};
use crate::grid::{self, Cell, Direction::{self, *}, GRID_SIZE};
use crate::session::{Session, Tick};
use crate::term::TermManager;
use crate::{Coords, TermInt};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use log::info;

/// Terminal columns per grid cell, so cells come out roughly square
const CELL_WIDTH: TermInt = 2;
const BOARD_SIZE: Coords = (GRID_SIZE as TermInt * CELL_WIDTH + 2, GRID_SIZE as TermInt + 2);

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Pause,
    Quit,
}

pub struct SnakeGame {
    options: Options,
    origin: Coords,
    paused: bool,
    term: TermManager,
    session: Session,
}

impl SnakeGame {
    pub fn new(options: Options) -> AppResult<Self> {
        let session = match options.seed {
            Some(seed) => Session::with_seed(seed),
            None => Session::new(),
        };

        Ok(SnakeGame { options, origin: (0, 0), paused: false, term: TermManager::new()?, session })
    }

    /// Runs until the player quits. The terminal is restored even when the
    /// game fails.
    pub fn play(&mut self) -> AppResult {
        let (w, h) = self.term.get_terminal_size();
        if w < BOARD_SIZE.0 || h < BOARD_SIZE.1 {
            return Err(AppError::TerminalTooSmall { needed: BOARD_SIZE, actual: (w, h) });
        }
        self.origin = ((w - BOARD_SIZE.0) / 2, (h - BOARD_SIZE.1) / 2);

        with_restore(
            self,
            |game| Ok(game.term.setup()?),
            SnakeGame::run,
            |game| Ok(game.term.restore()?),
        )
    }

    ///////////////////////////////////////////////////////////////////////////

    fn run(&mut self) -> AppResult {
        self.term.clear()?;
        self.draw_board()?;
        if !self.show_intro()? {
            return Ok(());
        }

        let mut ticks_until_step = self.options.ticks_per_step;

        loop {
            sleep(Duration::from_millis(self.options.tick_ms));

            for key_ev in self.term.read_key_events_queue()? {
                match command(&key_ev) {
                    Some(Command::Quit) => {
                        info!(target: "snake", "quitting with score {}", self.session.score());
                        return Ok(());
                    }
                    Some(Command::Restart) => {
                        self.session.restart();
                        self.paused = false;
                        ticks_until_step = self.options.ticks_per_step;
                        self.term.hide_message()?;
                        self.draw_board()?;
                    }
                    Some(Command::Pause) if self.session.is_alive() => self.toggle_pause()?,
                    Some(Command::Turn(dir)) if !self.paused => {
                        self.session.handle_direction(dir);
                    }
                    _ => {}
                }
            }

            if self.paused || !self.session.is_alive() {
                continue;
            }

            // Count down til the next world update
            ticks_until_step = ticks_until_step.saturating_sub(1);
            if ticks_until_step > 0 {
                continue;
            }
            ticks_until_step = self.options.ticks_per_step;

            match self.session.tick() {
                Tick::Crashed { score } => {
                    self.draw_board()?;
                    self.game_over(score)?;
                }
                Tick::Moved | Tick::Ate { .. } => self.draw_board()?,
                Tick::Idle => {}
            }
        }
    }

    fn show_intro(&mut self) -> AppResult<bool> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause, R to restart",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;
        Ok(command(&key) != Some(Command::Quit))
    }

    fn game_over(&mut self, score: u32) -> AppResult {
        self.term.show_message(&[
            "GAME OVER",
            &*format!("Score: {}", score),
            "",
            "Press R to play again,",
            "or Q to quit.",
        ])?;
        Ok(())
    }

    fn toggle_pause(&mut self) -> AppResult {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }

    fn draw_board(&mut self) -> AppResult {
        let origin = self.origin;
        self.term.draw_borders_at(origin, BOARD_SIZE)?;

        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                self.print_cell(Cell::new(x, y), ' ', None)?;
            }
        }

        let food = *self.session.food();
        self.print_cell(food.cell(), APPLE_CHAR, Some(to_term_color(food.color())))?;

        let alive = self.session.is_alive();
        let head_char = self.session.snake().head_char();
        let segments: Vec<_> = self.session.snake().segments().copied().collect();
        // Back to front so the head is drawn over anything it overlaps
        for (i, seg) in segments.iter().enumerate().rev() {
            let ch = match (alive, i) {
                (false, _) => DEAD_SNAKE_CHAR,
                (true, 0) => head_char,
                _ => SNAKE_BODY_CHAR,
            };
            self.print_cell(seg.cell, ch, Some(to_term_color(seg.color)))?;
        }

        let score = format!(" Score: {} ", self.session.score());
        self.term.print_str_at((origin.0 + 2, origin.1), &score)?;
        self.term.flush()?;
        Ok(())
    }

    /// Cells outside the grid, such as a head that just went through a
    /// wall, are not drawn
    fn print_cell(&mut self, cell: Cell, ch: char, color: Option<Color>) -> AppResult {
        if let Some((col, row)) = screen_pos(self.origin, cell) {
            self.term.print_at((col, row), ch, color)?;
            self.term.print_at((col + 1, row), ch, color)?;
        }
        Ok(())
    }
}

/// Runs `body` after `setup`, then `restore` no matter how either of them
/// ended. An error from setup or body wins over one from restore.
fn with_restore<S>(
    state: &mut S,
    setup: impl FnOnce(&mut S) -> AppResult,
    body: impl FnOnce(&mut S) -> AppResult,
    restore: impl FnOnce(&mut S) -> AppResult,
) -> AppResult {
    let res = setup(state).and_then(|_| body(state));
    let restored = restore(state);
    res.and(restored)
}

/// Terminal position of the left half of `cell`; rows grow downwards while
/// grid y grows upwards.
fn screen_pos(origin: Coords, cell: Cell) -> Option<Coords> {
    if !cell.in_bounds() {
        return None;
    }
    let col = origin.0 + 1 + cell.x as TermInt * CELL_WIDTH;
    let row = origin.1 + 1 + (GRID_SIZE - 1 - cell.y) as TermInt;
    Some((col, row))
}

fn to_term_color(c: grid::Color) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

pub fn command(ev: &KeyEvent) -> Option<Command> {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL } => Some(Command::Quit),
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
            KeyCode::Char('r') => Some(Command::Restart),
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Esc => Some(Command::Pause),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn maps_keys_to_commands() {
        assert_eq!(command(&key(KeyCode::Char('w'))), Some(Command::Turn(Up)));
        assert_eq!(command(&key(KeyCode::Left)), Some(Command::Turn(Left)));
        assert_eq!(command(&key(KeyCode::Char('s'))), Some(Command::Turn(Down)));
        assert_eq!(command(&key(KeyCode::Right)), Some(Command::Turn(Right)));
        assert_eq!(command(&key(KeyCode::Char('r'))), Some(Command::Restart));
        assert_eq!(command(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(command(&key(KeyCode::Esc)), Some(Command::Pause));
        assert_eq!(command(&key(KeyCode::Char('x'))), None);

        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(command(&ctrl_c), Some(Command::Quit));
    }

    fn too_small() -> AppError {
        AppError::TerminalTooSmall { needed: (1, 1), actual: (0, 0) }
    }

    fn is_too_small(res: &AppResult, needed: Coords) -> bool {
        matches!(res, Err(AppError::TerminalTooSmall { needed: n, .. }) if *n == needed)
    }

    #[test]
    fn restores_after_failed_setup() {
        let mut steps = vec![];
        let res = with_restore(
            &mut steps,
            |s| {
                s.push("setup");
                Err(too_small())
            },
            |s| {
                s.push("body");
                Ok(())
            },
            |s| {
                s.push("restore");
                Ok(())
            },
        );

        assert!(is_too_small(&res, (1, 1)));
        assert_eq!(steps, vec!["setup", "restore"]);
    }

    #[test]
    fn body_error_wins_over_restore_error() {
        let mut steps = vec![];
        let res = with_restore(
            &mut steps,
            |s| {
                s.push("setup");
                Ok(())
            },
            |s| {
                s.push("body");
                Err(too_small())
            },
            |s| {
                s.push("restore");
                Err(AppError::TerminalTooSmall { needed: (2, 2), actual: (0, 0) })
            },
        );

        assert!(is_too_small(&res, (1, 1)));
        assert_eq!(steps, vec!["setup", "body", "restore"]);
    }

    #[test]
    fn restore_error_surfaces_after_clean_run() {
        let mut steps: Vec<&str> = vec![];
        let res = with_restore(
            &mut steps,
            |_| Ok(()),
            |_| Ok(()),
            |_| Err(AppError::TerminalTooSmall { needed: (2, 2), actual: (0, 0) }),
        );

        assert!(is_too_small(&res, (2, 2)));
    }

    #[test]
    fn grid_is_flipped_onto_rows() {
        assert_eq!(screen_pos((0, 0), Cell::new(0, 0)), Some((1, 20)));
        assert_eq!(screen_pos((0, 0), Cell::new(19, 19)), Some((39, 1)));
        assert_eq!(screen_pos((3, 2), Cell::new(1, 18)), Some((6, 4)));
        assert_eq!(screen_pos((0, 0), Cell::new(20, 5)), None);
    }
}
