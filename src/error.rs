use crate::Coords;

use crossterm::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[from] ErrorKind),
    #[error("the terminal is {actual:?} but the board needs at least {needed:?}")]
    TerminalTooSmall { needed: Coords, actual: Coords },
}

pub type AppResult<T = ()> = Result<T, AppError>;
