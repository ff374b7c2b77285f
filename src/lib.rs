//! Snake on a fixed 20x20 grid.
//!
//! The body is kept in a sentinel bounded doubly linked [`sequence::Sequence`];
//! [`session::Session`] drives one game tick by tick, and [`game::SnakeGame`]
//! puts it on a terminal.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod sequence;
pub mod session;
pub mod snake;
pub mod term;

pub type TermInt = u16;
pub type Coords = (u16, u16);
