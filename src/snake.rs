use crate::food::Food;
use crate::grid::{Cell, Color, Direction::{self, *}, GRID_SIZE};
use crate::sequence::{Sequence, SequenceError};

use log::trace;
use thiserror::Error;
use Heading::*;

const START_CELLS: [Cell; 3] = [Cell::new(12, 8), Cell::new(12, 7), Cell::new(12, 6)];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SnakeError {
    #[error("the snake has stopped and can no longer move")]
    Halted,
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Heading {
    Moving(Direction),
    /// Terminal state entered after a crash
    Stopped,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Segment {
    pub cell: Cell,
    pub color: Color,
}

impl Segment {
    pub fn new(cell: Cell) -> Self {
        Segment { cell, color: Color::GREEN }
    }
}

/// The snake's body, head first.
#[derive(Debug)]
pub struct Snake {
    body: Sequence<Segment>,
    heading: Heading,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Snake {
    /// Three vertical cells in the lower right quarter, heading up.
    pub fn new() -> Self {
        let mut body = Sequence::new();
        for cell in START_CELLS.iter() {
            body.insert_back(Segment::new(*cell));
        }
        Snake { body, heading: Moving(Up) }
    }

    /// Builds a snake from explicit cells, head first.
    pub fn with_cells(cells: &[Cell], direction: Direction) -> Self {
        let mut body = Sequence::new();
        for cell in cells {
            body.insert_back(Segment::new(*cell));
        }
        Snake { body, heading: Moving(direction) }
    }

    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Segment> + '_ {
        self.body.iter()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().map(|s| s.cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Result<Cell, SnakeError> {
        Ok(self.body.first()?.cell)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.heading {
            Moving(dir) => Some(dir),
            Stopped => None,
        }
    }

    /// Applies a turn if it is perpendicular to the current direction.
    /// Reversals, repeats and turns after stopping are ignored.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        match self.heading {
            Moving(current) if current.is_perpendicular_to(new_direction) => {
                self.heading = Moving(new_direction);
                true
            }
            _ => {
                trace!(target: "snake", "ignored turn {:?} while {:?}", new_direction, self.heading);
                false
            }
        }
    }

    pub fn halt(&mut self) {
        self.heading = Stopped;
    }

    pub fn move_step(&mut self) -> Result<(), SnakeError> {
        let direction = self.direction().ok_or(SnakeError::Halted)?;
        let old_head = self.body.first()?;
        let new_head = old_head.cell.step(direction);

        let color = old_head.color;
        self.body.insert_front(Segment { cell: new_head, color });
        self.body.remove_back()?;
        Ok(())
    }

    /// Extends the tail by one cell along the direction the last two cells
    /// are travelling in. Two tail cells on the same spot give no direction
    /// and are rejected.
    pub fn grow(&mut self) -> Result<(), SnakeError> {
        let mut from_back = self.body.iter().rev();
        let (last, before_last) = match (from_back.next(), from_back.next()) {
            (Some(last), Some(before_last)) => (*last, *before_last),
            _ => return Err(SequenceError::IndexOutOfRange { index: 1, size: self.body.len() }.into()),
        };

        let change_x = before_last.cell.x - last.cell.x;
        let change_y = before_last.cell.y - last.cell.y;

        let extend = if change_y > 0 {
            Down
        } else if change_y < 0 {
            Up
        } else if change_x > 0 {
            Left
        } else if change_x < 0 {
            Right
        } else {
            return Err(SequenceError::InvalidLink.into());
        };

        let cell = last.cell.step(extend);
        self.body.insert_back(Segment { cell, color: last.color });
        Ok(())
    }

    pub fn has_found_food(&self, food: &Food) -> bool {
        self.body.first().map(|s| s.cell == food.cell()).unwrap_or(false)
    }

    /// A wall only counts when the head is moving into it.
    pub fn has_crashed(&self) -> bool {
        let head = match self.body.first() {
            Ok(segment) => segment.cell,
            Err(_) => return false,
        };

        let hit_wall = match self.heading {
            Moving(Left) => head.x < 0,
            Moving(Right) => head.x >= GRID_SIZE,
            Moving(Down) => head.y < 0,
            Moving(Up) => head.y >= GRID_SIZE,
            Stopped => false,
        };

        hit_wall || self.cells().skip(1).any(|c| c == head)
    }

    /// Glyph for the head, pointing where the snake is going
    pub fn head_char(&self) -> char {
        match self.heading {
            Moving(Up) => '^',
            Moving(Down) => 'v',
            Moving(Left) => '<',
            Moving(Right) => '>',
            Stopped => 'X',
        }
    }
}
