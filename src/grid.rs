use std::fmt;

/// Number of cells along each side of the square playing field.
pub const GRID_SIZE: i16 = 20;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset of one step, with y growing upwards.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn is_perpendicular_to(self, other: Direction) -> bool {
        self.is_vertical() != other.is_vertical()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Cell { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Direction::*;

    #[test]
    fn steps_one_unit() {
        let c = Cell::new(5, 5);
        assert_eq!(c.step(Up), Cell::new(5, 6));
        assert_eq!(c.step(Down), Cell::new(5, 4));
        assert_eq!(c.step(Left), Cell::new(4, 5));
        assert_eq!(c.step(Right), Cell::new(6, 5));
    }

    #[test]
    fn perpendicular_turns() {
        assert!(Up.is_perpendicular_to(Left));
        assert!(Right.is_perpendicular_to(Down));
        assert!(!Up.is_perpendicular_to(Down));
        assert!(!Left.is_perpendicular_to(Left));
    }

    #[test]
    fn bounds() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(19, 19).in_bounds());
        assert!(!Cell::new(20, 3).in_bounds());
        assert!(!Cell::new(3, -1).in_bounds());
    }
}
