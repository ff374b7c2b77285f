use crate::grid::{Cell, Color, GRID_SIZE};

use rand::Rng;

pub const START_CELL: Cell = Cell::new(5, 16);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Food {
    cell: Cell,
}

impl Default for Food {
    fn default() -> Self {
        Food::at(START_CELL)
    }
}

impl Food {
    pub fn at(cell: Cell) -> Self {
        Food { cell }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn color(&self) -> Color {
        Color::RED
    }

    /// Moves to a uniformly random cell. The snake's body is not taken into
    /// account, so the food may land on it.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Cell {
        self.cell = Cell::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));
        self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn starts_at_fixed_cell() {
        assert_eq!(Food::default().cell(), Cell::new(5, 16));
    }

    #[test]
    fn relocation_stays_on_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::default();
        for _ in 0..1000 {
            let cell = food.relocate(&mut rng);
            assert!(cell.in_bounds(), "{} is off the grid", cell);
            assert_eq!(food.cell(), cell);
        }
    }

    #[test]
    fn relocation_covers_the_whole_grid() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut food = Food::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..20_000 {
            seen.insert(food.relocate(&mut rng));
        }
        // Every cell is reachable, snake or not
        assert_eq!(seen.len(), (GRID_SIZE * GRID_SIZE) as usize);
    }
}
