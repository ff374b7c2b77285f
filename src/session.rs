use crate::food::Food;
use crate::grid::Direction;
use crate::snake::{Snake, SnakeError};

use log::{debug, error, info};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    Playing,
    Crashed,
}

/// What a single tick did to the world.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The game is over, nothing moved
    Idle,
    Moved,
    Ate { score: u32 },
    Crashed { score: u32 },
}

/// One game: a snake, its food and the score.
pub struct Session {
    snake: Snake,
    food: Food,
    score: u32,
    state: State,
    rng: StdRng,
}

impl Session {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        info!(target: "snake", "starting a new game");
        Session { snake: Snake::new(), food: Food::default(), score: 0, state: State::Playing, rng }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == State::Playing
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    /// Forwards a turn to the snake. Returns whether it was taken.
    pub fn handle_direction(&mut self, direction: Direction) -> bool {
        self.is_alive() && self.snake.set_direction(direction)
    }

    pub fn restart(&mut self) {
        info!(target: "snake", "restarting, previous score {}", self.score);
        self.snake = Snake::new();
        self.food = Food::default();
        self.score = 0;
        self.state = State::Playing;
    }

    /// Advances the world by one step.
    ///
    /// # Panics
    ///
    /// If the snake's body has been corrupted. That can only follow from a
    /// bug in this crate, never from player input.
    pub fn tick(&mut self) -> Tick {
        match self.step() {
            Ok(tick) => tick,
            Err(e) => {
                error!(target: "snake", "snake body invariant broken: {}", e);
                panic!("snake body invariant broken: {}", e);
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn step(&mut self) -> Result<Tick, SnakeError> {
        if self.state == State::Crashed {
            return Ok(Tick::Idle);
        }

        self.snake.move_step()?;
        let mut tick = Tick::Moved;

        if self.snake.has_found_food(&self.food) {
            self.snake.grow()?;
            let cell = self.food.relocate(&mut self.rng);
            self.score += 1;
            debug!(target: "snake", "ate food, score {}, next food at {}", self.score, cell);
            tick = Tick::Ate { score: self.score };
        }

        if self.snake.has_crashed() {
            self.snake.halt();
            self.state = State::Crashed;
            info!(target: "snake", "crashed at {} with score {}", self.snake.head()?, self.score);
            tick = Tick::Crashed { score: self.score };
        }

        Ok(tick)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Direction::*, GRID_SIZE};

    #[test]
    fn starts_playing_with_zero_score() {
        let session = Session::with_seed(1);
        assert_eq!(session.state(), State::Playing);
        assert!(session.is_alive());
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().len(), 3);
        assert_eq!(session.food().cell(), Cell::new(5, 16));
    }

    #[test]
    fn tick_moves_the_snake() {
        let mut session = Session::with_seed(1);
        assert_eq!(session.tick(), Tick::Moved);
        assert_eq!(session.snake().head(), Ok(Cell::new(12, 9)));
        assert_eq!(session.snake().len(), 3);
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut session = Session::with_seed(3);
        session.food = Food::at(Cell::new(12, 9));

        assert_eq!(session.tick(), Tick::Ate { score: 1 });
        assert_eq!(session.score(), 1);
        assert_eq!(session.snake().len(), 4);
        assert!(session.food().cell().in_bounds());
    }

    #[test]
    fn running_into_the_top_wall_ends_the_game() {
        let mut session = Session::with_seed(1);
        // Head starts at y = 8 heading up; y = 20 is past the wall
        let mut ticks = 0;
        while session.is_alive() {
            let tick = session.tick();
            ticks += 1;
            if tick == (Tick::Crashed { score: 0 }) {
                break;
            }
            assert_eq!(tick, Tick::Moved);
        }

        assert_eq!(ticks, (GRID_SIZE - 8) as usize);
        assert_eq!(session.state(), State::Crashed);
        assert_eq!(session.snake().direction(), None);
    }

    #[test]
    fn crashed_session_ignores_ticks_and_turns() {
        let mut session = Session::with_seed(1);
        while session.is_alive() {
            session.tick();
        }
        let cells: Vec<Cell> = session.snake().cells().collect();

        assert_eq!(session.tick(), Tick::Idle);
        assert!(!session.handle_direction(Left));
        assert_eq!(session.snake().cells().collect::<Vec<_>>(), cells);
    }

    #[test]
    fn turning_back_into_itself_is_ignored() {
        let mut session = Session::with_seed(1);
        assert!(!session.handle_direction(Down));
        assert!(session.handle_direction(Left));
        // Last accepted command wins before the next move
        assert!(session.handle_direction(Up));
        session.tick();
        assert_eq!(session.snake().head(), Ok(Cell::new(12, 9)));
    }

    #[test]
    fn self_collision_ends_the_game() {
        let mut session = Session::with_seed(1);
        session.snake = Snake::with_cells(
            &[Cell::new(5, 5), Cell::new(5, 4), Cell::new(6, 4), Cell::new(6, 5), Cell::new(6, 6)],
            Up,
        );
        session.handle_direction(Right);

        assert_eq!(session.tick(), Tick::Crashed { score: 0 });
        assert!(!session.is_alive());
    }

    #[test]
    fn restart_resets_everything() {
        let mut session = Session::with_seed(9);
        session.food = Food::at(Cell::new(12, 9));
        session.tick();
        while session.is_alive() {
            session.tick();
        }

        session.restart();
        assert_eq!(session.state(), State::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().len(), 3);
        assert_eq!(session.snake().direction(), Some(Up));
        assert_eq!(session.food().cell(), Cell::new(5, 16));
    }

    #[test]
    fn food_may_respawn_on_the_body() {
        // Relocation is blind to the snake: collect spawns until one lands on it
        let mut session = Session::with_seed(11);
        let body: Vec<Cell> = session.snake().cells().collect();
        let mut rng = StdRng::seed_from_u64(5);
        let mut food = Food::default();

        let overlapped = (0..10_000).any(|_| body.contains(&food.relocate(&mut rng)));
        assert!(overlapped);
        session.food = food;
        assert!(session.food().cell().in_bounds());
    }
}
