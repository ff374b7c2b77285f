use grid_snake::{config::Options, error::AppResult, game::SnakeGame};
use structopt::StructOpt;

fn main() -> AppResult {
    // Logs go to stderr; redirect it to keep them off the board
    env_logger::init();
    let options = Options::from_args();

    let mut game = SnakeGame::new(options)?;
    game.play()
}
