use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(name = "grid_snake", about = "Snake on a 20x20 grid, in the terminal")]
pub struct Options {
    /// Milliseconds slept between two input polls
    #[structopt(long = "tick-ms", default_value = "5")]
    pub tick_ms: u64,

    /// Input polls per world update
    #[structopt(long = "ticks-per-step", default_value = "20")]
    pub ticks_per_step: u64,

    /// Seed for food placement
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options { tick_ms: 5, ticks_per_step: 20, seed: None }
    }
}
