use clap::Parser;

/// An animated ASCII Christmas tree with falling, drifting snow. Press Ctrl-C to quit.
#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub struct Cli {
    /// Canvas width in columns
    #[arg(short = 'W', long, value_name = "COLUMNS")]
    pub width: Option<u16>,

    /// Canvas height in rows, including the ground and hint rows
    #[arg(short = 'H', long, value_name = "ROWS")]
    pub height: Option<u16>,

    /// Seed for the tree layout and the snowfall
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Upper bound on live snowflakes [default: twice the width]
    #[arg(short, long, value_name = "COUNT")]
    pub max_particles: Option<usize>,

    /// Delay between frames in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub frame_interval: Option<u64>,
}
