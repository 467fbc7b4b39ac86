use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use chip8_core::CLOCK_SPEED;

mod keymap;
mod run;

/// Runs a Chip-8 program in an SDL2 window.
///
/// Space fast-forwards while held; set RUST_LOG=trace to log every instruction.
#[derive(Parser, Debug)]
#[command(name = "chip8", version)]
pub struct Config {
    /// Path to the ROM to run
    pub rom: PathBuf,

    /// Size of each Chip-8 pixel in screen pixels
    #[arg(short, long, default_value_t = 10)]
    pub scale: u32,

    /// Cycles per second
    #[arg(short, long, default_value_t = 1_000_000_000 / CLOCK_SPEED)]
    pub clock_speed: u64,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let config = Config::parse();

    match run::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("chip8: {}", e);
            ExitCode::FAILURE
        }
    }
}
