use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use thiserror::Error;

use chip8_core::{Chip8, Fault, LoadError};
use chip8_display::{Display, DisplayError};

use crate::keymap::keymap;
use crate::Config;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("unable to open ROM {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("machine halted: {0}")]
    Fault(#[from] Fault),
}

/// The wall-clock time one cycle should take at `clock_speed` cycles per second.
fn cycle_time(clock_speed: u64) -> Duration {
    Duration::from_nanos(1_000_000_000 / clock_speed.max(1))
}

pub fn run(config: &Config) -> Result<(), RunError> {
    let mut chip8 = match config.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Get SDL2 context
    let sdl = sdl2::init().map_err(RunError::Sdl)?;
    let mut display = Display::new(&sdl, config.scale)?;
    let mut events = sdl.event_pump().map_err(RunError::Sdl)?;

    // Load ROM
    let file = File::open(&config.rom).map_err(|source| RunError::Open {
        path: config.rom.clone(),
        source,
    })?;
    chip8.load_rom_from(&mut BufReader::new(file))?;

    // Set initial timing
    let cycle_time = cycle_time(config.clock_speed);
    let mut last_cycle = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;
    // Whether the sound timer was running last cycle
    let mut sounding = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                // key up events are lost while unfocused
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => chip8.release_all(),
                _ => continue,
            };
        }

        // Update state
        chip8.cycle()?;

        // If the draw flag is set, render the current frame
        if let Some(frame) = chip8.get_frame() {
            display.render(frame)?;
        }

        // There is no speaker; just report when a tone would start and stop
        if chip8.sound_active() != sounding {
            sounding = !sounding;
            log::debug!("tone {}", if sounding { "on" } else { "off" });
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    log::info!("quit");
    Ok(())
}
