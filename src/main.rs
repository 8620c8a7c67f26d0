mod config;
mod display;
mod post;
mod sketches;
mod util;

use config::Config;
use display::{Display, InputEvent, PixelCanvas, RenderTarget};
use sdl2::keyboard::Keycode;
use sketches::{HospitalDream, Reborn, Sketch};
use util::FpsCounter;

const CONFIG_PATH: &str = "config.json";

/// Apply command line overrides on top of the loaded config
fn parse_args(mut config: Config) -> Config {
    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => config.vsync = false,
            "--no-vignette" => config.vignette = false,
            "--no-grain" => config.grain_strength = 0,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        config.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        config.height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 800x800)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            config.width = w;
                            config.height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: reborn [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --width W, -w W           Set window width");
                println!("  --height H, -h H          Set window height");
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 800x800)");
                println!("  --no-vsync                Disable VSync for uncapped framerate");
                println!("  --no-vignette             Disable the vignette pass");
                println!("  --no-grain                Disable the film grain pass");
                println!("  --help                    Show this help message");
                println!();
                println!("Settings are also read from {} if present.", CONFIG_PATH);
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    config
}

fn main() -> Result<(), String> {
    let config = parse_args(Config::load(CONFIG_PATH).unwrap_or_default());

    let (mut display, texture_creator) =
        Display::with_options("reborn", config.width, config.height, config.vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)?;
    let mut canvas = PixelCanvas::new(config.width, config.height).map_err(|e| e.to_string())?;

    // FPS counter with 60 sample rolling average
    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = false;

    let mut sketches: Vec<Box<dyn Sketch>> = vec![
        Box::new(Reborn::new()),        // 1
        Box::new(HospitalDream::new()), // 2
    ];
    let mut current: usize = 0;
    let mut frame: u64 = 0;

    println!("=== reborn ===");
    println!("Resolution: {}x{}", config.width, config.height);
    if config.vsync {
        println!("VSync: ON (60fps locked). Use --no-vsync for uncapped.");
    } else {
        println!("VSync: OFF (uncapped framerate)");
    }
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  1          - What If I Reborned");
    println!("  2          - Hospital Dream");
    println!("  Left/Right - Cycle sketches");
    println!("  F          - Toggle FPS logging");
    println!("  Escape     - Quit");

    'main: loop {
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(key) => match key {
                    Keycode::Escape => break 'main,
                    Keycode::Num1 => current = 0,
                    Keycode::Num2 => current = 1,
                    Keycode::Left => current = (current + sketches.len() - 1) % sketches.len(),
                    Keycode::Right => current = (current + 1) % sketches.len(),
                    Keycode::F => show_fps = !show_fps,
                    _ => {},
                },
                _ => {},
            }
        }

        let sketch = &mut sketches[current];
        sketch.update(dt);
        sketch.render(&mut canvas);

        // polish passes, after all shape drawing
        if config.vignette {
            post::vignette(&mut canvas);
        }
        if sketch.wants_grain() && config.grain_strength > 0 {
            post::film_grain(&mut canvas, frame, config.grain_strength);
        }

        if show_fps && frame % 60 == 0 {
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            println!(
                "[{}] FPS {:.0} avg  {:.0} min  {:.0} max  {:.1}ms",
                sketch.name(),
                avg_fps,
                min_fps,
                max_fps,
                fps_counter.avg_frame_time_ms()
            );
        }

        frame += 1;
        display.present(&mut target, &canvas)?;
    }

    Ok(())
}
