mod arena;
mod config;
mod entity;
mod factory;
mod food;
mod game;
mod light;
mod logging;
mod motion_behavior;
mod motion_handler;
mod render;
mod robot;
mod sensor;
mod types;
mod utils;

use clap::Parser;
use log::{LevelFilter, error, info};
use macroquad::prelude::Conf;
use std::process;

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::game::GameOptions;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of robots to place in the arena.
    #[arg(long, default_value_t = config::DEFAULT_ROBOT_COUNT)]
    robots: u32,

    /// Number of roaming lights.
    #[arg(long, default_value_t = config::DEFAULT_LIGHT_COUNT)]
    lights: u32,

    /// Number of food sources.
    #[arg(long, default_value_t = config::DEFAULT_FOOD_COUNT)]
    food: u32,

    /// How many robots steer by the fear policy; the rest explore.
    #[arg(long, default_value_t = config::DEFAULT_FEAR_COUNT)]
    fear: u32,

    /// Light sensor falloff base; larger values decay faster.
    #[arg(long, default_value_t = config::DEFAULT_LIGHT_SENSITIVITY)]
    sensitivity: f64,

    /// Disable hunger entirely (robots never seek food).
    #[arg(long)]
    no_food: bool,

    /// Seed for entity placement, for reproducible layouts.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window for this many ticks and print the outcome.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u32>,

    /// Debug filter to specify log topics (e.g., "arena,robot,sensor,motion")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Braitbots".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the logger
    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    // Setup logger with debug filters if provided
    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Braitbots...");

    let options = GameOptions {
        robot_count: args.robots,
        light_count: args.lights,
        food_count: args.food,
        fear_count: args.fear,
        light_sensitivity: args.sensitivity,
        food_enabled: !args.no_food,
        seed: args.seed,
    };

    // Create and initialize the game
    let mut game = match game::Game::new(options) {
        Ok(game) => game,
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    };

    // Headless runs never open a window
    if let Some(ticks) = args.headless {
        game.run_headless(ticks);
        println!(
            "Final status after {} ticks: {:?}",
            game.arena.tick(),
            game.arena.game_status()
        );
        return;
    }

    macroquad::Window::from_config(window_conf(), async move {
        // Initialize the renderer
        info!("Initializing macroquad rendering system");
        let mut renderer = render::Renderer::new();
        info!("Renderer initialized.");

        // Run the game loop
        game.run(&mut renderer).await.expect("Game loop failed");
    });
}
