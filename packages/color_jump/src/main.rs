
#[macro_use]
extern crate tracing;

use color_jump::{
    logging::init_logging,
    settings::{
        Settings,
        SETTINGS_FILE_NAME,
    },
    input::Input,
    game::{
        Game,
        COLORS,
    },
};
use std::{
    env::args,
    path::Path,
    process::exit,
};
use vek::*;
use anyhow::Result;


const CLI_INTRO: &'static str = "Color Jump, headless simulation.";

const CLI_HELP: &'static str = r#"
Examples:

    [this command]
    Simulate the demo board with settings from settings.json, if present.

    [this command] --settings=tuning.json --log=log
    Read settings from another file and also write the log to a file.

Env var examples:
    RUST_LOG=color_jump=trace
    Changes logging levels"#;

/// Frame rate the demo pretends to render at.
const DEMO_FPS: f32 = 60.0;

/// Width of the demo board in cells.
const DEMO_BOARD_WIDTH: i64 = 24;


fn main() {
    println!("{}", CLI_INTRO);
    let args = args().collect::<Vec<_>>();
    if args.get(1).map(String::as_str) == Some("--help") {
        println!("{}", CLI_HELP);
        return;
    }

    let log_file = args.iter()
        .filter_map(|arg| arg.strip_prefix("--log="))
        .next();
    if let Err(e) = init_logging(log_file.map(Path::new)) {
        eprintln!("{:?}", e);
        exit(1);
    }

    let settings_file = args.iter()
        .filter_map(|arg| arg.strip_prefix("--settings="))
        .next()
        .unwrap_or(SETTINGS_FILE_NAME);
    let settings = Settings::read(settings_file);

    if let Err(e) = run_demo(settings) {
        error!("{:?}", e);
        exit(1);
    }
}

// build a board of every color with a floor and run a scripted walk and jump across it
fn run_demo(settings: Settings) -> Result<()> {
    let spawn = Vec3::new(settings.block_size * 2.5, settings.block_size * 3.0, 0.0);
    let frames = (settings.demo_seconds * DEMO_FPS).ceil() as u64;
    let mut game = Game::new(settings, spawn)?;

    for x in 0..DEMO_BOARD_WIDTH {
        game.add_cube(COLORS[0], 1, Vec2::new(x, 0), true)?;
    }
    for (i, &color) in COLORS.iter().enumerate() {
        game.add_cube(color, 3, Vec2::new(i as i64 * 6, 3), false)?;
    }

    game.start();
    for frame in 0..frames {
        let t = frame as f32 / DEMO_FPS;
        let input = Input {
            right: t >= 1.0,
            action: (1.5..1.6).contains(&t),
            ..Input::default()
        };
        game.update(1.0 / DEMO_FPS, &input)?;
        for change in game.take_state_changes() {
            debug!(t, ?change, "game state changed");
        }
        if game.is_lost() {
            break;
        }
        if frame % DEMO_FPS as u64 == 0 {
            let player = game.player();
            debug!(
                t,
                position = ?player.position(),
                jumping = player.is_jumping(),
                "player"
            );
        }
    }

    let player = game.player();
    info!(
        elapsed = game.elapsed(),
        position = ?player.position(),
        active_color = ?game.active_color().map(|color| format!("{:06x}", color)),
        tested_pairs = game.collision_mgr().tested_pairs(),
        colliding_pairs = game.collision_mgr().colliding_pairs(),
        high_score = game.high_score(),
        lost = game.is_lost(),
        "demo finished"
    );
    Ok(())
}
