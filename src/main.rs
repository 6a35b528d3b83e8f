//! Stratholme entry point
//!
//! Runs the game headless: input comes from a key script, draw calls are
//! recorded instead of rasterised, and the outcome is logged.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use stratholme::assets::{Assets, PlaceholderLoader, PngLoader};
use stratholme::consts::SIM_DT;
use stratholme::hud;
use stratholme::platform::{InputSource, ScriptedInput};
use stratholme::renderer::DrawList;
use stratholme::settings::Settings;
use stratholme::sim::{World, tick};

/// Start, walk into the first NPC, purge it, pause and resume
const DEMO_SCRIPT: &str = "\
space
wait 10
right,down
wait 12
p
escape

escape
right
wait 30
";

fn main() {
    env_logger::init();
    log::info!("Stratholme (headless) starting...");

    let mut args = std::env::args().skip(1);
    let script_path = args.next();
    let settings = Settings::load(args.next().as_deref().unwrap_or(Settings::FILE_NAME));

    let assets = if Path::new(&settings.asset_dir).is_dir() {
        Assets::load(&mut PngLoader::new(&settings.asset_dir))
    } else {
        log::warn!("No asset directory at {}, using placeholder sizes", settings.asset_dir);
        Assets::load(&mut PlaceholderLoader::default())
    };

    let mut input = match script_path {
        Some(path) => match ScriptedInput::from_file(&path) {
            Ok(script) => script,
            Err(e) => {
                log::error!("Cannot read input script {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => ScriptedInput::parse(DEMO_SCRIPT),
    };
    log::info!("Replaying {} ticks of input", input.len());

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Game initialized with seed: {}", seed);
    let mut world = World::new(&settings, assets, seed);
    let mut frame = DrawList::new();

    let mut ticks: u64 = 0;
    while !input.is_finished() && !world.status().is_terminal() {
        let keys = input.poll();
        ticks += 1;
        tick(&mut world, &keys, ticks as f64 * SIM_DT);

        frame.clear();
        hud::draw(&world, &mut frame, settings.debug);
        log::trace!("Tick {}: {} draw calls", ticks, frame.commands.len());
    }

    log::info!(
        "Finished after {} ticks: {} ({}, {})",
        ticks,
        world.status().as_str(),
        world.state.purged_label(),
        world.state.spared_label()
    );
    for line in frame.texts() {
        log::info!("  {}", line);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
