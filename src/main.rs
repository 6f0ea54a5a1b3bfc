/// Headless simulation runner
///
/// Usage: aquacell [map] [steps]
/// where map is one of basic_bowl, waterfall, overflow, stairs, river,
/// teardrop (default basic_bowl) and steps defaults to 120.

use anyhow::{Context, Result};

use aquacell::{create_map, MapKind, SimulationConfig, SimulationEngine};

const STEP_SECONDS: f32 = 0.016;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let kind: MapKind = match args.next() {
        Some(name) => name.parse()?,
        None => MapKind::BasicBowl,
    };
    let steps: u64 = match args.next() {
        Some(count) => count.parse().context("steps must be a number")?,
        None => 120,
    };

    let config = SimulationConfig::default();
    let mut engine = SimulationEngine::new(&config)?;
    let mut map = create_map(kind);

    log::info!("running map '{}' for {} steps", map.kind().as_str(), steps);
    map.setup(&mut engine)?;

    for step in 0..steps {
        map.step(&mut engine, step as f32 * STEP_SECONDS)?;
        engine.simulate();

        if step % 30 == 0 {
            log::info!(
                "step {:>4}: {} active cells, total volume {:.3}",
                step,
                engine.active_count(),
                engine.total_volume()
            );
        }
    }

    log::info!(
        "finished: {} active cells, total volume {:.3}",
        engine.active_count(),
        engine.total_volume()
    );
    Ok(())
}
