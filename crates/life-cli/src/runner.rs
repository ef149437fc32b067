//! Executes a single run: load the input world, evolve it, save the result.

use anyhow::Result;
use life_core::RunConfig;
use life_world::evolve;
use life_xml::{load_world, save_world};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::{info, instrument};

/// Random source for a run: seeded when requested, otherwise from OS entropy
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[instrument(skip(config), fields(input = %config.input.display(), output = %config.output.display()))]
pub fn run(config: &RunConfig) -> Result<()> {
    let start = Instant::now();
    let mut rng = make_rng(config.seed);

    let (world, grid) = load_world(&config.input, &mut rng)?;
    let grid = evolve(&world, grid, &mut rng)?;
    save_world(&config.output, &world, &grid, &config.output_config)?;

    info!(
        iterations = world.iterations,
        population = grid.population(),
        "Run completed in {:.3}s",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
