//! Simulation engine: advances a grid generation by generation.

use crate::grid::Grid;
use crate::rules::next_cell;
use life_core::{Cell, Error, Result, World};
use rand::Rng;
use tracing::{debug, info, instrument};

/// Generations between progress reports at `info` level
const PROGRESS_INTERVAL: u64 = 1000;

pub struct Simulation<R: Rng> {
    world: World,
    grid: Grid,
    rng: R,
    generation: u64,
}

impl<R: Rng> Simulation<R> {
    pub fn new(world: World, grid: Grid, rng: R) -> Result<Self> {
        if grid.size != world.size {
            return Err(Error::InvalidInput {
                field: "cells".to_string(),
                message: format!(
                    "Grid is {}x{} but the world size is {}",
                    grid.size, grid.size, world.size
                ),
            });
        }

        Ok(Self {
            world,
            grid,
            rng,
            generation: 0,
        })
    }

    /// Run `world.iterations` generations and return the final grid
    #[instrument(skip(self), fields(size = self.world.size, species = self.world.species_count, iterations = self.world.iterations))]
    pub fn run(mut self) -> Grid {
        info!(
            population = self.grid.population(),
            "Starting simulation for {} iterations", self.world.iterations
        );

        for _ in 0..self.world.iterations {
            self.step();

            if self.generation % PROGRESS_INTERVAL == 0 {
                info!(
                    "Generation {}/{}: {} organisms alive",
                    self.generation,
                    self.world.iterations,
                    self.grid.population()
                );
            }
        }

        let census: Vec<String> = self
            .grid
            .census()
            .iter()
            .map(|(species, count)| format!("{}={}", species, count))
            .collect();
        info!(
            generation = self.generation,
            population = self.grid.population(),
            census = %census.join(","),
            "Simulation complete"
        );

        self.grid
    }

    /// Replace the current generation with the next one
    pub fn step(&mut self) {
        let mut next = Grid::new(self.grid.size);

        for pos in self.grid.positions() {
            let neighbors: Vec<Cell> = self
                .grid
                .neighbors(pos)
                .into_iter()
                .map(|(_, cell)| cell)
                .collect();
            let cell = next_cell(
                self.grid.get(pos),
                &neighbors,
                self.world.species_count,
                &mut self.rng,
            );
            next.set(pos, cell);
        }

        self.grid = next;
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = self.grid.population(),
            "Generation computed"
        );
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

/// Evolve `grid` for `world.iterations` generations
pub fn evolve<R: Rng + ?Sized>(world: &World, grid: Grid, rng: &mut R) -> Result<Grid> {
    Ok(Simulation::new(*world, grid, rng)?.run())
}
