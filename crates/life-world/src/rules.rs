//! Per-cell transition rule.
//!
//! Thresholds are per species: a cell survives when 2 or 3 neighbours share its species, and
//! an empty (or dying) cell is born as any species that has exactly 3 neighbours. When several
//! species qualify for a birth, one is chosen uniformly at random.

use life_core::{Cell, Species};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Neighbour count of a single species required for a birth
pub const BIRTH_COUNT: usize = 3;

/// Inclusive range of same-species neighbours for survival
pub const SURVIVAL_MIN: usize = 2;
pub const SURVIVAL_MAX: usize = 3;

/// Number of neighbours occupied by `species`
pub fn same_species_count(species: Species, neighbors: &[Cell]) -> usize {
    neighbors
        .iter()
        .filter(|cell| **cell == Some(species))
        .count()
}

pub fn survives(current: Cell, neighbors: &[Cell]) -> bool {
    match current {
        Some(species) => {
            let count = same_species_count(species, neighbors);
            (SURVIVAL_MIN..=SURVIVAL_MAX).contains(&count)
        }
        None => false,
    }
}

/// Species in `[0, species_count)` with exactly three neighbours, in ascending order
pub fn birth_candidates(neighbors: &[Cell], species_count: u32) -> Vec<Species> {
    let mut present: Vec<Species> = neighbors
        .iter()
        .flatten()
        .copied()
        .filter(|species| species.0 < species_count)
        .collect();
    present.sort_unstable();
    present.dedup();

    present
        .into_iter()
        .filter(|species| same_species_count(*species, neighbors) == BIRTH_COUNT)
        .collect()
}

/// Compute the next state of a cell from its current state and its neighbours
pub fn next_cell<R: Rng + ?Sized>(
    current: Cell,
    neighbors: &[Cell],
    species_count: u32,
    rng: &mut R,
) -> Cell {
    if survives(current, neighbors) {
        return current;
    }

    let candidates = birth_candidates(neighbors, species_count);
    let born = candidates.choose(rng).copied();
    if candidates.len() > 1 {
        trace!(candidates = ?candidates, chosen = ?born, "Birth tie broken at random");
    }
    born
}
