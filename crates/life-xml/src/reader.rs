//! Loading and validation of input documents.

use crate::document::{
    LifeDocument, OrganismRecord, WorldSection, CELLS, ITERATIONS, ORGANISM, ORGANISMS, SPECIES,
    WORLD, X_POS, Y_POS,
};
use life_core::{Cell, Error, Position, Result, Species, World};
use life_world::Grid;
use rand::Rng;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Read and validate the world file at `path`.
///
/// Organisms claiming an already occupied position replace it with probability one half,
/// drawn from `rng`.
#[instrument(skip(path, rng), fields(path = %path.display()))]
pub fn load_world<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<(World, Grid)> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    parse_world(&text, rng)
}

/// Validate an in-memory world document
pub fn parse_world<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Result<(World, Grid)> {
    let document: LifeDocument =
        quick_xml::de::from_str(text).map_err(|e| Error::MalformedDocument(e.to_string()))?;

    let (world_section, organisms) = validate_required(&document)?;
    let size = validate_world_size(world_section)?;
    let species_count = validate_species_count(world_section)?;
    let iterations = validate_iterations(world_section)?;
    let world = World::new(size, species_count, iterations);

    let grid = read_cells(organisms, &world, rng)?;

    info!(
        size = world.size,
        species = world.species_count,
        iterations = world.iterations,
        organisms = organisms.len(),
        population = grid.population(),
        "World loaded"
    );

    Ok((world, grid))
}

fn validate_required(document: &LifeDocument) -> Result<(&WorldSection, &[OrganismRecord])> {
    let world = document.world.as_ref().ok_or_else(|| Error::missing(WORLD))?;

    for (field, value) in [
        (ITERATIONS, &world.iterations),
        (CELLS, &world.cells),
        (SPECIES, &world.species),
    ] {
        if value.is_none() {
            return Err(Error::missing(field));
        }
    }

    let organisms = document
        .organisms
        .as_ref()
        .ok_or_else(|| Error::missing(ORGANISMS))?;
    for record in &organisms.organism {
        if record.x_pos.is_none() {
            return Err(missing_in_organism(X_POS));
        }
        if record.y_pos.is_none() {
            return Err(missing_in_organism(Y_POS));
        }
    }

    Ok((world, &organisms.organism))
}

/// Largest number of cells a grid can hold in memory
const MAX_GRID_CELLS: usize = isize::MAX as usize / std::mem::size_of::<Cell>();

fn validate_world_size(world: &WorldSection) -> Result<usize> {
    let size = parse_integer(world.cells.as_deref(), CELLS)
        .filter(|&size| size > 0)
        .and_then(|size| usize::try_from(size).ok())
        .ok_or_else(|| Error::out_of_range(CELLS, "positive number"))?;

    match size.checked_mul(size) {
        Some(total) if total <= MAX_GRID_CELLS => Ok(size),
        _ => Err(Error::out_of_range(
            CELLS,
            "positive number whose square fits in memory",
        )),
    }
}

fn validate_species_count(world: &WorldSection) -> Result<u32> {
    parse_integer(world.species.as_deref(), SPECIES)
        .filter(|&count| count > 0)
        .and_then(|count| u32::try_from(count).ok())
        .ok_or_else(|| Error::out_of_range(SPECIES, "positive number"))
}

fn validate_iterations(world: &WorldSection) -> Result<u64> {
    parse_integer(world.iterations.as_deref(), ITERATIONS)
        .and_then(|iterations| u64::try_from(iterations).ok())
        .ok_or_else(|| Error::out_of_range(ITERATIONS, "zero or positive number"))
}

fn read_cells<R: Rng + ?Sized>(
    organisms: &[OrganismRecord],
    world: &World,
    rng: &mut R,
) -> Result<Grid> {
    let mut grid = Grid::new(world.size);

    for record in organisms {
        let (pos, species) = extract_organism(record, world)?;

        let resolved = match grid.get(pos) {
            Some(existing) => {
                let chosen = if rng.gen_bool(0.5) { existing } else { species };
                debug!(
                    position = %pos,
                    existing = %existing,
                    incoming = %species,
                    chosen = %chosen,
                    "Species conflict resolved"
                );
                chosen
            }
            None => species,
        };
        grid.set(pos, Some(resolved));
    }

    Ok(grid)
}

fn extract_organism(record: &OrganismRecord, world: &World) -> Result<(Position, Species)> {
    let x = validate_index(record.x_pos.as_deref(), world.size as u64, X_POS)?;
    let y = validate_index(record.y_pos.as_deref(), world.size as u64, Y_POS)?;

    let species_text = record
        .species
        .as_deref()
        .ok_or_else(|| missing_in_organism(SPECIES))?;
    let species = validate_index(Some(species_text), u64::from(world.species_count), SPECIES)?;

    // Both bounds fit their target types once validated against them.
    Ok((
        Position::new(x as usize, y as usize),
        Species(species as u32),
    ))
}

/// Parse `value` as an integer in `[0, max)`
fn validate_index(value: Option<&str>, max: u64, field: &str) -> Result<u64> {
    parse_integer(value, field)
        .and_then(|v| u64::try_from(v).ok())
        .filter(|&v| v < max)
        .ok_or_else(|| {
            Error::out_of_range(field, &format!("between 0 and {}", max.saturating_sub(1)))
        })
}

fn parse_integer(value: Option<&str>, field: &str) -> Option<i64> {
    let text = value?.trim();
    match text.parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(field, text, error = %err, "Value is not an integer");
            None
        }
    }
}

fn missing_in_organism(field: &str) -> Error {
    Error::InvalidInput {
        field: field.to_string(),
        message: format!("Missing element '{}' in some of the element '{}'", field, ORGANISM),
    }
}
