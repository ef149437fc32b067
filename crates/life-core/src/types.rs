//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a species, valid in `0..World::species_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Species(pub u32);

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of a single grid position: empty, or occupied by one species
pub type Cell = Option<Species>;

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, or `None` if the result leaves `[0, size)` on either axis.
    /// There is no wraparound.
    pub fn offset(&self, dx: isize, dy: isize, size: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx).filter(|&x| x < size)?;
        let y = self.y.checked_add_signed(dy).filter(|&y| y < size)?;
        Some(Self { x, y })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight compass directions of the Moore neighbourhood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// Static simulation parameters read from the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// Edge length of the square grid
    pub size: usize,
    /// Number of distinct species
    pub species_count: u32,
    /// Number of generations to simulate
    pub iterations: u64,
}

impl World {
    pub fn new(size: usize, species_count: u32, iterations: u64) -> Self {
        Self {
            size,
            species_count,
            iterations,
        }
    }
}
