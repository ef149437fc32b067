//! World simulation engine.
//!
//! This module implements the bounded square grid where species live, compete for empty
//! cells and die out, one generation at a time.

pub mod grid;
pub mod rules;
pub mod simulation;

pub use grid::Grid;
pub use rules::next_cell;
pub use simulation::{evolve, Simulation};
