//! 2D grid for the world.

use life_core::{Cell, Direction, Position, Species};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bounded square grid of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-empty `size × size` grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a grid from occupied positions; later entries overwrite earlier ones
    pub fn from_organisms(size: usize, organisms: impl IntoIterator<Item = (Position, Species)>) -> Self {
        let mut grid = Self::new(size);
        for (pos, species) in organisms {
            grid.set(pos, Some(species));
        }
        grid
    }

    /// Get cell at position. Panics if `pos` is outside the grid.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.pos_to_index(pos)]
    }

    /// Set cell at position. Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.pos_to_index(pos);
        self.cells[index] = cell;
    }

    /// Cells adjacent to `pos`, clipped at the grid boundary (3 to 8 entries)
    pub fn neighbors(&self, pos: Position) -> Vec<(Position, Cell)> {
        Direction::all()
            .iter()
            .filter_map(|direction| {
                let (dx, dy) = direction.to_delta();
                pos.offset(dx, dy, self.size)
            })
            .map(|neighbor_pos| (neighbor_pos, self.get(neighbor_pos)))
            .collect()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        assert!(
            pos.x < self.size && pos.y < self.size,
            "position {} outside {}x{} grid",
            pos,
            self.size,
            self.size
        );
        pos.y * self.size + pos.x
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index % self.size, index / self.size)
    }

    /// Iterator over all positions
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Species)> + '_ {
        self.iter()
            .filter_map(|(pos, cell)| cell.map(|species| (pos, species)))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Number of occupied cells per species
    pub fn census(&self) -> BTreeMap<Species, usize> {
        let mut census = BTreeMap::new();
        for (_, species) in self.occupied() {
            *census.entry(species).or_insert(0) += 1;
        }
        census
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
