use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::error::GameError;
use super::snake::{Cell, GridOccupancy};

/// Source of uniformly random integers, used to pick grid cells
pub trait RandomCellSource {
    /// Random integer in `low..=high`
    fn random_int(&mut self, low: i32, high: i32) -> i32;

    fn random_cell(&mut self, grid_size: i32) -> Cell {
        let x = self.random_int(0, grid_size - 1);
        let y = self.random_int(0, grid_size - 1);
        Cell::new(x, y)
    }
}

/// [`RandomCellSource`] backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngCellSource<R> {
    rng: R,
}

impl<R: Rng> RngCellSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngCellSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomCellSource for RngCellSource<R> {
    fn random_int(&mut self, low: i32, high: i32) -> i32 {
        self.rng.gen_range(low..=high)
    }
}

/// Owns the food cell and moves it somewhere the snake isn't
#[derive(Debug, Clone)]
pub struct FoodPlacer<S> {
    position: Option<Cell>,
    grid_size: i32,
    max_attempts: usize,
    source: S,
}

impl<S: RandomCellSource> FoodPlacer<S> {
    /// Create a placer and put the first food on a free cell
    pub fn new(
        source: S,
        grid_size: i32,
        max_attempts: usize,
        occupied: GridOccupancy<'_>,
    ) -> Result<Self, GameError> {
        let mut placer = Self {
            position: None,
            grid_size,
            max_attempts,
            source,
        };
        placer.relocate(occupied)?;
        Ok(placer)
    }

    /// Current food cell; `None` once the snake has filled the grid
    pub fn position(&self) -> Option<Cell> {
        self.position
    }

    /// Sample random cells until one is free. After `max_attempts` misses the
    /// free cells are enumerated and one of them is picked instead, so this
    /// always terminates.
    pub fn random_unoccupied_cell(&mut self, occupied: GridOccupancy<'_>) -> Result<Cell, GameError> {
        let total = (self.grid_size.max(0) as usize).pow(2);
        if occupied.covered(self.grid_size) >= total {
            return Err(GameError::WorldFull {
                grid_size: self.grid_size,
            });
        }

        for _ in 0..self.max_attempts {
            let cell = self.source.random_cell(self.grid_size);
            if !occupied.is_occupied(cell) {
                return Ok(cell);
            }
        }

        let free = occupied.free_cells(self.grid_size);
        warn!(
            attempts = self.max_attempts,
            free = free.len(),
            "random food placement kept missing, picking from free cells"
        );
        let index = self.source.random_int(0, free.len() as i32 - 1) as usize;
        free.get(index).copied().ok_or(GameError::WorldFull {
            grid_size: self.grid_size,
        })
    }

    pub fn relocate(&mut self, occupied: GridOccupancy<'_>) -> Result<Cell, GameError> {
        let placed = self.random_unoccupied_cell(occupied);
        self.position = placed.as_ref().ok().copied();
        let cell = placed?;
        debug!(x = cell.x, y = cell.y, "food placed");
        Ok(cell)
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, cell: Cell) {
        self.position = Some(cell);
    }
}
