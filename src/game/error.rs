use thiserror::Error;

/// Errors raised by the game engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The snake covers every cell, so there is nowhere to put food
    #[error("no free cell left for food on a {grid_size}x{grid_size} grid")]
    WorldFull { grid_size: i32 },
}
