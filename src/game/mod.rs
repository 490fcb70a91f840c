//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Randomness and sound cues come in through the [`RandomCellSource`] and
//! [`EventSink`] traits.

pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod events;
pub mod food;
pub mod snake;

// Re-export commonly used types
pub use collision::CollisionType;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameState, Status, TickOutcome};
pub use error::GameError;
pub use events::{EventSink, GameEvent};
pub use food::{FoodPlacer, RandomCellSource, RngCellSource};
pub use snake::{Cell, GridOccupancy, SnakeBody};
