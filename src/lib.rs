//! Retro Snake - the classic grid Snake game in the terminal
//!
//! This library provides:
//! - Core game logic (game module): snake body, food placement, collisions
//!   and the tick-driven game state
//! - Tick gating independent of the frame rate (timing module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Terminal-bell sound cues (audio module)
//! - The interactive play loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod timing;
