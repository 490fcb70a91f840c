//! Collision tests between the snake's head, the food, the walls and the
//! rest of the body. All functions are pure.

use super::snake::Cell;

/// Type of fatal collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

pub fn ate_food(head: Cell, food: Cell) -> bool {
    head == food
}

/// True when the head sits exactly one step outside the grid on either axis
pub fn hit_wall(head: Cell, grid_size: i32) -> bool {
    head.x == -1 || head.x == grid_size || head.y == -1 || head.y == grid_size
}

/// True when the first cell of `body` repeats later in the body
pub fn hit_self<'a>(body: impl IntoIterator<Item = &'a Cell>) -> bool {
    let mut cells = body.into_iter();
    match cells.next() {
        Some(head) => cells.any(|cell| cell == head),
        None => false,
    }
}

/// Classifies a fatal collision for the body as it stands. Walls win over
/// self-collision.
pub fn detect<'a>(body: impl IntoIterator<Item = &'a Cell>, grid_size: i32) -> Option<CollisionType> {
    let mut cells = body.into_iter().peekable();
    let head = **cells.peek()?;

    if hit_wall(head, grid_size) {
        Some(CollisionType::Wall)
    } else if hit_self(cells) {
        Some(CollisionType::SelfCollision)
    } else {
        None
    }
}
