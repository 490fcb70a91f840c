use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid, addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn is_within(&self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Lays out `length` contiguous cells starting at `head` and trailing away
/// from `direction`.
pub fn starting_body(head: Cell, direction: Direction, length: usize) -> Vec<Cell> {
    let (dx, dy) = direction.delta();
    let mut body = Vec::with_capacity(length);
    let mut cell = head;

    for _ in 0..length {
        body.push(cell);
        cell = cell.moved_by(-dx, -dy);
    }

    body
}

/// Read-only view answering which cells the snake covers
#[derive(Debug, Clone, Copy)]
pub struct GridOccupancy<'a> {
    cells: &'a VecDeque<Cell>,
}

impl<'a> GridOccupancy<'a> {
    pub fn new(cells: &'a VecDeque<Cell>) -> Self {
        Self { cells }
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of distinct in-bounds cells covered
    pub fn covered(&self, grid_size: i32) -> usize {
        self.cells
            .iter()
            .filter(|c| c.is_within(grid_size))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Every in-bounds cell not covered, in row-major order
    pub fn free_cells(&self, grid_size: i32) -> Vec<Cell> {
        let occupied: HashSet<&Cell> = self.cells.iter().collect();

        (0..grid_size)
            .flat_map(|y| (0..grid_size).map(move |x| Cell::new(x, y)))
            .filter(|c| !occupied.contains(c))
            .collect()
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    body: VecDeque<Cell>,
    direction: Direction,
    grow_pending: bool,
    initial_body: Vec<Cell>,
    initial_direction: Direction,
}

impl SnakeBody {
    /// Create a snake from its starting layout. `initial_body` is head first
    /// and should be contiguous; it is what [`SnakeBody::reset`] restores.
    pub fn new(initial_body: Vec<Cell>, initial_direction: Direction) -> Self {
        Self {
            body: initial_body.iter().copied().collect(),
            direction: initial_direction,
            grow_pending: false,
            initial_body,
            initial_direction,
        }
    }

    /// Push a new head one step in `direction`. The tail is kept when a
    /// growth is pending, dropped otherwise. Bounds are not checked here.
    pub fn advance(&mut self, direction: Direction) -> Cell {
        let new_head = self.head().moved_in_direction(direction);
        self.body.push_front(new_head);
        self.direction = direction;

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }

        new_head
    }

    /// Keep the tail on the next advance
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    pub fn reset(&mut self) {
        self.body = self.initial_body.iter().copied().collect();
        self.direction = self.initial_direction;
        self.grow_pending = false;
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn cells(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn occupancy(&self) -> GridOccupancy<'_> {
        GridOccupancy::new(&self.body)
    }

    /// Direction of the last move (or the initial direction)
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_growing(&self) -> bool {
        self.grow_pending
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Default for SnakeBody {
    fn default() -> Self {
        Self::new(
            vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)],
            Direction::Right,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(snake: &SnakeBody) -> Vec<Cell> {
        snake.cells().iter().copied().collect()
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.moved_in_direction(Direction::Left), Cell::new(4, 5));
    }

    #[test]
    fn test_starting_body() {
        let body = starting_body(Cell::new(5, 5), Direction::Down, 3);
        assert_eq!(body, vec![Cell::new(5, 5), Cell::new(5, 4), Cell::new(5, 3)]);
    }

    #[test]
    fn test_default_layout() {
        let snake = SnakeBody::default();
        assert_eq!(
            cells(&snake),
            vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)]
        );
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(6, 9));
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = SnakeBody::default();
        let head = snake.advance(Direction::Down);

        assert_eq!(head, Cell::new(6, 10));
        assert_eq!(snake.len(), 3);
        assert_eq!(
            cells(&snake),
            vec![Cell::new(6, 10), Cell::new(6, 9), Cell::new(5, 9)]
        );
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn test_grow_applies_once() {
        let mut snake = SnakeBody::default();
        snake.grow();
        assert!(snake.is_growing());

        snake.advance(Direction::Right);
        assert_eq!(snake.len(), 4);
        assert!(!snake.is_growing());
        assert_eq!(snake.cells().back(), Some(&Cell::new(4, 9)));

        snake.advance(Direction::Right);
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_advance_does_not_check_bounds() {
        let mut snake = SnakeBody::new(vec![Cell::new(0, 5), Cell::new(1, 5)], Direction::Left);
        assert_eq!(snake.advance(Direction::Left), Cell::new(-1, 5));
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let mut snake = SnakeBody::default();
        snake.grow();
        snake.advance(Direction::Up);
        snake.advance(Direction::Left);
        snake.grow();

        snake.reset();

        assert_eq!(
            cells(&snake),
            vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)]
        );
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.is_growing());
    }

    #[test]
    fn test_occupancy() {
        let snake = SnakeBody::default();
        let occupancy = snake.occupancy();

        assert!(occupancy.is_occupied(Cell::new(6, 9)));
        assert!(occupancy.is_occupied(Cell::new(4, 9)));
        assert!(!occupancy.is_occupied(Cell::new(7, 9)));
        assert_eq!(occupancy.covered(25), 3);
        assert_eq!(occupancy.free_cells(25).len(), 25 * 25 - 3);
    }

    #[test]
    fn test_occupancy_ignores_out_of_bounds() {
        let snake = SnakeBody::new(vec![Cell::new(-1, 0), Cell::new(0, 0)], Direction::Left);
        let occupancy = snake.occupancy();

        assert_eq!(occupancy.covered(2), 1);
        assert_eq!(
            occupancy.free_cells(2),
            vec![Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
    }
}
