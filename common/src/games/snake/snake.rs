use std::collections::{HashSet, VecDeque};

use super::grid::FieldSize;
use super::types::{Direction, Point};

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    direction: Direction,
    pending_direction: Option<Direction>,
}

impl Snake {
    /// Lays `length` segments behind `head`, opposite to `direction`,
    /// wrapping around the field edges.
    pub fn new(head: Point, direction: Direction, length: usize, field_size: &FieldSize) -> Self {
        let behind = direction.opposite();
        let mut cells = Vec::with_capacity(length.max(1));
        let mut current = head;
        for _ in 0..length.max(1) {
            cells.push(current);
            let next = current.offset(behind);
            current = Point::new(
                next.x.rem_euclid(field_size.width),
                next.y.rem_euclid(field_size.height),
            );
        }
        Self::from_cells(cells, direction)
    }

    /// Builds a snake from explicit head-first cells. Duplicates are dropped.
    pub fn from_cells(cells: impl IntoIterator<Item = Point>, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        for cell in cells {
            if body_set.insert(cell) {
                body.push_back(cell);
            }
        }

        Self {
            body,
            body_set,
            direction,
            pending_direction: None,
        }
    }

    pub fn head(&self) -> Point {
        self.body.front().copied().unwrap_or(Point::new(0, 0))
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: &Point) -> bool {
        self.body_set.contains(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn cell_set(&self) -> &HashSet<Point> {
        &self.body_set
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Buffers `direction` for the next tick unless it reverses the
    /// direction applied on the last tick. A later call before the tick wins.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn adopt_pending_direction(&mut self) -> Direction {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
        self.direction
    }

    pub fn push_head(&mut self, cell: Point) {
        self.body.push_front(cell);
        self.body_set.insert(cell);
    }

    pub fn pop_tail(&mut self) -> Option<Point> {
        let tail = self.body.pop_back()?;
        self.body_set.remove(&tail);
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lays_body_behind_head() {
        let field = FieldSize::new(40, 30);
        let snake = Snake::new(Point::new(10, 10), Direction::Right, 3, &field);
        let cells: Vec<Point> = snake.cells().copied().collect();
        assert_eq!(
            cells,
            vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );
    }

    #[test]
    fn test_new_wraps_body_around_edge() {
        let field = FieldSize::new(10, 10);
        let snake = Snake::new(Point::new(0, 5), Direction::Right, 3, &field);
        assert!(snake.contains(&Point::new(9, 5)));
        assert!(snake.contains(&Point::new(8, 5)));
    }

    #[test]
    fn test_reverse_direction_is_rejected() {
        let field = FieldSize::new(40, 30);
        let mut snake = Snake::new(Point::new(10, 10), Direction::Right, 3, &field);
        assert!(!snake.buffer_direction(Direction::Left));
        assert!(snake.buffer_direction(Direction::Up));
        assert!(snake.buffer_direction(Direction::Down));
        assert_eq!(snake.adopt_pending_direction(), Direction::Down);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_buffer_checks_applied_direction_not_buffered_one() {
        let field = FieldSize::new(40, 30);
        let mut snake = Snake::new(Point::new(10, 10), Direction::Right, 3, &field);
        assert!(snake.buffer_direction(Direction::Up));
        // Still moving right, so Left stays forbidden even after buffering Up.
        assert!(!snake.buffer_direction(Direction::Left));
        assert_eq!(snake.adopt_pending_direction(), Direction::Up);
    }

    #[test]
    fn test_push_and_pop_keep_set_in_sync() {
        let mut snake = Snake::from_cells([Point::new(2, 2), Point::new(1, 2)], Direction::Right);
        snake.push_head(Point::new(3, 2));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.pop_tail(), Some(Point::new(1, 2)));
        assert!(!snake.contains(&Point::new(1, 2)));
        assert_eq!(snake.head(), Point::new(3, 2));
    }
}
