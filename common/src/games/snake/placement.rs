use std::collections::HashSet;
use std::fmt;

use crate::games::SessionRng;
use super::grid::FieldSize;
use super::types::Point;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    NoFreeCell,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NoFreeCell => write!(f, "No free cell left on the field"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Describes which cells a new entity may not take, then samples uniformly
/// from what is left. Sampling enumerates free cells instead of retrying,
/// so a full field is reported rather than looping forever.
pub struct PlacementRequest<'a> {
    field: &'a FieldSize,
    occupied_sets: Vec<&'a HashSet<Point>>,
    occupied_cells: Vec<Point>,
    keep_away: Option<(Point, u32)>,
}

impl<'a> PlacementRequest<'a> {
    pub fn new(field: &'a FieldSize) -> Self {
        Self {
            field,
            occupied_sets: Vec::new(),
            occupied_cells: Vec::new(),
            keep_away: None,
        }
    }

    pub fn avoid_set(mut self, cells: &'a HashSet<Point>) -> Self {
        self.occupied_sets.push(cells);
        self
    }

    pub fn avoid_cell(mut self, cell: Option<Point>) -> Self {
        if let Some(cell) = cell {
            self.occupied_cells.push(cell);
        }
        self
    }

    /// Rejects cells closer than `min_distance` (Manhattan) to `origin`.
    pub fn keep_away_from(mut self, origin: Point, min_distance: u32) -> Self {
        self.keep_away = Some((origin, min_distance));
        self
    }

    pub fn is_free(&self, cell: &Point) -> bool {
        if !self.field.contains(cell) {
            return false;
        }
        if self.occupied_sets.iter().any(|set| set.contains(cell)) {
            return false;
        }
        if self.occupied_cells.contains(cell) {
            return false;
        }
        match self.keep_away {
            Some((origin, min_distance)) => origin.manhattan_distance(cell) >= min_distance,
            None => true,
        }
    }

    pub fn free_cells(&self) -> Vec<Point> {
        self.field.cells().filter(|cell| self.is_free(cell)).collect()
    }

    pub fn place(&self, rng: &mut SessionRng) -> Result<Point, PlacementError> {
        let free = self.free_cells();
        let index = rng
            .choose_index(free.len())
            .ok_or(PlacementError::NoFreeCell)?;
        Ok(free[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_avoids_all_occupied_cells() {
        let field = FieldSize::new(5, 5);
        let snake: HashSet<Point> = (0..5).map(|x| Point::new(x, 0)).collect();
        let obstacles: HashSet<Point> = (0..5).map(|x| Point::new(x, 1)).collect();
        let mut rng = SessionRng::new(42);

        for _ in 0..200 {
            let cell = PlacementRequest::new(&field)
                .avoid_set(&snake)
                .avoid_set(&obstacles)
                .avoid_cell(Some(Point::new(2, 2)))
                .place(&mut rng)
                .unwrap();
            assert!(!snake.contains(&cell));
            assert!(!obstacles.contains(&cell));
            assert_ne!(cell, Point::new(2, 2));
            assert!(field.contains(&cell));
        }
    }

    #[test]
    fn test_single_free_cell_is_always_chosen() {
        let field = FieldSize::new(3, 3);
        let occupied: HashSet<Point> = field
            .cells()
            .filter(|c| *c != Point::new(1, 2))
            .collect();
        let mut rng = SessionRng::new(42);
        let cell = PlacementRequest::new(&field)
            .avoid_set(&occupied)
            .place(&mut rng)
            .unwrap();
        assert_eq!(cell, Point::new(1, 2));
    }

    #[test]
    fn test_full_field_reports_error() {
        let field = FieldSize::new(2, 2);
        let occupied: HashSet<Point> = field.cells().collect();
        let mut rng = SessionRng::new(42);
        let result = PlacementRequest::new(&field).avoid_set(&occupied).place(&mut rng);
        assert_eq!(result, Err(PlacementError::NoFreeCell));
    }

    #[test]
    fn test_keep_away_respects_min_distance() {
        let field = FieldSize::new(40, 30);
        let head = Point::new(10, 10);
        let request = PlacementRequest::new(&field).keep_away_from(head, 5);
        assert!(!request.is_free(&Point::new(14, 10)));
        assert!(!request.is_free(&Point::new(12, 12)));
        assert!(request.is_free(&Point::new(15, 10)));

        let mut rng = SessionRng::new(42);
        for _ in 0..100 {
            let cell = request.place(&mut rng).unwrap();
            assert!(head.manhattan_distance(&cell) >= 5);
        }
    }
}
