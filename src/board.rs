use rand::Rng;

use crate::sparse_set::SparseSet;
use crate::Coords;

pub const BOARD_SIZE: i16 = 40;
pub const BOARD_PADDING: i16 = 3;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Bounds {
    size: i16,
    padding: i16,
}

impl Bounds {
    pub fn new(size: i16, padding: i16) -> Self {
        assert!(size > 2 * padding, "board of size {} has no interior", size);
        Bounds { size, padding }
    }

    pub fn size(&self) -> i16 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.size).contains(&pos.0) && (0..self.size).contains(&pos.1)
    }

    pub fn is_interior(&self, pos: Coords) -> bool {
        let range = self.padding..self.size - self.padding;
        range.contains(&pos.0) && range.contains(&pos.1)
    }

    pub fn is_border(&self, pos: Coords) -> bool {
        pos.0 <= 0 || pos.1 <= 0 || pos.0 >= self.size - 1 || pos.1 >= self.size - 1
    }

    pub fn interior_count(&self) -> usize {
        let side = (self.size - 2 * self.padding) as usize;
        side * side
    }

    pub fn center(&self) -> Coords {
        (self.size / 2, self.size / 2)
    }

    fn index(&self, pos: Coords) -> usize {
        self.size as usize * pos.1 as usize + pos.0 as usize
    }

    fn interior_cells(&self) -> impl Iterator<Item = Coords> {
        let (lo, hi) = (self.padding, self.size - self.padding);
        (lo..hi).flat_map(move |y| (lo..hi).map(move |x| (x, y)))
    }
}

#[derive(Clone, Debug)]
pub struct FreeCells {
    bounds: Bounds,
    cells: SparseSet<Coords>,
}

impl FreeCells {
    pub fn new(bounds: Bounds) -> Self {
        let mut cells = SparseSet::with_capacity(bounds.cell_count());
        for pos in bounds.interior_cells() {
            cells.insert(bounds.index(pos), pos);
        }
        FreeCells { bounds, cells }
    }

    pub fn add(&mut self, pos: Coords) {
        if self.bounds.is_interior(pos) {
            self.cells.insert(self.bounds.index(pos), pos);
        }
    }

    pub fn remove(&mut self, pos: Coords) {
        if self.bounds.is_interior(pos) {
            self.cells.remove(self.bounds.index(pos));
        }
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.bounds.is_interior(pos) && self.cells.contains(self.bounds.index(pos))
    }

    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coords> {
        self.cells.pick_random(rng).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coords> {
        self.cells.values().iter()
    }
}

/// Occupancy grid for snake segments. Every write is mirrored into the free-cell pool.
#[derive(Clone, Debug)]
pub struct Board {
    bounds: Bounds,
    cells: Vec<bool>,
    free: FreeCells,
}

impl Board {
    pub fn new() -> Self {
        Board::with_bounds(Bounds::new(BOARD_SIZE, BOARD_PADDING))
    }

    pub fn with_bounds(bounds: Bounds) -> Self {
        Board {
            bounds,
            cells: vec![false; bounds.cell_count()],
            free: FreeCells::new(bounds),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set(&mut self, pos: Coords, occupied: bool) {
        debug_assert!(self.bounds.contains(pos), "{:?} is off the board", pos);
        let index = self.bounds.index(pos);
        self.cells[index] = occupied;

        if occupied {
            self.free.remove(pos);
        } else {
            self.free.add(pos);
        }
    }

    pub fn get(&self, pos: Coords) -> bool {
        self.bounds.contains(pos) && self.cells[self.bounds.index(pos)]
    }

    pub fn free(&self) -> &FreeCells {
        &self.free
    }

    pub fn free_mut(&mut self) -> &mut FreeCells {
        &mut self.free
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn pool_starts_with_every_interior_cell() {
        let board = Board::new();
        let bounds = board.bounds();
        assert_eq!(board.free().len(), 34 * 34);
        assert_eq!(board.free().len(), bounds.interior_count());
        assert!(board.free().contains((3, 3)));
        assert!(board.free().contains((36, 36)));
        assert!(!board.free().contains((2, 10)));
        assert!(!board.free().contains((37, 10)));
    }

    #[test]
    fn setting_cells_mirrors_into_pool() {
        let mut board = Board::new();
        let before = board.free().len();

        board.set((10, 12), true);
        assert!(board.get((10, 12)));
        assert!(!board.free().contains((10, 12)));
        assert_eq!(board.free().len(), before - 1);

        board.set((10, 12), false);
        assert!(!board.get((10, 12)));
        assert!(board.free().contains((10, 12)));
        assert_eq!(board.free().len(), before);
    }

    #[test]
    fn border_cells_never_enter_the_pool() {
        let mut board = Board::new();
        let before = board.free().len();

        board.set((1, 1), true);
        assert!(board.get((1, 1)));
        board.set((1, 1), false);
        board.free_mut().add((0, 20));
        board.free_mut().add((39, 39));

        assert_eq!(board.free().len(), before);
        assert!(!board.free().contains((1, 1)));
    }

    #[test]
    fn border_predicate_matches_outer_ring() {
        let bounds = Bounds::new(BOARD_SIZE, BOARD_PADDING);
        assert!(bounds.is_border((0, 20)));
        assert!(bounds.is_border((20, 39)));
        assert!(!bounds.is_border((1, 1)));
        assert!(!bounds.is_border((38, 38)));
    }

    #[test]
    fn pick_random_never_returns_occupied_cell() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::with_bounds(Bounds::new(8, 2));

        // Interior is 4x4; fill all but one cell
        for y in 2..6 {
            for x in 2..6 {
                if (x, y) != (4, 3) {
                    board.set((x, y), true);
                }
            }
        }

        for _ in 0..20 {
            assert_eq!(board.free().pick_random(&mut rng), Some((4, 3)));
        }

        board.set((4, 3), true);
        assert_eq!(board.free().pick_random(&mut rng), None);
    }
}
