//! The read-only world view a navigator consults each tick.

use crate::cell::{Bounds, Cell};

/// What an agent can learn about one sensed cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellObservation {
    /// The cell lies inside the map bounds.
    pub on_map: bool,
    /// The cell is not a wall (false when off-map).
    pub passable: bool,
    /// Another agent currently stands on the cell.
    pub occupied: bool,
}

impl CellObservation {
    /// `true` if an agent could move into this cell right now.
    pub fn is_free(&self) -> bool {
        self.on_map && self.passable && !self.occupied
    }
}

/// Capability surface the navigation layer is allowed to query.
///
/// Implementations answer for the current tick only. Callers must check
/// [`can_sense`](Self::can_sense) before asking about passability or
/// occupancy; answers for unsensed cells are unspecified.
///
/// Map bounds are global knowledge and may be queried for any cell.
pub trait GridOracle {
    /// Extent of the map.
    fn bounds(&self) -> Bounds;

    /// `true` if the agent can currently perceive `cell`.
    fn can_sense(&self, cell: Cell) -> bool;

    /// `true` if `cell` lies inside the map.
    fn is_on_map(&self, cell: Cell) -> bool {
        self.bounds().contains(cell)
    }

    /// `true` if `cell` is on the map and not a wall.
    ///
    /// Only meaningful for sensed cells.
    fn is_passable(&self, cell: Cell) -> bool;

    /// `true` if another agent stands on `cell`.
    ///
    /// Only meaningful for sensed cells.
    fn is_occupied(&self, cell: Cell) -> bool;

    /// Everything known about a sensed cell, or `None` if `cell` is not
    /// sensed. Never queries passability of an unsensed cell.
    fn observe(&self, cell: Cell) -> Option<CellObservation> {
        if !self.can_sense(cell) {
            return None;
        }
        let on_map = self.is_on_map(cell);
        Some(CellObservation {
            on_map,
            passable: on_map && self.is_passable(cell),
            occupied: on_map && self.is_occupied(cell),
        })
    }

    /// `true` if `cell` is sensed, on the map, passable and unoccupied.
    fn is_free(&self, cell: Cell) -> bool {
        self.observe(cell).is_some_and(|o| o.is_free())
    }
}

impl<T: GridOracle + ?Sized> GridOracle for &T {
    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn can_sense(&self, cell: Cell) -> bool {
        (**self).can_sense(cell)
    }

    fn is_on_map(&self, cell: Cell) -> bool {
        (**self).is_on_map(cell)
    }

    fn is_passable(&self, cell: Cell) -> bool {
        (**self).is_passable(cell)
    }

    fn is_occupied(&self, cell: Cell) -> bool {
        (**self).is_occupied(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 3x3 map with a wall at the centre, sensing only the south row.
    struct Tiny;

    impl GridOracle for Tiny {
        fn bounds(&self) -> Bounds {
            Bounds::from_size(3, 3).unwrap()
        }
        fn can_sense(&self, cell: Cell) -> bool {
            cell.y <= 1
        }
        fn is_passable(&self, cell: Cell) -> bool {
            if cell.y > 1 {
                panic!("queried unsensed cell {cell}");
            }
            cell != Cell::new(1, 1)
        }
        fn is_occupied(&self, cell: Cell) -> bool {
            cell == Cell::new(2, 0)
        }
    }

    #[test]
    fn observe_skips_unsensed_cells() {
        assert_eq!(Tiny.observe(Cell::new(0, 2)), None);
    }

    #[test]
    fn observe_reports_walls_and_occupants() {
        let wall = Tiny.observe(Cell::new(1, 1)).unwrap();
        assert!(wall.on_map && !wall.passable);
        let busy = Tiny.observe(Cell::new(2, 0)).unwrap();
        assert!(busy.passable && busy.occupied && !busy.is_free());
        assert!(Tiny.is_free(Cell::new(0, 0)));
    }

    #[test]
    fn off_map_cells_are_never_free() {
        let off = Tiny.observe(Cell::new(-1, 0)).unwrap();
        assert!(!off.on_map && !off.passable);
        assert!(!Tiny.is_free(Cell::new(-1, 0)));
    }

    #[test]
    fn references_forward_to_the_oracle() {
        let r = &Tiny;
        assert!(r.is_free(Cell::new(0, 1)));
        assert_eq!(r.bounds().cell_count(), 9);
    }
}
