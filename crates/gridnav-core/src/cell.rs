//! Grid-absolute cell coordinates and rectangular map bounds.

use crate::direction::Direction;
use crate::error::GridError;
use std::fmt;

/// A grid-absolute cell coordinate.
///
/// Equality, hashing and ordering are by value. Positive `y` is north,
/// matching [`Direction::offset`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row, growing northwards.
    pub y: i32,
}

impl Cell {
    /// Create a cell at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell in direction `d` (`self` for `Center`).
    pub fn add(self, d: Direction) -> Self {
        let (dx, dy) = d.offset();
        self.translate(dx, dy)
    }

    /// Offset by an arbitrary vector.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Chebyshev (L-inf) distance: the number of 8-connected moves between cells.
    pub fn chebyshev(self, other: Cell) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }

    /// Squared Euclidean distance.
    pub fn distance_squared(self, other: Cell) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    /// The compass direction that best approximates the vector to `other`.
    ///
    /// See [`Direction::toward`].
    pub fn direction_to(self, other: Cell) -> Direction {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        // Halving both components keeps the angle when they overflow i32.
        match (i32::try_from(dx), i32::try_from(dy)) {
            (Ok(dx), Ok(dy)) => Direction::toward(dx, dy),
            _ => Direction::toward((dx / 2) as i32, (dy / 2) as i32),
        }
    }

    /// `true` if `other` is one of the eight neighbours of `self`.
    pub fn is_adjacent_to(self, other: Cell) -> bool {
        self != other && self.chebyshev(other) == 1
    }

    /// The eight neighbours in enumeration order (N, NE, E, SE, S, SW, W, NW).
    pub fn neighbours(self) -> [Cell; 8] {
        Direction::ALL.map(|d| self.add(d))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An inclusive axis-aligned rectangle of cells: the extent of a map.
///
/// Bounds are fixed for a match. Engine maps start at `(0, 0)`; test maps
/// may sit anywhere, including negative coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    min: Cell,
    max: Cell,
}

impl Bounds {
    /// Maximum extent per axis, so that widths fit in `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Bounds spanning `min..=max` on both axes.
    ///
    /// Returns `Err(GridError::InvertedBounds)` if `min` exceeds `max` on
    /// either axis, or `Err(GridError::DimensionTooLarge)` if an axis spans
    /// more than [`MAX_DIM`](Self::MAX_DIM) cells.
    pub fn new(min: Cell, max: Cell) -> Result<Self, GridError> {
        if min.x > max.x || min.y > max.y {
            return Err(GridError::InvertedBounds { min, max });
        }
        let width = u64::from(max.x.abs_diff(min.x)) + 1;
        let height = u64::from(max.y.abs_diff(min.y)) + 1;
        if width > u64::from(Self::MAX_DIM) {
            return Err(GridError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > u64::from(Self::MAX_DIM) {
            return Err(GridError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { min, max })
    }

    /// Bounds `(0, 0)..=(width - 1, height - 1)`.
    ///
    /// Returns `Err(GridError::EmptyBounds)` if either dimension is 0.
    pub fn from_size(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyBounds);
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            let (name, value) = if width > Self::MAX_DIM {
                ("width", width)
            } else {
                ("height", height)
            };
            return Err(GridError::DimensionTooLarge {
                name,
                value: u64::from(value),
                max: Self::MAX_DIM,
            });
        }
        Self::new(
            Cell::new(0, 0),
            Cell::new(width as i32 - 1, height as i32 - 1),
        )
    }

    /// South-west corner.
    pub fn min(&self) -> Cell {
        self.min
    }

    /// North-east corner.
    pub fn max(&self) -> Cell {
        self.max
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.max.x.abs_diff(self.min.x) + 1
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.max.y.abs_diff(self.min.y) + 1
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// `true` if `cell` lies inside the bounds.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Check that `cell` is in bounds.
    pub fn check(&self, cell: Cell) -> Result<(), GridError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GridError::CellOutOfBounds {
                cell,
                bounds: *self,
            })
        }
    }

    /// Row-major index of an in-bounds cell, counting from `min`.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let col = cell.x.abs_diff(self.min.x) as usize;
        let row = cell.y.abs_diff(self.min.y) as usize;
        Some(row * self.width() as usize + col)
    }

    /// Nearest in-bounds cell.
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(self.min.x, self.max.x),
            cell.y.clamp(self.min.y, self.max.y),
        )
    }

    /// The four corners: SW, SE, NE, NW.
    pub fn corners(&self) -> [Cell; 4] {
        [
            self.min,
            Cell::new(self.max.x, self.min.y),
            self.max,
            Cell::new(self.min.x, self.max.y),
        ]
    }

    /// Centre cell, rounding towards `min`.
    pub fn center(&self) -> Cell {
        let cx = (i64::from(self.min.x) + i64::from(self.max.x)).div_euclid(2);
        let cy = (i64::from(self.min.y) + i64::from(self.max.y)).div_euclid(2);
        Cell::new(cx as i32, cy as i32)
    }

    /// All cells in row-major order, south row first.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Cell::new(x, y)))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
