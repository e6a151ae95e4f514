//! One-move-closer stepping with left/right fallback.

use crate::ring::VisitedRing;
use gridnav_core::{Cell, Direction, GridOracle};

/// The compass direction that best approximates `to - from`.
///
/// `Center` when `from == to`. Following it repeatedly reduces the
/// Chebyshev distance by exactly one per step.
pub fn step_toward(from: Cell, to: Cell) -> Direction {
    from.direction_to(to)
}

/// `true` if the agent at `from` could move in `dir` this tick: the
/// destination is sensed, on the map, passable and unoccupied.
pub fn can_move<O: GridOracle + ?Sized>(oracle: &O, from: Cell, dir: Direction) -> bool {
    dir != Direction::Center && oracle.is_free(from.add(dir))
}

/// The straight direction toward `to`, if that move is possible.
pub fn direct_step<O: GridOracle + ?Sized>(oracle: &O, from: Cell, to: Cell) -> Option<Direction> {
    let dir = step_toward(from, to);
    can_move(oracle, from, dir).then_some(dir)
}

/// The straight direction rotated left, then right, skipping moves back
/// into recently visited cells.
pub fn fallback_step<O: GridOracle + ?Sized>(
    oracle: &O,
    from: Cell,
    to: Cell,
    visited: &VisitedRing,
) -> Option<Direction> {
    let dir = step_toward(from, to);
    if dir == Direction::Center {
        return None;
    }
    [dir.rotate_left(), dir.rotate_right()]
        .into_iter()
        .find(|d| !visited.contains(from.add(*d)) && can_move(oracle, from, *d))
}

/// `true` if the move in `dir` is blocked only by another agent standing
/// on an otherwise passable cell.
pub fn blocked_by_occupant<O: GridOracle + ?Sized>(oracle: &O, from: Cell, dir: Direction) -> bool {
    oracle
        .observe(from.add(dir))
        .is_some_and(|o| o.on_map && o.passable && o.occupied)
}
