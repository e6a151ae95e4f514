//! Perimeter-following state for one obstacle encounter.
//!
//! A [`Trace`] starts when the straight move toward the target is blocked.
//! Each tick it walks the obstacle boundary keeping the obstacle on the
//! agent's right: try the current heading, otherwise rotate left until a
//! move is possible; after moving, turn right by 90° so the next tick
//! hugs the wall again. The [`StopPolicy`] decides when to hand control
//! back to direct stepping.

use crate::config::StopPolicy;
use crate::stepper::{can_move, step_toward};
use gridnav_core::{Cell, Direction, GridOracle};

/// Bookkeeping for a single perimeter trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    direction: Direction,
    origin: Cell,
    target: Cell,
    start_distance: u64,
    steps: u32,
    closest: Cell,
    closest_distance: u64,
    last_side: i8,
}

impl Trace {
    /// Start tracing at `origin`, heading straight for `target`.
    pub fn begin(origin: Cell, target: Cell) -> Self {
        let start_distance = origin.distance_squared(target);
        Self {
            direction: step_toward(origin, target),
            origin,
            target,
            start_distance,
            steps: 0,
            closest: origin,
            closest_distance: start_distance,
            last_side: 0,
        }
    }

    /// Heading that will be tried first next tick.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Where tracing began.
    pub fn origin(&self) -> Cell {
        self.origin
    }

    /// The cell being navigated toward.
    pub fn target(&self) -> Cell {
        self.target
    }

    /// Squared distance from origin to target.
    pub fn start_distance(&self) -> u64 {
        self.start_distance
    }

    /// Moves made so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Closest cell to the target recorded so far.
    pub fn closest(&self) -> Cell {
        self.closest
    }

    /// `true` if `policy` says the agent at `current` should leave the
    /// obstacle. Evaluate before [`record`](Self::record) for the tick.
    pub fn should_stop(&self, policy: StopPolicy, current: Cell) -> bool {
        let closer = current.distance_squared(self.target) < self.start_distance;
        match policy {
            StopPolicy::DistanceOnly => closer,
            StopPolicy::LineAndDistance => {
                closer
                    && (on_m_line(self.origin, self.target, current)
                        || self.crossed_m_line(current))
            }
            StopPolicy::ClosestPoint => self.steps > 0 && current == self.closest,
            StopPolicy::BoundingBox => {
                self.steps > 0 && in_rectangle(self.origin, self.target, current)
            }
        }
    }

    /// Update closest-point and m-line side bookkeeping for `current`.
    pub fn record(&mut self, current: Cell) {
        let distance = current.distance_squared(self.target);
        if distance < self.closest_distance {
            self.closest = current;
            self.closest_distance = distance;
        }
        let side = side_of(self.origin, self.target, current);
        if side != 0 {
            self.last_side = side;
        }
    }

    /// Pick this tick's perimeter move, or `None` if every neighbour is
    /// blocked. A failed sweep leaves the heading where it started.
    pub fn advance<O: GridOracle + ?Sized>(&mut self, oracle: &O, current: Cell) -> Option<Direction> {
        if !can_move(oracle, current, self.direction) {
            let found = (0..8).any(|_| {
                self.direction = self.direction.rotate_left();
                can_move(oracle, current, self.direction)
            });
            if !found {
                return None;
            }
        }
        let dir = self.direction;
        self.direction = dir.rotate_right().rotate_right();
        self.steps = self.steps.saturating_add(1);
        Some(dir)
    }

    /// Sign flip of the side of the origin→target line since the last
    /// recorded cell, near the segment.
    fn crossed_m_line(&self, current: Cell) -> bool {
        let side = side_of(self.origin, self.target, current);
        let lo = Cell::new(self.origin.x.min(self.target.x), self.origin.y.min(self.target.y));
        let hi = Cell::new(self.origin.x.max(self.target.x), self.origin.y.max(self.target.y));
        self.last_side != 0
            && side != 0
            && side != self.last_side
            && in_rectangle(lo.translate(-1, -1), hi.translate(1, 1), current)
    }
}

/// `true` if `p` lies in the closed rectangle with corners `a` and `b`.
pub fn in_rectangle(a: Cell, b: Cell, p: Cell) -> bool {
    a.x.min(b.x) <= p.x && p.x <= a.x.max(b.x) && a.y.min(b.y) <= p.y && p.y <= a.y.max(b.y)
}

/// Which side of the infinite line `a`→`b` the cell `p` is on:
/// `1` left, `-1` right, `0` on it.
fn side_of(a: Cell, b: Cell, p: Cell) -> i8 {
    let dx = i128::from(b.x) - i128::from(a.x);
    let dy = i128::from(b.y) - i128::from(a.y);
    let px = i128::from(p.x) - i128::from(a.x);
    let py = i128::from(p.y) - i128::from(a.y);
    (dx * py - dy * px).signum() as i8
}

/// `true` if `p` is on the 4-connected digital segment from `a` to `b`
/// (both ends included).
///
/// The segment is the Bresenham line with the corner cell added at every
/// minor-axis step, so no 8-connected path can cross it without landing
/// on one of its cells.
pub fn on_m_line(a: Cell, b: Cell, p: Cell) -> bool {
    if !in_rectangle(a, b, p) {
        return false;
    }
    let (px, py) = (i64::from(p.x), i64::from(p.y));
    let (mut x, mut y) = (i64::from(a.x), i64::from(a.y));
    let dx = i64::from(b.x) - x;
    let dy = i64::from(b.y) - y;
    let (sx, sy) = (dx.signum(), dy.signum());
    let (dx, dy) = (dx.abs(), dy.abs());
    let hit = |x: i64, y: i64| x == px && y == py;

    if dx > dy {
        let mut r = dx / 2;
        for _ in 0..dx {
            if hit(x, y) {
                return true;
            }
            x += sx;
            r += dy;
            if r >= dx {
                if hit(x, y) {
                    return true;
                }
                y += sy;
                r -= dx;
            }
        }
    } else {
        let mut r = dy / 2;
        for _ in 0..dy {
            if hit(x, y) {
                return true;
            }
            y += sy;
            r += dx;
            if r >= dy {
                if hit(x, y) {
                    return true;
                }
                x += sx;
                r -= dy;
            }
        }
    }
    hit(x, y)
}
