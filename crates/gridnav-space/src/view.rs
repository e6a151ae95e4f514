//! Radius-limited oracle over a [`GridMap`].

use crate::error::SpaceError;
use crate::grid::GridMap;
use gridnav_core::{AgentId, Bounds, Cell, GridOracle};

/// Sensing radius (squared Euclidean) used by most unit types.
pub const DEFAULT_RADIUS_SQUARED: u64 = 20;

/// What one agent can perceive of a [`GridMap`] this tick.
///
/// A cell is sensed when its squared Euclidean distance from the view's
/// centre is at most `radius_squared`. Passability or occupancy queries
/// for unsensed cells are contract violations: they are answered "not
/// passable" / "not occupied" and counted in [`violations`](Self::violations).
///
/// The viewing agent's own cell never reports as occupied.
#[derive(Debug)]
pub struct SensingView<'a> {
    map: &'a GridMap,
    center: Cell,
    radius_squared: u64,
    viewer: Option<AgentId>,
    violations: std::cell::Cell<u32>,
}

impl<'a> SensingView<'a> {
    /// A view centred on `center`.
    pub fn new(map: &'a GridMap, center: Cell, radius_squared: u64) -> Self {
        Self {
            map,
            center,
            radius_squared,
            viewer: None,
            violations: std::cell::Cell::new(0),
        }
    }

    /// A view from wherever `agent` stands.
    pub fn for_agent(
        map: &'a GridMap,
        agent: AgentId,
        radius_squared: u64,
    ) -> Result<Self, SpaceError> {
        let center = map
            .position_of(agent)
            .ok_or(SpaceError::UnknownAgent { agent })?;
        Ok(Self {
            viewer: Some(agent),
            ..Self::new(map, center, radius_squared)
        })
    }

    /// Centre of the sensing disc.
    pub fn center(&self) -> Cell {
        self.center
    }

    /// Squared sensing radius.
    pub fn radius_squared(&self) -> u64 {
        self.radius_squared
    }

    /// Number of passability/occupancy queries made for unsensed cells.
    pub fn violations(&self) -> u32 {
        self.violations.get()
    }

    /// The underlying map.
    pub fn map(&self) -> &'a GridMap {
        self.map
    }

    fn sensed_or_count(&self, cell: Cell) -> bool {
        if self.can_sense(cell) {
            true
        } else {
            self.violations.set(self.violations.get().saturating_add(1));
            false
        }
    }
}

impl GridOracle for SensingView<'_> {
    fn bounds(&self) -> Bounds {
        self.map.bounds()
    }

    fn can_sense(&self, cell: Cell) -> bool {
        self.center.distance_squared(cell) <= self.radius_squared
    }

    fn is_passable(&self, cell: Cell) -> bool {
        self.sensed_or_count(cell) && self.map.is_passable(cell)
    }

    fn is_occupied(&self, cell: Cell) -> bool {
        self.sensed_or_count(cell)
            && self
                .map
                .occupant_at(cell)
                .is_some_and(|a| Some(a) != self.viewer)
    }
}
