//! Hand-drawn scenario maps.
//!
//! Each scenario marks the start with `S` and the target with `T`. The
//! agent is not placed; [`Scenario::driver`] does that.

use gridnav_core::{AgentId, Bounds, Cell};
use gridnav_nav::Navigator;
use gridnav_space::{AsciiMap, GridMap, SpaceError};

use crate::driver::Driver;

/// A map plus one agent's start and target.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub map: GridMap,
    pub start: Cell,
    pub target: Cell,
}

impl Scenario {
    /// Parse an ASCII scenario with `S` and `T` markers.
    pub fn parse(name: &'static str, text: &str) -> Result<Self, SpaceError> {
        let parsed = AsciiMap::parse(text)?;
        Ok(Self {
            name,
            start: parsed.require('S')?,
            target: parsed.require('T')?,
            map: parsed.map,
        })
    }

    /// A single-agent [`Driver`] with `nav` placed at the start as
    /// [`AgentId(1)`](AgentId).
    pub fn driver(&self, nav: Navigator) -> Result<Driver, SpaceError> {
        let mut driver = Driver::new(self.map.clone());
        driver.add_agent(AgentId(1), self.start, self.target, nav)?;
        Ok(driver)
    }
}

pub const OPEN_FIELD: &str = r"
    ............
    ..........T.
    ............
    ............
    ............
    ............
    ............
    .S..........
    ............
";

/// A 3x3 block squarely between start and target.
pub const PILLAR: &str = r"
    ............
    ............
    ............
    ....###.....
    .S..###...T.
    ....###.....
    ............
    ............
    ............
";

/// A cup opening west with the agent inside and the target east.
pub const CUP: &str = r"
    ............
    ............
    ...#####....
    .......#....
    .....S.#..T.
    .......#....
    ...#####....
    ............
    ............
";

/// The agent is walled in on all eight sides.
pub const ENCLOSED: &str = r"
    .....
    .###.
    .#S#.
    .###.
    ....T
";

pub fn open_field() -> Result<Scenario, SpaceError> {
    Scenario::parse("open_field", OPEN_FIELD)
}

pub fn pillar() -> Result<Scenario, SpaceError> {
    Scenario::parse("pillar", PILLAR)
}

pub fn cup() -> Result<Scenario, SpaceError> {
    Scenario::parse("cup", CUP)
}

pub fn enclosed() -> Result<Scenario, SpaceError> {
    Scenario::parse("enclosed", ENCLOSED)
}

/// Start `(0, 0)`, target `(5, 0)`, and a wall at `x = 2` spanning
/// `y = -3..=3` on a map centred near the origin.
pub fn wall() -> Result<Scenario, SpaceError> {
    let mut map = GridMap::with_bounds(Bounds::new(Cell::new(-6, -6), Cell::new(8, 8))?);
    map.set_walls((-3..=3).map(|y| Cell::new(2, y)))?;
    Ok(Scenario {
        name: "wall",
        map,
        start: Cell::new(0, 0),
        target: Cell::new(5, 0),
    })
}

/// Every named scenario in which a lone agent can reach its target.
pub fn reachable() -> Result<Vec<Scenario>, SpaceError> {
    Ok(vec![open_field()?, pillar()?, cup()?, wall()?])
}
