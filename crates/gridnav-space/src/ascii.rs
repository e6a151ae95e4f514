//! Hand-drawn ASCII maps.
//!
//! Each non-blank line is one row; the first line is the northernmost row.
//! `#` is a wall, `.` is open floor, and any other printable character is
//! open floor carrying a named marker (start, target, agent...). Leading
//! and trailing blank lines and per-line indentation are ignored, so maps
//! can be written inline in raw string literals.

use crate::error::SpaceError;
use crate::grid::GridMap;
use gridnav_core::{Bounds, Cell};
use indexmap::IndexMap;

/// A parsed ASCII map: the grid plus every marker cell, by character.
#[derive(Debug, Clone)]
pub struct AsciiMap {
    /// The parsed walls (no agents are placed).
    pub map: GridMap,
    /// Marker cells in reading order (north row first, west to east).
    pub markers: IndexMap<char, Vec<Cell>>,
}

impl AsciiMap {
    /// Parse `text` with its south-west corner at `(0, 0)`.
    pub fn parse(text: &str) -> Result<Self, SpaceError> {
        Self::parse_at(text, Cell::new(0, 0))
    }

    /// Parse `text` with its south-west corner at `origin`.
    pub fn parse_at(text: &str, origin: Cell) -> Result<Self, SpaceError> {
        let rows: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        let Some(&(first_line, first)) = rows.first() else {
            return Err(SpaceError::Parse {
                line: 1,
                reason: "map has no rows".into(),
            });
        };
        let width = first.chars().count();
        for &(line, row) in &rows {
            let w = row.chars().count();
            if w != width {
                return Err(SpaceError::Parse {
                    line,
                    reason: format!("row has {w} cells, expected {width} (from line {first_line})"),
                });
            }
        }

        let too_big = |line| SpaceError::Parse {
            line,
            reason: "map too large".into(),
        };
        let width = i32::try_from(width).map_err(|_| too_big(first_line))?;
        let height = i32::try_from(rows.len()).map_err(|_| too_big(first_line))?;
        let max = Cell::new(
            origin.x.checked_add(width - 1).ok_or_else(|| too_big(first_line))?,
            origin.y.checked_add(height - 1).ok_or_else(|| too_big(first_line))?,
        );
        let mut map = GridMap::with_bounds(Bounds::new(origin, max)?);
        let mut markers: IndexMap<char, Vec<Cell>> = IndexMap::new();

        for (row_idx, &(line, row)) in rows.iter().enumerate() {
            let y = max.y - row_idx as i32;
            for (col, ch) in row.chars().enumerate() {
                let cell = Cell::new(origin.x + col as i32, y);
                match ch {
                    '#' => map.set_wall(cell)?,
                    '.' => {}
                    ch if ch.is_whitespace() || ch.is_control() => {
                        return Err(SpaceError::Parse {
                            line,
                            reason: format!("unexpected character {ch:?} at column {}", col + 1),
                        });
                    }
                    ch => markers.entry(ch).or_default().push(cell),
                }
            }
        }
        Ok(Self { map, markers })
    }

    /// The first cell carrying `marker`, if any.
    pub fn marker(&self, marker: char) -> Option<Cell> {
        self.markers.get(&marker).and_then(|cells| cells.first().copied())
    }

    /// The first cell carrying `marker`, or a parse error naming it.
    pub fn require(&self, marker: char) -> Result<Cell, SpaceError> {
        self.marker(marker).ok_or_else(|| SpaceError::Parse {
            line: 0,
            reason: format!("marker {marker:?} not found"),
        })
    }
}

impl GridMap {
    /// Render the map as ASCII: `#` walls, `@` agents, `.` floor.
    ///
    /// The output parses back into the same walls.
    pub fn to_ascii(&self) -> String {
        let b = self.bounds();
        let mut out = String::with_capacity(b.cell_count() + b.height() as usize);
        for y in (b.min().y..=b.max().y).rev() {
            for x in b.min().x..=b.max().x {
                let cell = Cell::new(x, y);
                out.push(if self.is_wall(cell) {
                    '#'
                } else if self.occupant_at(cell).is_some() {
                    '@'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = r"
        #####
        #S.T#
        #.#.#
        #####
    ";

    #[test]
    fn top_row_is_north() {
        let parsed = AsciiMap::parse(ROOM).unwrap();
        let b = parsed.map.bounds();
        assert_eq!((b.width(), b.height()), (5, 4));
        assert_eq!(parsed.marker('S'), Some(Cell::new(1, 2)));
        assert_eq!(parsed.marker('T'), Some(Cell::new(3, 2)));
        assert!(parsed.map.is_wall(Cell::new(2, 1)));
        assert!(!parsed.map.is_wall(Cell::new(1, 1)));
    }

    #[test]
    fn markers_are_open_floor() {
        let parsed = AsciiMap::parse(ROOM).unwrap();
        assert!(parsed.map.is_passable(parsed.marker('S').unwrap()));
    }

    #[test]
    fn parse_at_shifts_origin() {
        let parsed = AsciiMap::parse_at("a.\n.#", Cell::new(-3, 10)).unwrap();
        assert_eq!(parsed.marker('a'), Some(Cell::new(-3, 11)));
        assert!(parsed.map.is_wall(Cell::new(-2, 10)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        match AsciiMap::parse("...\n..\n...") {
            Err(SpaceError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(
            AsciiMap::parse("  \n\n"),
            Err(SpaceError::Parse { .. })
        ));
    }

    #[test]
    fn require_reports_missing_marker() {
        let parsed = AsciiMap::parse("..").unwrap();
        assert!(parsed.require('Z').is_err());
    }

    #[test]
    fn to_ascii_round_trips_walls() {
        let parsed = AsciiMap::parse(ROOM).unwrap();
        let again = AsciiMap::parse(&parsed.map.to_ascii()).unwrap();
        for cell in parsed.map.bounds().iter() {
            assert_eq!(parsed.map.is_wall(cell), again.map.is_wall(cell), "{cell}");
        }
    }
}
