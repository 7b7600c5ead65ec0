//! Breadth-first area search over the tile map.

use std::collections::VecDeque;

use hexrealm_core::Pos;

use crate::grid;
use crate::hex::Hex;
use crate::map::Map;

type Check<'a> = Box<dyn Fn(Pos, &Hex) -> bool + 'a>;

/// An area search from a center tile.
///
/// The search walks outwards ring by ring. `hop` decides which tiles it may
/// pass through; tiles failing `hop` are neither reported nor expanded.
/// `pass` decides which of the reached tiles are reported. The center is
/// reported when it passes, unless [`Spread::skip_origin`] was set; it is
/// never subject to `hop`.
///
/// `radius` counts the center as the first ring: radius 0 and 1 reach only
/// the center, radius 2 adds its neighbors, and so on. Reported order is
/// breadth-first, each ring in neighbor scan order of its parents.
///
/// # Examples
///
/// ```
/// use hexrealm_core::{HexType, Pos, Team};
/// use hexrealm_map::{Map, MapConfig, Spread};
///
/// let mut map = Map::new(&MapConfig::new(5, 5)).unwrap();
/// for pos in map.positions().collect::<Vec<_>>() {
///     map.at_mut(pos).unwrap().kind = HexType::Ground;
/// }
/// let ring = Spread::solid().collect(&map, Pos::new(2, 2), 2);
/// assert_eq!(ring.len(), 7);
/// assert_eq!(ring[0], Pos::new(2, 2));
/// ```
pub struct Spread<'a> {
    hop: Check<'a>,
    pass: Check<'a>,
    origin: bool,
}

impl<'a> Spread<'a> {
    /// Radius that never limits the search.
    pub const UNBOUNDED: u64 = u64::MAX;

    /// A search that passes through and reports every tile.
    pub fn new() -> Self {
        Self {
            hop: Box::new(|_, _| true),
            pass: Box::new(|_, _| true),
            origin: true,
        }
    }

    /// A search that only passes through solid tiles.
    pub fn solid() -> Self {
        Self::new().hop(|_, hex| hex.solid())
    }

    /// Restrict which tiles the search passes through.
    pub fn hop(mut self, check: impl Fn(Pos, &Hex) -> bool + 'a) -> Self {
        self.hop = Box::new(check);
        self
    }

    /// Restrict which reached tiles are reported.
    pub fn pass(mut self, check: impl Fn(Pos, &Hex) -> bool + 'a) -> Self {
        self.pass = Box::new(check);
        self
    }

    /// Never report the center tile.
    pub fn skip_origin(mut self) -> Self {
        self.origin = false;
        self
    }

    /// Run the search and return the reported positions.
    ///
    /// A center outside the map reports nothing.
    pub fn collect(&self, map: &Map, center: Pos, radius: u64) -> Vec<Pos> {
        let mut found = Vec::new();
        let Some(origin) = map.index(center) else {
            tracing::trace!(%center, "spread from outside the map");
            return found;
        };

        let mut visited = vec![false; map.cell_count()];
        visited[origin] = true;
        if self.origin && (self.pass)(center, &map.tiles[origin]) {
            found.push(center);
        }

        let mut queue = VecDeque::new();
        queue.push_back((center, radius));
        while let Some((pos, left)) = queue.pop_front() {
            if left <= 1 {
                continue;
            }
            for next in grid::neighbors(pos) {
                let Some(i) = map.index(next) else {
                    continue;
                };
                if visited[i] {
                    continue;
                }
                visited[i] = true;

                let hex = &map.tiles[i];
                if !(self.hop)(next, hex) {
                    continue;
                }
                if (self.pass)(next, hex) {
                    found.push(next);
                }
                queue.push_back((next, left - 1));
            }
        }
        found
    }
}

impl Default for Spread<'_> {
    fn default() -> Self {
        Self::new()
    }
}
