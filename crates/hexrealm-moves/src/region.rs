//! Region resource moves.

use hexrealm_core::{Pos, RegionRes, RegionVar};
use hexrealm_map::Map;

use crate::kind::Revertible;

/// Run `f` on the resources of the region at `pos`, if there is one.
///
/// Returns whether a region was found.
pub(crate) fn with_res(map: &Map, pos: Pos, f: impl FnOnce(&mut RegionRes)) -> bool {
    match map.region_at(pos) {
        Some(region) => {
            f(&mut region.get_mut().res);
            true
        }
        None => {
            tracing::trace!(%pos, "no region to charge");
            false
        }
    }
}

/// Overwrite the resources, building counters and elimination flag of the
/// region at `pos`.
///
/// Income and tile count are left alone.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionChange {
    /// Any member tile of the region.
    pub pos: Pos,
    /// New resources.
    pub res: RegionRes,
    /// New building counters.
    pub var: RegionVar,
    /// New elimination flag.
    pub dead: bool,
    prev: Option<(RegionRes, RegionVar, bool)>,
}

impl RegionChange {
    /// Create the move.
    pub fn new(pos: Pos, res: RegionRes, var: RegionVar, dead: bool) -> Self {
        Self {
            pos,
            res,
            var,
            dead,
            prev: None,
        }
    }
}

impl Revertible for RegionChange {
    fn apply(&mut self, map: &mut Map) {
        let Some(region) = map.region_at(self.pos) else {
            tracing::trace!(pos = %self.pos, "region change without a region");
            return;
        };
        let mut r = region.get_mut();
        self.prev = Some((r.res, r.var, r.dead));
        r.res = self.res;
        r.var = self.var;
        r.dead = self.dead;
    }

    fn revert(&mut self, map: &mut Map) {
        let Some((res, var, dead)) = self.prev.take() else {
            return;
        };
        if let Some(region) = map.region_at(self.pos) {
            let mut r = region.get_mut();
            r.res = res;
            r.var = var;
            r.dead = dead;
        }
    }
}
