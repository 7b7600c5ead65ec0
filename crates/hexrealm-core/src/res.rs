//! Region resource and counter records.
//!
//! These are the sub-records of a region that travel on the wire on their
//! own: in map snapshots, and as the captured payload of region-patching
//! moves.

use std::ops::{AddAssign, SubAssign};

/// Spendable resources of a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegionRes {
    /// Money.
    pub money: i32,
    /// Berries.
    pub berry: i32,
    /// Peaches.
    pub peach: i32,
}

impl AddAssign for RegionRes {
    fn add_assign(&mut self, rhs: Self) {
        self.money += rhs.money;
        self.berry += rhs.berry;
        self.peach += rhs.peach;
    }
}

impl SubAssign for RegionRes {
    fn sub_assign(&mut self, rhs: Self) {
        self.money -= rhs.money;
        self.berry -= rhs.berry;
        self.peach -= rhs.peach;
    }
}

/// Building counters of a region.
///
/// Derived from the region's tiles by the join/leave protocol. A region
/// change move may overwrite them wholesale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegionVar {
    /// Farms built.
    pub farms: i32,
    /// Tents built.
    pub tents: i32,
}
