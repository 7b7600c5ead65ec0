//! Region records.

use hexrealm_core::{RegionRes, RegionVar, Team};
use hexrealm_pool::RefPool;

/// A connected group of same-team tiles sharing one purse.
///
/// `tiles`, `income` and `var` are aggregates over the member tiles. They
/// change only through [`Hex::join`](crate::Hex::join) and
/// [`Hex::leave`](crate::Hex::leave); [`Map::check_regions`](crate::Map::check_regions)
/// recounts them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// Spendable resources.
    pub res: RegionRes,
    /// Building counters.
    pub var: RegionVar,
    /// Money gained at the start of the next turn.
    pub income: i32,
    /// Number of member tiles.
    pub tiles: i32,
    /// Owning team.
    pub team: Team,
    /// Whether the region has been eliminated.
    pub dead: bool,
}

impl Region {
    /// An empty region for `team` holding `res`.
    pub fn new(team: Team, res: RegionRes) -> Self {
        Self {
            res,
            team,
            ..Self::default()
        }
    }
}

/// Pool every region of a map lives in.
pub type Regions = RefPool<Region>;
