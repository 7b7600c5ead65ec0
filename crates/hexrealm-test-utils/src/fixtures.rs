//! Ready-made maps and a state digest.
//!
//! - [`duel_map`]: an 8x6 board split between red and blue.
//! - [`digest`]: a comparable snapshot of everything a move may touch.

use hexrealm_core::{EntState, HexType, Pos, RegionRes, Team};
use hexrealm_map::{Map, Region};

use crate::TestMapBuilder;

/// Resources every region of [`duel_map`] starts with.
pub const DUEL_RES: RegionRes = RegionRes {
    money: 100,
    berry: 60,
    peach: 20,
};

/// 8x6 ground board: columns 0..4 red, 4..8 blue.
pub fn duel_builder() -> TestMapBuilder {
    TestMapBuilder::new(8, 6)
        .bands(&[Team::Red, Team::Blue])
        .resources(DUEL_RES)
}

/// [`duel_builder`] with nothing placed.
pub fn duel_map() -> Map {
    duel_builder().finish()
}

/// State of one tile, with its region compared by value.
#[derive(Clone, Debug, PartialEq)]
pub struct TileDigest {
    pub pos: Pos,
    pub kind: HexType,
    pub team: Team,
    pub occupant: EntState,
    pub region: Option<Region>,
}

/// Every tile's digest, row-major.
///
/// Two maps with equal digests agree on terrain, owners, occupants and
/// the value of every tile's region. Region identity is not compared.
pub fn digest(map: &Map) -> Vec<TileDigest> {
    map.positions()
        .filter_map(|pos| {
            let hex = map.at(pos)?;
            Some(TileDigest {
                pos,
                kind: hex.kind,
                team: hex.team,
                occupant: map.entity(pos),
                region: hex.region().map(|r| r.get().clone()),
            })
        })
        .collect()
}
