//! Benchmark profiles for the hexrealm game core.
//!
//! - [`skirmish_profile`]: 32x24 board, four team bands, troops every fourth row
//! - [`campaign_profile`]: 128x96 board with the same layout
//! - [`march_script`]: a deterministic list of moves for a profile board

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use hexrealm_core::{PlantType, Pos, RegionRes, Team, TroopType};
use hexrealm_map::Map;
use hexrealm_moves::{Move, PlantMod, TroopHeal, TroopMove};
use hexrealm_test_utils::TestMapBuilder;

const BANDS: [Team; 4] = [Team::Red, Team::Yellow, Team::Aqua, Team::Blue];

const RES: RegionRes = RegionRes {
    money: 1_000,
    berry: 500,
    peach: 100,
};

/// Build a skirmish board: 32x24 (about 750 tiles).
pub fn skirmish_profile() -> Map {
    banded(32, 24)
}

/// Build a campaign board: 128x96 (about 12K tiles).
///
/// Same layout as [`skirmish_profile`] at 16x the tile count.
pub fn campaign_profile() -> Map {
    banded(128, 96)
}

// Troops stand on rows 1, 5, 9, ...; berry bushes two rows below.
fn banded(width: u32, height: u32) -> Map {
    let mut builder = TestMapBuilder::new(width, height)
        .bands(&BANDS)
        .resources(RES);
    for y in (1..height as i32).step_by(4) {
        for x in 0..width as i32 - 1 {
            builder = builder.with_troop(troop_for(x), Pos::new(x, y));
            if y + 2 < height as i32 {
                builder = builder.with_plant(PlantType::Berry, Pos::new(x, y + 2));
            }
        }
    }
    builder.finish()
}

fn troop_for(x: i32) -> TroopType {
    match x % 3 {
        0 => TroopType::Knight,
        1 => TroopType::Archer,
        _ => TroopType::Spearman,
    }
}

/// `steps` moves that walk troops down one row, heal around them and
/// harvest the bushes below. Meant for boards built by this module.
pub fn march_script(map: &Map, steps: usize) -> Vec<Move> {
    let troops = map.troops();
    if troops.is_empty() {
        return Vec::new();
    }
    (0..steps)
        .map(|i| {
            let from = troops[i % troops.len()].entity.pos;
            match i % 3 {
                0 => Move::new(TroopMove::new(from, Pos::new(from.x, from.y + 1))),
                1 => Move::new(TroopHeal::new(from, 3, 2, team_of(map, from))),
                _ => Move::new(PlantMod::new(Pos::new(from.x, from.y + 2), 2)),
            }
        })
        .collect()
}

fn team_of(map: &Map, pos: Pos) -> Team {
    map.at(pos).map(|h| h.team).unwrap_or_default()
}
