//! Map fingerprinting for desync detection.
//!
//! Uses FNV-1a for fast, deterministic hashing of game state. The hash is
//! not cryptographically secure; peers compare it after each move to
//! notice divergence early.

use hexrealm_map::Map;

use crate::codec::{encode_ent_state, encode_region};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash the observable state of a map.
///
/// Covers the map size and, for every tile in row-major order, its
/// terrain, owner, occupant record and the aggregates of its region.
/// Region identity and tile elevation are not covered, so two maps that
/// differ only in which pool slot a region lives in hash the same.
pub fn state_hash(map: &Map) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_bytes(hash, &map.width().to_be_bytes());
    hash = fnv1a_bytes(hash, &map.height().to_be_bytes());

    let mut buf = Vec::new();
    for pos in map.positions() {
        let Some(hex) = map.at(pos) else {
            continue;
        };
        buf.clear();
        buf.push(hex.kind as u8);
        buf.push(hex.team as u8);
        encode_ent_state(&mut buf, &map.entity(pos));
        match hex.region() {
            Some(region) => {
                let region = region.get();
                buf.push(1);
                encode_region(&mut buf, &region);
                buf.push(region.dead as u8);
            }
            None => buf.push(0),
        }
        hash = fnv1a_bytes(hash, &buf);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexrealm_core::{Pos, RegionRes, TroopType};
    use hexrealm_test_utils::fixtures::{duel_builder, duel_map};

    #[test]
    fn equal_maps_hash_equal() {
        assert_eq!(state_hash(&duel_map()), state_hash(&duel_map()));
        let map = duel_map();
        assert_eq!(state_hash(&map), state_hash(&map.clone()));
    }

    #[test]
    fn occupants_and_resources_change_the_hash() {
        let base = state_hash(&duel_map());
        let with_troop = duel_builder()
            .with_troop(TroopType::Farmer, Pos::new(1, 1))
            .finish();
        assert_ne!(state_hash(&with_troop), base);

        let richer = duel_builder()
            .resources(RegionRes {
                money: 101,
                berry: 60,
                peach: 20,
            })
            .finish();
        assert_ne!(state_hash(&richer), base);
    }

    #[test]
    fn empty_map_hash_is_not_the_offset() {
        let map = hexrealm_test_utils::TestMapBuilder::new(2, 2).finish();
        assert_ne!(state_hash(&map), FNV_OFFSET);
    }
}
