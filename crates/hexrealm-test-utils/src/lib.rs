//! Test utilities for hexrealm development.
//!
//! Provides [`TestMapBuilder`] for constructing boards with team bands,
//! resources and entities, and [`fixtures`] with ready-made maps and a
//! state digest for apply/revert identity checks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use hexrealm_core::{
    Build, BuildType, HexType, Plant, PlantType, Pos, RegionRes, Team, Troop, TroopType,
};
use hexrealm_map::{Hex, Map, MapConfig};

/// Builder for constructing test maps with preconfigured state.
///
/// Tiles are laid out in equal-width vertical bands, one per team, left to
/// right. Regions are enumerated from the bands and every region receives
/// the configured resources. Entities are placed last so their region
/// counters are tracked.
pub struct TestMapBuilder {
    width: u32,
    height: u32,
    terrain: HexType,
    bands: Vec<Team>,
    water: Vec<Pos>,
    res: RegionRes,
    troops: Vec<Troop>,
    builds: Vec<Build>,
    plants: Vec<Plant>,
}

impl TestMapBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            terrain: HexType::Ground,
            bands: vec![Team::Unclaimed],
            water: Vec::new(),
            res: RegionRes::default(),
            troops: Vec::new(),
            builds: Vec::new(),
            plants: Vec::new(),
        }
    }

    pub fn terrain(mut self, terrain: HexType) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn bands(mut self, teams: &[Team]) -> Self {
        self.bands = teams.to_vec();
        self
    }

    /// Turn a single tile into unclaimed water.
    pub fn water(mut self, pos: Pos) -> Self {
        self.water.push(pos);
        self
    }

    pub fn resources(mut self, res: RegionRes) -> Self {
        self.res = res;
        self
    }

    pub fn with_troop(mut self, kind: TroopType, pos: Pos) -> Self {
        self.troops.push(Troop::new(kind, pos));
        self
    }

    pub fn with_build(mut self, kind: BuildType, pos: Pos) -> Self {
        self.builds.push(Build::new(kind, pos));
        self
    }

    pub fn with_plant(mut self, kind: PlantType, pos: Pos) -> Self {
        self.plants.push(Plant::new(kind, pos));
        self
    }

    /// Team of the band column `x` falls in.
    pub fn team_at(&self, x: i32) -> Team {
        let band = (x.max(0) as usize * self.bands.len()) / self.width.max(1) as usize;
        self.bands[band.min(self.bands.len() - 1)]
    }

    pub fn finish(self) -> Map {
        let mut map =
            Map::new(&MapConfig::new(self.width, self.height)).expect("valid test map size");
        let positions: Vec<Pos> = map.positions().collect();
        for pos in positions {
            let hex = if self.water.contains(&pos) {
                Hex::new(HexType::Water, Team::Unclaimed)
            } else {
                Hex::new(self.terrain, self.team_at(pos.x))
            };
            *map.at_mut(pos).expect("position from positions()") = hex;
        }
        map.enumerate_regions();
        for (_, region) in map.regions() {
            region.get_mut().res = self.res;
        }
        for troop in self.troops {
            map.set_troop(troop);
        }
        for build in self.builds {
            map.set_build(build);
        }
        for plant in self.plants {
            map.set_plant(plant);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_split_columns_evenly() {
        let builder = TestMapBuilder::new(8, 4).bands(&[Team::Red, Team::Blue]);
        assert_eq!(builder.team_at(0), Team::Red);
        assert_eq!(builder.team_at(3), Team::Red);
        assert_eq!(builder.team_at(4), Team::Blue);
        assert_eq!(builder.team_at(7), Team::Blue);
    }

    #[test]
    fn finished_map_has_consistent_regions() {
        let map = TestMapBuilder::new(8, 4)
            .bands(&[Team::Red, Team::Blue])
            .resources(RegionRes {
                money: 5,
                ..RegionRes::default()
            })
            .with_build(BuildType::Farm, Pos::new(1, 1))
            .finish();
        assert_eq!(map.region_count(), 2);
        assert!(map.check_regions().is_ok());
        let red = map.region_at(Pos::new(1, 1)).unwrap();
        assert_eq!(red.get().res.money, 5);
        assert_eq!(red.get().var.farms, 1);
    }
}
