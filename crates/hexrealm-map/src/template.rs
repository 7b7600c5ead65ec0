//! Portable map description.
//!
//! A [`MapTemplate`] is what a map snapshot carries: terrain and owners,
//! entities, and the resources of each region keyed by one member tile.
//! Region aggregates are not part of it; they are rebuilt from the tiles.

use hexrealm_core::{Build, HexType, Plant, Pos, RegionRes, Team, Troop};

use crate::config::MapConfig;
use crate::error::MapError;
use crate::map::Map;

/// Terrain and owner of one storage cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HexBase {
    /// Terrain.
    pub kind: HexType,
    /// Owner.
    pub team: Team,
}

/// Resources of one region, located by any member tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionSeed {
    /// Region resources.
    pub res: RegionRes,
    /// A tile of the region.
    pub pos: Pos,
}

/// Everything needed to rebuild a map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapTemplate {
    /// Map title.
    pub name: String,
    /// Map author.
    pub author: String,
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// `width * height` cells, row-major.
    pub tiles: Vec<HexBase>,
    /// Troops.
    pub troops: Vec<Troop>,
    /// Buildings.
    pub builds: Vec<Build>,
    /// Plants.
    pub plants: Vec<Plant>,
    /// Region resources.
    pub regions: Vec<RegionSeed>,
}

impl Map {
    /// Describe this map as a template.
    pub fn to_template(&self) -> MapTemplate {
        MapTemplate {
            name: self.name.clone(),
            author: self.author.clone(),
            width: self.width() as u32,
            height: self.height() as u32,
            tiles: self
                .tiles
                .iter()
                .map(|h| HexBase {
                    kind: h.kind,
                    team: h.team,
                })
                .collect(),
            troops: self.troops(),
            builds: self.builds(),
            plants: self.plants(),
            regions: self
                .regions()
                .into_iter()
                .map(|(pos, r)| RegionSeed {
                    res: r.get().res,
                    pos,
                })
                .collect(),
        }
    }

    /// Build a map from a template.
    ///
    /// Regions are enumerated from the tiles, then each seed's resources
    /// are given to the region containing its tile. Seeds pointing at no
    /// region are skipped.
    pub fn from_template(template: &MapTemplate) -> Result<Self, MapError> {
        let config = MapConfig::new(template.width, template.height);
        let mut map = Map::new(&config)?;
        if template.tiles.len() != config.cell_count() {
            return Err(MapError::TemplateSize {
                expected: config.cell_count(),
                actual: template.tiles.len(),
            });
        }

        map.name = template.name.clone();
        map.author = template.author.clone();
        for (hex, base) in map.tiles.iter_mut().zip(&template.tiles) {
            hex.kind = base.kind;
            hex.team = base.team;
        }
        for troop in &template.troops {
            map.set_troop(troop.clone());
        }
        for build in &template.builds {
            map.set_build(build.clone());
        }
        for plant in &template.plants {
            map.set_plant(plant.clone());
        }

        map.enumerate_regions();
        for seed in &template.regions {
            match map.region_at(seed.pos) {
                Some(r) => {
                    r.get_mut().res = seed.res;
                }
                None => tracing::debug!(pos = %seed.pos, "region seed outside any region"),
            }
        }
        Ok(map)
    }
}
