//! The tile map: tile storage, entity and region pools, and the
//! operations that keep region aggregates in step with the tiles.

use indexmap::IndexMap;

use hexrealm_core::{Build, EntState, Plant, Pos, RegionRes, Team, Troop};
use hexrealm_pool::{Pool, Share};

use crate::config::MapConfig;
use crate::error::MapError;
use crate::grid;
use crate::hex::Hex;
use crate::region::{Region, Regions};
use crate::spread::Spread;

/// A hex board in offset-row layout.
///
/// Tiles are stored row-major, `width` cells per row. Even rows are shifted
/// half a tile to the right and hold `width - 1` tiles; their last storage
/// cell is never addressable. Lookups take a [`Pos`] and answer `None` for
/// positions off the board.
///
/// Every troop, building and plant lives in a per-kind pool owned by the
/// map, and every region in a reference-counted pool. Tiles hold the
/// handles.
///
/// # Examples
///
/// ```
/// use hexrealm_core::{BuildType, Build, HexType, Pos, Team};
/// use hexrealm_map::{Map, MapConfig};
///
/// let mut map = Map::new(&MapConfig::new(4, 4)).unwrap();
/// let pos = Pos::new(1, 1);
/// *map.at_mut(pos).unwrap() = hexrealm_map::Hex::new(HexType::Ground, Team::Red);
/// map.enumerate_regions();
///
/// map.set_build(Build::new(BuildType::Farm, pos));
/// let region = map.region_at(pos).unwrap();
/// assert_eq!(region.get().var.farms, 1);
/// assert!(map.check_regions().is_ok());
/// ```
pub struct Map {
    // Tiles come first so their handles drop while the pools are alive.
    pub(crate) tiles: Vec<Hex>,
    /// Map title.
    pub name: String,
    /// Map author.
    pub author: String,
    width: i32,
    height: i32,
    troops: Pool<Troop>,
    builds: Pool<Build>,
    plants: Pool<Plant>,
    regions: Regions,
}

impl Map {
    /// Create a map of void tiles.
    pub fn new(config: &MapConfig) -> Result<Self, MapError> {
        config.validate()?;
        let mut tiles = Vec::with_capacity(config.cell_count());
        tiles.resize_with(config.cell_count(), Hex::default);
        Ok(Self {
            tiles,
            name: String::new(),
            author: String::new(),
            width: config.width as i32,
            height: config.height as i32,
            troops: Pool::new(),
            builds: Pool::new(),
            plants: Pool::new(),
            regions: Regions::new(),
        })
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of storage cells, unaddressable ones included.
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of addressable tiles.
    pub fn tile_count(&self) -> usize {
        (0..self.height).map(|y| self.row_len(y) as usize).sum()
    }

    fn row_len(&self, y: i32) -> i32 {
        if y & 1 == 0 {
            self.width - 1
        } else {
            self.width
        }
    }

    /// Whether `pos` names a tile of this map.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.y >= 0 && pos.y < self.height && pos.x >= 0 && pos.x < self.row_len(pos.y)
    }

    pub(crate) fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Every addressable position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.row_len(y)).map(move |x| Pos::new(x, y)))
    }

    /// The tile at `pos`.
    pub fn at(&self, pos: Pos) -> Option<&Hex> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    /// Mutable access to the tile at `pos`.
    ///
    /// Changing the team or occupant of a region member through this
    /// reference bypasses region bookkeeping; use the setters or
    /// [`Map::set_team`].
    pub fn at_mut(&mut self, pos: Pos) -> Option<&mut Hex> {
        self.index(pos).map(|i| &mut self.tiles[i])
    }

    /// Number of live troops.
    pub fn troop_count(&self) -> usize {
        self.troops.count()
    }

    /// Number of live buildings.
    pub fn build_count(&self) -> usize {
        self.builds.count()
    }

    /// Number of live plants.
    pub fn plant_count(&self) -> usize {
        self.plants.count()
    }

    /// Number of live regions.
    pub fn region_count(&self) -> usize {
        self.regions.count()
    }

    /// Place a troop at its own position, replacing any occupant.
    pub fn set_troop(&mut self, troop: Troop) {
        let pos = troop.entity.pos;
        let Some(i) = self.index(pos) else {
            tracing::trace!(%pos, "troop placed outside the map");
            return;
        };
        let hex = &mut self.tiles[i];
        let region = hex.leave();
        hex.clear_occupants();
        hex.troop = Some(self.troops.add(troop));
        if let Some(r) = region {
            hex.join(r);
        }
    }

    /// Place a building at its own position, replacing any occupant.
    pub fn set_build(&mut self, build: Build) {
        let pos = build.entity.pos;
        let Some(i) = self.index(pos) else {
            tracing::trace!(%pos, "building placed outside the map");
            return;
        };
        let hex = &mut self.tiles[i];
        let region = hex.leave();
        hex.clear_occupants();
        hex.build = Some(self.builds.add(build));
        if let Some(r) = region {
            hex.join(r);
        }
    }

    /// Place a plant at its own position, replacing any occupant.
    pub fn set_plant(&mut self, plant: Plant) {
        let pos = plant.entity.pos;
        let Some(i) = self.index(pos) else {
            tracing::trace!(%pos, "plant placed outside the map");
            return;
        };
        let hex = &mut self.tiles[i];
        let region = hex.leave();
        hex.clear_occupants();
        hex.plant = Some(self.plants.add(plant));
        if let Some(r) = region {
            hex.join(r);
        }
    }

    /// Remove the occupant at `pos` and return what was there.
    pub fn remove_entity(&mut self, pos: Pos) -> EntState {
        let Some(i) = self.index(pos) else {
            tracing::trace!(%pos, "entity removed outside the map");
            return EntState::Empty { pos };
        };
        let hex = &mut self.tiles[i];
        let prev = hex.occupant().unwrap_or(EntState::Empty { pos });
        if !hex.free() {
            let region = hex.leave();
            hex.clear_occupants();
            if let Some(r) = region {
                hex.join(r);
            }
        }
        prev
    }

    /// Make the tile at the snapshot's position hold exactly the snapshot.
    pub fn set_entity(&mut self, state: EntState) {
        match state {
            EntState::Empty { pos } => {
                self.remove_entity(pos);
            }
            EntState::Troop(t) => self.set_troop(t),
            EntState::Build(b) => self.set_build(b),
            EntState::Plant(p) => self.set_plant(p),
        }
    }

    /// Snapshot of the occupant at `pos`.
    pub fn entity(&self, pos: Pos) -> EntState {
        self.at(pos)
            .and_then(Hex::occupant)
            .unwrap_or(EntState::Empty { pos })
    }

    /// Handle to the region of the tile at `pos`.
    pub fn region_at(&self, pos: Pos) -> Option<Share<Region>> {
        self.at(pos).and_then(Hex::region).cloned()
    }

    /// Region of the first neighbor of `pos`, in scan order, owned by
    /// `team`. `None` when no neighbor matches or the first match has no
    /// region.
    pub fn region_near(&self, pos: Pos, team: Team) -> Option<Share<Region>> {
        grid::neighbors(pos)
            .into_iter()
            .filter_map(|p| self.at(p))
            .find(|hex| hex.team == team)
            .and_then(|hex| hex.region().cloned())
    }

    /// Create an empty region. It is freed once no handle refers to it.
    pub fn new_region(&mut self, team: Team, res: RegionRes) -> Share<Region> {
        let region = self.regions.add(Region::new(team, res));
        tracing::debug!(index = region.index(), %team, "created region");
        region
    }

    /// Give the tile at `pos` a new owner and region.
    ///
    /// The tile leaves its current region before the team changes, then
    /// joins `region` if one is given.
    pub fn set_team(&mut self, pos: Pos, team: Team, region: Option<Share<Region>>) {
        let Some(hex) = self.at_mut(pos) else {
            tracing::trace!(%pos, "team set outside the map");
            return;
        };
        hex.leave();
        hex.team = team;
        if let Some(r) = region {
            hex.join(r);
        }
    }

    /// Rebuild every region from scratch.
    ///
    /// Each connected group of same-team solid tiles owned by a player
    /// becomes one fresh region with no resources. Unclaimed tiles belong
    /// to no region.
    pub fn enumerate_regions(&mut self) {
        for hex in &mut self.tiles {
            hex.leave();
        }

        let positions: Vec<Pos> = self.positions().collect();
        for pos in positions {
            let Some(hex) = self.at(pos) else {
                continue;
            };
            if hex.region.is_some() || !hex.team.is_claimed() || !hex.solid() {
                continue;
            }
            let team = hex.team;
            let members = Spread::new()
                .hop(move |_, h| h.team == team && h.solid())
                .collect(self, pos, Spread::UNBOUNDED);

            let region = self.new_region(team, RegionRes::default());
            for p in members {
                if let Some(h) = self.at_mut(p) {
                    h.join(region.clone());
                }
            }
        }
        tracing::debug!(regions = self.regions.count(), "enumerated regions");
    }

    /// Every region with its first member tile, row-major.
    pub fn regions(&self) -> Vec<(Pos, Share<Region>)> {
        let mut seen: IndexMap<usize, (Pos, Share<Region>)> = IndexMap::new();
        for pos in self.positions() {
            if let Some(r) = self.at(pos).and_then(Hex::region) {
                seen.entry(r.index()).or_insert_with(|| (pos, r.clone()));
            }
        }
        seen.into_values().collect()
    }

    /// Recount every region's aggregates from its tiles and compare.
    pub fn check_regions(&self) -> Result<(), MapError> {
        let mut recount: IndexMap<usize, (Pos, Share<Region>, Region)> = IndexMap::new();
        for pos in self.positions() {
            let Some(hex) = self.at(pos) else {
                continue;
            };
            let Some(r) = hex.region() else {
                continue;
            };
            let entry = recount
                .entry(r.index())
                .or_insert_with(|| (pos, r.clone(), Region::default()));
            let (income, farms, tents) = hex.contribution();
            entry.2.tiles += 1;
            entry.2.income += income;
            entry.2.var.farms += farms;
            entry.2.var.tents += tents;

            let team = r.get().team;
            if hex.team != team {
                return Err(MapError::RegionMismatch {
                    pos,
                    field: "team",
                    expected: hex.team as i32,
                    actual: team as i32,
                });
            }
        }

        for (pos, share, counted) in recount.values() {
            let stored = share.get();
            let fields = [
                ("tiles", counted.tiles, stored.tiles),
                ("income", counted.income, stored.income),
                ("farms", counted.var.farms, stored.var.farms),
                ("tents", counted.var.tents, stored.var.tents),
            ];
            for (field, expected, actual) in fields {
                if expected != actual {
                    return Err(MapError::RegionMismatch {
                        pos: *pos,
                        field,
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }

    /// Every troop, row-major.
    pub fn troops(&self) -> Vec<Troop> {
        self.positions()
            .filter_map(|p| self.at(p).and_then(|h| h.troop().map(|t| t.clone())))
            .collect()
    }

    /// Every building, row-major.
    pub fn builds(&self) -> Vec<Build> {
        self.positions()
            .filter_map(|p| self.at(p).and_then(|h| h.build().map(|b| b.clone())))
            .collect()
    }

    /// Every plant, row-major.
    pub fn plants(&self) -> Vec<Plant> {
        self.positions()
            .filter_map(|p| self.at(p).and_then(|h| h.plant().map(|p| p.clone())))
            .collect()
    }
}

impl Clone for Map {
    /// Deep copy. Regions keep their indices and are counted by the copied
    /// tiles alone; entities are re-added to fresh pools.
    fn clone(&self) -> Self {
        let regions = self.regions.clone();
        let mut troops = Pool::new();
        let mut builds = Pool::new();
        let mut plants = Pool::new();

        let tiles = self
            .tiles
            .iter()
            .map(|hex| {
                let mut region = hex.region.clone();
                if let Some(r) = region.as_mut() {
                    regions.rebase(r);
                }
                Hex {
                    kind: hex.kind,
                    team: hex.team,
                    elevation: hex.elevation,
                    troop: hex.troop().map(|t| troops.add(t.clone())),
                    build: hex.build().map(|b| builds.add(b.clone())),
                    plant: hex.plant().map(|p| plants.add(p.clone())),
                    region,
                }
            })
            .collect::<Vec<Hex>>();
        regions.recount(tiles.iter().filter_map(Hex::region));

        Self {
            tiles,
            name: self.name.clone(),
            author: self.author.clone(),
            width: self.width,
            height: self.height,
            troops,
            builds,
            plants,
            regions,
        }
    }
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("troops", &self.troops.count())
            .field("builds", &self.builds.count())
            .field("plants", &self.plants.count())
            .field("regions", &self.regions.count())
            .finish()
    }
}
