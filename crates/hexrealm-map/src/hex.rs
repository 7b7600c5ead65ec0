//! Hex tiles and the region join/leave protocol.

use std::cell;

use hexrealm_core::logic::{FARM_INCOME, TILE_INCOME};
use hexrealm_core::{Build, BuildType, EntState, Entity, HexType, Plant, Team, Troop};
use hexrealm_pool::{Item, Share};

use crate::region::Region;

/// A single map tile.
///
/// A tile holds at most one occupant. Occupants are owned by the map's
/// entity pools through [`Item`] handles; the region is a counted
/// [`Share`]. Changing the occupant or the team of a tile that belongs to a
/// region has to go through [`Hex::leave`] and [`Hex::join`] so the
/// region's aggregates stay correct; the [`Map`](crate::Map) setters do
/// this.
#[derive(Debug, Default)]
pub struct Hex {
    /// Terrain.
    pub kind: HexType,
    /// Owner.
    pub team: Team,
    /// Visual height offset.
    pub elevation: f32,
    pub(crate) troop: Option<Item<Troop>>,
    pub(crate) build: Option<Item<Build>>,
    pub(crate) plant: Option<Item<Plant>>,
    pub(crate) region: Option<Share<Region>>,
}

impl Hex {
    /// A tile of the given terrain and owner.
    pub fn new(kind: HexType, team: Team) -> Self {
        Self {
            kind,
            team,
            ..Self::default()
        }
    }

    /// Whether entities can stand on the tile.
    pub fn solid(&self) -> bool {
        self.kind.solid()
    }

    /// Whether the tile is raised.
    pub fn elevated(&self) -> bool {
        self.elevation != 0.0
    }

    /// Whether the tile has no occupant.
    pub fn free(&self) -> bool {
        self.troop.is_none() && self.build.is_none() && self.plant.is_none()
    }

    /// The troop on the tile.
    pub fn troop(&self) -> Option<cell::Ref<'_, Troop>> {
        self.troop.as_ref().and_then(|t| t.get().ok())
    }

    /// Mutable access to the troop on the tile.
    pub fn troop_mut(&mut self) -> Option<cell::RefMut<'_, Troop>> {
        self.troop.as_mut().and_then(|t| t.get_mut().ok())
    }

    /// The building on the tile.
    pub fn build(&self) -> Option<cell::Ref<'_, Build>> {
        self.build.as_ref().and_then(|b| b.get().ok())
    }

    /// Mutable access to the building on the tile.
    ///
    /// Do not change the building type here: farm and tent counters follow
    /// the type through join/leave. Replace the building instead.
    pub fn build_mut(&mut self) -> Option<cell::RefMut<'_, Build>> {
        self.build.as_mut().and_then(|b| b.get_mut().ok())
    }

    /// The plant on the tile.
    pub fn plant(&self) -> Option<cell::Ref<'_, Plant>> {
        self.plant.as_ref().and_then(|p| p.get().ok())
    }

    /// Mutable access to the plant on the tile.
    pub fn plant_mut(&mut self) -> Option<cell::RefMut<'_, Plant>> {
        self.plant.as_mut().and_then(|p| p.get_mut().ok())
    }

    /// The common entity record of whichever occupant the tile has.
    pub fn entity_mut(&mut self) -> Option<cell::RefMut<'_, Entity>> {
        if let Some(t) = self.troop.as_mut() {
            return t.get_mut().ok().map(|t| cell::RefMut::map(t, |t| &mut t.entity));
        }
        if let Some(b) = self.build.as_mut() {
            return b.get_mut().ok().map(|b| cell::RefMut::map(b, |b| &mut b.entity));
        }
        if let Some(p) = self.plant.as_mut() {
            return p.get_mut().ok().map(|p| cell::RefMut::map(p, |p| &mut p.entity));
        }
        None
    }

    /// Snapshot of the occupant, or `None` for a free tile.
    pub fn occupant(&self) -> Option<EntState> {
        if let Some(t) = self.troop() {
            return Some(EntState::Troop(t.clone()));
        }
        if let Some(b) = self.build() {
            return Some(EntState::Build(b.clone()));
        }
        self.plant().map(|p| EntState::Plant(p.clone()))
    }

    /// The region the tile belongs to.
    pub fn region(&self) -> Option<&Share<Region>> {
        self.region.as_ref()
    }

    /// Add the tile to `region`, leaving its current region first.
    pub fn join(&mut self, region: Share<Region>) {
        self.leave();
        let (income, farms, tents) = self.contribution();
        {
            let mut r = region.get_mut();
            r.tiles += 1;
            r.income += income;
            r.var.farms += farms;
            r.var.tents += tents;
        }
        self.region = Some(region);
    }

    /// Remove the tile from its region and hand back the handle.
    pub fn leave(&mut self) -> Option<Share<Region>> {
        let region = self.region.take()?;
        let (income, farms, tents) = self.contribution();
        {
            let mut r = region.get_mut();
            r.tiles -= 1;
            r.income -= income;
            r.var.farms -= farms;
            r.var.tents -= tents;
        }
        Some(region)
    }

    /// Drop every occupant. Callers handle region membership.
    pub(crate) fn clear_occupants(&mut self) {
        self.troop = None;
        self.build = None;
        self.plant = None;
    }

    /// What this tile adds to its region: `(income, farms, tents)`.
    pub(crate) fn contribution(&self) -> (i32, i32, i32) {
        match self.build().map(|b| b.kind) {
            Some(BuildType::Farm) => (TILE_INCOME + FARM_INCOME, 1, 0),
            Some(BuildType::Tent) => (TILE_INCOME, 0, 1),
            _ => (TILE_INCOME, 0, 0),
        }
    }
}
