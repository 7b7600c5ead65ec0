//! Plant moves.

use hexrealm_core::logic;
use hexrealm_core::{Plant, Pos, RegionRes};
use hexrealm_map::{Hex, Map, Spread};

use crate::kind::Revertible;
use crate::region::with_res;

/// Cut a plant down; the cutter's region earns the plant's bonus.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantCut {
    /// Tile of the cutting entity; its region is paid.
    pub from: Pos,
    /// Tile of the plant.
    pub pos: Pos,
    cut: Option<(Plant, i32)>,
}

impl PlantCut {
    /// Create the move.
    pub fn new(from: Pos, pos: Pos) -> Self {
        Self {
            from,
            pos,
            cut: None,
        }
    }
}

impl Revertible for PlantCut {
    fn apply(&mut self, map: &mut Map) {
        let Some(plant) = map.at(self.pos).and_then(|hex| hex.plant().map(|p| p.clone())) else {
            tracing::trace!(pos = %self.pos, "cut without a plant");
            return;
        };
        let bonus = logic::plant_bonus(plant.kind);
        map.remove_entity(self.pos);
        with_res(map, self.from, |res| res.money += bonus);
        self.cut = Some((plant, bonus));
    }

    fn revert(&mut self, map: &mut Map) {
        let Some((plant, bonus)) = self.cut.take() else {
            return;
        };
        map.set_plant(plant);
        with_res(map, self.from, |res| res.money -= bonus);
    }
}

/// Harvest every fruit-bearing plant around a tile.
///
/// The fruit goes to the region at `mid`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantMod {
    /// Center of the area.
    pub mid: Pos,
    /// Search radius, the center being the first ring.
    pub radius: u64,
    harvested: Option<(Vec<Plant>, RegionRes)>,
}

impl PlantMod {
    /// Create the move.
    pub fn new(mid: Pos, radius: u64) -> Self {
        Self {
            mid,
            radius,
            harvested: None,
        }
    }
}

impl Revertible for PlantMod {
    fn apply(&mut self, map: &mut Map) {
        if !map.contains(self.mid) {
            tracing::trace!(mid = %self.mid, "harvest outside the map");
            return;
        }
        let targets = Spread::new()
            .pass(|_, hex| hex.plant().is_some_and(|p| p.harvestable()))
            .collect(map, self.mid, self.radius);

        let mut plants = Vec::with_capacity(targets.len());
        let mut total = RegionRes::default();
        for pos in targets {
            let Some(mut p) = map.at_mut(pos).and_then(Hex::plant_mut) else {
                continue;
            };
            plants.push(p.clone());
            total += p.harvest();
        }
        with_res(map, self.mid, |res| *res += total);
        self.harvested = Some((plants, total));
    }

    fn revert(&mut self, map: &mut Map) {
        let Some((plants, total)) = self.harvested.take() else {
            return;
        };
        for plant in plants {
            if let Some(mut p) = map.at_mut(plant.entity.pos).and_then(Hex::plant_mut) {
                *p = plant;
            }
        }
        with_res(map, self.mid, |res| *res -= total);
    }
}
