//! Moves that place, remove or alter occupants.

use hexrealm_core::logic;
use hexrealm_core::{EffectType, EntState, Pos};
use hexrealm_map::{Hex, Map};

use crate::kind::Revertible;
use crate::region::with_res;

/// Buy an entity: place it and charge its price to the tile's region.
///
/// Whatever occupied the tile before is captured and comes back on revert.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityPlace {
    /// The entity, at the tile it goes to.
    pub entity: EntState,
    prev: Option<EntState>,
}

impl EntityPlace {
    /// Create the move.
    pub fn new(entity: EntState) -> Self {
        Self { entity, prev: None }
    }
}

impl Revertible for EntityPlace {
    fn apply(&mut self, map: &mut Map) {
        let pos = self.entity.pos();
        if !map.contains(pos) {
            tracing::trace!(%pos, "entity place outside the map");
            return;
        }
        self.prev = Some(map.entity(pos));
        map.set_entity(self.entity.clone());
        let cost = logic::entity_cost(&self.entity);
        with_res(map, pos, |res| res.money -= cost);
    }

    fn revert(&mut self, map: &mut Map) {
        let Some(prev) = self.prev.take() else {
            return;
        };
        let cost = logic::entity_cost(&self.entity);
        with_res(map, prev.pos(), |res| res.money += cost);
        map.set_entity(prev);
    }
}

/// Remove the occupant of a tile.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityWithdraw {
    /// Tile to clear.
    pub pos: Pos,
    prev: Option<EntState>,
}

impl EntityWithdraw {
    /// Create the move.
    pub fn new(pos: Pos) -> Self {
        Self { pos, prev: None }
    }
}

impl Revertible for EntityWithdraw {
    fn apply(&mut self, map: &mut Map) {
        if !map.contains(self.pos) {
            tracing::trace!(pos = %self.pos, "withdraw outside the map");
            return;
        }
        self.prev = Some(map.remove_entity(self.pos));
    }

    fn revert(&mut self, map: &mut Map) {
        if let Some(prev) = self.prev.take() {
            map.set_entity(prev);
        }
    }
}

/// Apply a status effect to one entity, paying for it in peaches.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityEffect {
    /// Target tile.
    pub pos: Pos,
    /// Effect to apply.
    pub effect: EffectType,
    /// Peaches charged to the target tile's region.
    pub peach: i32,
    had: Option<bool>,
}

impl EntityEffect {
    /// Create the move.
    pub fn new(pos: Pos, effect: EffectType, peach: i32) -> Self {
        Self {
            pos,
            effect,
            peach,
            had: None,
        }
    }
}

impl Revertible for EntityEffect {
    fn apply(&mut self, map: &mut Map) {
        let had = {
            let Some(mut e) = map.at_mut(self.pos).and_then(Hex::entity_mut) else {
                tracing::trace!(pos = %self.pos, "effect without a target");
                return;
            };
            let had = e.has_effect(self.effect);
            e.add_effect(self.effect);
            had
        };
        self.had = Some(had);
        let peach = self.peach;
        with_res(map, self.pos, |res| res.peach -= peach);
    }

    fn revert(&mut self, map: &mut Map) {
        let Some(had) = self.had.take() else {
            return;
        };
        if !had {
            if let Some(mut e) = map.at_mut(self.pos).and_then(Hex::entity_mut) {
                e.remove_effect(self.effect);
            }
        }
        let peach = self.peach;
        with_res(map, self.pos, |res| res.peach += peach);
    }
}

/// Replace the occupant of a tile with a snapshot, free of charge.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityChange {
    /// The new occupant, at the tile it goes to.
    pub state: EntState,
    prev: Option<EntState>,
}

impl EntityChange {
    /// Create the move.
    pub fn new(state: EntState) -> Self {
        Self { state, prev: None }
    }
}

impl Revertible for EntityChange {
    fn apply(&mut self, map: &mut Map) {
        let pos = self.state.pos();
        if !map.contains(pos) {
            tracing::trace!(%pos, "entity change outside the map");
            return;
        }
        self.prev = Some(map.entity(pos));
        map.set_entity(self.state.clone());
    }

    fn revert(&mut self, map: &mut Map) {
        if let Some(prev) = self.prev.take() {
            map.set_entity(prev);
        }
    }
}

/// End-of-turn upkeep: overwrite many occupants at once.
///
/// States are placed in order, so a later state for the same tile wins.
/// Revert walks the captured occupants backwards. States off the map are
/// skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameTurn {
    /// New occupants, each at the tile it goes to.
    pub states: Vec<EntState>,
    prev: Vec<EntState>,
}

impl GameTurn {
    /// Create the move.
    pub fn new(states: Vec<EntState>) -> Self {
        Self {
            states,
            prev: Vec::new(),
        }
    }
}

impl Revertible for GameTurn {
    fn apply(&mut self, map: &mut Map) {
        self.prev.clear();
        for state in &self.states {
            let pos = state.pos();
            if !map.contains(pos) {
                tracing::trace!(%pos, "turn change outside the map");
                continue;
            }
            self.prev.push(map.entity(pos));
            map.set_entity(state.clone());
        }
        tracing::trace!(changed = self.prev.len(), "applied game turn");
    }

    fn revert(&mut self, map: &mut Map) {
        for prev in self.prev.drain(..).rev() {
            map.set_entity(prev);
        }
    }
}
