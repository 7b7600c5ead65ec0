//! The closed set of move kinds and their dispatch.

use hexrealm_map::Map;

use crate::entity::{EntityChange, EntityEffect, EntityPlace, EntityWithdraw, GameTurn};
use crate::plant::{PlantCut, PlantMod};
use crate::region::RegionChange;
use crate::troop::{RadiusEffect, TroopAttack, TroopHeal, TroopMerge, TroopMove};

/// A state change that can be undone.
///
/// `apply` captures everything it overwrites; `revert` restores it and
/// clears the capture. Calling `revert` without a prior `apply` is a no-op.
/// Applying twice without reverting in between loses the first capture.
pub trait Revertible {
    /// Perform the change on `map`.
    fn apply(&mut self, map: &mut Map);
    /// Undo the last `apply` on `map`.
    fn revert(&mut self, map: &mut Map);
}

/// Every move kind, tagged in wire order.
///
/// # Examples
///
/// ```
/// use hexrealm_core::Pos;
/// use hexrealm_moves::{MoveKind, TroopMove};
///
/// let kind = MoveKind::from(TroopMove::new(Pos::new(1, 1), Pos::new(2, 1)));
/// assert_eq!(kind.tag(), 3);
/// assert_eq!(kind.name(), "troop_move");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum MoveKind {
    /// Place an entity, paying its price.
    EntityPlace(EntityPlace),
    /// Remove an entity.
    EntityWithdraw(EntityWithdraw),
    /// Apply an effect to one entity, paying peaches.
    EntityEffect(EntityEffect),
    /// Move a troop, capturing the destination.
    TroopMove(TroopMove),
    /// Attack an entity with a troop.
    TroopAttack(TroopAttack),
    /// Heal friendly troops in an area, paying berries.
    TroopHeal(TroopHeal),
    /// Apply an effect to enemy troops in an area.
    RadiusEffect(RadiusEffect),
    /// Cut a plant down for money.
    PlantCut(PlantCut),
    /// Harvest fruit in an area.
    PlantMod(PlantMod),
    /// Replace an occupant without cost.
    EntityChange(EntityChange),
    /// Overwrite a region's resources and building counters.
    RegionChange(RegionChange),
    /// Merge two friendly troops into one.
    TroopMerge(TroopMerge),
    /// Overwrite many occupants at the end of a turn.
    GameTurn(GameTurn),
}

impl MoveKind {
    /// Number of kinds; wire tags are `0..COUNT`.
    pub const COUNT: usize = 13;

    /// Wire tag.
    pub fn tag(&self) -> u8 {
        match self {
            MoveKind::EntityPlace(_) => 0,
            MoveKind::EntityWithdraw(_) => 1,
            MoveKind::EntityEffect(_) => 2,
            MoveKind::TroopMove(_) => 3,
            MoveKind::TroopAttack(_) => 4,
            MoveKind::TroopHeal(_) => 5,
            MoveKind::RadiusEffect(_) => 6,
            MoveKind::PlantCut(_) => 7,
            MoveKind::PlantMod(_) => 8,
            MoveKind::EntityChange(_) => 9,
            MoveKind::RegionChange(_) => 10,
            MoveKind::TroopMerge(_) => 11,
            MoveKind::GameTurn(_) => 12,
        }
    }

    /// Stable snake_case name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            MoveKind::EntityPlace(_) => "entity_place",
            MoveKind::EntityWithdraw(_) => "entity_withdraw",
            MoveKind::EntityEffect(_) => "entity_effect",
            MoveKind::TroopMove(_) => "troop_move",
            MoveKind::TroopAttack(_) => "troop_attack",
            MoveKind::TroopHeal(_) => "troop_heal",
            MoveKind::RadiusEffect(_) => "radius_effect",
            MoveKind::PlantCut(_) => "plant_cut",
            MoveKind::PlantMod(_) => "plant_mod",
            MoveKind::EntityChange(_) => "entity_change",
            MoveKind::RegionChange(_) => "region_change",
            MoveKind::TroopMerge(_) => "troop_merge",
            MoveKind::GameTurn(_) => "game_turn",
        }
    }
}

impl Revertible for MoveKind {
    fn apply(&mut self, map: &mut Map) {
        match self {
            MoveKind::EntityPlace(m) => m.apply(map),
            MoveKind::EntityWithdraw(m) => m.apply(map),
            MoveKind::EntityEffect(m) => m.apply(map),
            MoveKind::TroopMove(m) => m.apply(map),
            MoveKind::TroopAttack(m) => m.apply(map),
            MoveKind::TroopHeal(m) => m.apply(map),
            MoveKind::RadiusEffect(m) => m.apply(map),
            MoveKind::PlantCut(m) => m.apply(map),
            MoveKind::PlantMod(m) => m.apply(map),
            MoveKind::EntityChange(m) => m.apply(map),
            MoveKind::RegionChange(m) => m.apply(map),
            MoveKind::TroopMerge(m) => m.apply(map),
            MoveKind::GameTurn(m) => m.apply(map),
        }
    }

    fn revert(&mut self, map: &mut Map) {
        match self {
            MoveKind::EntityPlace(m) => m.revert(map),
            MoveKind::EntityWithdraw(m) => m.revert(map),
            MoveKind::EntityEffect(m) => m.revert(map),
            MoveKind::TroopMove(m) => m.revert(map),
            MoveKind::TroopAttack(m) => m.revert(map),
            MoveKind::TroopHeal(m) => m.revert(map),
            MoveKind::RadiusEffect(m) => m.revert(map),
            MoveKind::PlantCut(m) => m.revert(map),
            MoveKind::PlantMod(m) => m.revert(map),
            MoveKind::EntityChange(m) => m.revert(map),
            MoveKind::RegionChange(m) => m.revert(map),
            MoveKind::TroopMerge(m) => m.revert(map),
            MoveKind::GameTurn(m) => m.revert(map),
        }
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for MoveKind {
                fn from(m: $variant) -> Self {
                    MoveKind::$variant(m)
                }
            }
        )*
    };
}

impl_from_kind!(
    EntityPlace,
    EntityWithdraw,
    EntityEffect,
    TroopMove,
    TroopAttack,
    TroopHeal,
    RadiusEffect,
    PlantCut,
    PlantMod,
    EntityChange,
    RegionChange,
    TroopMerge,
    GameTurn,
);

#[cfg(test)]
mod tests {
    use super::*;
    use hexrealm_core::{EffectType, EntState, Pos, RegionRes, RegionVar};

    fn one_of_each() -> Vec<MoveKind> {
        let p = Pos::new(1, 1);
        vec![
            EntityPlace::new(EntState::Empty { pos: p }).into(),
            EntityWithdraw::new(p).into(),
            EntityEffect::new(p, EffectType::Shielded, 2).into(),
            TroopMove::new(p, Pos::new(2, 1)).into(),
            TroopAttack::new(p, Pos::new(2, 1)).into(),
            TroopHeal::new(p, 2, 1, hexrealm_core::Team::Red).into(),
            RadiusEffect::new(p, 2, EffectType::Stunned, hexrealm_core::Team::Red).into(),
            PlantCut::new(p, Pos::new(2, 1)).into(),
            PlantMod::new(p, 2).into(),
            EntityChange::new(EntState::Empty { pos: p }).into(),
            RegionChange::new(p, RegionRes::default(), RegionVar::default(), false).into(),
            TroopMerge::new(p, Pos::new(2, 1)).into(),
            GameTurn::new(vec![EntState::Empty { pos: p }]).into(),
        ]
    }

    #[test]
    fn tags_are_dense_and_ordered() {
        let kinds = one_of_each();
        assert_eq!(kinds.len(), MoveKind::COUNT);
        for (i, kind) in kinds.iter().enumerate() {
            assert_eq!(kind.tag() as usize, i);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = one_of_each().iter().map(MoveKind::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MoveKind::COUNT);
    }
}
