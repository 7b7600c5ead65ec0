//! Balance tables.
//!
//! Only the numbers the move engine and region bookkeeping need: health,
//! damage, purchase costs, plant bonuses and income rates.

use crate::entity::{BuildType, EffectType, EntState, Entity, PlantType, Troop, TroopType};

/// Berries needed to heal one hitpoint.
pub const BERRY_PER_HP: i32 = 3;

/// Resources yielded by one harvest.
pub const HARVEST_YIELD: i32 = 4;

/// Income contributed by every tile of a region.
pub const TILE_INCOME: i32 = 1;

/// Extra income contributed by a farm.
pub const FARM_INCOME: i32 = 4;

const TROOP_HP: [i32; 6] = [1, 2, 3, 2, 4, 6];
const TROOP_DMG: [i32; 6] = [0, 1, 2, 1, 3, 4];
const TROOP_COST: [i32; 6] = [10, 15, 20, 25, 30, 40];

// Tents are not in the shop; placing one is free.
const BUILD_HP: [i32; 7] = [4, 1, 2, 2, 2, 4, 1];
const BUILD_COST: [i32; 7] = [0, 12, 80, 15, 35, 95, 0];

const PLANT_BONUS: [i32; 7] = [2, 3, 3, 4, 6, 4, 0];

/// Maximum hitpoints of a troop type.
pub fn troop_hp(kind: TroopType) -> i32 {
    TROOP_HP[kind as usize]
}

/// Base damage of a troop type.
pub fn troop_dmg(kind: TroopType) -> i32 {
    TROOP_DMG[kind as usize]
}

/// Purchase cost of a troop type.
pub fn troop_cost(kind: TroopType) -> i32 {
    TROOP_COST[kind as usize]
}

/// Troop a merge of `a` onto `b` produces, if the pair can merge.
///
/// The table is symmetric. Archers and knights never merge.
pub fn troop_merge(a: TroopType, b: TroopType) -> Option<TroopType> {
    use TroopType::*;
    match (a.min(b), a.max(b)) {
        (Farmer, Farmer) => Some(Lumberjack),
        (Farmer, Lumberjack) | (Lumberjack, Lumberjack) => Some(Spearman),
        (Farmer, Spearman) | (Lumberjack, Spearman) => Some(Baron),
        (Spearman, Spearman) | (Farmer, Baron) => Some(Knight),
        _ => None,
    }
}

/// Maximum hitpoints of a building type.
pub fn build_hp(kind: BuildType) -> i32 {
    BUILD_HP[kind as usize]
}

/// Purchase cost of a building type.
pub fn build_cost(kind: BuildType) -> i32 {
    BUILD_COST[kind as usize]
}

/// Money granted for cutting a plant down.
pub fn plant_bonus(kind: PlantType) -> i32 {
    PLANT_BONUS[kind as usize]
}

/// Purchase cost of whatever the snapshot holds.
pub fn entity_cost(state: &EntState) -> i32 {
    match state {
        EntState::Troop(t) => troop_cost(t.kind),
        EntState::Build(b) => build_cost(b.kind),
        EntState::Empty { .. } | EntState::Plant(_) => 0,
    }
}

/// Damage an attacking troop deals to a defender.
pub fn attack_damage(attacker: &Troop, defender: &Entity) -> i32 {
    let mut dmg = troop_dmg(attacker.kind);
    if attacker.entity.has_effect(EffectType::OffenseBoost) {
        dmg += 1;
    }
    if defender.has_effect(EffectType::Shielded) {
        dmg -= 1;
    }
    if defender.has_effect(EffectType::DefenseBoost) {
        dmg -= 1;
    }
    dmg.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Pos;

    #[test]
    fn boosts_and_shields_adjust_damage() {
        let mut knight = Troop::new(TroopType::Knight, Pos::new(0, 0));
        let mut target = Entity::new(Pos::new(1, 0), 6);
        assert_eq!(attack_damage(&knight, &target), 4);
        knight.entity.add_effect(EffectType::OffenseBoost);
        assert_eq!(attack_damage(&knight, &target), 5);
        target.add_effect(EffectType::Shielded);
        target.add_effect(EffectType::DefenseBoost);
        assert_eq!(attack_damage(&knight, &target), 3);
    }

    #[test]
    fn farmer_never_deals_negative_damage() {
        let farmer = Troop::new(TroopType::Farmer, Pos::new(0, 0));
        let mut target = Entity::new(Pos::new(1, 0), 1);
        target.add_effect(EffectType::Shielded);
        assert_eq!(attack_damage(&farmer, &target), 0);
    }

    #[test]
    fn plants_cost_nothing() {
        let plant = EntState::Plant(crate::entity::Plant::new(PlantType::Pine, Pos::new(0, 0)));
        assert_eq!(entity_cost(&plant), 0);
        let farm = EntState::Build(crate::entity::Build::new(BuildType::Farm, Pos::new(0, 0)));
        assert_eq!(entity_cost(&farm), 12);
    }

    #[test]
    fn merge_table_is_symmetric() {
        for a in TroopType::ALL {
            for b in TroopType::ALL {
                assert_eq!(troop_merge(a, b), troop_merge(b, a), "{a:?} + {b:?}");
            }
        }
        assert_eq!(
            troop_merge(TroopType::Lumberjack, TroopType::Farmer),
            Some(TroopType::Spearman)
        );
        assert_eq!(troop_merge(TroopType::Archer, TroopType::Farmer), None);
        assert_eq!(troop_merge(TroopType::Knight, TroopType::Knight), None);
    }

    #[test]
    fn only_shop_buildings_have_a_price() {
        assert_eq!(build_cost(BuildType::Castle), 0);
        assert_eq!(build_cost(BuildType::Fort), 95);
        assert_eq!(build_cost(BuildType::Tent), 0);
    }
}
