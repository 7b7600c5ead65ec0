//! Troop moves: movement, combat and area abilities.

use hexrealm_core::logic::{self, BERRY_PER_HP};
use hexrealm_core::{
    EffectType, EntState, Plant, PlantType, Pos, RegionRes, SkillType, Team, Troop,
};
use hexrealm_map::{Hex, Map, Spread};

use crate::kind::Revertible;
use crate::region::with_res;

fn troop_at(map: &Map, pos: Pos) -> Option<Troop> {
    map.at(pos).and_then(|hex| hex.troop().map(|t| t.clone()))
}

#[derive(Clone, Debug, PartialEq)]
struct Captured {
    team: Team,
    res: RegionRes,
    occupant: EntState,
    joined: bool,
}

/// Move a troop onto another tile.
///
/// The destination's occupant is removed. When the destination belongs to
/// a different region than the origin, it switches to the mover's team and
/// joins the mover's region.
///
/// On revert the troop walks back and the occupant returns. A destination
/// that changed region rejoins a neighboring region of its old team, or a
/// fresh one seeded with the old region's resources when no neighbor of
/// that team is left. Region identity is not preserved, only its team and
/// contents.
#[derive(Clone, Debug, PartialEq)]
pub struct TroopMove {
    /// Tile the troop stands on.
    pub from: Pos,
    /// Tile the troop moves to.
    pub dest: Pos,
    captured: Option<Captured>,
}

impl TroopMove {
    /// Create the move.
    pub fn new(from: Pos, dest: Pos) -> Self {
        Self {
            from,
            dest,
            captured: None,
        }
    }
}

impl Revertible for TroopMove {
    fn apply(&mut self, map: &mut Map) {
        if self.from == self.dest {
            tracing::trace!(pos = %self.from, "troop move in place");
            return;
        }
        let Some(dest_team) = map.at(self.dest).map(|hex| hex.team) else {
            tracing::trace!(dest = %self.dest, "troop move off the map");
            return;
        };
        let (Some(mut troop), Some(team)) = (
            troop_at(map, self.from),
            map.at(self.from).map(|hex| hex.team),
        ) else {
            tracing::trace!(from = %self.from, "troop move without a troop");
            return;
        };

        let res = map
            .region_at(self.dest)
            .map(|r| r.get().res)
            .unwrap_or_default();
        let occupant = map.remove_entity(self.dest);

        let region = map.region_at(self.from);
        let joined = region != map.region_at(self.dest);
        if joined {
            map.set_team(self.dest, team, region);
        }

        map.remove_entity(self.from);
        troop.entity.pos = self.dest;
        map.set_troop(troop);

        self.captured = Some(Captured {
            team: dest_team,
            res,
            occupant,
            joined,
        });
    }

    fn revert(&mut self, map: &mut Map) {
        let Some(cap) = self.captured.take() else {
            return;
        };
        if let Some(mut troop) = troop_at(map, self.dest) {
            map.remove_entity(self.dest);
            troop.entity.pos = self.from;
            map.set_troop(troop);
        }

        if cap.joined {
            let region = if cap.team.is_claimed() {
                match map.region_near(self.dest, cap.team) {
                    Some(r) => Some(r),
                    None => Some(map.new_region(cap.team, cap.res)),
                }
            } else {
                None
            };
            map.set_team(self.dest, cap.team, region);
        }

        map.set_entity(cap.occupant);
    }
}

/// Attack the occupant of a tile with a troop.
///
/// Attacking consumes the attacker's range boost. A target brought to zero
/// hitpoints is replaced by a grave.
#[derive(Clone, Debug, PartialEq)]
pub struct TroopAttack {
    /// Tile the attacker stands on.
    pub from: Pos,
    /// Tile of the target.
    pub dest: Pos,
    captured: Option<(EntState, Vec<EffectType>)>,
}

impl TroopAttack {
    /// Create the move.
    pub fn new(from: Pos, dest: Pos) -> Self {
        Self {
            from,
            dest,
            captured: None,
        }
    }
}

impl Revertible for TroopAttack {
    fn apply(&mut self, map: &mut Map) {
        let Some(attacker) = troop_at(map, self.from) else {
            tracing::trace!(from = %self.from, "attack without an attacker");
            return;
        };
        let target = map.entity(self.dest);
        let Some(defender) = target.entity() else {
            tracing::trace!(dest = %self.dest, "attack without a target");
            return;
        };
        let dmg = logic::attack_damage(&attacker, defender);

        if let Some(mut t) = map.at_mut(self.from).and_then(Hex::troop_mut) {
            t.entity.remove_effect(EffectType::RangeBoost);
        }
        let dead = match map.at_mut(self.dest).and_then(Hex::entity_mut) {
            Some(mut e) => {
                e.damage(dmg);
                e.dead()
            }
            None => false,
        };
        if dead {
            map.set_plant(Plant::new(PlantType::Grave, self.dest));
        }

        self.captured = Some((target, attacker.entity.effects().to_vec()));
    }

    fn revert(&mut self, map: &mut Map) {
        let Some((target, effects)) = self.captured.take() else {
            return;
        };
        if let Some(mut t) = map.at_mut(self.from).and_then(Hex::troop_mut) {
            t.entity.set_effects(&effects);
        }
        map.set_entity(target);
    }
}

/// Merge the troop at `from` into the troop at `dest`.
///
/// The merged troop takes the type from [`logic::troop_merge`], the summed
/// hitpoints plus one (capped at its maximum) and fresh timers with one
/// turn of withdraw cooldown. Pairs without a merge result are left alone.
#[derive(Clone, Debug, PartialEq)]
pub struct TroopMerge {
    /// Tile of the troop that is absorbed.
    pub from: Pos,
    /// Tile of the troop that absorbs it.
    pub dest: Pos,
    captured: Option<(Troop, Troop)>,
}

impl TroopMerge {
    /// Create the move.
    pub fn new(from: Pos, dest: Pos) -> Self {
        Self {
            from,
            dest,
            captured: None,
        }
    }
}

impl Revertible for TroopMerge {
    fn apply(&mut self, map: &mut Map) {
        if self.from == self.dest {
            tracing::trace!(pos = %self.from, "troop merged with itself");
            return;
        }
        let (Some(moved), Some(target)) = (troop_at(map, self.from), troop_at(map, self.dest))
        else {
            tracing::trace!(from = %self.from, dest = %self.dest, "merge without two troops");
            return;
        };
        let Some(kind) = logic::troop_merge(moved.kind, target.kind) else {
            tracing::trace!(a = ?moved.kind, b = ?target.kind, "troops cannot merge");
            return;
        };

        let mut merged = target.clone();
        merged.kind = kind;
        merged.entity.hp = (moved.entity.hp + target.entity.hp + 1).min(merged.max_hp());
        merged.entity.timers = [0; 4];
        merged.entity.add_cooldown(SkillType::Withdraw, 1);

        map.set_troop(merged);
        map.remove_entity(self.from);
        self.captured = Some((moved, target));
    }

    fn revert(&mut self, map: &mut Map) {
        let Some((moved, target)) = self.captured.take() else {
            return;
        };
        map.set_troop(moved);
        map.set_troop(target);
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Healed {
    hp: Vec<(Pos, i32)>,
    berry: i32,
}

/// Heal damaged troops of one team around a tile, paying in berries.
///
/// Each troop regains up to `heal` hitpoints, never past its maximum. The
/// region at `mid` pays [`BERRY_PER_HP`] berries per hitpoint restored.
/// The search only crosses solid tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct TroopHeal {
    /// Center of the area.
    pub mid: Pos,
    /// Search radius, the center being the first ring.
    pub radius: u64,
    /// Hitpoints restored per troop.
    pub heal: i32,
    /// Team whose troops are healed.
    pub team: Team,
    healed: Option<Healed>,
}

impl TroopHeal {
    /// Create the move.
    pub fn new(mid: Pos, radius: u64, heal: i32, team: Team) -> Self {
        Self {
            mid,
            radius,
            heal,
            team,
            healed: None,
        }
    }
}

impl Revertible for TroopHeal {
    fn apply(&mut self, map: &mut Map) {
        if !map.contains(self.mid) {
            tracing::trace!(mid = %self.mid, "heal outside the map");
            return;
        }
        let team = self.team;
        let targets = Spread::solid()
            .pass(move |_, hex| {
                hex.team == team && hex.troop().is_some_and(|t| t.entity.hp < t.max_hp())
            })
            .collect(map, self.mid, self.radius);

        let mut healed = Healed {
            hp: Vec::with_capacity(targets.len()),
            berry: 0,
        };
        for pos in targets {
            let Some(mut t) = map.at_mut(pos).and_then(Hex::troop_mut) else {
                continue;
            };
            let amount = (t.max_hp() - t.entity.hp).min(self.heal).max(0);
            healed.hp.push((pos, t.entity.hp));
            healed.berry += amount * BERRY_PER_HP;
            t.entity.hp += amount;
        }
        let berry = healed.berry;
        with_res(map, self.mid, |res| res.berry -= berry);
        self.healed = Some(healed);
    }

    fn revert(&mut self, map: &mut Map) {
        let Some(healed) = self.healed.take() else {
            return;
        };
        for (pos, hp) in healed.hp {
            if let Some(mut t) = map.at_mut(pos).and_then(Hex::troop_mut) {
                t.entity.hp = hp;
            }
        }
        with_res(map, self.mid, |res| res.berry += healed.berry);
    }
}

/// Apply a status effect to every enemy troop around a tile.
///
/// Troops on tiles of any team other than `team` are affected.
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusEffect {
    /// Center of the area.
    pub mid: Pos,
    /// Search radius, the center being the first ring.
    pub radius: u64,
    /// Effect to apply.
    pub effect: EffectType,
    /// Team casting the effect.
    pub team: Team,
    added: Option<Vec<Pos>>,
}

impl RadiusEffect {
    /// Create the move.
    pub fn new(mid: Pos, radius: u64, effect: EffectType, team: Team) -> Self {
        Self {
            mid,
            radius,
            effect,
            team,
            added: None,
        }
    }
}

impl Revertible for RadiusEffect {
    fn apply(&mut self, map: &mut Map) {
        if !map.contains(self.mid) {
            tracing::trace!(mid = %self.mid, "radius effect outside the map");
            return;
        }
        let team = self.team;
        let targets = Spread::new()
            .pass(move |_, hex| hex.team != team && hex.troop().is_some())
            .collect(map, self.mid, self.radius);

        let mut added = Vec::new();
        for pos in targets {
            let Some(mut t) = map.at_mut(pos).and_then(Hex::troop_mut) else {
                continue;
            };
            if !t.entity.has_effect(self.effect) {
                t.entity.add_effect(self.effect);
                added.push(pos);
            }
        }
        self.added = Some(added);
    }

    fn revert(&mut self, map: &mut Map) {
        let Some(added) = self.added.take() else {
            return;
        };
        for pos in added {
            if let Some(mut t) = map.at_mut(pos).and_then(Hex::troop_mut) {
                t.entity.remove_effect(self.effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexrealm_core::{BuildType, HexType, TroopType};
    use hexrealm_test_utils::fixtures::{digest, duel_builder, DUEL_RES};
    use hexrealm_test_utils::TestMapBuilder;

    fn hp_at(map: &Map, pos: Pos) -> i32 {
        map.at(pos).unwrap().troop().unwrap().entity.hp
    }

    fn wound(map: &mut Map, pos: Pos, hp: i32) {
        map.at_mut(pos).and_then(Hex::troop_mut).unwrap().entity.hp = hp;
    }

    #[test]
    fn move_into_enemy_land_and_back() {
        let from = Pos::new(3, 1);
        let dest = Pos::new(4, 1);
        let mut map = duel_builder()
            .with_troop(TroopType::Knight, from)
            .with_build(BuildType::Farm, dest)
            .finish();
        let before = digest(&map);

        let mut mv = TroopMove::new(from, dest);
        mv.apply(&mut map);
        assert_eq!(map.at(dest).unwrap().team, Team::Red);
        assert!(map.at(from).unwrap().free());
        assert_eq!(map.build_count(), 0);
        assert_eq!(map.region_at(dest), map.region_at(from));
        assert!(map.check_regions().is_ok());

        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
        assert!(map.check_regions().is_ok());
    }

    #[test]
    fn move_capturing_a_whole_region_recreates_it() {
        let from = Pos::new(1, 1);
        let dest = Pos::new(2, 1);
        let mut map = TestMapBuilder::new(5, 3)
            .bands(&[Team::Red])
            .resources(DUEL_RES)
            .with_troop(TroopType::Spearman, from)
            .finish();
        // Carve out a one-tile blue region.
        let blue = map.new_region(Team::Blue, RegionRes { money: 9, berry: 8, peach: 7 });
        map.set_team(dest, Team::Blue, Some(blue));
        let before = digest(&map);
        assert_eq!(map.region_count(), 2);

        let mut mv = TroopMove::new(from, dest);
        mv.apply(&mut map);
        assert_eq!(map.region_count(), 1);

        mv.revert(&mut map);
        assert_eq!(map.region_count(), 2);
        assert_eq!(digest(&map), before);
        assert_eq!(map.region_at(dest).unwrap().get().res.money, 9);
    }

    #[test]
    fn move_onto_unclaimed_land_reverts_to_no_region() {
        let from = Pos::new(0, 1);
        let dest = Pos::new(1, 1);
        let mut map = TestMapBuilder::new(4, 3)
            .with_troop(TroopType::Farmer, from)
            .finish();
        let red = map.new_region(Team::Red, RegionRes::default());
        map.set_team(from, Team::Red, Some(red));
        let before = digest(&map);

        let mut mv = TroopMove::new(from, dest);
        mv.apply(&mut map);
        assert_eq!(map.at(dest).unwrap().team, Team::Red);
        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
        assert!(map.region_at(dest).is_none());
    }

    #[test]
    fn move_inside_own_region_keeps_region() {
        let from = Pos::new(1, 1);
        let dest = Pos::new(2, 1);
        let mut map = duel_builder().with_troop(TroopType::Archer, from).finish();
        let before = digest(&map);
        let mut mv = TroopMove::new(from, dest);
        mv.apply(&mut map);
        assert_eq!(map.troops()[0].entity.pos, dest);
        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
    }

    #[test]
    fn degenerate_moves_are_noops() {
        let from = Pos::new(1, 1);
        let mut map = duel_builder().with_troop(TroopType::Archer, from).finish();
        let before = digest(&map);
        for mut mv in [
            TroopMove::new(from, from),
            TroopMove::new(Pos::new(2, 2), Pos::new(2, 3)),
            TroopMove::new(from, Pos::new(40, 1)),
        ] {
            mv.apply(&mut map);
            assert_eq!(digest(&map), before);
            mv.revert(&mut map);
            assert_eq!(digest(&map), before);
        }
    }

    #[test]
    fn attack_strips_range_boost_and_restores_it() {
        let from = Pos::new(3, 3);
        let dest = Pos::new(4, 3);
        let mut map = duel_builder()
            .with_troop(TroopType::Archer, from)
            .with_troop(TroopType::Baron, dest)
            .finish();
        map.at_mut(from)
            .and_then(Hex::troop_mut)
            .unwrap()
            .entity
            .add_effect(EffectType::RangeBoost);
        let before = digest(&map);

        let mut mv = TroopAttack::new(from, dest);
        mv.apply(&mut map);
        let boosted = map.at(from).unwrap().troop().unwrap().entity.has_effect(EffectType::RangeBoost);
        assert!(!boosted);
        assert_eq!(hp_at(&map, dest), logic::troop_hp(TroopType::Baron) - logic::troop_dmg(TroopType::Archer));

        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
    }

    #[test]
    fn lethal_attack_leaves_a_grave() {
        let from = Pos::new(3, 3);
        let dest = Pos::new(4, 3);
        let mut map = duel_builder()
            .with_troop(TroopType::Knight, from)
            .with_troop(TroopType::Farmer, dest)
            .finish();
        let before = digest(&map);

        let mut mv = TroopAttack::new(from, dest);
        mv.apply(&mut map);
        match map.entity(dest) {
            EntState::Plant(p) => assert_eq!(p.kind, PlantType::Grave),
            other => panic!("expected a grave, got {other:?}"),
        }
        assert_eq!(map.troop_count(), 1);

        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
        assert_eq!(map.plant_count(), 0);
    }

    #[test]
    fn heal_charges_berries_per_hitpoint() {
        let mid = Pos::new(1, 3);
        let near = Pos::new(2, 3);
        let enemy = Pos::new(4, 3);
        let mut map = duel_builder()
            .with_troop(TroopType::Knight, near)
            .with_troop(TroopType::Baron, mid)
            .with_troop(TroopType::Knight, enemy)
            .finish();
        wound(&mut map, near, 1);
        wound(&mut map, mid, 3);
        wound(&mut map, enemy, 1);
        let before = digest(&map);

        let mut mv = TroopHeal::new(mid, 4, 2, Team::Red);
        mv.apply(&mut map);
        assert_eq!(hp_at(&map, near), 3);
        assert_eq!(hp_at(&map, mid), 4);
        assert_eq!(hp_at(&map, enemy), 1);
        let spent = (2 + 1) * BERRY_PER_HP;
        assert_eq!(map.region_at(mid).unwrap().get().res.berry, DUEL_RES.berry - spent);

        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
    }

    #[test]
    fn heal_does_not_cross_water() {
        let mid = Pos::new(0, 1);
        let far = Pos::new(2, 1);
        let mut map = TestMapBuilder::new(4, 3)
            .bands(&[Team::Red])
            .water(Pos::new(1, 0))
            .water(Pos::new(1, 1))
            .water(Pos::new(1, 2))
            .water(Pos::new(0, 0))
            .water(Pos::new(0, 2))
            .with_troop(TroopType::Knight, far)
            .finish();
        assert_eq!(map.at(Pos::new(1, 1)).unwrap().kind, HexType::Water);
        wound(&mut map, far, 1);
        let mut mv = TroopHeal::new(mid, Spread::UNBOUNDED, 5, Team::Red);
        mv.apply(&mut map);
        assert_eq!(hp_at(&map, far), 1);
    }

    #[test]
    fn radius_effect_only_touches_enemies_without_it() {
        let mid = Pos::new(3, 3);
        let ally = Pos::new(2, 3);
        let fresh = Pos::new(4, 3);
        let stunned = Pos::new(5, 3);
        let mut map = duel_builder()
            .with_troop(TroopType::Farmer, ally)
            .with_troop(TroopType::Farmer, fresh)
            .with_troop(TroopType::Farmer, stunned)
            .finish();
        map.at_mut(stunned)
            .and_then(Hex::troop_mut)
            .unwrap()
            .entity
            .add_effect(EffectType::Stunned);
        let before = digest(&map);

        let mut mv = RadiusEffect::new(mid, 3, EffectType::Stunned, Team::Red);
        mv.apply(&mut map);
        let has = |map: &Map, pos| {
            map.at(pos).unwrap().troop().unwrap().entity.has_effect(EffectType::Stunned)
        };
        assert!(!has(&map, ally));
        assert!(has(&map, fresh));
        assert!(has(&map, stunned));

        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
        assert!(has(&map, stunned));
    }

    #[test]
    fn merge_combines_hp_and_restores_both() {
        let from = Pos::new(1, 1);
        let dest = Pos::new(2, 1);
        let mut map = duel_builder()
            .with_troop(TroopType::Farmer, from)
            .with_troop(TroopType::Lumberjack, dest)
            .finish();
        map.at_mut(dest).and_then(Hex::troop_mut).unwrap().entity.timers = [2, 3, 0, 0];
        let before = digest(&map);

        let mut mv = TroopMerge::new(from, dest);
        mv.apply(&mut map);
        assert!(map.entity(from).is_empty());
        {
            let merged = map.at(dest).unwrap().troop().unwrap().clone();
            assert_eq!(merged.kind, TroopType::Spearman);
            assert_eq!(merged.entity.hp, logic::troop_hp(TroopType::Spearman));
            assert_eq!(merged.entity.timers, [1, 0, 0, 0]);
        }
        assert!(map.check_regions().is_ok());

        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
    }

    #[test]
    fn merge_caps_hp_at_the_new_maximum() {
        let from = Pos::new(1, 1);
        let dest = Pos::new(2, 1);
        let mut map = duel_builder()
            .with_troop(TroopType::Spearman, from)
            .with_troop(TroopType::Spearman, dest)
            .finish();
        let mut mv = TroopMerge::new(from, dest);
        mv.apply(&mut map);
        let merged = map.at(dest).unwrap().troop().unwrap().clone();
        assert_eq!(merged.kind, TroopType::Knight);
        assert_eq!(merged.entity.hp, logic::troop_hp(TroopType::Knight));
    }

    #[test]
    fn merge_of_incompatible_troops_is_a_noop() {
        let from = Pos::new(1, 1);
        let dest = Pos::new(2, 1);
        let mut map = duel_builder()
            .with_troop(TroopType::Archer, from)
            .with_troop(TroopType::Farmer, dest)
            .finish();
        let before = digest(&map);
        let mut mv = TroopMerge::new(from, dest);
        mv.apply(&mut map);
        assert_eq!(digest(&map), before);
        mv.revert(&mut map);
        assert_eq!(digest(&map), before);
    }
}
