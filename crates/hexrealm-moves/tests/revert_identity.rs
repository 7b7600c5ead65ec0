//! Any sequence of moves, undone in reverse, restores the starting map.

use std::num::NonZeroU8;

use hexrealm_core::{
    Build, BuildType, EffectType, EntState, PlantType, Pos, RegionRes, RegionVar, SkillType, Team,
    Troop, TroopType,
};
use hexrealm_map::Map;
use hexrealm_moves::{
    EntityChange, EntityEffect, EntityPlace, EntityWithdraw, GameTurn, History, Move, MoveKind,
    PlantCut, PlantMod, RadiusEffect, RegionChange, SkillHeader, TroopAttack, TroopHeal,
    TroopMerge, TroopMove,
};
use hexrealm_test_utils::fixtures::{digest, duel_builder};
use proptest::prelude::*;

fn board() -> Map {
    duel_builder()
        .with_troop(TroopType::Knight, Pos::new(2, 1))
        .with_troop(TroopType::Archer, Pos::new(3, 3))
        .with_troop(TroopType::Baron, Pos::new(5, 1))
        .with_troop(TroopType::Farmer, Pos::new(4, 4))
        .with_build(BuildType::Farm, Pos::new(1, 4))
        .with_build(BuildType::Tent, Pos::new(6, 3))
        .with_plant(PlantType::Berry, Pos::new(3, 5))
        .with_plant(PlantType::Peach, Pos::new(4, 2))
        .with_plant(PlantType::Pine, Pos::new(0, 2))
        .finish()
}

fn pos() -> impl Strategy<Value = Pos> {
    (0..8i32, 0..6i32).prop_map(|(x, y)| Pos::new(x, y))
}

fn team() -> impl Strategy<Value = Team> {
    prop_oneof![Just(Team::Red), Just(Team::Blue)]
}

fn effect() -> impl Strategy<Value = EffectType> {
    (0..7u8).prop_map(|v| EffectType::from_u8(v).unwrap_or(EffectType::Shielded))
}

fn occupant() -> impl Strategy<Value = EntState> {
    (pos(), 0..3u8).prop_map(|(p, k)| match k {
        0 => EntState::Empty { pos: p },
        1 => EntState::Troop(Troop::new(TroopType::Spearman, p)),
        _ => EntState::Build(Build::new(BuildType::Farm, p)),
    })
}

fn kind() -> impl Strategy<Value = MoveKind> {
    prop_oneof![
        occupant().prop_map(|e| EntityPlace::new(e).into()),
        pos().prop_map(|p| EntityWithdraw::new(p).into()),
        (pos(), effect(), 0..5i32).prop_map(|(p, e, n)| EntityEffect::new(p, e, n).into()),
        (pos(), pos()).prop_map(|(a, b)| TroopMove::new(a, b).into()),
        (pos(), pos()).prop_map(|(a, b)| TroopAttack::new(a, b).into()),
        (pos(), 0..5u64, 1..4i32, team())
            .prop_map(|(p, r, h, t)| TroopHeal::new(p, r, h, t).into()),
        (pos(), 0..5u64, effect(), team())
            .prop_map(|(p, r, e, t)| RadiusEffect::new(p, r, e, t).into()),
        (pos(), pos()).prop_map(|(a, b)| PlantCut::new(a, b).into()),
        (pos(), 0..5u64).prop_map(|(p, r)| PlantMod::new(p, r).into()),
        occupant().prop_map(|e| EntityChange::new(e).into()),
        (pos(), 0..50i32, 0..3i32, any::<bool>()).prop_map(|(p, m, f, d)| {
            RegionChange::new(
                p,
                RegionRes {
                    money: m,
                    berry: m / 2,
                    peach: 1,
                },
                RegionVar { farms: f, tents: 0 },
                d,
            )
            .into()
        }),
        (pos(), pos()).prop_map(|(a, b)| TroopMerge::new(a, b).into()),
        prop::collection::vec(occupant(), 0..4).prop_map(|s| GameTurn::new(s).into()),
    ]
}

fn a_move() -> impl Strategy<Value = Move> {
    (kind(), proptest::option::of((pos(), 1..4u8))).prop_map(|(kind, skill)| {
        let mv = Move::new(kind);
        match skill {
            Some((p, c)) => mv.with_skill(SkillHeader {
                pos: p,
                skill: SkillType::Move,
                cooldown: NonZeroU8::new(c).unwrap(),
            }),
            None => mv,
        }
    })
}

proptest! {
    #[test]
    fn undo_all_restores_the_board(moves in prop::collection::vec(a_move(), 1..12)) {
        let mut map = board();
        let start = digest(&map);
        let mut history = History::new();
        let mut snapshots = Vec::new();

        // Overwritten building counters no longer match the tiles.
        let mut counters_touched = false;
        for mv in moves {
            snapshots.push(digest(&map));
            counters_touched |= matches!(mv.kind, MoveKind::RegionChange(_));
            history.add(&mut map, mv);
            if !counters_touched {
                prop_assert!(map.check_regions().is_ok());
            }
        }
        while let Some(expected) = snapshots.pop() {
            history.undo(&mut map);
            prop_assert_eq!(digest(&map), expected);
        }
        prop_assert_eq!(digest(&map), start);
    }
}

#[test]
fn single_troop_move_round_trip() {
    let mut map = board();
    let before = digest(&map);
    let mut mv = Move::new(TroopMove::new(Pos::new(3, 3), Pos::new(4, 3)));
    mv.apply(&mut map);
    assert_ne!(digest(&map), before);
    mv.revert(&mut map);
    assert_eq!(digest(&map), before);
}
