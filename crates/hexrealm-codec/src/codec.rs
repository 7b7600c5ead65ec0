//! Binary encode/decode for moves and map snapshots.
//!
//! All integers are big-endian. Positions travel as two `i16`, radii as
//! `u64`, enums as one byte, strings as a `u32` length plus UTF-8 bytes.
//! Fields are read strictly left to right, each into its own binding
//! before the record is built.
//!
//! Encoders append to a `Vec<u8>` and cannot fail. Decoders read from any
//! `Read` source and reject truncated input, unknown move kinds and
//! unknown skills. Entity type bytes, occupant tags and effect bytes are
//! tolerant: out-of-range values fall back to the first variant, or to an
//! empty tile for the occupant tag.

use std::io::{self, Read};
use std::num::NonZeroU8;

use hexrealm_core::{
    Build, BuildType, EffectType, EntState, Entity, HexType, Plant, PlantType, Pos, RegionRes,
    RegionVar, SkillType, Team, Troop, TroopType,
};
use hexrealm_map::{HexBase, Map, MapTemplate, Region, RegionSeed};
use hexrealm_moves::{
    EntityChange, EntityEffect, EntityPlace, EntityWithdraw, GameTurn, Move, MoveKind, PlantCut,
    PlantMod, RadiusEffect, RegionChange, SkillHeader, TroopAttack, TroopHeal, TroopMerge,
    TroopMove,
};

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::MAP_SIGNATURE;

// ── Primitive writers ───────────────────────────────────────────

/// Append a single byte.
pub fn write_u8(buf: &mut Vec<u8>, v: u8) {
    buf.push(v);
}

/// Append a bool as one byte.
pub fn write_bool(buf: &mut Vec<u8>, v: bool) {
    buf.push(v as u8);
}

/// Append a big-endian i16.
pub fn write_i16(buf: &mut Vec<u8>, v: i16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Append a big-endian i32.
pub fn write_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Append a big-endian u32.
pub fn write_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Append a big-endian u64.
pub fn write_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Append a length-prefixed UTF-8 string.
pub fn write_str(buf: &mut Vec<u8>, s: &str) {
    write_u32(buf, s.len() as u32);
    buf.extend_from_slice(s.as_bytes());
}

/// Append a position. Coordinates outside the `i16` range saturate.
pub fn write_pos(buf: &mut Vec<u8>, pos: Pos) {
    let clamp = |v: i32| v.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    write_i16(buf, clamp(pos.x));
    write_i16(buf, clamp(pos.y));
}

// ── Primitive readers ───────────────────────────────────────────

/// Read exactly `N` bytes; `what` names them in the truncation error.
pub fn read_bytes<const N: usize>(
    r: &mut dyn Read,
    what: &'static str,
) -> Result<[u8; N], CodecError> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CodecError::Truncated { what },
        _ => CodecError::Io(e),
    })?;
    Ok(buf)
}

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, CodecError> {
    let [b] = read_bytes::<1>(r, "u8")?;
    Ok(b)
}

/// Read a bool; any non-zero byte is `true`.
pub fn read_bool(r: &mut dyn Read) -> Result<bool, CodecError> {
    Ok(read_u8(r)? != 0)
}

/// Read a big-endian i16.
pub fn read_i16(r: &mut dyn Read) -> Result<i16, CodecError> {
    Ok(i16::from_be_bytes(read_bytes(r, "i16")?))
}

/// Read a big-endian i32.
pub fn read_i32(r: &mut dyn Read) -> Result<i32, CodecError> {
    Ok(i32::from_be_bytes(read_bytes(r, "i32")?))
}

/// Read a big-endian u32.
pub fn read_u32(r: &mut dyn Read) -> Result<u32, CodecError> {
    Ok(u32::from_be_bytes(read_bytes(r, "u32")?))
}

/// Read a big-endian u64.
pub fn read_u64(r: &mut dyn Read) -> Result<u64, CodecError> {
    Ok(u64::from_be_bytes(read_bytes(r, "u64")?))
}

/// Read a length-prefixed UTF-8 string of at most `max` bytes.
pub fn read_str(r: &mut dyn Read, max: usize) -> Result<String, CodecError> {
    let len = read_u32(r)? as usize;
    if len > max {
        return Err(CodecError::LengthLimit {
            what: "string",
            len: len as i64,
            max,
        });
    }
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CodecError::Truncated { what: "string" },
        _ => CodecError::Io(e),
    })?;
    String::from_utf8(buf).map_err(|_| CodecError::InvalidUtf8)
}

/// Read a position.
pub fn read_pos(r: &mut dyn Read) -> Result<Pos, CodecError> {
    let x = read_i16(r)?;
    let y = read_i16(r)?;
    Ok(Pos::new(x as i32, y as i32))
}

/// Read an `i32` list length and check it against `max`.
fn read_count(r: &mut dyn Read, what: &'static str, max: usize) -> Result<usize, CodecError> {
    let len = read_i32(r)?;
    if len < 0 || len as usize > max {
        return Err(CodecError::LengthLimit {
            what,
            len: len as i64,
            max,
        });
    }
    Ok(len as usize)
}

// ── Tiles and regions ───────────────────────────────────────────

/// Pack terrain and owner into one byte: `team << 4 | kind`.
pub fn encode_hex(hex: HexBase) -> u8 {
    (hex.team as u8) << 4 | hex.kind as u8
}

/// Unpack a tile byte. Only the low two bits carry terrain; an owner
/// outside the team range becomes `Unclaimed`.
pub fn decode_hex(byte: u8) -> HexBase {
    let kind = HexType::from_u8(byte & 0x3).unwrap_or_default();
    let team = Team::clamped(byte >> 4);
    HexBase { kind, team }
}

/// Append region resources.
pub fn encode_res(buf: &mut Vec<u8>, res: &RegionRes) {
    write_i32(buf, res.money);
    write_i32(buf, res.berry);
    write_i32(buf, res.peach);
}

/// Read region resources.
pub fn decode_res(r: &mut dyn Read) -> Result<RegionRes, CodecError> {
    let money = read_i32(r)?;
    let berry = read_i32(r)?;
    let peach = read_i32(r)?;
    Ok(RegionRes {
        money,
        berry,
        peach,
    })
}

/// Append region building counters.
pub fn encode_var(buf: &mut Vec<u8>, var: &RegionVar) {
    write_i32(buf, var.farms);
    write_i32(buf, var.tents);
}

/// Read region building counters.
pub fn decode_var(r: &mut dyn Read) -> Result<RegionVar, CodecError> {
    let farms = read_i32(r)?;
    let tents = read_i32(r)?;
    Ok(RegionVar { farms, tents })
}

/// Append a region record: resources, income, tiles, farms, tents.
///
/// Team and elimination flag are not part of the record.
pub fn encode_region(buf: &mut Vec<u8>, region: &Region) {
    encode_res(buf, &region.res);
    write_i32(buf, region.income);
    write_i32(buf, region.tiles);
    encode_var(buf, &region.var);
}

/// Read a region record.
pub fn decode_region(r: &mut dyn Read) -> Result<Region, CodecError> {
    let res = decode_res(r)?;
    let income = read_i32(r)?;
    let tiles = read_i32(r)?;
    let var = decode_var(r)?;
    Ok(Region {
        res,
        var,
        income,
        tiles,
        ..Region::default()
    })
}

// ── Entities ────────────────────────────────────────────────────

/// Append the shared entity fields.
pub fn encode_entity(buf: &mut Vec<u8>, entity: &Entity) {
    write_pos(buf, entity.pos);
    write_i32(buf, entity.hp);
    buf.extend_from_slice(&entity.timers);
    let effects = entity.effects();
    write_u8(buf, effects.len() as u8);
    for &effect in effects {
        write_u8(buf, effect as u8);
    }
}

/// Read the shared entity fields.
pub fn decode_entity(r: &mut dyn Read) -> Result<Entity, CodecError> {
    let pos = read_pos(r)?;
    let hp = read_i32(r)?;
    let timers = read_bytes::<4>(r, "timers")?;
    let count = read_u8(r)?;
    let mut effects = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let byte = read_u8(r)?;
        effects.push(effect_or_first(byte));
    }
    let mut entity = Entity::new(pos, hp);
    entity.timers = timers;
    entity.set_effects(&effects);
    Ok(entity)
}

fn effect_or_first(byte: u8) -> EffectType {
    EffectType::from_u8(byte).unwrap_or(EffectType::ALL[0])
}

/// Append a troop.
pub fn encode_troop(buf: &mut Vec<u8>, troop: &Troop) {
    encode_entity(buf, &troop.entity);
    write_u8(buf, troop.kind as u8);
}

/// Read a troop.
pub fn decode_troop(r: &mut dyn Read) -> Result<Troop, CodecError> {
    let entity = decode_entity(r)?;
    let kind = TroopType::from_u8(read_u8(r)?).unwrap_or_default();
    Ok(Troop { entity, kind })
}

/// Append a building.
pub fn encode_build(buf: &mut Vec<u8>, build: &Build) {
    encode_entity(buf, &build.entity);
    write_u8(buf, build.kind as u8);
}

/// Read a building.
pub fn decode_build(r: &mut dyn Read) -> Result<Build, CodecError> {
    let entity = decode_entity(r)?;
    let kind = BuildType::from_u8(read_u8(r)?).unwrap_or_default();
    Ok(Build { entity, kind })
}

/// Append a plant.
pub fn encode_plant(buf: &mut Vec<u8>, plant: &Plant) {
    encode_entity(buf, &plant.entity);
    write_u8(buf, plant.kind as u8);
}

/// Read a plant.
pub fn decode_plant(r: &mut dyn Read) -> Result<Plant, CodecError> {
    let entity = decode_entity(r)?;
    let kind = PlantType::from_u8(read_u8(r)?).unwrap_or_default();
    Ok(Plant { entity, kind })
}

const STATE_EMPTY: u8 = 0;
const STATE_TROOP: u8 = 1;
const STATE_BUILD: u8 = 2;
const STATE_PLANT: u8 = 3;

/// Append an occupant snapshot: tag byte, then the record or, for an
/// empty tile, its position.
pub fn encode_ent_state(buf: &mut Vec<u8>, state: &EntState) {
    match state {
        EntState::Empty { pos } => {
            write_u8(buf, STATE_EMPTY);
            write_pos(buf, *pos);
        }
        EntState::Troop(t) => {
            write_u8(buf, STATE_TROOP);
            encode_troop(buf, t);
        }
        EntState::Build(b) => {
            write_u8(buf, STATE_BUILD);
            encode_build(buf, b);
        }
        EntState::Plant(p) => {
            write_u8(buf, STATE_PLANT);
            encode_plant(buf, p);
        }
    }
}

/// Read an occupant snapshot. Unknown tags read as an empty tile.
pub fn decode_ent_state(r: &mut dyn Read) -> Result<EntState, CodecError> {
    let tag = read_u8(r)?;
    Ok(match tag {
        STATE_TROOP => EntState::Troop(decode_troop(r)?),
        STATE_BUILD => EntState::Build(decode_build(r)?),
        STATE_PLANT => EntState::Plant(decode_plant(r)?),
        _ => {
            let pos = read_pos(r)?;
            EntState::Empty { pos }
        }
    })
}

// ── Moves ───────────────────────────────────────────────────────

/// Append a move: skill header, kind tag, payload.
pub fn encode_move(buf: &mut Vec<u8>, mv: &Move) {
    match &mv.skill {
        Some(skill) => {
            write_u8(buf, skill.cooldown.get());
            write_pos(buf, skill.pos);
            write_u8(buf, skill.skill as u8);
        }
        None => write_u8(buf, 0),
    }

    write_u8(buf, mv.kind.tag());
    match &mv.kind {
        MoveKind::EntityPlace(m) => encode_ent_state(buf, &m.entity),
        MoveKind::EntityWithdraw(m) => write_pos(buf, m.pos),
        MoveKind::EntityEffect(m) => {
            write_pos(buf, m.pos);
            write_u8(buf, m.effect as u8);
            write_i32(buf, m.peach);
        }
        MoveKind::TroopMove(m) => {
            write_pos(buf, m.from);
            write_pos(buf, m.dest);
        }
        MoveKind::TroopAttack(m) => {
            write_pos(buf, m.from);
            write_pos(buf, m.dest);
        }
        MoveKind::TroopHeal(m) => {
            write_pos(buf, m.mid);
            write_u64(buf, m.radius);
            write_i32(buf, m.heal);
            write_u8(buf, m.team as u8);
        }
        MoveKind::RadiusEffect(m) => {
            write_pos(buf, m.mid);
            write_u64(buf, m.radius);
            write_u8(buf, m.effect as u8);
            write_u8(buf, m.team as u8);
        }
        MoveKind::PlantCut(m) => {
            write_pos(buf, m.from);
            write_pos(buf, m.pos);
        }
        MoveKind::PlantMod(m) => {
            write_pos(buf, m.mid);
            write_u64(buf, m.radius);
        }
        MoveKind::EntityChange(m) => encode_ent_state(buf, &m.state),
        MoveKind::RegionChange(m) => {
            write_pos(buf, m.pos);
            encode_res(buf, &m.res);
            encode_var(buf, &m.var);
            write_bool(buf, m.dead);
        }
        MoveKind::TroopMerge(m) => {
            write_pos(buf, m.from);
            write_pos(buf, m.dest);
        }
        MoveKind::GameTurn(m) => encode_list(buf, &m.states, encode_ent_state),
    }
}

/// Read a move.
///
/// The skill header is validated before the kind tag is read.
pub fn decode_move(r: &mut dyn Read) -> Result<Move, CodecError> {
    let cooldown = read_u8(r)?;
    let skill = match NonZeroU8::new(cooldown) {
        Some(cooldown) => {
            let pos = read_pos(r)?;
            let tag = read_u8(r)?;
            let skill = SkillType::from_u8(tag).ok_or(CodecError::UnknownSkill { tag })?;
            Some(SkillHeader {
                pos,
                skill,
                cooldown,
            })
        }
        None => None,
    };

    let tag = read_u8(r)?;
    let kind: MoveKind = match tag {
        0 => {
            let entity = decode_ent_state(r)?;
            EntityPlace::new(entity).into()
        }
        1 => {
            let pos = read_pos(r)?;
            EntityWithdraw::new(pos).into()
        }
        2 => {
            let pos = read_pos(r)?;
            let effect = effect_or_first(read_u8(r)?);
            let peach = read_i32(r)?;
            EntityEffect::new(pos, effect, peach).into()
        }
        3 => {
            let from = read_pos(r)?;
            let dest = read_pos(r)?;
            TroopMove::new(from, dest).into()
        }
        4 => {
            let from = read_pos(r)?;
            let dest = read_pos(r)?;
            TroopAttack::new(from, dest).into()
        }
        5 => {
            let mid = read_pos(r)?;
            let radius = read_u64(r)?;
            let heal = read_i32(r)?;
            let team = Team::clamped(read_u8(r)?);
            TroopHeal::new(mid, radius, heal, team).into()
        }
        6 => {
            let mid = read_pos(r)?;
            let radius = read_u64(r)?;
            let effect = effect_or_first(read_u8(r)?);
            let team = Team::clamped(read_u8(r)?);
            RadiusEffect::new(mid, radius, effect, team).into()
        }
        7 => {
            let from = read_pos(r)?;
            let pos = read_pos(r)?;
            PlantCut::new(from, pos).into()
        }
        8 => {
            let mid = read_pos(r)?;
            let radius = read_u64(r)?;
            PlantMod::new(mid, radius).into()
        }
        9 => {
            let state = decode_ent_state(r)?;
            EntityChange::new(state).into()
        }
        10 => {
            let pos = read_pos(r)?;
            let res = decode_res(r)?;
            let var = decode_var(r)?;
            let dead = read_bool(r)?;
            RegionChange::new(pos, res, var, dead).into()
        }
        11 => {
            let from = read_pos(r)?;
            let dest = read_pos(r)?;
            TroopMerge::new(from, dest).into()
        }
        12 => {
            let states = decode_list(
                r,
                "turn states",
                CodecConfig::DEFAULT_MAX_LIST_LEN,
                decode_ent_state,
            )?;
            GameTurn::new(states).into()
        }
        tag => return Err(CodecError::UnknownMoveKind { tag }),
    };

    Ok(Move { skill, kind })
}

/// Encode one move as a standalone message.
pub fn encode_message(mv: &Move) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_move(&mut buf, mv);
    buf
}

/// Decode a standalone message.
///
/// A message that fails to decode is dropped: the failure is logged and
/// `None` returned. Decoding is stateless, so a bad message never affects
/// the next one.
pub fn decode_message(bytes: &[u8]) -> Option<Move> {
    let mut r = bytes;
    match decode_move(&mut r) {
        Ok(mv) => {
            if !r.is_empty() {
                tracing::debug!(trailing = r.len(), kind = mv.kind.name(), "message has trailing bytes");
            }
            Some(mv)
        }
        Err(e) => {
            tracing::warn!(error = %e, len = bytes.len(), "dropped undecodable message");
            None
        }
    }
}

// ── Map snapshots ───────────────────────────────────────────────

fn encode_list<T>(buf: &mut Vec<u8>, items: &[T], mut f: impl FnMut(&mut Vec<u8>, &T)) {
    write_i32(buf, items.len() as i32);
    for item in items {
        f(buf, item);
    }
}

fn decode_list<T>(
    r: &mut dyn Read,
    what: &'static str,
    max: usize,
    mut f: impl FnMut(&mut dyn Read) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    let count = read_count(r, what, max)?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(f(r)?);
    }
    Ok(items)
}

/// Append a map template.
///
/// Layout: signature, name, author, width and height as `i16`, one tile
/// byte per storage cell row-major, the troop, building and plant lists,
/// then the region seeds (resources plus member position).
pub fn encode_template(buf: &mut Vec<u8>, template: &MapTemplate) {
    buf.extend_from_slice(&MAP_SIGNATURE);
    write_str(buf, &template.name);
    write_str(buf, &template.author);
    write_i16(buf, template.width.min(i16::MAX as u32) as i16);
    write_i16(buf, template.height.min(i16::MAX as u32) as i16);
    for &hex in &template.tiles {
        write_u8(buf, encode_hex(hex));
    }
    encode_list(buf, &template.troops, encode_troop);
    encode_list(buf, &template.builds, encode_build);
    encode_list(buf, &template.plants, encode_plant);
    encode_list(buf, &template.regions, |buf, seed| {
        encode_res(buf, &seed.res);
        write_pos(buf, seed.pos);
    });
}

/// Read a map template.
pub fn decode_template(r: &mut dyn Read, config: &CodecConfig) -> Result<MapTemplate, CodecError> {
    let signature = read_bytes::<4>(r, "signature")?;
    if signature != MAP_SIGNATURE {
        return Err(CodecError::InvalidSignature);
    }
    let name = read_str(r, config.max_string_len)?;
    let author = read_str(r, config.max_string_len)?;

    let width = read_i16(r)?;
    let height = read_i16(r)?;
    let cells = width as i64 * height as i64;
    if width < 0 || height < 0 || cells > config.max_list_len as i64 {
        return Err(CodecError::LengthLimit {
            what: "tiles",
            len: cells,
            max: config.max_list_len,
        });
    }
    let mut tiles = Vec::with_capacity(cells as usize);
    for _ in 0..cells {
        tiles.push(decode_hex(read_u8(r)?));
    }

    let max = config.max_list_len;
    let troops = decode_list(r, "troops", max, decode_troop)?;
    let builds = decode_list(r, "builds", max, decode_build)?;
    let plants = decode_list(r, "plants", max, decode_plant)?;
    let regions = decode_list(r, "regions", max, |r| {
        let res = decode_res(r)?;
        let pos = read_pos(r)?;
        Ok(RegionSeed { res, pos })
    })?;

    Ok(MapTemplate {
        name,
        author,
        width: width as u32,
        height: height as u32,
        tiles,
        troops,
        builds,
        plants,
        regions,
    })
}

/// Append a snapshot of `map`.
pub fn encode_map(buf: &mut Vec<u8>, map: &Map) {
    encode_template(buf, &map.to_template());
}

/// Read a snapshot and rebuild the map it describes.
///
/// Regions are re-enumerated from the tiles and their resources restored
/// by member position.
pub fn decode_map(r: &mut dyn Read, config: &CodecConfig) -> Result<Map, CodecError> {
    let template = decode_template(r, config)?;
    Ok(Map::from_template(&template)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexrealm_core::logic;
    use proptest::prelude::*;

    fn decode(bytes: &[u8]) -> Result<Move, CodecError> {
        let mut r = bytes;
        decode_move(&mut r)
    }

    fn troop_with_state() -> Troop {
        let mut t = Troop::new(TroopType::Archer, Pos::new(3, -2));
        t.entity.hp = 1;
        t.entity.timers = [1, 0, 3, 0];
        t.entity.add_effect(EffectType::Poisoned);
        t.entity.add_effect(EffectType::RangeBoost);
        t
    }

    #[test]
    fn troop_move_layout() {
        let mv = Move::new(TroopMove::new(Pos::new(1, 2), Pos::new(-1, 300)));
        let bytes = encode_message(&mv);
        assert_eq!(
            bytes,
            vec![0, 3, 0, 1, 0, 2, 0xff, 0xff, 0x01, 0x2c],
        );
    }

    #[test]
    fn skill_header_layout() {
        let mv = Move::new(EntityWithdraw::new(Pos::new(0, 1))).with_skill(SkillHeader {
            pos: Pos::new(2, 3),
            skill: SkillType::Withdraw,
            cooldown: NonZeroU8::new(4).unwrap(),
        });
        let bytes = encode_message(&mv);
        assert_eq!(bytes, vec![4, 0, 2, 0, 3, 3, 1, 0, 0, 0, 1]);
        assert_eq!(decode(&bytes).unwrap(), mv);
    }

    #[test]
    fn entity_state_keeps_timers_and_effects() {
        let mv = Move::new(EntityChange::new(EntState::Troop(troop_with_state())));
        let decoded = decode(&encode_message(&mv)).unwrap();
        assert_eq!(decoded, mv);
        let MoveKind::EntityChange(change) = decoded.kind else {
            panic!("wrong kind");
        };
        let EntState::Troop(t) = change.state else {
            panic!("wrong occupant");
        };
        assert_eq!(t.entity.effects(), &[EffectType::Poisoned, EffectType::RangeBoost]);
    }

    #[test]
    fn unknown_kind_and_skill_are_rejected() {
        assert!(matches!(
            decode(&[0, 255]),
            Err(CodecError::UnknownMoveKind { tag: 255 })
        ));
        assert!(matches!(
            decode(&[1, 0, 0, 0, 0, SkillType::COUNT as u8, 3]),
            Err(CodecError::UnknownSkill { tag }) if tag == SkillType::COUNT as u8
        ));
    }

    #[test]
    fn game_turn_count_is_bounded() {
        assert!(matches!(
            decode(&[0, 12, 0xff, 0xff, 0xff, 0xff]),
            Err(CodecError::LengthLimit { what: "turn states", .. })
        ));
        let mut bytes = vec![0, 12];
        write_i32(&mut bytes, CodecConfig::DEFAULT_MAX_LIST_LEN as i32 + 1);
        assert!(matches!(
            decode(&bytes),
            Err(CodecError::LengthLimit { what: "turn states", .. })
        ));
    }

    #[test]
    fn truncated_input_is_reported() {
        let bytes = encode_message(&Move::new(PlantMod::new(Pos::new(4, 4), 3)));
        for cut in 0..bytes.len() {
            assert!(matches!(
                decode(&bytes[..cut]),
                Err(CodecError::Truncated { .. })
            ));
        }
    }

    #[test]
    fn bad_message_does_not_poison_the_next() {
        let good = encode_message(&Move::new(EntityWithdraw::new(Pos::new(1, 1))));
        assert!(decode_message(&[0, 255, 1, 2, 3]).is_none());
        assert_eq!(
            decode_message(&good),
            Some(Move::new(EntityWithdraw::new(Pos::new(1, 1))))
        );
    }

    #[test]
    fn tolerant_entity_bytes() {
        // Troop with an out-of-range effect and type byte.
        let mut bytes = vec![0, 9, STATE_TROOP];
        bytes.extend_from_slice(&[0, 1, 0, 1]);
        bytes.extend_from_slice(&[0, 0, 0, 2]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(&[1, 200]);
        bytes.push(99);
        let MoveKind::EntityChange(change) = decode(&bytes).unwrap().kind else {
            panic!("wrong kind");
        };
        let EntState::Troop(t) = change.state else {
            panic!("wrong occupant");
        };
        assert_eq!(t.kind, TroopType::Farmer);
        assert_eq!(t.entity.effects(), &[EffectType::Shielded]);

        // Unknown occupant tag reads as an empty tile.
        let bytes = [0, 9, 7, 0, 5, 0, 6];
        let MoveKind::EntityChange(change) = decode(&bytes).unwrap().kind else {
            panic!("wrong kind");
        };
        assert_eq!(change.state, EntState::Empty { pos: Pos::new(5, 6) });
    }

    #[test]
    fn hex_byte_masks_and_clamps() {
        let hex = HexBase {
            kind: HexType::Bridge,
            team: Team::Pink,
        };
        assert_eq!(encode_hex(hex), 0x83);
        assert_eq!(decode_hex(0x83), hex);
        assert_eq!(
            decode_hex(0xf6),
            HexBase {
                kind: HexType::Ground,
                team: Team::Unclaimed,
            }
        );
    }

    #[test]
    fn region_record_layout() {
        let region = Region {
            res: RegionRes {
                money: 1,
                berry: 2,
                peach: 3,
            },
            var: RegionVar { farms: 6, tents: 7 },
            income: 4,
            tiles: 5,
            team: Team::Red,
            dead: false,
        };
        let mut buf = Vec::new();
        encode_region(&mut buf, &region);
        assert_eq!(buf.len(), 7 * 4);
        assert_eq!(&buf[12..16], &[0, 0, 0, 4]);
        let decoded = decode_region(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded.tiles, 5);
        assert_eq!(decoded.var, region.var);
        assert_eq!(decoded.team, Team::Unclaimed);
    }

    #[test]
    fn strings_are_bounded_and_checked() {
        let mut buf = Vec::new();
        write_str(&mut buf, "hello");
        assert!(matches!(
            read_str(&mut buf.as_slice(), 4),
            Err(CodecError::LengthLimit { what: "string", .. })
        ));
        assert_eq!(read_str(&mut buf.as_slice(), 5).unwrap(), "hello");

        let bad = [0, 0, 0, 2, 0xc3, 0x28];
        assert!(matches!(
            read_str(&mut bad.as_slice(), 16),
            Err(CodecError::InvalidUtf8)
        ));
    }

    #[test]
    fn snapshot_signature_is_checked() {
        let bytes = b"hex!\0\0\0\0";
        assert!(matches!(
            decode_template(&mut bytes.as_slice(), &CodecConfig::default()),
            Err(CodecError::InvalidSignature)
        ));
    }

    #[test]
    fn oversized_snapshot_is_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAP_SIGNATURE);
        write_str(&mut buf, "");
        write_str(&mut buf, "");
        write_i16(&mut buf, 300);
        write_i16(&mut buf, 300);
        let config = CodecConfig {
            max_list_len: 1000,
            ..CodecConfig::default()
        };
        assert!(matches!(
            decode_template(&mut buf.as_slice(), &config),
            Err(CodecError::LengthLimit { what: "tiles", .. })
        ));
    }

    #[test]
    fn region_change_payload() {
        let mv = Move::new(RegionChange::new(
            Pos::new(2, 2),
            RegionRes {
                money: -5,
                berry: logic::BERRY_PER_HP,
                peach: 0,
            },
            RegionVar { farms: 2, tents: 1 },
            true,
        ));
        let bytes = encode_message(&mv);
        assert_eq!(bytes.len(), 2 + 4 + 12 + 8 + 1);
        assert_eq!(bytes[18..26], [0, 0, 0, 2, 0, 0, 0, 1]);
        assert_eq!(*bytes.last().unwrap(), 1);
        assert_eq!(decode(&bytes).unwrap(), mv);
    }

    fn arb_pos() -> impl Strategy<Value = Pos> {
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Pos::new(x as i32, y as i32))
    }

    fn arb_kind() -> impl Strategy<Value = MoveKind> {
        prop_oneof![
            (arb_pos(), any::<bool>()).prop_map(|(p, t)| {
                let state = if t {
                    EntState::Build(Build::new(BuildType::Tower, p))
                } else {
                    EntState::Empty { pos: p }
                };
                EntityPlace::new(state).into()
            }),
            arb_pos().prop_map(|p| EntityWithdraw::new(p).into()),
            (arb_pos(), 0..7u8, any::<i32>()).prop_map(|(p, e, n)| {
                EntityEffect::new(p, effect_or_first(e), n).into()
            }),
            (arb_pos(), arb_pos()).prop_map(|(a, b)| TroopMove::new(a, b).into()),
            (arb_pos(), arb_pos()).prop_map(|(a, b)| TroopAttack::new(a, b).into()),
            (arb_pos(), any::<u64>(), any::<i32>(), 0..9u8)
                .prop_map(|(p, r, h, t)| TroopHeal::new(p, r, h, Team::clamped(t)).into()),
            (arb_pos(), any::<u64>(), 0..7u8, 0..9u8).prop_map(|(p, r, e, t)| {
                RadiusEffect::new(p, r, effect_or_first(e), Team::clamped(t)).into()
            }),
            (arb_pos(), arb_pos()).prop_map(|(a, b)| PlantCut::new(a, b).into()),
            (arb_pos(), any::<u64>()).prop_map(|(p, r)| PlantMod::new(p, r).into()),
            arb_pos().prop_map(|p| {
                EntityChange::new(EntState::Plant(Plant::new(PlantType::Peach, p))).into()
            }),
            (arb_pos(), any::<i32>(), any::<bool>()).prop_map(|(p, m, d)| {
                RegionChange::new(
                    p,
                    RegionRes {
                        money: m,
                        berry: 0,
                        peach: 0,
                    },
                    RegionVar {
                        farms: m / 3,
                        tents: 1,
                    },
                    d,
                )
                .into()
            }),
            (arb_pos(), arb_pos()).prop_map(|(a, b)| TroopMerge::new(a, b).into()),
            prop::collection::vec(arb_pos(), 0..4).prop_map(|ps| {
                let states = ps
                    .into_iter()
                    .map(|p| EntState::Troop(Troop::new(TroopType::Archer, p)))
                    .collect();
                GameTurn::new(states).into()
            }),
        ]
    }

    proptest! {
        #[test]
        fn every_kind_survives_the_wire(
            kind in arb_kind(),
            skill in proptest::option::of((arb_pos(), 0..SkillType::COUNT as u8, 1..=255u8)),
        ) {
            let mut mv = Move::new(kind);
            if let Some((pos, tag, cooldown)) = skill {
                mv = mv.with_skill(SkillHeader {
                    pos,
                    skill: SkillType::from_u8(tag).unwrap(),
                    cooldown: NonZeroU8::new(cooldown).unwrap(),
                });
            }
            let bytes = encode_message(&mv);
            prop_assert_eq!(decode(&bytes).unwrap(), mv);
        }
    }
}
