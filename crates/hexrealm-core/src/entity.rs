//! Entity records: troops, buildings and plants.
//!
//! All three share an [`Entity`] base (position, health, cooldown timers,
//! status effects) and add their own type enum. [`EntState`] is the tagged
//! snapshot of "whatever occupies a tile", used by moves to capture and
//! restore a tile's occupant.

use smallvec::SmallVec;

use crate::id::Pos;
use crate::logic;
use crate::res::RegionRes;
use crate::skill::SkillType;

/// Status effect applied to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EffectType {
    /// Spearman shield.
    Shielded = 0,
    /// Archer range boost.
    RangeBoost,
    /// Baron defense boost.
    DefenseBoost,
    /// Knight offense boost.
    OffenseBoost,
    /// Poisoned by an archer.
    Poisoned,
    /// Stunned by a beacon.
    Stunned,
    /// Next attack poisons.
    Enchant,
}

impl EffectType {
    /// Every effect in discriminant order.
    pub const ALL: [EffectType; 7] = [
        EffectType::Shielded,
        EffectType::RangeBoost,
        EffectType::DefenseBoost,
        EffectType::OffenseBoost,
        EffectType::Poisoned,
        EffectType::Stunned,
        EffectType::Enchant,
    ];

    /// Look up an effect by its discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }
}

/// Troop type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TroopType {
    /// Fruit harvester.
    #[default]
    Farmer = 0,
    /// Wood cutter.
    Lumberjack,
    /// Stalling troop.
    Spearman,
    /// Ranged troop.
    Archer,
    /// Defensive troop.
    Baron,
    /// Offensive troop.
    Knight,
}

impl TroopType {
    /// Every troop type in discriminant order.
    pub const ALL: [TroopType; 6] = [
        TroopType::Farmer,
        TroopType::Lumberjack,
        TroopType::Spearman,
        TroopType::Archer,
        TroopType::Baron,
        TroopType::Knight,
    ];

    /// Look up a troop type by its discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }
}

/// Building type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BuildType {
    /// Town hall, resource storage.
    #[default]
    Castle = 0,
    /// Passive income.
    Farm,
    /// Income from unclaimed tiles.
    Mine,
    /// Basic defense.
    Tower,
    /// Stunning defense.
    Beacon,
    /// Strong defense.
    Fort,
    /// Troop healing station.
    Tent,
}

impl BuildType {
    /// Every building type in discriminant order.
    pub const ALL: [BuildType; 7] = [
        BuildType::Castle,
        BuildType::Farm,
        BuildType::Mine,
        BuildType::Tower,
        BuildType::Beacon,
        BuildType::Fort,
        BuildType::Tent,
    ];

    /// Look up a building type by its discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }
}

/// Plant type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlantType {
    /// Bare bush.
    #[default]
    Bush = 0,
    /// Bush with berries.
    Berry,
    /// Peach sapling.
    Sapling,
    /// Peach tree.
    Tree,
    /// Peach tree with peaches.
    Peach,
    /// Pine tree.
    Pine,
    /// Grave left by a dead entity.
    Grave,
}

impl PlantType {
    /// Every plant type in discriminant order.
    pub const ALL: [PlantType; 7] = [
        PlantType::Bush,
        PlantType::Berry,
        PlantType::Sapling,
        PlantType::Tree,
        PlantType::Peach,
        PlantType::Pine,
        PlantType::Grave,
    ];

    /// Look up a plant type by its discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }
}

/// State shared by every entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    /// Position on the board.
    pub pos: Pos,
    /// Current hitpoints.
    pub hp: i32,
    /// Skill cooldown timers, indexed by [`SkillType::timer_slot`].
    pub timers: [u8; 4],
    effects: SmallVec<[EffectType; 4]>,
}

impl Entity {
    /// Create an entity with no effects and idle timers.
    pub fn new(pos: Pos, hp: i32) -> Self {
        Self {
            pos,
            hp,
            timers: [0; 4],
            effects: SmallVec::new(),
        }
    }

    /// Applied effects, in the order they were added.
    pub fn effects(&self) -> &[EffectType] {
        &self.effects
    }

    /// Whether the effect is applied.
    pub fn has_effect(&self, effect: EffectType) -> bool {
        self.effects.contains(&effect)
    }

    /// Apply an effect. Applying an effect twice is a no-op.
    pub fn add_effect(&mut self, effect: EffectType) {
        if !self.has_effect(effect) {
            self.effects.push(effect);
        }
    }

    /// Remove an effect if present.
    pub fn remove_effect(&mut self, effect: EffectType) {
        self.effects.retain(|e| *e != effect);
    }

    /// Replace the whole effect list.
    pub fn set_effects(&mut self, effects: &[EffectType]) {
        self.effects.clear();
        for &effect in effects {
            self.add_effect(effect);
        }
    }

    /// Add cooldown to the timer ticked by `skill`.
    pub fn add_cooldown(&mut self, skill: SkillType, cooldown: u8) {
        if let Some(slot) = skill.timer_slot() {
            self.timers[slot] = self.timers[slot].saturating_add(cooldown);
        }
    }

    /// Remove cooldown from the timer ticked by `skill`.
    pub fn sub_cooldown(&mut self, skill: SkillType, cooldown: u8) {
        if let Some(slot) = skill.timer_slot() {
            self.timers[slot] = self.timers[slot].saturating_sub(cooldown);
        }
    }

    /// Deal damage, returning the hitpoints actually lost.
    pub fn damage(&mut self, dmg: i32) -> i32 {
        let dealt = dmg.clamp(0, self.hp.max(0));
        self.hp -= dealt;
        dealt
    }

    /// Whether the entity has no hitpoints left.
    pub fn dead(&self) -> bool {
        self.hp <= 0
    }
}

/// A troop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Troop {
    /// Shared entity state.
    pub entity: Entity,
    /// Troop type.
    pub kind: TroopType,
}

impl Troop {
    /// Create a troop at full health.
    pub fn new(kind: TroopType, pos: Pos) -> Self {
        Self {
            entity: Entity::new(pos, logic::troop_hp(kind)),
            kind,
        }
    }

    /// Maximum hitpoints.
    pub fn max_hp(&self) -> i32 {
        logic::troop_hp(self.kind)
    }
}

/// A building.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Build {
    /// Shared entity state.
    pub entity: Entity,
    /// Building type.
    pub kind: BuildType,
}

impl Build {
    /// Create a building at full health.
    pub fn new(kind: BuildType, pos: Pos) -> Self {
        Self {
            entity: Entity::new(pos, logic::build_hp(kind)),
            kind,
        }
    }

    /// Maximum hitpoints.
    pub fn max_hp(&self) -> i32 {
        logic::build_hp(self.kind)
    }
}

/// A plant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plant {
    /// Shared entity state.
    pub entity: Entity,
    /// Plant type.
    pub kind: PlantType,
}

impl Plant {
    /// Create a plant.
    pub fn new(kind: PlantType, pos: Pos) -> Self {
        Self {
            entity: Entity::new(pos, 1),
            kind,
        }
    }

    /// Whether the plant bears fruit.
    pub fn harvestable(&self) -> bool {
        matches!(self.kind, PlantType::Berry | PlantType::Peach)
    }

    /// Pick the fruit, returning the gathered resources.
    pub fn harvest(&mut self) -> RegionRes {
        match self.kind {
            PlantType::Berry => {
                self.kind = PlantType::Bush;
                RegionRes {
                    berry: logic::HARVEST_YIELD,
                    ..RegionRes::default()
                }
            }
            PlantType::Peach => {
                self.kind = PlantType::Tree;
                RegionRes {
                    peach: logic::HARVEST_YIELD,
                    ..RegionRes::default()
                }
            }
            _ => RegionRes::default(),
        }
    }
}

/// Snapshot of a tile occupant.
///
/// `Empty` still carries the position so that restoring an empty snapshot
/// knows which tile to clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntState {
    /// No occupant.
    Empty {
        /// Tile position.
        pos: Pos,
    },
    /// A troop.
    Troop(Troop),
    /// A building.
    Build(Build),
    /// A plant.
    Plant(Plant),
}

impl Default for EntState {
    fn default() -> Self {
        EntState::Empty { pos: Pos::default() }
    }
}

impl EntState {
    /// Tile position the snapshot belongs to.
    pub fn pos(&self) -> Pos {
        match self {
            EntState::Empty { pos } => *pos,
            EntState::Troop(t) => t.entity.pos,
            EntState::Build(b) => b.entity.pos,
            EntState::Plant(p) => p.entity.pos,
        }
    }

    /// Move the snapshot to another tile.
    pub fn set_pos(&mut self, to: Pos) {
        match self {
            EntState::Empty { pos } => *pos = to,
            EntState::Troop(t) => t.entity.pos = to,
            EntState::Build(b) => b.entity.pos = to,
            EntState::Plant(p) => p.entity.pos = to,
        }
    }

    /// Shared entity state, `None` for an empty tile.
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            EntState::Empty { .. } => None,
            EntState::Troop(t) => Some(&t.entity),
            EntState::Build(b) => Some(&b.entity),
            EntState::Plant(p) => Some(&p.entity),
        }
    }

    /// Whether the snapshot holds no occupant.
    pub fn is_empty(&self) -> bool {
        matches!(self, EntState::Empty { .. })
    }
}
