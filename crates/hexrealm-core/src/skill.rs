//! Skill identifiers carried in move skill headers.

/// A skill an entity can use.
///
/// The discriminant is the wire tag; decoders reject anything `>= COUNT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SkillType {
    /// No skill.
    #[default]
    Empty = 0,
    /// Buy a building.
    BuyBuild,
    /// Buy a troop.
    BuyTroop,
    /// Withdraw an entity.
    Withdraw,
    /// Move a troop.
    Move,
    /// Lumberjack attack.
    AttackLumber,
    /// Spearman attack.
    AttackSpear,
    /// Archer attack.
    AttackArcher,
    /// Baron attack.
    AttackBaron,
    /// Knight attack.
    AttackKnight,
    /// Farmer fruit harvest.
    Harvest,
    /// Lumberjack plant cut.
    TreeCut,
    /// Spearman shield.
    Shield,
    /// Archer range boost.
    RangeBoost,
    /// Baron defense boost.
    DefenseBoost,
    /// Knight offense boost.
    OffenseBoost,
    /// Castle troop heal.
    Heal,
    /// Beacon stun.
    Stun,
}

impl SkillType {
    /// Number of skills.
    pub const COUNT: usize = 18;

    /// Every skill in discriminant order.
    pub const ALL: [SkillType; Self::COUNT] = [
        SkillType::Empty,
        SkillType::BuyBuild,
        SkillType::BuyTroop,
        SkillType::Withdraw,
        SkillType::Move,
        SkillType::AttackLumber,
        SkillType::AttackSpear,
        SkillType::AttackArcher,
        SkillType::AttackBaron,
        SkillType::AttackKnight,
        SkillType::Harvest,
        SkillType::TreeCut,
        SkillType::Shield,
        SkillType::RangeBoost,
        SkillType::DefenseBoost,
        SkillType::OffenseBoost,
        SkillType::Heal,
        SkillType::Stun,
    ];

    /// Look up a skill by its wire tag.
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Entity cooldown timer this skill ticks, if any.
    ///
    /// Slot 0 is movement, 1 attacks, 2 troop abilities, 3 building abilities.
    /// Purchases have no cooldown.
    pub fn timer_slot(&self) -> Option<usize> {
        match self {
            SkillType::Empty | SkillType::BuyBuild | SkillType::BuyTroop => None,
            SkillType::Withdraw | SkillType::Move => Some(0),
            SkillType::AttackLumber
            | SkillType::AttackSpear
            | SkillType::AttackArcher
            | SkillType::AttackBaron
            | SkillType::AttackKnight => Some(1),
            SkillType::Harvest
            | SkillType::TreeCut
            | SkillType::Shield
            | SkillType::RangeBoost
            | SkillType::DefenseBoost
            | SkillType::OffenseBoost => Some(2),
            SkillType::Heal | SkillType::Stun => Some(3),
        }
    }
}
