//! A move with its optional skill header.

use std::num::NonZeroU8;

use hexrealm_core::{Pos, SkillType};
use hexrealm_map::{Hex, Map};

use crate::kind::{MoveKind, Revertible};

/// Cooldown bookkeeping for the entity using a skill.
///
/// On the wire a zero cooldown means "no header", hence `NonZeroU8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillHeader {
    /// Tile of the entity using the skill.
    pub pos: Pos,
    /// Skill used.
    pub skill: SkillType,
    /// Turns added to the skill's timer.
    pub cooldown: NonZeroU8,
}

impl SkillHeader {
    fn charge(&self, map: &mut Map, add: bool) {
        let Some(mut e) = map.at_mut(self.pos).and_then(Hex::entity_mut) else {
            tracing::trace!(pos = %self.pos, skill = ?self.skill, "cooldown without an entity");
            return;
        };
        if add {
            e.add_cooldown(self.skill, self.cooldown.get());
        } else {
            e.sub_cooldown(self.skill, self.cooldown.get());
        }
    }
}

/// One reversible step of the game.
///
/// The skill header, when present, is charged before the kind applies and
/// refunded after it reverts, so it always lands on the entity standing at
/// `skill.pos` in the pre-move state.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU8;
/// use hexrealm_core::{Pos, SkillType};
/// use hexrealm_moves::{Move, SkillHeader, TroopMove};
///
/// let from = Pos::new(1, 1);
/// let dest = Pos::new(2, 1);
/// let mv = Move::new(TroopMove::new(from, dest)).with_skill(SkillHeader {
///     pos: from,
///     skill: SkillType::Move,
///     cooldown: NonZeroU8::new(1).unwrap(),
/// });
/// assert_eq!(mv.apply_cursor(), Some(dest));
/// assert_eq!(mv.revert_cursor(), Some(from));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    /// Cooldown bookkeeping, if the move uses a skill.
    pub skill: Option<SkillHeader>,
    /// What the move does.
    pub kind: MoveKind,
}

impl Move {
    /// A move without a skill header.
    pub fn new(kind: impl Into<MoveKind>) -> Self {
        Self {
            skill: None,
            kind: kind.into(),
        }
    }

    /// Attach a skill header.
    pub fn with_skill(mut self, skill: SkillHeader) -> Self {
        self.skill = Some(skill);
        self
    }

    /// Charge the cooldown, then apply the kind.
    pub fn apply(&mut self, map: &mut Map) {
        if let Some(skill) = &self.skill {
            skill.charge(map, true);
        }
        tracing::trace!(kind = self.kind.name(), "apply");
        self.kind.apply(map);
    }

    /// Revert the kind, then refund the cooldown.
    pub fn revert(&mut self, map: &mut Map) {
        tracing::trace!(kind = self.kind.name(), "revert");
        self.kind.revert(map);
        if let Some(skill) = &self.skill {
            skill.charge(map, false);
        }
    }

    /// Tile worth selecting after the move is applied.
    pub fn apply_cursor(&self) -> Option<Pos> {
        match &self.kind {
            MoveKind::TroopMove(m) => Some(m.dest),
            MoveKind::TroopMerge(m) => Some(m.dest),
            MoveKind::EntityPlace(m) => Some(m.entity.pos()),
            MoveKind::EntityChange(m) => Some(m.state.pos()),
            _ => None,
        }
    }

    /// Tile worth selecting after the move is reverted.
    pub fn revert_cursor(&self) -> Option<Pos> {
        match &self.kind {
            MoveKind::TroopMove(m) => Some(m.from),
            MoveKind::TroopMerge(m) => Some(m.from),
            MoveKind::EntityPlace(m) => Some(m.entity.pos()),
            MoveKind::EntityChange(m) => Some(m.state.pos()),
            _ => None,
        }
    }
}

impl From<MoveKind> for Move {
    fn from(kind: MoveKind) -> Self {
        Self::new(kind)
    }
}
