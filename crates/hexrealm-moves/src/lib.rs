//! Reversible game moves for hexrealm.
//!
//! A [`Move`] is an optional [`SkillHeader`] (cooldown bookkeeping on the
//! acting entity) plus one [`MoveKind`]. Every kind captures whatever it
//! overwrites on [`Revertible::apply`] and puts it back on
//! [`Revertible::revert`], so applying then reverting leaves the map
//! equivalent to where it started. [`History`] is a linear undo stack
//! over applied moves.
//!
//! Moves never fail: a position off the map or a missing entity turns the
//! move into a no-op, logged at trace level.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod entity;
pub mod history;
pub mod kind;
pub mod mv;
pub mod plant;
pub mod region;
pub mod troop;

pub use entity::{EntityChange, EntityEffect, EntityPlace, EntityWithdraw, GameTurn};
pub use history::History;
pub use kind::{MoveKind, Revertible};
pub use mv::{Move, SkillHeader};
pub use plant::{PlantCut, PlantMod};
pub use region::RegionChange;
pub use troop::{RadiusEffect, TroopAttack, TroopHeal, TroopMerge, TroopMove};
