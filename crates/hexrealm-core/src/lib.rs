//! Core types for the hexrealm game core.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary every other crate speaks: board positions, tile terrain and
//! team ownership, entity records, skill and effect identifiers, balance
//! tables, and stable name keys for presentation layers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod entity;
pub mod id;
pub mod logic;
pub mod names;
pub mod res;
pub mod skill;

pub use entity::{
    Build, BuildType, EffectType, EntState, Entity, Plant, PlantType, Troop, TroopType,
};
pub use id::{HexType, Pos, Team};
pub use res::{RegionRes, RegionVar};
pub use skill::SkillType;
