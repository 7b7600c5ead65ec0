//! Hexrealm: the rules core of a turn-based hex territory game.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all hexrealm sub-crates. For most users, adding `hexrealm` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use hexrealm::prelude::*;
//!
//! let mut map = Map::new(&MapConfig::new(4, 3)).unwrap();
//! for x in 0..2 {
//!     let hex = map.at_mut(Pos::new(x, 1)).unwrap();
//!     hex.kind = HexType::Ground;
//!     hex.team = Team::Red;
//! }
//! map.enumerate_regions();
//! map.set_troop(Troop::new(TroopType::Knight, Pos::new(0, 1)));
//!
//! let mut history = History::new();
//! history.add(&mut map, Move::new(TroopMove::new(Pos::new(0, 1), Pos::new(1, 1))));
//! assert!(map.at(Pos::new(1, 1)).unwrap().troop().is_some());
//!
//! // Peers exchange moves as bytes and compare state hashes.
//! let bytes = encode_message(&history.applied()[0]);
//! assert!(decode_message(&bytes).is_some());
//!
//! history.undo(&mut map);
//! assert!(map.at(Pos::new(0, 1)).unwrap().troop().is_some());
//! let _ = state_hash(&map);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `hexrealm-core` | Positions, teams, entities, balance tables |
//! | [`pool`] | `hexrealm-pool` | Index-stable pools with owning and counted handles |
//! | [`map`] | `hexrealm-map` | Tiles, regions, templates and area search |
//! | [`moves`] | `hexrealm-moves` | Reversible moves and undo history |
//! | [`codec`] | `hexrealm-codec` | Wire format, move log, state hash, byte channel |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`hexrealm-core`).
///
/// Contains [`types::Pos`], [`types::Team`], the entity records and the
/// balance functions in [`types::logic`].
pub use hexrealm_core as types;

/// Pooled storage (`hexrealm-pool`).
pub use hexrealm_pool as pool;

/// Hex tile map and regions (`hexrealm-map`).
///
/// [`map::Map`] owns the tiles and the region pool; [`map::Spread`]
/// performs bounded area searches.
pub use hexrealm_map as map;

/// Reversible moves (`hexrealm-moves`).
///
/// Every move kind applies and reverts against a [`map::Map`];
/// [`moves::History`] keeps the undo and redo cursor.
pub use hexrealm_moves as moves;

/// Binary wire format and synchronisation helpers (`hexrealm-codec`).
///
/// Encode moves with [`codec::encode_move`], record them with
/// [`codec::MoveLogWriter`], and compare peers with [`codec::state_hash`].
pub use hexrealm_codec as codec;

/// Common imports for typical hexrealm usage.
///
/// ```rust
/// use hexrealm::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use hexrealm_core::{
        Build, BuildType, EffectType, EntState, HexType, Plant, PlantType, Pos, RegionRes,
        SkillType, Team, Troop, TroopType,
    };

    // Map
    pub use hexrealm_map::{Hex, Map, MapConfig, MapError, Region, Spread};

    // Moves
    pub use hexrealm_moves::{
        EntityChange, EntityEffect, EntityPlace, EntityWithdraw, GameTurn, History, Move,
        MoveKind, PlantCut, PlantMod, RadiusEffect, RegionChange, Revertible, SkillHeader,
        TroopAttack, TroopHeal, TroopMerge, TroopMove,
    };

    // Codec
    pub use hexrealm_codec::{
        decode_message, encode_message, state_hash, ByteChannel, CodecError, LocalChannel,
    };
}
