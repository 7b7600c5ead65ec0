//! Hex tile map for the hexrealm game core.
//!
//! A [`Map`] is a grid of [`Hex`] tiles in offset-row layout. Tiles own
//! their occupants through pool handles and belong to at most one
//! [`Region`], a counted handle into the map's region pool. Region
//! aggregates (tile count, income, farm and tent counters) are kept in step
//! with the tiles by the join/leave protocol on [`Hex`].
//!
//! [`Spread`] is the area search every radius-based rule uses, and
//! [`MapTemplate`] is the portable form of a map.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod grid;
pub mod hex;
pub mod map;
pub mod region;
pub mod spread;
pub mod template;

pub use config::MapConfig;
pub use error::MapError;
pub use grid::{neighbor, neighbors, Direction};
pub use hex::Hex;
pub use map::Map;
pub use region::{Region, Regions};
pub use spread::Spread;
pub use template::{HexBase, MapTemplate, RegionSeed};
