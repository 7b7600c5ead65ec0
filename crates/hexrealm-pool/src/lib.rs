//! Index-stable pooled storage for the hexrealm game core.
//!
//! Two flavours share one slot discipline:
//!
//! - [`Pool`] hands out an owning [`Item`] per value; dropping the item
//!   deletes the slot. Bare [`Ref`] handles alias a slot without owning it.
//! - [`RefPool`] hands out counted [`Share`] handles; the slot is deleted
//!   when the last share drops.
//!
//! Indices are stable for the lifetime of a value. A deleted index is
//! reused before the pool grows, smallest first, and deleting the last slot
//! trims every deleted slot at the tail.
//!
//! Pools are single-threaded: handles hold an `Rc` to the storage, so
//! neither pools nor handles are `Send`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pool;
pub mod refpool;
mod slots;

pub use error::{PoolAccessError, PoolPopError};
pub use pool::{Item, Pool, Ref};
pub use refpool::{RefPool, Share};
