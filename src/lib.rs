#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod index;
pub mod query;
pub mod stats;

pub use crate::core::{Record, SortKey};
pub use crate::error::{Error, Result};
pub use crate::index::{AvlIndex, SharedIndex, Traversal};
