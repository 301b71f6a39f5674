pub mod avl;
pub mod shared;

pub use avl::{height_bound, AvlIndex, Traversal};
pub use shared::SharedIndex;
