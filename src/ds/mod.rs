pub mod chain;
pub mod slot_arena;

pub use chain::{Chain, Node};
pub use slot_arena::{SlotArena, SlotId};
