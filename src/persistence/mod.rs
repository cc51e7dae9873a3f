//! Persistence layer modules.

pub mod envelope;
pub mod file_slot;
pub mod slot;

pub use file_slot::FileSlot;
pub use slot::{DurableSlot, MemorySlot};
