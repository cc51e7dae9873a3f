//! Interpreter loop, command registry, and checkpoint protocol.

pub mod checkpoint_manager;
pub mod interpreter;
pub mod registry;

pub use checkpoint_manager::Checkpointer;
pub use interpreter::Interpreter;
pub use registry::CommandRegistry;
