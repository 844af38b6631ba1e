// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod command_tool;

pub use command_tool::CommandPatchTool;
