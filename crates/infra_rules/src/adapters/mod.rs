//! Rule source adapters
//!
//! Implementations of the domain's `RuleSource` port.

pub mod json_dir;
pub mod memory;

pub use json_dir::JsonDirectorySource;
pub use memory::InMemorySource;
