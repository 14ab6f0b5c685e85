//! Kernel module - server infrastructure and dependencies.

pub mod test_dependencies;
pub mod traits;

pub use test_dependencies::MemoryUserStore;
pub use traits::*;
