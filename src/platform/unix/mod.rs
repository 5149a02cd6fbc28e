//! Unix-specific platform implementations

mod system;

pub use system::UnixSystem;
