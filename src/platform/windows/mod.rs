//! Windows-specific platform implementations

mod system;

pub use system::WindowsSystem;
