//! Platform abstraction layer
//!
//! This module provides a unified interface for OS introspection,
//! abstracting away differences between Unix and Windows.

mod traits;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use traits::*;

use crate::error::{Error, Result};
use std::path::PathBuf;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the platform-specific system information operations
    pub fn system() -> Box<dyn SystemInfoOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixSystem::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsSystem::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }
}

/// Logical cores with model name and frequency, shared by all platforms
pub(crate) fn cpu_list() -> Vec<CpuInfo> {
    let system =
        System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::everything()));
    system
        .cpus()
        .iter()
        .map(|cpu| CpuInfo {
            model: cpu.brand().trim().to_string(),
            speed_mhz: cpu.frequency(),
        })
        .collect()
}

pub(crate) fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })
}
