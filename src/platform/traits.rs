//! Platform-specific operation traits
//!
//! These traits define the interface for OS introspection, allowing the
//! `os` command to be tested against a fixed fake system.

use crate::error::Result;
use std::path::PathBuf;

/// One logical CPU core
#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    /// Model name as reported by the OS
    pub model: String,
    /// Clock speed in MHz
    pub speed_mhz: u64,
}

impl CpuInfo {
    /// Clock speed in GHz
    pub fn speed_ghz(&self) -> f64 {
        self.speed_mhz as f64 / 1000.0
    }
}

/// Platform-specific system information
pub trait SystemInfoOps: Send + Sync {
    /// Line ending used by the platform
    fn eol(&self) -> &'static str;

    /// Every logical core
    fn cpus(&self) -> Vec<CpuInfo>;

    /// Home directory of the current user
    fn home_dir(&self) -> Result<PathBuf>;

    /// Login name of the current user
    fn username(&self) -> Result<String>;

    /// CPU architecture the binary runs on, e.g. `x64` or `arm64`
    fn architecture(&self) -> &'static str {
        arch_name(std::env::consts::ARCH)
    }
}

/// Map a Rust target architecture to its conventional short name
pub fn arch_name(rust_arch: &'static str) -> &'static str {
    match rust_arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
