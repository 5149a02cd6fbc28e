//! Windows system information

use crate::error::{Error, Result};
use crate::platform::traits::{CpuInfo, SystemInfoOps};
use std::path::PathBuf;

pub struct WindowsSystem;

impl WindowsSystem {
    pub fn new() -> Self {
        Self
    }
}

impl SystemInfoOps for WindowsSystem {
    fn eol(&self) -> &'static str {
        "\r\n"
    }

    fn cpus(&self) -> Vec<CpuInfo> {
        crate::platform::cpu_list()
    }

    fn home_dir(&self) -> Result<PathBuf> {
        crate::platform::home_dir()
    }

    fn username(&self) -> Result<String> {
        std::env::var("USERNAME").map_err(|_| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "USERNAME is not set",
            ))
        })
    }
}
