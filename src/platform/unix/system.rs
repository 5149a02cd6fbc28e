//! Unix system information

use crate::error::{Error, Result};
use crate::platform::traits::{CpuInfo, SystemInfoOps};
use nix::unistd::{Uid, User};
use std::path::PathBuf;

pub struct UnixSystem;

impl UnixSystem {
    pub fn new() -> Self {
        Self
    }
}

impl SystemInfoOps for UnixSystem {
    fn eol(&self) -> &'static str {
        "\n"
    }

    fn cpus(&self) -> Vec<CpuInfo> {
        crate::platform::cpu_list()
    }

    fn home_dir(&self) -> Result<PathBuf> {
        crate::platform::home_dir()
    }

    fn username(&self) -> Result<String> {
        // Look up the real uid rather than trusting $USER
        match User::from_uid(Uid::current()) {
            Ok(Some(user)) => Ok(user.name),
            Ok(None) => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("No passwd entry for uid {}", Uid::current()),
            ))),
            Err(errno) => Err(Error::Io(std::io::Error::from(errno))),
        }
    }
}
