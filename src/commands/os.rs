//! `os` command: pass-through over platform introspection

use crate::error::{Error, Result};
use crate::platform::SystemInfoOps;

/// Supported `os` sub-flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFlag {
    Eol,
    Cpus,
    HomeDir,
    Username,
    Architecture,
}

impl OsFlag {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--EOL" => Some(Self::Eol),
            "--cpus" => Some(Self::Cpus),
            "--homedir" => Some(Self::HomeDir),
            "--username" => Some(Self::Username),
            "--architecture" => Some(Self::Architecture),
            _ => None,
        }
    }
}

/// Lines printed for `os <flag>`
pub fn os_info(flag: &str, system: &dyn SystemInfoOps) -> Result<Vec<String>> {
    let flag = OsFlag::from_flag(flag).ok_or_else(|| Error::UnknownOsFlag {
        flag: flag.to_string(),
    })?;

    let lines = match flag {
        OsFlag::Eol => {
            // JSON-quoted so the control characters are visible
            let quoted = serde_json::to_string(system.eol())
                .unwrap_or_else(|_| format!("{:?}", system.eol()));
            vec![quoted]
        }
        OsFlag::Cpus => {
            let cpus = system.cpus();
            let mut lines = Vec::with_capacity(cpus.len() + 1);
            lines.push(format!("Total CPUs: {}", cpus.len()));
            for (index, cpu) in cpus.iter().enumerate() {
                lines.push(format!(
                    "CPU {}: {}, {} GHz",
                    index + 1,
                    cpu.model,
                    cpu.speed_ghz()
                ));
            }
            lines
        }
        OsFlag::HomeDir => vec![system.home_dir()?.display().to_string()],
        OsFlag::Username => vec![system.username()?],
        OsFlag::Architecture => vec![system.architecture().to_string()],
    };

    Ok(lines)
}
