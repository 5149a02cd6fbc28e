//! Command registry and line parsing
//!
//! Maps the first token of an input line to a command with a fixed
//! argument arity. Extra arguments are dropped; missing ones are passed
//! through as empty strings.

pub mod fs;
pub mod os;

use crate::error::{Error, Result};

/// Every command the shell understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Up,
    Cd,
    Ls,
    Cat,
    Add,
    Rn,
    Cp,
    Mv,
    Rm,
    Os,
    Hash,
    Compress,
    Decompress,
    Exit,
}

/// Registry entry: token, arity and a one-line summary for `--help`
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub token: &'static str,
    pub kind: CommandKind,
    pub args: &'static [&'static str],
    pub summary: &'static str,
}

impl CommandSpec {
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// The fixed command table
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        token: "up",
        kind: CommandKind::Up,
        args: &[],
        summary: "Go to the parent directory",
    },
    CommandSpec {
        token: "cd",
        kind: CommandKind::Cd,
        args: &["path"],
        summary: "Change directory",
    },
    CommandSpec {
        token: "ls",
        kind: CommandKind::Ls,
        args: &[],
        summary: "List the current directory",
    },
    CommandSpec {
        token: "cat",
        kind: CommandKind::Cat,
        args: &["path"],
        summary: "Print a file",
    },
    CommandSpec {
        token: "add",
        kind: CommandKind::Add,
        args: &["name"],
        summary: "Create an empty file",
    },
    CommandSpec {
        token: "rn",
        kind: CommandKind::Rn,
        args: &["path", "new_name"],
        summary: "Rename a file",
    },
    CommandSpec {
        token: "cp",
        kind: CommandKind::Cp,
        args: &["source", "dest_dir"],
        summary: "Copy a file into a directory",
    },
    CommandSpec {
        token: "mv",
        kind: CommandKind::Mv,
        args: &["source", "dest_dir"],
        summary: "Move a file into a directory",
    },
    CommandSpec {
        token: "rm",
        kind: CommandKind::Rm,
        args: &["path"],
        summary: "Delete a file",
    },
    CommandSpec {
        token: "os",
        kind: CommandKind::Os,
        args: &["--EOL|--cpus|--homedir|--username|--architecture"],
        summary: "Show operating system information",
    },
    CommandSpec {
        token: "hash",
        kind: CommandKind::Hash,
        args: &["path"],
        summary: "Print the SHA-256 digest of a file",
    },
    CommandSpec {
        token: "compress",
        kind: CommandKind::Compress,
        args: &["source", "dest_path"],
        summary: "Brotli-compress a file",
    },
    CommandSpec {
        token: "decompress",
        kind: CommandKind::Decompress,
        args: &["source", "dest_path"],
        summary: "Brotli-decompress a file",
    },
    CommandSpec {
        token: ".exit",
        kind: CommandKind::Exit,
        args: &[],
        summary: "Leave the file manager",
    },
];

/// Token lookup over [`COMMANDS`]
pub struct CommandRegistry;

impl CommandRegistry {
    pub fn lookup(token: &str) -> Option<&'static CommandSpec> {
        COMMANDS.iter().find(|spec| spec.token == token)
    }

    pub fn commands() -> &'static [CommandSpec] {
        COMMANDS
    }
}

impl CommandKind {
    /// Registry entry for this kind
    pub fn spec(self) -> &'static CommandSpec {
        let index = match self {
            CommandKind::Up => 0,
            CommandKind::Cd => 1,
            CommandKind::Ls => 2,
            CommandKind::Cat => 3,
            CommandKind::Add => 4,
            CommandKind::Rn => 5,
            CommandKind::Cp => 6,
            CommandKind::Mv => 7,
            CommandKind::Rm => 8,
            CommandKind::Os => 9,
            CommandKind::Hash => 10,
            CommandKind::Compress => 11,
            CommandKind::Decompress => 12,
            CommandKind::Exit => 13,
        };
        &COMMANDS[index]
    }
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    /// Exactly `arity` positional arguments
    pub args: Vec<String>,
}

impl Command {
    /// Parse a raw input line.
    ///
    /// The line is trimmed and split on whitespace; no quoting is supported.
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let token = tokens.next().unwrap_or("");

        let spec = CommandRegistry::lookup(token).ok_or_else(|| Error::UnknownCommand {
            command: token.to_string(),
        })?;

        let mut args: Vec<String> = tokens.take(spec.arity()).map(str::to_string).collect();
        args.resize(spec.arity(), String::new());

        Ok(Self {
            kind: spec.kind,
            args,
        })
    }

    /// Positional argument, `""` when absent
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Usage text listing every command, for `--help`
pub fn usage() -> String {
    COMMANDS
        .iter()
        .map(|spec| {
            let signature = std::iter::once(spec.token)
                .chain(spec.args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            format!("    {:<44} {}", signature, spec.summary)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
